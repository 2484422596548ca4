//! Benchmark scaling and display strings.
//!
//! Benchmarks arrive as daily figures. Monthly and yearly figures are the
//! daily ones multiplied by a working-day coefficient.

use crate::model::{EcoProfileData, PerformancePeriod};

pub const DAILY_COEFFICIENT: i32 = 1;
pub const MONTHLY_COEFFICIENT: i32 = 20;
pub const YEARLY_COEFFICIENT: i32 = 240;

pub const CURRENCY_SYMBOL: &str = "€";

impl PerformancePeriod {
    #[must_use]
    pub const fn coefficient(self) -> i32 {
        match self {
            Self::Today => DAILY_COEFFICIENT,
            Self::Month => MONTHLY_COEFFICIENT,
            Self::Year => YEARLY_COEFFICIENT,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Month => "This month",
            Self::Year => "This year",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BenchmarkValues {
    pub ecology: Option<String>,
    pub savings: Option<String>,
    pub fitness: Option<String>,
}

impl BenchmarkValues {
    #[must_use]
    pub fn for_period(profile: &EcoProfileData, period: PerformancePeriod) -> Self {
        let coefficient = f64::from(period.coefficient());

        Self {
            ecology: profile
                .co2_saving_benchmark
                .map(|b| format!("{} CO₂", format_ecology(truncate(b.value * coefficient)))),
            savings: profile
                .money_saving_benchmark
                .map(|b| format!("{} {CURRENCY_SYMBOL}", truncate(b.value * coefficient))),
            // Fitness is reported in hours.
            fitness: profile
                .fitness_benchmark
                .map(|b| format_duration(truncate(b.value * 60.0 * coefficient))),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BenchmarkProgress {
    pub ecology: f32,
    pub savings: f32,
    pub fitness: f32,
}

impl From<&EcoProfileData> for BenchmarkProgress {
    fn from(profile: &EcoProfileData) -> Self {
        Self {
            ecology: profile.co2_saving_benchmark.map_or(0.0, |b| b.percentage),
            savings: profile.money_saving_benchmark.map_or(0.0, |b| b.percentage),
            fitness: profile.fitness_benchmark.map_or(0.0, |b| b.percentage),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        value as i64
    } else {
        0
    }
}

/// CO₂ amount given in grams.
#[must_use]
pub fn format_ecology(grams: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let g = grams as f64;
    if grams.abs() < 1_000 {
        format!("{grams} g")
    } else if grams.abs() < 1_000_000 {
        format!("{:.1} kg", g / 1_000.0)
    } else {
        format!("{:.1} t", g / 1_000_000.0)
    }
}

#[must_use]
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "0m".into();
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}
