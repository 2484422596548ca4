use serde::{Deserialize, Serialize};

use crate::benchmarks::{BenchmarkProgress, BenchmarkValues};
use crate::model::{AddressLocal, Leg, Model, PerformancePeriod, TransportType};
use crate::trip_editor::EditSession;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SelectableTransport {
    pub transport: TransportType,
    pub description_key: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LegEditorView {
    pub from_address: AddressLocal,
    pub to_address: AddressLocal,
    pub is_edit: bool,
    pub can_edit_start: bool,
    pub can_edit_end: bool,
    pub can_delete: bool,
    pub transport_types: Vec<SelectableTransport>,
}

impl From<&EditSession> for LegEditorView {
    fn from(session: &EditSession) -> Self {
        let selected = session.leg.travel_mode();
        Self {
            from_address: session.leg.start(),
            to_address: session.leg.end(),
            is_edit: session.is_edit,
            can_edit_start: session.can_edit_start,
            can_edit_end: session.can_edit_end,
            can_delete: session.can_delete,
            transport_types: TransportType::USUAL_TRIP
                .into_iter()
                .map(|transport| SelectableTransport {
                    transport,
                    description_key: transport.description_key().to_owned(),
                    selected: Some(transport) == selected,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub is_progress: bool,

    pub performance_period: PerformancePeriod,
    pub performance_period_name: String,
    pub ecology_progress: f32,
    pub savings_progress: f32,
    pub fitness_progress: f32,
    pub ecology_value: Option<String>,
    pub savings_value: Option<String>,
    pub fitness_value: Option<String>,

    pub outward_journey: Vec<Leg>,
    pub return_journey: Option<Vec<Leg>>,
    pub is_route_different: bool,
    pub is_journey_same: bool,

    pub leg_editor: Option<LegEditorView>,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let (progress, values) = model.eco_profile.as_ref().map_or_else(
            || (BenchmarkProgress::default(), BenchmarkValues::default()),
            |profile| {
                (
                    BenchmarkProgress::from(profile),
                    BenchmarkValues::for_period(profile, model.performance_period),
                )
            },
        );

        let round_trip = model.trip.round_trip();
        let is_journey_same = model.trip.is_journey_same();

        Self {
            is_progress: model.is_progress(),
            performance_period: model.performance_period,
            performance_period_name: model.performance_period.name().to_owned(),
            ecology_progress: progress.ecology,
            savings_progress: progress.savings,
            fitness_progress: progress.fitness,
            ecology_value: values.ecology,
            savings_value: values.savings,
            fitness_value: values.fitness,
            outward_journey: round_trip
                .map(|rt| rt.outward_journey.journey_leg_list.clone())
                .unwrap_or_default(),
            return_journey: round_trip
                .and_then(|rt| rt.return_journey.as_ref())
                .map(|j| j.journey_leg_list.clone()),
            is_route_different: !is_journey_same,
            is_journey_same,
            leg_editor: model.trip.session().map(LegEditorView::from),
        }
    }
}
