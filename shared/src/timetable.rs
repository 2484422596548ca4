//! Journey timetables.
//!
//! The server stores a usual journey's timetable as a full date-time, but only
//! the time of day is meaningful to the user. Before a journey is submitted a
//! date in the past is rolled forward to the next occurrence of that time of
//! day. Dates still ahead are left alone.

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

pub const SERVER_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("timetable {value:?} does not match {SERVER_DATE_TIME_FORMAT}")]
pub struct TimetableError {
    pub value: String,
}

pub fn parse(value: &str) -> Result<NaiveDateTime, TimetableError> {
    NaiveDateTime::parse_from_str(value.trim(), SERVER_DATE_TIME_FORMAT).map_err(|_| {
        TimetableError {
            value: value.to_owned(),
        }
    })
}

#[must_use]
pub fn format(value: NaiveDateTime) -> String {
    value.format(SERVER_DATE_TIME_FORMAT).to_string()
}

/// `at` itself when it is still ahead of `now`, otherwise the earliest
/// date-time strictly after `now` with the same time of day.
#[must_use]
pub fn next_occurrence(at: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    if at > now {
        return at;
    }
    let candidate = now.date().and_time(at.time());
    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// String form of [`next_occurrence`] over the server format.
pub fn roll_forward(timetable: &str, now: NaiveDateTime) -> Result<String, TimetableError> {
    parse(timetable).map(|at| format(next_occurrence(at, now)))
}
