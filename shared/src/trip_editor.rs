//! Editing session for the usual round trip.
//!
//! `TripEditor` owns the round trip shown on the edit screens and the leg
//! currently being edited. Structural changes (add, edit, delete a leg) are
//! never applied in place: `commit_leg` builds a candidate journey for the
//! validation service, and only the validated journey returned by the server
//! is stored via `apply_validated`.
//!
//! Every replacement of the held round trip bumps `revision`. Results of
//! requests issued against an older revision are rejected.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{AddressLocal, Journey, JourneyKind, Leg, RoundTrip, TransportType};
use crate::timetable;

/// The leg under edit. `leg` is a detached copy; the journey it came from is
/// untouched until the change has been validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditSession {
    pub leg: Leg,
    pub position: usize,
    pub journey: JourneyKind,
    pub is_edit: bool,
    pub can_edit_start: bool,
    pub can_edit_end: bool,
    pub can_delete: bool,
}

impl EditSession {
    /// Index the edit copy lands at when committed in add mode. A leg added
    /// from the end boundary goes after its anchor.
    #[must_use]
    pub const fn insertion_index(&self) -> usize {
        if self.can_edit_end {
            self.position
        } else {
            self.position + 1
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JourneySubmission {
    pub kind: JourneyKind,
    pub journey: Journey,
    pub revision: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundTripSubmission {
    pub round_trip: RoundTrip,
    pub revision: u64,
}

#[derive(Debug)]
pub struct TripEditor {
    round_trip: Option<RoundTrip>,
    revision: u64,
    needs_reload: bool,
    session: Option<EditSession>,
}

impl Default for TripEditor {
    fn default() -> Self {
        Self {
            round_trip: None,
            revision: 0,
            needs_reload: true,
            session: None,
        }
    }
}

impl TripEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn round_trip(&self) -> Option<&RoundTrip> {
        self.round_trip.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn needs_reload(&self) -> bool {
        self.needs_reload
    }

    #[must_use]
    pub fn is_current(&self, revision: u64) -> bool {
        self.revision == revision
    }

    #[must_use]
    pub fn is_journey_same(&self) -> bool {
        self.round_trip.as_ref().map_or(true, RoundTrip::is_journey_same)
    }

    pub fn load(&mut self, round_trip: RoundTrip) {
        self.revision += 1;
        tracing::info!(
            revision = self.revision,
            outward_legs = round_trip.outward_journey.len(),
            has_return = round_trip.return_journey.is_some(),
            "round trip loaded"
        );
        self.round_trip = Some(round_trip);
        self.needs_reload = false;
        self.session = None;
    }

    /// Forces a refetch on next entry and turns every in-flight result stale.
    pub fn invalidate(&mut self) {
        self.revision += 1;
        self.needs_reload = true;
        self.session = None;
        tracing::debug!(revision = self.revision, "round trip invalidated");
    }

    /// Returns false, leaving state untouched, when `position` is out of range
    /// for the chosen journey.
    pub fn begin_edit_leg(
        &mut self,
        position: usize,
        is_edit: bool,
        is_outward: bool,
        is_last_plus: bool,
    ) -> bool {
        let kind = JourneyKind::from_outward(is_outward);
        let Some(journey) = self.round_trip.as_ref().and_then(|rt| rt.journey(kind)) else {
            tracing::debug!(?kind, "no journey to edit");
            return false;
        };
        let Some(leg) = journey.legs().get(position) else {
            tracing::debug!(?kind, position, len = journey.len(), "leg position out of range");
            return false;
        };

        let len = journey.len();
        let cant_edit_end = is_last_plus || (is_edit && position + 1 == len);

        self.session = Some(EditSession {
            leg: leg.clone(),
            position,
            journey: kind,
            is_edit,
            can_edit_start: position != 0,
            can_edit_end: !cant_edit_end,
            can_delete: len > 1,
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("leg edit cancelled");
        }
    }

    pub fn select_transport_mode(&mut self, transport: TransportType) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.leg.travel_mode_code = transport.code();
        true
    }

    pub fn apply_start_address(&mut self, address: &AddressLocal) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.leg.set_start(address);
        true
    }

    pub fn apply_end_address(&mut self, address: &AddressLocal) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.leg.set_end(address);
        true
    }

    /// Builds the journey to validate after saving (`is_save`) or deleting the
    /// session's leg. Nothing is stored until [`Self::apply_validated`].
    #[must_use]
    pub fn commit_leg(&self, is_save: bool, now: NaiveDateTime) -> Option<JourneySubmission> {
        let session = self.session.as_ref()?;
        let current = self.round_trip.as_ref()?.journey(session.journey)?;
        let mut journey = current.clone();
        let legs = &mut journey.journey_leg_list;

        if !is_save {
            if !session.can_delete || session.position >= legs.len() {
                tracing::warn!(position = session.position, len = legs.len(), "refusing to delete leg");
                return None;
            }
            legs.remove(session.position);
        } else if session.is_edit {
            let slot = legs.get_mut(session.position)?;
            *slot = session.leg.clone();
        } else {
            let index = session.insertion_index().min(legs.len());
            legs.insert(index, session.leg.clone());
        }

        roll_timetable(&mut journey, now);

        Some(JourneySubmission {
            kind: session.journey,
            journey,
            revision: self.revision,
        })
    }

    /// Stores a journey returned by the validation service. Returns false when
    /// the result belongs to an older revision.
    pub fn apply_validated(&mut self, revision: u64, kind: JourneyKind, journey: Journey) -> bool {
        if !self.is_current(revision) {
            tracing::info!(revision, current = self.revision, "discarding stale validation result");
            return false;
        }
        let Some(round_trip) = self.round_trip.as_mut() else {
            return false;
        };
        round_trip.set_journey(kind, journey);
        self.session = None;
        true
    }

    pub fn clear_return_journey(&mut self) -> bool {
        let Some(round_trip) = self.round_trip.as_mut() else {
            return false;
        };
        round_trip.return_journey = None;
        true
    }

    pub fn create_return_journey(&mut self) -> bool {
        let Some(round_trip) = self.round_trip.as_mut() else {
            return false;
        };
        round_trip.create_return_journey();
        true
    }

    /// Whole round trip with both timetables rolled forward.
    #[must_use]
    pub fn prepare_save(&self, now: NaiveDateTime) -> Option<RoundTripSubmission> {
        let mut round_trip = self.round_trip.clone()?;
        roll_timetable(&mut round_trip.outward_journey, now);
        if let Some(ret) = round_trip.return_journey.as_mut() {
            roll_timetable(ret, now);
        }
        round_trip.usual_transportation_type = None;

        Some(RoundTripSubmission {
            round_trip,
            revision: self.revision,
        })
    }

    pub fn apply_saved(&mut self, revision: u64, round_trip: RoundTrip) -> bool {
        if !self.is_current(revision) {
            tracing::info!(revision, current = self.revision, "discarding stale save result");
            return false;
        }
        self.round_trip = Some(round_trip);
        self.session = None;
        true
    }
}

fn roll_timetable(journey: &mut Journey, now: NaiveDateTime) {
    match timetable::roll_forward(&journey.timetable, now) {
        Ok(next) => journey.timetable = next,
        Err(e) => tracing::warn!(error = %e, "keeping timetable as is"),
    }
}
