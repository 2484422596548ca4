use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{RequestKind, RequestTicket};
use crate::config::ApiConfig;
use crate::trip_editor::TripEditor;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Address handed over by the shell's address picker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressLocal {
    pub full_address: Option<String>,
    pub coordinate: Option<Coordinate>,
}

impl AddressLocal {
    pub fn new(full_address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            full_address: Some(full_address.into()),
            coordinate: Some(coordinate),
        }
    }
}

/// Transport modes usable in a usual trip. The discriminant is the server code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    Walk = 1,
    Bicycle = 2,
    EBike = 3,
    Scooter = 4,
    Motorbike = 5,
    Car = 6,
    Carpool = 7,
    Bus = 8,
    Tram = 9,
    Metro = 10,
    Train = 11,
}

impl TransportType {
    pub const USUAL_TRIP: [TransportType; 11] = [
        Self::Walk,
        Self::Bicycle,
        Self::EBike,
        Self::Scooter,
        Self::Motorbike,
        Self::Car,
        Self::Carpool,
        Self::Bus,
        Self::Tram,
        Self::Metro,
        Self::Train,
    ];

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::USUAL_TRIP.into_iter().find(|t| t.code() == code)
    }

    #[must_use]
    pub const fn description_key(self) -> &'static str {
        match self {
            Self::Walk => "transport_walk",
            Self::Bicycle => "transport_bicycle",
            Self::EBike => "transport_e_bike",
            Self::Scooter => "transport_scooter",
            Self::Motorbike => "transport_motorbike",
            Self::Car => "transport_car",
            Self::Carpool => "transport_carpool",
            Self::Bus => "transport_bus",
            Self::Tram => "transport_tram",
            Self::Metro => "transport_metro",
            Self::Train => "transport_train",
        }
    }
}

/// One origin to destination segment of a journey.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    #[serde(default)]
    pub start_location: String,
    #[serde(default)]
    pub end_location: String,
    #[serde(default)]
    pub start_latitude: f64,
    #[serde(default)]
    pub start_longitude: f64,
    #[serde(default)]
    pub end_latitude: f64,
    #[serde(default)]
    pub end_longitude: f64,
    #[serde(default)]
    pub distance: f64,
    pub travel_mode_code: i32,
    #[serde(default)]
    pub travel_mode_description: String,
}

impl Leg {
    #[must_use]
    pub fn travel_mode(&self) -> Option<TransportType> {
        TransportType::from_code(self.travel_mode_code)
    }

    #[must_use]
    pub fn start(&self) -> AddressLocal {
        AddressLocal::new(
            self.start_location.clone(),
            Coordinate::new(self.start_latitude, self.start_longitude),
        )
    }

    #[must_use]
    pub fn end(&self) -> AddressLocal {
        AddressLocal::new(
            self.end_location.clone(),
            Coordinate::new(self.end_latitude, self.end_longitude),
        )
    }

    /// Missing text becomes empty and missing coordinates become 0.0.
    pub fn set_start(&mut self, address: &AddressLocal) {
        let coordinate = address.coordinate.unwrap_or_default();
        self.start_location = address.full_address.clone().unwrap_or_default();
        self.start_latitude = coordinate.latitude;
        self.start_longitude = coordinate.longitude;
    }

    pub fn set_end(&mut self, address: &AddressLocal) {
        let coordinate = address.coordinate.unwrap_or_default();
        self.end_location = address.full_address.clone().unwrap_or_default();
        self.end_latitude = coordinate.latitude;
        self.end_longitude = coordinate.longitude;
    }

    /// Same leg travelled the other way round.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start_location: self.end_location.clone(),
            end_location: self.start_location.clone(),
            start_latitude: self.end_latitude,
            start_longitude: self.end_longitude,
            end_latitude: self.start_latitude,
            end_longitude: self.start_longitude,
            distance: self.distance,
            travel_mode_code: self.travel_mode_code,
            travel_mode_description: self.travel_mode_description.clone(),
        }
    }
}

/// Ordered legs travelled at a given timetable. Leg order is travel order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    #[serde(default)]
    pub journey_leg_list: Vec<Leg>,
    #[serde(default)]
    pub timetable: String,
}

impl Journey {
    pub fn new(legs: Vec<Leg>, timetable: impl Into<String>) -> Self {
        Self {
            journey_leg_list: legs,
            timetable: timetable.into(),
        }
    }

    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.journey_leg_list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.journey_leg_list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.journey_leg_list.is_empty()
    }

    /// Legs in reverse order, each travelled backwards. Keeps the timetable.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            journey_leg_list: self.journey_leg_list.iter().rev().map(Leg::reversed).collect(),
            timetable: self.timetable.clone(),
        }
    }

    #[must_use]
    pub fn mirrors(&self, other: &Journey) -> bool {
        self.len() == other.len()
            && self
                .journey_leg_list
                .iter()
                .zip(other.journey_leg_list.iter().rev())
                .all(|(leg, other_leg)| *leg == other_leg.reversed())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JourneyKind {
    Outward,
    Return,
}

impl JourneyKind {
    #[must_use]
    pub const fn from_outward(is_outward: bool) -> Self {
        if is_outward {
            Self::Outward
        } else {
            Self::Return
        }
    }
}

/// The user's usual commute: an outward journey and an optional return.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTrip {
    pub outward_journey: Journey,
    #[serde(default)]
    pub return_journey: Option<Journey>,
    /// Set by the server when saving changed the user's primary transport mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usual_transportation_type: Option<i32>,
}

impl RoundTrip {
    /// No return journey counts as the same journey.
    #[must_use]
    pub fn is_journey_same(&self) -> bool {
        self.return_journey
            .as_ref()
            .map_or(true, |ret| ret.mirrors(&self.outward_journey))
    }

    pub fn create_return_journey(&mut self) {
        if self.return_journey.is_none() {
            self.return_journey = Some(self.outward_journey.mirrored());
        }
    }

    #[must_use]
    pub fn journey(&self, kind: JourneyKind) -> Option<&Journey> {
        match kind {
            JourneyKind::Outward => Some(&self.outward_journey),
            JourneyKind::Return => self.return_journey.as_ref(),
        }
    }

    pub fn set_journey(&mut self, kind: JourneyKind, journey: Journey) {
        match kind {
            JourneyKind::Outward => self.outward_journey = journey,
            JourneyKind::Return => self.return_journey = Some(journey),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub value: f64,
    pub percentage: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoProfileData {
    #[serde(default)]
    pub co2_saving_benchmark: Option<Benchmark>,
    #[serde(default)]
    pub money_saving_benchmark: Option<Benchmark>,
    #[serde(default)]
    pub fitness_benchmark: Option<Benchmark>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformancePeriod {
    #[default]
    Today,
    Month,
    Year,
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: ApiConfig,
    pub user_id: Option<UserId>,

    // Benchmarks
    pub eco_profile: Option<EcoProfileData>,
    pub performance_period: PerformancePeriod,

    // Usual round trip
    pub trip: TripEditor,

    /// Outstanding repository requests; the progress indicator is on while
    /// this is non-empty.
    pub in_flight: Vec<RequestTicket>,
}

impl Model {
    #[must_use]
    pub fn is_progress(&self) -> bool {
        !self.in_flight.is_empty()
    }

    #[must_use]
    pub fn trip_mutation_in_flight(&self) -> bool {
        self.in_flight.iter().any(|t| t.kind.is_trip_mutation())
    }

    pub fn begin_request(&mut self, kind: RequestKind) -> RequestTicket {
        let ticket = RequestTicket::new(kind, self.trip.revision());
        self.in_flight.push(ticket);
        ticket
    }

    /// Returns false when the request was no longer outstanding.
    pub fn finish_request(&mut self, ticket: &RequestTicket) -> bool {
        let before = self.in_flight.len();
        self.in_flight.retain(|t| t.id != ticket.id);
        self.in_flight.len() != before
    }

    /// Forgets every outstanding request, eco profile fetches included.
    pub fn discard_requests(&mut self) {
        self.in_flight.clear();
    }

    /// Forgets every outstanding trip request; their results will be ignored.
    pub fn discard_trip_requests(&mut self) {
        self.in_flight.retain(|t| !t.kind.is_trip());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(from: &str, to: &str, mode: TransportType) -> Leg {
        Leg {
            start_location: from.into(),
            end_location: to.into(),
            start_latitude: 1.0,
            start_longitude: 2.0,
            end_latitude: 3.0,
            end_longitude: 4.0,
            distance: 1200.0,
            travel_mode_code: mode.code(),
            travel_mode_description: mode.description_key().into(),
        }
    }

    #[test]
    fn transport_codes_roundtrip() {
        for t in TransportType::USUAL_TRIP {
            assert_eq!(TransportType::from_code(t.code()), Some(t));
        }
        assert_eq!(TransportType::from_code(0), None);
        assert_eq!(TransportType::from_code(99), None);
    }

    #[test]
    fn set_start_defaults_missing_values() {
        let mut l = leg("Home", "Station", TransportType::Walk);
        l.set_start(&AddressLocal::default());
        assert_eq!(l.start_location, "");
        assert_eq!(l.start_latitude, 0.0);
        assert_eq!(l.start_longitude, 0.0);
        assert_eq!(l.end_location, "Station");
    }

    #[test]
    fn mirrored_journey_reverses_legs_and_endpoints() {
        let outward = Journey::new(
            vec![
                leg("Home", "Station", TransportType::Walk),
                leg("Station", "Office", TransportType::Train),
            ],
            "2026-10-19T08:00:00",
        );
        let ret = outward.mirrored();
        assert_eq!(ret.legs()[0].start_location, "Office");
        assert_eq!(ret.legs()[0].end_location, "Station");
        assert_eq!(ret.legs()[0].travel_mode(), Some(TransportType::Train));
        assert_eq!(ret.legs()[1].end_location, "Home");
        assert!(ret.mirrors(&outward));
        assert!(!outward.mirrors(&outward));
    }

    #[test]
    fn journey_same_without_return() {
        let trip = RoundTrip {
            outward_journey: Journey::new(vec![leg("A", "B", TransportType::Bus)], ""),
            ..RoundTrip::default()
        };
        assert!(trip.is_journey_same());
    }

    #[test]
    fn journey_differs_when_return_mode_changes() {
        let mut trip = RoundTrip {
            outward_journey: Journey::new(vec![leg("A", "B", TransportType::Bus)], ""),
            ..RoundTrip::default()
        };
        trip.create_return_journey();
        assert!(trip.is_journey_same());

        if let Some(ret) = trip.return_journey.as_mut() {
            ret.journey_leg_list[0].travel_mode_code = TransportType::Car.code();
        }
        assert!(!trip.is_journey_same());
    }

    #[test]
    fn progress_follows_outstanding_requests() {
        let mut model = Model::default();
        assert!(!model.is_progress());

        let profile = model.begin_request(RequestKind::FetchEcoProfile);
        let validate = model.begin_request(RequestKind::ValidateJourney(JourneyKind::Outward));
        assert!(model.is_progress());
        assert!(model.trip_mutation_in_flight());

        model.discard_trip_requests();
        assert!(!model.trip_mutation_in_flight());
        assert!(!model.finish_request(&validate));
        assert!(model.finish_request(&profile));
        assert!(!model.is_progress());
    }

    #[test]
    fn discard_requests_drops_profile_fetches() {
        let mut model = Model::default();
        let profile = model.begin_request(RequestKind::FetchEcoProfile);
        model.begin_request(RequestKind::FetchRoundTrip);

        model.discard_trip_requests();
        assert!(model.is_progress());

        model.discard_requests();
        assert!(!model.is_progress());
        assert!(!model.finish_request(&profile));
    }

    #[test]
    fn round_trip_parses_server_json() {
        let json = r#"{
            "outwardJourney": {
                "journeyLegList": [{
                    "startLocation": "Home",
                    "endLocation": "Office",
                    "startLatitude": 45.1,
                    "startLongitude": 7.6,
                    "endLatitude": 45.2,
                    "endLongitude": 7.7,
                    "distance": 5400.0,
                    "travelModeCode": 8,
                    "travelModeDescription": "Bus"
                }],
                "timetable": "2026-10-19T08:15:00"
            },
            "returnJourney": null
        }"#;
        let trip: RoundTrip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.outward_journey.len(), 1);
        assert_eq!(trip.outward_journey.legs()[0].travel_mode(), Some(TransportType::Bus));
        assert!(trip.return_journey.is_none());
        assert!(trip.usual_transportation_type.is_none());
    }
}
