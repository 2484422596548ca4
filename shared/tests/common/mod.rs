#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_http::protocol::HttpRequest;
use eco_profile_shared::model::{Journey, Leg, RoundTrip, TransportType, UserId};
use eco_profile_shared::{App, Effect, Event, Model, NavigationSignal};

pub const USER: i64 = 7;

pub fn tester() -> AppTester<App, Effect> {
    AppTester::default()
}

pub fn leg(from: &str, to: &str, mode: TransportType) -> Leg {
    Leg {
        start_location: from.into(),
        end_location: to.into(),
        start_latitude: 45.0,
        start_longitude: 7.0,
        end_latitude: 45.1,
        end_longitude: 7.1,
        distance: 2500.0,
        travel_mode_code: mode.code(),
        travel_mode_description: mode.description_key().into(),
    }
}

pub fn commute() -> RoundTrip {
    RoundTrip {
        outward_journey: Journey::new(
            vec![
                leg("Home", "Bus stop", TransportType::Walk),
                leg("Bus stop", "Station", TransportType::Bus),
                leg("Station", "Office", TransportType::Train),
            ],
            "2026-01-05T08:00:00",
        ),
        return_journey: None,
        usual_transportation_type: None,
    }
}

pub fn signals(effects: &[Effect]) -> Vec<NavigationSignal> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Navigator(request) => Some(request.operation.clone()),
            _ => None,
        })
        .collect()
}

pub fn http_requests(effects: &[Effect]) -> Vec<HttpRequest> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some(request.operation.clone()),
            _ => None,
        })
        .collect()
}

pub fn renders(effects: &[Effect]) -> bool {
    effects.iter().any(|effect| matches!(effect, Effect::Render(_)))
}

/// Opens the edit trip screen and answers the fetch with `round_trip`.
pub fn open_trip(app: &AppTester<App, Effect>, model: &mut Model, round_trip: RoundTrip) {
    app.update(
        Event::EcoProfileOpened {
            user_id: UserId(USER),
        },
        model,
    );
    app.update(Event::EditTripOpened, model);

    let ticket = *model
        .in_flight
        .iter()
        .find(|t| t.kind.is_trip())
        .expect("round trip fetch should be in flight");
    app.update(
        Event::RoundTripFetched {
            ticket,
            result: Box::new(Ok(round_trip)),
        },
        model,
    );

    // Drop the eco profile fetch so only trip requests remain.
    model.in_flight.clear();
}
