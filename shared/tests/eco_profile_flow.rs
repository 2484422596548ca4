mod common;

use assert_matches::assert_matches;
use common::{http_requests, renders, signals, tester, USER};
use crux_core::testing::AppTester;
use eco_profile_shared::api::{RequestKind, RequestTicket};
use eco_profile_shared::model::{Benchmark, EcoProfileData, PerformancePeriod, UserId};
use eco_profile_shared::{App, Effect, Event, Model, NavigationSignal, NetworkError};

fn profile() -> EcoProfileData {
    EcoProfileData {
        co2_saving_benchmark: Some(Benchmark {
            value: 850.0,
            percentage: 42.0,
        }),
        money_saving_benchmark: Some(Benchmark {
            value: 3.75,
            percentage: 10.0,
        }),
        fitness_benchmark: Some(Benchmark {
            value: 0.5,
            percentage: 77.5,
        }),
    }
}

fn open(app: &AppTester<App, Effect>, model: &mut Model) {
    app.update(
        Event::EcoProfileOpened {
            user_id: UserId(USER),
        },
        model,
    );
}

fn profile_ticket(model: &Model) -> RequestTicket {
    *model
        .in_flight
        .iter()
        .find(|t| t.kind == RequestKind::FetchEcoProfile)
        .expect("eco profile fetch should be in flight")
}

#[test]
fn opening_fetches_the_eco_profile() {
    let app = tester();
    let mut model = Model::default();

    let update = app.update(
        Event::EcoProfileOpened {
            user_id: UserId(USER),
        },
        &mut model,
    );
    assert!(renders(&update.effects));

    let requests = http_requests(&update.effects);
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "https://api.mobility.example/v1/users/7/eco-profile");

    let request_id = request
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("x-request-id"))
        .map(|h| h.value.clone())
        .expect("request id header");
    assert_eq!(request_id, profile_ticket(&model).id.to_string());
    assert!(request
        .headers
        .iter()
        .any(|h| h.name.eq_ignore_ascii_case("accept") && h.value == "application/json"));

    assert!(app.view(&model).is_progress);
}

#[test]
fn fetched_profile_fills_benchmarks() {
    let app = tester();
    let mut model = Model::default();
    open(&app, &mut model);

    let update = app.update(
        Event::EcoProfileFetched {
            ticket: profile_ticket(&model),
            result: Box::new(Ok(profile())),
        },
        &mut model,
    );
    assert!(renders(&update.effects));
    assert!(signals(&update.effects).is_empty());

    let view = app.view(&model);
    assert!(!view.is_progress);
    assert_eq!(view.performance_period, PerformancePeriod::Today);
    assert_eq!(view.performance_period_name, "Today");
    assert_eq!(view.ecology_progress, 42.0);
    assert_eq!(view.fitness_progress, 77.5);
    assert_eq!(view.ecology_value.as_deref(), Some("850 g CO₂"));
    assert_eq!(view.savings_value.as_deref(), Some("3 €"));
    assert_eq!(view.fitness_value.as_deref(), Some("30m"));

    app.update(Event::PerformancePeriodSelected(PerformancePeriod::Month), &mut model);
    let view = app.view(&model);
    assert_eq!(view.performance_period_name, "This month");
    assert_eq!(view.ecology_value.as_deref(), Some("17.0 kg CO₂"));
    assert_eq!(view.savings_value.as_deref(), Some("75 €"));
    assert_eq!(view.fitness_value.as_deref(), Some("10h"));
    assert_eq!(view.ecology_progress, 42.0, "progress does not scale");
}

#[test]
fn missing_benchmarks_show_nothing() {
    let app = tester();
    let mut model = Model::default();
    open(&app, &mut model);

    app.update(
        Event::EcoProfileFetched {
            ticket: profile_ticket(&model),
            result: Box::new(Ok(EcoProfileData::default())),
        },
        &mut model,
    );
    let view = app.view(&model);
    assert_eq!(view.ecology_value, None);
    assert_eq!(view.savings_progress, 0.0);
}

#[test]
fn failed_fetch_navigates_to_error() {
    let app = tester();
    let mut model = Model::default();
    open(&app, &mut model);

    let update = app.update(
        Event::EcoProfileFetched {
            ticket: profile_ticket(&model),
            result: Box::new(Err(NetworkError::Status {
                status: 503,
                message: None,
            })),
        },
        &mut model,
    );

    assert_matches!(
        signals(&update.effects).as_slice(),
        [NavigationSignal::Error { cause: NetworkError::Status { status: 503, .. }, message }]
            if !message.is_empty()
    );
    assert!(!app.view(&model).is_progress);
}

#[test]
fn period_picker_receives_current_period() {
    let app = tester();
    let mut model = Model::default();
    app.update(Event::PerformancePeriodSelected(PerformancePeriod::Year), &mut model);

    let update = app.update(Event::SelectPerformancePeriodClicked, &mut model);
    assert_eq!(
        signals(&update.effects),
        vec![NavigationSignal::SelectPerformancePeriod {
            period: PerformancePeriod::Year
        }]
    );
}

#[test]
fn navigation_buttons_emit_signals() {
    let app = tester();
    let mut model = Model::default();

    let update = app.update(Event::EditTripClicked, &mut model);
    assert_eq!(signals(&update.effects), vec![NavigationSignal::EditTripData]);

    let update = app.update(Event::BackClicked, &mut model);
    assert_eq!(signals(&update.effects), vec![NavigationSignal::Back]);
}

#[test]
fn configure_changes_base_url() {
    let app = tester();
    let mut model = Model::default();

    app.update(
        Event::Configure {
            base_url: "https://staging.mobility.example/api".into(),
            user_agent: Some("eco-profile-tests/1.0".into()),
        },
        &mut model,
    );
    let update = app.update(
        Event::EcoProfileOpened {
            user_id: UserId(USER),
        },
        &mut model,
    );

    let request = &http_requests(&update.effects)[0];
    assert_eq!(request.url, "https://staging.mobility.example/api/users/7/eco-profile");
    assert!(request
        .headers
        .iter()
        .any(|h| h.name.eq_ignore_ascii_case("user-agent") && h.value == "eco-profile-tests/1.0"));
}

#[test]
fn invalid_configuration_is_ignored() {
    let app = tester();
    let mut model = Model::default();

    app.update(
        Event::Configure {
            base_url: "ftp://nope".into(),
            user_agent: None,
        },
        &mut model,
    );
    assert_eq!(model.config.base_url(), "https://api.mobility.example/v1/");
}

#[test]
fn finished_request_response_is_ignored() {
    let app = tester();
    let mut model = Model::default();
    open(&app, &mut model);
    let first = profile_ticket(&model);
    model.finish_request(&first);

    let update = app.update(
        Event::EcoProfileFetched {
            ticket: first,
            result: Box::new(Ok(profile())),
        },
        &mut model,
    );
    assert!(update.effects.is_empty());
    assert_eq!(model.eco_profile, None);
}

#[test]
fn previous_user_profile_is_dropped_on_user_switch() {
    let app = tester();
    let mut model = Model::default();

    app.update(
        Event::EcoProfileOpened {
            user_id: UserId(1),
        },
        &mut model,
    );
    let first = profile_ticket(&model);

    app.update(
        Event::EcoProfileOpened {
            user_id: UserId(2),
        },
        &mut model,
    );
    let second = profile_ticket(&model);
    assert_ne!(first.id, second.id);
    assert_eq!(model.in_flight.len(), 1);

    let mut current = profile();
    current.co2_saving_benchmark = Some(Benchmark {
        value: 2.0,
        percentage: 20.0,
    });
    app.update(
        Event::EcoProfileFetched {
            ticket: second,
            result: Box::new(Ok(current.clone())),
        },
        &mut model,
    );

    let mut stale = profile();
    stale.co2_saving_benchmark = Some(Benchmark {
        value: 1.0,
        percentage: 10.0,
    });
    let update = app.update(
        Event::EcoProfileFetched {
            ticket: first,
            result: Box::new(Ok(stale)),
        },
        &mut model,
    );

    assert!(update.effects.is_empty());
    assert_eq!(model.eco_profile, Some(current));
    assert_eq!(app.view(&model).ecology_value.as_deref(), Some("2 g CO₂"));
}
