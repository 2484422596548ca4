use chrono::{Local, NaiveDateTime};

use crate::api::{self, Endpoint, Method, RequestKind, RequestTicket};
use crate::capabilities::Capabilities;
use crate::config::ApiConfig;
use crate::event::Event;
use crate::model::Model;
use crate::navigation::{ChangeTransportMode, NavigationSignal};
use crate::view::ViewModel;

#[derive(Default)]
pub struct App;

impl App {
    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn navigate_to_error(caps: &Capabilities, error: crate::NetworkError) {
        tracing::warn!(code = error.code(), %error, "request failed");
        caps.navigator.navigate(NavigationSignal::error(error));
    }

    fn send<F>(
        model: &mut Model,
        caps: &Capabilities,
        kind: RequestKind,
        endpoint: &Endpoint,
        body: Option<Vec<u8>>,
        make_event: F,
    ) where
        F: FnOnce(RequestTicket, crux_http::Result<crux_http::Response<Vec<u8>>>) -> Event
            + Send
            + 'static,
    {
        let url = match endpoint.url(&model.config) {
            Ok(url) => url,
            Err(e) => {
                Self::navigate_to_error(caps, e);
                return;
            }
        };

        let ticket = model.begin_request(kind);
        tracing::info!(request_id = %ticket.id, ?kind, %url, "sending request");

        let request_id = ticket.id.to_string();
        let mut builder = match endpoint.method() {
            Method::Get => caps.http.get(url.as_str()),
            Method::Post => caps.http.post(url.as_str()),
            Method::Put => caps.http.put(url.as_str()),
        }
        .header("Accept", api::JSON_CONTENT_TYPE)
        .header("User-Agent", model.config.user_agent.as_str())
        .header(api::REQUEST_ID_HEADER, request_id.as_str());

        if let Some(body) = body {
            builder = builder
                .body(body)
                .header("Content-Type", api::JSON_CONTENT_TYPE);
        }

        builder.send(move |result| make_event(ticket, result));
    }

    fn fetch_eco_profile(model: &mut Model, caps: &Capabilities) {
        let Some(user_id) = model.user_id.clone() else {
            tracing::warn!("no user, skipping eco profile fetch");
            return;
        };
        Self::send(
            model,
            caps,
            RequestKind::FetchEcoProfile,
            &Endpoint::EcoProfile(user_id),
            None,
            |ticket, result| Event::EcoProfileFetched {
                ticket,
                result: Box::new(api::decode(result)),
            },
        );
    }

    fn fetch_round_trip(model: &mut Model, caps: &Capabilities) {
        let Some(user_id) = model.user_id.clone() else {
            tracing::warn!("no user, skipping round trip fetch");
            return;
        };
        if model
            .in_flight
            .iter()
            .any(|t| t.kind == RequestKind::FetchRoundTrip)
        {
            return;
        }
        Self::send(
            model,
            caps,
            RequestKind::FetchRoundTrip,
            &Endpoint::UsualRoundTrip(user_id),
            None,
            |ticket, result| Event::RoundTripFetched {
                ticket,
                result: Box::new(api::decode(result)),
            },
        );
    }

    /// Only one trip change may be in flight at a time; later ones are dropped.
    fn reject_concurrent_change(model: &Model, what: &str) -> bool {
        if model.trip_mutation_in_flight() {
            tracing::warn!(what, "trip change already in flight, ignoring");
            return true;
        }
        false
    }

    fn commit_leg(model: &mut Model, caps: &Capabilities, is_save: bool) {
        if Self::reject_concurrent_change(model, "commit_leg") {
            return;
        }
        let Some(submission) = model.trip.commit_leg(is_save, Self::now()) else {
            tracing::debug!(is_save, "nothing to commit");
            return;
        };
        let body = match api::encode(&submission.journey) {
            Ok(body) => body,
            Err(e) => {
                Self::navigate_to_error(caps, e);
                return;
            }
        };

        let kind = submission.kind;
        tracing::info!(?kind, is_save, legs = submission.journey.len(), "validating journey");
        Self::send(
            model,
            caps,
            RequestKind::ValidateJourney(kind),
            &Endpoint::ValidateUsualJourney,
            Some(body),
            move |ticket, result| Event::JourneyValidated {
                ticket,
                kind,
                result: Box::new(api::decode(result)),
            },
        );
        caps.render.render();
    }

    fn save_round_trip(model: &mut Model, caps: &Capabilities) {
        if Self::reject_concurrent_change(model, "save_round_trip") {
            return;
        }
        let Some(submission) = model.trip.prepare_save(Self::now()) else {
            tracing::debug!("no round trip to save");
            return;
        };
        let body = match api::encode(&submission.round_trip) {
            Ok(body) => body,
            Err(e) => {
                Self::navigate_to_error(caps, e);
                return;
            }
        };

        Self::send(
            model,
            caps,
            RequestKind::UpdateRoundTrip,
            &Endpoint::UpdateUsualRoundTrip,
            Some(body),
            |ticket, result| Event::RoundTripUpdated {
                ticket,
                result: Box::new(api::decode(result)),
            },
        );
        caps.render.render();
    }

    fn choose_address(model: &Model, caps: &Capabilities, is_start: bool) {
        let Some(session) = model.trip.session() else {
            return;
        };
        let (allowed, current) = if is_start {
            (session.can_edit_start, session.leg.start())
        } else {
            (session.can_edit_end, session.leg.end())
        };
        if !allowed {
            tracing::debug!(is_start, "address is locked for this leg");
            return;
        }
        caps.navigator.navigate(NavigationSignal::ChooseAddress {
            current: Some(current),
            is_start,
        });
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        tracing::debug!(
            event = event.name(),
            user_initiated = event.is_user_initiated(),
            "update"
        );

        match event {
            Event::Configure {
                base_url,
                user_agent,
            } => match ApiConfig::new(base_url) {
                Ok(mut config) => {
                    if let Some(user_agent) = user_agent {
                        config = config.with_user_agent(user_agent);
                    }
                    tracing::info!(base_url = config.base_url(), "api configured");
                    model.config = config;
                }
                Err(e) => tracing::error!(error = %e, "keeping previous api config"),
            },

            Event::EcoProfileOpened { user_id } => {
                if model.user_id.as_ref() != Some(&user_id) {
                    tracing::info!(%user_id, "user changed, dropping previous user's state");
                    model.trip.invalidate();
                    model.discard_requests();
                    model.eco_profile = None;
                }
                model.user_id = Some(user_id);
                Self::fetch_eco_profile(model, caps);
                caps.render.render();
            }

            Event::SelectPerformancePeriodClicked => {
                caps.navigator.navigate(NavigationSignal::SelectPerformancePeriod {
                    period: model.performance_period,
                });
            }

            Event::PerformancePeriodSelected(period) => {
                model.performance_period = period;
                caps.render.render();
            }

            Event::EditTripClicked => caps.navigator.navigate(NavigationSignal::EditTripData),

            Event::BackClicked => caps.navigator.navigate(NavigationSignal::Back),

            Event::EditTripOpened => {
                if model.trip.needs_reload() {
                    Self::fetch_round_trip(model, caps);
                }
                caps.render.render();
            }

            Event::EditTripClosed => {
                model.trip.invalidate();
                model.discard_trip_requests();
                caps.render.render();
            }

            Event::ReturnJourneyCleared => {
                if model.trip.clear_return_journey() {
                    caps.render.render();
                }
            }

            Event::ReturnJourneyCreated => {
                if model.trip.create_return_journey() {
                    caps.render.render();
                }
            }

            Event::SaveTripClicked => Self::save_round_trip(model, caps),

            Event::EditLegClicked {
                position,
                is_edit,
                is_outward,
                is_last_plus,
            } => {
                if Self::reject_concurrent_change(model, "begin_edit_leg") {
                    return;
                }
                if model
                    .trip
                    .begin_edit_leg(position, is_edit, is_outward, is_last_plus)
                {
                    caps.render.render();
                    caps.navigator.navigate(NavigationSignal::EditTripLegData);
                }
            }

            Event::EditLegCancelled => {
                model.trip.cancel_edit();
                caps.render.render();
            }

            Event::TransportModeSelected(transport) => {
                if model.trip.select_transport_mode(transport) {
                    caps.render.render();
                }
            }

            Event::ChooseStartAddressClicked => Self::choose_address(model, caps, true),
            Event::ChooseEndAddressClicked => Self::choose_address(model, caps, false),

            Event::StartAddressChosen(address) => {
                if model.trip.apply_start_address(&address) {
                    caps.render.render();
                }
            }

            Event::EndAddressChosen(address) => {
                if model.trip.apply_end_address(&address) {
                    caps.render.render();
                }
            }

            Event::SaveLegClicked => Self::commit_leg(model, caps, true),
            Event::DeleteLegClicked => Self::commit_leg(model, caps, false),

            Event::EcoProfileFetched { ticket, result } => {
                if !model.finish_request(&ticket) {
                    tracing::debug!(request_id = %ticket.id, "ignoring discarded response");
                    return;
                }
                match *result {
                    Ok(profile) => model.eco_profile = Some(profile),
                    Err(e) => Self::navigate_to_error(caps, e),
                }
                caps.render.render();
            }

            Event::RoundTripFetched { ticket, result } => {
                if !model.finish_request(&ticket) {
                    tracing::debug!(request_id = %ticket.id, "ignoring discarded response");
                    return;
                }
                if model.trip.is_current(ticket.revision) {
                    match *result {
                        Ok(round_trip) => model.trip.load(round_trip),
                        Err(e) => Self::navigate_to_error(caps, e),
                    }
                }
                caps.render.render();
            }

            Event::JourneyValidated {
                ticket,
                kind,
                result,
            } => {
                if !model.finish_request(&ticket) {
                    tracing::debug!(request_id = %ticket.id, "ignoring discarded response");
                    return;
                }
                if !model.trip.is_current(ticket.revision) {
                    caps.render.render();
                    return;
                }
                match *result {
                    Ok(journey) => {
                        model.trip.apply_validated(ticket.revision, kind, journey);
                        caps.render.render();
                        caps.navigator.navigate(NavigationSignal::Back);
                    }
                    Err(e) => {
                        caps.render.render();
                        Self::navigate_to_error(caps, e);
                    }
                }
            }

            Event::RoundTripUpdated { ticket, result } => {
                if !model.finish_request(&ticket) {
                    tracing::debug!(request_id = %ticket.id, "ignoring discarded response");
                    return;
                }
                if !model.trip.is_current(ticket.revision) {
                    caps.render.render();
                    return;
                }
                match *result {
                    Ok(round_trip) => {
                        let transport_changed = round_trip.usual_transportation_type.is_some();
                        model.trip.apply_saved(ticket.revision, round_trip);
                        caps.render.render();
                        if transport_changed {
                            caps.navigator.navigate(NavigationSignal::change_transport_mode(
                                ChangeTransportMode::PrimaryTransportChanged,
                            ));
                        } else {
                            caps.navigator.navigate(NavigationSignal::Back);
                        }
                    }
                    Err(e) => {
                        caps.render.render();
                        Self::navigate_to_error(caps, e);
                    }
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from(model)
    }
}
