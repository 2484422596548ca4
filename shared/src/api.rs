//! Repository endpoints for the eco profile and the usual round trip.
//!
//! Requests are executed by the shell through the HTTP capability. Every
//! response is reduced to `Result<T, NetworkError>` before it re-enters the
//! core, so events stay serializable and the app never sees transport types.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::model::{JourneyKind, UserId};
use crate::NetworkError;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    EcoProfile(UserId),
    UsualRoundTrip(UserId),
    UpdateUsualRoundTrip,
    ValidateUsualJourney,
}

impl Endpoint {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::EcoProfile(user_id) => format!("users/{user_id}/eco-profile"),
            Self::UsualRoundTrip(user_id) => format!("users/{user_id}/usual-round-trip"),
            Self::UpdateUsualRoundTrip => "usual-round-trip".to_owned(),
            Self::ValidateUsualJourney => "usual-journey/validate".to_owned(),
        }
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::EcoProfile(_) | Self::UsualRoundTrip(_) => Method::Get,
            Self::UpdateUsualRoundTrip => Method::Put,
            Self::ValidateUsualJourney => Method::Post,
        }
    }

    pub fn url(&self, config: &ApiConfig) -> Result<Url, NetworkError> {
        config
            .endpoint(&self.path())
            .map_err(|e| NetworkError::Request(e.to_string()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    FetchEcoProfile,
    FetchRoundTrip,
    ValidateJourney(JourneyKind),
    UpdateRoundTrip,
}

impl RequestKind {
    /// Requests whose result lands in the trip editor.
    #[must_use]
    pub const fn is_trip(self) -> bool {
        !matches!(self, Self::FetchEcoProfile)
    }

    /// Requests that submit a trip change.
    #[must_use]
    pub const fn is_trip_mutation(self) -> bool {
        matches!(self, Self::ValidateJourney(_) | Self::UpdateRoundTrip)
    }
}

/// Attached to an outstanding request; `revision` is the trip editor
/// revision the request was issued against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTicket {
    pub id: RequestId,
    pub kind: RequestKind,
    pub revision: u64,
}

impl RequestTicket {
    #[must_use]
    pub fn new(kind: RequestKind, revision: u64) -> Self {
        Self {
            id: RequestId::generate(),
            kind,
            revision,
        }
    }
}

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, NetworkError> {
    serde_json::to_vec(value).map_err(|e| NetworkError::Request(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(
    result: crux_http::Result<crux_http::Response<Vec<u8>>>,
) -> Result<T, NetworkError> {
    let mut response = result.map_err(|e| NetworkError::Connection(e.to_string()))?;
    let status = u16::from(response.status());
    let body = response.take_body().unwrap_or_default();
    decode_body(status, &body)
}

pub fn decode_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, NetworkError> {
    if !(200..300).contains(&status) {
        return Err(NetworkError::from_status(status, Some(body)));
    }
    serde_json::from_slice(body).map_err(|e| NetworkError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Journey, RoundTrip};

    #[test]
    fn endpoints_resolve_against_base() {
        let config = ApiConfig::new("https://api.example.org/v1/").unwrap();
        let user = UserId(42);
        assert_eq!(
            Endpoint::UsualRoundTrip(user.clone()).url(&config).unwrap().as_str(),
            "https://api.example.org/v1/users/42/usual-round-trip"
        );
        assert_eq!(
            Endpoint::EcoProfile(user).url(&config).unwrap().as_str(),
            "https://api.example.org/v1/users/42/eco-profile"
        );
        assert_eq!(
            Endpoint::ValidateUsualJourney.url(&config).unwrap().as_str(),
            "https://api.example.org/v1/usual-journey/validate"
        );
        assert_eq!(Endpoint::UpdateUsualRoundTrip.method(), Method::Put);
    }

    #[test]
    fn decode_success_body() {
        let journey = Journey::new(Vec::new(), "2026-10-19T08:00:00");
        let body = encode(&journey).unwrap();
        let decoded: Journey = decode_body(200, &body).unwrap();
        assert_eq!(decoded, journey);
    }

    #[test]
    fn decode_error_status_uses_server_message() {
        let body = br#"{"message":"timetables overlap"}"#;
        let err = decode_body::<RoundTrip>(409, body).unwrap_err();
        assert_eq!(
            err,
            NetworkError::Status {
                status: 409,
                message: Some("timetables overlap".into())
            }
        );
    }

    #[test]
    fn decode_malformed_body() {
        let err = decode_body::<RoundTrip>(200, b"<html>").unwrap_err();
        assert!(matches!(err, NetworkError::Decode(_)));
    }

    #[test]
    fn trip_kinds() {
        assert!(!RequestKind::FetchEcoProfile.is_trip());
        assert!(RequestKind::FetchRoundTrip.is_trip());
        assert!(!RequestKind::FetchRoundTrip.is_trip_mutation());
        assert!(RequestKind::ValidateJourney(JourneyKind::Return).is_trip_mutation());
        assert!(RequestKind::UpdateRoundTrip.is_trip_mutation());
    }
}
