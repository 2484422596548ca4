// lib.rs - Eco profile shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod api;
pub mod app;
pub mod benchmarks;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod model;
pub mod navigation;
pub mod timetable;
pub mod trip_editor;
pub mod view;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::Model;
pub use navigation::NavigationSignal;
pub use view::ViewModel;

/// Any failure of a repository call. Never retried automatically.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetworkError {
    #[error("request could not be built: {0}")]
    Request(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl NetworkError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Request(_) => "REQUEST_ERROR",
            Self::Connection(_) => "NETWORK_ERROR",
            Self::Status { status, .. } if *status >= 500 => "SERVER_ERROR",
            Self::Status { .. } => "CLIENT_ERROR",
            Self::Decode(_) => "DESERIALIZATION_ERROR",
        }
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self {
            Self::Connection(_) => {
                "Unable to connect. Please check your internet connection and try again.".into()
            }
            Self::Status { status: 408, .. } => "The request timed out. Please try again.".into(),
            _ => "Something went wrong. Please try again later.".into(),
        }
    }

    #[must_use]
    pub fn from_status(status: u16, body: Option<&[u8]>) -> Self {
        let message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorResponse>(b).ok())
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty());

        Self::Status { status, message }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
}
