use crux_core::capability::Operation;
use serde::{Deserialize, Serialize};

use crate::model::{AddressLocal, PerformancePeriod};
use crate::NetworkError;

/// Where the shell should go next. One signal per completed operation,
/// sent after the model has been updated for that operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationSignal {
    Back,
    SelectPerformancePeriod {
        period: PerformancePeriod,
    },
    EditTripData,
    /// `is_start` is true for the leg's start address, false for its end.
    ChooseAddress {
        current: Option<AddressLocal>,
        is_start: bool,
    },
    Error {
        cause: NetworkError,
        message: String,
    },
    EditTripLegData,
    ChangeTransportModeDialog {
        message_key: String,
    },
}

impl NavigationSignal {
    #[must_use]
    pub fn error(cause: NetworkError) -> Self {
        let message = cause.user_facing_message();
        Self::Error { cause, message }
    }

    #[must_use]
    pub fn change_transport_mode(reason: ChangeTransportMode) -> Self {
        Self::ChangeTransportModeDialog {
            message_key: reason.message_key().to_owned(),
        }
    }
}

impl Operation for NavigationSignal {
    type Output = ();
}

/// Reasons for showing the transport mode dialog after a save.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeTransportMode {
    PrimaryTransportChanged,
}

impl ChangeTransportMode {
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::PrimaryTransportChanged => "eco_profile_primary_transport_changed",
        }
    }
}
