use serde::{Deserialize, Serialize};

use crate::api::RequestTicket;
use crate::model::{
    AddressLocal, EcoProfileData, Journey, JourneyKind, PerformancePeriod, RoundTrip,
    TransportType, UserId,
};
use crate::NetworkError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    Configure {
        base_url: String,
        user_agent: Option<String>,
    },

    // Eco profile screen
    EcoProfileOpened {
        user_id: UserId,
    },
    SelectPerformancePeriodClicked,
    PerformancePeriodSelected(PerformancePeriod),
    EditTripClicked,
    BackClicked,

    // Edit trip screen
    EditTripOpened,
    EditTripClosed,
    ReturnJourneyCleared,
    ReturnJourneyCreated,
    SaveTripClicked,

    // Edit trip leg screen
    EditLegClicked {
        position: usize,
        is_edit: bool,
        is_outward: bool,
        is_last_plus: bool,
    },
    EditLegCancelled,
    TransportModeSelected(TransportType),
    ChooseStartAddressClicked,
    ChooseEndAddressClicked,
    StartAddressChosen(AddressLocal),
    EndAddressChosen(AddressLocal),
    SaveLegClicked,
    DeleteLegClicked,

    // Repository responses (boxed to keep enum size small)
    EcoProfileFetched {
        ticket: RequestTicket,
        result: Box<Result<EcoProfileData, NetworkError>>,
    },
    RoundTripFetched {
        ticket: RequestTicket,
        result: Box<Result<RoundTrip, NetworkError>>,
    },
    JourneyValidated {
        ticket: RequestTicket,
        kind: JourneyKind,
        result: Box<Result<Journey, NetworkError>>,
    },
    RoundTripUpdated {
        ticket: RequestTicket,
        result: Box<Result<RoundTrip, NetworkError>>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure { .. } => "configure",
            Self::EcoProfileOpened { .. } => "eco_profile_opened",
            Self::SelectPerformancePeriodClicked => "select_performance_period_clicked",
            Self::PerformancePeriodSelected(_) => "performance_period_selected",
            Self::EditTripClicked => "edit_trip_clicked",
            Self::BackClicked => "back_clicked",
            Self::EditTripOpened => "edit_trip_opened",
            Self::EditTripClosed => "edit_trip_closed",
            Self::ReturnJourneyCleared => "return_journey_cleared",
            Self::ReturnJourneyCreated => "return_journey_created",
            Self::SaveTripClicked => "save_trip_clicked",
            Self::EditLegClicked { .. } => "edit_leg_clicked",
            Self::EditLegCancelled => "edit_leg_cancelled",
            Self::TransportModeSelected(_) => "transport_mode_selected",
            Self::ChooseStartAddressClicked => "choose_start_address_clicked",
            Self::ChooseEndAddressClicked => "choose_end_address_clicked",
            Self::StartAddressChosen(_) => "start_address_chosen",
            Self::EndAddressChosen(_) => "end_address_chosen",
            Self::SaveLegClicked => "save_leg_clicked",
            Self::DeleteLegClicked => "delete_leg_clicked",
            Self::EcoProfileFetched { .. } => "eco_profile_fetched",
            Self::RoundTripFetched { .. } => "round_trip_fetched",
            Self::JourneyValidated { .. } => "journey_validated",
            Self::RoundTripUpdated { .. } => "round_trip_updated",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::Configure { .. }
                | Self::EcoProfileFetched { .. }
                | Self::RoundTripFetched { .. }
                | Self::JourneyValidated { .. }
                | Self::RoundTripUpdated { .. }
        )
    }
}
