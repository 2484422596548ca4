mod navigator;

pub use self::navigator::Navigator;

// Crux's built-in Render and Http capabilities are used as they are. Fields
// name the capability types directly: the Effect derive takes each variant
// name and event type from them.
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub navigator: Navigator<Event>,
}
