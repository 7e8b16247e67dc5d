#![forbid(unsafe_code)]

//! Events the widget dispatches on the overlay element.
//!
//! Host pages subscribe through the popup handle (`handle.on("close", ..)`),
//! so these names are public API surface and must stay stable.

use serde_json::Value;

/// Dispatched once the frame first reports its size and the popup is live.
pub const EVENT_LOAD: &str = "load";
/// Dispatched just before the overlay is removed from the document.
pub const EVENT_CLOSE: &str = "close";

/// An event to dispatch on the overlay for host listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// The popup finished its handshake and is visible.
    Load,
    /// The popup is about to be unmounted.
    Close,
    /// An event forwarded verbatim from the embedded frame. Object payloads
    /// are mixed into the dispatched DOM event's own properties.
    Custom { name: String, payload: Option<Value> },
}

impl OverlayEvent {
    /// The DOM event type this dispatches as.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Load => EVENT_LOAD,
            Self::Close => EVENT_CLOSE,
            Self::Custom { name, .. } => name,
        }
    }

    /// Payload to mix into the dispatched event, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Custom { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}
