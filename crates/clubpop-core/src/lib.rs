#![forbid(unsafe_code)]

//! Host-agnostic popup lifecycle engine.
//!
//! Everything the popup widget *decides* lives in this crate: when an
//! overlay mounts and unmounts, which window origins to trust, how large the
//! embedded frame may grow, and what gets posted back through the handshake.
//! Everything the widget *does* to a document lives in `clubpop-web`, which
//! feeds this engine events and applies the [`controller::Directive`]s it
//! returns.
//!
//! The split keeps the full lifecycle deterministic and testable on a native
//! target, with no browser in the loop:
//!
//! ```
//! use clubpop_core::controller::{Directive, PopupController, RouteOutcome};
//! use clubpop_core::geometry::Viewport;
//! use clubpop_core::protocol::PopupMessage;
//!
//! let mut controller = PopupController::new();
//! controller.set_viewport(Viewport::new(1024.0, 768.0));
//!
//! let directives = controller.open("https://pop.club.example/widget")?;
//! assert!(matches!(directives[0], Directive::MountOverlay { .. }));
//!
//! let message = PopupMessage::from_json_str(
//!     r#"{"event":"resize","payload":{"width":360,"height":480}}"#,
//! )?;
//! let RouteOutcome::Handled(directives) =
//!     controller.handle_message("https://pop.club.example", message)
//! else {
//!     unreachable!("origin matches and the popup is open");
//! };
//! assert_eq!(directives.len(), 4); // init, load, size, reveal
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod controller;
pub mod events;
pub mod geometry;
pub mod origin;
pub mod protocol;

pub use controller::{Directive, PopupController, RouteOutcome};
pub use events::OverlayEvent;
pub use geometry::{FrameSize, Viewport};
pub use origin::{OriginError, PopupOrigin};
pub use protocol::{InitPayload, PopupMessage, ProtocolError, WireMessage, PROTOCOL_VERSION};
