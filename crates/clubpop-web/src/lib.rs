#![forbid(unsafe_code)]

//! Browser embed for the club membership popup.
//!
//! Host pages get a tiny surface: `openPopup(url)` mounts a full-viewport
//! overlay with a hidden iframe and returns a handle, `closePopup()` (or the
//! Escape key, or a click on the backdrop) tears it down, and a
//! `postMessage` channel lets the embedded frame drive its own size and
//! lifecycle. The decisions all live in `clubpop-core`; this crate is the
//! DOM and `wasm-bindgen` glue around that engine.
//!
//! Module map:
//! - [`config`]: embed options, build-time defaults, JS options parsing.
//! - [`input`]: keypress normalization for the Escape shortcut.
//! - [`style`]: the fixed inline styles for overlay and frame.
//! - `dom` (wasm32 only): element construction and mutation.
//! - `wasm` (wasm32 only): the exported [`ClubPop`] / [`PopupHandle`]
//!   surface and the global listeners.

use std::fmt;

pub mod config;
pub mod input;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{ClubPop, PopupHandle};

// ---------------------------------------------------------------------------
// JS API contract
// ---------------------------------------------------------------------------

/// Product line identifier carried in the API contract.
pub const CLUBPOP_JS_API_LINE: &str = "clubpop-js";

/// Stable ClubPopJS API semver for host-side compatibility checks.
/// Intentionally distinct from crate/package semver.
pub const CLUBPOP_JS_API_VERSION: &str = "1.0.0";

/// Methods exposed on the installed `window.<namespace>.club` object and on
/// the [`ClubPop`] class itself.
pub const CLUBPOP_JS_PUBLIC_METHODS: [&str; 6] = [
    "openPopup",
    "closePopup",
    "getMemberEmail",
    "install",
    "apiVersion",
    "apiContract",
];

/// Methods exposed on the handle returned by `openPopup`.
pub const CLUBPOP_JS_HANDLE_METHODS: [&str; 4] =
    ["on", "close", "addEventListener", "removeEventListener"];

/// Lifecycle events dispatched on the overlay element. Custom events
/// forwarded from the frame are open-ended and not listed here.
pub const CLUBPOP_JS_OVERLAY_EVENTS: [&str; 2] =
    [clubpop_core::events::EVENT_LOAD, clubpop_core::events::EVENT_CLOSE];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures wiring the widget into a page. These surface as JS exceptions
/// from the exported API; everything after installation degrades to logged
/// drops instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    /// No global `window` object (not running in a browsing context).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// The document has no `<body>` to attach the overlay to.
    NoBody,
    /// `openPopup` was called with no URL argument and no configured default.
    NoUrlConfigured,
    /// The configured namespace exists on `window` but is not an object.
    NamespaceNotObject(String),
    /// The install-time options object could not be read.
    InvalidOptions(String),
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window object"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::NoBody => write!(f, "document has no body"),
            Self::NoUrlConfigured => {
                write!(f, "openPopup needs a URL argument or a configured default")
            }
            Self::NamespaceNotObject(ns) => {
                write!(f, "window.{ns} exists but is not an object")
            }
            Self::InvalidOptions(detail) => write!(f, "invalid embed options: {detail}"),
        }
    }
}

impl std::error::Error for EmbedError {}

#[cfg(target_arch = "wasm32")]
impl From<EmbedError> for wasm_bindgen::JsValue {
    fn from(err: EmbedError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
