#![forbid(unsafe_code)]

//! Embed configuration.
//!
//! Deployments usually bake their constants into the shipped module at build
//! time (`CLUBPOP_URL`, `CLUBPOP_PKEY`, `CLUBPOP_ONLOAD` environment
//! variables, read via `option_env!`). Everything can also be supplied at
//! runtime through the JS options object passed to the `ClubPop`
//! constructor; runtime values win over baked defaults, and unknown keys are
//! ignored so host snippets stay forward compatible.

use serde::{Deserialize, Serialize};

/// `window` property the host API installs under when none is configured.
pub const DEFAULT_NAMESPACE: &str = "cgws";

/// Property of the namespace object holding the popup API
/// (`window.<namespace>.club`).
pub const API_PROPERTY: &str = "club";

/// Install-time configuration for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Default popup URL for `openPopup()` calls without an argument. Also
    /// the source of the trusted message origin once a popup opens.
    pub url: Option<String>,
    /// Publishable key sent to the frame in the `init` handshake.
    pub pkey: Option<String>,
    /// `window` property to install the host API under.
    pub namespace: String,
    /// Name of a global function invoked once installation completes.
    pub onload: Option<String>,
    /// Seed for the handle's `options.email`, forwarded in `init`.
    pub email: Option<String>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            url: option_env!("CLUBPOP_URL").map(str::to_owned),
            pkey: option_env!("CLUBPOP_PKEY").map(str::to_owned),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            onload: option_env!("CLUBPOP_ONLOAD").map(str::to_owned),
            email: None,
        }
    }
}

impl EmbedConfig {
    /// Parse a JS options object serialized to JSON. Missing keys fall back
    /// to the baked defaults; `null` explicitly clears a default.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
