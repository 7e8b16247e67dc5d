#![forbid(unsafe_code)]

//! Popup origin derivation and matching.
//!
//! Inbound messages are only accepted when their reported origin matches the
//! origin of the configured popup URL, and the outbound `init` message is
//! targeted at exactly that origin. The derived form follows the ASCII
//! serialization browsers report in `MessageEvent.origin`: lowercase
//! `scheme://host`, with the port kept unless it is the scheme default.

use std::fmt;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a popup URL could not be reduced to an origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginError {
    /// The URL has no `://` separator.
    MissingScheme,
    /// The scheme is neither `http` nor `https`.
    UnsupportedScheme(String),
    /// The authority component has no host.
    EmptyHost,
    /// The authority has a port that is not a valid decimal `u16`.
    InvalidPort(String),
}

impl fmt::Display for OriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingScheme => write!(f, "popup URL has no scheme"),
            Self::UnsupportedScheme(scheme) => {
                write!(f, "unsupported popup URL scheme `{scheme}`")
            }
            Self::EmptyHost => write!(f, "popup URL has no host"),
            Self::InvalidPort(port) => write!(f, "invalid popup URL port `{port}`"),
        }
    }
}

impl std::error::Error for OriginError {}

// ---------------------------------------------------------------------------
// PopupOrigin
// ---------------------------------------------------------------------------

/// The origin the popup frame is expected to message from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupOrigin {
    serialized: String,
}

impl PopupOrigin {
    /// Derive the origin of `url`.
    ///
    /// Accepts `http` and `https` URLs only. Userinfo is stripped, scheme and
    /// host are lowercased, and default ports (`http:80`, `https:443`) are
    /// omitted from the serialization, matching what the browser will report
    /// for messages posted by a frame loaded from `url`.
    pub fn derive(url: &str) -> Result<Self, OriginError> {
        let trimmed = url.trim();
        let Some((raw_scheme, rest)) = trimmed.split_once("://") else {
            return Err(OriginError::MissingScheme);
        };
        let scheme = raw_scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(OriginError::UnsupportedScheme(scheme));
        }

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = &rest[..authority_end];
        // Userinfo may not legally contain `@`, but splitting on the last one
        // keeps a malformed URL from smuggling a host into the userinfo part.
        let host_port = match authority.rfind('@') {
            Some(at) => &authority[at + 1..],
            None => authority,
        };

        let (raw_host, raw_port) = split_host_port(host_port)?;
        if raw_host.is_empty() {
            return Err(OriginError::EmptyHost);
        }
        let host = raw_host.to_ascii_lowercase();

        let mut serialized = format!("{scheme}://{host}");
        if let Some(port) = raw_port {
            let parsed: u16 = port
                .parse()
                .map_err(|_| OriginError::InvalidPort(port.to_owned()))?;
            let default = if scheme == "https" { 443 } else { 80 };
            if parsed != default {
                // Serialize the parsed value so `:099` matches the browser's
                // normalized `:99`.
                serialized.push(':');
                serialized.push_str(&parsed.to_string());
            }
        }
        Ok(Self { serialized })
    }

    /// Exact-match check against an origin string reported by the browser.
    #[must_use]
    pub fn matches(&self, reported: &str) -> bool {
        self.serialized == reported
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.serialized
    }
}

impl fmt::Display for PopupOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

/// Split `host[:port]`, keeping IPv6 brackets as part of the host.
fn split_host_port(host_port: &str) -> Result<(&str, Option<&str>), OriginError> {
    if let Some(stripped) = host_port.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            return Err(OriginError::EmptyHost);
        };
        let host = &host_port[..close + 2];
        let rest = &stripped[close + 1..];
        return match rest.strip_prefix(':') {
            Some(port) if !port.is_empty() => Ok((host, Some(port))),
            Some(_) | None => Ok((host, None)),
        };
    }
    match host_port.split_once(':') {
        Some((host, port)) if !port.is_empty() => Ok((host, Some(port))),
        Some((host, _)) => Ok((host, None)),
        None => Ok((host_port, None)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
