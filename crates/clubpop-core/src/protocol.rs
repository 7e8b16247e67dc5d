#![forbid(unsafe_code)]

//! Cross-window wire protocol.
//!
//! Every message exchanged with the embedded frame is a JSON object with an
//! `event` name and an optional free-form `payload`:
//!
//! ```json
//! { "event": "resize", "payload": { "width": 360, "height": 480 } }
//! ```
//!
//! Decoding is strict about the envelope (a non-empty `event` string must be
//! present) and deliberately open at the edges: event names the widget does
//! not know become [`PopupMessage::Custom`] and are forwarded to the host
//! page verbatim, so the embedded content can grow its own vocabulary
//! without a widget release.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::FrameSize;

/// Protocol line carried in the API contract for capability checks.
pub const PROTOCOL_VERSION: &str = "club-embed-v1";

/// Event name of the handshake message posted into the frame.
pub const EVENT_INIT: &str = "init";
/// Event name the frame sends to report its desired size.
pub const EVENT_RESIZE: &str = "resize";
/// Event name the frame sends to ask the host to close the popup.
pub const EVENT_CLOSE: &str = "close";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an inbound message was rejected. Every variant is a silent drop at
/// the routing layer; the error exists so the drop can be logged and tested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The data was not a JSON envelope (`{"event": ..., ...}`).
    Json(String),
    /// The envelope carried an empty `event` name.
    EmptyEvent,
    /// A `resize` payload was missing numeric `width`/`height` members.
    MalformedResize,
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(detail) => write!(f, "malformed envelope: {detail}"),
            Self::EmptyEvent => write!(f, "envelope has an empty event name"),
            Self::MalformedResize => write!(f, "resize payload lacks numeric width/height"),
        }
    }
}

impl std::error::Error for ProtocolError {}

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

/// Raw envelope shared by every message on the channel, in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl WireMessage {
    /// Build the `init` handshake envelope.
    #[must_use]
    pub fn init(payload: &InitPayload) -> Self {
        Self {
            event: EVENT_INIT.to_owned(),
            payload: Some(payload.to_value()),
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload of the `init` message posted into the frame once it first reports
/// its size. Both keys are always serialized, as `null` when unset, so the
/// frame can distinguish "no email" from an older widget that never sent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitPayload {
    pub pkey: Option<String>,
    pub email: Option<String>,
}

impl InitPayload {
    fn to_value(&self) -> Value {
        serde_json::json!({ "pkey": self.pkey, "email": self.email })
    }
}

// ---------------------------------------------------------------------------
// Typed inbound messages
// ---------------------------------------------------------------------------

/// Typed view of a message received from the embedded frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupMessage {
    /// The frame asks the host to close the popup.
    Close,
    /// The frame reports its desired size. The first one marks readiness.
    Resize(FrameSize),
    /// Any other event, forwarded to the overlay as a DOM custom event.
    Custom { name: String, payload: Option<Value> },
}

impl PopupMessage {
    /// Decode a message from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ProtocolError> {
        let envelope: WireMessage =
            serde_json::from_str(text).map_err(|e| ProtocolError::Json(e.to_string()))?;
        Self::from_envelope(envelope)
    }

    /// Classify an already-parsed envelope.
    pub fn from_envelope(envelope: WireMessage) -> Result<Self, ProtocolError> {
        if envelope.event.is_empty() {
            return Err(ProtocolError::EmptyEvent);
        }
        match envelope.event.as_str() {
            EVENT_CLOSE => Ok(Self::Close),
            EVENT_RESIZE => {
                let size = envelope
                    .payload
                    .as_ref()
                    .and_then(parse_resize)
                    .ok_or(ProtocolError::MalformedResize)?;
                Ok(Self::Resize(size))
            }
            _ => Ok(Self::Custom {
                name: envelope.event,
                payload: envelope.payload,
            }),
        }
    }
}

fn parse_resize(payload: &Value) -> Option<FrameSize> {
    let width = payload.get("width")?.as_f64()?;
    let height = payload.get("height")?.as_f64()?;
    Some(FrameSize::new(width, height))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_close() {
        let msg = PopupMessage::from_json_str(r#"{"event":"close"}"#).unwrap();
        assert_eq!(msg, PopupMessage::Close);
    }

    #[test]
    fn close_ignores_any_payload() {
        let msg =
            PopupMessage::from_json_str(r#"{"event":"close","payload":{"why":"done"}}"#).unwrap();
        assert_eq!(msg, PopupMessage::Close);
    }

    #[test]
    fn decodes_resize() {
        let msg = PopupMessage::from_json_str(
            r#"{"event":"resize","payload":{"width":360,"height":480.5}}"#,
        )
        .unwrap();
        assert_eq!(msg, PopupMessage::Resize(FrameSize::new(360.0, 480.5)));
    }

    #[test]
    fn resize_without_dimensions_is_malformed() {
        for text in [
            r#"{"event":"resize"}"#,
            r#"{"event":"resize","payload":{}}"#,
            r#"{"event":"resize","payload":{"width":360}}"#,
            r#"{"event":"resize","payload":{"width":"360","height":"480"}}"#,
            r#"{"event":"resize","payload":[360,480]}"#,
        ] {
            assert_eq!(
                PopupMessage::from_json_str(text),
                Err(ProtocolError::MalformedResize),
                "{text}"
            );
        }
    }

    #[test]
    fn unknown_events_become_custom() {
        let msg = PopupMessage::from_json_str(
            r#"{"event":"purchase","payload":{"sku":"annual"}}"#,
        )
        .unwrap();
        let PopupMessage::Custom { name, payload } = msg else {
            panic!("expected a custom message");
        };
        assert_eq!(name, "purchase");
        assert_eq!(payload, Some(serde_json::json!({"sku": "annual"})));
    }

    #[test]
    fn custom_event_payload_is_optional() {
        let msg = PopupMessage::from_json_str(r#"{"event":"blur"}"#).unwrap();
        assert_eq!(
            msg,
            PopupMessage::Custom {
                name: "blur".into(),
                payload: None
            }
        );
    }

    #[test]
    fn empty_event_name_is_rejected() {
        assert_eq!(
            PopupMessage::from_json_str(r#"{"event":""}"#),
            Err(ProtocolError::EmptyEvent)
        );
    }

    #[test]
    fn non_envelopes_are_rejected() {
        for text in ["null", "42", r#""close""#, "[]", "{}", r#"{"payload":{}}"#, "not json"] {
            assert!(
                matches!(PopupMessage::from_json_str(text), Err(ProtocolError::Json(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn non_string_event_is_rejected() {
        assert!(matches!(
            PopupMessage::from_json_str(r#"{"event":5}"#),
            Err(ProtocolError::Json(_))
        ));
    }

    #[test]
    fn init_serializes_unset_keys_as_null() {
        let envelope = WireMessage::init(&InitPayload::default());
        let text = envelope.to_json_string().unwrap();
        assert_eq!(text, r#"{"event":"init","payload":{"email":null,"pkey":null}}"#);
    }

    #[test]
    fn init_carries_pkey_and_email() {
        let envelope = WireMessage::init(&InitPayload {
            pkey: Some("pk_live_1".into()),
            email: Some("member@example.com".into()),
        });
        let value: Value = serde_json::from_str(&envelope.to_json_string().unwrap()).unwrap();
        assert_eq!(value["event"], "init");
        assert_eq!(value["payload"]["pkey"], "pk_live_1");
        assert_eq!(value["payload"]["email"], "member@example.com");
    }

    #[test]
    fn envelope_without_payload_omits_the_key() {
        let envelope = WireMessage {
            event: EVENT_CLOSE.to_owned(),
            payload: None,
        };
        assert_eq!(envelope.to_json_string().unwrap(), r#"{"event":"close"}"#);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Decoding never panics, whatever the channel delivers.
            #[test]
            fn decode_is_total(text in "\\PC{0,256}") {
                let _ = PopupMessage::from_json_str(&text);
            }

            /// Any non-reserved event name round-trips through the custom arm
            /// with its payload intact.
            #[test]
            fn custom_events_survive_the_envelope(
                name in "[a-z][a-z0-9_]{0,24}",
                n in proptest::num::i32::ANY,
            ) {
                prop_assume!(name != EVENT_CLOSE && name != EVENT_RESIZE);
                let envelope = WireMessage {
                    event: name.clone(),
                    payload: Some(serde_json::json!({ "n": n })),
                };
                let decoded =
                    PopupMessage::from_json_str(&envelope.to_json_string().unwrap()).unwrap();
                prop_assert_eq!(decoded, PopupMessage::Custom {
                    name,
                    payload: Some(serde_json::json!({ "n": n })),
                });
            }
        }
    }
}
