#![forbid(unsafe_code)]

//! Popup lifecycle state machine.
//!
//! The controller is host-driven: the surface layer feeds it open and close
//! requests, viewport snapshots, and decoded frame messages, and it answers
//! with [`Directive`]s for the surface to apply against the real document in
//! order. It never touches the DOM itself, which keeps every lifecycle rule
//! testable off-browser.
//!
//! State transitions happen before directives are returned, so listeners
//! that run synchronously while a directive is being applied (a `close`
//! handler calling `openPopup` again, say) observe the settled state and
//! cannot re-enter a transition halfway.

use crate::events::OverlayEvent;
use crate::geometry::{FrameSize, Viewport};
use crate::origin::{OriginError, PopupOrigin};
use crate::protocol::PopupMessage;

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

/// Work for the surface layer, applied strictly in the order returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Build the overlay and frame pair and attach it to the document, with
    /// the frame sized to `initial_size` but still hidden.
    MountOverlay { url: String, initial_size: FrameSize },
    /// Post the `init` handshake into the frame, targeted at exactly
    /// `target_origin`.
    PostInit { target_origin: String },
    /// Dispatch an event on the overlay element for host listeners.
    EmitOverlayEvent(OverlayEvent),
    /// Apply an already-clamped size to the frame element.
    ApplyFrameSize(FrameSize),
    /// Make the frame visible.
    RevealFrame,
    /// Detach the overlay from the document and release per-popup resources.
    UnmountOverlay,
}

/// What became of an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Accepted; apply the directives in order.
    Handled(Vec<Directive>),
    /// No popup is open, the message was discarded.
    DroppedClosed,
    /// The reported origin does not match the popup origin.
    DroppedOrigin,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Closed,
    Open { ready: bool },
}

/// Single-flight popup lifecycle: at most one popup exists at a time.
#[derive(Debug)]
pub struct PopupController {
    phase: Phase,
    viewport: Viewport,
    // Both are `Some` from the first successful `open` onward.
    origin: Option<PopupOrigin>,
    url: Option<String>,
}

impl Default for PopupController {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Closed,
            viewport: Viewport::new(0.0, 0.0),
            origin: None,
            url: None,
        }
    }

    /// Record the latest viewport snapshot. The surface calls this before
    /// `open` and before routing messages so clamping sees current bounds.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open { .. })
    }

    /// Whether the open popup has completed the `init` handshake.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Open { ready: true })
    }

    /// Origin the popup frame is expected to message from, once set.
    #[must_use]
    pub fn origin(&self) -> Option<&PopupOrigin> {
        self.origin.as_ref()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Open the popup for `url`.
    ///
    /// The target URL and expected origin are re-pointed on every call, even
    /// when a popup is already showing; in that case no new overlay is
    /// mounted and the existing one simply starts trusting the new origin.
    /// A URL that does not reduce to an origin is an error and leaves all
    /// state untouched.
    pub fn open(&mut self, url: &str) -> Result<Vec<Directive>, OriginError> {
        let origin = PopupOrigin::derive(url)?;
        self.origin = Some(origin);
        self.url = Some(url.to_owned());
        if self.is_open() {
            return Ok(Vec::new());
        }
        self.phase = Phase::Open { ready: false };
        Ok(vec![Directive::MountOverlay {
            url: url.to_owned(),
            initial_size: FrameSize::UNBOUNDED.clamp_to(self.viewport),
        }])
    }

    /// Close the popup. A no-op when none is open, so the Escape key and
    /// repeated `closePopup` calls are always safe.
    pub fn close(&mut self) -> Vec<Directive> {
        if !self.is_open() {
            return Vec::new();
        }
        self.phase = Phase::Closed;
        // The close event fires while the overlay is still in the document.
        vec![
            Directive::EmitOverlayEvent(OverlayEvent::Close),
            Directive::UnmountOverlay,
        ]
    }

    /// Route a decoded message whose sender the surface has already pinned
    /// to the popup frame's own window. Origin and lifecycle checks happen
    /// here; a mismatch is a drop, never an error.
    pub fn handle_message(&mut self, reported_origin: &str, message: PopupMessage) -> RouteOutcome {
        let Phase::Open { ready } = self.phase else {
            return RouteOutcome::DroppedClosed;
        };
        let Some(expected) = self.origin.clone() else {
            return RouteOutcome::DroppedClosed;
        };
        if !expected.matches(reported_origin) {
            return RouteOutcome::DroppedOrigin;
        }

        let directives = match message {
            PopupMessage::Close => self.close(),
            PopupMessage::Resize(requested) => {
                let mut directives = Vec::with_capacity(4);
                if !ready {
                    self.phase = Phase::Open { ready: true };
                    directives.push(Directive::PostInit {
                        target_origin: expected.as_str().to_owned(),
                    });
                    directives.push(Directive::EmitOverlayEvent(OverlayEvent::Load));
                }
                directives.push(Directive::ApplyFrameSize(requested.clamp_to(self.viewport)));
                directives.push(Directive::RevealFrame);
                directives
            }
            PopupMessage::Custom { name, payload } => {
                vec![Directive::EmitOverlayEvent(OverlayEvent::Custom {
                    name,
                    payload,
                })]
            }
        };
        RouteOutcome::Handled(directives)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://pop.club.example/widget";
    const ORIGIN: &str = "https://pop.club.example";

    fn open_controller() -> PopupController {
        let mut controller = PopupController::new();
        controller.set_viewport(Viewport::new(1024.0, 768.0));
        let directives = controller.open(URL).unwrap();
        assert_eq!(directives.len(), 1);
        controller
    }

    fn resize(width: f64, height: f64) -> PopupMessage {
        PopupMessage::Resize(FrameSize::new(width, height))
    }

    #[test]
    fn open_mounts_a_hidden_frame_at_viewport_bounds() {
        let mut controller = PopupController::new();
        controller.set_viewport(Viewport::new(1024.0, 768.0));
        let directives = controller.open(URL).unwrap();
        assert_eq!(
            directives,
            vec![Directive::MountOverlay {
                url: URL.to_owned(),
                initial_size: FrameSize::new(1004.0, 718.0),
            }]
        );
        assert!(controller.is_open());
        assert!(!controller.is_ready());
        assert_eq!(controller.origin().map(|o| o.as_str()), Some(ORIGIN));
        assert_eq!(controller.url(), Some(URL));
    }

    #[test]
    fn open_while_open_mounts_nothing() {
        let mut controller = open_controller();
        assert_eq!(controller.open(URL).unwrap(), Vec::new());
        assert!(controller.is_open());
    }

    #[test]
    fn open_while_open_retargets_the_expected_origin() {
        let mut controller = open_controller();
        controller.open("https://other.example/widget").unwrap();

        // The old origin is no longer trusted, the new one is.
        assert_eq!(
            controller.handle_message(ORIGIN, resize(100.0, 100.0)),
            RouteOutcome::DroppedOrigin
        );
        assert!(matches!(
            controller.handle_message("https://other.example", resize(100.0, 100.0)),
            RouteOutcome::Handled(_)
        ));
    }

    #[test]
    fn open_with_a_bad_url_leaves_state_untouched() {
        let mut controller = PopupController::new();
        assert_eq!(controller.open("no-scheme"), Err(OriginError::MissingScheme));
        assert!(!controller.is_open());
        assert_eq!(controller.origin(), None);

        let mut controller = open_controller();
        assert!(controller.open("ftp://x.example/").is_err());
        assert!(controller.is_open());
        assert_eq!(controller.origin().map(|o| o.as_str()), Some(ORIGIN));
    }

    #[test]
    fn first_resize_inits_loads_sizes_and_reveals_in_order() {
        let mut controller = open_controller();
        let outcome = controller.handle_message(ORIGIN, resize(300.0, 200.0));
        assert_eq!(
            outcome,
            RouteOutcome::Handled(vec![
                Directive::PostInit {
                    target_origin: ORIGIN.to_owned()
                },
                Directive::EmitOverlayEvent(OverlayEvent::Load),
                Directive::ApplyFrameSize(FrameSize::new(300.0, 200.0)),
                Directive::RevealFrame,
            ])
        );
        assert!(controller.is_ready());
    }

    #[test]
    fn later_resizes_skip_the_handshake() {
        let mut controller = open_controller();
        controller.handle_message(ORIGIN, resize(300.0, 200.0));
        let outcome = controller.handle_message(ORIGIN, resize(400.0, 500.0));
        assert_eq!(
            outcome,
            RouteOutcome::Handled(vec![
                Directive::ApplyFrameSize(FrameSize::new(400.0, 500.0)),
                Directive::RevealFrame,
            ])
        );
    }

    #[test]
    fn resize_clamps_oversized_requests_to_the_viewport() {
        let mut controller = open_controller();
        controller.handle_message(ORIGIN, resize(1.0, 1.0));
        let outcome = controller.handle_message(ORIGIN, resize(5000.0, 5000.0));
        assert_eq!(
            outcome,
            RouteOutcome::Handled(vec![
                Directive::ApplyFrameSize(FrameSize::new(1004.0, 718.0)),
                Directive::RevealFrame,
            ])
        );
    }

    #[test]
    fn viewport_updates_apply_to_the_next_resize() {
        let mut controller = open_controller();
        controller.handle_message(ORIGIN, resize(1.0, 1.0));
        controller.set_viewport(Viewport::new(400.0, 300.0));
        let outcome = controller.handle_message(ORIGIN, resize(5000.0, 5000.0));
        assert_eq!(
            outcome,
            RouteOutcome::Handled(vec![
                Directive::ApplyFrameSize(FrameSize::new(380.0, 250.0)),
                Directive::RevealFrame,
            ])
        );
    }

    #[test]
    fn close_emits_before_unmounting() {
        let mut controller = open_controller();
        assert_eq!(
            controller.close(),
            vec![
                Directive::EmitOverlayEvent(OverlayEvent::Close),
                Directive::UnmountOverlay,
            ]
        );
        assert!(!controller.is_open());
    }

    #[test]
    fn close_when_closed_is_a_noop() {
        let mut controller = PopupController::new();
        assert_eq!(controller.close(), Vec::new());

        let mut controller = open_controller();
        controller.close();
        assert_eq!(controller.close(), Vec::new());
    }

    #[test]
    fn close_message_tears_down_like_a_host_close() {
        let mut controller = open_controller();
        let outcome = controller.handle_message(ORIGIN, PopupMessage::Close);
        assert_eq!(
            outcome,
            RouteOutcome::Handled(vec![
                Directive::EmitOverlayEvent(OverlayEvent::Close),
                Directive::UnmountOverlay,
            ])
        );
        assert!(!controller.is_open());
    }

    #[test]
    fn messages_while_closed_are_dropped() {
        let mut controller = PopupController::new();
        assert_eq!(
            controller.handle_message(ORIGIN, PopupMessage::Close),
            RouteOutcome::DroppedClosed
        );

        let mut controller = open_controller();
        controller.close();
        assert_eq!(
            controller.handle_message(ORIGIN, resize(100.0, 100.0)),
            RouteOutcome::DroppedClosed
        );
    }

    #[test]
    fn foreign_origin_messages_are_dropped_without_side_effects() {
        let mut controller = open_controller();
        assert_eq!(
            controller.handle_message("https://evil.example", resize(10.0, 10.0)),
            RouteOutcome::DroppedOrigin
        );
        assert_eq!(
            controller.handle_message("", PopupMessage::Close),
            RouteOutcome::DroppedOrigin
        );
        assert!(controller.is_open());
        assert!(!controller.is_ready());
    }

    #[test]
    fn custom_messages_forward_to_the_overlay() {
        let mut controller = open_controller();
        let outcome = controller.handle_message(
            ORIGIN,
            PopupMessage::Custom {
                name: "purchase".into(),
                payload: Some(serde_json::json!({"sku": "annual"})),
            },
        );
        assert_eq!(
            outcome,
            RouteOutcome::Handled(vec![Directive::EmitOverlayEvent(OverlayEvent::Custom {
                name: "purchase".into(),
                payload: Some(serde_json::json!({"sku": "annual"})),
            })])
        );
        // Forwarding does not require or grant readiness.
        assert!(!controller.is_ready());
    }

    #[test]
    fn reopening_after_close_mounts_a_fresh_popup() {
        let mut controller = open_controller();
        controller.handle_message(ORIGIN, resize(300.0, 200.0));
        controller.close();

        let directives = controller.open(URL).unwrap();
        assert_eq!(directives.len(), 1);
        assert!(matches!(directives[0], Directive::MountOverlay { .. }));
        assert!(controller.is_open());
        assert!(!controller.is_ready(), "readiness must not leak across popups");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Open(usize),
            Close,
            Message(usize, f64, f64),
        }

        const URLS: [&str; 3] = [
            "https://pop.club.example/widget",
            "https://other.example/widget",
            "not a url",
        ];
        const ORIGINS: [&str; 3] = [
            "https://pop.club.example",
            "https://other.example",
            "https://evil.example",
        ];

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..URLS.len()).prop_map(Op::Open),
                Just(Op::Close),
                (0..ORIGINS.len(), -100.0f64..5000.0, -100.0f64..5000.0)
                    .prop_map(|(o, w, h)| Op::Message(o, w, h)),
            ]
        }

        proptest! {
            /// Any interleaving keeps the lifecycle invariants: readiness
            /// implies an open popup, and messages are only handled while
            /// one is open.
            #[test]
            fn lifecycle_invariants_hold_under_any_interleaving(
                ops in proptest::collection::vec(op(), 0..40)
            ) {
                let mut controller = PopupController::new();
                controller.set_viewport(Viewport::new(1024.0, 768.0));
                for op in ops {
                    match op {
                        Op::Open(i) => {
                            let _ = controller.open(URLS[i]);
                        }
                        Op::Close => {
                            let _ = controller.close();
                        }
                        Op::Message(i, w, h) => {
                            let was_open = controller.is_open();
                            let outcome = controller.handle_message(
                                ORIGINS[i],
                                PopupMessage::Resize(FrameSize::new(w, h)),
                            );
                            if !was_open {
                                prop_assert_eq!(outcome, RouteOutcome::DroppedClosed);
                            }
                        }
                    }
                    prop_assert!(!controller.is_ready() || controller.is_open());
                    prop_assert!(!controller.is_open() || controller.origin().is_some());
                }
            }
        }
    }
}
