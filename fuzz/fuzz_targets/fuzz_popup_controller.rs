#![no_main]

use arbitrary::Arbitrary;
use clubpop_core::controller::{Directive, PopupController, RouteOutcome};
use clubpop_core::geometry::{FrameSize, Viewport};
use clubpop_core::protocol::PopupMessage;
use libfuzzer_sys::fuzz_target;

const URLS: [&str; 4] = [
    "https://pop.club.example/widget",
    "http://localhost:8080/widget",
    "ftp://pop.club.example/widget",
    "not a url at all",
];

const ORIGINS: [&str; 4] = [
    "https://pop.club.example",
    "http://localhost:8080",
    "https://evil.example",
    "null",
];

#[derive(Arbitrary, Debug)]
enum Op {
    Open { url: u8 },
    Close,
    SetViewport { width: f64, height: f64 },
    Resize { origin: u8, width: f64, height: f64 },
    CloseMessage { origin: u8 },
    Custom { origin: u8, name: String },
}

fuzz_target!(|ops: Vec<Op>| {
    let mut controller = PopupController::new();
    controller.set_viewport(Viewport::new(1024.0, 768.0));

    // Shadow of what a DOM surface would hold after applying every directive.
    let mut mounted = false;

    for op in ops {
        let directives = match op {
            Op::Open { url } => match controller.open(URLS[url as usize % URLS.len()]) {
                Ok(directives) => directives,
                Err(_) => Vec::new(),
            },
            Op::Close => controller.close(),
            Op::SetViewport { width, height } => {
                controller.set_viewport(Viewport::new(width, height));
                Vec::new()
            }
            Op::Resize {
                origin,
                width,
                height,
            } => route(
                &mut controller,
                ORIGINS[origin as usize % ORIGINS.len()],
                PopupMessage::Resize(FrameSize::new(width, height)),
            ),
            Op::CloseMessage { origin } => route(
                &mut controller,
                ORIGINS[origin as usize % ORIGINS.len()],
                PopupMessage::Close,
            ),
            Op::Custom { origin, name } => route(
                &mut controller,
                ORIGINS[origin as usize % ORIGINS.len()],
                PopupMessage::Custom {
                    name,
                    payload: None,
                },
            ),
        };

        for directive in &directives {
            match directive {
                Directive::MountOverlay { .. } => {
                    assert!(!mounted, "mount while an overlay is mounted");
                    mounted = true;
                }
                Directive::UnmountOverlay => {
                    assert!(mounted, "unmount with no overlay mounted");
                    mounted = false;
                }
                Directive::PostInit { .. }
                | Directive::EmitOverlayEvent(_)
                | Directive::ApplyFrameSize(_)
                | Directive::RevealFrame => {
                    assert!(mounted, "frame directive with no overlay mounted");
                }
            }
        }

        // Post-conditions that must always hold:
        assert_eq!(
            mounted,
            controller.is_open(),
            "surface and controller disagree on mount state"
        );
        if controller.is_ready() {
            assert!(controller.is_open(), "ready implies open");
        }
        if controller.is_open() {
            assert!(controller.origin().is_some(), "open popup has no origin");
            assert!(controller.url().is_some(), "open popup has no url");
        }
    }
});

fn route(
    controller: &mut PopupController,
    reported_origin: &str,
    message: PopupMessage,
) -> Vec<Directive> {
    let was_open = controller.is_open();
    match controller.handle_message(reported_origin, message) {
        RouteOutcome::Handled(directives) => directives,
        RouteOutcome::DroppedClosed => {
            assert!(!was_open, "drop reason says closed but popup was open");
            Vec::new()
        }
        RouteOutcome::DroppedOrigin => {
            assert!(was_open, "origin mismatch is only detectable while open");
            Vec::new()
        }
    }
}
