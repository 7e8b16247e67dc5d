#![forbid(unsafe_code)]

//! Fixed inline styling for the overlay and frame.
//!
//! Styles are applied inline rather than via a stylesheet so the widget
//! works on pages whose CSP disallows injected `<style>` elements and so
//! host CSS resets cannot bleed in. Property names are the CSS (kebab-case)
//! forms expected by `CSSStyleDeclaration.setProperty`.

/// Stacking order for the overlay. High enough to clear typical page chrome
/// without fighting browser UI.
pub const OVERLAY_Z_INDEX: &str = "10000";

/// Backdrop wash drawn over the host page.
pub const BACKDROP_COLOR: &str = "rgba(0, 0, 0, 0.5)";

/// Inline styles for the full-viewport overlay. The flex centering is what
/// keeps the frame centered as it resizes.
#[must_use]
pub fn overlay_style() -> [(&'static str, &'static str); 10] {
    [
        ("position", "fixed"),
        ("top", "0"),
        ("bottom", "0"),
        ("left", "0"),
        ("right", "0"),
        ("background", BACKDROP_COLOR),
        ("z-index", OVERLAY_Z_INDEX),
        ("display", "flex"),
        ("justify-content", "center"),
        ("align-items", "center"),
    ]
}

/// Inline styles for the frame as mounted: present in the layout but
/// invisible until its content reports a size.
#[must_use]
pub fn frame_style() -> [(&'static str, &'static str); 2] {
    [("visibility", "hidden"), ("border", "none")]
}

/// Style flip applied when the frame first reports a size.
pub const FRAME_VISIBLE: (&str, &str) = ("visibility", "visible");

/// Accessibility attributes for the overlay element.
#[must_use]
pub fn overlay_attributes() -> [(&'static str, &'static str); 1] {
    [("aria-modal", "true")]
}

/// Accessibility attributes for the frame element.
#[must_use]
pub fn frame_attributes() -> [(&'static str, &'static str); 1] {
    [("aria-role", "dialog")]
}
