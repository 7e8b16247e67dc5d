#![forbid(unsafe_code)]

//! Viewport-aware frame sizing.
//!
//! The embedded frame reports the size it wants; the host viewport decides
//! the size it gets. Sizing keeps a fixed margin between the frame and the
//! viewport edge so the backdrop stays visible around the popup.

/// Horizontal margin kept between the frame and the viewport edge, in CSS
/// pixels (split across both sides by the centering layout).
pub const HORIZONTAL_BUFFER: f64 = 20.0;

/// Vertical margin kept between the frame and the viewport edge, in CSS
/// pixels.
pub const VERTICAL_BUFFER: f64 = 50.0;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Host viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// FrameSize
// ---------------------------------------------------------------------------

/// A requested or applied frame size in CSS pixels.
///
/// Requested sizes come straight out of `resize` payloads and are untrusted:
/// they may be huge, negative, or non-finite. [`FrameSize::clamp_to`] is the
/// only path from a request to a size the DOM layer will apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    /// Sentinel request used when mounting: "as large as the viewport
    /// allows". Clamping maps it to the viewport minus the buffers.
    pub const UNBOUNDED: Self = Self {
        width: f64::INFINITY,
        height: f64::INFINITY,
    };

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp the requested size so the frame fits inside `viewport` with the
    /// fixed buffers left over. A `NaN` request falls back to the viewport
    /// bound on that axis.
    #[must_use]
    pub fn clamp_to(self, viewport: Viewport) -> Self {
        Self {
            width: self.width.min(viewport.width - HORIZONTAL_BUFFER),
            height: self.height.min(viewport.height - VERTICAL_BUFFER),
        }
    }

    /// Whole-pixel form for element attributes. Sub-pixel values round to the
    /// nearest pixel; negative values (viewport smaller than the buffers)
    /// floor to zero.
    #[must_use]
    pub fn to_css_pixels(self) -> (u32, u32) {
        let px = |v: f64| v.round().max(0.0) as u32;
        (px(self.width), px(self.height))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VIEWPORT: Viewport = Viewport::new(1024.0, 768.0);

    #[test]
    fn small_request_is_kept() {
        let applied = FrameSize::new(300.0, 200.0).clamp_to(VIEWPORT);
        assert_eq!(applied, FrameSize::new(300.0, 200.0));
    }

    #[test]
    fn oversized_request_clamps_to_viewport_minus_buffers() {
        let applied = FrameSize::new(5000.0, 5000.0).clamp_to(VIEWPORT);
        assert_eq!(applied, FrameSize::new(1004.0, 718.0));
    }

    #[test]
    fn unbounded_request_fills_the_viewport() {
        let applied = FrameSize::UNBOUNDED.clamp_to(VIEWPORT);
        assert_eq!(applied, FrameSize::new(1004.0, 718.0));
    }

    #[test]
    fn nan_request_falls_back_to_the_viewport_bound() {
        let applied = FrameSize::new(f64::NAN, f64::NAN).clamp_to(VIEWPORT);
        assert_eq!(applied, FrameSize::new(1004.0, 718.0));
    }

    #[test]
    fn tiny_viewport_floors_at_zero_pixels() {
        let applied = FrameSize::UNBOUNDED.clamp_to(Viewport::new(10.0, 30.0));
        assert_eq!(applied.to_css_pixels(), (0, 0));
    }

    #[test]
    fn pixel_conversion_rounds_to_nearest() {
        assert_eq!(FrameSize::new(300.4, 199.5).to_css_pixels(), (300, 200));
    }

    #[test]
    fn negative_request_floors_at_zero_pixels() {
        let applied = FrameSize::new(-50.0, -1.0).clamp_to(VIEWPORT);
        assert_eq!(applied.to_css_pixels(), (0, 0));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamped_size_never_exceeds_the_viewport_bounds(
                req_w in -1.0e6f64..1.0e6,
                req_h in -1.0e6f64..1.0e6,
                vp_w in 100.0f64..10_000.0,
                vp_h in 100.0f64..10_000.0,
            ) {
                let applied = FrameSize::new(req_w, req_h)
                    .clamp_to(Viewport::new(vp_w, vp_h));
                prop_assert!(applied.width <= vp_w - HORIZONTAL_BUFFER);
                prop_assert!(applied.height <= vp_h - VERTICAL_BUFFER);
            }

            #[test]
            fn fitting_requests_pass_through_unchanged(
                req_w in 0.0f64..80.0,
                req_h in 0.0f64..50.0,
                vp_w in 100.0f64..10_000.0,
                vp_h in 100.0f64..10_000.0,
            ) {
                let applied = FrameSize::new(req_w, req_h)
                    .clamp_to(Viewport::new(vp_w, vp_h));
                prop_assert_eq!(applied, FrameSize::new(req_w, req_h));
            }
        }
    }
}
