#![forbid(unsafe_code)]

//! DOM construction and mutation for the overlay/frame pair.
//!
//! Only compiled on `wasm32`. Everything here executes directives decided by
//! `clubpop_core`; no lifecycle logic lives at this layer.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, HtmlElement, HtmlIFrameElement, Window};

use clubpop_core::events::OverlayEvent;
use clubpop_core::geometry::FrameSize;

use crate::EmbedError;
use crate::style;

pub(crate) fn window() -> Result<Window, EmbedError> {
    web_sys::window().ok_or(EmbedError::NoWindow)
}

pub(crate) fn document() -> Result<Document, EmbedError> {
    window()?.document().ok_or(EmbedError::NoDocument)
}

/// Build the full-viewport overlay element.
pub(crate) fn build_overlay(document: &Document) -> Result<HtmlElement, JsValue> {
    let overlay: HtmlElement = document.create_element("div")?.dyn_into()?;
    for (name, value) in style::overlay_attributes() {
        overlay.set_attribute(name, value)?;
    }
    apply_styles(&overlay, &style::overlay_style())?;
    Ok(overlay)
}

/// Build the popup frame pointed at `url`, pre-sized but still hidden.
pub(crate) fn build_frame(
    document: &Document,
    url: &str,
    initial_size: FrameSize,
) -> Result<HtmlIFrameElement, JsValue> {
    let frame: HtmlIFrameElement = document.create_element("iframe")?.dyn_into()?;
    frame.set_src(url);
    for (name, value) in style::frame_attributes() {
        frame.set_attribute(name, value)?;
    }
    apply_styles(&frame, &style::frame_style())?;
    set_frame_size(&frame, initial_size);
    Ok(frame)
}

/// Attach the overlay to the document body.
pub(crate) fn attach_to_body(document: &Document, overlay: &HtmlElement) -> Result<(), JsValue> {
    let body = document.body().ok_or(EmbedError::NoBody)?;
    body.append_child(overlay)?;
    Ok(())
}

/// Detach the overlay, tolerating listeners that already removed it.
pub(crate) fn remove_overlay(overlay: &HtmlElement) {
    if let Some(parent) = overlay.parent_node() {
        let _ = parent.remove_child(overlay);
    }
}

pub(crate) fn apply_styles(element: &HtmlElement, pairs: &[(&str, &str)]) -> Result<(), JsValue> {
    let declaration = element.style();
    for (name, value) in pairs {
        declaration.set_property(name, value)?;
    }
    Ok(())
}

/// Apply an already-clamped size to the frame's dimension attributes.
pub(crate) fn set_frame_size(frame: &HtmlIFrameElement, size: FrameSize) {
    let (width, height) = size.to_css_pixels();
    frame.set_width(&width.to_string());
    frame.set_height(&height.to_string());
}

pub(crate) fn reveal_frame(frame: &HtmlIFrameElement) -> Result<(), JsValue> {
    let (name, value) = style::FRAME_VISIBLE;
    frame.style().set_property(name, value)
}

/// Dispatch an overlay event for host listeners.
///
/// Object payload members are mixed onto the dispatched event itself, so a
/// listener for a forwarded `{"event":"purchase","payload":{"sku":...}}`
/// reads `event.sku` directly.
pub(crate) fn dispatch_overlay_event(
    overlay: &HtmlElement,
    event: &OverlayEvent,
) -> Result<(), JsValue> {
    let dom_event = CustomEvent::new(event.name())?;
    if let Some(serde_json::Value::Object(members)) = event.payload() {
        for (key, value) in members {
            let _ = Reflect::set(
                dom_event.as_ref(),
                &JsValue::from_str(key),
                &json_to_js(value),
            );
        }
    }
    overlay.dispatch_event(&dom_event)?;
    Ok(())
}

/// Lossy JSON to JS conversion for payload mixing. Compound values go
/// through the browser's JSON parser; anything unrepresentable becomes
/// `null`.
fn json_to_js(value: &serde_json::Value) -> JsValue {
    use serde_json::Value;
    match value {
        Value::Null => JsValue::NULL,
        Value::Bool(flag) => JsValue::from_bool(*flag),
        Value::Number(number) => number.as_f64().map_or(JsValue::NULL, JsValue::from_f64),
        Value::String(text) => JsValue::from_str(text),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)
            .ok()
            .and_then(|text| js_sys::JSON::parse(&text).ok())
            .unwrap_or(JsValue::NULL),
    }
}
