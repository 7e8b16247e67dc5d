#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the popup widget.
//!
//! This module wraps the `clubpop_core` engine with JS-friendly types and
//! owns every browser callback: the page-lifetime `message` and `keypress`
//! listeners, the per-popup backdrop click and frame load listeners, and the
//! published `window.<namespace>.club` object. Only compiled on `wasm32`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use tracing::{debug, trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlIFrameElement, KeyboardEvent, MessageEvent, MouseEvent};

use clubpop_core::controller::{Directive, PopupController, RouteOutcome};
use clubpop_core::geometry::{FrameSize, Viewport};
use clubpop_core::protocol::{InitPayload, PROTOCOL_VERSION, PopupMessage, WireMessage};

use crate::config::{API_PROPERTY, EmbedConfig};
use crate::dom;
use crate::input;
use crate::{
    CLUBPOP_JS_API_LINE, CLUBPOP_JS_API_VERSION, CLUBPOP_JS_HANDLE_METHODS,
    CLUBPOP_JS_OVERLAY_EVENTS, CLUBPOP_JS_PUBLIC_METHODS, EmbedError,
};

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn js_array_from_strings(items: &[&str]) -> Array {
    let arr = Array::new_with_length(items.len() as u32);
    for (idx, item) in items.iter().enumerate() {
        arr.set(idx as u32, JsValue::from_str(item));
    }
    arr
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

/// Viewport snapshot from the live window. Zero when detached, which makes
/// clamping floor frame sizes at zero instead of guessing.
fn current_viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::new(0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width, height)
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Per-popup DOM resources. Dropping this drops the popup's own listeners.
struct PopupDom {
    overlay: HtmlElement,
    frame: HtmlIFrameElement,
    /// Live options bag shared with every handle over this popup.
    options: Object,
    _backdrop_click: Closure<dyn FnMut(MouseEvent)>,
    _frame_load: Closure<dyn FnMut(web_sys::Event)>,
}

struct Inner {
    config: EmbedConfig,
    controller: PopupController,
    popup: Option<PopupDom>,
    /// The page-lifetime listeners are `forget`-leaked and must bind at
    /// most once, even across install retries.
    listeners_bound: bool,
    installed: bool,
}

// ---------------------------------------------------------------------------
// ClubPop
// ---------------------------------------------------------------------------

/// The embed surface a host page talks to.
///
/// One instance is one widget: a single-flight popup lifecycle plus the
/// global listeners driving it. State sits behind `Rc<RefCell<_>>` because
/// browser callbacks need their own handles to it.
#[wasm_bindgen]
pub struct ClubPop {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl ClubPop {
    /// Create a widget from an optional options object
    /// (`{ url, pkey, namespace, onload, email }`).
    ///
    /// Missing keys fall back to build-time defaults; unknown keys are
    /// ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<Object>) -> Result<ClubPop, JsValue> {
        install_panic_hook();
        let config = parse_options(options.as_ref())?;
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                config,
                controller: PopupController::new(),
                popup: None,
                listeners_bound: false,
                installed: false,
            })),
        })
    }

    /// Wire the widget into the page: start the global `message` and
    /// `keypress` listeners, publish `window.<namespace>.club`, and invoke
    /// the configured onload hook. Idempotent once it has succeeded; a
    /// failed install can be retried.
    pub fn install(&self) -> Result<(), JsValue> {
        let (namespace, onload, bind_listeners) = {
            let inner = self.inner.borrow();
            if inner.installed {
                return Ok(());
            }
            (
                inner.config.namespace.clone(),
                inner.config.onload.clone(),
                !inner.listeners_bound,
            )
        };
        if bind_listeners {
            start_global_listeners(&self.inner)?;
            self.inner.borrow_mut().listeners_bound = true;
        }
        publish_host_api(&self.inner, &namespace)?;
        // Latch only now: a failed publish leaves install retryable without
        // re-binding the forgotten listeners above.
        self.inner.borrow_mut().installed = true;
        debug!(
            target: "clubpop_web::api",
            namespace = namespace.as_str(),
            "host API installed"
        );
        if let Some(hook) = onload {
            invoke_onload_hook(&hook);
        }
        Ok(())
    }

    /// Open the popup and return a handle scoped to its overlay.
    ///
    /// With a popup already showing, nothing new is mounted and the returned
    /// handle addresses the existing overlay; the trusted message origin is
    /// still re-pointed at `url`. Without an argument the configured default
    /// URL is used.
    #[wasm_bindgen(js_name = openPopup)]
    pub fn open_popup(&self, url: Option<String>) -> Result<PopupHandle, JsValue> {
        open_popup_impl(&self.inner, url)
    }

    /// Close the popup. Safe to call when none is open.
    #[wasm_bindgen(js_name = closePopup)]
    pub fn close_popup(&self) {
        close_popup_impl(&self.inner);
    }

    /// Member email lookup. Account linkage is not wired up, so this always
    /// returns `undefined`; the method exists so host snippets can feature-
    /// detect the surface ahead of time.
    #[wasm_bindgen(js_name = getMemberEmail)]
    pub fn get_member_email(&self) -> JsValue {
        JsValue::UNDEFINED
    }

    /// Stable ClubPopJS API semver for host-side compatibility checks.
    ///
    /// This is intentionally distinct from crate/package semver.
    #[wasm_bindgen(js_name = apiVersion)]
    pub fn api_version(&self) -> String {
        CLUBPOP_JS_API_VERSION.to_owned()
    }

    /// Canonical API contract snapshot for deterministic host validation.
    ///
    /// Shape:
    /// `{ apiLine, apiVersion, packageName, packageVersion, protocolVersion,
    ///    methods, handleMethods, overlayEvents }`
    #[wasm_bindgen(js_name = apiContract)]
    pub fn api_contract(&self) -> JsValue {
        let obj = Object::new();
        set_js(&obj, "apiLine", JsValue::from_str(CLUBPOP_JS_API_LINE));
        set_js(&obj, "apiVersion", JsValue::from_str(CLUBPOP_JS_API_VERSION));
        set_js(&obj, "packageName", JsValue::from_str(env!("CARGO_PKG_NAME")));
        set_js(
            &obj,
            "packageVersion",
            JsValue::from_str(env!("CARGO_PKG_VERSION")),
        );
        set_js(&obj, "protocolVersion", JsValue::from_str(PROTOCOL_VERSION));
        set_js(
            &obj,
            "methods",
            js_array_from_strings(&CLUBPOP_JS_PUBLIC_METHODS).into(),
        );
        set_js(
            &obj,
            "handleMethods",
            js_array_from_strings(&CLUBPOP_JS_HANDLE_METHODS).into(),
        );
        set_js(
            &obj,
            "overlayEvents",
            js_array_from_strings(&CLUBPOP_JS_OVERLAY_EVENTS).into(),
        );
        obj.into()
    }
}

/// With the `auto-install` feature a script-tag embed boots itself: module
/// instantiation builds a widget from the baked defaults and installs it.
#[cfg(feature = "auto-install")]
#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
    let widget = match ClubPop::new(None) {
        Ok(widget) => widget,
        Err(err) => {
            console_error(&format!("clubpop auto-install failed: {err:?}"));
            return;
        }
    };
    if let Err(err) = widget.install() {
        console_error(&format!("clubpop auto-install failed: {err:?}"));
    }
    // The forgotten listener closures keep the shared state alive; the
    // wrapper itself can drop.
}

// ---------------------------------------------------------------------------
// PopupHandle
// ---------------------------------------------------------------------------

/// Host-facing view of an open popup.
///
/// Deliberately small: event subscription on the overlay plus `close`, both
/// chainable. A handle retained past its popup's close keeps operating on
/// the detached overlay element; listeners simply never fire again.
#[wasm_bindgen]
pub struct PopupHandle {
    inner: Rc<RefCell<Inner>>,
    overlay: HtmlElement,
    options: Object,
}

impl PopupHandle {
    fn chained(&self) -> PopupHandle {
        PopupHandle {
            inner: Rc::clone(&self.inner),
            overlay: self.overlay.clone(),
            options: self.options.clone(),
        }
    }
}

#[wasm_bindgen]
impl PopupHandle {
    /// Subscribe to an overlay event: `load`, `close`, or any custom event
    /// forwarded from the frame. Returns a handle for chaining.
    pub fn on(&self, event: &str, handler: &Function) -> PopupHandle {
        if let Err(err) = self.overlay.add_event_listener_with_callback(event, handler) {
            warn!(target: "clubpop_web::api", event, error = ?err, "failed to add overlay listener");
        }
        self.chained()
    }

    /// Close the popup. Returns a handle for chaining.
    pub fn close(&self) -> PopupHandle {
        close_popup_impl(&self.inner);
        self.chained()
    }

    /// Raw `addEventListener` passthrough to the overlay element.
    #[wasm_bindgen(js_name = addEventListener)]
    pub fn add_event_listener(&self, event: &str, handler: &Function) {
        if let Err(err) = self.overlay.add_event_listener_with_callback(event, handler) {
            warn!(target: "clubpop_web::api", event, error = ?err, "failed to add overlay listener");
        }
    }

    /// Raw `removeEventListener` passthrough to the overlay element.
    #[wasm_bindgen(js_name = removeEventListener)]
    pub fn remove_event_listener(&self, event: &str, handler: &Function) {
        if let Err(err) = self
            .overlay
            .remove_event_listener_with_callback(event, handler)
        {
            warn!(target: "clubpop_web::api", event, error = ?err, "failed to remove overlay listener");
        }
    }

    /// Mutable options bag shared with the widget. Setting `options.email`
    /// before the frame reports ready changes what the `init` handshake
    /// carries.
    #[wasm_bindgen(getter)]
    pub fn options(&self) -> Object {
        self.options.clone()
    }
}

// ---------------------------------------------------------------------------
// Lifecycle plumbing
// ---------------------------------------------------------------------------

fn parse_options(options: Option<&Object>) -> Result<EmbedConfig, JsValue> {
    let Some(options) = options else {
        return Ok(EmbedConfig::default());
    };
    // Through the browser's JSON serializer: functions and undefined values
    // drop out, leaving exactly the plain-data keys the config knows.
    let text = js_sys::JSON::stringify(options)
        .ok()
        .and_then(|t| t.as_string())
        .ok_or_else(|| JsValue::from(EmbedError::InvalidOptions("not serializable".into())))?;
    EmbedConfig::from_json_str(&text)
        .map_err(|e| JsValue::from(EmbedError::InvalidOptions(e.to_string())))
}

fn open_popup_impl(
    inner_rc: &Rc<RefCell<Inner>>,
    url: Option<String>,
) -> Result<PopupHandle, JsValue> {
    let directives = {
        let mut inner = inner_rc.borrow_mut();
        let Some(url) = url.or_else(|| inner.config.url.clone()) else {
            return Err(EmbedError::NoUrlConfigured.into());
        };
        inner.controller.set_viewport(current_viewport());
        inner
            .controller
            .open(&url)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    apply_directives(inner_rc, directives)?;

    let inner = inner_rc.borrow();
    let Some(popup) = inner.popup.as_ref() else {
        return Err(JsValue::from_str("popup state desynced during open"));
    };
    Ok(PopupHandle {
        inner: Rc::clone(inner_rc),
        overlay: popup.overlay.clone(),
        options: popup.options.clone(),
    })
}

fn close_popup_impl(inner_rc: &Rc<RefCell<Inner>>) {
    let directives = inner_rc.borrow_mut().controller.close();
    if directives.is_empty() {
        return;
    }
    if let Err(err) = apply_directives(inner_rc, directives) {
        warn!(target: "clubpop_web::dom", error = ?err, "close failed");
    }
}

/// Apply controller directives in order.
///
/// Overlay events dispatch synchronously into host listeners, which may call
/// straight back into the widget. No `RefCell` borrow is held across a
/// dispatch, and the controller transitions state before issuing directives,
/// so re-entrant calls observe settled state.
fn apply_directives(
    inner_rc: &Rc<RefCell<Inner>>,
    directives: Vec<Directive>,
) -> Result<(), JsValue> {
    for directive in directives {
        apply_directive(inner_rc, directive)?;
    }
    Ok(())
}

fn apply_directive(inner_rc: &Rc<RefCell<Inner>>, directive: Directive) -> Result<(), JsValue> {
    match directive {
        Directive::MountOverlay { url, initial_size } => {
            mount_popup(inner_rc, &url, initial_size)
        }
        Directive::PostInit { target_origin } => post_init(inner_rc, &target_origin),
        Directive::EmitOverlayEvent(event) => {
            let overlay = inner_rc.borrow().popup.as_ref().map(|p| p.overlay.clone());
            if let Some(overlay) = overlay {
                dom::dispatch_overlay_event(&overlay, &event)?;
                trace!(
                    target: "clubpop_web::dom",
                    event = event.name(),
                    "dispatched overlay event"
                );
            }
            Ok(())
        }
        Directive::ApplyFrameSize(size) => {
            if let Some(popup) = inner_rc.borrow().popup.as_ref() {
                dom::set_frame_size(&popup.frame, size);
            }
            Ok(())
        }
        Directive::RevealFrame => {
            if let Some(popup) = inner_rc.borrow().popup.as_ref() {
                dom::reveal_frame(&popup.frame)?;
            }
            Ok(())
        }
        Directive::UnmountOverlay => {
            let popup = {
                let mut inner = inner_rc.borrow_mut();
                if inner.controller.is_open() {
                    // A close listener reopened synchronously; the new popup
                    // owns the slot now.
                    None
                } else {
                    inner.popup.take()
                }
            };
            if let Some(popup) = popup {
                dom::remove_overlay(&popup.overlay);
                trace!(target: "clubpop_web::dom", "overlay unmounted");
            }
            Ok(())
        }
    }
}

fn mount_popup(
    inner_rc: &Rc<RefCell<Inner>>,
    url: &str,
    initial_size: FrameSize,
) -> Result<(), JsValue> {
    let document = dom::document()?;
    let overlay = dom::build_overlay(&document)?;
    let frame = dom::build_frame(&document, url, initial_size)?;

    // Close when the backdrop itself is clicked. Clicks inside the popup hit
    // the frame element, so the overlay is never their target.
    let backdrop_click = {
        let inner_rc = Rc::clone(inner_rc);
        let overlay_target: JsValue = overlay.clone().into();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let target = event
                .target()
                .map(JsValue::from)
                .unwrap_or(JsValue::UNDEFINED);
            if target != overlay_target {
                return;
            }
            trace!(target: "clubpop_web::dom", "backdrop click closes the popup");
            close_popup_impl(&inner_rc);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    overlay.add_event_listener_with_callback("click", backdrop_click.as_ref().unchecked_ref())?;

    // The frame's native load event is not the signal hosts care about; the
    // overlay's load event fires on the first resize handshake instead.
    let frame_load = Closure::wrap(Box::new(move |event: web_sys::Event| {
        event.stop_propagation();
    }) as Box<dyn FnMut(web_sys::Event)>);
    frame.add_event_listener_with_callback("load", frame_load.as_ref().unchecked_ref())?;

    overlay.append_child(&frame)?;
    dom::attach_to_body(&document, &overlay)?;

    let options = Object::new();
    let mut inner = inner_rc.borrow_mut();
    if let Some(email) = &inner.config.email {
        set_js(&options, "email", JsValue::from_str(email));
    }
    if let Some(stale) = inner.popup.take() {
        // Only reachable when a close listener reopened before the unmount
        // directive ran; the superseded overlay goes now.
        dom::remove_overlay(&stale.overlay);
    }
    inner.popup = Some(PopupDom {
        overlay,
        frame,
        options,
        _backdrop_click: backdrop_click,
        _frame_load: frame_load,
    });
    debug!(target: "clubpop_web::dom", url, "popup mounted");
    Ok(())
}

fn post_init(inner_rc: &Rc<RefCell<Inner>>, target_origin: &str) -> Result<(), JsValue> {
    let (frame, payload) = {
        let inner = inner_rc.borrow();
        let Some(popup) = inner.popup.as_ref() else {
            return Ok(());
        };
        let payload = InitPayload {
            pkey: inner.config.pkey.clone(),
            email: options_email(&popup.options),
        };
        (popup.frame.clone(), payload)
    };
    let Some(content) = frame.content_window() else {
        warn!(target: "clubpop_web::router", "frame has no content window for init");
        return Ok(());
    };
    let envelope = WireMessage::init(&payload);
    let text = envelope
        .to_json_string()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let message = js_sys::JSON::parse(&text)?;
    content.post_message(&message, target_origin)?;
    trace!(
        target: "clubpop_web::router",
        target_origin,
        has_email = payload.email.is_some(),
        "posted init handshake"
    );
    Ok(())
}

/// Read `options.email` as it is *now*; hosts may set it after opening.
fn options_email(options: &Object) -> Option<String> {
    let value = Reflect::get(options, &JsValue::from_str("email")).ok()?;
    value.as_string()
}

// ---------------------------------------------------------------------------
// Global listeners and host API
// ---------------------------------------------------------------------------

/// Install the page-lifetime listeners. `Closure::forget` leaks them: they
/// must live as long as the page does.
fn start_global_listeners(inner_rc: &Rc<RefCell<Inner>>) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    let on_message = {
        let inner_rc = Rc::clone(inner_rc);
        Closure::wrap(Box::new(move |event: MessageEvent| {
            route_message(&inner_rc, &event);
        }) as Box<dyn FnMut(MessageEvent)>)
    };
    window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())?;
    on_message.forget();

    let on_keypress = {
        let inner_rc = Rc::clone(inner_rc);
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if !input::is_escape(&event.key(), event.key_code()) {
                return;
            }
            trace!(target: "clubpop_web::dom", "escape closes the popup");
            close_popup_impl(&inner_rc);
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    document.add_event_listener_with_callback("keypress", on_keypress.as_ref().unchecked_ref())?;
    on_keypress.forget();
    Ok(())
}

/// Route one `message` event: pin the sender to the popup frame's window,
/// decode, and hand the result to the controller. Every rejection is a
/// logged drop, never an exception into the page.
fn route_message(inner_rc: &Rc<RefCell<Inner>>, event: &MessageEvent) {
    let frame_window = {
        let inner = inner_rc.borrow();
        let Some(popup) = inner.popup.as_ref() else {
            return;
        };
        popup.frame.content_window()
    };
    let Some(frame_window) = frame_window else {
        return;
    };
    let source =
        Reflect::get(event.as_ref(), &JsValue::from_str("source")).unwrap_or(JsValue::UNDEFINED);
    if source != JsValue::from(frame_window) {
        trace!(target: "clubpop_web::router", "dropping message from foreign source window");
        return;
    }

    let origin = event.origin();
    // `stringify` can also yield `undefined` (undefined data, hostile
    // `toJSON`); `as_string` turns both failure shapes into one drop.
    let Some(text) = js_sys::JSON::stringify(&event.data())
        .ok()
        .and_then(|t| t.as_string())
    else {
        debug!(
            target: "clubpop_web::router",
            origin = origin.as_str(),
            "dropping unserializable message data"
        );
        return;
    };
    let message = match PopupMessage::from_json_str(&text) {
        Ok(message) => message,
        Err(err) => {
            debug!(
                target: "clubpop_web::router",
                origin = origin.as_str(),
                error = %err,
                "dropping malformed message"
            );
            return;
        }
    };

    let outcome = {
        let mut inner = inner_rc.borrow_mut();
        inner.controller.set_viewport(current_viewport());
        inner.controller.handle_message(&origin, message)
    };
    match outcome {
        RouteOutcome::Handled(directives) => {
            if let Err(err) = apply_directives(inner_rc, directives) {
                warn!(
                    target: "clubpop_web::router",
                    error = ?err,
                    "failed applying message directives"
                );
            }
        }
        RouteOutcome::DroppedClosed => {
            trace!(
                target: "clubpop_web::router",
                origin = origin.as_str(),
                "dropping message, no popup open"
            );
        }
        RouteOutcome::DroppedOrigin => {
            warn!(
                target: "clubpop_web::router",
                origin = origin.as_str(),
                "dropping message from unexpected origin"
            );
        }
    }
}

/// Publish `window.<namespace>.club = { openPopup, getMemberEmail }`, the
/// script-tag surface. Richer hosts keep the [`ClubPop`] instance instead.
fn publish_host_api(inner_rc: &Rc<RefCell<Inner>>, namespace: &str) -> Result<(), JsValue> {
    let window = dom::window()?;
    let key = JsValue::from_str(namespace);
    let existing = Reflect::get(window.as_ref(), &key)?;
    let namespace_obj = if existing.is_undefined() || existing.is_null() {
        let fresh = Object::new();
        Reflect::set(window.as_ref(), &key, &fresh)?;
        fresh
    } else {
        existing
            .dyn_into::<Object>()
            .map_err(|_| JsValue::from(EmbedError::NamespaceNotObject(namespace.to_owned())))?
    };

    let api = Object::new();
    let open = {
        let inner_rc = Rc::clone(inner_rc);
        Closure::wrap(Box::new(move |url: JsValue| -> JsValue {
            // Script-tag callers have no use for exceptions; log and return
            // undefined instead.
            match open_popup_impl(&inner_rc, url.as_string()) {
                Ok(handle) => handle.into(),
                Err(err) => {
                    warn!(target: "clubpop_web::api", error = ?err, "openPopup failed");
                    JsValue::UNDEFINED
                }
            }
        }) as Box<dyn FnMut(JsValue) -> JsValue>)
    };
    Reflect::set(&api, &JsValue::from_str("openPopup"), open.as_ref())?;
    open.forget();

    let get_email =
        Closure::wrap(Box::new(|| JsValue::UNDEFINED) as Box<dyn FnMut() -> JsValue>);
    Reflect::set(&api, &JsValue::from_str("getMemberEmail"), get_email.as_ref())?;
    get_email.forget();

    Reflect::set(&namespace_obj, &JsValue::from_str(API_PROPERTY), &api)?;
    Ok(())
}

/// Invoke the configured global onload hook, if the page defined one.
fn invoke_onload_hook(name: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(hook) = Reflect::get(window.as_ref(), &JsValue::from_str(name)) else {
        return;
    };
    match hook.dyn_ref::<Function>() {
        Some(function) => {
            if let Err(err) = function.call0(&JsValue::UNDEFINED) {
                warn!(
                    target: "clubpop_web::api",
                    hook = name,
                    error = ?err,
                    "onload hook threw"
                );
            }
        }
        None => {
            debug!(target: "clubpop_web::api", hook = name, "onload hook is not a function");
        }
    }
}
