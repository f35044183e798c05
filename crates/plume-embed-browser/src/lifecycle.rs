//! Engine lifecycle: creation, dispatch interception, focus bridging,
//! controlled-value sync, and ordered teardown.
//!
//! One [`EditorLifecycle`] owns at most one engine instance. Creation runs
//! once per mount cycle behind a re-entrancy guard; teardown reverses the
//! creation order exactly (timer, listeners, engine, dispatch hook, mount
//! element) and never throws. Every operation that touches the engine is
//! fallible and logged on failure, so nothing unwinds into the host page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use plume_embed_core::{ChangeGate, EmbedError};

use crate::engine::{self, EngineInstance, EngineOptions, EngineTransaction, ImageUploadSpec};

/// Delay before the deferred autofocus fires, leaving the engine's internal
/// view time to finish mounting.
const AUTOFOCUS_DELAY_MS: u32 = 100;

/// Class on the dedicated element the engine mounts into.
pub const CONTAINER_CLASS: &str = "plume-embed-container";

const CONTAINER_MIN_HEIGHT: &str = "320px";

/// Holds the most recently supplied host callback.
///
/// Long-lived listeners capture the cell, never the function, so a host that
/// swaps callback identities on every re-render keeps the listeners installed
/// at mount and still gets its current callback invoked.
#[derive(Clone, Default)]
pub struct CallbackCell {
    inner: Rc<RefCell<Option<Function>>>,
}

impl CallbackCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, callback: Option<Function>) {
        *self.inner.borrow_mut() = callback;
    }

    /// Invoke with no arguments. Callback exceptions are logged, not rethrown.
    pub fn call0(&self) {
        // Clone out first: the callback may re-enter and replace itself.
        let callback = self.inner.borrow().clone();
        if let Some(callback) = callback {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                tracing::warn!("host callback threw: {:?}", e);
            }
        }
    }

    /// Invoke with one string argument. Exceptions are logged, not rethrown.
    pub fn call1(&self, arg: &str) {
        let callback = self.inner.borrow().clone();
        if let Some(callback) = callback {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(arg)) {
                tracing::warn!("host callback threw: {:?}", e);
            }
        }
    }
}

/// Everything the lifecycle manager needs to create the engine.
pub struct MountSpec<'a> {
    /// The engine constructor, supplied by the host.
    pub constructor: &'a Function,
    /// Initial serialized content.
    pub value: &'a str,
    /// Resolved placeholder text.
    pub placeholder: &'a str,
    pub auto_focus: bool,
    /// Upload hook; image upload is disabled in the engine when absent.
    pub image_upload_handler: Option<&'a Function>,
    pub max_upload_size_mib: Option<f64>,
    pub allowed_upload_extensions: Option<&'a [String]>,
}

/// Owns one embedded engine instance and its attendant resources.
pub struct EditorLifecycle {
    initialized: bool,
    engine: Option<EngineInstance>,
    container: Option<HtmlElement>,
    gate: Rc<RefCell<ChangeGate>>,
    on_change: CallbackCell,
    on_focus: CallbackCell,
    on_blur: CallbackCell,
    focus_listener: Option<EventListener>,
    blur_listener: Option<EventListener>,
    dispatch_hook: Option<Closure<dyn FnMut(JsValue)>>,
    autofocus: Option<Timeout>,
}

impl Default for EditorLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorLifecycle {
    pub fn new() -> Self {
        Self {
            initialized: false,
            engine: None,
            container: None,
            gate: Rc::new(RefCell::new(ChangeGate::new())),
            on_change: CallbackCell::new(),
            on_focus: CallbackCell::new(),
            on_blur: CallbackCell::new(),
            focus_listener: None,
            blur_listener: None,
            dispatch_hook: None,
            autofocus: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_on_change(&self, callback: Option<Function>) {
        self.on_change.set(callback);
    }

    pub fn set_on_focus(&self, callback: Option<Function>) {
        self.on_focus.set(callback);
    }

    pub fn set_on_blur(&self, callback: Option<Function>) {
        self.on_blur.set(callback);
    }

    /// Create the engine inside `host`.
    ///
    /// Runs at most once per mount cycle; a second call while initialized is
    /// a no-op. A throwing engine constructor is logged and leaves an empty
    /// mount element behind, with the guard unset and no retry.
    pub fn mount(&mut self, host: &HtmlElement, spec: MountSpec<'_>) -> Result<(), JsValue> {
        if self.initialized {
            return Ok(());
        }

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let container: HtmlElement = document.create_element("div")?.unchecked_into();
        container.set_class_name(CONTAINER_CLASS);
        container
            .style()
            .set_property("min-height", CONTAINER_MIN_HEIGHT)?;
        host.append_child(&container)?;
        self.container = Some(container.clone());

        let options = engine::build_options(&EngineOptions {
            placeholder: spec.placeholder,
            image_upload: spec.image_upload_handler.map(|handler| ImageUploadSpec {
                handler,
                max_size_mib: spec.max_upload_size_mib,
                allowed_extensions: spec.allowed_upload_extensions,
            }),
        })?;

        let instance = match engine::construct(spec.constructor, &container, spec.value, &options)
        {
            Ok(instance) => instance,
            Err(e) => {
                // Degrade to an empty shell; the container stays so the slot
                // keeps its footprint.
                tracing::error!("{}", EmbedError::Construction(describe_js(&e)));
                return Ok(());
            }
        };

        // Seed before the dispatch hook can observe anything, so an engine
        // that replays its initial state does not notify.
        self.gate.borrow_mut().record(spec.value);

        self.install_dispatch_hook(&instance)?;
        self.attach_focus_listeners(&instance);

        if spec.auto_focus {
            let engine = instance.clone();
            self.autofocus = Some(Timeout::new(AUTOFOCUS_DELAY_MS, move || {
                if let Err(e) = engine.focus() {
                    tracing::warn!("autofocus failed: {:?}", e);
                }
            }));
        }

        self.engine = Some(instance);
        self.initialized = true;
        Ok(())
    }

    /// Tear down in the reverse of creation order. Never throws.
    pub fn unmount(&mut self) {
        // Dropping an unfired Timeout cancels it.
        self.autofocus.take();
        self.focus_listener.take();
        self.blur_listener.take();

        if let Some(engine) = self.engine.take() {
            if let Err(e) = engine.destroy() {
                tracing::error!("{}", EmbedError::Teardown(describe_js(&e)));
            }
        }
        // The engine is gone; nothing can call the hook now.
        self.dispatch_hook.take();

        if let Some(container) = self.container.take() {
            container.remove();
        }
        self.initialized = false;
    }

    /// Push a host-supplied value into the engine.
    ///
    /// Writes only when the engine's current serialized content differs;
    /// an equal value leaves the engine's document and selection untouched.
    pub fn sync_value(&self, value: &str) {
        let Some(engine) = &self.engine else {
            return;
        };
        match engine::read_content(engine) {
            Ok(current) if current == value => {}
            Ok(_) => {
                if let Err(e) = engine::write_content(engine, value) {
                    tracing::warn!("{}", EmbedError::ContentSync(describe_js(&e)));
                    return;
                }
                self.gate.borrow_mut().record(value);
            }
            Err(e) => {
                tracing::warn!("{}", EmbedError::ContentSync(describe_js(&e)));
            }
        }
    }

    /// The engine's current serialized content, when running and readable.
    pub fn content(&self) -> Option<String> {
        let engine = self.engine.as_ref()?;
        match engine::read_content(engine) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("{}", EmbedError::ContentSync(describe_js(&e)));
                None
            }
        }
    }

    pub fn focus(&self) {
        if let Some(engine) = &self.engine {
            if let Err(e) = engine.focus() {
                tracing::warn!("engine focus failed: {:?}", e);
            }
        }
    }

    /// Replace the view's dispatch entry point with the observing wrapper.
    ///
    /// The wrapper always performs the default state application first (the
    /// previously installed dispatch, or `state.apply` + `updateState` when
    /// none existed), then feeds document-changing transactions through the
    /// dedup gate to the current `onChange` callback.
    fn install_dispatch_hook(&mut self, instance: &EngineInstance) -> Result<(), JsValue> {
        let view = instance.editor_view();
        let original = engine::current_dispatch(&view);
        let gate = Rc::clone(&self.gate);
        let on_change = self.on_change.clone();
        let engine_handle = instance.clone();
        let view_handle = view.clone();

        let hook = Closure::wrap(Box::new(move |tr: JsValue| {
            if let Some(original) = &original {
                if let Err(e) = original.call1(view_handle.as_ref(), &tr) {
                    tracing::warn!("engine dispatch threw: {:?}", e);
                }
            } else {
                match view_handle.state().apply(tr.unchecked_ref()) {
                    Ok(next) => {
                        if let Err(e) = view_handle.update_state(&next) {
                            tracing::warn!("engine state update threw: {:?}", e);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("engine state apply threw: {:?}", e);
                    }
                }
            }

            let transaction: &EngineTransaction = tr.unchecked_ref();
            if !transaction.doc_changed() {
                return;
            }
            match engine::read_content(&engine_handle) {
                Ok(content) => {
                    // Release the gate borrow before the callback runs; the
                    // host may synchronously set a value back.
                    let admitted = gate.borrow_mut().admit(&content);
                    if admitted {
                        on_change.call1(&content);
                    }
                }
                Err(e) => {
                    tracing::warn!("{}", EmbedError::ContentSync(describe_js(&e)));
                }
            }
        }) as Box<dyn FnMut(JsValue)>);

        engine::install_dispatch(&view, hook.as_ref().unchecked_ref())?;
        self.dispatch_hook = Some(hook);
        Ok(())
    }

    /// Capturing focus/blur listeners on the engine's root DOM node.
    fn attach_focus_listeners(&mut self, instance: &EngineInstance) {
        let target = web_sys::EventTarget::from(instance.dom());

        let on_focus = self.on_focus.clone();
        self.focus_listener = Some(EventListener::new_with_options(
            &target,
            "focus",
            EventListenerOptions::run_in_capture_phase(),
            move |_event| on_focus.call0(),
        ));

        let on_blur = self.on_blur.clone();
        self.blur_listener = Some(EventListener::new_with_options(
            &target,
            "blur",
            EventListenerOptions::run_in_capture_phase(),
            move |_event| on_blur.call0(),
        ));
    }
}

fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
