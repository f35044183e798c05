//! EmbeddedEditor - the host-facing adapter widget.

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use plume_embed_browser::{EditorLifecycle, MountSpec, ThemeSync};

use crate::types::EditorConfig;

/// Classes on the stable root element the shell renders into the host slot.
///
/// The scope class is the marker the engine's stylesheet is rewritten under
/// at build time, so none of its global rules leak into the host page.
const ROOT_CLASSES: &str = "plume-embed-wrapper plume-embed-scope";

/// A controlled, value-based editor widget embedding the external engine.
///
/// The host owns `value`: edits are reported through `onChange` and host
/// updates are pushed back in through `setValue`, each direction suppressed
/// when it would repeat the other. No other state crosses the boundary.
#[wasm_bindgen]
pub struct EmbeddedEditor {
    lifecycle: EditorLifecycle,
    theme: Option<ThemeSync>,
    root: Option<HtmlElement>,
    constructor: Function,
    image_upload_handler: Option<Function>,
    config: EditorConfig,
    value: String,
}

#[wasm_bindgen]
impl EmbeddedEditor {
    /// Create an unmounted widget.
    ///
    /// `constructor` is the engine's constructor function; the host bundles
    /// the engine library and hands its class over, so the adapter never
    /// links against a particular engine build.
    #[wasm_bindgen(constructor)]
    pub fn new(constructor: Function, config: JsValue) -> Result<EmbeddedEditor, JsError> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
        let value = config.value.clone();

        Ok(Self {
            lifecycle: EditorLifecycle::new(),
            theme: None,
            root: None,
            constructor,
            image_upload_handler: None,
            config,
            value,
        })
    }

    // === Callbacks ===

    /// Replace the change callback. Listeners installed at mount keep
    /// working; they always invoke the latest callback.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<Function>) {
        self.lifecycle.set_on_change(callback);
    }

    /// Replace the focus callback.
    #[wasm_bindgen(js_name = setOnFocus)]
    pub fn set_on_focus(&self, callback: Option<Function>) {
        self.lifecycle.set_on_focus(callback);
    }

    /// Replace the blur callback.
    #[wasm_bindgen(js_name = setOnBlur)]
    pub fn set_on_blur(&self, callback: Option<Function>) {
        self.lifecycle.set_on_blur(callback);
    }

    /// Supply the image upload handler. Takes effect at `mount`; when absent,
    /// image upload is disabled in the engine entirely.
    #[wasm_bindgen(js_name = setImageUploadHandler)]
    pub fn set_image_upload_handler(&mut self, handler: Option<Function>) {
        self.image_upload_handler = handler;
    }

    // === Lifecycle ===

    /// Mount into the host slot.
    ///
    /// Renders one stable root element and creates the engine inside it.
    /// A second call while mounted is a no-op; there is no retry after a
    /// failed engine construction short of a full unmount/remount.
    pub fn mount(&mut self, host: &HtmlElement) -> Result<(), JsError> {
        if self.root.is_some() {
            return Ok(());
        }

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsError::new("no document"))?;
        let root: HtmlElement = document
            .create_element("div")
            .map_err(js_error)?
            .unchecked_into();
        root.set_class_name(ROOT_CLASSES);
        host.append_child(&root).map_err(js_error)?;

        let upload_config = self.config.upload_config.as_ref();
        let spec = MountSpec {
            constructor: &self.constructor,
            value: &self.value,
            placeholder: &self.config.placeholder,
            auto_focus: self.config.auto_focus,
            image_upload_handler: self.image_upload_handler.as_ref(),
            max_upload_size_mib: upload_config.and_then(|upload| upload.max_size_mib),
            allowed_upload_extensions: upload_config
                .and_then(|upload| upload.allowed_extensions.as_deref()),
        };
        self.lifecycle.mount(&root, spec).map_err(js_error)?;

        self.theme = Some(ThemeSync::observe(root.clone()).map_err(js_error)?);
        self.root = Some(root);
        Ok(())
    }

    /// Whether the widget currently has a running engine.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    /// Unmount and release everything. Safe to call at any time, including
    /// before the deferred autofocus has fired; never throws.
    pub fn unmount(&mut self) {
        self.theme.take();
        self.lifecycle.unmount();
        if let Some(root) = self.root.take() {
            root.remove();
        }
    }

    // === Controlled value ===

    /// Host-driven value update; touches the engine only when the value
    /// differs from the engine's current serialized content.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        if self.lifecycle.is_initialized() {
            self.lifecycle.sync_value(value);
        }
    }

    /// The current serialized content: engine state while mounted, otherwise
    /// the last host-supplied value.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.lifecycle
            .content()
            .unwrap_or_else(|| self.value.clone())
    }

    /// Focus the embedded engine.
    pub fn focus(&self) {
        self.lifecycle.focus();
    }
}

fn js_error(value: JsValue) -> JsError {
    JsError::new(&value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
