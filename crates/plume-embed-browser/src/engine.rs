//! Bindings for the embedded engine collaborator.
//!
//! The engine is an external, versioned JavaScript library bundled by the
//! host; nothing here assumes internals beyond its documented surface:
//! construction, the `content` accessor pair, the editor view's dispatch
//! entry point with its state-apply fallback, the root DOM node, `focus()`
//! and `destroy()`.
//!
//! The bindings are `structural`, resolved per-object rather than against a
//! linked class, so the adapter works with whatever engine build the host
//! ships. Property access that traverses JS getters/setters which may throw
//! (`content`, `props.dispatchTransaction`) goes through [`js_sys::Reflect`]
//! so failures surface as `Result` instead of unwinding through the caller.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Opaque handle to one running engine instance.
    #[derive(Clone)]
    pub type EngineInstance;

    #[wasm_bindgen(method, getter, structural)]
    pub fn dom(this: &EngineInstance) -> web_sys::HtmlElement;

    #[wasm_bindgen(method, getter, structural, js_name = editorView)]
    pub fn editor_view(this: &EngineInstance) -> EditorView;

    #[wasm_bindgen(method, structural, catch)]
    pub fn focus(this: &EngineInstance) -> Result<(), JsValue>;

    #[wasm_bindgen(method, structural, catch)]
    pub fn destroy(this: &EngineInstance) -> Result<(), JsValue>;

    /// The engine's internal view: dispatch entry point and state fallback.
    #[derive(Clone)]
    pub type EditorView;

    #[wasm_bindgen(method, getter, structural)]
    pub fn props(this: &EditorView) -> Object;

    #[wasm_bindgen(method, getter, structural)]
    pub fn state(this: &EditorView) -> EngineState;

    #[wasm_bindgen(method, structural, catch, js_name = updateState)]
    pub fn update_state(this: &EditorView, state: &EngineState) -> Result<(), JsValue>;

    /// An immutable engine document state.
    pub type EngineState;

    #[wasm_bindgen(method, structural, catch)]
    pub fn apply(this: &EngineState, tr: &EngineTransaction) -> Result<EngineState, JsValue>;

    /// An atomic proposed change to the engine's document.
    pub type EngineTransaction;

    #[wasm_bindgen(method, getter, structural, js_name = docChanged)]
    pub fn doc_changed(this: &EngineTransaction) -> bool;
}

const CONTENT_PROP: &str = "content";
const DISPATCH_PROP: &str = "dispatchTransaction";

/// Options forwarded to the engine constructor.
pub struct EngineOptions<'a> {
    pub placeholder: &'a str,
    pub image_upload: Option<ImageUploadSpec<'a>>,
}

/// Upload hook and constraints for the engine's upload subsystem.
pub struct ImageUploadSpec<'a> {
    pub handler: &'a Function,
    pub max_size_mib: Option<f64>,
    pub allowed_extensions: Option<&'a [String]>,
}

/// Construct an engine instance from the host-supplied constructor.
pub fn construct(
    constructor: &Function,
    mount: &web_sys::HtmlElement,
    initial_content: &str,
    options: &Object,
) -> Result<EngineInstance, JsValue> {
    let args = Array::of3(
        mount.as_ref(),
        &JsValue::from_str(initial_content),
        options.as_ref(),
    );
    let instance = Reflect::construct(constructor, &args)?;
    Ok(instance.unchecked_into())
}

/// Assemble the plain options object handed to the constructor.
///
/// Table syntax stays on and raw HTML stays off. When no upload handler is
/// supplied the `imageUpload` key is omitted entirely, so the engine cannot
/// fall back to a default handler.
pub fn build_options(opts: &EngineOptions<'_>) -> Result<Object, JsValue> {
    let root = Object::new();
    Reflect::set(
        &root,
        &"placeholderText".into(),
        &opts.placeholder.into(),
    )?;

    let features = Object::new();
    Reflect::set(&features, &"tables".into(), &true.into())?;
    Reflect::set(&features, &"html".into(), &false.into())?;
    Reflect::set(&root, &"parserFeatures".into(), &features)?;

    if let Some(upload) = &opts.image_upload {
        let image_upload = Object::new();
        Reflect::set(&image_upload, &"handler".into(), upload.handler.as_ref())?;
        if let Some(limit) = upload.max_size_mib {
            Reflect::set(&image_upload, &"sizeLimitMib".into(), &limit.into())?;
        }
        if let Some(extensions) = upload.allowed_extensions {
            let accepted = Array::new();
            for extension in extensions {
                accepted.push(&JsValue::from_str(extension));
            }
            Reflect::set(&image_upload, &"acceptedFileTypes".into(), &accepted)?;
        }
        Reflect::set(&root, &"imageUpload".into(), &image_upload)?;
    }

    Ok(root)
}

/// Read the engine's serialized content.
pub fn read_content(instance: &EngineInstance) -> Result<String, JsValue> {
    let value = Reflect::get(instance.as_ref(), &CONTENT_PROP.into())?;
    value
        .as_string()
        .ok_or_else(|| JsValue::from_str("engine content is not a string"))
}

/// Replace the engine's serialized content.
pub fn write_content(instance: &EngineInstance, content: &str) -> Result<(), JsValue> {
    Reflect::set(
        instance.as_ref(),
        &CONTENT_PROP.into(),
        &JsValue::from_str(content),
    )?;
    Ok(())
}

/// The previously installed dispatch handler, if the engine set one up.
pub fn current_dispatch(view: &EditorView) -> Option<Function> {
    Reflect::get(&view.props(), &DISPATCH_PROP.into())
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

/// Install `hook` as the view's dispatch entry point.
pub fn install_dispatch(view: &EditorView, hook: &Function) -> Result<(), JsValue> {
    Reflect::set(&view.props(), &DISPATCH_PROP.into(), hook.as_ref())?;
    Ok(())
}
