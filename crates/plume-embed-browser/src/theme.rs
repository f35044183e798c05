//! Host theme propagation onto the adapter root.
//!
//! The host publishes its theme through document attributes; the adapter
//! mirrors the token as a class on its root element. This runs independently
//! of the editor lifecycle: it is driven by attribute mutations, never by
//! engine events.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MutationObserver, MutationObserverInit};

use plume_embed_core::theme::{
    THEME_ATTRIBUTE, THEME_CLASSES, THEME_SOURCE_ATTRIBUTES, resolve_theme_token,
};

/// Keeps the adapter root's theme class in step with the host document.
///
/// One observer callback is registered on both the document root element and
/// the body, with `attributes: true` and a filter scoped to exactly the
/// theme-encoding attributes; there is no subtree observation. Dropping the
/// synchronizer disconnects the observer.
pub struct ThemeSync {
    observer: MutationObserver,
    // Kept alive for as long as the observer may call it.
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl ThemeSync {
    /// Apply the current host theme to `root` eagerly, then keep it updated.
    pub fn observe(root: HtmlElement) -> Result<Self, JsValue> {
        resync(&root);

        let target = root.clone();
        let callback = Closure::wrap(Box::new(
            move |_mutations: Array, _observer: MutationObserver| {
                resync(&target);
            },
        ) as Box<dyn FnMut(Array, MutationObserver)>);

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;

        let init = MutationObserverInit::new();
        init.set_attributes(true);
        let filter = Array::new();
        for attribute in THEME_SOURCE_ATTRIBUTES {
            filter.push(&JsValue::from_str(attribute));
        }
        init.set_attribute_filter(&filter);

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        if let Some(element) = document.document_element() {
            observer.observe_with_options(&element, &init)?;
        }
        if let Some(body) = document.body() {
            observer.observe_with_options(&body, &init)?;
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ThemeSync {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Recompute the root's theme class from the host document.
///
/// Idempotent: removes every known theme class, then applies the class for
/// the first non-empty theme attribute found on the document root element or
/// body, in that order.
pub fn resync(root: &HtmlElement) {
    let class_list = root.class_list();
    for class in THEME_CLASSES {
        let _ = class_list.remove_1(class);
    }

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let token = resolve_theme_token([
        document
            .document_element()
            .and_then(|element| element.get_attribute(THEME_ATTRIBUTE)),
        document
            .body()
            .and_then(|body| body.get_attribute(THEME_ATTRIBUTE)),
    ]);

    if let Some(token) = token {
        let _ = class_list.add_1(token.class());
    }
}
