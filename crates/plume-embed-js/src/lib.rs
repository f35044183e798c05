//! WASM bindings for the plume editor adapter.
//!
//! The host page constructs an [`EmbeddedEditor`] with the engine's
//! constructor function and a configuration object, mounts it into a plugin
//! slot, and drives it as a controlled value widget: edits arrive through
//! `onChange`, host updates go back in through `setValue`.

mod editor;
mod types;

pub use editor::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic reporting and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = tracing::subscriber::set_global_default(Registry::default().with(wasm_layer));
}
