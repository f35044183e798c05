//! Browser DOM layer for the plume editor adapter.
//!
//! This crate owns everything that touches the DOM or the external engine.
//! It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `engine`: structural bindings for the opaque engine collaborator
//! - `lifecycle`: engine creation, dispatch interception, focus bridging,
//!   controlled-value sync, ordered teardown
//! - `theme`: host theme propagation onto the adapter root
//!
//! # Re-exports
//!
//! This crate re-exports `plume-embed-core` for convenience, so consumers
//! only need to depend on `plume-embed-browser`.

// Re-export core crate
pub use plume_embed_core;
pub use plume_embed_core::*;

pub mod engine;
pub mod lifecycle;
pub mod theme;

pub use engine::{EditorView, EngineInstance, EngineOptions, EngineTransaction, ImageUploadSpec};
pub use lifecycle::{CallbackCell, EditorLifecycle, MountSpec};
pub use theme::ThemeSync;
