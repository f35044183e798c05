//! plume-embed-core: framework-free logic for the plume editor adapter.
//!
//! This crate holds the parts of the adapter that need no browser at all:
//! - `gate`: the change-dedup gate shared by both synchronization directions
//! - `theme`: host theme tokens and their CSS class mapping
//! - `error`: classification of failures at the engine boundary
//!
//! Everything here compiles and tests natively; the DOM layer lives in
//! `plume-embed-browser`.

pub mod error;
pub mod gate;
pub mod theme;

pub use error::EmbedError;
pub use gate::ChangeGate;
pub use theme::{
    THEME_ATTRIBUTE, THEME_CLASSES, THEME_SOURCE_ATTRIBUTES, ThemeToken, resolve_theme_token,
};
