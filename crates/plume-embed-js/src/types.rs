//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

/// Host-facing adapter configuration, plain-data part.
///
/// Callbacks, the upload handler, and the engine constructor cross the
/// boundary as functions instead; their identities may change on any host
/// re-render without remounting the widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Initial serialized content; the host owns this value.
    pub value: String,
    /// Placeholder text shown by the engine when the document is empty.
    pub placeholder: String,
    /// Schedule a deferred focus once the engine's view has mounted.
    pub auto_focus: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_config: Option<UploadConfig>,
}

/// Constraints forwarded to the engine's upload subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadConfig {
    #[serde(rename = "maxSizeMiB", skip_serializing_if = "Option::is_none")]
    pub max_size_mib: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
}
