//! Configuration file loading for tether.
//!
//! Reads `tether.json` from the project root and provides typed access to all
//! settings. Falls back to defaults when the file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "tether.json";

/// Top-level tether configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetherConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Substrings that mark a callee as an HTTP call.
    #[serde(default = "default_call_targets")]
    pub call_targets: Vec<String>,
    /// Callee texts recognised as JSON serialization inside `body:`.
    #[serde(default = "default_serializers")]
    pub serializers: Vec<String>,
    #[serde(default)]
    pub enforce: EnforceConfig,
    /// Skip `MissingProperty` for declared optional properties.
    #[serde(default)]
    pub allow_missing_optional: bool,
    /// Extra globs excluded from source discovery.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

/// Toggles for each family of checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforceConfig {
    #[serde(default = "default_true")]
    pub request_bodies: bool,
    #[serde(default = "default_true")]
    pub response_bodies: bool,
    /// Report code endpoints the contract does not know about.
    #[serde(default = "default_true")]
    pub unmatched_code: bool,
    /// Report contract endpoints with no call site.
    #[serde(default = "default_true")]
    pub unmatched_contract: bool,
}

fn default_true() -> bool {
    true
}
fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_call_targets() -> Vec<String> {
    vec!["fetch".to_string()]
}
fn default_serializers() -> Vec<String> {
    vec!["JSON.stringify".to_string()]
}

impl Default for EnforceConfig {
    fn default() -> Self {
        Self {
            request_bodies: true,
            response_bodies: true,
            unmatched_code: true,
            unmatched_contract: true,
        }
    }
}

impl Default for TetherConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            call_targets: default_call_targets(),
            serializers: default_serializers(),
            enforce: EnforceConfig::default(),
            allow_missing_optional: false,
            ignore_patterns: vec![],
        }
    }
}

impl TetherConfig {
    /// Load configuration from `tether.json` inside the given directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(project_dir: &Path) -> Self {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }
}
