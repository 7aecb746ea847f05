//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Local storage configuration.
///
/// `root_path` is the single required configuration value: the directory
/// whose files are exposed over WOPI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for the served files.
    pub root_path: String,
    /// Maximum upload size in bytes (default 128 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

fn default_max_upload() -> u64 {
    134_217_728 // 128 MB
}
