//! Run log configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// # Example
///
/// ```toml
/// [logging]
/// run_log = "~/.local/share/multilingual-assistant/runs.jsonl"   # empty = disabled
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL run log
    pub run_log: String,
}

impl FileLoggingConfig {
    /// Resolved run log path, `None` when disabled.
    ///
    /// A leading `~/` expands to the home directory.
    pub fn run_log_path(&self) -> Option<PathBuf> {
        let raw = self.run_log.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(rest) = raw.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return Some(home.join(rest));
        }
        Some(PathBuf::from(raw))
    }
}
