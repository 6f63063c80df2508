//! Raw TOML configuration data types.
//!
//! These structs represent the exact structure of `council.toml`. Every
//! field has a default so a missing file, table, or key never fails a load.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub transcript: TranscriptConfig,
}

impl FileConfig {
    /// Render the effective configuration as TOML (for `--show-config`).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Council backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the council backend.
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001".to_string(),
        }
    }
}

/// Deliberation transcript (JSONL) settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Write one JSONL transcript per session.
    pub enabled: bool,
    /// Directory for transcript files; defaults to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8001");
        assert!(!config.transcript.enabled);
        assert!(config.transcript.dir.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [server]
            base_url = "http://council.local:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://council.local:9000");
        assert!(!config.transcript.enabled);
    }

    #[test]
    fn to_toml_includes_the_server_table() {
        let rendered = FileConfig::default().to_toml();
        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("base_url"));
    }
}
