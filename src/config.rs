//! Configuration for claimcheck.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Checker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Directory holding persisted surface state.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Oracle collaborator configuration.
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Caller identity, recorded as the creator of newly created surfaces.
    #[serde(default)]
    pub identity: Option<String>,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Oracle collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Consensus endpoint exposed by the host platform.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Upper bound on a single evaluation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl OracleConfig {
    /// Evaluation timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            oracle: OracleConfig::default(),
            identity: None,
            log_level: default_log_level(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "claimcheck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".claimcheck"))
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

impl CheckerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path of the persisted state file for a surface.
    #[must_use]
    pub fn state_path(&self, surface: crate::SurfaceKind) -> PathBuf {
        self.root_dir.join(format!("{}.state", surface.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::SurfaceKind;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: CheckerConfig = toml::from_str(
            r#"
            root_dir = "/tmp/claims"

            [oracle]
            endpoint = "http://127.0.0.1:4000/evaluate"
            "#,
        )
        .expect("parse");

        assert_eq!(config.root_dir, PathBuf::from("/tmp/claims"));
        assert_eq!(
            config.oracle.endpoint.as_deref(),
            Some("http://127.0.0.1:4000/evaluate")
        );
        assert_eq!(config.oracle.timeout(), Duration::from_secs(120));
        assert_eq!(config.log_level, "info");
        assert!(config.identity.is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("claimcheck.toml");

        let config = CheckerConfig {
            root_dir: dir.path().to_path_buf(),
            identity: Some("0xabc".to_string()),
            ..CheckerConfig::default()
        };
        config.to_file(&path).expect("write");

        let loaded = CheckerConfig::from_file(&path).expect("read");
        assert_eq!(loaded.root_dir, config.root_dir);
        assert_eq!(loaded.identity.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "root_dir = [").expect("write");

        let err = CheckerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_state_path_per_surface() {
        let config = CheckerConfig {
            root_dir: PathBuf::from("/data"),
            ..CheckerConfig::default()
        };
        assert_eq!(
            config.state_path(SurfaceKind::Escrow),
            PathBuf::from("/data/escrow.state")
        );
    }
}
