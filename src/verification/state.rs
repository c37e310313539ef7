//! Persisted surface state.
//!
//! One state file per surface: the ordered verdict entries plus the creator
//! identity where the surface records one. Encoded as MessagePack.

use crate::error::{Error, Result};
use crate::surface::{Address, SurfaceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Everything a surface persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceState {
    /// Surface the state belongs to.
    pub surface: SurfaceKind,
    /// Creator identity, for surfaces that record one.
    pub admin: Option<Address>,
    /// Cached verdicts in insertion order.
    pub entries: Vec<(String, String)>,
}

impl SurfaceState {
    /// Encode the state.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self).map_err(|e| Error::State(e.to_string()))
    }

    /// Decode a state.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoded state.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::State(e.to_string()))
    }

    /// Write the state to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes()?)?;
        debug!(
            "Saved {} state ({} entries) to {}",
            self.surface,
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a state from `path`. Returns `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Ensure the state belongs to `expected`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state was saved by a different surface.
    pub fn expect_surface(&self, expected: SurfaceKind) -> Result<()> {
        if self.surface == expected {
            Ok(())
        } else {
            Err(Error::State(format!(
                "state belongs to {}, not {expected}",
                self.surface
            )))
        }
    }
}
