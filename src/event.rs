//! Verification event system.

use crate::surface::SurfaceKind;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

/// Events emitted by verification surfaces.
#[derive(Debug, Clone)]
pub enum VerificationEvent {
    /// A verdict was cached.
    Verified {
        /// Surface that ran the check.
        surface: SurfaceKind,
        /// Derived cache key.
        key: String,
        /// Whether an earlier verdict under the same key was overwritten.
        replaced: bool,
        /// When the verdict was stored.
        at: DateTime<Utc>,
    },

    /// The oracle failed; the cache was left untouched.
    OracleFailed {
        /// Surface that ran the check.
        surface: SurfaceKind,
        /// Key the verdict would have been stored under.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Channel for receiving verification events.
pub type VerificationEventsChannel = broadcast::Receiver<VerificationEvent>;

/// Sender for verification events.
pub type VerificationEventsSender = broadcast::Sender<VerificationEvent>;

/// Create a new event channel pair.
#[must_use]
pub fn create_event_channel() -> (VerificationEventsSender, VerificationEventsChannel) {
    broadcast::channel(256)
}
