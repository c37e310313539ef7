//! Verification surfaces.
//!
//! Each surface owns exactly one [`VerificationCache`] and composes the
//! request builder, the oracle invoker and the cache for its own domain.
//! Write operations take `&mut self`: one writer at a time per surface, and a
//! failed oracle call leaves the cache untouched.

mod content;
mod escrow;
mod gateway;
mod review;

pub use content::ContentAuthenticityChecker;
pub use escrow::SmartEscrowOracle;
pub use gateway::SecureApiGateway;
pub use review::ProductReviewAuthenticator;

use crate::error::Result;
use crate::event::{VerificationEvent, VerificationEventsSender};
use crate::oracle::{ConsensusOracle, OracleInvoker};
use crate::verification::{
    CacheKey, CacheStats, ClassificationRequest, SurfaceState, VerificationCache,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Which verification surface a cache belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Content originality checks.
    ContentOriginality,
    /// Product review authenticity checks.
    ReviewAuthenticity,
    /// External API facts.
    ApiGateway,
    /// Escrow release conditions.
    Escrow,
}

impl SurfaceKind {
    /// Short label, also used for state file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentOriginality => "content",
            Self::ReviewAuthenticity => "reviews",
            Self::ApiGateway => "gateway",
            Self::Escrow => "escrow",
        }
    }

    /// Payload returned by reads of a key that was never written.
    #[must_use]
    pub const fn not_found(self) -> &'static str {
        match self {
            Self::ContentOriginality | Self::Escrow => r#"{"error": "Not found"}"#,
            Self::ReviewAuthenticity => r#"{"error": "Product not yet verified"}"#,
            Self::ApiGateway => r#"{"error": "No data found for this key"}"#,
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a caller, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap a host-supplied identity.
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// The identity as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request → oracle → cache round trip shared by every surface.
struct SurfaceCore {
    kind: SurfaceKind,
    cache: VerificationCache,
    invoker: OracleInvoker,
    events: Option<VerificationEventsSender>,
}

impl SurfaceCore {
    fn new(kind: SurfaceKind, oracle: Arc<dyn ConsensusOracle>) -> Self {
        Self {
            kind,
            cache: VerificationCache::new(),
            invoker: OracleInvoker::new(oracle),
            events: None,
        }
    }

    fn restore(
        kind: SurfaceKind,
        oracle: Arc<dyn ConsensusOracle>,
        state: SurfaceState,
    ) -> Result<Self> {
        state.expect_surface(kind)?;
        debug!("Restoring {kind} with {} entries", state.entries.len());
        Ok(Self {
            cache: VerificationCache::from_entries(state.entries),
            ..Self::new(kind, oracle)
        })
    }

    async fn verify(&mut self, key: CacheKey, request: ClassificationRequest) -> Result<String> {
        let key = key.to_string();
        debug!("{} check for key {key}", self.kind);

        let verdict = match self.invoker.invoke(&request).await {
            Ok(verdict) => verdict,
            Err(e) => {
                self.emit(VerificationEvent::OracleFailed {
                    surface: self.kind,
                    key,
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        let replaced = self.cache.contains(&key);
        self.cache.put(key.clone(), verdict.clone());
        info!(
            "{} verdict cached under {key}{}",
            self.kind,
            if replaced { " (replaced)" } else { "" }
        );

        self.emit(VerificationEvent::Verified {
            surface: self.kind,
            key,
            replaced,
            at: chrono::Utc::now(),
        });
        Ok(verdict)
    }

    fn emit(&self, event: VerificationEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }

    fn lookup(&self, key: &str) -> String {
        self.cache.get_or(key, self.kind.not_found()).to_string()
    }

    fn state(&self, admin: Option<Address>) -> SurfaceState {
        SurfaceState {
            surface: self.kind,
            admin,
            entries: self.cache.list_all(),
        }
    }

    fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_payloads() {
        assert_eq!(
            SurfaceKind::ContentOriginality.not_found(),
            r#"{"error": "Not found"}"#
        );
        assert_eq!(SurfaceKind::Escrow.not_found(), r#"{"error": "Not found"}"#);
        assert_eq!(
            SurfaceKind::ReviewAuthenticity.not_found(),
            r#"{"error": "Product not yet verified"}"#
        );
        assert_eq!(
            SurfaceKind::ApiGateway.not_found(),
            r#"{"error": "No data found for this key"}"#
        );
    }

    #[test]
    fn test_labels_are_distinct() {
        let labels = [
            SurfaceKind::ContentOriginality,
            SurfaceKind::ReviewAuthenticity,
            SurfaceKind::ApiGateway,
            SurfaceKind::Escrow,
        ]
        .map(SurfaceKind::as_str);
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());
    }
}
