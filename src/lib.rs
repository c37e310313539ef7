//! # claimcheck
//!
//! Oracle-backed verification contracts with a key-addressed verdict cache.
//!
//! Each verification surface turns typed caller input into a classification
//! request, submits it to an external equivalence-consensus oracle, and caches
//! the agreed verdict under a key derived from the kind of check and its
//! subject.
//!
//! ```text
//! write op ──► ClassificationRequest ──► OracleInvoker ──► VerificationCache
//!                                            │                   ▲
//!                                     ConsensusOracle            │
//!                                                           read ops
//! ```
//!
//! Surfaces:
//! - [`ContentAuthenticityChecker`]: article, repository and free-text originality
//! - [`ProductReviewAuthenticator`]: fake-review detection for product pages
//! - [`SecureApiGateway`]: weather, crypto price and news sentiment facts
//! - [`SmartEscrowOracle`]: GitHub PR/issue state and webpage text milestones

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod event;
pub mod oracle;
pub mod surface;
pub mod verification;

pub use config::{CheckerConfig, OracleConfig};
pub use error::{Error, Result};
pub use event::{create_event_channel, VerificationEvent};
pub use oracle::{ConsensusOracle, HttpOracle, OracleInvoker};
pub use surface::{
    Address, ContentAuthenticityChecker, ProductReviewAuthenticator, SecureApiGateway,
    SmartEscrowOracle, SurfaceKind,
};
pub use verification::{
    CacheKey, CheckKind, ClassificationRequest, FormatContract, SurfaceState, VerdictView,
    VerificationCache,
};
