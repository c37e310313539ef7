//! Verification building blocks shared by every surface.
//!
//! # Architecture
//!
//! ```text
//! typed input
//!      │
//!      ▼
//! ┌──────────────────────┐      ┌──────────────────┐
//! │ ClassificationRequest│ ───► │ OracleInvoker    │
//! └──────────────────────┘      └────────┬─────────┘
//!                                        │ verdict
//!      CacheKey ────────────────────┐    │
//!                                   ▼    ▼
//!                           ┌──────────────────────┐
//!                           │ VerificationCache    │ ◄── read ops
//!                           └──────────────────────┘
//! ```

mod cache;
mod key;
mod request;
mod state;
mod verdict;

pub use cache::{CacheStats, VerificationCache};
pub use key::{CacheKey, CheckKind, TEXT_SUBJECT_CHARS};
pub use request::{ClassificationRequest, FieldType, FormatContract};
pub use state::SurfaceState;
pub use verdict::VerdictView;
