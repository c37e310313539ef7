//! Escrow release conditions: GitHub PR/issue state and webpage milestones.

use super::{SurfaceCore, SurfaceKind};
use crate::error::Result;
use crate::event::VerificationEventsSender;
use crate::oracle::ConsensusOracle;
use crate::verification::{
    CacheKey, CacheStats, CheckKind, ClassificationRequest, FieldType, FormatContract,
    SurfaceState,
};
use std::sync::Arc;

const RESULTS: &[&str] = &["APPROVED", "REJECTED"];

fn pr_request(pr_url: &str) -> ClassificationRequest {
    let description = format!(
        "Check if this GitHub Pull Request has been merged: {pr_url}\n\n\
         Determine:\n\
         - Is the PR merged? (yes/no)\n\
         - What is the current status?\n"
    );
    let format = FormatContract::json("Respond in JSON format:")
        .field("pr_url", FieldType::Str)
        .field("is_merged", FieldType::Bool)
        .field("status", FieldType::Str)
        .field("result", FieldType::Enum(RESULTS));
    ClassificationRequest::new(
        description,
        &format,
        "PR must be actually merged for APPROVED result.",
    )
}

fn issue_request(issue_url: &str) -> ClassificationRequest {
    let description = format!(
        "Check if this GitHub Issue has been closed: {issue_url}\n\n\
         Determine:\n\
         - Is the issue closed? (yes/no)\n\
         - What is the current status?\n"
    );
    let format = FormatContract::json("Respond in JSON format:")
        .field("issue_url", FieldType::Str)
        .field("is_closed", FieldType::Bool)
        .field("status", FieldType::Str)
        .field("result", FieldType::Enum(RESULTS));
    ClassificationRequest::new(
        description,
        &format,
        "Issue must be actually closed for APPROVED result.",
    )
}

fn webpage_request(url: &str, required_text: &str) -> ClassificationRequest {
    let description = format!(
        "Check if this webpage contains the required text:\n\n\
         URL: {url}\n\
         Required text: \"{required_text}\"\n\n\
         Search the webpage and verify if the text appears.\n"
    );
    let format = FormatContract::json("Respond in JSON format:")
        .field("url", FieldType::Str)
        .field("required_text", FieldType::Str)
        .field("text_found", FieldType::Bool)
        .field("result", FieldType::Enum(RESULTS));
    ClassificationRequest::new(
        description,
        &format,
        "Text must be found on the actual webpage for APPROVED result.",
    )
}

/// Verifies GitHub PRs, issues and webpage milestones for payment release.
pub struct SmartEscrowOracle {
    core: SurfaceCore,
}

impl SmartEscrowOracle {
    /// Create an empty escrow oracle.
    #[must_use]
    pub fn new(oracle: Arc<dyn ConsensusOracle>) -> Self {
        Self {
            core: SurfaceCore::new(SurfaceKind::Escrow, oracle),
        }
    }

    /// Restore from persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state belongs to another surface.
    pub fn from_state(oracle: Arc<dyn ConsensusOracle>, state: SurfaceState) -> Result<Self> {
        Ok(Self {
            core: SurfaceCore::restore(SurfaceKind::Escrow, oracle, state)?,
        })
    }

    /// Emit verification events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: VerificationEventsSender) -> Self {
        self.core.events = Some(events);
        self
    }

    /// Check whether a pull request has been merged. Cached under `pr_<url>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn verify_github_pr_merged(&mut self, pr_url: &str) -> Result<String> {
        self.core
            .verify(CacheKey::tagged(CheckKind::Pr, pr_url), pr_request(pr_url))
            .await
    }

    /// Check whether an issue has been closed. Cached under `issue_<url>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn verify_github_issue_closed(&mut self, issue_url: &str) -> Result<String> {
        self.core
            .verify(
                CacheKey::tagged(CheckKind::Issue, issue_url),
                issue_request(issue_url),
            )
            .await
    }

    /// Check whether a webpage contains `required_text`. Cached under
    /// `webpage_<url>`; the required text is not part of the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn verify_webpage_contains_text(
        &mut self,
        url: &str,
        required_text: &str,
    ) -> Result<String> {
        self.core
            .verify(
                CacheKey::tagged(CheckKind::Webpage, url),
                webpage_request(url, required_text),
            )
            .await
    }

    /// Stored verdict for `key`, or `{"error": "Not found"}`.
    #[must_use]
    pub fn get_verification(&self, key: &str) -> String {
        self.core.lookup(key)
    }

    /// Every stored verdict in insertion order.
    #[must_use]
    pub fn get_all_verifications(&self) -> Vec<(String, String)> {
        self.core.cache.list_all()
    }

    /// Number of stored verdicts.
    #[must_use]
    pub fn get_verification_count(&self) -> usize {
        self.core.cache.count()
    }

    /// Cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.core.stats()
    }

    /// Snapshot for persistence.
    #[must_use]
    pub fn state(&self) -> SurfaceState {
        self.core.state(None)
    }
}
