//! Content originality: articles, code repositories and free text.

use super::{SurfaceCore, SurfaceKind};
use crate::error::Result;
use crate::event::VerificationEventsSender;
use crate::oracle::ConsensusOracle;
use crate::verification::{
    CacheKey, CacheStats, CheckKind, ClassificationRequest, FieldType, FormatContract,
    SurfaceState,
};
use std::sync::Arc;

const RESULTS: &[&str] = &["ORIGINAL", "PLAGIARIZED"];

fn originality_format(subject_field: &'static str, subject_type: FieldType) -> FormatContract {
    FormatContract::json("Respond in JSON format:")
        .field(subject_field, subject_type)
        .field("is_original", FieldType::Bool)
        .field("originality_score", FieldType::IntRange(0, 100))
        .field("plagiarism_indicators", FieldType::StrList)
        .field("result", FieldType::Enum(RESULTS))
}

fn article_request(article_url: &str) -> ClassificationRequest {
    let description = format!(
        "Check the originality of this article: {article_url}\n\n\
         Analyze:\n\
         - Is the content original?\n\
         - Are there signs of copy-paste from other sources?\n\
         - Does the writing style seem authentic?\n\
         - Any duplicate content indicators?\n"
    );
    ClassificationRequest::new(
        description,
        &originality_format("url", FieldType::Str),
        "Originality score should reflect actual content uniqueness.",
    )
}

fn code_request(repo_url: &str) -> ClassificationRequest {
    let description = format!(
        "Check the originality of code in this repository: {repo_url}\n\n\
         Analyze:\n\
         - Is the code original?\n\
         - Are there signs of copy-paste from other repos?\n\
         - Does it look like a fork without attribution?\n\
         - Any plagiarism indicators?\n"
    );
    ClassificationRequest::new(
        description,
        &originality_format("repo_url", FieldType::Str),
        "Score should reflect actual code uniqueness based on public repo data.",
    )
}

fn text_request(text: &str) -> ClassificationRequest {
    let description = format!(
        "Check the originality of this text:\n\n\"{text}\"\n\n\
         Analyze:\n\
         - Does this appear to be original writing?\n\
         - Are there signs of copying from known sources?\n\
         - Writing style consistency\n\
         - Originality indicators\n"
    );
    ClassificationRequest::new(
        description,
        &originality_format("text_preview", FieldType::StrNote("first 50 chars")),
        "Score should reflect actual text originality based on AI analysis.",
    )
}

/// Verifies whether content is original or plagiarized.
pub struct ContentAuthenticityChecker {
    core: SurfaceCore,
}

impl ContentAuthenticityChecker {
    /// Create an empty checker.
    #[must_use]
    pub fn new(oracle: Arc<dyn ConsensusOracle>) -> Self {
        Self {
            core: SurfaceCore::new(SurfaceKind::ContentOriginality, oracle),
        }
    }

    /// Restore a checker from persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state belongs to another surface.
    pub fn from_state(oracle: Arc<dyn ConsensusOracle>, state: SurfaceState) -> Result<Self> {
        Ok(Self {
            core: SurfaceCore::restore(SurfaceKind::ContentOriginality, oracle, state)?,
        })
    }

    /// Emit verification events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: VerificationEventsSender) -> Self {
        self.core.events = Some(events);
        self
    }

    /// Check whether an article or blog post is original.
    /// Cached under `article_<url>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn check_article_originality(&mut self, article_url: &str) -> Result<String> {
        self.core
            .verify(
                CacheKey::tagged(CheckKind::Article, article_url),
                article_request(article_url),
            )
            .await
    }

    /// Check whether a repository contains original code.
    /// Cached under `code_<url>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn check_code_originality(&mut self, repo_url: &str) -> Result<String> {
        self.core
            .verify(
                CacheKey::tagged(CheckKind::Code, repo_url),
                code_request(repo_url),
            )
            .await
    }

    /// Check whether submitted text is original.
    /// Cached under `text_<first 20 characters>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn check_text_originality(&mut self, text: &str) -> Result<String> {
        self.core
            .verify(CacheKey::text(text), text_request(text))
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

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::event::{create_event_channel, VerificationEvent};
    use crate::oracle::testing::ScriptedOracle;
    use crate::Error;

    #[tokio::test]
    async fn test_article_verdict_is_stripped_and_cached() {
        let oracle = ScriptedOracle::new();
        oracle.answer(
            "```json\n{\"url\":\"https://blog.genlayer.com/x\",\"is_original\":true}```",
        );
        let mut checker = ContentAuthenticityChecker::new(oracle.clone());

        let verdict = checker
            .check_article_originality("https://blog.genlayer.com/x")
            .await
            .expect("verdict");

        assert_eq!(
            verdict,
            "\n{\"url\":\"https://blog.genlayer.com/x\",\"is_original\":true}"
        );
        assert_eq!(
            checker.get_verification("article_https://blog.genlayer.com/x"),
            verdict
        );

        let requests = oracle.requests();
        assert!(requests[0]
            .description
            .contains("Check the originality of this article: https://blog.genlayer.com/x"));
        assert!(requests[0].format.contains("\"result\": str (ORIGINAL or PLAGIARIZED)"));
    }

    #[tokio::test]
    async fn test_repeated_article_check_overwrites() {
        let oracle = ScriptedOracle::new();
        oracle.answer("{\"originality_score\": 40}");
        oracle.answer("{\"originality_score\": 90}");
        let mut checker = ContentAuthenticityChecker::new(oracle);

        checker
            .check_article_originality("https://blog.genlayer.com/a")
            .await
            .expect("first");
        checker
            .check_article_originality("https://blog.genlayer.com/a")
            .await
            .expect("second");

        assert_eq!(checker.get_verification_count(), 1);
        assert_eq!(
            checker.get_verification("article_https://blog.genlayer.com/a"),
            "{\"originality_score\": 90}"
        );
    }

    #[tokio::test]
    async fn test_kinds_do_not_share_keys() {
        let oracle = ScriptedOracle::new();
        oracle.answer("article");
        oracle.answer("code");
        oracle.answer("text");
        let mut checker = ContentAuthenticityChecker::new(oracle.clone());

        checker.check_article_originality("https://github.com/u/r").await.expect("article");
        checker.check_code_originality("https://github.com/u/r").await.expect("code");
        checker
            .check_text_originality("This is my original research about blockchain...")
            .await
            .expect("text");

        let keys: Vec<_> = checker
            .get_all_verifications()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec![
                "article_https://github.com/u/r",
                "code_https://github.com/u/r",
                "text_This is my original ",
            ]
        );
        assert!(oracle.requests()[1].format.contains("\"repo_url\": str"));
        assert!(oracle.requests()[2].format.contains("\"text_preview\": str (first 50 chars)"));
    }

    #[tokio::test]
    async fn test_texts_sharing_prefix_share_a_key() {
        let oracle = ScriptedOracle::new();
        oracle.answer("first");
        oracle.answer("second");
        let mut checker = ContentAuthenticityChecker::new(oracle);

        checker
            .check_text_originality("12345678901234567890 tail one")
            .await
            .expect("first");
        checker
            .check_text_originality("12345678901234567890 tail two")
            .await
            .expect("second");

        assert_eq!(checker.get_verification_count(), 1);
        assert_eq!(checker.get_verification("text_12345678901234567890"), "second");
    }

    #[tokio::test]
    async fn test_oracle_failure_leaves_cache_unchanged() {
        let oracle = ScriptedOracle::new();
        oracle.answer("kept");
        oracle.fail("fetch failed");
        let (tx, mut rx) = create_event_channel();
        let mut checker = ContentAuthenticityChecker::new(oracle).with_events(tx);

        checker.check_code_originality("https://github.com/u/r").await.expect("first");
        let err = checker
            .check_code_originality("https://github.com/u/r")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Oracle(_)));
        assert_eq!(checker.get_verification("code_https://github.com/u/r"), "kept");
        assert_eq!(checker.get_verification_count(), 1);

        assert!(matches!(
            rx.try_recv().expect("event"),
            VerificationEvent::Verified { replaced: false, .. }
        ));
        assert!(matches!(
            rx.try_recv().expect("event"),
            VerificationEvent::OracleFailed { ref key, .. } if key == "code_https://github.com/u/r"
        ));
    }

    #[test]
    fn test_missing_key_returns_sentinel() {
        let checker = ContentAuthenticityChecker::new(ScriptedOracle::new());
        assert_eq!(
            checker.get_verification("article_https://nowhere"),
            r#"{"error": "Not found"}"#
        );
        assert_eq!(checker.cache_stats().misses, 1);
    }
}
