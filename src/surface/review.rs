//! Product review authenticity.

use super::{SurfaceCore, SurfaceKind};
use crate::error::Result;
use crate::event::VerificationEventsSender;
use crate::oracle::ConsensusOracle;
use crate::verification::{
    CacheKey, CacheStats, ClassificationRequest, FieldType, FormatContract, SurfaceState,
};
use std::sync::Arc;

fn review_request(product_url: &str, product_name: &str) -> ClassificationRequest {
    let description = format!(
        "You are analyzing a product page for review authenticity.\n\n\
         Product: {product_name}\n\
         URL: {product_url}\n\n\
         Fetch the webpage and analyze its content for signs of fake reviews.\n"
    );
    let format = FormatContract::json(
        "Look for these RED FLAGS in the content:\n\
         1. Repetitive language patterns across reviews\n\
         2. Generic phrases without specifics\n\
         3. Overly positive language with no criticisms\n\n\
         Provide a JSON response with the following format:",
    )
    .field("authenticity_score", FieldType::IntRange(0, 100))
    .field("is_genuine", FieldType::Bool)
    .field("reasoning", FieldType::Str)
    .strict();

    ClassificationRequest::new(
        description,
        &format,
        "The authenticity score should be between 0-100 and reasoning should explain the decision.",
    )
}

/// Flags product pages whose reviews look fake.
///
/// Verdicts are keyed by the product URL alone.
pub struct ProductReviewAuthenticator {
    core: SurfaceCore,
}

impl ProductReviewAuthenticator {
    /// Create an empty authenticator.
    #[must_use]
    pub fn new(oracle: Arc<dyn ConsensusOracle>) -> Self {
        Self {
            core: SurfaceCore::new(SurfaceKind::ReviewAuthenticity, oracle),
        }
    }

    /// Restore an authenticator from persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state belongs to another surface.
    pub fn from_state(oracle: Arc<dyn ConsensusOracle>, state: SurfaceState) -> Result<Self> {
        Ok(Self {
            core: SurfaceCore::restore(SurfaceKind::ReviewAuthenticity, oracle, state)?,
        })
    }

    /// Emit verification events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: VerificationEventsSender) -> Self {
        self.core.events = Some(events);
        self
    }

    /// Analyze the reviews on a product page.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn verify_product_reviews(
        &mut self,
        product_url: &str,
        product_name: &str,
    ) -> Result<String> {
        self.core
            .verify(
                CacheKey::subject(product_url),
                review_request(product_url, product_name),
            )
            .await
    }

    /// Stored verdict for `product_url`, or `{"error": "Product not yet verified"}`.
    #[must_use]
    pub fn get_product_verification(&self, product_url: &str) -> String {
        self.core.lookup(product_url)
    }

    /// Every stored verdict in insertion order.
    #[must_use]
    pub fn get_all_verifications(&self) -> Vec<(String, String)> {
        self.core.cache.list_all()
    }

    /// Number of verified products.
    #[must_use]
    pub fn get_verified_count(&self) -> usize {
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
