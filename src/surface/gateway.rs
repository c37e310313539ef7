//! External API facts: weather, crypto prices and news sentiment.

use super::{Address, SurfaceCore, SurfaceKind};
use crate::error::{Error, Result};
use crate::event::VerificationEventsSender;
use crate::oracle::ConsensusOracle;
use crate::verification::{
    CacheKey, CacheStats, CheckKind, ClassificationRequest, FieldType, FormatContract,
    SurfaceState,
};
use std::sync::Arc;
use tracing::info;

fn weather_request(city: &str) -> ClassificationRequest {
    let description = format!(
        "Fetch weather data for the city: {city}\n\n\
         You need to get current weather information including:\n\
         - Temperature\n\
         - Weather conditions (sunny, rainy, etc)\n\
         - Humidity\n\
         - Wind speed\n\n\
         Use publicly available weather data sources.\n"
    );
    let format = FormatContract::json("Provide weather information in the following JSON format:")
        .field("city", FieldType::Str)
        .field("temperature_celsius", FieldType::Float)
        .field("conditions", FieldType::Str)
        .field("humidity_percent", FieldType::Int)
        .field("wind_speed_kmh", FieldType::Float)
        .field("timestamp", FieldType::Str)
        .no_extra_words();
    ClassificationRequest::new(
        description,
        &format,
        "Temperature should be realistic for the location, conditions should be descriptive.",
    )
}

fn crypto_request(symbol: &str) -> ClassificationRequest {
    let description = format!(
        "Fetch the current price of cryptocurrency: {symbol}\n\n\
         Get real-time price data from multiple sources like:\n\
         - CoinGecko\n\
         - CoinMarketCap\n\
         - Binance\n\
         - Coinbase\n\n\
         Cross-reference multiple sources for accuracy.\n"
    );
    let format = FormatContract::json("Provide cryptocurrency price information in JSON format:")
        .field("symbol", FieldType::Str)
        .field("price_usd", FieldType::Float)
        .field("price_change_24h_percent", FieldType::Float)
        .field("market_cap_usd", FieldType::Float)
        .field("volume_24h_usd", FieldType::Float)
        .field("last_updated", FieldType::Str);
    ClassificationRequest::new(
        description,
        &format,
        "Price should be cross-verified from multiple sources, changes should be realistic.",
    )
}

fn sentiment_request(topic: &str) -> ClassificationRequest {
    let description = format!(
        "Analyze recent news sentiment about: {topic}\n\n\
         Search recent news articles (last 24-48 hours) and determine:\n\
         - Overall sentiment (positive/negative/neutral)\n\
         - Key events or announcements\n\
         - Public perception\n\
         - Trending keywords\n"
    );
    let format = FormatContract::json("Provide news sentiment analysis in JSON format:")
        .field("topic", FieldType::Str)
        .field(
            "overall_sentiment",
            FieldType::Enum(&["positive", "negative", "neutral"]),
        )
        .field("sentiment_score", FieldType::FloatRange(-1.0, 1.0))
        .field("key_events", FieldType::StrList)
        .field("trending_keywords", FieldType::StrList)
        .field("article_count", FieldType::Int)
        .field("last_updated", FieldType::Str);
    ClassificationRequest::new(
        description,
        &format,
        "Sentiment should reflect actual news coverage, events should be verifiable.",
    )
}

/// Gateway for fetching facts from external APIs through the oracle.
///
/// Records the identity that created it; the identity is stored only.
pub struct SecureApiGateway {
    core: SurfaceCore,
    admin: Address,
}

impl SecureApiGateway {
    /// Create an empty gateway owned by `admin`.
    #[must_use]
    pub fn new(oracle: Arc<dyn ConsensusOracle>, admin: Address) -> Self {
        info!("API gateway created by {admin}");
        Self {
            core: SurfaceCore::new(SurfaceKind::ApiGateway, oracle),
            admin,
        }
    }

    /// Restore a gateway from persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state belongs to another surface or carries
    /// no creator identity.
    pub fn from_state(oracle: Arc<dyn ConsensusOracle>, state: SurfaceState) -> Result<Self> {
        state.expect_surface(SurfaceKind::ApiGateway)?;
        let admin = state
            .admin
            .clone()
            .ok_or_else(|| Error::State("gateway state has no admin".to_string()))?;
        Ok(Self {
            core: SurfaceCore::restore(SurfaceKind::ApiGateway, oracle, state)?,
            admin,
        })
    }

    /// Emit verification events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: VerificationEventsSender) -> Self {
        self.core.events = Some(events);
        self
    }

    /// Identity that created the gateway.
    #[must_use]
    pub fn admin(&self) -> &Address {
        &self.admin
    }

    /// Fetch current weather for `city`. Cached under `weather_<city>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn fetch_weather_data(&mut self, city: &str) -> Result<String> {
        self.core
            .verify(
                CacheKey::tagged(CheckKind::Weather, city),
                weather_request(city),
            )
            .await
    }

    /// Fetch the current price of `symbol`. Cached under `crypto_<symbol>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn fetch_crypto_price(&mut self, symbol: &str) -> Result<String> {
        self.core
            .verify(
                CacheKey::tagged(CheckKind::Crypto, symbol),
                crypto_request(symbol),
            )
            .await
    }

    /// Analyze news sentiment around `topic`. Cached under `sentiment_<topic>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle fails; the cache is left unchanged.
    pub async fn fetch_news_sentiment(&mut self, topic: &str) -> Result<String> {
        self.core
            .verify(
                CacheKey::tagged(CheckKind::Sentiment, topic),
                sentiment_request(topic),
            )
            .await
    }

    /// Stored response for `cache_key`, or `{"error": "No data found for this key"}`.
    #[must_use]
    pub fn get_cached_response(&self, cache_key: &str) -> String {
        self.core.lookup(cache_key)
    }

    /// Every cached response in insertion order.
    #[must_use]
    pub fn get_all_cache_keys(&self) -> Vec<(String, String)> {
        self.core.cache.list_all()
    }

    /// Number of cached responses.
    #[must_use]
    pub fn get_data_count(&self) -> usize {
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
        self.core.state(Some(self.admin.clone()))
    }
}
