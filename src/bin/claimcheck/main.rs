//! claimcheck CLI entry point.

mod cli;

use clap::Parser;
use claimcheck::{
    Address, CheckerConfig, ConsensusOracle, ContentAuthenticityChecker, Error, HttpOracle,
    ProductReviewAuthenticator, SecureApiGateway, SmartEscrowOracle, SurfaceKind, SurfaceState,
    VerificationCache,
};
use cli::{Cli, Command};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Serialize)]
struct Entry {
    key: String,
    verdict: String,
}

fn load_state(config: &CheckerConfig, kind: SurfaceKind) -> claimcheck::Result<Option<SurfaceState>> {
    SurfaceState::load(&config.state_path(kind))
}

fn load_cache(config: &CheckerConfig, kind: SurfaceKind) -> claimcheck::Result<VerificationCache> {
    let entries = match load_state(config, kind)? {
        Some(state) => {
            state.expect_surface(kind)?;
            state.entries
        }
        None => Vec::new(),
    };
    Ok(VerificationCache::from_entries(entries))
}

fn content(
    config: &CheckerConfig,
    oracle: Arc<dyn ConsensusOracle>,
) -> claimcheck::Result<ContentAuthenticityChecker> {
    match load_state(config, SurfaceKind::ContentOriginality)? {
        Some(state) => ContentAuthenticityChecker::from_state(oracle, state),
        None => Ok(ContentAuthenticityChecker::new(oracle)),
    }
}

fn reviews(
    config: &CheckerConfig,
    oracle: Arc<dyn ConsensusOracle>,
) -> claimcheck::Result<ProductReviewAuthenticator> {
    match load_state(config, SurfaceKind::ReviewAuthenticity)? {
        Some(state) => ProductReviewAuthenticator::from_state(oracle, state),
        None => Ok(ProductReviewAuthenticator::new(oracle)),
    }
}

fn gateway(
    config: &CheckerConfig,
    oracle: Arc<dyn ConsensusOracle>,
) -> claimcheck::Result<SecureApiGateway> {
    match load_state(config, SurfaceKind::ApiGateway)? {
        Some(state) => SecureApiGateway::from_state(oracle, state),
        None => {
            let identity = config.identity.clone().ok_or_else(|| {
                Error::Config("an identity is required to create the gateway".to_string())
            })?;
            Ok(SecureApiGateway::new(oracle, Address::new(identity)))
        }
    }
}

fn escrow(
    config: &CheckerConfig,
    oracle: Arc<dyn ConsensusOracle>,
) -> claimcheck::Result<SmartEscrowOracle> {
    match load_state(config, SurfaceKind::Escrow)? {
        Some(state) => SmartEscrowOracle::from_state(oracle, state),
        None => Ok(SmartEscrowOracle::new(oracle)),
    }
}

/// Run a write operation, persist the surface and return the verdict.
async fn write(config: &CheckerConfig, command: Command) -> claimcheck::Result<String> {
    let oracle: Arc<dyn ConsensusOracle> = Arc::new(HttpOracle::new(&config.oracle)?);

    let (verdict, state) = match command {
        Command::Article { url } => {
            let mut s = content(config, oracle)?;
            (s.check_article_originality(&url).await?, s.state())
        }
        Command::Code { url } => {
            let mut s = content(config, oracle)?;
            (s.check_code_originality(&url).await?, s.state())
        }
        Command::Text { text } => {
            let mut s = content(config, oracle)?;
            (s.check_text_originality(&text).await?, s.state())
        }
        Command::Reviews { url, name } => {
            let mut s = reviews(config, oracle)?;
            (s.verify_product_reviews(&url, &name).await?, s.state())
        }
        Command::Weather { city } => {
            let mut s = gateway(config, oracle)?;
            (s.fetch_weather_data(&city).await?, s.state())
        }
        Command::Crypto { symbol } => {
            let mut s = gateway(config, oracle)?;
            (s.fetch_crypto_price(&symbol).await?, s.state())
        }
        Command::Sentiment { topic } => {
            let mut s = gateway(config, oracle)?;
            (s.fetch_news_sentiment(&topic).await?, s.state())
        }
        Command::Pr { url } => {
            let mut s = escrow(config, oracle)?;
            (s.verify_github_pr_merged(&url).await?, s.state())
        }
        Command::Issue { url } => {
            let mut s = escrow(config, oracle)?;
            (s.verify_github_issue_closed(&url).await?, s.state())
        }
        Command::Webpage { url, text } => {
            let mut s = escrow(config, oracle)?;
            (s.verify_webpage_contains_text(&url, &text).await?, s.state())
        }
        Command::Get { .. } | Command::List { .. } | Command::Count { .. } => {
            return Err(Error::InvalidRequest("not a write operation".to_string()));
        }
    };

    state.save(&config.state_path(state.surface))?;
    Ok(verdict)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("claimcheck v{}", env!("CARGO_PKG_VERSION"));

    // Build configuration
    let config = cli.to_config()?;

    match cli.command {
        Command::Get { surface, key } => {
            let kind = SurfaceKind::from(surface);
            let cache = load_cache(&config, kind)?;
            println!("{}", cache.get_or(&key, kind.not_found()));
        }
        Command::List { surface } => {
            let cache = load_cache(&config, surface.into())?;
            let entries: Vec<Entry> = cache
                .entries()
                .map(|(key, verdict)| Entry {
                    key: key.to_string(),
                    verdict: verdict.to_string(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::Count { surface } => {
            println!("{}", load_cache(&config, surface.into())?.count());
        }
        command => {
            let verdict = write(&config, command).await?;
            println!("{verdict}");
        }
    }

    Ok(())
}
