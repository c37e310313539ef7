//! Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};
use claimcheck::config::CheckerConfig;
use claimcheck::SurfaceKind;
use std::path::PathBuf;

/// Oracle-backed verification of real-world claims.
#[derive(Parser, Debug)]
#[command(name = "claimcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding persisted surface state.
    #[arg(long, env = "CLAIMCHECK_ROOT_DIR")]
    pub root_dir: Option<PathBuf>,

    /// Consensus oracle endpoint.
    #[arg(long, env = "CLAIMCHECK_ORACLE_ENDPOINT")]
    pub oracle_endpoint: Option<String>,

    /// Oracle evaluation timeout in seconds.
    #[arg(long, env = "CLAIMCHECK_ORACLE_TIMEOUT")]
    pub oracle_timeout: Option<u64>,

    /// Caller identity, recorded as the gateway creator.
    #[arg(long, env = "CLAIMCHECK_IDENTITY")]
    pub identity: Option<String>,

    /// Log level.
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Path to configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether an article is original.
    Article {
        /// Article URL.
        url: String,
    },
    /// Check whether a repository contains original code.
    Code {
        /// Repository URL.
        url: String,
    },
    /// Check whether a piece of text is original.
    Text {
        /// Text to check.
        text: String,
    },
    /// Check a product page for fake reviews.
    Reviews {
        /// Product page URL.
        url: String,
        /// Product name.
        name: String,
    },
    /// Fetch current weather for a city.
    Weather {
        /// City name.
        city: String,
    },
    /// Fetch the current price of a cryptocurrency.
    Crypto {
        /// Ticker symbol, e.g. BTC.
        symbol: String,
    },
    /// Analyze news sentiment around a topic.
    Sentiment {
        /// Topic.
        topic: String,
    },
    /// Check whether a GitHub pull request has been merged.
    Pr {
        /// Pull request URL.
        url: String,
    },
    /// Check whether a GitHub issue has been closed.
    Issue {
        /// Issue URL.
        url: String,
    },
    /// Check whether a webpage contains some text.
    Webpage {
        /// Page URL.
        url: String,
        /// Text that must appear on the page.
        text: String,
    },
    /// Show the stored verdict for a key.
    Get {
        /// Surface to read.
        #[arg(value_enum)]
        surface: CliSurface,
        /// Cache key.
        key: String,
    },
    /// List every stored verdict.
    List {
        /// Surface to read.
        #[arg(value_enum)]
        surface: CliSurface,
    },
    /// Count stored verdicts.
    Count {
        /// Surface to read.
        #[arg(value_enum)]
        surface: CliSurface,
    },
}

/// Surface CLI enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliSurface {
    /// Content originality.
    Content,
    /// Product review authenticity.
    Reviews,
    /// External API facts.
    Gateway,
    /// Escrow conditions.
    Escrow,
}

impl Cli {
    /// Convert CLI arguments into a `CheckerConfig`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is specified but cannot be loaded.
    pub fn to_config(&self) -> color_eyre::Result<CheckerConfig> {
        // Start with default config or load from file
        let mut config = if let Some(ref path) = self.config {
            CheckerConfig::from_file(path)?
        } else {
            CheckerConfig::default()
        };

        // Override with CLI arguments
        if let Some(ref root_dir) = self.root_dir {
            config.root_dir.clone_from(root_dir);
        }
        if let Some(ref endpoint) = self.oracle_endpoint {
            config.oracle.endpoint = Some(endpoint.clone());
        }
        if let Some(timeout) = self.oracle_timeout {
            config.oracle.timeout_secs = timeout;
        }
        if let Some(ref identity) = self.identity {
            config.identity = Some(identity.clone());
        }
        config.log_level.clone_from(&self.log_level);

        Ok(config)
    }
}

impl From<CliSurface> for SurfaceKind {
    fn from(s: CliSurface) -> Self {
        match s {
            CliSurface::Content => SurfaceKind::ContentOriginality,
            CliSurface::Reviews => SurfaceKind::ReviewAuthenticity,
            CliSurface::Gateway => SurfaceKind::ApiGateway,
            CliSurface::Escrow => SurfaceKind::Escrow,
        }
    }
}
