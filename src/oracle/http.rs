//! HTTP client for a host-provided consensus endpoint.
//!
//! The endpoint accepts `{"prompt", "task", "criteria"}` and answers with
//! `{"result": "<verdict>"}` once its evaluators agree.

use crate::config::OracleConfig;
use crate::error::{Error, Result};
use crate::oracle::ConsensusOracle;
use crate::verification::ClassificationRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct EvaluateBody<'a> {
    prompt: &'a str,
    task: &'a str,
    criteria: &'a str,
}

#[derive(Deserialize)]
struct EvaluateReply {
    result: String,
}

/// Consensus oracle reached over HTTP.
pub struct HttpOracle {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpOracle {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint is configured or the HTTP client
    /// cannot be built.
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| Error::Config("no oracle endpoint configured".to_string()))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        info!("Oracle endpoint: {endpoint}");
        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout(),
        })
    }
}

#[async_trait]
impl ConsensusOracle for HttpOracle {
    async fn evaluate(&self, request: &ClassificationRequest) -> Result<String> {
        let body = EvaluateBody {
            prompt: &request.description,
            task: &request.format,
            criteria: &request.criterion,
        };

        debug!("Submitting classification request to {}", self.endpoint);
        let exchange = async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&body)
                .send()
                .await
                .map_err(|e| Error::Oracle(format!("request failed: {e}")))?;

            let response = response.error_for_status().map_err(|e| {
                Error::Oracle(format!("consensus endpoint rejected request: {e}"))
            })?;

            let reply: EvaluateReply = response
                .json()
                .await
                .map_err(|e| Error::Oracle(format!("malformed consensus reply: {e}")))?;
            Ok::<_, Error>(reply.result)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(verdict)) => Ok(verdict),
            Ok(Err(e)) => {
                warn!("Oracle request failed: {e}");
                Err(e)
            }
            Err(_) => {
                warn!("Oracle request timed out");
                Err(Error::Oracle("request timed out".to_string()))
            }
        }
    }
}
