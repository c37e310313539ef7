//! Oracle invocation.
//!
//! The oracle itself is an external collaborator: it hands a classification
//! request to several independent evaluators and reconciles their answers into
//! one agreed verdict string. This module defines the seam ([`ConsensusOracle`])
//! and the single call site every surface goes through ([`OracleInvoker`]).

mod http;

pub use http::HttpOracle;

use crate::error::{Error, Result};
use crate::verification::ClassificationRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// External equivalence-consensus oracle.
///
/// Returns exactly one verdict string per request. The string is expected,
/// but not guaranteed, to be the requested JSON.
#[async_trait]
pub trait ConsensusOracle: Send + Sync {
    /// Evaluate a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Oracle`] if consensus cannot be reached or the
    /// underlying fetch fails.
    async fn evaluate(&self, request: &ClassificationRequest) -> Result<String>;
}

/// Strip a leading ```` ```json ```` / ```` ``` ```` marker and a trailing
/// ```` ``` ```` marker. Interior text is untouched.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw;

    let start = text.trim_start();
    if let Some(rest) = start
        .strip_prefix("```json")
        .or_else(|| start.strip_prefix("```"))
    {
        text = rest;
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text
}

/// Submits classification requests to the oracle and cleans up the answer.
///
/// Oracle failures propagate unchanged; nothing is retried.
#[derive(Clone)]
pub struct OracleInvoker {
    oracle: Arc<dyn ConsensusOracle>,
}

impl OracleInvoker {
    /// Wrap an oracle collaborator.
    #[must_use]
    pub fn new(oracle: Arc<dyn ConsensusOracle>) -> Self {
        Self { oracle }
    }

    /// Submit `request` and return the cleaned verdict.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the description or format is empty
    /// or the criterion is not a single line, and any error the oracle raises.
    pub async fn invoke(&self, request: &ClassificationRequest) -> Result<String> {
        validate(request)?;

        let raw = self.oracle.evaluate(request).await.map_err(|e| {
            warn!("Oracle evaluation failed: {e}");
            e
        })?;

        let verdict = strip_code_fences(&raw);
        debug!(
            "Oracle returned {} bytes ({} after cleanup)",
            raw.len(),
            verdict.len()
        );
        Ok(verdict.to_string())
    }
}

fn validate(request: &ClassificationRequest) -> Result<()> {
    if request.description.trim().is_empty() {
        return Err(Error::InvalidRequest("empty description".to_string()));
    }
    if request.format.trim().is_empty() {
        return Err(Error::InvalidRequest("empty format contract".to_string()));
    }
    let criterion = request.criterion.trim();
    if criterion.is_empty() || criterion.contains('\n') {
        return Err(Error::InvalidRequest(
            "criterion must be a single sentence".to_string(),
        ));
    }
    Ok(())
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::testing::ScriptedOracle;
    use super::*;
    use crate::verification::{FieldType, FormatContract};

    fn request(criterion: &str) -> ClassificationRequest {
        let format = FormatContract::json("Respond in JSON format:").field("ok", FieldType::Bool);
        ClassificationRequest::new("Check something", &format, criterion)
    }

    #[test]
    fn test_strip_json_fences() {
        assert_eq!(
            strip_code_fences("```json\n{\"is_original\":true}```"),
            "\n{\"is_original\":true}"
        );
        assert_eq!(strip_code_fences("```\n{}\n```\n"), "\n{}\n");
        assert_eq!(strip_code_fences("  ```json{}```  "), "{}");
    }

    #[test]
    fn test_strip_leaves_plain_text_alone() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences(" not json "), " not json ");
        // Interior fences are content, not markers.
        assert_eq!(strip_code_fences("a ``` b"), "a ``` b");
    }

    #[tokio::test]
    async fn test_invoke_cleans_verdict() {
        let oracle = ScriptedOracle::new();
        oracle.answer("```json\n{\"ok\": true}\n```");
        let invoker = OracleInvoker::new(oracle.clone());

        let verdict = invoker.invoke(&request("Be truthful.")).await.expect("verdict");
        assert_eq!(verdict, "\n{\"ok\": true}\n");
        assert_eq!(oracle.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_passes_malformed_text_through() {
        let oracle = ScriptedOracle::new();
        oracle.answer("I think it is fine");
        let invoker = OracleInvoker::new(oracle);

        let verdict = invoker.invoke(&request("Be truthful.")).await.expect("verdict");
        assert_eq!(verdict, "I think it is fine");
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let oracle = ScriptedOracle::new();
        oracle.fail("consensus not reached");
        let invoker = OracleInvoker::new(oracle);

        let err = invoker.invoke(&request("Be truthful.")).await.unwrap_err();
        assert!(matches!(err, Error::Oracle(ref m) if m == "consensus not reached"));
    }

    #[tokio::test]
    async fn test_multi_line_criterion_rejected_before_oracle() {
        let oracle = ScriptedOracle::new();
        let invoker = OracleInvoker::new(oracle.clone());

        let err = invoker
            .invoke(&request("First line.\nSecond line."))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(oracle.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_description_rejected() {
        let invoker = OracleInvoker::new(ScriptedOracle::new());
        let mut req = request("Be truthful.");
        req.description = "   ".to_string();

        let err = invoker.invoke(&req).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
