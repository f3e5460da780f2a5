//! Gemini `generateContent` client.

use crate::config::ClientConfig;
use crate::request::{build_request, extract_text};
use async_trait::async_trait;
use aura_core::report::{parse_report, AnalyzeError};
use aura_core::session::Analyzer;
use aura_core::{FacialReport, MultiAngleImages};
use serde_json::Value;
use std::time::Duration;

/// Remote analysis client for the Gemini REST API.
///
/// Stateless and reentrant. One attempt per call; retry policy, if any,
/// belongs to the caller.
pub struct GeminiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GeminiClient {
    /// Build a client from configuration. Fails only if the underlying
    /// HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, AnalyzeError> {
        if config.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is empty; the remote will reject requests");
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalyzeError::Transport(format!("http client: {e}")))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(&self, images: &MultiAngleImages) -> Result<FacialReport, AnalyzeError> {
        let body = build_request(images);
        tracing::debug!(model = %self.config.model, "sending analysis request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "remote returned error status");
            return Err(AnalyzeError::Transport(format!("{status}: {detail}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        let text = extract_text(&payload).ok_or(AnalyzeError::EmptyResponse)?;

        let report = parse_report(text)?;
        tracing::info!(score = report.overall_score, "report received");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let client = GeminiClient::new(ClientConfig {
            api_base: "https://example.test/v1beta/".into(),
            model: "gemini-test".into(),
            ..ClientConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }
}
