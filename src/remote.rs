//! Client for the remote analyze endpoint.
//!
//! The endpoint is a stub: whatever it is sent, it answers with the same
//! canned `neutral` analysis. Nothing in the submission path depends on it.
//! [`RemoteAnalyzer::analyze_or_local`] exists for callers that want to try
//! it and fall back to the keyword classifier on any failure.

use serde::Serialize;
use tracing::warn;

use crate::lexicon::classify;
use crate::model::{ApiResponse, MoodAnalysis};

/// Default base URL, the local server started by the binary.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Request body for POST /api/analyze.
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// Client for `POST {base_url}/api/analyze`.
#[derive(Clone)]
pub struct RemoteAnalyzer {
    client: reqwest::Client,
    base_url: String,
}

impl Default for RemoteAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RemoteAnalyzer {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the endpoint to analyze `text`.
    ///
    /// Fails on transport errors, non-2xx statuses, `success: false`, or a
    /// response without `data`.
    pub async fn analyze(&self, text: &str) -> anyhow::Result<MoodAnalysis> {
        let url = format!("{}/api/analyze", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest { text })
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<ApiResponse>().await?;

        unwrap_response(body)
    }

    /// Like [`RemoteAnalyzer::analyze`], falling back to the local keyword
    /// classifier on any error.
    pub async fn analyze_or_local(&self, text: &str) -> MoodAnalysis {
        match self.analyze(text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(error = %e, "Remote analysis failed, using local classifier");
                classify(text)
            }
        }
    }
}

fn unwrap_response(body: ApiResponse) -> anyhow::Result<MoodAnalysis> {
    if !body.success {
        anyhow::bail!(
            "analysis rejected: {}",
            body.error.as_deref().unwrap_or("no error message")
        );
    }

    match body.data {
        Some(analysis) if !analysis.tips.is_empty() => Ok(analysis),
        Some(_) => anyhow::bail!("analysis response has no tips"),
        None => anyhow::bail!("analysis response has no data"),
    }
}
