//! HuggingFace Scorer
//!
//! Calls a hosted text-classification model over HTTP. Responses are lists of
//! `{label, score}` candidates; the highest-confidence one wins.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use daily_up_core::{CoreError, CoreResult};
use daily_up_llm::{build_http_client, parse_http_error};

use super::{RawScore, SentimentScorer};
use crate::utils::error::AppResult;

/// Default inference endpoint prefix
const HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The endpoint answers either `[{..}, ..]` or `[[{..}, ..]]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Remote classifier scorer.
pub struct HuggingFaceScorer {
    model: String,
    base_url: Option<String>,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl HuggingFaceScorer {
    pub fn new(
        model: impl Into<String>,
        base_url: Option<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = build_http_client(None, Some(timeout))?;
        Ok(Self {
            model: model.into(),
            base_url,
            api_token,
            client,
        })
    }

    /// Full inference URL for the configured model
    fn endpoint(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("{}/{}", HF_INFERENCE_URL, self.model),
        }
    }

    /// Pick the highest-confidence candidate out of a response body.
    fn parse_body(body: &str) -> CoreResult<RawScore> {
        let response: ClassificationResponse = serde_json::from_str(body).map_err(|e| {
            CoreError::scoring_unavailable(format!("Unexpected classifier response: {}", e))
        })?;

        let candidates = match response {
            ClassificationResponse::Nested(outer) => outer.into_iter().flatten().collect(),
            ClassificationResponse::Flat(items) => items,
        };

        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|best| RawScore::Labelled {
                label: best.label,
                confidence: best.score,
            })
            .ok_or_else(|| CoreError::scoring_unavailable("Classifier returned no labels"))
    }
}

#[async_trait]
impl SentimentScorer for HuggingFaceScorer {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn score(&self, text: &str) -> CoreResult<RawScore> {
        let mut request = self
            .client
            .post(self.endpoint())
            .json(&serde_json::json!({ "inputs": text }));

        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::scoring_unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::scoring_unavailable(e.to_string()))?;

        if status != 200 {
            let err = parse_http_error(status, &body, "huggingface");
            return Err(CoreError::scoring_unavailable(err.to_string()));
        }

        debug!(model = %self.model, "Classifier responded");
        Self::parse_body(&body)
    }
}
