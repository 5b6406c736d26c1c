//! Test doubles shared by the integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use daily_up::services::fallback::FallbackCoach;
use daily_up::services::sentiment::{LexiconScorer, RawScore, SentimentAnalyzer, SentimentScorer};
use daily_up::Coach;
use daily_up_core::{CoreError, CoreResult, SentimentThresholds};
use daily_up_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
    StopReason, UsageStats,
};

/// Provider that replays canned results and records the prompts it saw.
pub struct ScriptedProvider {
    responses: Mutex<Vec<LlmResult<LlmResponse>>>,
    pub prompts: Mutex<Vec<String>>,
    config: ProviderConfig,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<LlmResult<LlmResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
            config: ProviderConfig::default(),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text_response(text))])
    }

    pub fn failing(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }
}

pub fn text_response(text: &str) -> LlmResponse {
    LlmResponse {
        content: Some(text.to_string()),
        stop_reason: StopReason::EndTurn,
        usage: UsageStats::default(),
        model: "scripted".to_string(),
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        _system: Option<String>,
        _request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let prompt = messages
            .iter()
            .map(|m| format!("{:?}", m))
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::Other {
                message: "script exhausted".to_string(),
            });
        }
        responses.remove(0)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Scorer that always fails.
pub struct BrokenScorer;

#[async_trait]
impl SentimentScorer for BrokenScorer {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn score(&self, _text: &str) -> CoreResult<RawScore> {
        Err(CoreError::scoring_unavailable("model is loading"))
    }
}

pub fn lexicon_analyzer() -> SentimentAnalyzer {
    SentimentAnalyzer::new(Arc::new(LexiconScorer::new()), SentimentThresholds::default())
}

/// Coach with the lexicon scorer, default rules and no provider.
pub fn offline_coach() -> Coach {
    Coach::new(lexicon_analyzer(), FallbackCoach::default())
}
