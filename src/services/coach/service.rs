//! Coach Service
//!
//! Runs one check-in end to end: score the note, try a single generation
//! call, validate the reply and fall back to the rule-based selector on any
//! failure. Never fails past this boundary except for journal I/O in
//! [`Coach::coach_and_log`].

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use daily_up_core::{
    CheckIn, CoachResponse, CoreError, CoreResult, FallbackReason, JournalEntry, Profile,
    Sentiment, TimeSlot, Tone,
};
use daily_up_llm::{LlmError, LlmProvider, LlmRequestOptions, Message};

use super::parser::parse_coach_reply;
use super::prompt::{build_user_prompt, PromptContext, COACH_SYSTEM_PROMPT};
use crate::services::fallback::{FallbackCoach, FallbackRequest};
use crate::services::keywords::topic_summary;
use crate::services::sentiment::SentimentAnalyzer;
use crate::storage::journal::JournalStore;
use crate::utils::error::AppResult;

/// Default upper bound on the generation call
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(20);

/// Default number of journal entries feeding `recent_steps`
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

/// One check-in submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachRequest {
    pub note: String,
    pub slot: TimeSlot,
    /// Overrides the profile's tone when set
    #[serde(default)]
    pub tone: Option<Tone>,
    /// Plan steps from recent check-ins, newest first
    #[serde(default)]
    pub recent_steps: Vec<String>,
}

impl CoachRequest {
    pub fn new(slot: TimeSlot, note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            slot,
            tone: None,
            recent_steps: Vec::new(),
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn with_recent_steps(mut self, recent_steps: Vec<String>) -> Self {
        self.recent_steps = recent_steps;
        self
    }
}

/// Per-check-in generation lifecycle.
///
/// The usual path is `Idle → Sent → Parsed | Invalid | Errored → Responded`.
/// Checks made before any call skip `Sent`: an empty note or no provider go
/// straight from `Idle` to `Responded`, and a provider without credentials
/// records `Idle → Errored → Responded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachState {
    Idle,
    /// Request handed to the provider
    Sent,
    /// Reply validated as a coach response
    Parsed,
    /// Reply received but unusable
    Invalid,
    /// Provider unavailable, failed or timed out
    Errored,
    /// A response is ready for the caller
    Responded,
}

/// Result of one check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachOutcome {
    pub check_in: CheckIn,
    pub response: CoachResponse,
    /// Why the rule-based selector answered, if it did
    pub fallback_reason: Option<FallbackReason>,
    /// States visited, ending in `Responded`
    pub transitions: Vec<CoachState>,
}

impl CoachOutcome {
    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }

    /// Informational notice to show next to the plan.
    pub fn notice(&self) -> Option<&'static str> {
        self.fallback_reason.as_ref().map(FallbackReason::notice)
    }

    /// Last state before `Responded`, or `Idle` when generation was skipped.
    pub fn generation_state(&self) -> CoachState {
        self.transitions
            .iter()
            .rev()
            .find(|s| **s != CoachState::Responded)
            .copied()
            .unwrap_or(CoachState::Idle)
    }

    pub fn to_entry(&self) -> JournalEntry {
        JournalEntry::new(self.check_in.clone(), self.response.clone())
    }
}

/// The micro-coach: sentiment, generation with fallback, optional journal.
pub struct Coach {
    sentiment: SentimentAnalyzer,
    fallback: FallbackCoach,
    provider: Option<Arc<dyn LlmProvider>>,
    journal: Option<Arc<dyn JournalStore>>,
    profile: Profile,
    timeout: Duration,
    history_window: usize,
}

impl Coach {
    pub fn new(sentiment: SentimentAnalyzer, fallback: FallbackCoach) -> Self {
        Self {
            sentiment,
            fallback,
            provider: None,
            journal: None,
            profile: Profile::default(),
            timeout: DEFAULT_GENERATION_TIMEOUT,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_journal(mut self, journal: Arc<dyn JournalStore>) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_history_window(mut self, history_window: usize) -> Self {
        self.history_window = history_window;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn journal(&self) -> Option<&Arc<dyn JournalStore>> {
        self.journal.as_ref()
    }

    /// Run one check-in. Always yields a three-step response.
    pub async fn coach(&self, request: CoachRequest) -> CoachOutcome {
        let tone = request.tone.unwrap_or(self.profile.tone);
        let sentiment = self.sentiment.analyze(&request.note).await;
        let check_in = CheckIn::new(request.slot, request.note.clone(), tone, sentiment);

        info!(
            id = %check_in.id,
            slot = %request.slot,
            tone = %tone,
            sentiment = %sentiment.label,
            score = sentiment.score,
            "Check-in received"
        );

        let mut transitions = vec![CoachState::Idle];
        let generated = self
            .generate(&request, tone, sentiment, &mut transitions)
            .await;

        let (response, fallback_reason) = match generated {
            Ok(response) => (response, None),
            Err(reason) => {
                warn!(id = %check_in.id, reason = %reason, "Using fallback coach");
                let response = self.fallback.select(&FallbackRequest {
                    note: &request.note,
                    slot: request.slot,
                    sentiment: sentiment.label,
                    tone,
                    profile: &self.profile,
                    recent_steps: &request.recent_steps,
                });
                (response, Some(reason))
            }
        };
        transitions.push(CoachState::Responded);

        info!(
            id = %check_in.id,
            source = %response.source,
            "Check-in answered"
        );

        CoachOutcome {
            check_in,
            response,
            fallback_reason,
            transitions,
        }
    }

    /// Run one check-in with `recent_steps` read from the journal, then append it.
    pub async fn coach_and_log(&self, mut request: CoachRequest) -> AppResult<CoachOutcome> {
        if let Some(journal) = &self.journal {
            if request.recent_steps.is_empty() {
                request.recent_steps = journal.recent_steps(self.history_window)?;
            }
        }

        let outcome = self.coach(request).await;

        if let Some(journal) = &self.journal {
            journal.append(&outcome.to_entry())?;
            debug!(id = %outcome.check_in.id, journal = journal.name(), "Check-in logged");
        }

        Ok(outcome)
    }

    /// Attempt the single generation call, recording lifecycle transitions.
    async fn generate(
        &self,
        request: &CoachRequest,
        tone: Tone,
        sentiment: Sentiment,
        transitions: &mut Vec<CoachState>,
    ) -> Result<CoachResponse, FallbackReason> {
        if request.note.trim().is_empty() {
            return Err(FallbackReason::EmptyNote);
        }

        let provider = self.provider.as_ref().ok_or(FallbackReason::NoProvider)?;

        if !provider.has_credentials() {
            transitions.push(CoachState::Errored);
            return Err(CoreError::generation_unavailable(format!(
                "{} has no credentials configured",
                provider.name()
            ))
            .into());
        }

        let topics = topic_summary(&request.note, self.fallback.rules().max_keywords);
        let user_prompt = build_user_prompt(&PromptContext {
            slot: request.slot,
            note: &request.note,
            sentiment,
            tone,
            topics: &topics,
            profile: &self.profile,
            recent_steps: &request.recent_steps,
        });

        debug!(
            provider = provider.name(),
            model = provider.model(),
            preview = %user_prompt.chars().take(300).collect::<String>(),
            "Sending coach prompt"
        );
        transitions.push(CoachState::Sent);

        let reply = match self.send(provider.as_ref(), user_prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                transitions.push(match e {
                    CoreError::SchemaViolation(_) => CoachState::Invalid,
                    _ => CoachState::Errored,
                });
                return Err(e.into());
            }
        };

        debug!(
            len = reply.len(),
            preview = %reply.chars().take(300).collect::<String>(),
            "Coach reply received"
        );

        match parse_coach_reply(&reply, request.slot) {
            Ok(response) => {
                transitions.push(CoachState::Parsed);
                Ok(response)
            }
            Err(e) => {
                transitions.push(CoachState::Invalid);
                Err(e.into())
            }
        }
    }

    /// One bounded provider call returning the reply text.
    async fn send(&self, provider: &dyn LlmProvider, user_prompt: String) -> CoreResult<String> {
        let options = LlmRequestOptions {
            json_mode: true,
            ..Default::default()
        };

        let call = provider.send_message(
            vec![Message::user(user_prompt)],
            Some(COACH_SYSTEM_PROMPT.to_string()),
            options,
        );

        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(LlmError::Timeout {
                    seconds: self.timeout.as_secs(),
                }
                .into())
            }
        };

        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| CoreError::schema_violation("empty reply"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use daily_up_core::{ResponseSource, SentimentLabel, SentimentThresholds, PLAN_STEP_COUNT};
    use daily_up_llm::{LlmResult, LlmResponse, ProviderConfig, StopReason, UsageStats};

    use crate::services::sentiment::LexiconScorer;
    use crate::storage::journal::MemoryJournal;

    struct MockLlmProvider {
        /// Responses to return in sequence; each call pops the first response.
        responses: std::sync::Mutex<Vec<LlmResult<LlmResponse>>>,
        credentials: bool,
        config: ProviderConfig,
    }

    impl MockLlmProvider {
        fn new(responses: Vec<LlmResult<LlmResponse>>) -> Self {
            Self {
                responses: std::sync::Mutex::new(responses),
                credentials: true,
                config: ProviderConfig::default(),
            }
        }

        fn with_text_response(text: &str) -> Self {
            Self::new(vec![Ok(LlmResponse {
                content: Some(text.to_string()),
                stop_reason: StopReason::EndTurn,
                usage: UsageStats::default(),
                model: "mock-model".to_string(),
            })])
        }

        fn without_credentials() -> Self {
            Self {
                credentials: false,
                ..Self::new(vec![])
            }
        }

        fn remaining(&self) -> usize {
            self.responses.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        fn has_credentials(&self) -> bool {
            self.credentials
        }

        async fn send_message(
            &self,
            _messages: Vec<Message>,
            _system: Option<String>,
            _request_options: LlmRequestOptions,
        ) -> LlmResult<LlmResponse> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Err(LlmError::Other {
                    message: "No more mock responses".to_string(),
                })
            } else {
                responses.remove(0)
            }
        }

        fn config(&self) -> &ProviderConfig {
            &self.config
        }
    }

    struct HangingProvider {
        config: ProviderConfig,
    }

    #[async_trait]
    impl LlmProvider for HangingProvider {
        fn name(&self) -> &'static str {
            "hanging"
        }

        fn model(&self) -> &str {
            "slow-model"
        }

        async fn send_message(
            &self,
            _messages: Vec<Message>,
            _system: Option<String>,
            _request_options: LlmRequestOptions,
        ) -> LlmResult<LlmResponse> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Err(LlmError::Other {
                message: "unreachable".to_string(),
            })
        }

        fn config(&self) -> &ProviderConfig {
            &self.config
        }
    }

    fn coach() -> Coach {
        let sentiment =
            SentimentAnalyzer::new(Arc::new(LexiconScorer::new()), SentimentThresholds::default());
        Coach::new(sentiment, FallbackCoach::default())
    }

    const GOOD_REPLY: &str = r#"{"analysis":"Nice energy.","plan":["Open the draft","Write 200 words","Send it"],"mantra":"Ship small"}"#;

    #[tokio::test]
    async fn test_ai_reply_is_used() {
        let provider = Arc::new(MockLlmProvider::with_text_response(GOOD_REPLY));
        let outcome = coach()
            .with_provider(provider)
            .coach(CoachRequest::new(TimeSlot::Morning, "Feeling great about the draft"))
            .await;

        assert_eq!(outcome.response.source, ResponseSource::Ai);
        assert_eq!(outcome.response.mantra, "Ship small");
        assert!(outcome.fallback_reason.is_none());
        assert_eq!(
            outcome.transitions,
            vec![
                CoachState::Idle,
                CoachState::Sent,
                CoachState::Parsed,
                CoachState::Responded
            ]
        );
        assert_eq!(outcome.check_in.sentiment_label, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn test_no_provider_uses_fallback() {
        let outcome = coach()
            .coach(CoachRequest::new(TimeSlot::Midday, "exam in two days"))
            .await;
        assert_eq!(outcome.response.source, ResponseSource::Fallback);
        assert_eq!(outcome.fallback_reason, Some(FallbackReason::NoProvider));
        assert_eq!(outcome.generation_state(), CoachState::Idle);
        assert!(outcome.notice().is_some());
    }

    #[tokio::test]
    async fn test_provider_error_uses_fallback() {
        let provider = Arc::new(MockLlmProvider::new(vec![Err(LlmError::ServerError {
            message: "boom".to_string(),
            status: Some(503),
        })]));
        let outcome = coach()
            .with_provider(provider)
            .coach(CoachRequest::new(TimeSlot::Evening, "so stressed"))
            .await;

        assert!(outcome.response.is_fallback());
        assert_eq!(outcome.generation_state(), CoachState::Errored);
        assert!(matches!(
            outcome.fallback_reason,
            Some(FallbackReason::GenerationUnavailable { .. })
        ));
        assert!(outcome.response.plan_steps[0].starts_with("Brain-dump"));
    }

    #[tokio::test]
    async fn test_invalid_reply_uses_fallback() {
        let provider = Arc::new(MockLlmProvider::with_text_response("Just relax and breathe."));
        let outcome = coach()
            .with_provider(provider)
            .coach(CoachRequest::new(TimeSlot::Morning, "lazy morning"))
            .await;

        assert_eq!(outcome.generation_state(), CoachState::Invalid);
        assert!(matches!(
            outcome.fallback_reason,
            Some(FallbackReason::SchemaViolation { .. })
        ));
        assert_eq!(outcome.response.plan_steps.len(), PLAN_STEP_COUNT);
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_the_call() {
        let provider = Arc::new(MockLlmProvider::without_credentials());
        let outcome = coach()
            .with_provider(provider.clone())
            .coach(CoachRequest::new(TimeSlot::Morning, "plan my day"))
            .await;

        assert!(outcome.used_fallback());
        assert_eq!(
            outcome.transitions,
            vec![CoachState::Idle, CoachState::Errored, CoachState::Responded]
        );
        assert_eq!(provider.remaining(), 0);
    }

    #[tokio::test]
    async fn test_timeout_uses_fallback() {
        let outcome = coach()
            .with_provider(Arc::new(HangingProvider {
                config: ProviderConfig::default(),
            }))
            .with_timeout(Duration::from_millis(20))
            .coach(CoachRequest::new(TimeSlot::Midday, "keep going"))
            .await;

        assert_eq!(outcome.generation_state(), CoachState::Errored);
        match outcome.fallback_reason {
            Some(FallbackReason::GenerationUnavailable { message }) => {
                assert!(message.contains("Timed out"))
            }
            other => panic!("unexpected reason: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_note_never_calls_provider() {
        let provider = Arc::new(MockLlmProvider::with_text_response(GOOD_REPLY));
        let outcome = coach()
            .with_provider(provider.clone())
            .coach(CoachRequest::new(TimeSlot::Morning, "   "))
            .await;

        assert_eq!(outcome.check_in.sentiment(), Sentiment::neutral());
        assert_eq!(outcome.fallback_reason, Some(FallbackReason::EmptyNote));
        assert_eq!(outcome.response.mantra, "One small step beats zero");
        assert_eq!(provider.remaining(), 1);
    }

    #[tokio::test]
    async fn test_request_tone_overrides_profile() {
        let profile = Profile {
            tone: Tone::Playful,
            ..Default::default()
        };
        let c = coach().with_profile(profile);

        let outcome = c.coach(CoachRequest::new(TimeSlot::Morning, "gym")).await;
        assert_eq!(outcome.check_in.tone, Tone::Playful);
        assert!(outcome.response.analysis.starts_with("Game on!"));

        let outcome = c
            .coach(CoachRequest::new(TimeSlot::Morning, "gym").with_tone(Tone::Direct))
            .await;
        assert_eq!(outcome.check_in.tone, Tone::Direct);
    }

    #[tokio::test]
    async fn test_coach_and_log_reads_history_and_appends() {
        let journal = Arc::new(MemoryJournal::new());
        let c = coach().with_journal(journal.clone());

        let first = c
            .coach_and_log(CoachRequest::new(TimeSlot::Evening, "workout done"))
            .await
            .unwrap();
        let second = c
            .coach_and_log(CoachRequest::new(TimeSlot::Evening, "workout done"))
            .await
            .unwrap();

        assert_eq!(journal.read_all().unwrap().len(), 2);
        for step in &second.response.plan_steps {
            assert!(!first.response.plan_steps.contains(step));
        }
    }
}
