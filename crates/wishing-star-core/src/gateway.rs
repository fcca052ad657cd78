use std::collections::HashMap;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::{model_for_tier, ChatSettings};
use crate::context::{ConversationLedger, Persona, ResetWindow};
use crate::error::{Result, StarError};
use crate::gate::{GateDecision, RequestGate};
use crate::llm::{ChatRequest, CompletionService, OpenAIClient, UsageTracker};

/// Per-user chat state in front of one completion-service credential.
///
/// `chat` takes `&mut self`: callers that share a gateway between tasks must
/// serialize access themselves (e.g. behind a `tokio::sync::Mutex`).
pub struct CompletionGateway {
    service: Box<dyn CompletionService>,
    clock: Box<dyn Clock>,
    model: String,
    temperature: f32,
    gate: RequestGate,
    reset: ResetWindow,
    persona: Arc<Persona>,
    ledgers: HashMap<u64, ConversationLedger>,
    usage: UsageTracker,
}

impl CompletionGateway {
    pub fn new(
        service: Box<dyn CompletionService>,
        model: impl Into<String>,
        chat: &ChatSettings,
    ) -> Self {
        Self {
            service,
            clock: Box::new(SystemClock),
            model: model.into(),
            temperature: chat.temperature,
            gate: RequestGate::new(chat.minimum_request_interval_ms),
            reset: chat.reset_window(),
            persona: Arc::new(chat.persona()),
            ledgers: HashMap::new(),
            usage: UsageTracker::default(),
        }
    }

    /// OpenAI-backed gateway with default chat settings.
    pub fn openai(api_key: impl Into<String>, use_alternate_model: bool) -> Self {
        Self::new(
            Box::new(OpenAIClient::new(api_key)),
            model_for_tier(use_alternate_model),
            &ChatSettings::default(),
        )
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Send `message` on behalf of `user_id` and return the assistant's reply.
    ///
    /// Fails with `RateLimitExceeded` while the global gate is closed, with
    /// `EmptyResponse` or `MalformedResponse` when the reply is unusable, and
    /// passes completion-service errors through untouched. On any failure
    /// after the gate check the user turn stays in the ledger.
    pub async fn chat(&mut self, message: &str, user_id: u64) -> Result<String> {
        let request_ms = self.clock.now_ms();
        if let GateDecision::Closed { retry_after_ms } = self.gate.check(request_ms) {
            tracing::debug!(user_id, retry_after_ms, "Chat request rejected by rate gate");
            return Err(StarError::RateLimitExceeded { retry_after_ms });
        }

        let ledger = self.ledgers.entry(user_id).or_insert_with(|| {
            ConversationLedger::new(
                user_id,
                Arc::clone(&self.persona),
                self.reset,
                self.clock.now_ms(),
            )
        });

        tracing::info!(
            "Initiating chat request from user {}. Message content:\n{}",
            user_id,
            message
        );
        let request = ChatRequest {
            model: &self.model,
            messages: ledger.get_current_chat(message, request_ms),
            temperature: self.temperature,
        };
        let completion = self.service.complete(&request).await?;
        let response_ms = self.clock.now_ms();

        let (reply, usage) = completion.into_reply().map_err(|e| {
            tracing::warn!(user_id, "Chat request returned no usable reply: {}", e);
            e
        })?;

        tracing::info!(
            "Chat request complete. #Prompt tokens: {}; #Completion tokens: {}. Response:\n{}",
            usage.prompt_tokens,
            usage.completion_tokens,
            reply
        );
        self.usage.track(usage);
        self.gate.record_success(response_ms);
        ledger.update_response(reply.as_str(), response_ms);
        Ok(reply)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn last_success_ms(&self) -> i64 {
        self.gate.last_success_ms()
    }

    pub fn minimum_request_interval_ms(&self) -> i64 {
        self.gate.minimum_interval_ms()
    }

    pub fn reset_window(&self) -> ResetWindow {
        self.reset
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    pub fn ledger(&self, user_id: u64) -> Option<&ConversationLedger> {
        self.ledgers.get(&user_id)
    }

    pub fn ledger_count(&self) -> usize {
        self.ledgers.len()
    }

    /// Drop a user's history. Nothing is evicted unless the host asks.
    pub fn forget(&mut self, user_id: u64) -> bool {
        self.ledgers.remove(&user_id).is_some()
    }
}
