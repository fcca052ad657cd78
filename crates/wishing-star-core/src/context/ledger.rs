use crate::context::Persona;
use crate::llm::Message;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which timestamp difference is compared against the reset window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetMode {
    /// `last_activity - request > window`. With increasing timestamps the left
    /// side is negative, so history only resets if the clock ran backwards.
    #[default]
    AsWritten,
    /// `request - last_activity > window`: reset after a quiet period.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetWindow {
    pub window_ms: i64,
    pub mode: ResetMode,
}

impl ResetWindow {
    pub fn new(window_ms: i64, mode: ResetMode) -> Self {
        Self { window_ms, mode }
    }

    pub fn is_expired(&self, last_activity_ms: i64, request_ms: i64) -> bool {
        let delta = match self.mode {
            ResetMode::AsWritten => last_activity_ms - request_ms,
            ResetMode::Idle => request_ms - last_activity_ms,
        };
        delta > self.window_ms
    }
}

/// Ordered chat history of one user. `turns[0]` is always the persona's
/// system turn.
#[derive(Debug, Clone)]
pub struct ConversationLedger {
    user_id: u64,
    last_activity_ms: i64,
    turns: Vec<Message>,
    persona: Arc<Persona>,
    reset: ResetWindow,
}

impl ConversationLedger {
    pub fn new(user_id: u64, persona: Arc<Persona>, reset: ResetWindow, created_at_ms: i64) -> Self {
        Self {
            user_id,
            last_activity_ms: created_at_ms,
            turns: vec![persona.system_turn()],
            persona,
            reset,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn last_activity_ms(&self) -> i64 {
        self.last_activity_ms
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Never true: the system turn is always present.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_turn(&self) -> Option<&Message> {
        self.turns.last()
    }

    /// Append the user's message (addressed to the persona) and return the
    /// whole conversation to send. Resets to the system turn first when the
    /// reset window says so. Does not touch `last_activity_ms`.
    pub fn get_current_chat(&mut self, message: &str, request_ms: i64) -> &[Message] {
        if self.reset.is_expired(self.last_activity_ms, request_ms) {
            tracing::debug!(user_id = self.user_id, "Resetting chat history");
            self.turns.truncate(1);
        }
        self.turns.push(Message::user(self.persona.address(message)));
        &self.turns
    }

    pub fn update_response(&mut self, response: impl Into<String>, response_ms: i64) {
        self.last_activity_ms = response_ms;
        self.turns.push(Message::assistant(response));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    const WINDOW: i64 = 600_000;

    fn ledger(mode: ResetMode, created_at: i64) -> ConversationLedger {
        ConversationLedger::new(
            7,
            Arc::new(Persona::default()),
            ResetWindow::new(WINDOW, mode),
            created_at,
        )
    }

    #[test]
    fn test_new_ledger_has_only_system_turn() {
        let ledger = ledger(ResetMode::AsWritten, 1_000);
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.is_empty());
        assert_eq!(ledger.turns()[0].role(), Role::System);
        assert_eq!(ledger.last_activity_ms(), 1_000);
        assert_eq!(ledger.user_id(), 7);
    }

    #[test]
    fn test_get_current_chat_appends_prefixed_user_turn() {
        let mut ledger = ledger(ResetMode::AsWritten, 1_000);
        let turns = ledger.get_current_chat("hello", 2_000);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1], Message::user("Jirachi, hello"));
        // The request alone does not count as activity.
        assert_eq!(ledger.last_activity_ms(), 1_000);
    }

    #[test]
    fn test_get_current_chat_keeps_existing_prefix() {
        let mut ledger = ledger(ResetMode::AsWritten, 1_000);
        let turns = ledger.get_current_chat("Jirachi, make a wish", 2_000);
        assert_eq!(turns[1].content(), "Jirachi, make a wish");
    }

    #[test]
    fn test_update_response_appends_and_stamps() {
        let mut ledger = ledger(ResetMode::AsWritten, 1_000);
        ledger.get_current_chat("hi", 2_000);
        ledger.update_response("Hello friend!", 3_000);

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.last_turn(), Some(&Message::assistant("Hello friend!")));
        assert_eq!(ledger.last_activity_ms(), 3_000);
    }

    #[test]
    fn test_update_response_never_removes_turns() {
        let mut ledger = ledger(ResetMode::AsWritten, 0);
        for i in 0..5 {
            let before = ledger.len();
            ledger.update_response(format!("reply {i}"), i);
            assert_eq!(ledger.len(), before + 1);
        }
        assert_eq!(ledger.turns()[0].role(), Role::System);
    }

    #[test]
    fn test_as_written_does_not_reset_after_long_silence() {
        // Documents the inverted comparison: an hour of silence keeps history.
        let mut ledger = ledger(ResetMode::AsWritten, 0);
        ledger.get_current_chat("first", 1_000);
        ledger.update_response("one", 2_000);

        let turns = ledger.get_current_chat("second", 2_000 + 3_600_000);
        assert_eq!(turns.len(), 4);
    }

    #[test]
    fn test_as_written_resets_when_request_predates_activity() {
        let mut ledger = ledger(ResetMode::AsWritten, 0);
        ledger.get_current_chat("first", 1_000);
        ledger.update_response("one", 2_000_000);

        // last_activity - request = 2_000_000 - 1_000 > WINDOW
        let turns = ledger.get_current_chat("second", 1_000);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role(), Role::System);
        assert_eq!(turns[1].content(), "Jirachi, second");
    }

    #[test]
    fn test_as_written_boundary_is_exclusive() {
        let mut ledger = ledger(ResetMode::AsWritten, WINDOW + 10);
        ledger.get_current_chat("first", 10);
        // Exactly WINDOW apart: not expired, history kept.
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_idle_mode_resets_after_window() {
        let mut ledger = ledger(ResetMode::Idle, 0);
        ledger.get_current_chat("first", 1_000);
        ledger.update_response("one", 2_000);

        let turns = ledger.get_current_chat("later", 2_000 + WINDOW + 1);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content(), "Jirachi, later");
    }

    #[test]
    fn test_idle_mode_keeps_recent_history() {
        let mut ledger = ledger(ResetMode::Idle, 0);
        ledger.get_current_chat("first", 1_000);
        ledger.update_response("one", 2_000);

        let turns = ledger.get_current_chat("soon", 2_000 + WINDOW);
        assert_eq!(turns.len(), 4);
    }
}
