use crate::llm::Usage;

/// Running token totals across successful completions. Observability only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageTracker {
    pub total_prompt_tokens: u64,
    pub total_completion_tokens: u64,
    pub request_count: u64,
}

impl UsageTracker {
    pub fn track(&mut self, usage: Usage) {
        self.total_prompt_tokens += usage.prompt_tokens as u64;
        self.total_completion_tokens += usage.completion_tokens as u64;
        self.request_count += 1;
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_prompt_tokens + self.total_completion_tokens
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
