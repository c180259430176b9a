//! Token usage accounting for a session.

use std::collections::HashMap;

use crate::TokenUsage;

/// Cumulative token usage, broken down by model.
#[derive(Debug, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    by_model: HashMap<String, TokenUsage>,
    last: Option<TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record usage from one successful model call.
    pub fn record(&mut self, model: &str, usage: &TokenUsage) {
        add(&mut self.total, usage);
        add(self.by_model.entry(model.to_string()).or_default(), usage);
        self.last = Some(*usage);
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn for_model(&self, model: &str) -> Option<&TokenUsage> {
        self.by_model.get(model)
    }

    /// Usage of the most recent call.
    pub fn last(&self) -> Option<&TokenUsage> {
        self.last.as_ref()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// One-line human summary, e.g. for a `/usage` command.
    pub fn summary(&self) -> String {
        format!(
            "{} call(s), {} input + {} output = {} tokens",
            self.call_count,
            self.total.input_tokens,
            self.total.output_tokens,
            self.total.total_tokens()
        )
    }
}

fn add(into: &mut TokenUsage, usage: &TokenUsage) {
    into.input_tokens = into.input_tokens.saturating_add(usage.input_tokens);
    into.output_tokens = into.output_tokens.saturating_add(usage.output_tokens);
}
