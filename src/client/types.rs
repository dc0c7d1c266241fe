use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 1.0;
pub const MIN_MAX_TOKENS: u32 = 100;
pub const MAX_MAX_TOKENS: u32 = 4000;
const MAX_TOKENS_STEP: u32 = 100;

/// Invocation knobs, held on the same grid as the UI sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatParams {
    temperature: f64,
    max_tokens: u32,
}

impl ChatParams {
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Clamps to 0.0..=1.0 and snaps to a 0.1 step.
    pub fn set_temperature(&mut self, temperature: f64) -> f64 {
        let clamped = temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        self.temperature = (clamped * 10.0).round() / 10.0;
        self.temperature
    }

    /// Clamps to 100..=4000 and snaps to a 100 step.
    pub fn set_max_tokens(&mut self, max_tokens: u32) -> u32 {
        let clamped = max_tokens.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS);
        let snapped = (clamped + MAX_TOKENS_STEP / 2) / MAX_TOKENS_STEP * MAX_TOKENS_STEP;
        self.max_tokens = snapped.min(MAX_MAX_TOKENS);
        self.max_tokens
    }
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GatewayRequest<'a> {
    pub prompt: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl ChatHistoryEntry {
    pub fn new(prompt: String, response: String) -> Self {
        Self {
            prompt,
            response,
            created_at: Utc::now(),
        }
    }
}

/// Result of one send action in a chat session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was sent; the prompt was blank.
    EmptyPrompt,
    Response(String),
    Failed(String),
}
