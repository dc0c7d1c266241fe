use super::{
    gateway::GatewayClient,
    types::{ChatHistoryEntry, ChatParams, Outcome},
};
use tracing::{info, warn};

pub const HISTORY_DISPLAY_LIMIT: usize = 5;

/// Session-scoped record of answered prompts. Grows unbounded, displays at most five.
#[derive(Debug, Default)]
pub struct ChatHistory {
    entries: Vec<ChatHistoryEntry>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prompt: String, response: String) {
        self.entries.push(ChatHistoryEntry::new(prompt, response));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The latest entries, most recent first, paired with their 1-based conversation number.
    pub fn recent(&self) -> Vec<(usize, &ChatHistoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .take(HISTORY_DISPLAY_LIMIT)
            .map(|(index, entry)| (index + 1, entry))
            .collect()
    }
}

pub struct ChatSession {
    client: GatewayClient,
    params: ChatParams,
    history: ChatHistory,
}

impl ChatSession {
    pub fn new(client: GatewayClient) -> Self {
        Self {
            client,
            params: ChatParams::default(),
            history: ChatHistory::new(),
        }
    }

    pub fn params(&self) -> &ChatParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ChatParams {
        &mut self.params
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub async fn submit(&mut self, prompt: &str) -> Outcome {
        if prompt.trim().is_empty() {
            return Outcome::EmptyPrompt;
        }

        match self.client.ask(prompt, &self.params).await {
            Ok(response) => {
                info!("Gateway answered with {} characters", response.len());
                self.history.push(prompt.to_string(), response.clone());
                Outcome::Response(response)
            }
            Err(e) => {
                warn!("Gateway call failed: {}", e);
                Outcome::Failed(e.to_string())
            }
        }
    }
}
