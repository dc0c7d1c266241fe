use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMessage {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

impl ModelMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![ContentBlock { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// The logical request shared by both calling conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseRequest {
    pub model_id: String,
    pub messages: Vec<ModelMessage>,
    pub inference_config: InferenceConfig,
}

/// Request body as sent on the wire; the model id travels in the URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPayload<'a> {
    pub messages: &'a [ModelMessage],
    pub inference_config: &'a InferenceConfig,
}

impl ConverseRequest {
    pub fn payload(&self) -> ModelPayload<'_> {
        ModelPayload {
            messages: &self.messages,
            inference_config: &self.inference_config,
        }
    }
}
