//! Turns gateway events into inference backend calls and back.
//!
//! A [`Translator`] owns a shared backend handle and a [`Convention`]. Every
//! call to [`Translator::handle`] yields exactly one [`InvocationResponse`]:
//! 200 with a `response` text, 400 for a missing prompt, or 500 for anything
//! else that went wrong.

mod types;

pub use types::*;

use crate::{
    Error, Result,
    backend::{ConverseRequest, InferenceBackend, InferenceConfig, ModelMessage},
    config::{BackendConfig, Convention},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

pub struct Translator {
    backend: Arc<dyn InferenceBackend>,
    model_id: String,
    convention: Convention,
}

impl Translator {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        model_id: impl Into<String>,
        convention: Convention,
    ) -> Self {
        Self {
            backend,
            model_id: model_id.into(),
            convention,
        }
    }

    pub fn from_config(backend: Arc<dyn InferenceBackend>, config: &BackendConfig) -> Self {
        Self::new(backend, config.model_id.clone(), config.convention)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Runs one invocation end to end. Never fails; errors become error bodies.
    pub async fn handle(&self, event: Value) -> InvocationResponse {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "invocation",
            %request_id,
            convention = ?self.convention,
            model_id = %self.model_id
        );

        async move {
            match self.translate(&event).await {
                Ok(text) => {
                    info!("Invocation succeeded with {} characters of output", text.len());
                    InvocationResponse::success(&text)
                }
                Err(e) => {
                    let status = e.status_code();
                    if status.is_client_error() {
                        warn!("Rejected invocation: {}", e);
                    } else {
                        error!("Invocation failed: {}", e);
                    }
                    InvocationResponse::failure(status.as_u16(), &e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn translate(&self, event: &Value) -> Result<String> {
        let request = parse_event(event)?;
        let converse_request = self.build_request(&request);
        let reply = self.invoke(&converse_request).await?;
        extract_text(&reply)
    }

    pub fn build_request(&self, request: &InvocationRequest) -> ConverseRequest {
        ConverseRequest {
            model_id: self.model_id.clone(),
            messages: vec![ModelMessage::user(request.prompt.clone())],
            inference_config: InferenceConfig {
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            },
        }
    }

    /// Submits the request using the configured convention.
    pub async fn invoke(&self, request: &ConverseRequest) -> Result<Value> {
        debug!(
            "Invoking backend with temperature={} max_tokens={}",
            request.inference_config.temperature, request.inference_config.max_tokens
        );

        match self.convention {
            Convention::Converse => self.backend.converse(request).await,
            Convention::Invoke => {
                let body = serde_json::to_string(&request.payload())?;
                let bytes = self.backend.invoke_model(&request.model_id, body).await?;
                serde_json::from_slice(&bytes).map_err(|e| {
                    Error::upstream(format!("Inference backend returned malformed JSON: {}", e))
                })
            }
        }
    }
}

/// Reads the payload either from a JSON-encoded `body` string or from the event itself.
pub fn parse_event(event: &Value) -> Result<InvocationRequest> {
    let decoded;
    let payload = match event.get("body") {
        Some(Value::String(raw)) => {
            decoded = serde_json::from_str::<Value>(raw)?;
            &decoded
        }
        Some(other) => {
            return Err(Error::unexpected(format!(
                "event body must be a JSON-encoded string, got {}",
                json_kind(other)
            )));
        }
        None => event,
    };

    let prompt = payload
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|prompt| !prompt.is_empty())
        .ok_or_else(|| Error::validation("Prompt required"))?;

    let temperature = match present(payload, "temperature") {
        None => DEFAULT_TEMPERATURE,
        Some(value) => value
            .as_f64()
            .filter(|t| (0.0..=1.0).contains(t))
            .ok_or_else(|| {
                Error::invalid_parameter(format!(
                    "temperature must be a number between 0 and 1, got {}",
                    value
                ))
            })?,
    };

    let max_tokens = match present(payload, "max_tokens").or_else(|| present(payload, "maxTokens")) {
        None => DEFAULT_MAX_TOKENS,
        Some(value) => value
            .as_u64()
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                Error::invalid_parameter(format!(
                    "max_tokens must be a positive integer, got {}",
                    value
                ))
            })?,
    };

    Ok(InvocationRequest {
        prompt: prompt.to_string(),
        temperature,
        max_tokens,
    })
}

/// Pulls `output.message.content[0].text` out of a backend reply.
pub fn extract_text(reply: &Value) -> Result<String> {
    reply
        .pointer("/output/message/content/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::upstream("Inference backend reply is missing output.message.content[0].text")
        })
}

// Explicit nulls count as absent.
fn present<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|value| !value.is_null())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_parse_top_level_payload_with_defaults() {
        let request = parse_event(&json!({"prompt": "What is AI?"})).unwrap();
        assert_eq!(
            request,
            InvocationRequest {
                prompt: "What is AI?".to_string(),
                temperature: 0.7,
                max_tokens: 1000,
            }
        );
    }

    #[test]
    fn test_parse_encoded_body() {
        let body = json!({"prompt": "Explain ML", "temperature": 0.6, "max_tokens": 300});
        let event = json!({"body": body.to_string()});

        let request = parse_event(&event).unwrap();
        assert_eq!(request.prompt, "Explain ML");
        assert_eq!(request.temperature, 0.6);
        assert_eq!(request.max_tokens, 300);
    }

    #[test]
    fn test_max_tokens_camel_case_alias() {
        let request = parse_event(&json!({"prompt": "hi", "maxTokens": 42})).unwrap();
        assert_eq!(request.max_tokens, 42);

        let request =
            parse_event(&json!({"prompt": "hi", "max_tokens": 7, "maxTokens": 42})).unwrap();
        assert_eq!(request.max_tokens, 7);
    }

    #[test]
    fn test_whitespace_prompt_is_accepted() {
        assert_eq!(parse_event(&json!({"prompt": "  "})).unwrap().prompt, "  ");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"prompt": ""}))]
    #[case(json!({"prompt": null}))]
    #[case(json!({"prompt": 42}))]
    #[case(json!({"body": "{}"}))]
    #[case(json!({"body": "{\"prompt\":\"\"}"}))]
    fn test_missing_prompt_is_rejected(#[case] event: Value) {
        let err = parse_event(&event).unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg == "Prompt required"));
    }

    #[rstest]
    #[case(json!({"prompt": "hi", "temperature": 1.5}))]
    #[case(json!({"prompt": "hi", "temperature": -0.1}))]
    #[case(json!({"prompt": "hi", "temperature": "hot"}))]
    #[case(json!({"prompt": "hi", "max_tokens": 0}))]
    #[case(json!({"prompt": "hi", "max_tokens": -5}))]
    #[case(json!({"prompt": "hi", "max_tokens": 12.5}))]
    fn test_out_of_range_parameters_are_internal_errors(#[case] event: Value) {
        let err = parse_event(&event).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert_eq!(err.status_code().as_u16(), 500);
    }

    #[test]
    fn test_temperature_keeps_full_precision() {
        let request = parse_event(&json!({"prompt": "hi", "temperature": 0.123456789})).unwrap();
        assert_eq!(request.temperature, 0.123456789);
    }

    #[test]
    fn test_null_parameters_fall_back_to_defaults() {
        let request =
            parse_event(&json!({"prompt": "hi", "temperature": null, "max_tokens": null}))
                .unwrap();
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_malformed_body_is_not_a_validation_error() {
        let err = parse_event(&json!({"body": "{not json"})).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.status_code().as_u16(), 500);

        let err = parse_event(&json!({"body": {"prompt": "hi"}})).unwrap_err();
        assert!(err.to_string().contains("got an object"));
    }

    #[test]
    fn test_extract_text() {
        let reply = json!({
            "output": {"message": {"role": "assistant", "content": [{"text": "AI is..."}]}},
            "stopReason": "end_turn"
        });
        assert_eq!(extract_text(&reply).unwrap(), "AI is...");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"output": {"message": {"content": []}}}))]
    #[case(json!({"output": {"message": {"content": [{"image": {}}]}}}))]
    #[case(json!({"output": {"message": {"content": [{"text": 5}]}}}))]
    fn test_extract_text_missing_path(#[case] reply: Value) {
        assert!(matches!(extract_text(&reply), Err(Error::Upstream(_))));
    }
}
