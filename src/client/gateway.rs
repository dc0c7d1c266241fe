use super::types::{ChatParams, GatewayRequest};
use crate::{Error, Result, config::ClientConfig};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const NO_RESPONSE: &str = "No response received";

/// Posts prompts to the gateway endpoint.
pub struct GatewayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GatewayClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.gateway_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn ask(&self, prompt: &str, params: &ChatParams) -> Result<String> {
        let payload = GatewayRequest {
            prompt,
            temperature: params.temperature(),
            max_tokens: params.max_tokens(),
        };

        debug!("Posting prompt to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let raw = response.text().await?;
        let reply: Value = serde_json::from_str(&raw)?;

        unwrap_reply(&reply)
    }
}

/// Finds the model text in whichever envelope the gateway used.
pub fn unwrap_reply(reply: &Value) -> Result<String> {
    let Some(object) = reply.as_object() else {
        return Err(Error::unexpected(format!(
            "Unexpected response format: {}",
            reply
        )));
    };

    // Proxy envelope: the handler's JSON travels as a string in `body`
    if let Some(Value::String(encoded)) = object.get("body") {
        let decoded: Value = serde_json::from_str(encoded)?;
        let body = decoded.as_object().ok_or_else(|| {
            Error::unexpected(format!("Unexpected response body: {}", decoded))
        })?;
        return Ok(body
            .get("response")
            .map(render)
            .unwrap_or_else(|| NO_RESPONSE.to_string()));
    }

    if let Some(response) = object.get("response") {
        return Ok(render(response));
    }

    Ok(format!("Unexpected response format: {}", reply))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
