use super::types::ConverseRequest;
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use reqwest::{StatusCode, Url, header};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Structured call: messages and inference config are passed as-is.
    async fn converse(&self, request: &ConverseRequest) -> Result<Value>;

    /// Generic call: `body` is an opaque JSON document, the reply is raw bytes.
    async fn invoke_model(&self, model_id: &str, body: String) -> Result<Vec<u8>>;
}

/// Bedrock Runtime over its REST API, authenticated with a bearer API key.
pub struct BedrockHttpClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl BedrockHttpClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", config.region));
        let base_url = Url::parse(&endpoint)
            .map_err(|e| Error::config(format!("Invalid backend endpoint '{}': {}", endpoint, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created Bedrock client for {}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn model_url(&self, model_id: &str, action: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("Backend endpoint cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["model", model_id, action]);
        Ok(url)
    }

    async fn send_request(&self, model_id: &str, action: &str, body: String) -> Result<Vec<u8>> {
        let url = self.model_url(model_id, action)?;
        debug!("Sending {} request to {}", action, url);

        let mut req_builder = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(body);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.bearer_auth(api_key);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| Error::upstream(format!("Failed to reach inference backend: {}", e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::upstream(format!("Failed to read inference backend reply: {}", e)))?;

        if !status.is_success() {
            return Err(Error::upstream(describe_failure(status, &bytes)));
        }

        debug!("Received {} bytes from {} call", bytes.len(), action);
        Ok(bytes.to_vec())
    }
}

fn describe_failure(status: StatusCode, body: &[u8]) -> String {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    format!("Inference backend returned {}: {}", status, message)
}

#[async_trait]
impl InferenceBackend for BedrockHttpClient {
    async fn converse(&self, request: &ConverseRequest) -> Result<Value> {
        let body = serde_json::to_string(&request.payload())?;
        let bytes = self.send_request(&request.model_id, "converse", body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn invoke_model(&self, model_id: &str, body: String) -> Result<Vec<u8>> {
        self.send_request(model_id, "invoke", body).await
    }
}
