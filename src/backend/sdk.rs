use super::{client::InferenceBackend, types::ConverseRequest};
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, retry::RetryConfig, timeout::TimeoutConfig};
use aws_sdk_bedrockruntime::{
    Client,
    error::DisplayErrorContext,
    primitives::Blob,
    types::{ContentBlock, ConversationRole, InferenceConfiguration, Message},
};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Bedrock Runtime through the AWS SDK, signed with the default credential chain.
pub struct BedrockSdkClient {
    client: Client,
}

impl BedrockSdkClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Loads region and credentials the way the AWS CLI does. Retries are disabled.
    pub async fn from_config(config: &BackendConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());

        if let Some(secs) = config.timeout_secs {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(secs))
                    .build(),
            );
        }

        let sdk_config = loader.load().await;
        let mut builder = aws_sdk_bedrockruntime::config::Builder::from(&sdk_config);
        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        debug!("Created Bedrock SDK client for region {}", config.region);
        Self::new(Client::from_conf(builder.build()))
    }
}

#[async_trait]
impl InferenceBackend for BedrockSdkClient {
    async fn converse(&self, request: &ConverseRequest) -> Result<Value> {
        let mut call = self.client.converse().model_id(&request.model_id);

        for message in &request.messages {
            let mut builder = Message::builder().role(ConversationRole::from(message.role.as_str()));
            for block in &message.content {
                builder = builder.content(ContentBlock::Text(block.text.clone()));
            }
            let message = builder
                .build()
                .map_err(|e| Error::unexpected(format!("Failed to build message: {}", e)))?;
            call = call.messages(message);
        }

        let max_tokens = i32::try_from(request.inference_config.max_tokens).map_err(|_| {
            Error::invalid_parameter(format!(
                "max_tokens {} is out of range",
                request.inference_config.max_tokens
            ))
        })?;
        // The SDK models temperature as f32
        let inference_config = InferenceConfiguration::builder()
            .temperature(request.inference_config.temperature as f32)
            .max_tokens(max_tokens)
            .build();

        let output = call
            .inference_config(inference_config)
            .send()
            .await
            .map_err(|e| Error::upstream(DisplayErrorContext(&e).to_string()))?;

        let message = output
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| Error::upstream("Converse reply carried no message"))?;

        let content: Vec<Value> = message
            .content()
            .iter()
            .map(|block| match block.as_text() {
                Ok(text) => json!({ "text": text }),
                Err(_) => json!({}),
            })
            .collect();

        Ok(json!({
            "output": {
                "message": {
                    "role": message.role().as_str(),
                    "content": content
                }
            }
        }))
    }

    async fn invoke_model(&self, model_id: &str, body: String) -> Result<Vec<u8>> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body.into_bytes()))
            .send()
            .await
            .map_err(|e| Error::upstream(DisplayErrorContext(&e).to_string()))?;

        Ok(output.body.into_inner())
    }
}
