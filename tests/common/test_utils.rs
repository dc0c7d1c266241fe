use aws_sdk_bedrockruntime::config::{BehaviorVersion, Credentials, Region, retry::RetryConfig};
use nova_relay::{
    backend::BedrockSdkClient,
    config::{BackendConfig, ClientConfig, Convention},
    translator::InvocationResponse,
};
use serde_json::{Value, json};

pub const TEST_MODEL_ID: &str = "amazon.nova-micro-v1:0";

/// A backend reply in the converse/Nova shape carrying `text`
pub fn converse_reply(text: &str) -> Value {
    json!({
        "output": {
            "message": {
                "role": "assistant",
                "content": [{"text": text}]
            }
        },
        "stopReason": "end_turn",
        "usage": {"inputTokens": 5, "outputTokens": 12, "totalTokens": 17},
        "metrics": {"latencyMs": 1}
    })
}

/// Backend config pointing at a local mock server
pub fn backend_config(endpoint: &str, convention: Convention) -> BackendConfig {
    BackendConfig {
        endpoint: Some(endpoint.to_string()),
        convention,
        api_key: Some("test-api-key".to_string()),
        ..BackendConfig::default()
    }
}

/// SDK-backed client with static credentials, pointed at a local mock server
pub fn sdk_client(endpoint: &str) -> BedrockSdkClient {
    let config = aws_sdk_bedrockruntime::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "static"))
        .retry_config(RetryConfig::disabled())
        .endpoint_url(endpoint)
        .build();
    BedrockSdkClient::new(aws_sdk_bedrockruntime::Client::from_conf(config))
}

pub fn client_config(gateway_url: String) -> ClientConfig {
    ClientConfig {
        gateway_url,
        timeout_secs: 5,
    }
}

/// Decodes the JSON text carried in an invocation response body
pub fn body_json(response: &InvocationResponse) -> Value {
    serde_json::from_str(&response.body).expect("response body should be JSON")
}
