mod client;
mod sdk;
mod types;

pub use client::*;
pub use sdk::*;
pub use types::*;

use crate::{Result, config::BackendConfig};
use std::sync::Arc;
use tracing::info;

/// Picks the backend for this process: bearer API key over HTTP when one is
/// configured, the AWS SDK credential chain otherwise.
pub async fn connect(config: &BackendConfig) -> Result<Arc<dyn InferenceBackend>> {
    if config.api_key.is_some() {
        info!("Authenticating to Bedrock with an API key");
        Ok(Arc::new(BedrockHttpClient::new(config)?))
    } else {
        info!("Authenticating to Bedrock with the AWS credential chain");
        Ok(Arc::new(BedrockSdkClient::from_config(config).await))
    }
}
