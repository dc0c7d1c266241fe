mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_from(&config_path).await?;

    Ok(apply_env_overrides(config, |key| env::var(key).ok()))
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => Ok(serde_yaml::from_str(&config_str)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Applies the process-level variables on top of file configuration.
pub fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(region) = lookup("AWS_REGION") {
        config.backend.region = region;
    }
    if let Some(model_id) = lookup("MODEL_ID") {
        config.backend.model_id = model_id;
    }
    if let Some(api_key) = lookup("AWS_BEARER_TOKEN_BEDROCK") {
        config.backend.api_key = Some(api_key);
    }
    if let Some(endpoint) = lookup("BEDROCK_ENDPOINT") {
        config.backend.endpoint = Some(endpoint);
    }
    if let Some(url) = lookup("GATEWAY_URL") {
        config.client.gateway_url = url;
    }

    config
}
