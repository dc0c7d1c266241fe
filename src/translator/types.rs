use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Gateway proxy response: `body` is JSON text with either `response` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl InvocationResponse {
    pub fn success(text: &str) -> Self {
        Self::new(200, json!({ "response": text }).to_string())
    }

    pub fn failure(status_code: u16, message: &str) -> Self {
        Self::new(status_code, json!({ "error": message }).to_string())
    }

    fn new(status_code: u16, body: String) -> Self {
        let headers = BTreeMap::from([(ALLOW_ORIGIN_HEADER.to_string(), "*".to_string())]);
        Self {
            status_code,
            headers,
            body,
        }
    }
}
