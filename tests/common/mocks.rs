use async_trait::async_trait;
use nova_relay::{
    Error, Result,
    backend::{ConverseRequest, InferenceBackend},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

use super::test_utils::converse_reply;

/// Mock inference backend recording every call it receives
#[derive(Debug)]
pub struct MockBackend {
    pub reply: Value,
    pub error: Option<String>,
    pub converse_requests: Arc<Mutex<Vec<ConverseRequest>>>,
    pub invoke_calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            reply: converse_reply("Mock response"),
            error: None,
            converse_requests: Arc::new(Mutex::new(Vec::new())),
            invoke_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new().with_reply(converse_reply(text))
    }

    pub fn with_reply(mut self, reply: Value) -> Self {
        self.reply = reply;
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn converse_requests(&self) -> Vec<ConverseRequest> {
        self.converse_requests.lock().unwrap().clone()
    }

    pub fn invoke_calls(&self) -> Vec<(String, String)> {
        self.invoke_calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.converse_requests.lock().unwrap().len() + self.invoke_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn converse(&self, request: &ConverseRequest) -> Result<Value> {
        self.converse_requests.lock().unwrap().push(request.clone());

        if let Some(ref error) = self.error {
            return Err(Error::upstream(error.clone()));
        }
        Ok(self.reply.clone())
    }

    async fn invoke_model(&self, model_id: &str, body: String) -> Result<Vec<u8>> {
        self.invoke_calls
            .lock()
            .unwrap()
            .push((model_id.to_string(), body));

        if let Some(ref error) = self.error {
            return Err(Error::upstream(error.clone()));
        }
        Ok(serde_json::to_vec(&self.reply)?)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}
