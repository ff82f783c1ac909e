use serde::Serialize;
use serde_json::Value;

/// The essential parts of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResult {
    pub status_code: u16,
    pub message: String,
    pub data: Value,
}

impl HttpResult {
    pub fn new(status_code: u16, message: impl Into<String>, data: Value) -> Self {
        Self {
            status_code,
            message: message.into(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status_code)
    }
}
