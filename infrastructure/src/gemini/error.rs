//! Gemini API error body parsing.
//!
//! Google errors arrive as `{"error": {"code": 429, "message": "...",
//! "status": "RESOURCE_EXHAUSTED"}}`. Quota exhaustion is sometimes reported
//! with a non-429 status, so the body is inspected as well.

use lore_application::GatewayError;
use serde_json::Value;

/// Parsed API error information.
pub struct ApiErrorInfo {
    pub message: String,
    /// Google status string (e.g. `"RESOURCE_EXHAUSTED"`)
    pub status: Option<String>,
    pub rate_limited: bool,
}

pub fn parse_api_error(body: &str, http_status: u16) -> ApiErrorInfo {
    let (message, status) = match serde_json::from_str::<Value>(body) {
        Ok(json) => match json["error"]["message"].as_str() {
            Some(msg) => (
                msg.to_string(),
                json["error"]["status"].as_str().map(String::from),
            ),
            None => (format!("HTTP {}: {}", http_status, body), None),
        },
        Err(_) => (format!("HTTP {}: {}", http_status, body), None),
    };

    let rate_limited = http_status == 429
        || status.as_deref() == Some("RESOURCE_EXHAUSTED")
        || body.contains("429")
        || body.contains("RESOURCE_EXHAUSTED");

    ApiErrorInfo {
        message,
        status,
        rate_limited,
    }
}

impl ApiErrorInfo {
    pub fn into_gateway_error(self) -> GatewayError {
        let message = match &self.status {
            Some(status) => format!("{} ({})", self.message, status),
            None => self.message,
        };
        if self.rate_limited {
            GatewayError::RateLimited(message)
        } else {
            GatewayError::RequestFailed(message)
        }
    }
}
