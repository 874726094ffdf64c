//! Pure Zhipu GLM REST API client
//!
//! A clean, minimal client for the GLM chat-completions API with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use glm_client::GlmClient;
//!
//! let client = GlmClient::from_env()?;
//! let reply = client
//!     .chat_completion("You are a name analyst.", "分析这对名字")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GlmError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
const DEFAULT_MODEL: &str = "glm-4.5-flash";

/// Provider error code for an exhausted account balance.
const INSUFFICIENT_BALANCE_CODE: &str = "1113";

/// Pure GLM API client.
#[derive(Clone)]
pub struct GlmClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GlmClient {
    /// Create a new GLM client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `ZHIPU_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ZHIPU_API_KEY")
            .map_err(|_| GlmError::Config("ZHIPU_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, regional endpoints, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the chat model (default: glm-4.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Make a chat completion request, returning the first choice's content.
    pub async fn chat_completion(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system), Message::user(user)],
            temperature: None,
        };

        debug!(model = %self.model, "sending chat completion request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "GLM API error response");
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GlmError::Parse(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GlmError::Parse("response contained no choices".into()))
    }
}

/// Map a non-2xx response onto the error taxonomy.
///
/// 429 means rate limiting regardless of body. The balance-exhausted case is
/// detected from the provider's error code or message so that callers can
/// show the user a "top up" message instead of a generic failure.
fn classify_api_error(status: u16, body: &str) -> GlmError {
    if status == 429 {
        return GlmError::RateLimited;
    }

    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if parsed.error.code == INSUFFICIENT_BALANCE_CODE
            || parsed.error.message.contains("Insufficient balance")
        {
            return GlmError::InsufficientBalance;
        }
        return GlmError::Api {
            status,
            message: parsed.error.message,
        };
    }

    if body.contains("Insufficient balance") {
        return GlmError::InsufficientBalance;
    }

    GlmError::Api {
        status,
        message: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let client = GlmClient::new("test-key")
            .with_base_url("https://proxy.example.com/v4")
            .with_model("glm-4-plus");

        assert_eq!(client.base_url, "https://proxy.example.com/v4");
        assert_eq!(client.model(), "glm-4-plus");
    }

    #[test]
    fn test_classify_rate_limit() {
        assert!(matches!(
            classify_api_error(429, r#"{"error":{"code":"1302","message":"too many requests"}}"#),
            GlmError::RateLimited
        ));
    }

    #[test]
    fn test_classify_insufficient_balance_by_code() {
        let err = classify_api_error(
            403,
            r#"{"error":{"code":"1113","message":"Insufficient balance or no resource package."}}"#,
        );
        assert!(matches!(err, GlmError::InsufficientBalance));
    }

    #[test]
    fn test_classify_insufficient_balance_by_message() {
        let err = classify_api_error(400, "Insufficient balance");
        assert!(matches!(err, GlmError::InsufficientBalance));
    }

    #[test]
    fn test_classify_generic_api_error() {
        let err = classify_api_error(500, r#"{"error":{"code":"500","message":"boom"}}"#);
        match err {
            GlmError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
