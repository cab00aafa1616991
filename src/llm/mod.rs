//! Text-generation backend.
//!
//! Agents only see the [`TextGenerator`] trait. The production implementation
//! is [`ChatClient`], which speaks the OpenAI-compatible chat completions API.

mod client;

pub use client::{ChatClient, ChatConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to the text-generation service.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is required for AI analysis")]
    MissingApiKey,

    #[error("Authentication failed (check your API key): {0}")]
    Unauthorized(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Cannot connect to text-generation API at {0}")]
    Connect(String),

    #[error("Text-generation API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to generate analysis: {0}")]
    Transport(String),

    #[error("Failed to decode text-generation response: {0}")]
    Decode(String),
}

impl LlmError {
    /// True when the failure means the caller has to supply a (new) key.
    ///
    /// These are the only errors that agents propagate; everything else is
    /// replaced with a fallback record.
    pub fn is_credential_error(&self) -> bool {
        match self {
            LlmError::MissingApiKey | LlmError::Unauthorized(_) => true,
            other => mentions_credentials(&other.to_string()),
        }
    }
}

/// Matches the message wording upstream services use for bad credentials.
pub fn mentions_credentials(message: &str) -> bool {
    let lower = message.to_lowercase();
    message.contains("API key") || lower.contains("authentication") || lower.contains("unauthorized")
}

/// Something that turns a system prompt and a user prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_classification() {
        assert!(LlmError::MissingApiKey.is_credential_error());
        assert!(LlmError::Unauthorized("bad".into()).is_credential_error());
        assert!(LlmError::Api {
            status: 400,
            body: "Incorrect API key provided".into()
        }
        .is_credential_error());
        assert!(LlmError::Transport("Unauthorized request".into()).is_credential_error());
        assert!(!LlmError::Timeout(30).is_credential_error());
        assert!(!LlmError::Api {
            status: 500,
            body: "overloaded".into()
        }
        .is_credential_error());
    }

    #[test]
    fn test_mentions_credentials() {
        assert!(mentions_credentials("Invalid API key configuration"));
        assert!(mentions_credentials("Authentication required"));
        assert!(!mentions_credentials("rate limit reached"));
        // lower-case "api key" is not the upstream wording
        assert!(!mentions_credentials("missing api key header"));
    }
}
