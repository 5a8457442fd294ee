//! LLM provider abstraction.
//!
//! One trait seam between the chat session and whichever model backs it, so
//! the mediation logic can be exercised against a scripted stand-in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

/// Generation options passed through to the provider.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Persona system instruction
    pub system: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Cap on reply length
    pub max_output_tokens: Option<u32>,
}

/// A model that can continue a conversation.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name, for logging and session metadata
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;

    /// Generates a reply to `message` given the prior transcript.
    async fn reply(
        &self,
        history: &[Message],
        message: &str,
        options: &ChatOptions,
    ) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_serialize_lowercase() {
        let msg = Message::user("Hola");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hola"}"#);
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("a").role, Role::User);
        assert_eq!(Message::assistant("b").role, Role::Assistant);
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
