//! Google Gemini API models and data structures

use serde::{Deserialize, Serialize};

use crate::providers::{ChatOptions, Message, Role};

/// Gemini content part
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentPart {
    pub text: String,
}

/// Gemini content
#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"; absent on system instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<ContentPart>,
}

impl Content {
    fn bare(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![ContentPart {
                text: text.to_string(),
            }],
        }
    }

    fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            ..Self::bare(text)
        }
    }

    fn from_message(message: &Message) -> Self {
        let role = match message.role {
            Role::User => "user",
            Role::Assistant => "model",
        };
        Self {
            role: Some(role.to_string()),
            ..Self::bare(&message.content)
        }
    }
}

/// Gemini generation request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,
}

impl GenerateContentRequest {
    /// Builds a conversation request: persona instruction, the prior
    /// transcript replayed as alternating user/model turns, then the new
    /// user message.
    pub fn new_chat(history: &[Message], message: &str, options: &ChatOptions) -> Self {
        let mut contents: Vec<Content> = history.iter().map(Content::from_message).collect();
        contents.push(Content::user(message));

        Self {
            contents,
            system_instruction: options.system.as_deref().map(Content::bare),
            generation_config: Some(GenerationConfig {
                temperature: options.temperature,
                top_p: None,
                max_output_tokens: options.max_output_tokens,
                candidate_count: Some(1),
            }),
        }
    }
}

/// Gemini candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Content,
    pub finish_reason: Option<String>,
}

/// Prompt feedback
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Gemini response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Text content of the first candidate.
    pub fn get_text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .parts
            .first()
            .map(|part| part.text.clone())
    }

    /// Whether the response was blocked by safety filters.
    pub fn is_blocked(&self) -> bool {
        self.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_ref())
            .is_some()
            || self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ChatOptions {
        ChatOptions {
            system: Some("Eres Harí.".to_string()),
            temperature: Some(0.85),
            max_output_tokens: Some(1024),
        }
    }

    #[test]
    fn test_chat_request_replays_history_in_order() {
        let history = vec![Message::user("Hola"), Message::assistant("¡Hola!")];
        let request = GenerateContentRequest::new_chat(&history, "¿Cómo estás?", &options());

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
        assert_eq!(request.contents[1].role.as_deref(), Some("model"));
        assert_eq!(request.contents[2].role.as_deref(), Some("user"));
        assert_eq!(request.contents[2].parts[0].text, "¿Cómo estás?");
    }

    #[test]
    fn test_chat_request_serializes_camel_case() {
        let request = GenerateContentRequest::new_chat(&[], "Hola", &options());
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"systemInstruction\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"maxOutputTokens\":1024"));
        assert!(!json.contains("top_p"));
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "¡Hola!"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.get_text().as_deref(), Some("¡Hola!"));
        assert!(!response.is_blocked());
    }

    #[test]
    fn test_blocked_response_detection() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

        assert!(response.is_blocked());
        assert!(response.get_text().is_none());
    }
}
