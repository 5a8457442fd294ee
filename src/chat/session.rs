//! Chat Session
//!
//! One conversation: metadata, transcript, mood engine and the provider
//! handle, with the per-turn mediation flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{mediator, ChatConfig};
use crate::mood::{MoodEngine, MoodSnapshot};
use crate::providers::{ChatOptions, Message, Provider};

/// Session metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Unique session id
    pub id: String,

    /// Model in use
    pub model: String,

    /// Provider in use
    pub provider: String,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl SessionMeta {
    pub fn new(provider: &str, model: &str) -> Self {
        let now = Utc::now();
        Self {
            id: generate_session_id(),
            model: model.to_string(),
            provider: provider.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Outcome of one turn, shaped for the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    /// Cleared input box value
    pub input: String,

    /// Final text shown for this turn; `None` when the turn was a no-op
    pub reply: Option<String>,

    /// Mood payload for the status widget
    pub mood: MoodSnapshot,
}

/// One user's conversation.
pub struct ChatSession {
    /// Metadata
    pub meta: SessionMeta,

    /// Active provider
    provider: Arc<dyn Provider>,

    /// Generation options derived from the persona config
    options: ChatOptions,

    /// Emotional state for this session
    mood: MoodEngine,

    /// Message transcript, insertion-ordered
    messages: Vec<Message>,
}

impl ChatSession {
    /// Creates a new session.
    pub fn new(provider: Arc<dyn Provider>, config: &ChatConfig) -> Self {
        Self::with_mood_engine(provider, config, MoodEngine::new())
    }

    /// Session with an explicit mood engine. Tests inject a fixed random
    /// source through here to pin transition branches.
    pub fn with_mood_engine(
        provider: Arc<dyn Provider>,
        config: &ChatConfig,
        mood: MoodEngine,
    ) -> Self {
        let meta = SessionMeta::new(provider.name(), provider.model());
        let options = ChatOptions {
            system: config.system_prompt.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        };

        Self {
            meta,
            provider,
            options,
            mood,
            messages: Vec::new(),
        }
    }

    /// Message transcript.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// This session's mood engine, read-only.
    pub fn mood(&self) -> &MoodEngine {
        &self.mood
    }

    /// Mood payload for the status widget.
    pub fn snapshot(&self) -> MoodSnapshot {
        self.mood.snapshot()
    }

    fn add_user_message(&mut self, content: &str) {
        self.messages.push(Message::user(content));
        self.meta.updated_at = Utc::now();
    }

    fn add_assistant_message(&mut self, content: &str) {
        self.messages.push(Message::assistant(content));
        self.meta.updated_at = Utc::now();
    }

    /// Runs one chat turn.
    ///
    /// Blank input is a no-op: nothing is appended and the mood engine is
    /// never consulted. Otherwise the mood moves first, the provider is asked
    /// for a reply, and the mediation policy decides the final text. A
    /// provider failure becomes an in-transcript notice; the mood change from
    /// this turn stays committed either way.
    pub async fn handle(&mut self, input: &str) -> TurnReport {
        if input.trim().is_empty() {
            return TurnReport {
                input: String::new(),
                reply: None,
                mood: self.mood.snapshot(),
            };
        }

        let mood = self.mood.update(input);

        let final_text = match self.provider.reply(&self.messages, input, &self.options).await {
            Ok(reply) => mediator::post_process(&mut self.mood, mood, reply),
            Err(err) => {
                warn!(session = %self.meta.id, "provider call failed: {err}");
                format!("Ups, error: {err}")
            }
        };

        self.add_user_message(input);
        self.add_assistant_message(&final_text);

        TurnReport {
            input: String::new(),
            reply: Some(final_text),
            mood: self.mood.snapshot(),
        }
    }
}

/// Generates a unique session id.
fn generate_session_id() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let random: u64 = rng.random();
    format!("sess_{random:016x}")
}
