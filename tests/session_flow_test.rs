//! Integration tests for the chat turn flow.
//!
//! These drive full sessions against a scripted provider, with the mood
//! engine's random source pinned so transition branches are deterministic.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::RngCore;

use hari::chat::{mediator, ChatConfig, ChatSession};
use hari::errors::{HariError, Result};
use hari::mood::{Mood, MoodEngine};
use hari::providers::{ChatOptions, Message, Provider, Role};

// ==================== Test doubles ====================

/// RNG that replays a scripted sequence of values, then repeats the last.
struct SeqRng {
    values: Vec<u64>,
    next: usize,
}

impl SeqRng {
    fn new(values: Vec<u64>) -> Self {
        Self { values, next: 0 }
    }
}

impl RngCore for SeqRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self
            .values
            .get(self.next)
            .or_else(|| self.values.last())
            .copied()
            .unwrap_or(u64::MAX);
        self.next += 1;
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.next_u64() as u8;
        }
    }
}

/// Engine whose 25% resample draw never fires.
fn quiet_engine() -> MoodEngine {
    MoodEngine::with_rng(Box::new(SeqRng::new(vec![u64::MAX])))
}

/// First draw fires the resample; the second lands on the tired slot of the
/// five-entry mood table; later draws hold the mood.
fn tired_engine() -> MoodEngine {
    const TIRED_PICK: u64 = 11 << 60;
    MoodEngine::with_rng(Box::new(SeqRng::new(vec![0, TIRED_PICK, u64::MAX])))
}

struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String>>>,
}

impl ScriptedProvider {
    fn with_replies(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }

    fn cheerful() -> Arc<Self> {
        Self::with_replies(Vec::new())
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn reply(
        &self,
        _history: &[Message],
        _message: &str,
        _options: &ChatOptions,
    ) -> Result<String> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("¡Hola! ¿Cómo estás?".to_string()))
    }
}

fn session_with(provider: Arc<ScriptedProvider>, engine: MoodEngine) -> ChatSession {
    ChatSession::with_mood_engine(provider, &ChatConfig::sensible_defaults(), engine)
}

// ==================== Turn flow ====================

#[tokio::test]
async fn blank_input_leaves_session_untouched() {
    let mut session = session_with(ScriptedProvider::cheerful(), quiet_engine());

    session.handle("Hola").await;
    let before = session.message_count();

    let report = session.handle("   \t ").await;

    assert!(report.reply.is_none());
    assert_eq!(report.input, "");
    assert_eq!(session.message_count(), before);
    assert_eq!(session.mood().energy(), 84);
}

#[tokio::test]
async fn transcript_alternates_user_and_assistant() {
    let mut session = session_with(ScriptedProvider::cheerful(), quiet_engine());

    for message in ["Hola", "¿Qué haces?", "Cuéntame algo"] {
        session.handle(message).await;
    }

    let messages = session.messages();
    assert_eq!(messages.len(), 6);
    for (i, message) in messages.iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(message.role, expected);
    }
}

#[tokio::test]
async fn energy_decays_to_the_floor_in_long_sessions() {
    let mut session = session_with(ScriptedProvider::cheerful(), quiet_engine());

    for _ in 0..70 {
        session.handle("hola").await;
    }

    assert_eq!(session.mood().energy(), 20);
}

// ==================== Insults and outburst ====================

#[tokio::test]
async fn three_insults_force_angry_and_outburst() {
    let mut session = session_with(ScriptedProvider::cheerful(), quiet_engine());

    for _ in 0..2 {
        let report = session.handle("Callate idiota").await;
        let reply = report.reply.unwrap();
        assert!(!mediator::OUTBURSTS.contains(&reply.as_str()));
    }

    let report = session.handle("Callate idiota").await;
    let reply = report.reply.unwrap();

    assert_eq!(session.mood().current(), Mood::Angry);
    assert!(mediator::OUTBURSTS.contains(&reply.as_str()));
    assert_eq!(session.mood().insult_count(), 0);
    assert_eq!(session.mood().energy(), 82);
    assert_eq!(session.messages()[5].content, reply);
}

// ==================== Collaborator failures ====================

#[tokio::test]
async fn failed_turn_still_mutates_mood() {
    let provider = ScriptedProvider::with_replies(vec![Err(HariError::NetworkError(
        "connection timed out".to_string(),
    ))]);
    let mut session = session_with(provider, quiet_engine());

    let report = session.handle("Hola").await;

    // The notice lands in the transcript as the assistant entry
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].content.starts_with("Ups, error:"));
    assert_eq!(report.reply.as_deref(), Some(messages[1].content.as_str()));

    // The mood transition ran before the failed call and stays committed
    assert_eq!(session.mood().energy(), 84);
    assert_eq!(session.mood().current(), Mood::Neutral);
}

#[tokio::test]
async fn error_notice_is_never_transformed() {
    let provider = ScriptedProvider::with_replies(vec![Err(HariError::ApiError(
        "quota exhausted".to_string(),
    ))]);
    let mut session = session_with(provider, tired_engine());

    let report = session.handle("Hola").await;
    let reply = report.reply.unwrap();

    assert_eq!(session.mood().current(), Mood::Tired);
    assert!(reply.starts_with("Ups, error:"));
    assert!(!reply.starts_with(mediator::DROWSY_PREFIX));
}

// ==================== Mood-driven transforms ====================

#[tokio::test]
async fn tired_mood_makes_replies_drowsy() {
    let provider = ScriptedProvider::with_replies(vec![Ok("¿Qué Onda AMIGA?".to_string())]);
    let mut session = session_with(provider, tired_engine());

    let report = session.handle("Hola").await;
    let reply = report.reply.unwrap();

    assert_eq!(session.mood().current(), Mood::Tired);
    assert_eq!(reply, "Aaah... ¿qué onda amiga?");
    assert_eq!(report.mood.label, "floja");
}

#[tokio::test]
async fn snapshot_always_matches_descriptor_table() {
    let mut session = session_with(ScriptedProvider::cheerful(), tired_engine());

    for _ in 0..5 {
        let report = session.handle("hola").await;
        let descriptor = session.mood().current().descriptor();
        assert_eq!(report.mood.label, descriptor.label);
        assert_eq!(report.mood.color, descriptor.color);
        assert_eq!(report.mood.energy, session.mood().energy());
    }
}
