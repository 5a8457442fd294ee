//! Mood state transitions.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use super::{Mood, MoodSnapshot, ALL_MOODS};

/// Messages containing any of these fragments count as one insult.
/// Matching is substring containment on the lowercased message, so "callate"
/// also matches inside longer words.
const INSULT_TOKENS: [&str; 4] = ["idiota", "estúpida", "tonta", "callate"];

/// Insults accumulated before the angry transition is forced.
pub const INSULT_THRESHOLD: u32 = 3;

/// Chance per turn of re-rolling the mood.
const RESAMPLE_CHANCE: f64 = 0.25;

const ENERGY_START: u8 = 85;
const ENERGY_FLOOR: u8 = 20;

/// Mutable emotional state of one chat session.
#[derive(Debug, Clone, Copy)]
pub struct MoodState {
    pub current_mood: Mood,
    pub energy: u8,
    pub insult_counter: u32,
}

impl Default for MoodState {
    fn default() -> Self {
        Self {
            current_mood: Mood::Neutral,
            energy: ENERGY_START,
            insult_counter: 0,
        }
    }
}

/// Owns and evolves a session's [`MoodState`].
///
/// The random source is injected so callers can pin the resample branch;
/// [`MoodEngine::new`] draws from the OS.
pub struct MoodEngine {
    state: MoodState,
    rng: Box<dyn RngCore + Send>,
}

impl MoodEngine {
    pub fn new() -> Self {
        Self::with_rng(Box::new(StdRng::from_os_rng()))
    }

    /// Engine around an explicit random source.
    pub fn with_rng(rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            state: MoodState::default(),
            rng,
        }
    }

    /// Ingests one user message and moves to the next mood.
    ///
    /// Transition priority: the insult threshold forces `Angry`; otherwise a
    /// 25% draw re-rolls the mood uniformly over all five values (the same
    /// mood can come back); otherwise the mood holds. Energy drops by one per
    /// call down to the floor, whichever branch ran.
    pub fn update(&mut self, message: &str) -> Mood {
        let lowered = message.to_lowercase();
        if INSULT_TOKENS.iter().any(|token| lowered.contains(token)) {
            self.state.insult_counter += 1;
            debug!(insults = self.state.insult_counter, "insult detected");
        }

        let rng = &mut *self.rng;
        let next = if self.state.insult_counter >= INSULT_THRESHOLD {
            Mood::Angry
        } else if rng.random::<f64>() < RESAMPLE_CHANCE {
            ALL_MOODS[rng.random_range(0..ALL_MOODS.len())]
        } else {
            self.state.current_mood
        };

        self.state.energy = self.state.energy.saturating_sub(1).max(ENERGY_FLOOR);
        self.state.current_mood = next;
        next
    }

    /// Clears the insult tally. Only the mediator's outburst branch calls
    /// this; the counter never decays on its own.
    pub fn reset_insults(&mut self) {
        self.state.insult_counter = 0;
    }

    pub fn current(&self) -> Mood {
        self.state.current_mood
    }

    pub fn energy(&self) -> u8 {
        self.state.energy
    }

    pub fn insult_count(&self) -> u32 {
        self.state.insult_counter
    }

    /// Presentation payload for the status widget.
    pub fn snapshot(&self) -> MoodSnapshot {
        let descriptor = self.state.current_mood.descriptor();
        MoodSnapshot {
            mood: self.state.current_mood,
            label: descriptor.label,
            emoji: descriptor.emoji,
            color: descriptor.color,
            description: descriptor.description,
            energy: self.state.energy,
        }
    }
}

impl Default for MoodEngine {
    fn default() -> Self {
        Self::new()
    }
}
