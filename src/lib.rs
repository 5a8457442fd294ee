//! # Harí
//!
//! An emotional chat companion: a five-mood state machine layered over a
//! Gemini chat session, served as a small web chat widget. The mood engine
//! ingests each user message, evolves a bounded mood/energy state, and the
//! mediation layer decides whether the model's reply passes through,
//! gets transformed, or is replaced outright.

pub mod chat;
pub mod errors;
pub mod gemini;
pub mod mood;
pub mod providers;
pub mod web;

pub use errors::{HariError, Result};
pub use mood::{Mood, MoodEngine, MoodSnapshot};
