//! Mood engine.
//!
//! Owns a session's emotional state: a closed set of five moods, an energy
//! gauge that decays once per processed turn, and an insult tally that forces
//! the angry transition once it reaches its threshold.

mod engine;

pub use engine::{MoodEngine, MoodState, INSULT_THRESHOLD};

use serde::{Deserialize, Serialize};

/// The five moods Harí can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Tired,
    Neutral,
}

/// Every mood, in descriptor-table order.
pub const ALL_MOODS: [Mood; 5] = [
    Mood::Happy,
    Mood::Sad,
    Mood::Angry,
    Mood::Tired,
    Mood::Neutral,
];

/// Presentation data for a mood. Not part of any transition decision.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoodDescriptor {
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

impl Mood {
    /// Display data for the status widget.
    pub fn descriptor(self) -> MoodDescriptor {
        match self {
            Mood::Happy => MoodDescriptor {
                label: "feliz",
                emoji: "\u{1F60A}",
                color: "#22c55e",
                description: "Contenta y positiva",
            },
            Mood::Sad => MoodDescriptor {
                label: "triste",
                emoji: "\u{1F622}",
                color: "#3b82f6",
                description: "Melancólica o sensible",
            },
            Mood::Angry => MoodDescriptor {
                label: "enojada",
                emoji: "\u{1F620}",
                color: "#ef4444",
                description: "Molesta o irritada",
            },
            Mood::Tired => MoodDescriptor {
                label: "floja",
                emoji: "\u{1F634}",
                color: "#f59e0b",
                description: "Sin energía o aburrida",
            },
            Mood::Neutral => MoodDescriptor {
                label: "neutral",
                emoji: "\u{1F610}",
                color: "#6b7280",
                description: "Tranquila y relajada",
            },
        }
    }
}

/// Snapshot of the mood state, serialized for the status widget.
#[derive(Debug, Clone, Serialize)]
pub struct MoodSnapshot {
    pub mood: Mood,
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    /// Energy percentage, 20-100
    pub energy: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_serializes_snake_case() {
        let json = serde_json::to_string(&Mood::Tired).unwrap();
        assert_eq!(json, "\"tired\"");
    }

    #[test]
    fn test_every_mood_has_a_descriptor() {
        for mood in ALL_MOODS {
            let d = mood.descriptor();
            assert!(!d.label.is_empty());
            assert!(d.color.starts_with('#'));
            assert!(!d.description.is_empty());
        }
    }

    #[test]
    fn test_neutral_descriptor_palette() {
        let d = Mood::Neutral.descriptor();
        assert_eq!(d.label, "neutral");
        assert_eq!(d.color, "#6b7280");
    }
}
