//! Response mediation.
//!
//! Decides what the user actually sees each turn: the model's reply, a
//! transformed version of it, or a canned outburst when the insult threshold
//! trips.

use rand::seq::IndexedRandom;

use crate::mood::{Mood, MoodEngine, INSULT_THRESHOLD};

/// Replies used when the anger threshold trips, picked uniformly at random.
pub const OUTBURSTS: [&str; 2] = [
    "¡YA BASTA! \u{1F620} No soporto que me hables así...",
    "No mms, ya me hartaste...",
];

/// Interjection prepended to replies while tired.
pub const DROWSY_PREFIX: &str = "Aaah... ";

/// Applies the mood policy to a successful model reply.
///
/// The forced-angry branch discards the reply outright and clears the insult
/// tally; tired replies get the drowsy prefix and lose their capitalization;
/// every other mood passes the reply through. Failed provider calls never
/// reach this function, so the error notice is always shown as-is.
pub fn post_process(engine: &mut MoodEngine, mood: Mood, reply: String) -> String {
    if mood == Mood::Angry && engine.insult_count() >= INSULT_THRESHOLD {
        let outburst = OUTBURSTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(OUTBURSTS[0]);
        engine.reset_insults();
        outburst.to_string()
    } else if mood == Mood::Tired {
        format!("{DROWSY_PREFIX}{}", reply.to_lowercase())
    } else {
        reply
    }
}
