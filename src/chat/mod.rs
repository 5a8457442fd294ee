//! Chat engine
//!
//! Session handling, response mediation and persona configuration for one
//! conversation over the LLM provider.

mod config;
pub mod mediator;
mod session;

pub use config::{load_config, save_config, ChatConfig};
pub use session::{ChatSession, SessionMeta, TurnReport};
