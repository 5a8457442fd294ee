//! Google Gemini integration
//!
//! HTTP client for the generateContent API, configured from the environment.

mod client;
mod config;
mod models;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use models::{GenerateContentRequest, GenerateContentResponse};
