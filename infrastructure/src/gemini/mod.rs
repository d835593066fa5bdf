//! Gemini REST adapter for the [`LlmGateway`](lore_application::LlmGateway) port.

pub mod error;
pub mod gateway;
pub mod types;

pub use gateway::{DEFAULT_BASE_URL, GeminiGateway};
