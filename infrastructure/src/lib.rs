//! Infrastructure layer for lore-forge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod audio;
pub mod config;
pub mod export;
pub mod gemini;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use audio::WavFileSink;
pub use config::{ConfigIssue, ConfigLoadError, ConfigLoader, FileConfig, Severity};
pub use export::HtmlBookExporter;
pub use gemini::GeminiGateway;
pub use logging::JsonlConversationLogger;
pub use storage::JsonFileBookRepository;
