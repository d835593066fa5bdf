//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audio_sink;
pub mod book_exporter;
pub mod book_repository;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
