//! Application layer for lore-forge
//!
//! This crate contains use cases, port definitions, call pacing, the live
//! document store, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod pacing;
pub mod ports;
pub mod store;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{GenerationParams, PacingParams};
pub use pacing::{RetryingCaller, ThrottleGate};
pub use ports::{
    audio_sink::{AudioSink, AudioSinkError},
    book_exporter::{BookExporter, ExportError},
    book_repository::{BookRepository, InMemoryBookRepository, RepositoryError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{
        GatewayError, GenerationRequest, GenerationResponse, LlmGateway, RequestOptions,
    },
    progress::{NoProgress, ProgressNotifier},
};
pub use store::{DocumentStore, StoreError};
pub use use_cases::edit_page::EditPageUseCase;
pub use use_cases::export_book::ExportBookUseCase;
pub use use_cases::generate_book::{GenerateBookError, GenerateBookUseCase, RunReport};
pub use use_cases::generate_chapter::{GenerateChapterError, GenerateChapterUseCase};
pub use use_cases::narrate_page::{NarratePageError, NarratePageUseCase};
pub use use_cases::shared::GenerationFailure;
pub use use_cases::stages::{ArchetypeStages, StageError};
