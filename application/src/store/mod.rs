//! Live book state shared by the use cases.

pub mod document_store;

pub use document_store::{DocumentStore, StoreError};
