//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — remote generative models (Gemini family)
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
