//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`GenerationParams`] — archetype models, outline size, narration settings
//! - [`PacingParams`] — per-model spacing and rate-limit retry budget

pub mod generation_params;
pub mod pacing_params;

pub use generation_params::GenerationParams;
pub use pacing_params::PacingParams;
