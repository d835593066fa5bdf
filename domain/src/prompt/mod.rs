//! Prompt domain
//!
//! Templates for generating prompts at each stage of the archetype pipeline.

mod template;

pub use template::{NARRATION_LEAD_IN, PromptTemplate};
