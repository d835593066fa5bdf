//! Generation domain
//!
//! Archetype/model bindings, the run state machine, stage results, and
//! outline response parsing.

pub mod archetype;
pub mod parsing;
pub mod run;
pub mod value_objects;
