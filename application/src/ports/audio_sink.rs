//! Audio output port for narration

use lore_domain::AudioClip;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioSinkError {
    #[error("Audio output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported clip: {0}")]
    Unsupported(String),
}

/// Receives decoded narration clips
pub trait AudioSink: Send + Sync {
    fn play(&self, clip: &AudioClip) -> Result<(), AudioSinkError>;
}
