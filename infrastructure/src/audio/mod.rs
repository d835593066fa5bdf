//! Narration output adapters

mod wav_sink;

pub use wav_sink::{WavFileSink, encode_wav};
