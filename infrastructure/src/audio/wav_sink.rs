//! WAV file output for narration clips

use lore_application::{AudioSink, AudioSinkError};
use lore_domain::AudioClip;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

const BITS_PER_SAMPLE: u16 = 16;

/// [`AudioSink`] that writes each clip to `<dir>/narration-<time>-<n>.wav`
pub struct WavFileSink {
    dir: PathBuf,
    written: Mutex<Vec<PathBuf>>,
}

impl WavFileSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Most recently written file
    pub fn last_written(&self) -> Option<PathBuf> {
        self.written.lock().ok()?.last().cloned()
    }
}

impl AudioSink for WavFileSink {
    fn play(&self, clip: &AudioClip) -> Result<(), AudioSinkError> {
        let bytes = encode_wav(clip)?;
        fs::create_dir_all(&self.dir)?;

        let mut written = self
            .written
            .lock()
            .map_err(|_| AudioSinkError::Unsupported("sink state poisoned".to_string()))?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = self
            .dir
            .join(format!("narration-{}-{}.wav", stamp, written.len() + 1));

        fs::write(&path, bytes)?;
        info!(
            "Wrote {:.1}s of narration to {}",
            clip.duration_secs(),
            path.display()
        );
        written.push(path);
        Ok(())
    }
}

/// RIFF/WAVE container with 16-bit PCM samples
pub fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>, AudioSinkError> {
    if clip.channels == 0 || clip.sample_rate == 0 {
        return Err(AudioSinkError::Unsupported(format!(
            "{} channels at {} Hz",
            clip.channels, clip.sample_rate
        )));
    }

    let block_align = clip.channels * BITS_PER_SAMPLE / 8;
    let byte_rate = clip.sample_rate * u32::from(block_align);
    let data_size = u32::try_from(clip.samples.len() * 2)
        .map_err(|_| AudioSinkError::Unsupported("clip too long for WAV".to_string()))?;

    let mut buf = Vec::with_capacity(44 + data_size as usize);
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&clip.channels.to_le_bytes());
    buf.extend_from_slice(&clip.sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for sample in &clip.samples {
        let pcm = (sample.clamp(-1.0, 1.0) * 32768.0).clamp(-32768.0, 32767.0) as i16;
        buf.extend_from_slice(&pcm.to_le_bytes());
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_header_layout() {
        let clip = AudioClip::from_pcm16_le(&[0x00, 0x80, 0x00, 0x00, 0xff, 0x7f]);
        let wav = encode_wav(&clip).unwrap();

        assert_eq!(wav.len(), 44 + 6);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 24), 24_000);
        assert_eq!(u32_at(&wav, 28), 48_000);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 6);
    }

    #[test]
    fn test_pcm_survives_encoding() {
        let pcm = [0x00, 0x80, 0x00, 0x00, 0xff, 0x7f];
        let wav = encode_wav(&AudioClip::from_pcm16_le(&pcm)).unwrap();
        assert_eq!(&wav[44..], &pcm);
    }

    #[test]
    fn test_zero_channels_rejected() {
        let clip = AudioClip {
            samples: vec![0.0],
            sample_rate: 24_000,
            channels: 0,
        };
        assert!(matches!(
            encode_wav(&clip),
            Err(AudioSinkError::Unsupported(_))
        ));
    }

    #[test]
    fn test_play_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = WavFileSink::new(dir.path().join("audio"));
        let clip = AudioClip::from_pcm16_le(&[0x10, 0x00]);

        sink.play(&clip).unwrap();
        let first = sink.last_written().unwrap();
        sink.play(&clip).unwrap();
        let second = sink.last_written().unwrap();

        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("-2.wav"));
        assert_eq!(fs::read(&second).unwrap().len(), 46);
    }
}
