use std::path::{Path, PathBuf};

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::ffmpeg;
use crate::types::{BriefingError, Result};

pub const SAMPLE_RATE: u32 = 44_100;
pub const CHANNELS: u16 = 2;

/// Reduction applied to the background track before the speech is laid over it.
pub const BACKGROUND_GAIN_DB: f32 = -15.0;

pub const OUTPUT_EXTENSION: &str = "mp3";

/// Interleaved f32 samples at [`SAMPLE_RATE`] with [`CHANNELS`] channels.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    samples: Vec<f32>,
}

impl PcmBuffer {
    /// Wrap raw samples, dropping a trailing partial frame.
    pub fn from_samples(mut samples: Vec<f32>) -> Self {
        let whole = samples.len() - samples.len() % CHANNELS as usize;
        samples.truncate(whole);
        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / CHANNELS as usize
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / SAMPLE_RATE as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Repeat the buffer whole times until it is longer than `frames`.
    /// A buffer that is already long enough comes back unchanged.
    pub fn looped_past(&self, frames: usize) -> Result<Self> {
        if self.is_empty() {
            return Err(BriefingError::AudioProcessing(
                "background track has no audio".to_string(),
            ));
        }
        if self.frames() >= frames {
            return Ok(self.clone());
        }
        let loops = frames / self.frames() + 1;
        Ok(Self {
            samples: self.samples.repeat(loops),
        })
    }

    pub fn truncated(mut self, frames: usize) -> Self {
        self.samples.truncate(frames * CHANNELS as usize);
        self
    }

    pub fn with_gain_db(mut self, db: f32) -> Self {
        let factor = 10f32.powf(db / 20.0);
        for s in &mut self.samples {
            *s *= factor;
        }
        self
    }

    /// Sum `top` onto this buffer from the start. The result keeps this buffer's length.
    pub fn overlay(mut self, top: &PcmBuffer) -> Self {
        for (base, upper) in self.samples.iter_mut().zip(top.samples.iter()) {
            *base = (*base + *upper).clamp(-1.0, 1.0);
        }
        self
    }
}

/// Loop, trim and attenuate `background` so it runs exactly as long as `speech_frames`.
pub fn fit_background(background: &PcmBuffer, speech_frames: usize) -> Result<PcmBuffer> {
    Ok(background
        .looped_past(speech_frames)?
        .truncated(speech_frames)
        .with_gain_db(BACKGROUND_GAIN_DB))
}

/// How the delivered file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixMode {
    /// Speech over the background track.
    Mixed,
    /// Speech re-encoded without music.
    SpeechOnly,
    /// Speech bytes written as received.
    Raw,
}

#[derive(Debug, Clone)]
pub struct MixedAudio {
    /// Path clients fetch the file from.
    pub url: String,
    pub path: PathBuf,
    pub mode: MixMode,
}

/// Lays the synthesized speech over background music and writes the result to the output directory.
#[derive(Debug, Clone)]
pub struct AudioMixer {
    ffmpeg: Option<PathBuf>,
    background_music: PathBuf,
    output_dir: PathBuf,
    url_prefix: String,
}

impl AudioMixer {
    pub fn new(
        ffmpeg: Option<PathBuf>,
        background_music: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            ffmpeg,
            background_music: background_music.into(),
            output_dir: output_dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn ffmpeg_available(&self) -> bool {
        self.ffmpeg.is_some()
    }

    /// Produce the final briefing audio. Any mixing failure falls back to the raw speech bytes;
    /// only a failure of that fallback is an error.
    pub fn mix(&self, speech: &[u8]) -> Result<MixedAudio> {
        info!("Starting audio mixing process...");
        match self.try_mix(speech) {
            Ok(mixed) => Ok(mixed),
            Err(e) => {
                error!("Error during audio mixing: {}", e);
                info!("Attempting to save speech-only audio as fallback...");
                self.write_raw(speech).map_err(|fallback_error| {
                    error!("Fallback audio save also failed: {}", fallback_error);
                    match e {
                        BriefingError::AudioProcessing(_) => e,
                        other => BriefingError::AudioProcessing(other.to_string()),
                    }
                })
            }
        }
    }

    fn try_mix(&self, speech: &[u8]) -> Result<MixedAudio> {
        let Some(ffmpeg) = self.ffmpeg.as_deref() else {
            warn!("FFmpeg not available. Saving speech-only audio.");
            return self.write_raw(speech);
        };

        let speech_pcm = ffmpeg::decode(ffmpeg, speech)?;

        if !self.background_music.exists() {
            warn!(
                "Background music file not found at {}. Creating speech-only audio.",
                self.background_music.display()
            );
            return self.export(ffmpeg, &speech_pcm, MixMode::SpeechOnly);
        }

        info!("Loading background music from {}", self.background_music.display());
        let background = ffmpeg::decode_file(ffmpeg, &self.background_music)?;
        let fitted = fit_background(&background, speech_pcm.frames())?;
        let combined = fitted.overlay(&speech_pcm);

        self.export(ffmpeg, &combined, MixMode::Mixed)
    }

    fn export(&self, ffmpeg: &Path, pcm: &PcmBuffer, mode: MixMode) -> Result<MixedAudio> {
        let (path, url) = self.new_output();
        info!("Exporting final audio to {}", path.display());
        ffmpeg::encode_mp3(ffmpeg, pcm, &path)?;
        info!("Successfully saved {:?} audio ({:.2}s) to {}", mode, pcm.duration_secs(), path.display());
        Ok(MixedAudio { url, path, mode })
    }

    fn write_raw(&self, speech: &[u8]) -> Result<MixedAudio> {
        let (path, url) = self.new_output();
        std::fs::write(&path, speech)?;
        info!("Saved speech-only audio to {}", path.display());
        Ok(MixedAudio {
            url,
            path,
            mode: MixMode::Raw,
        })
    }

    /// Fresh random file name; collisions are not checked.
    fn new_output(&self) -> (PathBuf, String) {
        let filename = format!("briefing_{}.{}", Uuid::new_v4().simple(), OUTPUT_EXTENSION);
        let path = self.output_dir.join(&filename);
        let url = format!("{}/{}", self.url_prefix, filename);
        (path, url)
    }
}
