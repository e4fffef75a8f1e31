//! Thin wrapper over the `ffmpeg` binary: decode anything to PCM, encode PCM to MP3.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::mixer::{PcmBuffer, CHANNELS, SAMPLE_RATE};
use crate::types::{BriefingError, Result};

/// Resolve the ffmpeg binary: an explicit override if it exists, otherwise `ffmpeg` on `PATH`.
pub fn locate(override_path: Option<&str>) -> Option<PathBuf> {
    if let Some(p) = override_path {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return Some(pb);
        }
        warn!(bin = %p, "FFMPEG_BIN does not exist, searching PATH");
    }
    let found = find_on_path("ffmpeg");
    match &found {
        Some(p) => info!(bin = ?p, "Using FFmpeg"),
        None => warn!("FFmpeg not found! Audio mixing is disabled."),
    }
    found
}

fn find_on_path(bin: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .flat_map(|dir| {
            let plain = dir.join(bin);
            let exe = dir.join(format!("{bin}.exe"));
            [plain, exe]
        })
        .find(|candidate| candidate.is_file())
}

/// Decode encoded audio bytes to interleaved f32 at the mixer's rate and layout.
pub fn decode(ffmpeg: &Path, data: &[u8]) -> Result<PcmBuffer> {
    debug!("Decoding {} bytes with ffmpeg", data.len());
    let rate = SAMPLE_RATE.to_string();
    let channels = CHANNELS.to_string();
    let pcm = run(
        ffmpeg,
        &[
            "-v", "quiet", "-i", "pipe:0", "-f", "f32le", "-acodec", "pcm_f32le", "-ar", rate.as_str(),
            "-ac", channels.as_str(), "pipe:1",
        ],
        data.to_vec(),
    )?;

    if pcm.is_empty() {
        return Err(BriefingError::AudioProcessing("ffmpeg produced no output".to_string()));
    }
    Ok(PcmBuffer::from_samples(bytes_to_f32(&pcm)))
}

/// Decode a file on disk.
pub fn decode_file(ffmpeg: &Path, path: &Path) -> Result<PcmBuffer> {
    let data = std::fs::read(path)?;
    decode(ffmpeg, &data)
}

/// Encode PCM to an MP3 file at `dest`.
pub fn encode_mp3(ffmpeg: &Path, pcm: &PcmBuffer, dest: &Path) -> Result<()> {
    let rate = SAMPLE_RATE.to_string();
    let channels = CHANNELS.to_string();
    let dest_str = dest.to_string_lossy();
    run(
        ffmpeg,
        &[
            "-v", "quiet", "-y", "-f", "f32le", "-ar", rate.as_str(), "-ac", channels.as_str(), "-i", "pipe:0",
            "-f", "mp3", &*dest_str,
        ],
        f32_to_bytes(pcm.samples()),
    )?;
    debug!(path = %dest.display(), "Encoded {:.2}s of audio", pcm.duration_secs());
    Ok(())
}

fn run(ffmpeg: &Path, args: &[&str], input: Vec<u8>) -> Result<Vec<u8>> {
    let mut child = Command::new(ffmpeg)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| BriefingError::AudioProcessing(format!("Failed to spawn ffmpeg: {e}")))?;

    // Feed stdin from another thread; ffmpeg blocks on a full stdout pipe otherwise.
    let stdin = child.stdin.take();
    let writer = std::thread::spawn(move || {
        if let Some(mut stdin) = stdin {
            let _ = stdin.write_all(&input);
        }
    });

    let output = child
        .wait_with_output()
        .map_err(|e| BriefingError::AudioProcessing(format!("Failed to read ffmpeg output: {e}")))?;
    let _ = writer.join();

    if !output.status.success() {
        return Err(BriefingError::AudioProcessing(format!(
            "ffmpeg exited with {}",
            output.status
        )));
    }
    Ok(output.stdout)
}

fn bytes_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn f32_to_bytes(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_bytes_round_trip() {
        let samples = [0.5f32, -0.25, 1.0];
        assert_eq!(bytes_to_f32(&f32_to_bytes(&samples)), samples);
    }

    #[test]
    fn trailing_partial_sample_is_ignored() {
        let mut bytes = 0.5f32.to_le_bytes().to_vec();
        bytes.push(7);
        assert_eq!(bytes_to_f32(&bytes), vec![0.5]);
    }

    #[test]
    fn missing_override_falls_back_to_path_search() {
        let found = locate(Some("/definitely/not/here/ffmpeg"));
        assert_eq!(found, find_on_path("ffmpeg"));
    }
}
