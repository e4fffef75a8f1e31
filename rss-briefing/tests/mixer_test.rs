//! Mixer behaviour against a real ffmpeg with an MP3 encoder.
//!
//! Ignored by default. Run with:
//!    cargo test --test mixer_test -- --ignored
//! `FFMPEG_BIN` selects the binary, otherwise `ffmpeg` is taken from `PATH`.

mod common;

use common::init_tracing;
use rss_briefing::ffmpeg;
use rss_briefing::mixer::{AudioMixer, MixMode, CHANNELS, SAMPLE_RATE};
use std::path::PathBuf;
use std::process::Command;

fn ffmpeg_with_mp3() -> PathBuf {
    let bin = ffmpeg::locate(std::env::var("FFMPEG_BIN").ok().as_deref())
        .expect("ffmpeg not found; set FFMPEG_BIN or add it to PATH");
    let output = Command::new(&bin)
        .args(["-hide_banner", "-encoders"])
        .output()
        .expect("failed to run ffmpeg -encoders");
    let encoders = String::from_utf8_lossy(&output.stdout);
    assert!(
        encoders.contains("libmp3lame") || encoders.contains(" mp3 "),
        "{} has no MP3 encoder",
        bin.display()
    );
    bin
}

/// 16-bit PCM WAV with a quiet sine tone.
fn wav_tone(seconds: f64, freq: f64) -> Vec<u8> {
    let channels = CHANNELS as u32;
    let frames = (seconds * SAMPLE_RATE as f64) as u32;
    let data_len = frames * channels * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&(channels as u16).to_le_bytes());
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * channels * 2).to_le_bytes());
    wav.extend_from_slice(&((channels * 2) as u16).to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    for i in 0..frames {
        let t = i as f64 / SAMPLE_RATE as f64;
        let sample = ((t * freq * std::f64::consts::TAU).sin() * 8000.0) as i16;
        for _ in 0..channels {
            wav.extend_from_slice(&sample.to_le_bytes());
        }
    }
    wav
}

fn decoded_seconds(bin: &std::path::Path, path: &std::path::Path) -> f64 {
    ffmpeg::decode_file(bin, path).unwrap().duration_secs()
}

#[test]
#[ignore = "requires ffmpeg with an MP3 encoder"]
fn speech_only_when_background_is_missing() {
    init_tracing();
    let bin = ffmpeg_with_mp3();
    let dir = tempfile::tempdir().unwrap();
    let mixer = AudioMixer::new(Some(bin.clone()), dir.path().join("absent.mp3"), dir.path(), "/audio");

    let speech = wav_tone(1.5, 440.0);
    let mixed = mixer.mix(&speech).unwrap();

    assert_eq!(mixed.mode, MixMode::SpeechOnly);
    let speech_secs = ffmpeg::decode(&bin, &speech).unwrap().duration_secs();
    assert!((decoded_seconds(&bin, &mixed.path) - speech_secs).abs() < 0.1);
}

#[test]
#[ignore = "requires ffmpeg with an MP3 encoder"]
fn short_background_is_looped_under_the_speech() {
    init_tracing();
    let bin = ffmpeg_with_mp3();
    let dir = tempfile::tempdir().unwrap();
    let music = dir.path().join("music.wav");
    std::fs::write(&music, wav_tone(0.4, 220.0)).unwrap();
    let mixer = AudioMixer::new(Some(bin.clone()), &music, dir.path(), "/audio");

    let mixed = mixer.mix(&wav_tone(2.0, 440.0)).unwrap();

    assert_eq!(mixed.mode, MixMode::Mixed);
    assert!((decoded_seconds(&bin, &mixed.path) - 2.0).abs() < 0.1);
}

#[test]
#[ignore = "requires ffmpeg with an MP3 encoder"]
fn undecodable_speech_falls_back_to_raw_bytes() {
    init_tracing();
    let bin = ffmpeg_with_mp3();
    let dir = tempfile::tempdir().unwrap();
    let mixer = AudioMixer::new(Some(bin), dir.path().join("absent.mp3"), dir.path(), "/audio");

    let garbage = b"this is not audio at all".to_vec();
    let mixed = mixer.mix(&garbage).unwrap();

    assert_eq!(mixed.mode, MixMode::Raw);
    assert_eq!(std::fs::read(&mixed.path).unwrap(), garbage);
}
