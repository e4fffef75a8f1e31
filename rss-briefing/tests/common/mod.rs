#![allow(dead_code)]

use async_trait::async_trait;
use rss_briefing::{
    AudioMixer, BriefingError, BriefingPipeline, Config, FeedSource, Result, SpeechRequest,
    SpeechSynthesizer, SynthesizedSpeech,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();
    });
}

/// RSS 2.0 document with `count` items titled "<prefix> story N".
pub fn rss_feed(prefix: &str, count: usize) -> String {
    let items: String = (1..=count)
        .map(|n| {
            format!(
                "<item><title>{prefix} story {n}</title><link>https://example.com/{prefix}/{n}</link>\
                 <description>&lt;p&gt;Details of {prefix} story {n}.&lt;/p&gt;</description></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>{prefix}</title><link>https://example.com</link><description>test</description>{items}</channel></rss>"#
    )
}

/// Serves canned documents by URL; unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct StaticFeeds {
    documents: HashMap<String, Vec<u8>>,
    pub calls: AtomicUsize,
}

impl StaticFeeds {
    pub fn with(mut self, url: &str, body: String) -> Self {
        self.documents.insert(url.to_string(), body.into_bytes());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StaticFeeds {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| BriefingError::Fetch(format!("connection refused: {url}")))
    }
}

/// Returns fixed audio bytes and records the text it was asked to speak.
pub struct FakeSynthesizer {
    pub audio: Vec<u8>,
    pub fail_with: Option<String>,
    pub requests: Mutex<Vec<SpeechRequest>>,
}

impl FakeSynthesizer {
    pub fn returning(audio: &[u8]) -> Self {
        Self {
            audio: audio.to_vec(),
            fail_with: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            audio: Vec::new(),
            fail_with: Some(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedSpeech> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = &self.fail_with {
            return Err(BriefingError::Synthesis(message.clone()));
        }
        Ok(SynthesizedSpeech {
            audio: self.audio.clone(),
            audio_length_seconds: 42.5,
            characters_used: request.text.chars().count() as u64,
            characters_remaining: 9_000,
        })
    }
}

pub fn test_config(static_dir: &Path) -> Config {
    Config {
        murf_api_key: Some("test-key".to_string()),
        static_dir: static_dir.to_path_buf(),
        output_dir: static_dir.join("generated_audio"),
        background_music_path: static_dir.join("no-music.mp3"),
        ..Config::default()
    }
}

/// Pipeline with no ffmpeg, so speech bytes land on disk untouched.
pub fn pipeline(
    config: Config,
    feeds: Arc<StaticFeeds>,
    synthesizer: Arc<FakeSynthesizer>,
) -> BriefingPipeline {
    std::fs::create_dir_all(&config.output_dir).unwrap();
    let mixer = AudioMixer::new(
        None,
        config.background_music_path.clone(),
        config.output_dir.clone(),
        config.output_url_prefix.clone(),
    );
    BriefingPipeline::new(Arc::new(config), feeds, synthesizer, mixer)
}

pub fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
