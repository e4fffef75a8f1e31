use crate::aggregator::RssAggregator;
use crate::config::Config;
use crate::digest::BriefingComposer;
use crate::mixer::AudioMixer;
use crate::traits::{FeedSource, SpeechSynthesizer};
use crate::types::{BriefingError, Result, SpeechRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

pub const MIN_ARTICLES_PER_FEED: u32 = 1;
pub const MAX_ARTICLES_PER_FEED: u32 = 10;

fn default_voice_id() -> String {
    "en-US-natalie".to_string()
}

fn default_audio_format() -> String {
    "MP3".to_string()
}

fn default_max_articles_per_feed() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateBriefingRequest {
    pub feeds: Vec<String>,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
    #[serde(default = "default_max_articles_per_feed")]
    pub max_articles_per_feed: u32,
}

impl GenerateBriefingRequest {
    pub fn new(feeds: Vec<String>) -> Self {
        Self {
            feeds,
            voice_id: default_voice_id(),
            audio_format: default_audio_format(),
            max_articles_per_feed: default_max_articles_per_feed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefingResponse {
    pub success: bool,
    pub audio_url: String,
    pub briefing_text: String,
    pub audio_length_seconds: f64,
    pub characters_used: u64,
    pub characters_remaining: u64,
    pub articles_count: usize,
    pub sources: Vec<String>,
}

/// validate → fetch → compose → synthesize → mix → respond.
pub struct BriefingPipeline {
    config: Arc<Config>,
    aggregator: RssAggregator,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    mixer: AudioMixer,
}

impl BriefingPipeline {
    pub fn new(
        config: Arc<Config>,
        feeds: Arc<dyn FeedSource>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        mixer: AudioMixer,
    ) -> Self {
        Self {
            config,
            aggregator: RssAggregator::new(feeds),
            synthesizer,
            mixer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mixer(&self) -> &AudioMixer {
        &self.mixer
    }

    /// Run one request. Errors come back already collapsed to their surfaced kind.
    pub async fn generate(&self, request: &GenerateBriefingRequest) -> Result<BriefingResponse> {
        self.validate(request)?;
        self.run(request).await.map_err(|e| {
            let surfaced = e.surfaced();
            if let BriefingError::Unexpected(msg) = &surfaced {
                error!("Unexpected error in generate_briefing: {}", msg);
            }
            surfaced
        })
    }

    /// Checks that must pass before any network traffic.
    fn validate(&self, request: &GenerateBriefingRequest) -> Result<()> {
        if request.feeds.is_empty() {
            return Err(BriefingError::BadRequest("No RSS feed URLs provided".to_string()));
        }
        if !(MIN_ARTICLES_PER_FEED..=MAX_ARTICLES_PER_FEED).contains(&request.max_articles_per_feed) {
            return Err(BriefingError::BadRequest(format!(
                "max_articles_per_feed must be between {} and {}, got {}",
                MIN_ARTICLES_PER_FEED, MAX_ARTICLES_PER_FEED, request.max_articles_per_feed
            )));
        }
        if !self.config.murf_api_key_configured() {
            return Err(BriefingError::Configuration(
                "Murf API key is not configured on the server.".to_string(),
            ));
        }
        Ok(())
    }

    async fn run(&self, request: &GenerateBriefingRequest) -> Result<BriefingResponse> {
        let collected = self
            .aggregator
            .collect_articles(&request.feeds, request.max_articles_per_feed as usize)
            .await?;

        let briefing_text = BriefingComposer::compose(&collected.articles);

        let speech = self
            .synthesizer
            .synthesize(&SpeechRequest {
                text: briefing_text.clone(),
                voice_id: request.voice_id.clone(),
                audio_format: request.audio_format.clone(),
            })
            .await?;

        let mixer = self.mixer.clone();
        let audio = speech.audio;
        let mixed = tokio::task::spawn_blocking(move || mixer.mix(&audio))
            .await
            .map_err(|e| BriefingError::Unexpected(e.to_string()))??;

        info!(
            "Briefing ready at {} ({} articles, {} sources)",
            mixed.url,
            collected.articles.len(),
            collected.sources.len()
        );

        Ok(BriefingResponse {
            success: true,
            audio_url: mixed.url,
            briefing_text,
            audio_length_seconds: speech.audio_length_seconds,
            characters_used: speech.characters_used,
            characters_remaining: speech.characters_remaining,
            articles_count: collected.articles.len(),
            sources: collected.sources,
        })
    }
}
