use crate::types::{Result, SpeechRequest, SynthesizedSpeech};
use async_trait::async_trait;

/// Retrieves raw feed documents.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw feed body at `url`. Bytes are left undecoded so the parser can honour the
    /// document's declared encoding.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Turns briefing text into speech audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `request.text` and return the downloaded audio bytes.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedSpeech>;
}
