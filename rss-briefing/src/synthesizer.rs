use crate::traits::SpeechSynthesizer;
use crate::types::{BriefingError, Result, SpeechRequest, SynthesizedSpeech};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePayload<'a> {
    text: &'a str,
    voice_id: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    audio_file: Option<String>,
    audio_length_in_seconds: Option<f64>,
    consumed_character_count: Option<u64>,
    remaining_character_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_message: Option<String>,
}

/// Client for the Murf text-to-speech API.
pub struct MurfClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl MurfClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    async fn generate(&self, request: &SpeechRequest) -> Result<GenerateResponse> {
        let payload = GeneratePayload {
            text: &request.text,
            voice_id: &request.voice_id,
            format: &request.audio_format,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BriefingError::Synthesis(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BriefingError::Synthesis(e.to_string()))?;

        if !status.is_success() {
            error!("Murf API request failed: HTTP {}: {}", status.as_u16(), body);
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error_message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(BriefingError::Synthesis(message));
        }

        serde_json::from_str(&body)
            .map_err(|e| BriefingError::Synthesis(format!("Malformed Murf response: {e}")))
    }

    async fn download(&self, audio_url: &str) -> Result<Vec<u8>> {
        info!("Downloading speech audio from Murf...");
        let response = self
            .client
            .get(audio_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BriefingError::Synthesis(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BriefingError::Synthesis(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for MurfClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SynthesizedSpeech> {
        info!(
            "Generating audio with Murf API - {} characters",
            request.text.chars().count()
        );

        let generated = self.generate(request).await?;
        let audio_url = generated
            .audio_file
            .filter(|url| !url.is_empty())
            .ok_or_else(|| BriefingError::Synthesis("No audio file URL in Murf response".to_string()))?;

        let audio = self.download(&audio_url).await?;
        info!("Downloaded {} bytes of speech audio", audio.len());

        Ok(SynthesizedSpeech {
            audio,
            audio_length_seconds: generated.audio_length_in_seconds.unwrap_or_default(),
            characters_used: generated.consumed_character_count.unwrap_or_default(),
            characters_remaining: generated.remaining_character_count.unwrap_or_default(),
        })
    }
}
