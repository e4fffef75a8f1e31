use serde::{Deserialize, Serialize};

/// One article ready to be read aloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    /// Cleaned, truncated and always ellipsis-terminated.
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub max_feed_size_mb: usize,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "RSS-Briefing/1.1".to_string(),
            max_feed_size_mb: 10,
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug)]
pub struct ParsedEntry {
    pub title: Option<String>,
    /// Summary, falling back to the description/content body.
    pub summary: Option<String>,
}

/// Articles gathered across all requested feeds.
#[derive(Debug, Default, Clone)]
pub struct CollectedArticles {
    pub articles: Vec<Article>,
    /// Distinct source names in first-seen order.
    pub sources: Vec<String>,
}

/// Raw speech audio plus the usage figures reported by the synthesis service.
#[derive(Debug, Clone)]
pub struct SynthesizedSpeech {
    pub audio: Vec<u8>,
    pub audio_length_seconds: f64,
    pub characters_used: u64,
    pub characters_remaining: u64,
}

#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: String,
    pub audio_format: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BriefingError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    NoContent(String),

    #[error("Murf API communication error: {0}")]
    Synthesis(String),

    #[error("Failed to process audio: {0}")]
    AudioProcessing(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed request failed: {0}")]
    Fetch(String),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed size exceeds limit of {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BriefingError {
    /// Short label for the error kind, used as the `error` field of JSON bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            BriefingError::BadRequest(_) => "Bad request",
            BriefingError::Configuration(_) => "Configuration error",
            BriefingError::NoContent(_) => "No content",
            BriefingError::Synthesis(_) => "Upstream synthesis error",
            BriefingError::AudioProcessing(_) => "Audio processing error",
            _ => "Unexpected error",
        }
    }

    /// Collapses low-level failures into `Unexpected`, keeping the named kinds as they are.
    pub fn surfaced(self) -> Self {
        match self {
            e @ (BriefingError::BadRequest(_)
            | BriefingError::Configuration(_)
            | BriefingError::NoContent(_)
            | BriefingError::Synthesis(_)
            | BriefingError::AudioProcessing(_)
            | BriefingError::Unexpected(_)) => e,
            other => BriefingError::Unexpected(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BriefingError>;
