use std::env;
use std::path::{Path, PathBuf};

use crate::types::FetchConfig;

/// Value shipped in sample env files; a key containing it was never filled in.
pub const API_KEY_PLACEHOLDER: &str = "PASTE_YOUR_API_KEY_HERE";

pub const DEFAULT_MURF_API_URL: &str = "https://api.murf.ai/v1/speech/generate";
pub const DEFAULT_BACKGROUND_MUSIC_PATH: &str = "assets/corporate-technology-196202.mp3";

/// Subdirectory of the static dir that receives generated briefings.
pub const GENERATED_AUDIO_DIR: &str = "generated_audio";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub murf_api_key: Option<String>,
    pub murf_api_url: String,

    pub background_music_path: PathBuf,
    pub static_dir: PathBuf,
    /// Always inside `static_dir` so the static file service exposes it.
    pub output_dir: PathBuf,
    /// URL path under which `output_dir` is served.
    pub output_url_prefix: String,
    pub ffmpeg_bin: Option<PathBuf>,

    pub host: String,
    pub port: u16,

    pub fetch: FetchConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("PORT must be a number, got {port:?}: {e}"))?;

        let mut fetch = FetchConfig::default();
        if let Ok(agent) = env::var("FEED_USER_AGENT") {
            fetch.user_agent = agent;
        }

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        Ok(Self {
            murf_api_key: env::var("MURF_API_KEY").ok(),
            murf_api_url: env::var("MURF_API_URL")
                .unwrap_or_else(|_| DEFAULT_MURF_API_URL.to_string()),
            background_music_path: env::var("BACKGROUND_MUSIC_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_BACKGROUND_MUSIC_PATH)),
            output_dir: static_dir.join(GENERATED_AUDIO_DIR),
            output_url_prefix: format!("/static/{GENERATED_AUDIO_DIR}"),
            static_dir,
            ffmpeg_bin: crate::ffmpeg::locate(env::var("FFMPEG_BIN").ok().as_deref()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            fetch,
        })
    }

    /// True when a real credential is present.
    pub fn murf_api_key_configured(&self) -> bool {
        match &self.murf_api_key {
            Some(key) => !key.trim().is_empty() && !key.contains(API_KEY_PLACEHOLDER),
            None => false,
        }
    }

    pub fn background_music_exists(&self) -> bool {
        self.background_music_path.exists()
    }

    /// Creates the output directory and the directory holding the background asset.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        if let Some(parent) = self.background_music_path.parent().filter(|p| *p != Path::new("")) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            murf_api_key: None,
            murf_api_url: DEFAULT_MURF_API_URL.to_string(),
            background_music_path: PathBuf::from(DEFAULT_BACKGROUND_MUSIC_PATH),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("static/generated_audio"),
            output_url_prefix: "/static/generated_audio".to_string(),
            ffmpeg_bin: None,
            host: "0.0.0.0".to_string(),
            port: 8000,
            fetch: FetchConfig::default(),
        }
    }
}
