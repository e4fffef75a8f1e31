use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::mixer::AudioMixer;
use crate::pipeline::BriefingPipeline;
use crate::synthesizer::MurfClient;
use crate::types::Result;
use std::sync::Arc;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub pipeline: BriefingPipeline,
}

impl AppState {
    /// Wire the production fetcher, Murf client and mixer from `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let fetcher = Fetcher::new(config.fetch.clone())?;
        let murf = MurfClient::new(
            config.murf_api_url.clone(),
            config.murf_api_key.clone().unwrap_or_default(),
        )?;
        let mixer = AudioMixer::new(
            config.ffmpeg_bin.clone(),
            config.background_music_path.clone(),
            config.output_dir.clone(),
            config.output_url_prefix.clone(),
        );

        Ok(Self {
            pipeline: BriefingPipeline::new(config, Arc::new(fetcher), Arc::new(murf), mixer),
        })
    }

    pub fn config(&self) -> &Config {
        self.pipeline.config()
    }
}
