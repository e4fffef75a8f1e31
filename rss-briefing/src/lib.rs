pub mod types;
pub mod config;
pub mod traits;
pub mod rss_utils;
pub mod fetcher;
pub mod parser;
pub mod aggregator;
pub mod digest;
pub mod synthesizer;
pub mod ffmpeg;
pub mod mixer;
pub mod pipeline;
pub mod state;
pub mod server;

pub use types::*;
pub use config::Config;
pub use traits::{FeedSource, SpeechSynthesizer};
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use aggregator::RssAggregator;
pub use digest::BriefingComposer;
pub use synthesizer::MurfClient;
pub use mixer::{AudioMixer, MixMode, MixedAudio, PcmBuffer};
pub use pipeline::{BriefingPipeline, BriefingResponse, GenerateBriefingRequest};
pub use state::AppState;
pub use server::create_app;
