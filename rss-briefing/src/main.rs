use clap::{Parser, Subcommand};
use rss_briefing::pipeline::GenerateBriefingRequest;
use rss_briefing::{create_app, AppState, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rss-briefing", version, about = "Turn RSS feeds into a spoken news briefing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Produce one briefing and print the response as JSON
    Generate {
        /// Feed URL; repeat for several feeds
        #[arg(long = "feed", required = true)]
        feeds: Vec<String>,
        #[arg(long, default_value = "en-US-natalie")]
        voice_id: String,
        #[arg(long, default_value = "MP3")]
        audio_format: String,
        #[arg(long, default_value_t = 3)]
        max_articles_per_feed: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rss_briefing=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    config.ensure_directories()?;

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Command::Generate {
            feeds,
            voice_id,
            audio_format,
            max_articles_per_feed,
        } => {
            let state = AppState::from_config(config)?;
            let request = GenerateBriefingRequest {
                feeds,
                voice_id,
                audio_format,
                max_articles_per_feed,
            };
            match state.pipeline.generate(&request).await {
                Ok(response) => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                    Ok(())
                }
                Err(e) => {
                    error!("Briefing failed: {}", e);
                    Err(e.into())
                }
            }
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    info!("Starting RSS to Audio News Briefing API");
    info!("Listening on http://{}", addr);
    info!("FFmpeg available: {}", config.ffmpeg_bin.is_some());
    info!("Background music exists: {}", config.background_music_exists());
    if !config.murf_api_key_configured() {
        info!("MURF_API_KEY is not set; /generate-briefing will refuse requests");
    }

    let app = create_app(AppState::from_config(config)?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
