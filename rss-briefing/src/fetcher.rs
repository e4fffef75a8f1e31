use crate::traits::FeedSource;
use crate::types::{BriefingError, FetchConfig, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect)
            .build()?;

        Ok(Self { client, config })
    }

    /// Largest accepted body, in bytes.
    fn max_feed_bytes(&self) -> u64 {
        self.config.max_feed_size_mb as u64 * 1024 * 1024
    }

    /// Fetch the raw feed body. The size cap is checked against `Content-Length` up front and
    /// again while streaming, since chunked responses carry no length.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let mut response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(BriefingError::Fetch(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let limit = self.max_feed_bytes();
        if let Some(content_length) = response.content_length() {
            if content_length > limit {
                return Err(self.too_large(content_length));
            }
        }

        let mut content = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (content.len() + chunk.len()) as u64 > limit {
                return Err(self.too_large((content.len() + chunk.len()) as u64));
            }
            content.extend_from_slice(&chunk);
        }

        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }

    fn too_large(&self, seen_bytes: u64) -> BriefingError {
        warn!(
            "Feed exceeds {}MB limit ({} bytes seen)",
            self.config.max_feed_size_mb, seen_bytes
        );
        BriefingError::FeedTooLarge {
            size_mb: self.config.max_feed_size_mb,
        }
    }
}

#[async_trait]
impl FeedSource for Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetch_feed(url).await
    }
}
