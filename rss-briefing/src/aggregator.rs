use crate::parser::FeedParser;
use crate::rss_utils::{text, url};
use crate::traits::FeedSource;
use crate::types::{Article, BriefingError, CollectedArticles, ParsedFeed, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct RssAggregator {
    source: Arc<dyn FeedSource>,
}

impl RssAggregator {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self { source }
    }

    /// Gather up to `max_per_feed` articles from each feed, in input order.
    ///
    /// A feed that fails to fetch or parse, or has no entries, is logged and skipped.
    /// Fails with `NoContent` only when no feed produced a single article.
    pub async fn collect_articles(
        &self,
        feed_urls: &[String],
        max_per_feed: usize,
    ) -> Result<CollectedArticles> {
        let mut collected = CollectedArticles::default();

        info!("Fetching {} feeds", feed_urls.len());

        for feed_url in feed_urls {
            match self.fetch_single_feed(feed_url).await {
                Ok(Some(feed)) => {
                    let source_name = url::source_name_for(feed_url);
                    if !collected.sources.contains(&source_name) {
                        collected.sources.push(source_name.clone());
                    }
                    collected
                        .articles
                        .extend(articles_from_feed(feed, &source_name, max_per_feed));
                }
                Ok(None) => {
                    warn!("No articles found in feed: {}", feed_url);
                }
                Err(e) => {
                    error!("Error fetching feed {}: {}", feed_url, e);
                }
            }
        }

        info!(
            "Collected {} articles from {} sources",
            collected.articles.len(),
            collected.sources.len()
        );

        if collected.articles.is_empty() {
            return Err(BriefingError::NoContent(
                "Could not find any articles from the provided feeds.".to_string(),
            ));
        }
        Ok(collected)
    }

    /// `None` when the feed parsed but had no entries.
    async fn fetch_single_feed(&self, feed_url: &str) -> Result<Option<ParsedFeed>> {
        let content = self.source.fetch(feed_url).await?;
        let feed = FeedParser::parse_feed(&content)?;
        if feed.entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(feed))
    }
}

/// Turn the first `max_per_feed` entries into articles, dropping those whose title cleans to nothing.
pub fn articles_from_feed(feed: ParsedFeed, source_name: &str, max_per_feed: usize) -> Vec<Article> {
    feed.entries
        .into_iter()
        .take(max_per_feed)
        .filter_map(|entry| {
            let title = text::clean_text(entry.title.as_deref().unwrap_or_default());
            if title.is_empty() {
                return None;
            }
            Some(Article {
                source: source_name.to_string(),
                title,
                summary: text::summarize(entry.summary.as_deref().unwrap_or_default()),
            })
        })
        .collect()
}
