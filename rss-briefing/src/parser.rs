use crate::types::{BriefingError, ParsedEntry, ParsedFeed, Result};
use feed_rs::parser;
use tracing::debug;

pub struct FeedParser;

impl FeedParser {
    /// Parse an RSS or Atom document. Entries keep their document order.
    pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| BriefingError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries = feed.entries.into_iter().map(Self::parse_entry).collect::<Vec<_>>();

        debug!("Parsed feed with {} entries", entries.len());
        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> ParsedEntry {
        let title = entry.title.map(|t| t.content);

        // RSS <description> lands in `summary`; Atom-only feeds may carry just <content>.
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));

        ParsedEntry { title, summary }
    }
}
