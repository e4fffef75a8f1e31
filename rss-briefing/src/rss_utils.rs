/// RSS-specific utility functions for the briefing pipeline

/// Feed URL utilities
pub mod url {
    use ::url::Url;

    /// Known outlets, matched by substring against the lowercased feed URL. First match wins.
    pub const KNOWN_SOURCES: &[(&str, &str)] = &[
        ("reuters", "Reuters"),
        ("nytimes", "New York Times"),
        ("techcrunch", "TechCrunch"),
        ("bbc", "BBC News"),
        ("cnn", "CNN"),
        ("wsj", "Wall Street Journal"),
    ];

    pub const FALLBACK_SOURCE_NAME: &str = "News Source";

    /// Extract domain from URL
    pub fn extract_domain(url_str: &str) -> Option<String> {
        Url::parse(url_str)
            .ok()
            .and_then(|url| url.host_str().map(|h| h.to_string()))
            .filter(|host| !host.is_empty())
    }

    /// Human-readable outlet name for a feed URL.
    ///
    /// Falls back to the first label of the host ("www." stripped) in title case,
    /// then to a generic name when the URL has no host.
    pub fn source_name_for(feed_url: &str) -> String {
        let lowered = feed_url.to_lowercase();
        if let Some((_, name)) = KNOWN_SOURCES.iter().find(|(key, _)| lowered.contains(key)) {
            return name.to_string();
        }

        match extract_domain(feed_url) {
            Some(host) => {
                let host = host.strip_prefix("www.").unwrap_or(&host);
                let label = host.split('.').next().unwrap_or_default();
                if label.is_empty() {
                    FALLBACK_SOURCE_NAME.to_string()
                } else {
                    super::text::title_case(label)
                }
            }
            None => FALLBACK_SOURCE_NAME.to_string(),
        }
    }
}

/// Text cleanup for titles and summaries
pub mod text {
    use regex::Regex;
    use std::sync::LazyLock;

    static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));

    /// Applied in order, after tags are stripped.
    pub const ENTITIES: &[(&str, &str)] = &[("&amp;", "and"), ("&lt;", "<"), ("&gt;", ">")];

    /// Characters kept from a summary before the ellipsis.
    pub const SUMMARY_CHARS: usize = 197;

    /// Strip tags, collapse whitespace and decode the handful of entities feeds commonly leave behind.
    pub fn clean_text(raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let stripped = TAG.replace_all(raw, "");
        let mut text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        for (entity, replacement) in ENTITIES {
            text = text.replace(entity, replacement);
        }
        text
    }

    /// Cleaned summary cut to [`SUMMARY_CHARS`] with "..." appended, even when nothing was cut.
    pub fn summarize(raw: &str) -> String {
        let mut summary: String = clean_text(raw).chars().take(SUMMARY_CHARS).collect();
        summary.push_str("...");
        summary
    }

    /// Uppercase the first letter of every alphabetic run, lowercase the rest.
    pub fn title_case(word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        let mut prev_alpha = false;
        for c in word.chars() {
            if c.is_alphabetic() {
                if prev_alpha {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                prev_alpha = true;
            } else {
                out.push(c);
                prev_alpha = false;
            }
        }
        out
    }
}
