use crate::types::Article;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

/// Most articles read in one briefing; the rest are dropped silently.
pub const MAX_BRIEFING_ARTICLES: usize = 20;

pub const DATELINE_LOCATION: &str = "Durgapur";
pub const NO_NEWS: &str = "No news articles available at this time.";
pub const FIRST_TRANSITION: &str = "From";
pub const NEXT_TRANSITION: &str = "Next, from";
pub const SIGN_OFF: &str = "That concludes your news briefing. Have a great day!";

/// Builds the spoken briefing script from collected articles.
pub struct BriefingComposer;

impl BriefingComposer {
    /// Compose a briefing dated today (local time).
    pub fn compose(articles: &[Article]) -> String {
        Self::compose_for_date(articles, Local::now().date_naive())
    }

    pub fn compose_for_date(articles: &[Article], date: NaiveDate) -> String {
        if articles.is_empty() {
            return NO_NEWS.to_string();
        }

        info!(
            "Composing briefing from {} of {} articles",
            articles.len().min(MAX_BRIEFING_ARTICLES),
            articles.len()
        );

        let mut briefing = format!(
            "Good morning from {}. Here is your news briefing for {}.\n\n",
            DATELINE_LOCATION,
            date.format("%A, %B %d")
        );

        for (i, article) in articles.iter().take(MAX_BRIEFING_ARTICLES).enumerate() {
            let transition = if i == 0 { FIRST_TRANSITION } else { NEXT_TRANSITION };
            briefing.push_str(&format!(
                "{} {}... {}. {}\n\n",
                transition, article.source, article.title, article.summary
            ));
        }

        briefing.push_str(SIGN_OFF);
        debug!("Briefing is {} characters", briefing.chars().count());
        briefing
    }
}
