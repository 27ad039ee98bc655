use super::JokeService;
use crate::filter::FilterStatsDelta;
use crate::jokes::{JokeSearchPage, SearchQuery};
use crate::observability::metrics;
use crate::prelude::*;
use crate::Result;
use chrono::prelude::*;

impl JokeService {
    /// Searches the jokes and removes the ones rejected by the content filter
    /// from the page if the filter is enabled.
    pub async fn search_jokes(
        &self,
        query: &SearchQuery,
        filter_enabled: bool,
    ) -> Result<JokeSearchPage> {
        let page = self.with_deadline(self.source.search(query)).await?;

        if !filter_enabled {
            return Ok(page);
        }

        Ok(self.filter_search_page(page))
    }

    /// Retains only the clean jokes on the page. The pagination metadata is
    /// left as it was returned by the upstream.
    pub fn filter_search_page(&self, mut page: JokeSearchPage) -> JokeSearchPage {
        let checked = page.results.len() as u64;

        page.results.retain(|joke| self.filter.is_clean(&joke.text));

        let blocked = checked - page.results.len() as u64;

        debug!(
            search_term = %page.search_term,
            checked,
            blocked,
            "Filtered the search results",
        );

        let stats = self.stats.get();
        let total_checked = stats.as_ref().map_or(0, |stats| stats.total_checked);
        let total_blocked = stats.as_ref().map_or(0, |stats| stats.total_blocked);

        self.stats.update(FilterStatsDelta {
            total_checked: Some(total_checked + checked),
            total_blocked: Some(total_blocked + blocked),
            last_checked: Some(Utc::now()),
            blocked_by_category: None,
        });

        metrics::record_filter_checks(checked, blocked);

        page
    }
}
