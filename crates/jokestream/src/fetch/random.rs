use super::{fallback_joke, JokeService};
use crate::filter::{FilterSettings, FilterStatsDelta, FilterStrength};
use crate::jokes::Joke;
use crate::observability::metrics;
use crate::prelude::*;
use crate::Result;
use chrono::prelude::*;
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomJokeOptions {
    pub filter_enabled: bool,

    /// Max number of jokes rejected by the filter before giving up
    pub max_retries: u32,
}

impl Default for RandomJokeOptions {
    fn default() -> Self {
        Self {
            filter_enabled: true,
            max_retries: 10,
        }
    }
}

impl RandomJokeOptions {
    pub fn from_settings(settings: &FilterSettings, max_retries: u32) -> Self {
        Self {
            filter_enabled: settings.enabled,
            max_retries,
        }
    }
}

impl JokeService {
    /// Fetches random jokes until one of them passes the content filter.
    /// Returns the [`fallback_joke`] if all `max_retries` attempts were rejected.
    /// Errors of the joke source are returned immediately without retries.
    pub async fn random_joke(&self, opts: RandomJokeOptions) -> Result<Joke> {
        for attempt in 0..opts.max_retries {
            let joke = self.with_deadline(self.source.random_joke()).await?;

            if !opts.filter_enabled {
                self.record_checked();
                return Ok(joke);
            }

            let verdict = self.filter.analyze(&joke.text);

            if verdict.is_clean {
                debug!(attempt, joke_id = %joke.id, "Joke passed the content filter");
                self.record_checked();
                return Ok(joke);
            }

            debug!(
                attempt,
                joke_id = %joke.id,
                matched_categories = ?verdict.matched_categories,
                "Joke was rejected by the content filter",
            );

            self.record_blocked(&verdict.matched_categories);
        }

        warn!(
            max_retries = opts.max_retries,
            "Couldn't find a clean joke, returning the fallback one",
        );

        metrics::record_fallback_joke();

        Ok(fallback_joke())
    }

    /// Same as [`JokeService::random_joke`] with the filter enabled, but the
    /// filter strength is overridden for the duration of the call.
    pub async fn clean_joke(&self, strength: Option<FilterStrength>) -> Result<Joke> {
        let _guard = strength.map(|strength| StrengthOverride::new(&self.settings, strength));

        let opts = RandomJokeOptions {
            filter_enabled: true,
            max_retries: self.max_retries,
        };

        self.random_joke(opts).await
    }

    fn record_checked(&self) {
        let total_checked = self.stats.get().map_or(0, |stats| stats.total_checked);

        self.stats.update(FilterStatsDelta {
            total_checked: Some(total_checked + 1),
            last_checked: Some(Utc::now()),
            ..Default::default()
        });

        metrics::record_filter_checks(1, 0);
    }

    fn record_blocked(&self, matched_categories: &[String]) {
        let stats = self.stats.get();

        let total_checked = stats.as_ref().map_or(0, |stats| stats.total_checked);
        let total_blocked = stats.as_ref().map_or(0, |stats| stats.total_blocked);
        let mut blocked_by_category = stats
            .map(|stats| stats.blocked_by_category)
            .unwrap_or_default();

        for category in matched_categories {
            *blocked_by_category.entry(category.clone()).or_default() += 1;
        }

        self.stats.update(FilterStatsDelta {
            total_checked: Some(total_checked + 1),
            total_blocked: Some(total_blocked + 1),
            blocked_by_category: Some(blocked_by_category),
            last_checked: Some(Utc::now()),
        });

        metrics::record_filter_checks(1, 1);
    }
}

/// Restores the previous filter strength when dropped
struct StrengthOverride<'a> {
    settings: &'a Mutex<FilterSettings>,
    original: FilterStrength,
}

impl<'a> StrengthOverride<'a> {
    fn new(settings: &'a Mutex<FilterSettings>, strength: FilterStrength) -> Self {
        let mut guard = settings.lock();
        let original = guard.strength;
        guard.set_strength(strength);
        Self { settings, original }
    }
}

impl Drop for StrengthOverride<'_> {
    fn drop(&mut self) {
        self.settings.lock().set_strength(self.original);
    }
}
