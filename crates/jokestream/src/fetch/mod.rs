//! Fetching of the jokes from the upstream with the content filter applied
mod batch;
mod random;
mod search;

#[cfg(test)]
mod fake;

use crate::filter::{FilterSettings, FilterStatsTracker};
use crate::jokes::{Joke, JokeSource};
use crate::{err, Result};
use censy::ContentFilter;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub use random::*;

const FALLBACK_JOKE_ID: &str = "fallback-1";
const FALLBACK_JOKE_TEXT: &str =
    "I'm reading a book about anti-gravity. It's impossible to put down!";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to the joke source has timed out after {timeout:?}")]
    AttemptTimedOut { timeout: Duration },
}

/// Joke returned when no clean joke was found in the allowed number of attempts
pub fn fallback_joke() -> Joke {
    Joke {
        id: FALLBACK_JOKE_ID.to_owned(),
        text: FALLBACK_JOKE_TEXT.to_owned(),
        status_code: 200,
    }
}

pub struct JokeServiceOptions {
    pub source: Arc<dyn JokeSource>,
    pub filter: Arc<ContentFilter>,
    pub stats: Arc<FilterStatsTracker>,
    pub settings: Arc<Mutex<FilterSettings>>,

    /// Number of attempts used by [`JokeService::clean_joke`]
    pub max_retries: u32,

    /// Deadline for every request to the joke source
    pub attempt_timeout: Option<Duration>,
}

/// Fetches the jokes from the source, filters them and keeps the filter
/// stats up to date.
pub struct JokeService {
    source: Arc<dyn JokeSource>,
    filter: Arc<ContentFilter>,
    stats: Arc<FilterStatsTracker>,
    settings: Arc<Mutex<FilterSettings>>,
    max_retries: u32,
    attempt_timeout: Option<Duration>,
}

impl JokeService {
    pub fn new(opts: JokeServiceOptions) -> Self {
        let JokeServiceOptions {
            source,
            filter,
            stats,
            settings,
            max_retries,
            attempt_timeout,
        } = opts;

        Self {
            source,
            filter,
            stats,
            settings,
            max_retries,
            attempt_timeout,
        }
    }

    pub fn filter(&self) -> &ContentFilter {
        &self.filter
    }

    pub fn stats(&self) -> &FilterStatsTracker {
        &self.stats
    }

    pub fn settings(&self) -> &Mutex<FilterSettings> {
        &self.settings
    }

    /// The joke isn't checked by the content filter, because it was
    /// requested explicitly.
    pub async fn joke_by_id(&self, id: &str) -> Result<Joke> {
        self.with_deadline(self.source.joke_by_id(id)).await
    }

    async fn with_deadline<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let Some(timeout) = self.attempt_timeout else {
            return fut.await;
        };

        match tokio::time::timeout(timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(err!(FetchError::AttemptTimedOut { timeout })),
        }
    }
}
