//! Scripted joke source for testing the fetchers
use super::{JokeService, JokeServiceOptions};
use crate::filter::{FilterSettings, FilterStatsTracker};
use crate::jokes::api::JokeApiError;
use crate::jokes::{Joke, JokeSearchPage, JokeSource, SearchQuery};
use crate::prelude::*;
use crate::{err, Result};
use async_trait::async_trait;
use censy::ContentFilter;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Returns the result of the `random_joke` call by its 0-based index.
/// `None` makes the call hang forever.
type RandomJokeScript = dyn Fn(usize) -> Option<Result<Joke>> + Send + Sync;

pub(crate) struct FakeSource {
    random: Box<RandomJokeScript>,
    page: Option<JokeSearchPage>,
    random_calls: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn random(
        script: impl Fn(usize) -> Option<Result<Joke>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            random: Box::new(script),
            page: None,
            random_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn page(page: JokeSearchPage) -> Self {
        Self {
            page: Some(page),
            ..Self::random(|call| Some(Ok(clean_joke(call))))
        }
    }

    pub(crate) fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JokeSource for FakeSource {
    async fn random_joke(&self) -> Result<Joke> {
        let call = self.random_calls.fetch_add(1, Ordering::SeqCst);
        match (self.random)(call) {
            Some(result) => result,
            None => futures::future::pending().await,
        }
    }

    async fn joke_by_id(&self, id: &str) -> Result<Joke> {
        if id.starts_with("clean-") {
            return Ok(Joke {
                id: id.to_owned(),
                ..clean_joke(0)
            });
        }
        Err(err!(JokeApiError::NotFound {
            resource: format!("Joke `{id}`")
        }))
    }

    async fn search(&self, _query: &SearchQuery) -> Result<JokeSearchPage> {
        self.page.clone().fatal_ctx(|| "No search page was scripted")
    }
}

pub(crate) fn clean_joke(index: usize) -> Joke {
    Joke {
        id: format!("clean-{index}"),
        text: "Why did the chicken cross the road? To get to the other side.".to_owned(),
        status_code: 200,
    }
}

pub(crate) fn dirty_joke(index: usize) -> Joke {
    Joke {
        id: format!("dirty-{index}"),
        text: "What the fuck is this?".to_owned(),
        status_code: 200,
    }
}

pub(crate) struct Harness {
    pub(crate) service: JokeService,
    pub(crate) source: Arc<FakeSource>,
    pub(crate) stats: Arc<FilterStatsTracker>,
}

impl Harness {
    pub(crate) fn new(source: FakeSource) -> Self {
        Self::build(source, Default::default(), None)
    }

    pub(crate) fn with_attempt_timeout(source: FakeSource, timeout: Duration) -> Self {
        Self::build(source, Default::default(), Some(timeout))
    }

    pub(crate) fn with_settings(source: FakeSource, settings: Arc<Mutex<FilterSettings>>) -> Self {
        Self::build(source, settings, None)
    }

    fn build(
        source: FakeSource,
        settings: Arc<Mutex<FilterSettings>>,
        attempt_timeout: Option<Duration>,
    ) -> Self {
        let source = Arc::new(source);
        let stats = Arc::new(FilterStatsTracker::default());

        let service = JokeService::new(JokeServiceOptions {
            source: source.clone(),
            filter: Arc::new(ContentFilter::new()),
            stats: stats.clone(),
            settings,
            max_retries: 10,
            attempt_timeout,
        });

        Self {
            service,
            source,
            stats,
        }
    }
}
