use super::{JokeService, RandomJokeOptions};
use crate::jokes::Joke;
use crate::prelude::*;
use futures::prelude::*;
use futures::stream::FuturesUnordered;

impl JokeService {
    /// Runs `count` [`JokeService::random_joke`] requests concurrently.
    /// Failed requests are logged and skipped, so the result may contain
    /// less jokes than requested. The jokes are returned in the order the
    /// requests complete.
    pub async fn random_jokes(&self, count: usize, opts: RandomJokeOptions) -> Vec<Joke> {
        let jokes: Vec<_> = (0..count)
            .map(|_| self.random_joke(opts))
            .collect::<FuturesUnordered<_>>()
            .filter_map(|result| async move {
                result
                    .map_err(|err| {
                        warn!(err = tracing_err(&err), "Failed to fetch a joke for the batch");
                    })
                    .ok()
            })
            .collect()
            .await;

        if jokes.len() < count {
            warn!(
                requested = count,
                fetched = jokes.len(),
                "Some of the jokes in the batch failed to be fetched",
            );
        }

        jokes
    }
}
