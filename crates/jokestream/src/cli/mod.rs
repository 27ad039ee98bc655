//! Command line front-end
mod filter;
mod jokes;

use crate::fetch::{JokeService, JokeServiceOptions};
use crate::filter::FilterStatsTracker;
use crate::jokes::api;
use crate::prelude::*;
use crate::state::{AppState, StateStore};
use crate::{Config, Result};
use async_trait::async_trait;
use censy::ContentFilter;
use clap::Parser;
use parking_lot::Mutex;
use std::sync::Arc;

/// Endless dad jokes with a content filter
#[derive(Parser, Debug)]
#[command(version)]
pub enum Args {
    Random(jokes::Random),
    Joke(jokes::Joke),
    Search(jokes::Search),
    Check(filter::Check),
    Stats(filter::Stats),
    Filter(filter::Filter),
}

#[async_trait]
trait Cmd {
    async fn run(self, ctx: &Context) -> Result;
}

pub(crate) struct Context {
    config: Config,
    service: JokeService,
}

impl Context {
    fn new(config: Config, state: AppState) -> Result<Self> {
        let source = api::Client::new(config.api.clone())?;

        let service = JokeService::new(JokeServiceOptions {
            source: Arc::new(source),
            filter: Arc::new(ContentFilter::new()),
            stats: Arc::new(FilterStatsTracker::new(state.stats)),
            settings: Arc::new(Mutex::new(state.settings)),
            max_retries: config.fetch.max_retries,
            attempt_timeout: config.fetch.attempt_timeout(),
        });

        Ok(Self { config, service })
    }

    fn state(&self) -> AppState {
        AppState {
            settings: self.service.settings().lock().clone(),
            stats: self.service.stats().get(),
        }
    }
}

pub(crate) async fn run(config: Config, args: Args) -> Result {
    let store = StateStore::new(config.state.path.clone());
    let state = store.load()?;
    let initial = state.clone();

    let ctx = Context::new(config, state)?;

    let cmd = match args {
        Args::Random(cmd) => cmd.run(&ctx),
        Args::Joke(cmd) => cmd.run(&ctx),
        Args::Search(cmd) => cmd.run(&ctx),
        Args::Check(cmd) => cmd.run(&ctx),
        Args::Stats(cmd) => cmd.run(&ctx),
        Args::Filter(cmd) => cmd.run(&ctx),
    };

    let result = cmd.with_duration_log("Command finished").await;

    // Some of the jokes may have been checked by the filter even if the
    // command failed, so the state is saved regardless of the result
    let saved = save_state(&store, &initial, ctx.state());

    command_outcome(result, saved)
}

/// The error of the command takes precedence over the error of saving the state
fn command_outcome(result: Result, saved: Result) -> Result {
    match (result, saved) {
        (Err(err), Err(save_err)) => {
            warn!(err = tracing_err(&save_err), "Failed to save the state");
            Err(err)
        }
        (result, saved) => result.and(saved),
    }
}

fn save_state(store: &StateStore, initial: &AppState, state: AppState) -> Result {
    if state == *initial {
        debug!("State is unchanged, skipping the save");
        return Ok(());
    }
    store.save(&state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fatal;
    use crate::filter::FilterSettings;
    use crate::ErrorKind;
    use assert_matches::assert_matches;

    /// The parent of the state file is a regular file, so saving always fails
    fn broken_store(dir: &tempfile::TempDir) -> StateStore {
        let blocker = dir.path().join("blocker");
        fs_err::write(&blocker, "").unwrap();
        StateStore::new(blocker.join("state.json"))
    }

    fn changed_state() -> AppState {
        let mut settings = FilterSettings::default();
        settings.toggle();
        AppState {
            settings,
            stats: None,
        }
    }

    #[test]
    fn command_error_wins_over_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = broken_store(&dir);

        let saved = save_state(&store, &AppState::default(), changed_state());
        assert_matches!(saved.as_ref().unwrap_err().kind(), ErrorKind::State { .. });

        let command_err = fatal!("command failed");
        let err = command_outcome(Err(command_err.clone()), saved).unwrap_err();

        assert_eq!(err.id(), command_err.id());
        assert_matches!(
            err.kind(),
            ErrorKind::Fatal { message, .. } if message == "command failed"
        );
    }

    #[test]
    fn save_error_is_returned_after_successful_command() {
        let dir = tempfile::tempdir().unwrap();
        let store = broken_store(&dir);

        let saved = save_state(&store, &AppState::default(), changed_state());
        let err = command_outcome(Ok(()), saved).unwrap_err();

        assert_matches!(err.kind(), ErrorKind::State { .. });
    }

    #[test]
    fn unchanged_state_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = broken_store(&dir);

        save_state(&store, &AppState::default(), AppState::default()).unwrap();
        command_outcome(Ok(()), Ok(())).unwrap();
    }
}
