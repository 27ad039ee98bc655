use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub api: crate::jokes::api::Config,
    pub fetch: FetchConfig,
    pub state: StateConfig,
}

impl Config {
    pub fn load_or_panic() -> Config {
        Self {
            api: from_env_or_panic("JOKESTREAM_API_"),
            fetch: from_env_or_panic("JOKESTREAM_FETCH_"),
            state: from_env_or_panic("JOKESTREAM_STATE_"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Max number of jokes rejected by the content filter in a row before
    /// giving up and returning the fallback joke
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Deadline for a single attempt to fetch a joke from the upstream.
    /// Zero disables the deadline.
    #[serde(default = "default_attempt_timeout_secs")]
    attempt_timeout_secs: u64,

    /// Number of jokes fetched concurrently by the `random --count` command
    /// when the count isn't specified explicitly
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl FetchConfig {
    pub fn attempt_timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.attempt_timeout_secs)).filter(|timeout| !timeout.is_zero())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_max_retries() -> u32 {
    10
}

fn default_attempt_timeout_secs() -> u64 {
    15
}

fn default_batch_size() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

fn default_state_path() -> PathBuf {
    [".jokestream", "state.json"].iter().collect()
}

pub(crate) fn from_env_or_panic<T: DeserializeOwned>(prefix: &str) -> T {
    envy::prefixed(prefix).from_env().unwrap_or_else(|err| {
        panic!(
            "BUG: Couldn't load config from environment for {}: {:#?}",
            std::any::type_name::<T>(),
            err
        );
    })
}
