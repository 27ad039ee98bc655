//! Client of the [icanhazdadjoke](https://icanhazdadjoke.com/api) compatible
//! joke API.
mod client;
mod error;

pub use client::*;
pub use error::*;

use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Retries of transient HTTP failures. Disabled by default, so that
    /// upstream errors are reported to the caller as is.
    #[serde(default)]
    pub max_transport_retries: u32,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_transport_retries: 0,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("https://icanhazdadjoke.com")
        .unwrap_or_else(|err| panic!("BUG: the default joke API URL is invalid: {err}"))
}

fn default_timeout_secs() -> u64 {
    10
}
