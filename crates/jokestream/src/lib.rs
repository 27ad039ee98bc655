mod config;
mod error;
mod http;
mod observability;
mod util;

pub mod cli;
pub mod favorites;
pub mod fetch;
pub mod filter;
pub mod jokes;
pub mod state;

pub use crate::error::*;
pub use config::*;
pub use favorites::{Collection, Favorites};
pub use fetch::{JokeService, JokeServiceOptions, RandomJokeOptions};
pub use filter::{FilterSettings, FilterStats, FilterStatsDelta, FilterStatsTracker, FilterStrength};
pub use observability::{describe_metrics, init_logging, tracing_err};

mod prelude {
    pub(crate) use crate::error::prelude::*;
    pub(crate) use crate::observability::logging::prelude::*;
}

/// Run a single command of the CLI
pub async fn run(config: Config, args: cli::Args) -> Result {
    cli::run(config, args).await
}
