use clap::Parser;
use futures::prelude::*;
use jokestream::tracing_err;
use std::panic::AssertUnwindSafe;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args = jokestream::cli::Args::parse();

    if dotenvy::dotenv().is_err() {
        eprintln!("Dotenv config was not found, ignoring this...")
    }

    jokestream::init_logging();
    jokestream::describe_metrics();

    AssertUnwindSafe(async {
        let config = jokestream::Config::load_or_panic();
        let result = jokestream::run(config, args).await;

        result.map(|()| ExitCode::SUCCESS).unwrap_or_else(|err| {
            error!(err = tracing_err(&err), "Exiting with an error...");
            eprintln!("{}", display_error_chain::DisplayErrorChain::new(&err));
            ExitCode::FAILURE
        })
    })
    .catch_unwind()
    .unwrap_or_else(|_| {
        error!("Exiting due to a panic...");
        ExitCode::FAILURE
    })
    .await
}
