use crate::prelude::*;
use crate::Result;
use async_trait::async_trait;
use reqwest::header;
use reqwest_middleware::RequestBuilder;
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use std::time::{Duration, Instant};

pub type Client = reqwest_middleware::ClientWithMiddleware;

pub(crate) const USER_AGENT: &str = concat!(
    "JokeStream/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/jokestream/jokestream)",
);

#[derive(Debug, Clone)]
pub(crate) struct ClientOptions {
    pub(crate) timeout: Duration,

    /// Number of retries of transient failures (network errors, 5xx and 429).
    pub(crate) max_retries: u32,
}

fn retry_policy(max_retries: u32) -> ExponentialBackoff {
    // Retry exponentially increasing intervals between attempts.
    ExponentialBackoff::builder()
        .retry_bounds(Duration::from_millis(100), Duration::from_secs(2))
        .build_with_max_retries(max_retries)
}

pub(crate) fn create_client(opts: ClientOptions) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    let client = reqwest::Client::builder()
        .timeout(opts.timeout)
        .default_headers(headers)
        .build()
        .fatal_ctx(|| "Failed to create an HTTP client")?;

    let client = reqwest_middleware::ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy(
            opts.max_retries,
        )))
        .with(ObservingMiddleware)
        .with_init(|request_builder: RequestBuilder| {
            request_builder.header(header::USER_AGENT, USER_AGENT)
        })
        .build();

    Ok(client)
}

/// Logs every real HTTP request. It's installed under the retry middleware,
/// so every retry is logged separately.
struct ObservingMiddleware;

#[async_trait]
impl reqwest_middleware::Middleware for ObservingMiddleware {
    async fn handle(
        &self,
        request: reqwest::Request,
        extensions: &mut http::Extensions,
        next: reqwest_middleware::Next<'_>,
    ) -> reqwest_middleware::Result<reqwest::Response> {
        let span = debug_span!(
            "request",
            method = %request.method(),
            url = %request.url(),
        );

        async {
            let start = Instant::now();
            let result = next.run(request, extensions).await;
            let duration = tracing_duration(start.elapsed());

            let response = match &result {
                Ok(response) => response,
                Err(err) => {
                    warn!(duration, err = tracing_err(err), "Network request failed");
                    return result;
                }
            };

            let status = response.status();

            if status.is_client_error() || status.is_server_error() {
                warn!(duration, %status, "Network request failed (error status)");
            } else {
                debug!(duration, %status, "Network request succeeded");
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test(tokio::test)]
    #[ignore]
    async fn manual_sandbox() {
        let http = create_client(ClientOptions {
            timeout: Duration::from_secs(10),
            max_retries: 0,
        })
        .unwrap();

        let response = http.get("https://icanhazdadjoke.com/").send().await.unwrap();

        eprintln!("{}", response.text().await.unwrap());
    }
}
