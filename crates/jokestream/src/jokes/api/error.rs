use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;

/// Errors of the joke API. Upstream failures are reported as is, they are
/// not retried by the callers.
#[derive(Debug, thiserror::Error)]
pub enum JokeApiError {
    #[error("Network error. Please check your connection")]
    Network { source: reqwest_middleware::Error },

    #[error("Request to the joke API has timed out")]
    Timeout { source: reqwest_middleware::Error },

    #[error("Rate limit exceeded. Please try again {}", display_retry_after(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("Joke API server error (HTTP status code: {status}). Please try again later")]
    Server { status: StatusCode },

    #[error("Joke API rejected the request: {message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Joke API request has failed (HTTP status code: {status}):\n{body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Received an unexpected response JSON object")]
    UnexpectedResponseJsonShape { source: serde_json::Error },
}

fn display_retry_after(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(duration) => format!("in {duration:?}"),
        None => "later".to_owned(),
    }
}

impl JokeApiError {
    pub(crate) fn from_transport(source: reqwest_middleware::Error) -> Self {
        let is_timeout = match &source {
            reqwest_middleware::Error::Reqwest(err) => err.is_timeout(),
            reqwest_middleware::Error::Middleware(_) => false,
        };

        if is_timeout {
            Self::Timeout { source }
        } else {
            Self::Network { source }
        }
    }

    /// Classifies the non-successful response. The `resource` describes
    /// what was requested, it's used in the [`JokeApiError::NotFound`] error.
    pub(crate) fn from_status(
        status: StatusCode,
        headers: &HeaderMap,
        body: String,
        resource: &str,
    ) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound {
                resource: resource.to_owned(),
            },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited {
                retry_after: retry_after(headers),
            },
            StatusCode::BAD_REQUEST => {
                let message = body.trim();
                let message = if message.is_empty() {
                    "bad request"
                } else {
                    message
                };
                Self::Validation {
                    message: message.to_owned(),
                }
            }
            _ if status.is_server_error() => Self::Server { status },
            _ => Self::UnexpectedStatus { status, body },
        }
    }
}

/// Only the delay in seconds is supported, the HTTP date form is ignored
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    let secs = value.trim().parse().ok()?;
    Some(Duration::from_secs(secs))
}
