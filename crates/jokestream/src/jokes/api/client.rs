use super::{Config, JokeApiError};
use crate::http;
use crate::jokes::{Joke, JokeSearchPage, JokeSource, SearchQuery};
use crate::prelude::*;
use crate::{err, fatal, Result};
use async_trait::async_trait;
use reqwest_middleware::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

pub struct Client {
    http: http::Client,
    base_url: Url,
}

impl Client {
    pub fn new(cfg: Config) -> Result<Self> {
        let http = http::create_client(http::ClientOptions {
            timeout: cfg.timeout(),
            max_retries: cfg.max_transport_retries,
        })?;

        Ok(Self {
            http,
            base_url: cfg.base_url,
        })
    }

    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| fatal!("Joke API URL can't be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T> {
        let response = request.send().await.map_err(JokeApiError::from_transport)?;

        let status = response.status();

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => format!("Could not collect the error response body text: {err}"),
            };

            return Err(JokeApiError::from_status(status, &headers, body, resource).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| JokeApiError::from_transport(err.into()))?;

        serde_json::from_slice(&bytes).map_err(|source| {
            match std::str::from_utf8(&bytes) {
                Ok(response_body) => warn!(response_body, "Bad JSON response"),
                Err(utf8_decode_err) => warn!(
                    response_body = ?bytes,
                    ?utf8_decode_err,
                    "Bad JSON response"
                ),
            };
            err!(JokeApiError::UnexpectedResponseJsonShape { source })
        })
    }
}

#[async_trait]
impl JokeSource for Client {
    /// API docs: <https://icanhazdadjoke.com/api#fetch-a-random-dad-joke>
    async fn random_joke(&self) -> Result<Joke> {
        let request = self.http.get(self.url([])?);
        self.read_json(request, "Random joke").await
    }

    /// API docs: <https://icanhazdadjoke.com/api#fetch-a-dad-joke>
    async fn joke_by_id(&self, id: &str) -> Result<Joke> {
        let request = self.http.get(self.url(["j", id])?);
        self.read_json(request, &format!("Joke `{id}`")).await
    }

    /// API docs: <https://icanhazdadjoke.com/api#search-for-dad-jokes>
    async fn search(&self, query: &SearchQuery) -> Result<JokeSearchPage> {
        let request = self.http.get(self.url(["search"])?).query(&[
            ("term", query.term.as_str()),
            ("page", query.page.to_string().as_str()),
            ("limit", query.limit.to_string().as_str()),
        ]);

        self.read_json(request, &format!("Search results for `{}`", query.term))
            .await
    }
}
