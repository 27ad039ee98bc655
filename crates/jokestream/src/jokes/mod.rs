//! Jokes data model and the abstraction over the source of the jokes.
pub mod api;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: String,

    #[serde(rename = "joke")]
    pub text: String,

    /// Search results don't carry the status of the individual jokes
    #[serde(rename = "status", default = "default_status_code")]
    pub status_code: u16,
}

fn default_status_code() -> u16 {
    200
}

/// A single page of the search results. Mirrors the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeSearchPage {
    pub results: Vec<Joke>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_jokes: u32,
    pub next_page: u32,
    pub previous_page: u32,
    pub limit: u32,
    pub search_term: String,
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,

    /// 1-based number of the page
    pub page: u32,
    pub limit: u32,
}

impl SearchQuery {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Upstream that produces jokes one at a time or by search
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn random_joke(&self) -> Result<Joke>;

    async fn joke_by_id(&self, id: &str) -> Result<Joke>;

    async fn search(&self, query: &SearchQuery) -> Result<JokeSearchPage>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn joke_wire_format() {
        let joke: Joke = serde_json::from_str(
            r#"{"id":"R7UfaahVfFd","joke":"My dog used to chase people on a bike a lot. It got so bad I had to take his bike away.","status":200}"#,
        )
        .unwrap();

        expect![[r#"
            Joke {
                id: "R7UfaahVfFd",
                text: "My dog used to chase people on a bike a lot. It got so bad I had to take his bike away.",
                status_code: 200,
            }
        "#]]
        .assert_debug_eq(&joke);
    }

    #[test]
    fn search_page_wire_format() {
        let page: JokeSearchPage = serde_json::from_str(
            r#"{
                "current_page": 1,
                "limit": 20,
                "next_page": 2,
                "previous_page": 1,
                "results": [
                    {"id": "M7wPC5wPKBd", "joke": "Did you hear the one about the guy with the broken hearing aid? Neither did he."}
                ],
                "search_term": "hear",
                "status": 200,
                "total_jokes": 27,
                "total_pages": 2
            }"#,
        )
        .unwrap();

        expect![[r#"
            JokeSearchPage {
                results: [
                    Joke {
                        id: "M7wPC5wPKBd",
                        text: "Did you hear the one about the guy with the broken hearing aid? Neither did he.",
                        status_code: 200,
                    },
                ],
                current_page: 1,
                total_pages: 2,
                total_jokes: 27,
                next_page: 2,
                previous_page: 1,
                limit: 20,
                search_term: "hear",
                status: 200,
            }
        "#]]
        .assert_debug_eq(&page);
    }
}
