use super::{Cmd, Context};
use crate::fetch::RandomJokeOptions;
use crate::jokes::{self, SearchQuery};
use crate::Result;
use async_trait::async_trait;
use clap::Parser;

/// Fetch random jokes that pass the content filter
#[derive(Parser, Debug)]
pub struct Random {
    /// Fetch several jokes concurrently. Without a value the configured
    /// batch size is used
    #[arg(long, short)]
    count: Option<Option<usize>>,

    /// Don't check the jokes with the content filter
    #[arg(long)]
    no_filter: bool,

    /// Max number of jokes rejected by the filter before the fallback
    /// joke is returned
    #[arg(long)]
    max_retries: Option<u32>,
}

#[async_trait]
impl Cmd for Random {
    async fn run(self, ctx: &Context) -> Result {
        let settings = ctx.service.settings().lock().clone();
        let max_retries = self.max_retries.unwrap_or(ctx.config.fetch.max_retries);

        let mut opts = RandomJokeOptions::from_settings(&settings, max_retries);
        opts.filter_enabled &= !self.no_filter;

        let Some(count) = self.count else {
            let joke = ctx.service.random_joke(opts).await?;
            print_joke(&joke);
            return Ok(());
        };

        let count = count.unwrap_or(ctx.config.fetch.batch_size);

        let jokes = ctx.service.random_jokes(count, opts).await;

        for joke in &jokes {
            print_joke(joke);
        }

        if jokes.len() < count {
            eprintln!("Fetched {} out of {count} jokes, see the logs for details", jokes.len());
        }

        Ok(())
    }
}

/// Show the joke with the given ID
#[derive(Parser, Debug)]
pub struct Joke {
    id: String,
}

#[async_trait]
impl Cmd for Joke {
    async fn run(self, ctx: &Context) -> Result {
        let joke = ctx.service.joke_by_id(&self.id).await?;
        print_joke(&joke);
        Ok(())
    }
}

/// Search the jokes by a term
#[derive(Parser, Debug)]
pub struct Search {
    term: String,

    #[arg(long, default_value_t = SearchQuery::DEFAULT_PAGE)]
    page: u32,

    #[arg(long, default_value_t = SearchQuery::DEFAULT_LIMIT)]
    limit: u32,

    /// Don't check the jokes with the content filter
    #[arg(long)]
    no_filter: bool,
}

#[async_trait]
impl Cmd for Search {
    async fn run(self, ctx: &Context) -> Result {
        let filter_enabled = ctx.service.settings().lock().enabled && !self.no_filter;

        let query = SearchQuery {
            term: self.term,
            page: self.page,
            limit: self.limit,
        };

        let page = ctx.service.search_jokes(&query, filter_enabled).await?;

        for joke in &page.results {
            print_joke(joke);
        }

        println!(
            "Page {} of {} ({} jokes in total)",
            page.current_page, page.total_pages, page.total_jokes
        );

        Ok(())
    }
}

fn print_joke(joke: &jokes::Joke) {
    println!("{}\n    (id: {})\n", joke.text, joke.id);
}
