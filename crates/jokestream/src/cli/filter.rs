use super::{Cmd, Context};
use crate::filter::FilterStrength;
use crate::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use itertools::Itertools;

/// Check the text with the content filter
#[derive(Parser, Debug)]
pub struct Check {
    text: String,
}

#[async_trait]
impl Cmd for Check {
    async fn run(self, ctx: &Context) -> Result {
        let result = ctx.service.filter().analyze(&self.text);

        println!("clean: {}", result.is_clean);

        if !result.matched_categories.is_empty() {
            println!("matched: {}", result.matched_categories.iter().join(", "));
        }

        if let Some(censored) = &result.censored_text {
            println!("censored: {censored}");
        }

        Ok(())
    }
}

/// Show the statistics of the content filter
#[derive(Parser, Debug)]
pub struct Stats {
    /// Clear the statistics
    #[arg(long)]
    reset: bool,
}

#[async_trait]
impl Cmd for Stats {
    async fn run(self, ctx: &Context) -> Result {
        if self.reset {
            ctx.service.stats().reset();
            println!("Filter stats were reset");
            return Ok(());
        }

        let Some(stats) = ctx.service.stats().get() else {
            println!("No jokes were checked yet");
            return Ok(());
        };

        println!("checked: {}", stats.total_checked);
        println!("blocked: {}", stats.total_blocked);
        println!("last checked: {}", stats.last_checked.to_rfc3339());

        if !stats.blocked_by_category.is_empty() {
            println!("blocked by category:");
            for (category, count) in &stats.blocked_by_category {
                println!("    {category}: {count}");
            }
        }

        Ok(())
    }
}

/// Manage the content filter settings
#[derive(Parser, Debug)]
pub struct Filter {
    #[command(subcommand)]
    cmd: FilterCmd,
}

#[derive(Subcommand, Debug)]
enum FilterCmd {
    /// Enable or disable the filter
    Toggle,

    /// Set the strength of the filter
    Strength { strength: FilterStrength },

    /// Add a word to the custom blocklist
    Block { word: String },

    /// Remove a word from the custom blocklist
    Unblock { word: String },

    /// Show the current settings
    Show,
}

#[async_trait]
impl Cmd for Filter {
    async fn run(self, ctx: &Context) -> Result {
        let mut settings = ctx.service.settings().lock();

        match self.cmd {
            FilterCmd::Toggle => {
                let state = if settings.toggle() { "enabled" } else { "disabled" };
                println!("Filter is {state}");
            }
            FilterCmd::Strength { strength } => {
                settings.set_strength(strength);
                println!("Filter strength is {strength}");
            }
            FilterCmd::Block { word } => {
                if !settings.add_to_blocklist(&word) {
                    println!("`{word}` is already in the blocklist");
                }
            }
            FilterCmd::Unblock { word } => {
                if !settings.remove_from_blocklist(&word) {
                    println!("`{word}` is not in the blocklist");
                }
            }
            FilterCmd::Show => {
                println!("enabled: {}", settings.enabled);
                println!("strength: {}", settings.strength);
                println!("blocklist: {}", settings.custom_blocklist.iter().join(", "));
            }
        }

        Ok(())
    }
}
