//! Binary crate for the `weather-bot` Telegram bot.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - Routing Telegram updates to handlers
//! - Turning free text into greetings or weather lookups

use clap::Parser;

mod bot;
mod cli;
mod commands;
mod handlers;
mod intent;
mod stop;
#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
