use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};
use weather_core::Config;

use crate::bot;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-bot", version, about = "Telegram weather bot")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start polling Telegram (default).
    Run,

    /// Store the Telegram and OpenWeather tokens in the config file.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_logging(self.verbose);

        match self.command.unwrap_or(Command::Run) {
            Command::Run => {
                let settings = Config::from_environment()?.resolve()?;
                bot::run(settings).await?;
            }
            Command::Configure => configure()?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
        }

        Ok(())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    cfg.telegram_token = Some(prompt_token("Telegram bot token:")?);
    cfg.weather_token = Some(prompt_token("OpenWeather API key:")?);
    cfg.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn prompt_token(message: &str) -> anyhow::Result<String> {
    let token = Password::new(message)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read token")?;

    Ok(token.trim().to_string())
}
