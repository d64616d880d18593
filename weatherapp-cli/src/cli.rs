use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::info;
use weatherapp_core::{Config, WeatherPanel, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherapp", version, about = "Current weather and tomorrow's forecast")]
pub struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Show weather for a place.
    Show {
        /// Place name, e.g. "London" or "Paris, France".
        place: String,

        /// Print the raw result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for place names repeatedly, re-rendering after each fetch.
    Interactive {
        /// Initial value of the prompt.
        #[arg(long)]
        place: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { place, json } => show(&place, json).await,
            Command::Interactive { place } => interactive(place).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    info!(path = %path.display(), "Saved configuration");
    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn show(place: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let result = provider
        .fetch_weather(place)
        .await
        .with_context(|| format!("Failed to fetch weather for '{place}'"))?;

    if json {
        println!("{}", render::json(&result)?);
    } else {
        println!("{}", render::text(&result));
    }
    Ok(())
}

async fn interactive(initial: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut panel = WeatherPanel::new(Arc::from(provider_from_config(&config)?));
    panel.set_query(initial.unwrap_or_default());

    loop {
        let input = Text::new("Place:")
            .with_initial_value(panel.query())
            .with_help_message("Enter to fetch, Esc or Ctrl+C to quit")
            .prompt();

        let input = match input {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read place name"),
        };

        panel.set_query(input);

        match panel.fetch().await {
            Ok(result) => println!("{}\n", render::text(&result)),
            Err(e) => {
                eprintln!("error: {e}");
                if let Some(previous) = panel.current() {
                    println!("Still showing:\n{}\n", render::text(&previous));
                }
            }
        }
    }

    Ok(())
}
