use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use notifier_core::{Config, Notifier, ProviderId, logging, secrets};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-notifier", version, about = "Daily weather broadcast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch today's weather and broadcast it. Intended for the scheduler.
    Run,

    /// Print today's message without broadcasting it.
    Preview,

    /// Store a secret in the config file.
    Configure {
        /// "weatherapi", "openweather" or "line".
        target: String,
    },

    /// Select the primary weather provider.
    Use {
        /// Provider short name, e.g. "weatherapi" or "openweather".
        provider: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Run => {
                logging::init()?;
                let config = Config::load()?;
                Notifier::from_config(&config)?.run().await?;
            }
            Command::Preview => {
                logging::init()?;
                let config = Config::load()?;
                let message = Notifier::from_config(&config)?.preview().await?;
                println!("{message}");
            }
            Command::Configure { target } => configure(&target)?,
            Command::Use { provider } => {
                let id = ProviderId::try_from(provider.as_str())?;
                let mut config = Config::load()?;
                config.set_primary_provider(id);
                config.save()?;
                println!("Primary provider set to {id}");

                if !config.is_provider_configured(id) {
                    eprintln!(
                        "Warning: no API key for {id} in the config file. Run `weather-notifier configure {id}` or set {}.",
                        secrets::env_var_name(id.secret_name())
                    );
                }
            }
        }

        Ok(())
    }
}

fn configure(target: &str) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if target.eq_ignore_ascii_case("line") {
        let token = prompt_secret("LINE channel access token:")?;
        config.set_secret(secrets::LINE_CHANNEL_ACCESS_TOKEN, token);
    } else {
        let id = ProviderId::try_from(target)?;
        let key = prompt_secret(&format!("API key for {id}:"))?;
        config.upsert_provider_api_key(id, key);
    }

    config.save()?;
    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn prompt_secret(message: &str) -> anyhow::Result<String> {
    Password::new(message)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read secret")
}
