mod cli;
mod config;
mod host;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use desky_trigger::{parse_duration, TriggerLoader};

use crate::cli::{CliArgs, Command};
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    // Load config
    let config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .init();

    match &args.command {
        Command::Duration { text } => {
            let duration = parse_duration(text)
                .with_context(|| format!("invalid duration: '{}'", text))?;
            println!("{}", duration.as_millis());
        }
        Command::Next { triggers, count } => {
            let loader = build_loader(&config, &args)?;
            let path = config.resolve_triggers(triggers.as_deref())?;
            let trigger = loader
                .load_file(&path)
                .with_context(|| format!("failed to load triggers: {}", path.display()))?;

            for at in host::upcoming(&trigger, host::now(), *count)? {
                println!("{}", at);
            }
        }
        Command::Run { triggers, limit } => {
            let loader = build_loader(&config, &args)?;
            let path = config.resolve_triggers(triggers.as_deref())?;
            let trigger = loader
                .load_file(&path)
                .with_context(|| format!("failed to load triggers: {}", path.display()))?;

            info!(path = %path.display(), zone = %loader.zone(), "starting trigger loop");
            let fired = host::run(&trigger, *limit).await?;
            info!(fired, "trigger loop stopped");
        }
    }

    Ok(())
}

fn build_loader(config: &CliConfig, args: &CliArgs) -> Result<TriggerLoader> {
    let zone = config
        .resolve_zone(args.utc_offset.as_deref(), args.timezone.as_deref())
        .context("invalid time zone")?;
    Ok(TriggerLoader::with_zone(zone))
}
