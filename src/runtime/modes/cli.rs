//! CLI mode
//!
//! One-shot link commands against the configured store.

use anyhow::{Result, bail};
use colored::Colorize;

use crate::cli::{Command, ConfigAction};
use crate::config::StaticConfig;
use crate::errors::{self, LinkgateError};
use crate::runtime::lifetime;
use crate::services::LinkService;

/// Run a non-server command
pub async fn run_cli(command: Command, config: &StaticConfig) -> Result<()> {
    match command {
        Command::Serve => bail!("serve is handled by server mode"),
        Command::Add { url, token } => {
            let startup = lifetime::startup::prepare_startup(config).await?;
            report(add_link(&startup.link_service, &url, token.as_deref()).await)
        }
        Command::Get { token } => {
            let startup = lifetime::startup::prepare_startup(config).await?;
            report(get_link(&startup.link_service, &token).await)
        }
        Command::Config { action } => match action {
            ConfigAction::Generate { output } => {
                match output {
                    Some(path) => {
                        StaticConfig::default()
                            .save_to_file(&path)
                            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
                        println!("{} {}", "Sample config written to".green(), path);
                    }
                    None => print!("{}", StaticConfig::generate_sample_config()),
                }
                Ok(())
            }
        },
    }
}

async fn add_link(service: &LinkService, url: &str, token: Option<&str>) -> errors::Result<()> {
    let created = service.create_link(url, token).await?;
    let kind = if created.generated_token {
        "generated"
    } else {
        "custom"
    };
    println!(
        "{} {} ({}) -> {}",
        "Created".green().bold(),
        created.link.token.cyan(),
        kind,
        created.link.destination_url
    );
    Ok(())
}

async fn get_link(service: &LinkService, token: &str) -> errors::Result<()> {
    match service.resolve_link(token).await? {
        Some(destination) => {
            println!("{} -> {}", token.cyan(), destination);
            Ok(())
        }
        None => Err(LinkgateError::not_found(format!("token {}", token))),
    }
}

fn report(result: errors::Result<()>) -> Result<()> {
    result.map_err(|e| {
        eprintln!("{}", e.format_colored());
        anyhow::anyhow!(e.format_simple())
    })
}
