use clap::Parser;

use linkgate::cli::{Cli, Command};
use linkgate::config::{get_config, init_config_from};
#[cfg(feature = "server")]
use linkgate::runtime::modes;
use linkgate::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref());
    let config = get_config();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&config.logging)?;

    match cli.command.unwrap_or(Command::Serve) {
        #[cfg(feature = "server")]
        Command::Serve => modes::run_server(config).await,
        #[cfg(feature = "cli")]
        command => modes::run_cli(command, &config).await,
        #[cfg(not(feature = "cli"))]
        command => anyhow::bail!("{:?} is not available in this build", command),
    }
}
