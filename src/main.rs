//! sgpt-setup - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use sgpt_setup::cli::{Action, Cli};
use sgpt_setup::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path)?;

    match cli.action() {
        Action::Install { force } => commands::install::handle(config, force, cli.verbose),
        Action::Uninstall => commands::uninstall::handle(config, cli.verbose),
        Action::Status => commands::status::handle(config, cli.verbose),
    }
}
