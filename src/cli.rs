//! CLI definitions for sgpt-setup
//!
//! The clap structure lives in the library so tests can inspect it without
//! running the binary.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Build clap styles for help output.
///
/// - Green: headers, usage, flag names
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Debug, Parser)]
#[command(name = "sgpt-setup")]
#[command(about = "Shell-GPT System Installer")]
#[command(
    long_about = "Shell-GPT System Installer - install sgpt system-wide with shell integration.

Installs or updates the sgpt Debian package from the latest GitHub release,
copies the OpenAI API key into a shell snippet, writes a bind script
(Ctrl+L runs the current line through sgpt) and adds a managed block to the
system profile and bashrc. Paths below are defaults; --config overrides them.

Must be run as root.

EXAMPLES:
    sudo sgpt-setup                     Install, or update if outdated
    sudo sgpt-setup --force-install     Always reinstall the latest version
    sudo sgpt-setup --uninstall         Remove sgpt and all configuration
    sgpt-setup --status                 Show what is installed

DEFAULTS:
    Config file   /etc/sgpt-setup/config.toml
    Log file      /var/log/install-sgpt-pkg.log
    Bind script   /etc/profile.d/sgpt_bind.sh
    Blocks in     /etc/profile, /etc/bash.bashrc"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Always install the latest version
    #[arg(long, conflicts_with_all = ["uninstall", "status"])]
    pub force_install: bool,

    /// Remove sgpt and all configurations
    #[arg(long, conflicts_with = "status")]
    pub uninstall: bool,

    /// Show installation status without changing anything
    #[arg(long)]
    pub status: bool,

    /// Read settings from this TOML file instead of /etc/sgpt-setup/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print debug logging to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

/// The operation selected by the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install { force: bool },
    Uninstall,
    Status,
}

impl Cli {
    pub fn action(&self) -> Action {
        if self.uninstall {
            Action::Uninstall
        } else if self.status {
            Action::Status
        } else {
            Action::Install {
                force: self.force_install,
            }
        }
    }
}
