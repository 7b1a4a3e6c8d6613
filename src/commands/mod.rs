//! Command handlers for the sgpt-setup CLI.
//!
//! Each submodule handles one action. Flag dispatch remains in main.rs.

pub mod install;
pub mod status;
pub mod uninstall;

use anyhow::Result;

use sgpt_setup::{logging, privilege, Config, Installer, SystemRunner};

/// Build an installer for a mutating run.
///
/// Checks privileges before anything is written, including the log file.
pub(crate) fn privileged_installer(
    config: Config,
    verbose: bool,
) -> Result<Installer<SystemRunner>> {
    let installer = Installer::new(config, SystemRunner, privilege::is_root());
    if installer.ensure_privileged().is_err() {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "sgpt-setup".to_string());
        anyhow::bail!(
            "This command must be run as root (with sudo).\nPlease run it again using: sudo {}",
            program
        );
    }

    let log_file = &installer.config().paths.log_file;
    if let Err(e) = logging::init(Some(log_file), verbose) {
        eprintln!(
            "Warning: cannot write log file {}: {}",
            log_file.display(),
            e
        );
    } else {
        println!("Logging to {}", log_file.display());
    }

    Ok(installer)
}
