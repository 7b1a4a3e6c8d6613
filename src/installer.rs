//! Install, uninstall and status orchestration
//!
//! Every mutating operation first checks privileges, then runs its steps in
//! order and stops at the first failure. Progress lines go to stdout and to
//! the run log.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::block::{self, BlockError};
use crate::config::Config;
use crate::credentials::{self, CredentialError};
use crate::package::{needs_install, PackageError, PackageManager};
use crate::runner::CommandRunner;
use crate::shell::{self, IntegrationStatus};

/// Errors that abort an install or uninstall run.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("This command must be run as root (with sudo)")]
    NotPrivileged,

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Failed to write bind script {}: {source}", path.display())]
    BindScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What an install run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub previous_version: Option<String>,
    pub version: String,
    /// Whether the package was downloaded and installed
    pub package_installed: bool,
    pub profile_changed: bool,
    pub bashrc_changed: bool,
}

/// What an uninstall run removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub bind_script_removed: bool,
    pub api_key_removed: bool,
    /// False when dpkg reported a failure (usually: not installed)
    pub package_removed: bool,
    pub profile_cleaned: bool,
    pub bashrc_cleaned: bool,
}

/// Drives a full setup or teardown of sgpt.
pub struct Installer<R: CommandRunner> {
    config: Config,
    runner: R,
    privileged: bool,
}

impl<R: CommandRunner> Installer<R> {
    /// Create an installer. `privileged` is the result of the privilege check.
    pub fn new(config: Config, runner: R, privileged: bool) -> Self {
        Self {
            config,
            runner,
            privileged,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Fail with [`InstallError::NotPrivileged`] unless running privileged.
    pub fn ensure_privileged(&self) -> Result<(), InstallError> {
        if self.privileged {
            Ok(())
        } else {
            Err(InstallError::NotPrivileged)
        }
    }

    fn packages(&self) -> PackageManager<'_, R> {
        PackageManager::new(&self.runner, &self.config.package)
    }

    /// Install or update the package and set up the shell integration.
    pub fn install(&self, force: bool) -> Result<InstallReport, InstallError> {
        self.ensure_privileged()?;
        let markers = self.config.block_markers()?;
        let paths = &self.config.paths;
        let packages = self.packages();

        let installed = packages.installed_version()?;
        let latest = packages.latest_release()?;
        say(&format!(
            "Installed version: {}",
            installed.as_deref().unwrap_or("none")
        ));
        say(&format!("Latest available version: {}", latest.version));

        let package_installed = needs_install(force, installed.as_deref(), &latest.version);
        if package_installed {
            say(&format!("Installing/updating {}...", self.config.package.name));
            packages.install(&latest, &paths.install_dir)?;
            say(&format!("{} installed/updated.", self.config.package.name));
        } else {
            say(&format!(
                "{} is already up to date. No installation needed.",
                self.config.package.name
            ));
        }

        say(&format!(
            "Reading API key from {} ...",
            paths.source_credential_file.display()
        ));
        credentials::install_api_key(&paths.source_credential_file, &paths.api_key_file)?;
        say(&format!("API key saved to {}", paths.api_key_file.display()));

        say(&format!(
            "Creating binding script {} ...",
            paths.bind_script.display()
        ));
        shell::install_bind_script(&paths.bind_script, &paths.api_key_file).map_err(|source| {
            InstallError::BindScript {
                path: paths.bind_script.clone(),
                source,
            }
        })?;

        say(&format!("Updating {} ...", paths.profile.display()));
        let profile_changed = block::patch_block_in_file(
            &paths.profile,
            &markers,
            &shell::profile_block(&paths.bashrc),
        )?;

        say(&format!("Updating {} ...", paths.bashrc.display()));
        let bashrc_changed = block::patch_block_in_file(
            &paths.bashrc,
            &markers,
            &shell::bashrc_block(&paths.bind_script),
        )?;

        say("Shell-GPT setup completed successfully.");

        Ok(InstallReport {
            previous_version: installed,
            version: latest.version,
            package_installed,
            profile_changed,
            bashrc_changed,
        })
    }

    /// Remove the package, generated files and managed blocks.
    pub fn uninstall(&self) -> Result<UninstallReport, InstallError> {
        self.ensure_privileged()?;
        let markers = self.config.block_markers()?;
        let paths = &self.config.paths;

        say(&format!(
            "Uninstalling {} and cleaning up configuration...",
            self.config.package.name
        ));

        let bind_script_removed = remove_if_exists(&paths.bind_script)?;
        let api_key_removed = remove_if_exists(&paths.api_key_file)?;
        let package_removed = self.packages().remove()?;
        let profile_cleaned = block::remove_block_in_file(&paths.profile, &markers)?.is_changed();
        let bashrc_cleaned = block::remove_block_in_file(&paths.bashrc, &markers)?.is_changed();

        say(&format!(
            "{} successfully uninstalled and cleaned up.",
            self.config.package.name
        ));

        Ok(UninstallReport {
            bind_script_removed,
            api_key_removed,
            package_removed,
            profile_cleaned,
            bashrc_cleaned,
        })
    }

    /// Inspect the current installation. Read-only; no privileges needed.
    pub fn status(&self) -> Result<IntegrationStatus, InstallError> {
        let markers = self.config.block_markers()?;
        let paths = &self.config.paths;

        let installed_version = self.packages().installed_version().unwrap_or_else(|e| {
            warn!(error = %e, "could not query installed version");
            None
        });

        Ok(IntegrationStatus {
            installed_version,
            bind_script: (paths.bind_script.clone(), paths.bind_script.exists()),
            api_key_file: (paths.api_key_file.clone(), paths.api_key_file.exists()),
            profile: (
                paths.profile.clone(),
                block::block_present_in_file(&paths.profile, &markers)?,
            ),
            bashrc: (
                paths.bashrc.clone(),
                block::block_present_in_file(&paths.bashrc, &markers)?,
            ),
        })
    }
}

/// Print a progress line and record it in the run log.
fn say(msg: &str) {
    println!("{}", msg);
    info!("{}", msg);
}

fn remove_if_exists(path: &Path) -> Result<bool, InstallError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(InstallError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
