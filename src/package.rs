//! Package discovery and installation through dpkg
//!
//! Versions come from `dpkg-query` (installed) and the GitHub releases API
//! (latest). Downloads use `curl`. All of it runs through a [`CommandRunner`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::PackageConfig;
use crate::runner::{CommandRunner, RunnerError};

/// Errors from package discovery, download or installation.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Command(#[from] RunnerError),

    #[error("Failed to parse release information from {url}: {source}")]
    ReleaseParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No .deb asset for architecture '{arch}' in release {version}")]
    NoAsset { version: String, arch: String },

    #[error("Failed to prepare install directory {}: {source}", path.display())]
    InstallDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The latest published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Version with any leading `v` stripped
    pub version: String,
    pub download_url: String,
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<GithubAsset>,
}

#[derive(Debug, Deserialize)]
struct GithubAsset {
    browser_download_url: String,
}

/// Parse a GitHub "latest release" response and pick the `.deb` for `arch`.
pub fn parse_release(json: &str, url: &str, arch: &str) -> Result<Release, PackageError> {
    let release: GithubRelease =
        serde_json::from_str(json).map_err(|source| PackageError::ReleaseParse {
            url: url.to_string(),
            source,
        })?;

    let version = release
        .tag_name
        .strip_prefix('v')
        .unwrap_or(&release.tag_name)
        .to_string();

    let download_url = release
        .assets
        .into_iter()
        .map(|a| a.browser_download_url)
        .find(|u| u.ends_with(".deb") && u.contains(arch))
        .ok_or_else(|| PackageError::NoAsset {
            version: version.clone(),
            arch: arch.to_string(),
        })?;

    Ok(Release {
        version,
        download_url,
    })
}

/// Whether a (re)install is due.
pub fn needs_install(force: bool, installed: Option<&str>, latest: &str) -> bool {
    force || installed != Some(latest)
}

/// dpkg-backed package operations.
pub struct PackageManager<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a PackageConfig,
}

impl<'a, R: CommandRunner> PackageManager<'a, R> {
    pub fn new(runner: &'a R, config: &'a PackageConfig) -> Self {
        Self { runner, config }
    }

    /// Installed version, or `None` when the package is not installed.
    pub fn installed_version(&self) -> Result<Option<String>, PackageError> {
        let out = self
            .runner
            .run("dpkg-query", &["-W", "-f=${Version}", &self.config.name])?;
        if !out.success {
            debug!(package = %self.config.name, "dpkg-query reports package not installed");
            return Ok(None);
        }
        let version = out.stdout_trimmed();
        Ok((!version.is_empty()).then(|| version.to_string()))
    }

    /// Query the latest release.
    pub fn latest_release(&self) -> Result<Release, PackageError> {
        let url = self.config.latest_release_url();
        let out = self.runner.run("curl", &["-fsSL", &url])?.into_checked()?;
        parse_release(&out.stdout, &url, &self.config.arch)
    }

    /// Download the release below `install_dir` and install it with `dpkg -i`.
    ///
    /// The download goes into a `<name>` subdirectory owned by this tool, which
    /// is removed afterwards, also when a step failed. `install_dir` itself is
    /// only removed when that leaves it empty.
    pub fn install(&self, release: &Release, install_dir: &Path) -> Result<(), PackageError> {
        let work_dir = self.download_dir(install_dir);
        fs::create_dir_all(&work_dir).map_err(|source| PackageError::InstallDir {
            path: work_dir.clone(),
            source,
        })?;

        let result = self.download_and_install(release, &work_dir);

        if let Err(e) = fs::remove_dir_all(&work_dir) {
            warn!(path = %work_dir.display(), error = %e, "failed to remove download directory");
        }
        if let Err(e) = fs::remove_dir(install_dir) {
            debug!(path = %install_dir.display(), error = %e, "install directory kept");
        }
        result
    }

    /// Directory the package is downloaded into.
    pub fn download_dir(&self, install_dir: &Path) -> PathBuf {
        install_dir.join(&self.config.name)
    }

    fn download_and_install(&self, release: &Release, work_dir: &Path) -> Result<(), PackageError> {
        let deb = work_dir.join(format!("{}-latest.deb", self.config.name));
        let deb = deb.to_string_lossy();

        self.runner
            .run("curl", &["-fL", &release.download_url, "-o", &deb])?
            .into_checked()?;
        self.runner.run("dpkg", &["-i", &deb])?.into_checked()?;
        Ok(())
    }

    /// Remove the package with `dpkg -r`.
    ///
    /// Returns `false` when dpkg failed (e.g. not installed); that is not an error.
    pub fn remove(&self) -> Result<bool, PackageError> {
        let out = self.runner.run("dpkg", &["-r", &self.config.name])?;
        if !out.success {
            warn!(
                package = %self.config.name,
                stderr = %out.stderr.trim(),
                "dpkg -r failed, continuing"
            );
        }
        Ok(out.success)
    }
}
