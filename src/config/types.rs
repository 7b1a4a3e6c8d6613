//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
}

/// Which package to install and where its releases live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Debian package name
    #[serde(default = "default_package_name")]
    pub name: String,
    /// GitHub `owner/repo` publishing the releases
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Architecture substring of the `.deb` asset to download
    #[serde(default = "default_arch")]
    pub arch: String,
}

pub fn default_package_name() -> String {
    "sgpt".to_string()
}

pub fn default_repository() -> String {
    "tbckr/sgpt".to_string()
}

pub fn default_arch() -> String {
    "amd64".to_string()
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: default_package_name(),
            repository: default_repository(),
            arch: default_arch(),
        }
    }
}

impl PackageConfig {
    /// URL of the latest-release endpoint of the GitHub API
    pub fn latest_release_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/releases/latest",
            self.repository
        )
    }
}

/// Files written, patched or read during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Scratch directory for the downloaded package
    #[serde(default = "default_install_dir")]
    pub install_dir: PathBuf,
    /// Generated script that loads the key and binds Ctrl+L
    #[serde(default = "default_bind_script")]
    pub bind_script: PathBuf,
    /// World-readable snippet exporting OPENAI_API_KEY
    #[serde(default = "default_api_key_file")]
    pub api_key_file: PathBuf,
    /// Root-only file holding the raw key on its first line
    #[serde(default = "default_source_credential_file")]
    pub source_credential_file: PathBuf,
    #[serde(default = "default_profile")]
    pub profile: PathBuf,
    #[serde(default = "default_bashrc")]
    pub bashrc: PathBuf,
}

pub fn default_log_file() -> PathBuf {
    PathBuf::from("/var/log/install-sgpt-pkg.log")
}

pub fn default_install_dir() -> PathBuf {
    PathBuf::from("/tmp/sgpt_install")
}

pub fn default_bind_script() -> PathBuf {
    PathBuf::from("/etc/profile.d/sgpt_bind.sh")
}

pub fn default_api_key_file() -> PathBuf {
    PathBuf::from("/etc/sgpt/openai_key.sh")
}

pub fn default_source_credential_file() -> PathBuf {
    PathBuf::from("/etc/credentials/sgpt/openai_key")
}

pub fn default_profile() -> PathBuf {
    PathBuf::from("/etc/profile")
}

pub fn default_bashrc() -> PathBuf {
    PathBuf::from("/etc/bash.bashrc")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            install_dir: default_install_dir(),
            bind_script: default_bind_script(),
            api_key_file: default_api_key_file(),
            source_credential_file: default_source_credential_file(),
            profile: default_profile(),
            bashrc: default_bashrc(),
        }
    }
}

/// Marker lines delimiting the managed block in profile and bashrc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkersConfig {
    #[serde(default = "default_marker_start")]
    pub start: String,
    #[serde(default = "default_marker_end")]
    pub end: String,
}

pub fn default_marker_start() -> String {
    "# *** sgpt settings begin ***".to_string()
}

pub fn default_marker_end() -> String {
    "# *** sgpt settings end ***".to_string()
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            start: default_marker_start(),
            end: default_marker_end(),
        }
    }
}
