//! Configuration management for sgpt-setup

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::block::{BlockError, Markers};

impl Config {
    /// Get the default config file path (/etc/sgpt-setup/config.toml)
    pub fn default_path() -> PathBuf {
        io::default_config_path()
    }

    /// Load configuration from `path`, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Validated marker pair for the profile and bashrc blocks
    pub fn block_markers(&self) -> Result<Markers, BlockError> {
        Markers::new(self.markers.start.as_str(), self.markers.end.as_str())
    }
}
