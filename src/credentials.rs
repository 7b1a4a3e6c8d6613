//! API key placement
//!
//! Copies the key from a root-only credential file into a shell snippet that
//! every login shell can source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Mode of the generated key snippet (readable by all users).
pub const API_KEY_FILE_MODE: u32 = 0o644;

/// Errors while reading or placing the API key.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key file not found or not readable: {} ({source})", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("API key file is empty: {}", path.display())]
    EmptyKey { path: PathBuf },

    #[error("API key contains characters that are not allowed in a shell export")]
    UnsafeKey,

    #[error("Failed to write API key file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the key from the first line of `source`.
pub fn read_api_key(source: &Path) -> Result<String, CredentialError> {
    let contents = fs::read_to_string(source).map_err(|e| CredentialError::SourceUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;

    let key = contents.lines().next().unwrap_or("").trim();
    if key.is_empty() {
        return Err(CredentialError::EmptyKey {
            path: source.to_path_buf(),
        });
    }
    if key.contains(['"', '$', '`', '\\']) {
        return Err(CredentialError::UnsafeKey);
    }
    Ok(key.to_string())
}

/// Render the snippet that exports the key.
pub fn render_key_export(key: &str) -> String {
    format!("export OPENAI_API_KEY=\"{}\"\n", key)
}

/// Copy the key from `source` into the export snippet at `target`.
pub fn install_api_key(source: &Path, target: &Path) -> Result<(), CredentialError> {
    let key = read_api_key(source)?;

    let write_err = |e| CredentialError::Write {
        path: target.to_path_buf(),
        source: e,
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(target, render_key_export(&key)).map_err(write_err)?;
    set_mode(target, API_KEY_FILE_MODE).map_err(write_err)?;

    debug!(path = %target.display(), "wrote API key file");
    Ok(())
}

#[cfg(unix)]
pub(crate) fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub(crate) fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
