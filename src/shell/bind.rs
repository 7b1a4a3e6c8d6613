//! Bind script generation
//!
//! The script loads the API key snippet and binds Ctrl+L so the current
//! readline buffer is replaced by the command `sgpt sh` suggests.

use std::fs;
use std::io;
use std::path::Path;

use crate::credentials::set_mode;

/// The embedded bind script, with `{{API_KEY_FILE}}` placeholders
pub const BIND_SCRIPT_TEMPLATE: &str = include_str!("../../shell/sgpt_bind.sh");

/// Mode of the installed bind script
pub const BIND_SCRIPT_MODE: u32 = 0o755;

const API_KEY_PLACEHOLDER: &str = "{{API_KEY_FILE}}";

/// Fill in the API key file path.
pub fn render_bind_script(api_key_file: &Path) -> String {
    BIND_SCRIPT_TEMPLATE.replace(API_KEY_PLACEHOLDER, &api_key_file.display().to_string())
}

/// Write the rendered bind script to `script_path`.
pub fn install_bind_script(script_path: &Path, api_key_file: &Path) -> io::Result<()> {
    if let Some(parent) = script_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(script_path, render_bind_script(api_key_file))?;
    set_mode(script_path, BIND_SCRIPT_MODE)
}
