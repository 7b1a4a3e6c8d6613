//! Status reporting for an sgpt installation

use std::path::PathBuf;

/// What is currently installed on the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationStatus {
    /// Installed package version, if any
    pub installed_version: Option<String>,
    /// Bind script path and whether it exists
    pub bind_script: (PathBuf, bool),
    /// API key file path and whether it exists
    pub api_key_file: (PathBuf, bool),
    /// Profile path and whether it holds the managed block
    pub profile: (PathBuf, bool),
    /// Bashrc path and whether it holds the managed block
    pub bashrc: (PathBuf, bool),
}

impl IntegrationStatus {
    /// Whether every piece of the integration is in place
    pub fn is_complete(&self) -> bool {
        self.installed_version.is_some()
            && self.bind_script.1
            && self.api_key_file.1
            && self.profile.1
            && self.bashrc.1
    }

    /// Returns a human-readable summary of the status
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Package: {}",
            self.installed_version.as_deref().unwrap_or("not installed")
        )];

        for (label, (path, present), yes, no) in [
            ("Bind script", &self.bind_script, "present", "missing"),
            ("API key file", &self.api_key_file, "present", "missing"),
            ("Profile block", &self.profile, "installed", "not installed"),
            ("Bashrc block", &self.bashrc, "installed", "not installed"),
        ] {
            lines.push(format!(
                "{}: {} ({})",
                label,
                if *present { yes } else { no },
                path.display()
            ));
        }

        if self.is_complete() {
            lines.push("Status: installed (open a new shell to activate)".to_string());
        } else {
            lines.push("Status: incomplete".to_string());
        }

        lines.join("\n")
    }
}
