//! Test helper utilities

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use sgpt_setup::config::Config;
use sgpt_setup::runner::{command_line, CommandOutput, CommandRunner, RunnerError};
use tempfile::TempDir;

/// GitHub API response used by the fake `curl`.
pub const RELEASE_JSON: &str = r#"{
    "tag_name": "v2.17.1",
    "assets": [
        {"browser_download_url": "https://github.com/tbckr/sgpt/releases/download/v2.17.1/sgpt_2.17.1_linux_amd64.deb"},
        {"browser_download_url": "https://github.com/tbckr/sgpt/releases/download/v2.17.1/sgpt_2.17.1_linux_arm64.deb"}
    ]
}"#;

/// Canned reply for a command whose line starts with `prefix`.
struct Reply {
    prefix: String,
    success: bool,
    stdout: String,
}

/// Command runner that records calls and answers from a script.
///
/// Commands without a matching reply succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    replies: Vec<Reply>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner for a system where `installed` is the dpkg version (if any)
    /// and the latest release is 2.17.1.
    pub fn with_versions(installed: Option<&str>) -> Self {
        let runner = Self::new().reply("curl -fsSL", true, RELEASE_JSON);
        match installed {
            Some(v) => runner.reply("dpkg-query", true, v),
            None => runner.reply("dpkg-query", false, ""),
        }
    }

    pub fn reply(mut self, prefix: &str, success: bool, stdout: &str) -> Self {
        self.replies.push(Reply {
            prefix: prefix.to_string(),
            success,
            stdout: stdout.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError> {
        let command = command_line(program, args);
        self.calls.borrow_mut().push(command.clone());

        let (success, stdout) = self
            .replies
            .iter()
            .find(|r| command.starts_with(&r.prefix))
            .map(|r| (r.success, r.stdout.clone()))
            .unwrap_or((true, String::new()));

        Ok(CommandOutput {
            command,
            success,
            code: Some(if success { 0 } else { 1 }),
            stdout,
            stderr: if success {
                String::new()
            } else {
                "fake failure".to_string()
            },
        })
    }
}

/// Config with every path inside `temp`.
pub fn test_config(temp: &TempDir) -> Config {
    let root = temp.path();
    let mut config = Config::default();
    config.paths.log_file = root.join("var/log/install-sgpt-pkg.log");
    config.paths.install_dir = root.join("tmp/sgpt_install");
    config.paths.bind_script = root.join("etc/profile.d/sgpt_bind.sh");
    config.paths.api_key_file = root.join("etc/sgpt/openai_key.sh");
    config.paths.source_credential_file = root.join("etc/credentials/sgpt/openai_key");
    config.paths.profile = root.join("etc/profile");
    config.paths.bashrc = root.join("etc/bash.bashrc");
    config
}

/// Create the directories and files a typical Debian host already has.
pub fn seed_system(config: &Config, key: &str) {
    let paths = &config.paths;
    write(&paths.profile, "# /etc/profile\nexport PATH=/usr/bin:/bin\n");
    write(&paths.bashrc, "# System-wide .bashrc file\nPS1='\\u@\\h:\\w\\$ '\n");
    write(&paths.source_credential_file, &format!("{}\n", key));
    fs::create_dir_all(paths.bind_script.parent().unwrap()).unwrap();
}

pub fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()))
}
