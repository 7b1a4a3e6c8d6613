//! sgpt-setup Library
//!
//! System-wide installer for Shell-GPT: package install through dpkg, API key
//! placement, and idempotent shell integration via marked blocks.

pub mod block;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod installer;
pub mod logging;
pub mod package;
pub mod privilege;
pub mod runner;
pub mod shell;

pub use block::{BlockError, Markers};
pub use config::Config;
pub use installer::{InstallError, Installer};
pub use runner::{CommandRunner, SystemRunner};
pub use shell::IntegrationStatus;
