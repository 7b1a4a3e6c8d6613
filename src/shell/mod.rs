//! Shell integration for sgpt
//!
//! Generates the bind script installed under `/etc/profile.d` and the block
//! payloads patched into the system profile and bashrc.

pub mod bind;
pub mod blocks;
pub mod status;

pub use bind::{install_bind_script, render_bind_script, BIND_SCRIPT_MODE, BIND_SCRIPT_TEMPLATE};
pub use blocks::{bashrc_block, profile_block};
pub use status::IntegrationStatus;
