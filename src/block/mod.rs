//! Marked-block editing for shared text files
//!
//! Shell startup files like `/etc/profile` are owned by the system and edited
//! by humans and other tools. This module injects and removes a single
//! generated region delimited by a start and an end marker line, touching
//! nothing else in the file.
//!
//! The editing logic in [`edit`] is pure (bytes in, bytes out). The
//! [`file`] adapter adds reading, missing-file handling and atomic replacement.

pub mod edit;
mod error;
pub mod file;

pub use edit::{contains_block, patch_block, remove_block, Markers, Removal};
pub use error::BlockError;
pub use file::{block_present_in_file, patch_block_in_file, remove_block_in_file};
