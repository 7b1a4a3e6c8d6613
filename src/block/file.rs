//! File adapter for marked-block editing
//!
//! Reads the whole target file, computes the new content with the pure
//! functions in [`super::edit`], and replaces the file in one rename so a
//! failure leaves the original untouched.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::edit::{self, Markers, Removal};
use super::BlockError;

/// Remove the marked block from a file.
///
/// A missing file is a satisfied post-condition: nothing is created and an
/// unchanged [`Removal`] is returned. When no block is present the file is not
/// rewritten at all.
pub fn remove_block_in_file(path: &Path, markers: &Markers) -> Result<Removal, BlockError> {
    let Some(text) = read_existing(path)? else {
        debug!(path = %path.display(), "target file missing, nothing to remove");
        return Ok(edit::remove_block(b"", markers));
    };

    let removal = edit::remove_block(&text, markers);
    if removal.is_changed() {
        write_atomic(path, &removal.text)?;
        debug!(
            path = %path.display(),
            blocks = removal.blocks,
            lines = removal.lines,
            unterminated = removal.unterminated,
            "removed marked block"
        );
    }
    Ok(removal)
}

/// Replace the marked block in a file with `content`, creating the file if needed.
///
/// Returns `true` if the file content changed.
pub fn patch_block_in_file(
    path: &Path,
    markers: &Markers,
    content: &str,
) -> Result<bool, BlockError> {
    let existing = read_existing(path)?;
    let current = existing.as_deref().unwrap_or_default();
    let patched = edit::patch_block(current, markers, content)?;

    if existing.as_deref() == Some(patched.as_slice()) {
        debug!(path = %path.display(), "marked block already up to date");
        return Ok(false);
    }

    write_atomic(path, &patched)?;
    debug!(path = %path.display(), bytes = patched.len(), "patched marked block");
    Ok(true)
}

/// Check whether a file holds a marked block. Missing files hold none.
pub fn block_present_in_file(path: &Path, markers: &Markers) -> Result<bool, BlockError> {
    Ok(read_existing(path)?
        .map(|text| edit::contains_block(&text, markers))
        .unwrap_or(false))
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, BlockError> {
    match fs::read(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BlockError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `contents` to `path` via a sibling temp file and a rename.
///
/// Symlinks are followed, dangling ones included, so the link itself
/// survives. The temp file takes the original's permissions before it
/// replaces it.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), BlockError> {
    let target = resolve_target(path);
    let temp = temp_path_for(&target);

    let result = write_temp(&temp, &target, contents).and_then(|()| fs::rename(&temp, &target));
    if let Err(source) = result {
        // Clean up temp file on failure
        let _ = fs::remove_file(&temp);
        return Err(BlockError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn write_temp(temp: &Path, target: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp)?;
    file.write_all(contents)?;
    if let Ok(meta) = fs::metadata(target) {
        file.set_permissions(meta.permissions())?;
    }
    file.sync_all()
}

const MAX_LINK_HOPS: usize = 40;

fn resolve_target(path: &Path) -> PathBuf {
    let mut target = path.to_path_buf();
    for _ in 0..MAX_LINK_HOPS {
        let Ok(dest) = fs::read_link(&target) else {
            break;
        };
        target = match target.parent() {
            Some(parent) if dest.is_relative() => parent.join(dest),
            _ => dest,
        };
    }
    target
}

fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}
