//! Common file system operations with unified error handling

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, fs as fs_error};

/// Read a UTF-8 source file, mapping failures to a read error naming the path
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| fs_error::read_failed(path, e))
}

/// Replace `path` with `contents` atomically.
///
/// The bytes go to a temporary file in the destination directory which is then
/// renamed over the target, so a failed write never leaves a truncated file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fs_error::write_failed(path, e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| fs_error::write_failed(path, e))?;
    tmp.persist(path)
        .map_err(|e| fs_error::write_failed(path, e.error))?;

    Ok(())
}
