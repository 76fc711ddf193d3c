//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::manifest::{Manifest, builtin};

/// Resolve the project root from optional argument
///
/// If a root is provided, use it. Otherwise, resolve to the current directory.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}

/// Load the manifest at `path`, or the built-in one
pub fn load_manifest(path: Option<&Path>) -> Result<Manifest> {
    match path {
        Some(path) => Manifest::load(path),
        None => Ok(builtin::manifest()),
    }
}
