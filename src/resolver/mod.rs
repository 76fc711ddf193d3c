//! Include resolution for kernel sources
//!
//! This module handles:
//! - Reading a root kernel file relative to an explicit base directory
//! - Replacing `#include "name"` directives with file contents, in the order
//!   the caller lists the names
//! - Raw block-splices that replace every occurrence of one directive
//!
//! A listed include whose directive is not present is not an error. Included
//! content may itself carry directives; those stay in place until a later
//! listed name targets them, and directives for names that are never listed
//! are left untouched.

pub mod directive;

use std::path::{Path, PathBuf};

use crate::common::fs::read_source;
use crate::error::Result;

/// Text of a root file after all listed includes were applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved translation unit
    pub text: String,

    /// Declared include names whose directive was not found
    pub unmatched: Vec<String>,
}

/// Resolves includes against one base directory
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    base_dir: PathBuf,
    strict: bool,
}

impl IncludeResolver {
    /// Create a resolver reading every file relative to `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            strict: false,
        }
    }

    /// Warn about declared includes that have no directive to replace
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Directory every relative path is resolved against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Read `root` and apply each include in `includes`, in the given order.
    ///
    /// Every listed file must be readable, even when its directive is absent.
    pub fn resolve(&self, root: &str, includes: &[String]) -> Result<Resolution> {
        let text = read_source(&self.base_dir.join(root))?;
        self.resolve_text(root, text, includes)
    }

    /// Apply `includes` to already loaded text; `origin` labels log messages
    pub fn resolve_text(
        &self,
        origin: &str,
        mut text: String,
        includes: &[String],
    ) -> Result<Resolution> {
        let mut unmatched = Vec::new();

        for name in includes {
            let content = read_source(&self.base_dir.join(name))?;

            match directive::substitute_first(&text, name, &content) {
                Some(next) => {
                    log::debug!("{origin}: included {name} ({} bytes)", content.len());
                    text = next;
                }
                None => {
                    if self.strict {
                        log::warn!("{origin}: no #include directive for declared include '{name}'");
                    }
                    unmatched.push(name.clone());
                }
            }
        }

        Ok(Resolution { text, unmatched })
    }

    /// Replace every `#include "<name>"` in `text` with the raw file content
    pub fn splice(&self, text: &str, name: &str) -> Result<String> {
        let content = read_source(&self.base_dir.join(name))?;
        let (spliced, count) = directive::substitute_all(text, name, &content);

        if count == 0 && self.strict {
            log::warn!("no #include directive for raw splice '{name}'");
        } else {
            log::debug!("spliced {name} into {count} location(s)");
        }

        Ok(spliced)
    }
}
