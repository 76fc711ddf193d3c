//! Error types and handling for clembed
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`fs`]: Reading kernel sources and writing headers
//! - [`config`]: Manifest errors

pub mod config;
pub mod fs;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for clembed operations
#[derive(Error, Diagnostic, Debug)]
pub enum ClembedError {
    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(
        code(clembed::fs::read_failed),
        help("Check that the kernel source exists relative to the family directory")
    )]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(clembed::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(clembed::fs::io_error))]
    IoError { message: String },

    // Manifest errors
    #[error("Failed to read manifest: {path}: {reason}")]
    #[diagnostic(code(clembed::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse manifest: {path}: {reason}")]
    #[diagnostic(code(clembed::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to serialize manifest: {reason}")]
    #[diagnostic(code(clembed::config::serialize_failed))]
    ConfigSerializeFailed { reason: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(clembed::config::invalid))]
    ConfigInvalid { message: String },

    // Check mode
    #[error("Generated header is out of date: {path}")]
    #[diagnostic(
        code(clembed::check::stale),
        help("Run 'clembed generate' without --check to regenerate the header")
    )]
    StaleHeader { path: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(clembed::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },
}

impl From<std::io::Error> for ClembedError {
    fn from(err: std::io::Error) -> Self {
        ClembedError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ClembedError>;
