//! File system errors

use std::path::Path;

use super::ClembedError;

/// Creates a read failed error for a kernel source
pub fn read_failed(path: &Path, reason: impl ToString) -> ClembedError {
    ClembedError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a write failed error for a generated file
pub fn write_failed(path: &Path, reason: impl ToString) -> ClembedError {
    ClembedError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
