//! Manifest errors

use std::path::Path;

use super::ClembedError;

/// Creates a manifest read failed error
pub fn read_failed(path: &Path, reason: impl ToString) -> ClembedError {
    ClembedError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: &Path, reason: impl ToString) -> ClembedError {
    ClembedError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a manifest serialize failed error
pub fn serialize_failed(reason: impl ToString) -> ClembedError {
    ClembedError::ConfigSerializeFailed {
        reason: reason.to_string(),
    }
}

/// Creates an invalid manifest error
pub fn invalid(message: impl Into<String>) -> ClembedError {
    ClembedError::ConfigInvalid {
        message: message.into(),
    }
}
