//! Command implementations for clembed CLI

pub mod completions;
pub mod generate;
mod helpers;
pub mod manifest;
pub mod minify;
pub mod version;
