//! Common utilities shared across modules

pub mod fs;
pub mod ident;
