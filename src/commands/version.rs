//! Version command implementation

use crate::error::Result;
use crate::header::GENERATED_BANNER;

/// Run version command
pub fn run() -> Result<()> {
    println!("clembed {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!("  Header banner: {}", GENERATED_BANNER);

    Ok(())
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
