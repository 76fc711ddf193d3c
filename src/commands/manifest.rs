//! Manifest command implementation

use crate::cli::ManifestArgs;
use crate::commands::helpers::load_manifest;
use crate::error::Result;

/// Print the effective manifest as YAML
pub fn run(args: ManifestArgs) -> Result<()> {
    let manifest = load_manifest(args.manifest.as_deref())?;
    print!("{}", manifest.to_yaml()?);
    Ok(())
}
