//! Minify command implementation

use crate::cli::MinifyArgs;
use crate::common::fs::{read_source, write_atomic};
use crate::error::Result;
use crate::minify::minify;

/// Minify one file to stdout or `--output`
pub fn run(args: MinifyArgs) -> Result<()> {
    let source = read_source(&args.file)?;
    let minified = minify(&source);

    log::debug!(
        "{}: {} -> {} bytes",
        args.file.display(),
        source.len(),
        minified.len()
    );

    match args.output {
        Some(output) => write_atomic(&output, minified.as_bytes()),
        None => {
            println!("{}", minified);
            Ok(())
        }
    }
}
