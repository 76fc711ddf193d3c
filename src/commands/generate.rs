//! Generate command implementation
//!
//! Loads the manifest, selects families and runs the generator, then prints
//! one summary line per header.

use console::Style;

use crate::cli::GenerateArgs;
use crate::commands::helpers::{load_manifest, resolve_root};
use crate::error::Result;
use crate::generator::{GenerateOptions, GeneratedHeader, Generator, HeaderStatus};
use crate::hash;
use crate::progress::ProgressDisplay;

/// Run generate command
pub fn run(args: GenerateArgs) -> Result<()> {
    let root = resolve_root(args.root)?;
    let manifest = load_manifest(args.manifest.as_deref())?;
    let families = manifest.select(&args.only)?;

    let options = GenerateOptions {
        strict: args.strict,
        check: args.check,
        dump_resolved: args.dump_resolved,
    };

    let progress = if console::user_attended_stderr() {
        ProgressDisplay::new(families.len() as u64)
    } else {
        ProgressDisplay::hidden()
    };

    let generated = Generator::new(&root, options).run(&manifest, &families, &progress)?;

    print_summary(&generated, args.strict || manifest.strict);
    Ok(())
}

fn print_summary(generated: &[GeneratedHeader], show_unmatched: bool) {
    for header in generated {
        let status = match header.status {
            HeaderStatus::Written => Style::new().green().apply_to("generated"),
            HeaderStatus::UpToDate => Style::new().green().apply_to("up to date"),
        };

        println!(
            "  {} {} {} ({} bytes, {})",
            status,
            Style::new().bold().yellow().apply_to(&header.family),
            header.path.display(),
            header.bytes,
            Style::new().dim().apply_to(hash::short(&header.digest))
        );

        if !show_unmatched {
            continue;
        }
        for (symbol, include) in &header.unmatched {
            println!(
                "    {} {}: no directive for '{}'",
                Style::new().yellow().apply_to("unmatched"),
                Style::new().cyan().apply_to(symbol),
                include
            );
        }
    }
}
