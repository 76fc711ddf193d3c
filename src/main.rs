//! clembed - OpenCL kernel embedder
//!
//! Resolves the `#include` directives of OpenCL kernel sources, minifies the
//! resulting translation units and writes them into C++ headers as
//! string-literal constants.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod error;
mod generator;
mod hash;
mod header;
mod logging;
mod manifest;
mod minify;
mod progress;
mod resolver;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Minify(args) => commands::minify::run(args),
        Commands::Manifest(args) => commands::manifest::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
