//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clembed - OpenCL kernel embedder
///
/// Bundles OpenCL kernel sources into minified C++ string-literal headers.
#[derive(Parser, Debug)]
#[command(
    name = "clembed",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Embed OpenCL kernel sources into generated C++ headers",
    long_about = "clembed resolves the #include directives of OpenCL kernel sources, minifies \
                  the result and writes it as string-literal constants into C++ headers that \
                  the host program compiles in.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  clembed generate\n    \
                  clembed generate --only rx\n    \
                  clembed generate --manifest kernels.yaml --check\n    \
                  clembed minify kernel.cl -o kernel.min.cl"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate kernel headers
    Generate(GenerateArgs),

    /// Minify one OpenCL source file
    Minify(MinifyArgs),

    /// Print the effective manifest as YAML
    Manifest(ManifestArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Regenerate every header of the built-in manifest:\n    clembed generate\n\n\
                  Regenerate one family:\n    clembed generate --only cn_gpu\n\n\
                  Use a custom manifest:\n    clembed generate --manifest kernels.yaml\n\n\
                  Fail if a committed header is out of date (CI):\n    clembed generate --check\n\n\
                  Write the minified sources next to the headers:\n    clembed generate --dump-resolved")]
pub struct GenerateArgs {
    /// Project root every family directory is relative to (defaults to current directory)
    #[arg(long, short = 'C', value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// YAML manifest to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Generate only the named families
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Warn about declared includes whose directive is never found
    #[arg(long)]
    pub strict: bool,

    /// Compare headers on disk instead of writing them
    #[arg(long)]
    pub check: bool,

    /// Also write each minified kernel as <root>_gen.cl
    #[arg(long)]
    pub dump_resolved: bool,
}

/// Arguments for the minify command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print a minified kernel:\n    clembed minify cryptonight.cl\n\n\
                  Write to a file:\n    clembed minify cryptonight.cl -o cryptonight.min.cl")]
pub struct MinifyArgs {
    /// OpenCL source file
    pub file: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(long, short = 'o', value_name = "OUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for the manifest command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Start a custom manifest from the built-in one:\n    clembed manifest > kernels.yaml\n\n\
                  Validate and normalize a manifest:\n    clembed manifest --manifest kernels.yaml")]
pub struct ManifestArgs {
    /// YAML manifest to validate and print instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    clembed completions --shell bash > ~/.bash_completion.d/clembed\n\n\
                  Generate zsh completions:\n    clembed completions --shell zsh > ~/.zfunc/_clembed\n\n\
                  Generate fish completions:\n    clembed completions --shell fish > ~/.config/fish/completions/clembed.fish\n\n\
                  Generate PowerShell completions:\n    clembed completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
