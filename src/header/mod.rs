//! Generated C++ header emission
//!
//! A [`HeaderArtifact`] becomes one header with a single include guard, one
//! namespace block, and one `static const char[]` constant per embedded text.
//! Output depends only on the artifact, so identical inputs give identical
//! bytes.

pub mod escape;

use std::fmt::Write;

use indexmap::IndexMap;

use crate::common::ident::guard_name;

/// First line of every generated header
pub const GENERATED_BANNER: &str = "// Generated by clembed. Do not edit.";

/// What a header embeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// One constant
    Single { symbol: String, text: String },

    /// Several constants in insertion order; `name` labels the include guard
    Bundle {
        name: String,
        entries: IndexMap<String, String>,
    },
}

/// One generated header file's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderArtifact {
    /// Namespace shared by every constant in the file
    pub scope: String,
    pub kind: ArtifactKind,
}

impl HeaderArtifact {
    pub fn single(scope: impl Into<String>, symbol: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            kind: ArtifactKind::Single {
                symbol: symbol.into(),
                text: text.into(),
            },
        }
    }

    pub fn bundle(
        scope: impl Into<String>,
        name: impl Into<String>,
        entries: IndexMap<String, String>,
    ) -> Self {
        Self {
            scope: scope.into(),
            kind: ArtifactKind::Bundle {
                name: name.into(),
                entries,
            },
        }
    }

    /// Include guard macro, derived from the scope and the symbol or bundle name
    pub fn guard(&self) -> String {
        let label = match &self.kind {
            ArtifactKind::Single { symbol, .. } => symbol,
            ArtifactKind::Bundle { name, .. } => name,
        };
        guard_name(&[&self.scope, label])
    }

    /// `(symbol, text)` pairs in emission order
    pub fn constants(&self) -> Vec<(&str, &str)> {
        match &self.kind {
            ArtifactKind::Single { symbol, text } => vec![(symbol.as_str(), text.as_str())],
            ArtifactKind::Bundle { entries, .. } => entries
                .iter()
                .map(|(symbol, text)| (symbol.as_str(), text.as_str()))
                .collect(),
        }
    }
}

/// Serialize an artifact into header bytes
pub fn emit(artifact: &HeaderArtifact) -> Vec<u8> {
    let guard = artifact.guard();
    let scope = &artifact.scope;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{GENERATED_BANNER}");
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}");
    let _ = writeln!(out);
    let _ = writeln!(out, "namespace {scope} {{");

    for (symbol, text) in artifact.constants() {
        let _ = writeln!(out);
        let _ = writeln!(out, "static const char {symbol}[] =");

        let segments = escape::literal_segments(text);
        let last = segments.len() - 1;
        for (i, segment) in segments.iter().enumerate() {
            let terminator = if i == last { ";" } else { "" };
            let _ = writeln!(out, "    {segment}{terminator}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "}} // namespace {scope}");
    let _ = writeln!(out);
    let _ = writeln!(out, "#endif // {guard}");

    out.into_bytes()
}

/// Header with a single constant
pub fn emit_single(scope: &str, symbol: &str, text: &str) -> Vec<u8> {
    emit(&HeaderArtifact::single(scope, symbol, text))
}

/// Header with one constant per entry, in insertion order
pub fn emit_bundle(scope: &str, name: &str, entries: &IndexMap<String, String>) -> Vec<u8> {
    emit(&HeaderArtifact::bundle(scope, name, entries.clone()))
}
