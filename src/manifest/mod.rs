//! Kernel family declarations
//!
//! A manifest names, for every generated header, the directory its sources
//! live in, the root file of each embedded kernel, the ordered include list
//! and any raw splices. The built-in manifest covers the OpenCL backends; a
//! YAML file with the same shape can replace it.

pub mod builtin;
pub mod serialization;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::ident::{is_c_identifier, is_reserved_word};
use crate::error::{Result, config as config_error};
use serialization::ManifestData;

/// When a raw splice runs relative to the named include pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpliceStage {
    Before,
    #[default]
    After,
}

/// Replace every `#include "<name>"` with the raw file content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSplice {
    pub name: String,
    pub stage: SpliceStage,
}

impl RawSplice {
    pub fn after(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stage: SpliceStage::After,
        }
    }
}

/// One embedded kernel: a root file and how to complete it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelSource {
    /// Name of the generated constant
    pub symbol: String,
    /// Root file, relative to the family directory
    pub root: String,
    /// Includes, applied in this order
    pub includes: Vec<String>,
    pub splices: Vec<RawSplice>,
}

impl KernelSource {
    pub fn new(symbol: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            root: root.into(),
            includes: Vec::new(),
            splices: Vec::new(),
        }
    }

    pub fn includes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn splice(mut self, splice: RawSplice) -> Self {
        self.splices.push(splice);
        self
    }
}

/// What a family's header embeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyOutput {
    Single(KernelSource),
    Bundle(Vec<KernelSource>),
}

/// One generated header and the sources behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub name: String,
    /// Directory all sources are read from, relative to the project root
    pub dir: PathBuf,
    /// Header path, relative to `dir`
    pub header: PathBuf,
    pub output: FamilyOutput,
}

impl Family {
    /// Kernels in emission order
    pub fn sources(&self) -> &[KernelSource] {
        match &self.output {
            FamilyOutput::Single(source) => std::slice::from_ref(source),
            FamilyOutput::Bundle(sources) => sources,
        }
    }

    /// Label for a bundle's include guard: the header file stem
    pub fn bundle_name(&self) -> String {
        self.header
            .file_stem()
            .map_or_else(|| self.name.clone(), |stem| stem.to_string_lossy().into_owned())
    }
}

/// Every family generated in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Namespace of every generated constant
    pub scope: String,
    /// Warn about declared includes that are never substituted
    pub strict: bool,
    pub families: Vec<Family>,
}

impl Manifest {
    /// Load and validate a YAML manifest
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| config_error::read_failed(path, e))?;
        Self::from_yaml(&content, path)
    }

    /// Parse and validate YAML; `origin` is only used in error messages
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self> {
        let data: ManifestData =
            serde_yaml::from_str(content).map_err(|e| config_error::parse_failed(origin, e))?;
        let manifest = Self::try_from(data)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&ManifestData::from(self)).map_err(config_error::serialize_failed)
    }

    /// Families to generate; `only` restricts by name, in manifest order
    pub fn select(&self, only: &[String]) -> Result<Vec<&Family>> {
        if let Some(unknown) = only
            .iter()
            .find(|name| !self.families.iter().any(|f| &f.name == *name))
        {
            let known: Vec<_> = self.families.iter().map(|f| f.name.as_str()).collect();
            return Err(config_error::invalid(format!(
                "unknown family '{unknown}' (known: {})",
                known.join(", ")
            )));
        }

        Ok(self
            .families
            .iter()
            .filter(|f| only.is_empty() || only.contains(&f.name))
            .collect())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scope.is_empty()
            || !self
                .scope
                .split("::")
                .all(|part| is_c_identifier(part) && !is_reserved_word(part))
        {
            return Err(config_error::invalid(format!(
                "scope '{}' is not a C++ namespace name",
                self.scope
            )));
        }

        let mut family_names = HashSet::new();
        for family in &self.families {
            if family.name.is_empty() {
                return Err(config_error::invalid("family name cannot be empty"));
            }
            if !family_names.insert(family.name.as_str()) {
                return Err(config_error::invalid(format!(
                    "duplicate family '{}'",
                    family.name
                )));
            }
            validate_family(family)?;
        }

        Ok(())
    }
}

fn validate_family(family: &Family) -> Result<()> {
    if family.header.as_os_str().is_empty() {
        return Err(config_error::invalid(format!(
            "family '{}' has no header path",
            family.name
        )));
    }

    let sources = family.sources();
    if sources.is_empty() {
        return Err(config_error::invalid(format!(
            "bundle '{}' has no entries",
            family.name
        )));
    }

    let mut symbols = HashSet::new();
    for source in sources {
        if !is_c_identifier(&source.symbol) {
            return Err(config_error::invalid(format!(
                "symbol '{}' in family '{}' is not a C identifier",
                source.symbol, family.name
            )));
        }
        if is_reserved_word(&source.symbol) {
            return Err(config_error::invalid(format!(
                "symbol '{}' in family '{}' is a C++ keyword",
                source.symbol, family.name
            )));
        }
        if !symbols.insert(source.symbol.as_str()) {
            return Err(config_error::invalid(format!(
                "duplicate symbol '{}' in family '{}'",
                source.symbol, family.name
            )));
        }
        if source.root.is_empty() {
            return Err(config_error::invalid(format!(
                "symbol '{}' in family '{}' has no root file",
                source.symbol, family.name
            )));
        }
    }

    Ok(())
}
