//! On-disk (YAML) shape of the manifest
//!
//! Kept separate from the domain types so the file format can stay flat and
//! forgiving while [`super::Family`] stays strongly typed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Family, FamilyOutput, KernelSource, Manifest, RawSplice, SpliceStage};
use crate::error::{Result, config as config_error};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestData {
    pub scope: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strict: bool,

    #[serde(default)]
    pub families: Vec<FamilyData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyData {
    pub name: String,
    pub dir: PathBuf,
    pub header: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single: Option<KernelData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<Vec<KernelData>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KernelData {
    pub symbol: String,
    pub root: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub splices: Vec<SpliceData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpliceData {
    pub name: String,

    #[serde(default)]
    pub stage: SpliceStage,
}

impl From<KernelData> for KernelSource {
    fn from(data: KernelData) -> Self {
        Self {
            symbol: data.symbol,
            root: data.root,
            includes: data.includes,
            splices: data
                .splices
                .into_iter()
                .map(|s| RawSplice {
                    name: s.name,
                    stage: s.stage,
                })
                .collect(),
        }
    }
}

impl From<&KernelSource> for KernelData {
    fn from(source: &KernelSource) -> Self {
        Self {
            symbol: source.symbol.clone(),
            root: source.root.clone(),
            includes: source.includes.clone(),
            splices: source
                .splices
                .iter()
                .map(|s| SpliceData {
                    name: s.name.clone(),
                    stage: s.stage,
                })
                .collect(),
        }
    }
}

impl TryFrom<FamilyData> for Family {
    type Error = crate::error::ClembedError;

    fn try_from(data: FamilyData) -> Result<Self> {
        let output = match (data.single, data.bundle) {
            (Some(single), None) => FamilyOutput::Single(single.into()),
            (None, Some(bundle)) => {
                FamilyOutput::Bundle(bundle.into_iter().map(KernelSource::from).collect())
            }
            _ => {
                return Err(config_error::invalid(format!(
                    "family '{}' must declare exactly one of 'single' or 'bundle'",
                    data.name
                )));
            }
        };

        Ok(Self {
            name: data.name,
            dir: data.dir,
            header: data.header,
            output,
        })
    }
}

impl From<&Family> for FamilyData {
    fn from(family: &Family) -> Self {
        let (single, bundle) = match &family.output {
            FamilyOutput::Single(source) => (Some(source.into()), None),
            FamilyOutput::Bundle(sources) => (None, Some(sources.iter().map(KernelData::from).collect())),
        };

        Self {
            name: family.name.clone(),
            dir: family.dir.clone(),
            header: family.header.clone(),
            single,
            bundle,
        }
    }
}

impl TryFrom<ManifestData> for Manifest {
    type Error = crate::error::ClembedError;

    fn try_from(data: ManifestData) -> Result<Self> {
        Ok(Self {
            scope: data.scope,
            strict: data.strict,
            families: data
                .families
                .into_iter()
                .map(Family::try_from)
                .collect::<Result<_>>()?,
        })
    }
}

impl From<&Manifest> for ManifestData {
    fn from(manifest: &Manifest) -> Self {
        Self {
            scope: manifest.scope.clone(),
            strict: manifest.strict,
            families: manifest.families.iter().map(FamilyData::from).collect(),
        }
    }
}
