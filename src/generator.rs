//! Header generation for kernel families
//!
//! For every family: resolve each kernel's includes against the family
//! directory, apply raw splices, minify, emit the header and write it
//! atomically. Families run one after another and the first failure stops the
//! run. Paths are always joined onto an explicit project root; the process
//! working directory is never changed.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::common::fs::{read_source, write_atomic};
use crate::error::{ClembedError, Result};
use crate::hash::{hash_bytes, hash_file};
use crate::header;
use crate::manifest::{Family, FamilyOutput, KernelSource, Manifest, SpliceStage};
use crate::minify::minify;
use crate::progress::ProgressDisplay;
use crate::resolver::IncludeResolver;

/// Suffix of the minified translation units written by `--dump-resolved`
pub const DUMP_SUFFIX: &str = "_gen.cl";

/// Switches for one generation run
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Warn about declared includes that are never substituted
    pub strict: bool,
    /// Compare against the headers on disk instead of writing them
    pub check: bool,
    /// Also write each minified kernel next to its header
    pub dump_resolved: bool,
}

/// What happened to one header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    Written,
    UpToDate,
}

/// Result of generating one family
#[derive(Debug, Clone)]
pub struct GeneratedHeader {
    pub family: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub digest: String,
    pub status: HeaderStatus,
    /// Declared includes whose directive was not found, per symbol
    pub unmatched: Vec<(String, String)>,
}

/// One kernel after resolution and minification
#[derive(Debug, Clone)]
pub struct BuiltKernel {
    pub symbol: String,
    pub minified: String,
    pub unmatched: Vec<String>,
}

/// Runs the pipeline for the families of a manifest
pub struct Generator {
    project_root: PathBuf,
    options: GenerateOptions,
}

impl Generator {
    pub fn new(project_root: impl Into<PathBuf>, options: GenerateOptions) -> Self {
        Self {
            project_root: project_root.into(),
            options,
        }
    }

    /// Directory a family's sources and header live in
    pub fn family_dir(&self, family: &Family) -> PathBuf {
        self.project_root.join(&family.dir)
    }

    /// Generate `families` in order, stopping at the first error
    pub fn run(
        &self,
        manifest: &Manifest,
        families: &[&Family],
        progress: &ProgressDisplay,
    ) -> Result<Vec<GeneratedHeader>> {
        let mut generated = Vec::with_capacity(families.len());

        for family in families {
            progress.update_family(&family.name);

            match self.generate_family(&manifest.scope, family, manifest.strict) {
                Ok(header) => generated.push(header),
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }

            progress.inc_family();
        }

        progress.finish();
        Ok(generated)
    }

    /// Resolve, minify, emit and write (or check) one family's header
    pub fn generate_family(
        &self,
        scope: &str,
        family: &Family,
        manifest_strict: bool,
    ) -> Result<GeneratedHeader> {
        let dir = self.family_dir(family);
        let resolver =
            IncludeResolver::new(&dir).strict(self.options.strict || manifest_strict);

        let kernels = family
            .sources()
            .iter()
            .map(|source| build_kernel(&resolver, source))
            .collect::<Result<Vec<_>>>()?;

        if self.options.dump_resolved {
            for (source, kernel) in family.sources().iter().zip(&kernels) {
                write_atomic(&dir.join(dump_name(&source.root)), kernel.minified.as_bytes())?;
            }
        }

        let bytes = emit_family(scope, family, &kernels);
        let digest = hash_bytes(&bytes);
        let path = dir.join(&family.header);

        let status = if self.options.check {
            check_up_to_date(&path, &digest)?;
            HeaderStatus::UpToDate
        } else {
            write_atomic(&path, &bytes)?;
            HeaderStatus::Written
        };

        log::info!(
            "{}: {} ({} bytes, {})",
            family.name,
            path.display(),
            bytes.len(),
            digest
        );

        Ok(GeneratedHeader {
            family: family.name.clone(),
            path,
            bytes: bytes.len(),
            digest,
            status,
            unmatched: kernels
                .into_iter()
                .flat_map(|k| {
                    let symbol = k.symbol;
                    k.unmatched
                        .into_iter()
                        .map(move |name| (symbol.clone(), name))
                })
                .collect(),
        })
    }
}

/// Run one kernel through splices, the named include pass and minification
pub fn build_kernel(resolver: &IncludeResolver, source: &KernelSource) -> Result<BuiltKernel> {
    let splices_at = |stage: SpliceStage| source.splices.iter().filter(move |s| s.stage == stage);

    let resolution = if splices_at(SpliceStage::Before).next().is_none() {
        resolver.resolve(&source.root, &source.includes)?
    } else {
        let mut text = read_source(&resolver.base_dir().join(&source.root))?;
        for splice in splices_at(SpliceStage::Before) {
            text = resolver.splice(&text, &splice.name)?;
        }
        resolver.resolve_text(&source.root, text, &source.includes)?
    };

    let mut text = resolution.text;
    for splice in splices_at(SpliceStage::After) {
        text = resolver.splice(&text, &splice.name)?;
    }

    Ok(BuiltKernel {
        symbol: source.symbol.clone(),
        minified: minify(&text),
        unmatched: resolution.unmatched,
    })
}

fn emit_family(scope: &str, family: &Family, kernels: &[BuiltKernel]) -> Vec<u8> {
    match &family.output {
        FamilyOutput::Single(_) => {
            let kernel = &kernels[0];
            header::emit_single(scope, &kernel.symbol, &kernel.minified)
        }
        FamilyOutput::Bundle(_) => {
            let entries: IndexMap<String, String> = kernels
                .iter()
                .map(|k| (k.symbol.clone(), k.minified.clone()))
                .collect();
            header::emit_bundle(scope, &family.bundle_name(), &entries)
        }
    }
}

/// `cryptonight.cl` -> `cryptonight_gen.cl`
fn dump_name(root: &str) -> String {
    let file = Path::new(root)
        .file_stem()
        .map_or_else(|| root.to_string(), |stem| stem.to_string_lossy().into_owned());
    format!("{file}{DUMP_SUFFIX}")
}

fn check_up_to_date(path: &Path, digest: &str) -> Result<()> {
    let stale = || ClembedError::StaleHeader {
        path: path.display().to_string(),
    };

    if !path.is_file() {
        return Err(stale());
    }
    if hash_file(path)? != digest {
        return Err(stale());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::manifest::RawSplice;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, name: &str, content: &str) {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn single_family(dir: &str, includes: &[&str]) -> Family {
        Family {
            name: "k".to_string(),
            dir: dir.into(),
            header: "k_cl.h".into(),
            output: FamilyOutput::Single(
                KernelSource::new("k_cl", "k.cl").includes(includes.iter().copied()),
            ),
        }
    }

    fn manifest(families: Vec<Family>) -> Manifest {
        Manifest {
            scope: "ns".to_string(),
            strict: false,
            families,
        }
    }

    #[test]
    fn test_generate_end_to_end() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "cl/k.cl",
            "__kernel void k(){ /* c */ \n  int x=1;  }\n#include \"lib.cl\"\n",
        );
        write(temp.path(), "cl/lib.cl", "int helper(){return 2;}");

        let family = single_family("cl", &["lib.cl"]);
        let header = Generator::new(temp.path(), GenerateOptions::default())
            .generate_family("ns", &family, false)
            .unwrap();

        assert_eq!(header.status, HeaderStatus::Written);
        assert_eq!(header.path, temp.path().join("cl/k_cl.h"));
        assert!(header.unmatched.is_empty());

        let written = fs::read(&header.path).unwrap();
        assert_eq!(
            written,
            header::emit_single("ns", "k_cl", "__kernel void k(){int x=1;}int helper(){return 2;}")
        );
        assert_eq!(header.bytes, written.len());
        assert_eq!(header.digest, hash_bytes(&written));
    }

    #[test]
    fn test_generate_bundle() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "cn/defines.cl", "#include \"aes.cl\"\n#define R 1\n");
        write(temp.path(), "cn/aes.cl", "#define AES 1");
        write(temp.path(), "cn/main.cl", "__kernel void r() { }\n");

        let family = Family {
            name: "cn_r".to_string(),
            dir: "cn".into(),
            header: "cryptonight_r_cl.h".into(),
            output: FamilyOutput::Bundle(vec![
                KernelSource::new("defines_cl", "defines.cl").includes(["aes.cl"]),
                KernelSource::new("main_cl", "main.cl"),
            ]),
        };

        let header = Generator::new(temp.path(), GenerateOptions::default())
            .generate_family("xlarig", &family, false)
            .unwrap();

        let mut entries = IndexMap::new();
        entries.insert("defines_cl".to_string(), "#define AES 1\n#define R 1".to_string());
        entries.insert("main_cl".to_string(), "__kernel void r(){}".to_string());
        assert_eq!(
            fs::read(header.path).unwrap(),
            header::emit_bundle("xlarig", "cryptonight_r_cl", &entries)
        );
    }

    #[test]
    fn test_raw_splices_run_after_named_pass() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "rx/k.cl",
            "#include \"vm.cl\"\nvoid a(){\n\t#include \"fill.cl\"\n}\n",
        );
        write(temp.path(), "rx/vm.cl", "void b(){\n    #include \"fill.cl\"\n}");
        write(temp.path(), "rx/fill.cl", "f();");

        let source = KernelSource::new("k_cl", "k.cl")
            .includes(["vm.cl"])
            .splice(RawSplice::after("fill.cl"));
        let resolver = IncludeResolver::new(temp.path().join("rx"));

        let kernel = build_kernel(&resolver, &source).unwrap();
        assert_eq!(kernel.minified, "void b(){f();}void a(){f();}");
    }

    #[test]
    fn test_splice_before_named_pass() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "k.cl", "#include \"pre.cl\"\nk();\n");
        write(temp.path(), "pre.cl", "#include \"lib.cl\"");
        write(temp.path(), "lib.cl", "lib();");

        let source = KernelSource::new("k_cl", "k.cl")
            .includes(["lib.cl"])
            .splice(RawSplice {
                name: "pre.cl".to_string(),
                stage: SpliceStage::Before,
            });
        let kernel = build_kernel(&IncludeResolver::new(temp.path()), &source).unwrap();

        assert_eq!(kernel.minified, "lib();k();");
        assert!(kernel.unmatched.is_empty());
    }

    #[test]
    fn test_unmatched_includes_are_reported() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "cl/k.cl", "k();\n");
        write(temp.path(), "cl/lib.cl", "lib();");

        let header = Generator::new(temp.path(), GenerateOptions {
            strict: true,
            ..GenerateOptions::default()
        })
        .generate_family("ns", &single_family("cl", &["lib.cl"]), false)
        .unwrap();

        assert_eq!(
            header.unmatched,
            vec![("k_cl".to_string(), "lib.cl".to_string())]
        );
    }

    #[test]
    fn test_missing_include_fails_with_path() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "cl/k.cl", "#include \"gone.cl\"\n");

        let err = Generator::new(temp.path(), GenerateOptions::default())
            .generate_family("ns", &single_family("cl", &["gone.cl"]), false)
            .unwrap_err();

        assert!(matches!(err, ClembedError::FileReadFailed { .. }));
        assert!(err.to_string().contains("gone.cl"));
        assert!(!temp.path().join("cl/k_cl.h").exists());
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a/k.cl", "a();\n");
        write(temp.path(), "c/k.cl", "c();\n");

        let families = vec![
            single_family("a", &[]),
            Family {
                name: "b".to_string(),
                ..single_family("b", &[])
            },
            Family {
                name: "c".to_string(),
                ..single_family("c", &[])
            },
        ];
        let manifest = manifest(families);
        let selected = manifest.select(&[]).unwrap();

        let err = Generator::new(temp.path(), GenerateOptions::default())
            .run(&manifest, &selected, &ProgressDisplay::hidden())
            .unwrap_err();

        assert!(err.to_string().contains("k.cl"));
        assert!(temp.path().join("a/k_cl.h").exists());
        assert!(!temp.path().join("c/k_cl.h").exists());
    }

    #[test]
    fn test_regeneration_overwrites_and_is_deterministic() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "cl/k.cl", "k();\n");
        write(temp.path(), "cl/k_cl.h", "stale header from an older run, much longer than the new one");

        let generator = Generator::new(temp.path(), GenerateOptions::default());
        let family = single_family("cl", &[]);

        let first = generator.generate_family("ns", &family, false).unwrap();
        let bytes = fs::read(&first.path).unwrap();
        let second = generator.generate_family("ns", &family, false).unwrap();

        assert_eq!(first.digest, second.digest);
        assert_eq!(fs::read(&second.path).unwrap(), bytes);
        assert_eq!(bytes, header::emit_single("ns", "k_cl", "k();"));
    }

    #[test]
    fn test_check_mode() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "cl/k.cl", "k();\n");
        let family = single_family("cl", &[]);

        let check = Generator::new(temp.path(), GenerateOptions {
            check: true,
            ..GenerateOptions::default()
        });

        // missing header
        let err = check.generate_family("ns", &family, false).unwrap_err();
        assert!(matches!(err, ClembedError::StaleHeader { .. }));

        Generator::new(temp.path(), GenerateOptions::default())
            .generate_family("ns", &family, false)
            .unwrap();
        let header = check.generate_family("ns", &family, false).unwrap();
        assert_eq!(header.status, HeaderStatus::UpToDate);

        // source changed after generation
        write(temp.path(), "cl/k.cl", "k2();\n");
        let err = check.generate_family("ns", &family, false).unwrap_err();
        assert!(matches!(err, ClembedError::StaleHeader { .. }));
        assert_eq!(
            fs::read(temp.path().join("cl/k_cl.h")).unwrap(),
            header::emit_single("ns", "k_cl", "k();")
        );
    }

    #[test]
    fn test_dump_resolved_writes_translation_unit() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "cl/k.cl", "#include \"lib.cl\"\n k(); // call\n");
        write(temp.path(), "cl/lib.cl", "lib();");

        Generator::new(temp.path(), GenerateOptions {
            dump_resolved: true,
            ..GenerateOptions::default()
        })
        .generate_family("ns", &single_family("cl", &["lib.cl"]), false)
        .unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("cl/k_gen.cl")).unwrap(),
            "lib();k();"
        );
    }

    #[test]
    fn test_dump_name() {
        assert_eq!(dump_name("cryptonight.cl"), "cryptonight_gen.cl");
        assert_eq!(dump_name("randomx"), "randomx_gen.cl");
    }
}
