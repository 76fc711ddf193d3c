//! Common test utilities for clembed integration tests

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A project directory holding kernel sources and generated headers
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Names of every entry in a workspace directory
    #[allow(dead_code)]
    pub fn list_dir(&self, path: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path.join(path))
            .expect("Failed to read directory")
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Write a manifest with one single-kernel family at `kernels/`
    #[allow(dead_code)]
    pub fn write_single_manifest(&self, includes: &[&str]) {
        let includes = includes
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_file(
            "kernels.yaml",
            &format!(
                "scope: demo\n\
                 families:\n\
                 \x20 - name: k\n\
                 \x20   dir: kernels\n\
                 \x20   header: k_cl.h\n\
                 \x20   single:\n\
                 \x20     symbol: k_cl\n\
                 \x20     root: k.cl\n\
                 \x20     includes: [{includes}]\n"
            ),
        );
    }

    /// `clembed` running inside this workspace
    pub fn cmd(&self) -> Command {
        let mut cmd = clembed_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

/// The clembed binary under test
pub fn clembed_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clembed"))
}
