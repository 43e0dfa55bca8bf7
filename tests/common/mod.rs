//! Shared test infrastructure for end-to-end generator tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway project tree driven through the real `dtgen` binary.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Create an empty project whose config points at a formatter that is
    /// never installed, so tests observe the generator's bytes unmodified.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create project tempdir");
        std::fs::write(
            dir.path().join("proj.toml"),
            "formatter = \"dtgen-test-no-formatter\"\n",
        )
        .expect("write proj.toml");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root().join(rel)).expect("read generated file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.root().join(rel).exists()
    }

    /// Run `dtgen --root <project>` with extra arguments.
    pub fn run(&self, extra_args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dtgen"))
            .arg("--root")
            .arg(self.root())
            .args(extra_args)
            .output()
            .expect("spawn dtgen")
    }

    pub fn run_ok(&self, extra_args: &[&str]) -> Output {
        let output = self.run(extra_args);
        assert!(
            output.status.success(),
            "dtgen failed: stdout={} stderr={}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }
}

/// A minimal valid struct spec body.
pub fn point_struct_toml() -> &'static str {
    "name = \"Point\"\n\n[[fields]]\nname = \"x\"\ntype = \"int\"\n\n[[fields]]\nname = \"y\"\ntype = \"int\"\n"
}
