//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// The standard target matrix, mirrored for fixture construction
pub const STANDARD_TRIPLES: [&str; 6] = [
  "x86_64-pc-windows-msvc",
  "x86_64-apple-darwin",
  "x86_64-unknown-linux-musl",
  "arm-unknown-linux-musleabi",
  "armv7-unknown-linux-musleabihf",
  "aarch64-unknown-linux-musl",
];

/// A scratch working directory the CLI runs in
pub struct TestDir {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestDir {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Stage a fake compiled artifact for every platform in the standard matrix
  pub fn stage_all_platforms(&self, binary: &str) -> Result<()> {
    for triple in STANDARD_TRIPLES {
      let dir = self.path.join("artifacts").join(triple);
      std::fs::create_dir_all(&dir)?;
      let name = if triple.contains("windows") {
        format!("{}.exe", binary)
      } else {
        binary.to_string()
      };
      std::fs::write(dir.join(name), format!("{} compiled for {}", binary, triple))?;
    }
    Ok(())
  }

  /// Pre-populate a packaged archive pair for one binary, as `package` would
  pub fn deploy_archives(&self, binary: &str, version: &str) -> Result<()> {
    let dir = self.path.join("deploy").join(binary);
    std::fs::create_dir_all(&dir)?;
    for triple in STANDARD_TRIPLES {
      std::fs::write(dir.join(format!("{}-{}-{}.zip", binary, version, triple)), b"zip")?;
      std::fs::write(dir.join(format!("{}-{}-{}.tar.gz", binary, version, triple)), b"tgz")?;
    }
    Ok(())
  }
}

/// Run the sn-release binary in the given directory
pub fn run_sn_release(dir: &Path, args: &[&str]) -> Result<Output> {
  Command::new(env!("CARGO_BIN_EXE_sn-release"))
    .current_dir(dir)
    .args(args)
    .output()
    .context("Failed to run sn-release")
}

pub fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
