//! Integration tests for `sn-release package` and build-input validation

use crate::helpers::{STANDARD_TRIPLES, TestDir, run_sn_release, stderr_of};
use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

fn deployed_names(dir: &Path) -> BTreeSet<String> {
  fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
    .collect()
}

#[test]
fn test_package_produces_archive_pair_per_platform() -> Result<()> {
  let dir = TestDir::new()?;
  dir.stage_all_platforms("safe")?;

  let output = run_sn_release(&dir.path, &["package", "safe", "--version", "0.90.0"])?;
  assert!(output.status.success(), "stderr: {}", stderr_of(&output));

  let deploy = dir.path.join("deploy").join("safe");
  let names = deployed_names(&deploy);
  assert_eq!(names.len(), STANDARD_TRIPLES.len() * 2);
  assert!(names.contains("safe-0.90.0-x86_64-pc-windows-msvc.zip"));
  assert!(names.contains("safe-0.90.0-x86_64-pc-windows-msvc.tar.gz"));
  assert!(names.contains("safe-0.90.0-aarch64-unknown-linux-musl.zip"));

  // The windows zip carries the exe-suffixed executable
  let zip_path = deploy.join("safe-0.90.0-x86_64-pc-windows-msvc.zip");
  let mut archive = zip::ZipArchive::new(fs::File::open(&zip_path)?)?;
  assert_eq!(archive.len(), 1);
  assert_eq!(archive.by_index(0)?.name(), "safe.exe");

  Ok(())
}

#[test]
fn test_repackaging_replaces_rather_than_accumulates() -> Result<()> {
  let dir = TestDir::new()?;
  dir.stage_all_platforms("safe")?;

  run_sn_release(&dir.path, &["package", "safe", "--version", "0.90.0"])?;
  let deploy = dir.path.join("deploy").join("safe");
  let first = deployed_names(&deploy);

  fs::write(deploy.join("safe-0.89.0-x86_64-apple-darwin.zip"), b"stale")?;

  let output = run_sn_release(&dir.path, &["package", "safe", "--version", "0.90.0"])?;
  assert!(output.status.success());

  let second = deployed_names(&deploy);
  assert_eq!(first, second);

  Ok(())
}

#[test]
fn test_missing_platform_artifact_is_a_hard_error() -> Result<()> {
  let dir = TestDir::new()?;
  dir.stage_all_platforms("safe")?;
  fs::remove_file(dir.path.join("artifacts").join("x86_64-apple-darwin").join("safe"))?;

  let output = run_sn_release(&dir.path, &["package", "safe", "--version", "0.90.0"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2));
  let stderr = stderr_of(&output);
  assert!(stderr.contains("safe"));
  assert!(stderr.contains("x86_64-apple-darwin"));

  Ok(())
}

#[test]
fn test_unknown_binary_names_registered_set() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_sn_release(&dir.path, &["package", "mystery", "--version", "1.0.0"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = stderr_of(&output);
  assert!(stderr.contains("mystery"));
  assert!(stderr.contains("safe"));
  assert!(stderr.contains("sn_node"));

  Ok(())
}

#[test]
fn test_package_version_from_component_manifest() -> Result<()> {
  let dir = TestDir::new()?;
  dir.stage_all_platforms("safe")?;
  let crate_dir = dir.path.join("sn_cli");
  fs::create_dir_all(&crate_dir)?;
  fs::write(
    crate_dir.join("Cargo.toml"),
    "[package]\nname = \"sn_cli\"\nversion = \"0.51.1\"\n",
  )?;

  let output = run_sn_release(&dir.path, &["package", "safe"])?;
  assert!(output.status.success(), "stderr: {}", stderr_of(&output));
  assert!(
    dir
      .path
      .join("deploy")
      .join("safe")
      .join("safe-0.51.1-x86_64-apple-darwin.zip")
      .exists()
  );

  Ok(())
}

#[test]
fn test_build_rejects_unsupported_platform_before_any_toolchain_run() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_sn_release(&dir.path, &["build", "--platform", "sparc-sun-solaris"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = stderr_of(&output);
  assert!(stderr.contains("sparc-sun-solaris"));
  assert!(stderr.contains("x86_64-unknown-linux-musl"));

  Ok(())
}

#[test]
fn test_release_toml_overrides_tables() -> Result<()> {
  let dir = TestDir::new()?;
  fs::write(
    dir.path.join("release.toml"),
    r#"
[[targets]]
triple = "x86_64-apple-darwin"
class = "mac-os"

[[binaries]]
name = "safe"
component = "sn_cli"
bucket = "sn-cli"
publishable = true
"#,
  )?;
  let staging = dir.path.join("artifacts").join("x86_64-apple-darwin");
  fs::create_dir_all(&staging)?;
  fs::write(staging.join("safe"), b"compiled")?;

  let output = run_sn_release(&dir.path, &["package", "safe", "--version", "1.0.0"])?;
  assert!(output.status.success(), "stderr: {}", stderr_of(&output));

  // Only the single configured platform was packaged
  let names = deployed_names(&dir.path.join("deploy").join("safe"));
  assert_eq!(names.len(), 2);
  assert!(names.contains("safe-1.0.0-x86_64-apple-darwin.zip"));

  Ok(())
}
