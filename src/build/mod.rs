//! Toolchain dispatcher: the per-platform build matrix
//!
//! Given one platform and an ordered list of binaries, decides the build
//! strategy from the target matrix entry, invokes the toolchain once per
//! binary, and collects the produced executables into a flat staging
//! directory per platform. Any single binary failure fails the whole
//! platform build — a platform never publishes a partial artifact set.

pub mod toolchain;

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::registry::TargetSpec;
use std::fs;
use std::path::{Path, PathBuf};
use self::toolchain::Toolchain;

/// Build every requested binary for one platform and stage the artifacts
///
/// Returns the staged file paths. The staging directory for the platform is
/// recreated from scratch so a failed earlier run cannot leak stale files.
pub fn run_platform_build(
  config: &ReleaseConfig,
  platform: &str,
  binaries: &[String],
  toolchain: &dyn Toolchain,
) -> ReleaseResult<Vec<PathBuf>> {
  let target = config.targets.spec(platform)?;

  // Resolve every binary up front so an unknown name fails before any build starts
  let specs = binaries
    .iter()
    .map(|name| config.binaries.resolve(name))
    .collect::<ReleaseResult<Vec<_>>>()?;

  toolchain.prepare(target)?;

  for spec in &specs {
    println!("🔨 Building '{}' for {}...", spec.name, target.triple);
    toolchain.compile(spec, target)?;
  }

  let staging_dir = config.staging_root.join(platform);
  stage_artifacts(&toolchain.output_dir(target), &staging_dir, target)
}

/// Copy artifact files from the toolchain output directory into staging
///
/// Lock and metadata files the toolchain leaves next to executables are not
/// artifacts and are excluded.
fn stage_artifacts(output_dir: &Path, staging_dir: &Path, target: &TargetSpec) -> ReleaseResult<Vec<PathBuf>> {
  use crate::core::error::{BuildError, ReleaseError};

  if !output_dir.is_dir() {
    return Err(ReleaseError::Build(BuildError::OutputMissing {
      platform: target.triple.clone(),
      path: output_dir.to_path_buf(),
    }));
  }

  if staging_dir.exists() {
    fs::remove_dir_all(staging_dir)
      .with_context(|| format!("Failed to clear staging directory {}", staging_dir.display()))?;
  }
  fs::create_dir_all(staging_dir)
    .with_context(|| format!("Failed to create staging directory {}", staging_dir.display()))?;

  let mut staged = Vec::new();
  let mut entries: Vec<_> = fs::read_dir(output_dir)
    .with_context(|| format!("Failed to read toolchain output {}", output_dir.display()))?
    .collect::<Result<_, _>>()
    .with_context(|| format!("Failed to read toolchain output {}", output_dir.display()))?;
  entries.sort_by_key(|e| e.file_name());

  for entry in entries {
    let path = entry.path();
    if !path.is_file() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().to_string();
    if !is_artifact_file(&name) {
      continue;
    }

    let dest = staging_dir.join(&name);
    fs::copy(&path, &dest).with_context(|| format!("Failed to stage {}", path.display()))?;
    staged.push(dest);
  }

  Ok(staged)
}

/// Filter for files the toolchain emits that are actual artifacts
fn is_artifact_file(name: &str) -> bool {
  if name.starts_with('.') {
    return false;
  }
  const METADATA_EXTENSIONS: [&str; 4] = [".d", ".pdb", ".rlib", ".rmeta"];
  !METADATA_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
