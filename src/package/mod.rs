//! Packager: staged artifacts in, versioned platform-tagged archives out
//!
//! For every platform in target-matrix order the staged executable is wrapped
//! into exactly two archives named `{binary}-{version}-{platform}.zip` and
//! `.tar.gz`. The per-binary output directory is cleared first, so re-running
//! packaging always yields an identical archive set, never a superset.

pub mod archive;

use crate::core::config::ReleaseConfig;
use crate::core::error::{PackageError, ReleaseError, ReleaseResult, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Package one binary at one version across the whole target matrix
///
/// `version` may be omitted, in which case it is read from the component's
/// manifest under `workspace_root`. Returns the archive paths in matrix
/// order, zip before tar.gz per platform.
pub fn package_binary(
  config: &ReleaseConfig,
  binary: &str,
  version: Option<String>,
  workspace_root: &Path,
) -> ReleaseResult<Vec<PathBuf>> {
  let spec = config.binaries.resolve(binary)?;

  let version = match version {
    Some(v) => v,
    None => read_component_version(workspace_root, &spec.component)?,
  };
  semver::Version::parse(&version)
    .map_err(|e| ReleaseError::message(format!("Invalid version '{}' for binary '{}': {}", version, binary, e)))?;

  // Fresh output directory: regeneration replaces, never merges
  let out_dir = config.output_root.join(&spec.name);
  if out_dir.exists() {
    fs::remove_dir_all(&out_dir).with_context(|| format!("Failed to clear output directory {}", out_dir.display()))?;
  }
  fs::create_dir_all(&out_dir).with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

  let mut archives = Vec::new();
  for target in config.targets.platforms() {
    let exe_name = format!("{}{}", spec.name, target.class.exe_suffix());
    let artifact = config.staging_root.join(&target.triple).join(&exe_name);

    if !artifact.is_file() {
      return Err(ReleaseError::Package(PackageError::ArtifactNotFound {
        binary: spec.name.clone(),
        platform: target.triple.clone(),
        path: artifact,
      }));
    }

    let stem = format!("{}-{}-{}", spec.name, version, target.triple);

    let zip_path = out_dir.join(format!("{}.zip", stem));
    archive::write_zip(&artifact, &exe_name, &zip_path)?;
    archives.push(zip_path);

    let tar_path = out_dir.join(format!("{}.tar.gz", stem));
    archive::write_tar_gz(&artifact, &exe_name, &tar_path)?;
    archives.push(tar_path);
  }

  Ok(archives)
}

/// Read a component's version from its Cargo.toml (first declared version field)
pub fn read_component_version(workspace_root: &Path, component: &str) -> ReleaseResult<String> {
  let manifest = workspace_root.join(component).join("Cargo.toml");
  let content =
    fs::read_to_string(&manifest).with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
  let doc: toml_edit::DocumentMut = content.parse()?;

  let version = doc
    .get("package")
    .and_then(|pkg| pkg.get("version"))
    .and_then(|v| v.as_str())
    .map(str::to_string)
    .filter(|v| !v.is_empty());

  version.ok_or_else(|| {
    ReleaseError::Package(PackageError::VersionNotFound {
      component: component.to_string(),
      manifest,
    })
  })
}
