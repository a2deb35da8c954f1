//! Release pipeline configuration
//!
//! The target matrix and binary registry ship with built-in defaults and can
//! be overridden by a `release.toml` at the working-directory root. The
//! config is loaded once at process start and passed explicitly to every
//! component, keeping the tables injectable for tests.

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::registry::{BinaryRegistry, TargetMatrix};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory staged artifacts land in, one subdirectory per platform
pub const DEFAULT_STAGING_ROOT: &str = "artifacts";

/// Default directory packaged archives land in, one subdirectory per binary
pub const DEFAULT_OUTPUT_ROOT: &str = "deploy";

/// Configuration for sn-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Supported target triples with class and build strategy
  #[serde(default = "TargetMatrix::standard")]
  pub targets: TargetMatrix,

  /// Binary identity table (binary ↔ component ↔ bucket)
  #[serde(default = "BinaryRegistry::standard")]
  pub binaries: BinaryRegistry,

  /// Staging root for compiled artifacts
  #[serde(default = "default_staging_root")]
  pub staging_root: PathBuf,

  /// Output root for packaged archives
  #[serde(default = "default_output_root")]
  pub output_root: PathBuf,

  /// GitHub repository receiving release assets, "owner/name"
  #[serde(default = "default_repo")]
  pub repo: String,
}

fn default_staging_root() -> PathBuf {
  PathBuf::from(DEFAULT_STAGING_ROOT)
}

fn default_output_root() -> PathBuf {
  PathBuf::from(DEFAULT_OUTPUT_ROOT)
}

fn default_repo() -> String {
  "maidsafe/safe_network".to_string()
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      targets: TargetMatrix::standard(),
      binaries: BinaryRegistry::standard(),
      staging_root: default_staging_root(),
      output_root: default_output_root(),
      repo: default_repo(),
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from release.toml, falling back to the built-in tables
  pub fn load_or_default(path: &Path) -> ReleaseResult<Self> {
    let config = match Self::find_config_path(path) {
      Some(config_path) => {
        let content = fs::read_to_string(&config_path)
          .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        toml_edit::de::from_str::<ReleaseConfig>(&content)
          .with_context(|| format!("Failed to parse config from {}", config_path.display()))?
      }
      None => Self::default(),
    };

    config.validate()?;
    Ok(config)
  }

  /// Validate the loaded tables
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.targets.platforms().is_empty() {
      return Err(invalid("target matrix is empty"));
    }

    let mut triples = HashSet::new();
    for target in self.targets.platforms() {
      if !triples.insert(target.triple.as_str()) {
        return Err(invalid(format!("duplicate target triple '{}'", target.triple)));
      }
    }

    let mut names = HashSet::new();
    let mut components = HashSet::new();
    for binary in self.binaries.all() {
      if !names.insert(binary.name.as_str()) {
        return Err(invalid(format!("duplicate binary name '{}'", binary.name)));
      }
      // Many-to-one component → binary is disallowed
      if !components.insert(binary.component.as_str()) {
        return Err(invalid(format!(
          "component '{}' is mapped to more than one binary",
          binary.component
        )));
      }
      if binary.bucket.is_empty() {
        return Err(invalid(format!("binary '{}' has an empty bucket", binary.name)));
      }
      if binary.release_assets && !binary.publishable {
        return Err(invalid(format!(
          "binary '{}' is on the release-assets allow-list but not marked publishable",
          binary.name
        )));
      }
    }

    if self.repo.split('/').filter(|s| !s.is_empty()).count() != 2 {
      return Err(invalid(format!("repo '{}' is not of the form owner/name", self.repo)));
    }

    Ok(())
  }
}

fn invalid(reason: impl Into<String>) -> ReleaseError {
  ReleaseError::Config(ConfigError::Invalid { reason: reason.into() })
}
