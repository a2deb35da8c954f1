//! Static release tables: the target matrix and the binary registry
//!
//! Both tables are immutable after process start. They are owned by
//! [`ReleaseConfig`](crate::core::config::ReleaseConfig) and passed explicitly
//! to every component — there is no ambient/global lookup. Anything that
//! references a platform or binary outside these tables is a hard error.

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use serde::{Deserialize, Serialize};

/// Platform class driving executable suffix and host preconditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformClass {
  Windows,
  MacOs,
  LinuxMusl,
}

impl PlatformClass {
  /// Executable file suffix for this class ("" everywhere but Windows)
  pub fn exe_suffix(self) -> &'static str {
    match self {
      PlatformClass::Windows => ".exe",
      _ => "",
    }
  }
}

/// One row of the target matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSpec {
  /// Target triple, e.g. "x86_64-unknown-linux-musl"
  pub triple: String,

  /// Platform class (table data, never inferred from the triple at call sites)
  pub class: PlatformClass,

  /// Whether this target builds through the isolated `cross` toolchain
  #[serde(default)]
  pub cross: bool,
}

/// Ordered, immutable table of supported target triples
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetMatrix {
  targets: Vec<TargetSpec>,
}

impl TargetMatrix {
  pub fn new(targets: Vec<TargetSpec>) -> Self {
    Self { targets }
  }

  /// The matrix shipped for the sn_* release pipeline
  pub fn standard() -> Self {
    Self::new(vec![
      TargetSpec {
        triple: "x86_64-pc-windows-msvc".to_string(),
        class: PlatformClass::Windows,
        cross: false,
      },
      TargetSpec {
        triple: "x86_64-apple-darwin".to_string(),
        class: PlatformClass::MacOs,
        cross: false,
      },
      TargetSpec {
        triple: "x86_64-unknown-linux-musl".to_string(),
        class: PlatformClass::LinuxMusl,
        cross: false,
      },
      TargetSpec {
        triple: "arm-unknown-linux-musleabi".to_string(),
        class: PlatformClass::LinuxMusl,
        cross: true,
      },
      TargetSpec {
        triple: "armv7-unknown-linux-musleabihf".to_string(),
        class: PlatformClass::LinuxMusl,
        cross: true,
      },
      TargetSpec {
        triple: "aarch64-unknown-linux-musl".to_string(),
        class: PlatformClass::LinuxMusl,
        cross: true,
      },
    ])
  }

  /// All targets in fixed declaration order (deterministic packaging/upload order)
  pub fn platforms(&self) -> &[TargetSpec] {
    &self.targets
  }

  /// Membership test
  pub fn is_supported(&self, platform: &str) -> bool {
    self.targets.iter().any(|t| t.triple == platform)
  }

  /// Look up a platform's spec, failing with the offending value and the supported set
  pub fn spec(&self, platform: &str) -> ReleaseResult<&TargetSpec> {
    self.targets.iter().find(|t| t.triple == platform).ok_or_else(|| {
      ReleaseError::Config(ConfigError::UnsupportedPlatform {
        platform: platform.to_string(),
        supported: self.triples(),
      })
    })
  }

  /// All triples, for error messages
  pub fn triples(&self) -> Vec<String> {
    self.targets.iter().map(|t| t.triple.clone()).collect()
  }
}

/// One row of the binary registry
///
/// The compiled-output name (`name`), the versionable source crate
/// (`component`) and the S3 bucket are an explicit identity mapping; nothing
/// downstream is allowed to derive one from another by string similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinarySpec {
  /// Public binary name as produced by the toolchain
  pub name: String,

  /// The crate that versions this binary
  pub component: String,

  /// S3 bucket receiving this binary's archives
  pub bucket: String,

  /// Non-default cargo features required by this binary's build
  #[serde(default)]
  pub features: Vec<String>,

  /// Explicit opt-in to release distribution; registered-but-unpublishable
  /// binaries exist for local packaging and testing only
  #[serde(default)]
  pub publishable: bool,

  /// Whether archives also go to GitHub release assets. Kept independent of
  /// `publishable`: not every publishable binary distributes through the
  /// source host, all of them distribute through S3.
  #[serde(default)]
  pub release_assets: bool,
}

/// Immutable binary identity table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinaryRegistry {
  binaries: Vec<BinarySpec>,
}

impl BinaryRegistry {
  pub fn new(binaries: Vec<BinarySpec>) -> Self {
    Self { binaries }
  }

  /// The registry shipped for the sn_* release pipeline
  pub fn standard() -> Self {
    Self::new(vec![
      BinarySpec {
        name: "safe".to_string(),
        component: "sn_cli".to_string(),
        bucket: "sn-cli".to_string(),
        features: vec![],
        publishable: true,
        release_assets: true,
      },
      BinarySpec {
        name: "sn_node".to_string(),
        component: "sn_node".to_string(),
        bucket: "sn-node".to_string(),
        features: vec!["network-contacts".to_string()],
        publishable: true,
        release_assets: true,
      },
      // Local network harness: packaged for developers, never released.
      BinarySpec {
        name: "testnet".to_string(),
        component: "sn_testnet".to_string(),
        bucket: "sn-testnet".to_string(),
        features: vec![],
        publishable: false,
        release_assets: false,
      },
    ])
  }

  /// All registered binaries in declaration order
  pub fn all(&self) -> &[BinarySpec] {
    &self.binaries
  }

  /// Look up a binary by its public name, failing with the input and the registered names
  pub fn resolve(&self, name: &str) -> ReleaseResult<&BinarySpec> {
    self.binaries.iter().find(|b| b.name == name).ok_or_else(|| {
      ReleaseError::Config(ConfigError::UnknownBinary {
        name: name.to_string(),
        registered: self.names(),
      })
    })
  }

  /// Reverse lookup from component to binary. None is not an error: library
  /// components legitimately have no binary and are filtered by the publisher.
  pub fn resolve_component(&self, component: &str) -> Option<&BinarySpec> {
    self.binaries.iter().find(|b| b.component == component)
  }

  /// The strict subset of binaries eligible for release distribution
  pub fn publishable(&self) -> impl Iterator<Item = &BinarySpec> {
    self.binaries.iter().filter(|b| b.publishable)
  }

  /// All registered names, for error messages
  pub fn names(&self) -> Vec<String> {
    self.binaries.iter().map(|b| b.name.clone()).collect()
  }
}
