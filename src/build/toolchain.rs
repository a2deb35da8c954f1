//! Toolchain collaborators: native cargo and isolated cross builds
//!
//! The compiler is a black box behind the [`Toolchain`] trait: compile one
//! binary for one target, leaving an executable at a deterministic output
//! location, or fail. Tests inject a fake; production uses subprocesses.

use crate::core::error::{BuildError, ReleaseError, ReleaseResult, ResultExt};
use crate::registry::{BinarySpec, PlatformClass, TargetSpec};
use std::path::{Path, PathBuf};
use std::process::Command;

/// External build collaborator
pub trait Toolchain {
  /// Satisfy host preconditions for a target (idempotent, may be a no-op)
  fn prepare(&self, target: &TargetSpec) -> ReleaseResult<()>;

  /// Compile one binary for one target
  fn compile(&self, binary: &BinarySpec, target: &TargetSpec) -> ReleaseResult<()>;

  /// Deterministic output directory for a target's compiled files
  fn output_dir(&self, target: &TargetSpec) -> PathBuf;
}

/// Production toolchain: `cargo build` natively, `cross build` for cross targets
pub struct CargoToolchain {
  workspace_root: PathBuf,
}

impl CargoToolchain {
  pub fn new(workspace_root: &Path) -> Self {
    Self {
      workspace_root: workspace_root.to_path_buf(),
    }
  }

  fn build_program(target: &TargetSpec) -> &'static str {
    if target.cross { "cross" } else { "cargo" }
  }
}

impl Toolchain for CargoToolchain {
  fn prepare(&self, target: &TargetSpec) -> ReleaseResult<()> {
    // Native musl builds need the musl C toolchain on the host. Cross targets
    // bring their own toolchain inside the container.
    if target.class == PlatformClass::LinuxMusl && !target.cross {
      ensure_musl_tools()?;
    }
    Ok(())
  }

  fn compile(&self, binary: &BinarySpec, target: &TargetSpec) -> ReleaseResult<()> {
    let program = Self::build_program(target);

    let mut cmd = Command::new(program);
    cmd
      .current_dir(&self.workspace_root)
      .args(["build", "--release"])
      .args(["--target", &target.triple])
      .args(["--bin", &binary.name]);

    if !binary.features.is_empty() {
      cmd.args(["--features", &binary.features.join(",")]);
    }

    let output = cmd
      .output()
      .with_context(|| format!("Failed to execute {} for binary '{}'", program, binary.name))?;

    if !output.status.success() {
      return Err(ReleaseError::Build(BuildError::ToolchainFailed {
        binary: binary.name.clone(),
        platform: target.triple.clone(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }

    Ok(())
  }

  fn output_dir(&self, target: &TargetSpec) -> PathBuf {
    self.workspace_root.join("target").join(&target.triple).join("release")
  }
}

/// Ensure musl-tools is installed on the host (no-op if musl-gcc is present)
///
/// This is a documented environmental precondition for native musl builds on
/// Linux runners, not something we silently skip.
fn ensure_musl_tools() -> ReleaseResult<()> {
  if !cfg!(target_os = "linux") {
    return Err(ReleaseError::Build(BuildError::MuslSetupFailed {
      reason: "native musl builds require a Linux host".to_string(),
    }));
  }

  let probe = Command::new("musl-gcc").arg("--version").output();
  if matches!(probe, Ok(ref out) if out.status.success()) {
    return Ok(());
  }

  println!("🔧 Installing musl-tools (required for native musl builds)...");
  let output = Command::new("sudo")
    .args(["apt-get", "install", "-y", "musl-tools"])
    .output()
    .context("Failed to execute apt-get")?;

  if !output.status.success() {
    return Err(ReleaseError::Build(BuildError::MuslSetupFailed {
      reason: String::from_utf8_lossy(&output.stderr).to_string(),
    }));
  }

  Ok(())
}
