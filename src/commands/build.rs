use crate::build::toolchain::CargoToolchain;
use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use std::env;

/// Run the build command: compile and stage binaries for one platform
///
/// With no explicit binaries, every registered binary is built — packaging
/// for local testing wants the full set, including non-publishable ones.
pub fn run_build(config: &ReleaseConfig, platform: &str, binaries: Vec<String>) -> ReleaseResult<()> {
  let binaries = if binaries.is_empty() { config.binaries.names() } else { binaries };

  let workspace_root = env::current_dir()?;
  let toolchain = CargoToolchain::new(&workspace_root);

  let staged = crate::build::run_platform_build(config, platform, &binaries, &toolchain)?;

  println!(
    "\n✅ Staged {} artifact(s) for {} in {}",
    staged.len(),
    platform,
    config.staging_root.join(platform).display()
  );
  for path in &staged {
    println!("   {}", path.display());
  }

  Ok(())
}
