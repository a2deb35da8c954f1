use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::package::package_binary;
use std::env;

/// Run the package command: archive one binary's staged artifacts
pub fn run_package(config: &ReleaseConfig, binary: &str, version: Option<String>, json: bool) -> ReleaseResult<()> {
  let workspace_root = env::current_dir()?;
  let archives = package_binary(config, binary, version, &workspace_root)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&archives)?);
  } else {
    println!(
      "\n📦 Packaged {} archive(s) for '{}' in {}",
      archives.len(),
      binary,
      config.output_root.join(binary).display()
    );
    for path in &archives {
      println!("   {}", path.display());
    }
  }

  Ok(())
}
