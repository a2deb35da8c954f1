use crate::core::error::ReleaseResult;
use crate::release::parse_release_commit;

/// Run the resolve-tags command: show the (component, version) pairs of a release commit
pub fn run_resolve_tags(commit_message: &str, json: bool) -> ReleaseResult<()> {
  let releases = parse_release_commit(commit_message)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&releases)?);
  } else {
    println!("\n🏷️  Resolved {} release tag(s)\n", releases.len());
    println!("{:<24} {:<16} TAG", "COMPONENT", "VERSION");
    println!("{:-<64}", "");
    for release in &releases {
      println!("{:<24} {:<16} {}", release.component, release.version, release.tag());
    }
    println!();
  }

  Ok(())
}
