//! Integration tests for `sn-release publish --dry-run`
//!
//! Dry-run exercises the full filter/report path with no-op sinks, so these
//! tests never need gh, aws, or network access.

use crate::helpers::{TestDir, run_sn_release, stderr_of, stdout_of};
use anyhow::Result;

#[test]
fn test_dry_run_publishes_only_publishable_components() -> Result<()> {
  let dir = TestDir::new()?;
  dir.deploy_archives("safe", "0.51.1")?;
  dir.deploy_archives("sn_node", "0.58.0")?;

  let output = run_sn_release(
    &dir.path,
    &[
      "publish",
      "chore(release): sn_interface-v0.6.5/sn_node-v0.58.0/sn_cli-v0.51.1",
      "--dry-run",
      "--json",
    ],
  )?;
  assert!(output.status.success(), "stderr: {}", stderr_of(&output));

  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  let outcomes = report["outcomes"].as_array().unwrap();
  assert_eq!(outcomes.len(), 3);
  // Library component filtered, binaries published, order preserved
  assert_eq!(outcomes[0]["component"], "sn_interface");
  assert_eq!(outcomes[0]["status"], "filtered");
  assert_eq!(outcomes[1]["binary"], "sn_node");
  assert_eq!(outcomes[1]["status"], "completed");
  assert_eq!(outcomes[2]["binary"], "safe");
  assert_eq!(outcomes[2]["status"], "completed");

  Ok(())
}

#[test]
fn test_publish_with_missing_archives_reports_skip_and_fails_run() -> Result<()> {
  let dir = TestDir::new()?;
  // sn_node packaged, sn_cli not
  dir.deploy_archives("sn_node", "0.58.0")?;

  let output = run_sn_release(
    &dir.path,
    &["publish", "chore(release): sn_node-v0.58.0/sn_cli-v0.51.1", "--dry-run"],
  )?;

  // The run continues past the missing archives but exits non-zero overall
  assert!(!output.status.success());
  let stdout = stdout_of(&output);
  assert!(stdout.contains("sn_node"));
  assert!(stdout.contains("no packaged archives"));

  Ok(())
}

#[test]
fn test_publish_rejects_malformed_commit_before_any_upload() -> Result<()> {
  let dir = TestDir::new()?;
  dir.deploy_archives("safe", "0.51.1")?;

  let output = run_sn_release(&dir.path, &["publish", "chore(release): sn_cli0.51.1", "--dry-run"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr_of(&output).contains("sn_cli0.51.1"));

  Ok(())
}

#[test]
fn test_publish_rejects_bad_repo_override() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_sn_release(
    &dir.path,
    &[
      "publish",
      "chore(release): sn_cli-v0.51.1",
      "--repo",
      "not-a-repo",
      "--dry-run",
    ],
  )?;
  assert!(!output.status.success());
  assert!(stderr_of(&output).contains("not-a-repo"));

  Ok(())
}
