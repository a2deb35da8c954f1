//! Integration tests for `sn-release resolve-tags`

use crate::helpers::{TestDir, run_sn_release, stderr_of, stdout_of};
use anyhow::Result;

#[test]
fn test_resolve_tags_round_trip_in_order() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_sn_release(
    &dir.path,
    &["resolve-tags", "chore(release): sn_node-v1.2.3/sn_cli-v4.5.6", "--json"],
  )?;
  assert!(output.status.success());

  let pairs: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  let pairs = pairs.as_array().unwrap();
  assert_eq!(pairs.len(), 2);
  assert_eq!(pairs[0]["component"], "sn_node");
  assert_eq!(pairs[0]["version"], "1.2.3");
  assert_eq!(pairs[1]["component"], "sn_cli");
  assert_eq!(pairs[1]["version"], "4.5.6");

  Ok(())
}

#[test]
fn test_resolve_tags_table_output() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_sn_release(&dir.path, &["resolve-tags", "chore(release): sn_cli-v0.51.1"])?;
  assert!(output.status.success());

  let stdout = stdout_of(&output);
  assert!(stdout.contains("sn_cli"));
  assert!(stdout.contains("0.51.1"));
  assert!(stdout.contains("sn_cli-v0.51.1"));

  Ok(())
}

#[test]
fn test_malformed_commit_fails_with_no_partial_list() -> Result<()> {
  let dir = TestDir::new()?;

  // Second token has no "-v": the whole resolution must fail
  let output = run_sn_release(
    &dir.path,
    &["resolve-tags", "chore(release): sn_node-v1.2.3/sn_cli4.5.6", "--json"],
  )?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr_of(&output).contains("sn_cli4.5.6"));
  // No pairs printed before the error
  assert!(!stdout_of(&output).contains("sn_node"));

  Ok(())
}

#[test]
fn test_commit_without_prefix_fails() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_sn_release(&dir.path, &["resolve-tags", "sn_node-v1.2.3"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}
