//! Upload sinks: GitHub release assets and S3 buckets
//!
//! Both destinations are subprocess-backed (`gh` and `aws`), behind traits so
//! the publisher can be exercised with recording fakes and `--dry-run` can
//! plan without network access. Uploads overwrite on re-run rather than
//! duplicating.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source-hosting sink: archives attached to an existing release tag
pub trait ReleaseSink {
  /// Upload files as assets of `tag` in `repo`. Fails if the tag does not exist.
  fn upload_release_assets(&self, repo: &str, tag: &str, files: &[PathBuf]) -> ReleaseResult<()>;
}

/// Object-storage sink: archives uploaded under their file name as key
pub trait BucketSink {
  /// Put each file into `bucket` with public-read ACL, overwriting existing keys
  fn put_objects(&self, bucket: &str, files: &[PathBuf]) -> ReleaseResult<()>;
}

/// GitHub releases via the gh CLI
pub struct GhReleaseSink;

impl ReleaseSink for GhReleaseSink {
  fn upload_release_assets(&self, repo: &str, tag: &str, files: &[PathBuf]) -> ReleaseResult<()> {
    let mut cmd = Command::new("gh");
    cmd
      .args(["release", "upload", tag])
      .args(files)
      .args(["--repo", repo])
      // Re-uploading the same asset replaces it
      .arg("--clobber");

    let output = cmd
      .output()
      .with_context(|| format!("Failed to execute gh release upload for tag '{}'", tag))?;

    if !output.status.success() {
      return Err(ReleaseError::message(format!(
        "gh release upload failed for tag '{}' in {}: {}",
        tag,
        repo,
        String::from_utf8_lossy(&output.stderr).trim()
      )));
    }

    Ok(())
  }
}

/// S3 via the aws CLI
pub struct S3BucketSink;

impl BucketSink for S3BucketSink {
  fn put_objects(&self, bucket: &str, files: &[PathBuf]) -> ReleaseResult<()> {
    for file in files {
      let key = object_key(file)?;
      let destination = format!("s3://{}/{}", bucket, key);

      let output = Command::new("aws")
        .args(["s3", "cp"])
        .arg(file)
        .arg(&destination)
        .args(["--acl", "public-read"])
        .output()
        .with_context(|| format!("Failed to execute aws s3 cp for {}", destination))?;

      if !output.status.success() {
        return Err(ReleaseError::message(format!(
          "aws s3 cp failed for {}: {}",
          destination,
          String::from_utf8_lossy(&output.stderr).trim()
        )));
      }
    }

    Ok(())
  }
}

/// Archive file name, used as the object key
fn object_key(file: &Path) -> ReleaseResult<String> {
  file
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .ok_or_else(|| ReleaseError::message(format!("Archive path has no file name: {}", file.display())))
}

/// Dry-run sink pair: records what would be uploaded, touches nothing
///
/// The publish report renders the plan; recording here stays silent so
/// `--json` output is not interleaved with plan lines.
#[derive(Default)]
pub struct DryRunSink {
  pub release_uploads: RefCell<Vec<(String, String, Vec<PathBuf>)>>,
  pub bucket_uploads: RefCell<Vec<(String, Vec<PathBuf>)>>,
}

impl ReleaseSink for DryRunSink {
  fn upload_release_assets(&self, repo: &str, tag: &str, files: &[PathBuf]) -> ReleaseResult<()> {
    self
      .release_uploads
      .borrow_mut()
      .push((repo.to_string(), tag.to_string(), files.to_vec()));
    Ok(())
  }
}

impl BucketSink for DryRunSink {
  fn put_objects(&self, bucket: &str, files: &[PathBuf]) -> ReleaseResult<()> {
    self.bucket_uploads.borrow_mut().push((bucket.to_string(), files.to_vec()));
    Ok(())
  }
}
