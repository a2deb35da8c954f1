//! Publisher: filtered, dual-sink upload of packaged archives
//!
//! Takes the parsed release event, keeps only entries whose component maps to
//! a publishable binary, and uploads that binary's packaged archives to the
//! bucket sink (always) and the release sink (allow-listed binaries only).
//!
//! Unlike a platform build, a publish run continues past per-binary problems:
//! a multi-binary release should not be blocked entirely by one binary's
//! missing archives. Every outcome lands in the report and the caller decides
//! what is fatal.

pub mod sinks;

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::release::TaggedRelease;
use serde::Serialize;
use self::sinks::{BucketSink, ReleaseSink};
use std::fs;
use std::path::PathBuf;

/// Result of one sink upload for one binary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum SinkResult {
  Uploaded { destination: String },
  Failed { destination: String, error: String },
}

impl SinkResult {
  pub fn is_failure(&self) -> bool {
    matches!(self, SinkResult::Failed { .. })
  }
}

/// Per-entry publish outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PublishStatus {
  /// Component has no publishable binary (libraries in the same release commit)
  Filtered,
  /// The binary was never packaged; expected archives were absent
  SkippedNoArchives { expected_dir: PathBuf },
  /// Upload attempted; individual sinks may still have failed
  Completed { sinks: Vec<SinkResult> },
}

/// One release-event entry's outcome
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
  pub component: String,
  pub version: String,
  /// The publishable binary this component maps to, if any
  pub binary: Option<String>,
  #[serde(flatten)]
  pub status: PublishStatus,
}

/// Per-binary, per-sink report for one publish run
#[derive(Debug, Clone, Serialize, Default)]
pub struct PublishReport {
  pub outcomes: Vec<PublishOutcome>,
}

impl PublishReport {
  /// True if any binary was skipped for missing archives or had a sink failure
  pub fn has_failures(&self) -> bool {
    self.outcomes.iter().any(|o| match &o.status {
      PublishStatus::Filtered => false,
      PublishStatus::SkippedNoArchives { .. } => true,
      PublishStatus::Completed { sinks } => sinks.iter().any(SinkResult::is_failure),
    })
  }

  /// Count of entries that actually uploaded without any sink failure
  pub fn published_count(&self) -> usize {
    self
      .outcomes
      .iter()
      .filter(|o| matches!(&o.status, PublishStatus::Completed { sinks } if !sinks.iter().any(SinkResult::is_failure)))
      .count()
  }
}

/// Publish every publishable entry of a release event through both sinks
pub fn publish_release(
  config: &ReleaseConfig,
  event: &[TaggedRelease],
  release_sink: &dyn ReleaseSink,
  bucket_sink: &dyn BucketSink,
) -> ReleaseResult<PublishReport> {
  let mut report = PublishReport::default();

  for entry in event {
    let spec = config
      .binaries
      .resolve_component(&entry.component)
      .filter(|spec| spec.publishable);

    let Some(spec) = spec else {
      // Library components in the same release commit are expected, not errors
      report.outcomes.push(PublishOutcome {
        component: entry.component.clone(),
        version: entry.version.clone(),
        binary: None,
        status: PublishStatus::Filtered,
      });
      continue;
    };

    let archive_dir = config.output_root.join(&spec.name);
    let archives = list_archives(&archive_dir)?;
    if archives.is_empty() {
      report.outcomes.push(PublishOutcome {
        component: entry.component.clone(),
        version: entry.version.clone(),
        binary: Some(spec.name.clone()),
        status: PublishStatus::SkippedNoArchives {
          expected_dir: archive_dir,
        },
      });
      continue;
    }

    let mut results = Vec::new();

    // Source-host assets only for the allow-listed binaries
    if spec.release_assets {
      let tag = entry.tag();
      let destination = format!("{}@{}", config.repo, tag);
      results.push(match release_sink.upload_release_assets(&config.repo, &tag, &archives) {
        Ok(()) => SinkResult::Uploaded { destination },
        Err(e) => SinkResult::Failed {
          destination,
          error: e.to_string(),
        },
      });
    }

    // Every publishable binary goes to its bucket, allow-list or not
    let destination = format!("s3://{}", spec.bucket);
    results.push(match bucket_sink.put_objects(&spec.bucket, &archives) {
      Ok(()) => SinkResult::Uploaded { destination },
      Err(e) => SinkResult::Failed {
        destination,
        error: e.to_string(),
      },
    });

    report.outcomes.push(PublishOutcome {
      component: entry.component.clone(),
      version: entry.version.clone(),
      binary: Some(spec.name.clone()),
      status: PublishStatus::Completed { sinks: results },
    });
  }

  Ok(report)
}

/// List packaged archives for one binary, in stable name order
fn list_archives(dir: &std::path::Path) -> ReleaseResult<Vec<PathBuf>> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }

  let mut archives: Vec<PathBuf> = fs::read_dir(dir)
    .with_context(|| format!("Failed to read archive directory {}", dir.display()))?
    .collect::<Result<Vec<_>, _>>()
    .with_context(|| format!("Failed to read archive directory {}", dir.display()))?
    .into_iter()
    .map(|e| e.path())
    .filter(|p| p.is_file())
    .collect();

  archives.sort();
  Ok(archives)
}
