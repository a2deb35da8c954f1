use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::publish::sinks::{DryRunSink, GhReleaseSink, S3BucketSink};
use crate::publish::{PublishReport, PublishStatus, SinkResult, publish_release};
use crate::release::parse_release_commit;

/// Run the publish command: parse the release commit, upload packaged archives
pub fn run_publish(config: &ReleaseConfig, commit_message: &str, dry_run: bool, json: bool) -> ReleaseResult<()> {
  let event = parse_release_commit(commit_message)?;

  let report = if dry_run {
    let sink = DryRunSink::default();
    publish_release(config, &event, &sink, &sink)?
  } else {
    publish_release(config, &event, &GhReleaseSink, &S3BucketSink)?
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_report(&report, dry_run);
  }

  // The publisher itself never aborts mid-run; fatality is decided here
  if report.has_failures() {
    return Err(ReleaseError::with_help(
      "Publish completed with failures (see report above)",
      "Package any skipped binaries and re-run; uploads are idempotent and will overwrite.",
    ));
  }

  Ok(())
}

/// Print the per-binary, per-sink report
fn print_report(report: &PublishReport, dry_run: bool) {
  let headline = if dry_run { "Publish plan" } else { "Publish report" };
  println!("\n🚀 {}\n", headline);

  for outcome in &report.outcomes {
    let binary = outcome.binary.as_deref().unwrap_or("-");
    match &outcome.status {
      PublishStatus::Filtered => {
        println!("   ⏭️  {}-v{}: no publishable binary, filtered", outcome.component, outcome.version);
      }
      PublishStatus::SkippedNoArchives { expected_dir } => {
        println!(
          "   ⚠️  {} ({}-v{}): no packaged archives at {}",
          binary,
          outcome.component,
          outcome.version,
          expected_dir.display()
        );
      }
      PublishStatus::Completed { sinks } => {
        for sink in sinks {
          match sink {
            SinkResult::Uploaded { destination } => {
              println!("   ✅ {} → {}", binary, destination);
            }
            SinkResult::Failed { destination, error } => {
              println!("   ❌ {} → {}: {}", binary, destination, error);
            }
          }
        }
      }
    }
  }

  println!("\n{} binary(ies) published, {} outcome(s) total\n", report.published_count(), report.outcomes.len());
}
