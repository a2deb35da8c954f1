//! Archive writers: one zip and one gzipped tar per (binary, platform)
//!
//! Pure transformations: a staged executable plus its in-archive name in,
//! an archive file out. Deterministic given identical inputs.

use crate::core::error::{ReleaseResult, ResultExt};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io;
use std::path::Path;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Write a zip archive containing the single artifact under `entry_name`
pub fn write_zip(artifact: &Path, entry_name: &str, output: &Path) -> ReleaseResult<()> {
  let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
  let mut writer = zip::ZipWriter::new(file);

  let options = SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .unix_permissions(0o755);

  writer.start_file(entry_name, options)?;
  let mut source = File::open(artifact).with_context(|| format!("Failed to open {}", artifact.display()))?;
  io::copy(&mut source, &mut writer).with_context(|| format!("Failed to write {}", output.display()))?;
  writer.finish()?;

  Ok(())
}

/// Write a tar.gz archive containing the single artifact under `entry_name`
pub fn write_tar_gz(artifact: &Path, entry_name: &str, output: &Path) -> ReleaseResult<()> {
  let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
  let encoder = GzEncoder::new(file, Compression::default());
  let mut builder = tar::Builder::new(encoder);

  builder
    .append_path_with_name(artifact, entry_name)
    .with_context(|| format!("Failed to write {}", output.display()))?;
  builder
    .into_inner()
    .and_then(|encoder| encoder.finish())
    .with_context(|| format!("Failed to finish {}", output.display()))?;

  Ok(())
}
