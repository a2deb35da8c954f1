//! Error types for sn-release with contextual messages and exit codes
//!
//! Every error names the specific identifier involved (platform, binary,
//! component, tag) and, where one exists, the valid set — a release run that
//! fails with a generic message is a bug in itself.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for sn-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Caller mistake (unknown platform/binary, malformed release commit, bad config)
  User = 1,
  /// System error (toolchain, archive I/O, upload tooling)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for sn-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors (unsupported platform, unknown binary, invalid release.toml)
  Config(ConfigError),

  /// Toolchain build errors (fatal to that platform's build)
  Build(BuildError),

  /// Packaging errors (missing artifact, unresolvable version)
  Package(PackageError),

  /// Release-commit grammar errors (fatal to the whole resolution)
  Parse(ParseError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Parse(_) => ExitCode::User,
      ReleaseError::Build(_) => ExitCode::System,
      ReleaseError::Package(_) => ExitCode::System,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Build(e) => e.help_message(),
      ReleaseError::Package(e) => e.help_message(),
      ReleaseError::Parse(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Build(e) => write!(f, "{}", e),
      ReleaseError::Package(e) => write!(f, "{}", e),
      ReleaseError::Parse(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ReleaseError {
  fn from(err: toml_edit::TomlError) -> Self {
    ReleaseError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<zip::result::ZipError> for ReleaseError {
  fn from(err: zip::result::ZipError) -> Self {
    ReleaseError::message(format!("Zip archive error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ReleaseError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ReleaseError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<std::env::VarError> for ReleaseError {
  fn from(err: std::env::VarError) -> Self {
    ReleaseError::message(format!("Environment variable error: {}", err))
  }
}

/// Convert anyhow::Error to ReleaseError (for helpers that use anyhow internally)
impl From<anyhow::Error> for ReleaseError {
  fn from(err: anyhow::Error) -> Self {
    ReleaseError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Platform triple not present in the target matrix
  UnsupportedPlatform { platform: String, supported: Vec<String> },

  /// Binary name not present in the registry
  UnknownBinary { name: String, registered: Vec<String> },

  /// release.toml failed validation
  Invalid { reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::UnsupportedPlatform { supported, .. } => Some(format!(
        "Supported platforms: {}. Add an entry under [[targets]] in release.toml to extend the matrix.",
        supported.join(", ")
      )),
      ConfigError::UnknownBinary { registered, .. } => Some(format!(
        "Registered binaries: {}. Add an entry under [[binaries]] in release.toml to register a new one.",
        registered.join(", ")
      )),
      ConfigError::Invalid { .. } => Some("Fix release.toml and re-run.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::UnsupportedPlatform { platform, .. } => {
        write!(f, "Unsupported platform '{}'", platform)
      }
      ConfigError::UnknownBinary { name, .. } => {
        write!(f, "Unknown binary '{}'", name)
      }
      ConfigError::Invalid { reason } => {
        write!(f, "Invalid release configuration: {}", reason)
      }
    }
  }
}

/// Toolchain build errors
#[derive(Debug)]
pub enum BuildError {
  /// The compiler subprocess failed for one binary
  ToolchainFailed {
    binary: String,
    platform: String,
    stderr: String,
  },

  /// The musl host precondition could not be satisfied
  MuslSetupFailed { reason: String },

  /// Toolchain output directory missing after a reported-successful build
  OutputMissing { platform: String, path: PathBuf },
}

impl BuildError {
  fn help_message(&self) -> Option<String> {
    match self {
      BuildError::ToolchainFailed { platform, .. } => Some(format!(
        "Check that the '{}' target is installed (rustup target add {0}) and that cross is available for cross targets.",
        platform
      )),
      BuildError::MuslSetupFailed { .. } => {
        Some("Install musl-tools manually: sudo apt-get install -y musl-tools".to_string())
      }
      BuildError::OutputMissing { .. } => None,
    }
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::ToolchainFailed {
        binary,
        platform,
        stderr,
      } => {
        write!(f, "Build failed for binary '{}' on platform '{}':\n{}", binary, platform, stderr)
      }
      BuildError::MuslSetupFailed { reason } => {
        write!(f, "Failed to prepare musl build environment: {}", reason)
      }
      BuildError::OutputMissing { platform, path } => {
        write!(
          f,
          "Toolchain output directory for platform '{}' not found at {}",
          platform,
          path.display()
        )
      }
    }
  }
}

/// Packaging errors
#[derive(Debug)]
pub enum PackageError {
  /// Staged artifact missing for a (binary, platform) pair
  ArtifactNotFound {
    binary: String,
    platform: String,
    path: PathBuf,
  },

  /// No version supplied and none found in the component manifest
  VersionNotFound { component: String, manifest: PathBuf },
}

impl PackageError {
  fn help_message(&self) -> Option<String> {
    match self {
      PackageError::ArtifactNotFound { binary, platform, .. } => Some(format!(
        "Run `sn-release build --platform {}` first to stage the '{}' artifact.",
        platform, binary
      )),
      PackageError::VersionNotFound { .. } => {
        Some("Pass the version explicitly with --version.".to_string())
      }
    }
  }
}

impl fmt::Display for PackageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackageError::ArtifactNotFound { binary, platform, path } => {
        write!(
          f,
          "Artifact not found for binary '{}' on platform '{}' (expected {})",
          binary,
          platform,
          path.display()
        )
      }
      PackageError::VersionNotFound { component, manifest } => {
        write!(
          f,
          "Version not found for component '{}' (no version field in {})",
          component,
          manifest.display()
        )
      }
    }
  }
}

/// Release-commit grammar errors
#[derive(Debug)]
pub enum ParseError {
  /// Commit message has no "<prefix>: " before the tag list
  MissingPrefix { message: String },

  /// A tag token has no "-v" separator or an empty side
  MalformedToken { token: String },
}

impl ParseError {
  fn help_message(&self) -> Option<String> {
    Some("Expected a release commit like: chore(release): sn_node-v1.2.3/sn_cli-v4.5.6".to_string())
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::MissingPrefix { message } => {
        write!(f, "Release commit message has no prefix terminator ': ': '{}'", message)
      }
      ParseError::MalformedToken { token } => {
        write!(f, "Malformed release tag token '{}' (expected {{component}}-v{{version}})", token)
      }
    }
  }
}

/// Result type alias for sn-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
