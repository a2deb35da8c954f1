//! CLI commands for sn-release
//!
//! One command per pipeline operation, each taking explicit identifiers
//! (platform, binary, version, commit message) rather than inferring them
//! from ambient state:
//!
//! - **build**: compile the requested binaries for one platform and stage them
//! - **package**: wrap one binary's staged artifacts into versioned archives
//! - **resolve-tags**: parse a release commit into (component, version) pairs
//! - **publish**: upload packaged archives to GitHub releases and S3
//!
//! Commands that touch the tables accept `&ReleaseConfig` so they stay
//! injectable; resolve-tags is pure parsing and takes none.

pub mod build;
pub mod package;
pub mod publish;
pub mod tags;

pub use build::run_build;
pub use package::run_package;
pub use publish::run_publish;
pub use tags::run_resolve_tags;
