//! Release-commit parsing
//!
//! A release commit subject carries a conventional prefix followed by a
//! `/`-delimited list of `{component}-v{version}` tokens, e.g.
//!
//! ```text
//! chore(release): sn_interface-v0.6.5/sn_node-v0.58.0/sn_cli-v0.51.1
//! ```
//!
//! The tag list is atomic: one malformed token fails the whole resolution,
//! because publishing from a partially-parsed release event is unsafe. The
//! grammar is positional string splitting and deliberately isolated here so
//! it can be hardened without touching the publisher.

use crate::core::error::{ParseError, ReleaseError, ReleaseResult};
use serde::Serialize;

/// One (component, version) pair extracted from a release commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedRelease {
  pub component: String,
  pub version: String,
}

impl TaggedRelease {
  /// The git tag this pair corresponds to on the source host
  pub fn tag(&self) -> String {
    format!("{}-v{}", self.component, self.version)
  }
}

/// Parse a release commit message into ordered (component, version) pairs
///
/// Order mirrors the order tokens appear in the message; it is matched
/// against tags on the source host later and must not be resorted.
pub fn parse_release_commit(message: &str) -> ReleaseResult<Vec<TaggedRelease>> {
  // Strip the conventional prefix: everything up to and including the first ": "
  let rest = match message.split_once(": ") {
    Some((_, rest)) => rest,
    None => {
      return Err(ReleaseError::Parse(ParseError::MissingPrefix {
        message: message.to_string(),
      }));
    }
  };

  // Only the subject line carries tags; a commit body may follow
  let subject = rest.lines().next().unwrap_or("").trim();
  if subject.is_empty() {
    return Err(ReleaseError::Parse(ParseError::MissingPrefix {
      message: message.to_string(),
    }));
  }

  let mut releases = Vec::new();
  for token in subject.split('/') {
    let token = token.trim();
    // Split on the LAST "-v": component names may themselves contain "-v"
    let Some((component, version)) = token.rsplit_once("-v") else {
      return Err(ReleaseError::Parse(ParseError::MalformedToken {
        token: token.to_string(),
      }));
    };
    if component.is_empty() || version.is_empty() {
      return Err(ReleaseError::Parse(ParseError::MalformedToken {
        token: token.to_string(),
      }));
    }
    releases.push(TaggedRelease {
      component: component.to_string(),
      version: version.to_string(),
    });
  }

  Ok(releases)
}
