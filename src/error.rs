//! Error types.
//!
//! The stylesheet pipeline itself degrades silently: malformed or unmatched
//! media conditions fall back to documented defaults rather than raising an
//! error, because a rewriting pass must never break an unrelated page's
//! styles. The only fallible surface is parsing externally supplied
//! configuration keywords.

use thiserror::Error;

/// Result type alias for foldcss operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the configuration boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// A fold-state keyword from the host was not one of
  /// `single-fold-horizontal`, `single-fold-vertical`, or `none`.
  #[error("unknown fold state: {0:?}")]
  UnknownFoldState(String),
}
