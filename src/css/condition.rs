//! Classification and rewriting of media-condition text.
//!
//! A "condition" here is the text between `@media` and the opening brace of
//! its block, e.g. `@media screen and (spanning: none) and (min-width: 900px)`.
//! Classification extracts the extension feature's value; rewriting removes
//! the extension feature so the rest of the condition stays a valid media
//! query on engines that know nothing about folds.

use crate::error::Error;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// The `spanning` media-feature keyword.
pub const SPANNING_KEY: &str = "spanning";
/// Substring shared by both viewport-segment media-feature names.
pub const VIEWPORT_SEG_KEY: &str = "-viewport-segments";

const FOLD_STATE_HOR: &str = "single-fold-horizontal";
const FOLD_STATE_VER: &str = "single-fold-vertical";
const FOLD_STATE_NONE: &str = "none";

fn regex(pattern: &'static str, desc: &'static str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|err| panic!("invalid {desc} regex: {err}"))
}

/// Device hinge orientation relative to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FoldState {
  /// Hinge splits the viewport top/bottom: `(spanning: single-fold-horizontal)`.
  SingleFoldHorizontal,
  /// Hinge splits the viewport left/right: `(spanning: single-fold-vertical)`.
  SingleFoldVertical,
  /// Flat device or no hinge over content: `(spanning: none)`.
  #[default]
  None,
}

impl FoldState {
  /// The wire-format keyword for this state.
  pub fn as_str(self) -> &'static str {
    match self {
      FoldState::SingleFoldHorizontal => FOLD_STATE_HOR,
      FoldState::SingleFoldVertical => FOLD_STATE_VER,
      FoldState::None => FOLD_STATE_NONE,
    }
  }
}

impl fmt::Display for FoldState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for FoldState {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s.trim() {
      FOLD_STATE_HOR => Ok(FoldState::SingleFoldHorizontal),
      FOLD_STATE_VER => Ok(FoldState::SingleFoldVertical),
      FOLD_STATE_NONE => Ok(FoldState::None),
      other => Err(Error::UnknownFoldState(other.to_string())),
    }
  }
}

/// Segment counts along each axis, as declared in a media condition.
///
/// An axis absent from the condition defaults to 1 (a single segment), not 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentCounts {
  /// Value of `vertical-viewport-segments`.
  pub vertical: u32,
  /// Value of `horizontal-viewport-segments`.
  pub horizontal: u32,
}

impl Default for SegmentCounts {
  fn default() -> Self {
    Self {
      vertical: 1,
      horizontal: 1,
    }
  }
}

/// Extracts the fold state declared in a media condition.
///
/// Scans for the literal sub-value keywords; when both appear, vertical wins.
/// A condition mentioning `spanning` with no recognized sub-value classifies
/// as [`FoldState::None`] — a defined fallback, not an error.
///
/// # Examples
///
/// ```
/// use foldcss::css::condition::{classify_fold, FoldState};
///
/// let cond = "@media (spanning: single-fold-horizontal) and (min-width: 900px)";
/// assert_eq!(classify_fold(cond), FoldState::SingleFoldHorizontal);
/// assert_eq!(classify_fold("@media (spanning: none)"), FoldState::None);
/// ```
pub fn classify_fold(condition: &str) -> FoldState {
  let mut state = FoldState::None;
  if condition.contains(FOLD_STATE_HOR) {
    state = FoldState::SingleFoldHorizontal;
  }
  if condition.contains(FOLD_STATE_VER) {
    state = FoldState::SingleFoldVertical;
  }
  state
}

/// Extracts the per-axis segment counts declared in a media condition.
///
/// # Examples
///
/// ```
/// use foldcss::css::condition::segment_counts;
///
/// let counts = segment_counts("@media (horizontal-viewport-segments: 2)");
/// assert_eq!(counts.vertical, 1);
/// assert_eq!(counts.horizontal, 2);
/// ```
pub fn segment_counts(condition: &str) -> SegmentCounts {
  static HORIZONTAL: OnceLock<Regex> = OnceLock::new();
  static VERTICAL: OnceLock<Regex> = OnceLock::new();
  let horizontal = HORIZONTAL.get_or_init(|| {
    regex(
      r"(?i)horizontal-viewport-segments:\s*(\d+)",
      "horizontal segment count",
    )
  });
  let vertical = VERTICAL.get_or_init(|| {
    regex(
      r"(?i)vertical-viewport-segments:\s*(\d+)",
      "vertical segment count",
    )
  });

  let axis = |pattern: &Regex| {
    pattern
      .captures(condition)
      .and_then(|caps| caps.get(1))
      .and_then(|m| m.as_str().parse().ok())
      .unwrap_or(1)
  };

  SegmentCounts {
    vertical: axis(vertical),
    horizontal: axis(horizontal),
  }
}

fn media_types_pattern() -> &'static Regex {
  static TYPES: OnceLock<Regex> = OnceLock::new();
  TYPES.get_or_init(|| regex(r"(?i)@media[^(]*", "media types"))
}

fn media_features_pattern() -> &'static Regex {
  static FEATURES: OnceLock<Regex> = OnceLock::new();
  FEATURES.get_or_init(|| regex(r"\([^)]*\)", "media features"))
}

/// Returns `@media` plus the media-type tokens that follow it, up to the
/// first feature parenthesis.
pub fn media_type_prefix(condition: &str) -> String {
  media_types_pattern()
    .find(condition)
    .map(|m| m.as_str().to_string())
    .unwrap_or_default()
}

/// Returns the parenthesized feature groups of a condition, parentheses
/// included, e.g. `["(spanning: none)", "(min-width: 900px)"]`.
pub fn media_features(condition: &str) -> Vec<String> {
  media_features_pattern()
    .find_iter(condition)
    .map(|m| m.as_str().to_string())
    .collect()
}

/// Rebuilds a condition with every feature group containing `keyword`
/// removed; remaining groups are joined with `" and "`.
///
/// When removal leaves no feature groups the result is media-type-only, with
/// no dangling `and` and no empty parentheses.
///
/// # Examples
///
/// ```
/// use foldcss::css::condition::{strip_feature, SPANNING_KEY};
///
/// let cond = "@media (spanning: single-fold-horizontal) and (min-width: 900px)";
/// assert_eq!(strip_feature(cond, SPANNING_KEY), "@media (min-width: 900px)");
/// assert_eq!(strip_feature("@media screen and (spanning: none)", SPANNING_KEY), "@media screen");
/// ```
pub fn strip_feature(condition: &str, keyword: &str) -> String {
  let prefix = media_type_prefix(condition);
  let kept = media_features(condition)
    .into_iter()
    .filter(|feature| !feature.contains(keyword))
    .collect::<Vec<_>>();
  if kept.is_empty() {
    // Media-type-only: drop the combinator or comma that used to join the
    // types to the removed feature list.
    let mut prefix = prefix.trim_end();
    if let Some(types) = prefix.strip_suffix(',') {
      prefix = types.trim_end();
    } else if prefix.len() >= 4
      && prefix.as_bytes()[prefix.len() - 4..].eq_ignore_ascii_case(b" and")
    {
      prefix = prefix[..prefix.len() - 4].trim_end();
    }
    prefix.to_string()
  } else {
    format!("{}{}", prefix, kept.join(" and "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vertical_wins_when_both_sub_values_present() {
    let cond = "@media (spanning: single-fold-horizontal), (spanning: single-fold-vertical)";
    assert_eq!(classify_fold(cond), FoldState::SingleFoldVertical);
  }

  #[test]
  fn spanning_without_recognized_value_defaults_to_none() {
    assert_eq!(classify_fold("@media (spanning: dual-fold)"), FoldState::None);
    assert_eq!(classify_fold("@media screen"), FoldState::None);
  }

  #[test]
  fn fold_state_round_trips_through_keywords() {
    for state in [
      FoldState::SingleFoldHorizontal,
      FoldState::SingleFoldVertical,
      FoldState::None,
    ] {
      assert_eq!(state.as_str().parse::<FoldState>().unwrap(), state);
    }
    assert!("folded".parse::<FoldState>().is_err());
  }

  #[test]
  fn segment_counts_default_each_axis_independently() {
    let counts = segment_counts("@media (vertical-viewport-segments: 3)");
    assert_eq!(counts.vertical, 3);
    assert_eq!(counts.horizontal, 1);

    let counts = segment_counts(
      "@media (horizontal-viewport-segments:2) and (vertical-viewport-segments: 2)",
    );
    assert_eq!(counts.vertical, 2);
    assert_eq!(counts.horizontal, 2);

    assert_eq!(segment_counts("@media screen"), SegmentCounts::default());
  }

  #[test]
  fn media_type_prefix_covers_all_types() {
    let cond = "@media screen and (spanning: none)";
    assert_eq!(media_type_prefix(cond), "@media screen and ");
    assert_eq!(media_type_prefix("@media (spanning: none)"), "@media ");
  }

  #[test]
  fn media_features_keep_their_parentheses() {
    let features = media_features("@media type (spanning: none) and (min-width: 900px)");
    assert_eq!(features, vec!["(spanning: none)", "(min-width: 900px)"]);
    assert!(media_features("@media type").is_empty());
  }

  #[test]
  fn strip_feature_with_nothing_left_is_type_only() {
    assert_eq!(
      strip_feature("@media (spanning: single-fold-vertical)", SPANNING_KEY),
      "@media"
    );
  }

  #[test]
  fn strip_feature_drops_dangling_and_after_types() {
    assert_eq!(
      strip_feature("@media screen and (spanning: none)", SPANNING_KEY),
      "@media screen"
    );
  }

  #[test]
  fn strip_feature_drops_dangling_comma_after_types() {
    assert_eq!(
      strip_feature("@media screen, (spanning: none)", SPANNING_KEY),
      "@media screen"
    );
    assert_eq!(
      strip_feature("@media screen And (spanning: none)", SPANNING_KEY),
      "@media screen"
    );
  }

  #[test]
  fn strip_feature_keeps_cooccurring_features() {
    let cond = "@media (horizontal-viewport-segments: 2) and (min-width: 600px)";
    assert_eq!(
      strip_feature(cond, VIEWPORT_SEG_KEY),
      "@media (min-width: 600px)"
    );
  }
}
