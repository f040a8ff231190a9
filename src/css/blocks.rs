//! Media-block extraction from raw stylesheet text.
//!
//! This module intentionally uses a single-pass text scan instead of a full
//! CSS parser. It is designed for stylesheet rewriting where "good enough"
//! coverage is preferable to strict spec parsing: comments and strings that
//! contain stray braces are not guaranteed to be handled.
//!
//! The scanner walks the text once, keeping an explicit brace-depth counter
//! while inside a matched block, so a block of interest may contain nested
//! rule bodies (or nested at-rules such as `@supports`) and still terminate
//! at its own closing brace.

use regex::Regex;
use std::sync::OnceLock;

/// One `@media` rule recognized as containing a target feature keyword.
///
/// Produced in source order, one per matched block. The four parts, joined
/// as `leading + condition + "{" + body + trailing + "}"`, reproduce the
/// matched span of the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlockMatch {
  /// Whitespace immediately preceding the `@media` keyword.
  pub leading: String,
  /// Condition text from `@media` up to (excluding) the opening brace.
  pub condition: String,
  /// Brace-delimited body, inner braces included, trailing whitespace excluded.
  pub body: String,
  /// Whitespace between the end of the body and the closing brace.
  pub trailing: String,
}

/// Byte offsets of one matched block within the scanned text.
#[derive(Debug, Clone, Copy)]
struct BlockSpan {
  /// Start of the leading whitespace run.
  start: usize,
  /// Offset of the `@media` keyword.
  at: usize,
  /// Offset of the opening brace.
  brace: usize,
  /// Offset of the matching closing brace.
  close: usize,
}

fn regex(pattern: &'static str, desc: &'static str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|err| panic!("invalid {desc} regex: {err}"))
}

fn spanning_keyword() -> &'static Regex {
  static KEYWORD: OnceLock<Regex> = OnceLock::new();
  KEYWORD.get_or_init(|| regex(r"(?i)\bspanning\b", "spanning keyword"))
}

fn segment_keyword() -> &'static Regex {
  static KEYWORD: OnceLock<Regex> = OnceLock::new();
  KEYWORD.get_or_init(|| regex(r"(?i)\b-viewport-segments\b", "viewport-segments keyword"))
}

/// Finds the next `@media` keyword at or after `from`, case-insensitively.
fn next_at_media(text: &str, from: usize) -> Option<usize> {
  let bytes = text.as_bytes();
  let needle = b"@media";
  if bytes.len() < needle.len() {
    return None;
  }
  (from..=bytes.len() - needle.len())
    .find(|&i| bytes[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Scans `text` once and returns the spans of every `@media` block whose
/// condition matches `keyword`.
///
/// Blocks whose condition does not match are entered rather than skipped, so
/// a target block nested inside an unrelated at-rule is still found. Matched
/// spans never overlap: after recording a block the scan resumes past its
/// closing brace.
fn scan_blocks(text: &str, keyword: &Regex) -> Vec<BlockSpan> {
  let bytes = text.as_bytes();
  let mut spans = Vec::new();
  let mut pos = 0;
  let mut last_end = 0;

  while let Some(at) = next_at_media(text, pos) {
    let Some(brace_rel) = text[at..].find('{') else {
      // Malformed tail without a block; nothing more to match.
      break;
    };
    let brace = at + brace_rel;

    if !keyword.is_match(&text[at..brace]) {
      // Not a block of interest; keep scanning inside it.
      pos = brace + 1;
      continue;
    }

    // Walk the body with an explicit depth counter to find the closing brace.
    let mut depth = 1usize;
    let mut idx = brace + 1;
    while idx < bytes.len() && depth > 0 {
      match bytes[idx] {
        b'{' => depth += 1,
        b'}' => depth -= 1,
        _ => {}
      }
      idx += 1;
    }
    if depth > 0 {
      // Unbalanced input; degrade by ignoring the unterminated block.
      break;
    }
    let close = idx - 1;

    // Claim the whitespace run directly before `@media`, bounded by the end
    // of the previous match so spans stay disjoint.
    let mut start = at;
    while start > last_end && bytes[start - 1].is_ascii_whitespace() {
      start -= 1;
    }

    spans.push(BlockSpan {
      start,
      at,
      brace,
      close,
    });
    last_end = close + 1;
    pos = close + 1;
  }

  spans
}

fn matches_from_spans(text: &str, spans: &[BlockSpan]) -> Vec<MediaBlockMatch> {
  spans
    .iter()
    .map(|span| {
      let inner = &text[span.brace + 1..span.close];
      let trimmed = inner.trim_end_matches(|c: char| c.is_ascii_whitespace());
      MediaBlockMatch {
        leading: text[span.start..span.at].to_string(),
        condition: text[span.at..span.brace].to_string(),
        body: trimmed.to_string(),
        trailing: inner[trimmed.len()..].to_string(),
      }
    })
    .collect()
}

fn replace_spans(text: &str, spans: &[BlockSpan], replacement: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut cursor = 0;
  for span in spans {
    out.push_str(&text[cursor..span.start]);
    out.push_str(replacement);
    cursor = span.close + 1;
  }
  out.push_str(&text[cursor..]);
  out
}

/// Returns every `@media` block whose condition contains the `spanning`
/// feature keyword, in source order.
///
/// # Examples
///
/// ```
/// use foldcss::css::blocks::find_spanning_media_blocks;
///
/// let css = "@media (spanning: single-fold-vertical){a{color:red}}";
/// let blocks = find_spanning_media_blocks(css);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].condition, "@media (spanning: single-fold-vertical)");
/// assert_eq!(blocks[0].body, "a{color:red}");
/// ```
pub fn find_spanning_media_blocks(css: &str) -> Vec<MediaBlockMatch> {
  matches_from_spans(css, &scan_blocks(css, spanning_keyword()))
}

/// Returns every `@media` block whose condition contains a
/// `*-viewport-segments` feature, in source order.
pub fn find_segment_media_blocks(css: &str) -> Vec<MediaBlockMatch> {
  matches_from_spans(css, &scan_blocks(css, segment_keyword()))
}

/// Cheap existence check for spanning media blocks.
pub fn has_spanning_media_blocks(css: &str) -> bool {
  !scan_blocks(css, spanning_keyword()).is_empty()
}

/// Cheap existence check for viewport-segment media blocks.
pub fn has_segment_media_blocks(css: &str) -> bool {
  !scan_blocks(css, segment_keyword()).is_empty()
}

/// Replaces every spanning media block (including its surrounding block
/// syntax and leading whitespace) with `replacement`.
///
/// Runs the same scan as [`find_spanning_media_blocks`] on the same input,
/// so removal and extraction always agree on which spans were matched.
pub fn replace_spanning_media_blocks(css: &str, replacement: &str) -> String {
  replace_spans(css, &scan_blocks(css, spanning_keyword()), replacement)
}

/// Replaces every viewport-segment media block with `replacement`.
pub fn replace_segment_media_blocks(css: &str, replacement: &str) -> String {
  replace_spans(css, &scan_blocks(css, segment_keyword()), replacement)
}
