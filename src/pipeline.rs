//! The two rewriting pipelines, one per feature family.
//!
//! Ingest: raw stylesheet text → block extraction → classification +
//! condition rewriting → group table, plus the residual sheet with the
//! extension blocks stripped. Render: current geometry → named pixel values
//! → env substitution over the table entry selected by current state.
//!
//! Fetching stylesheet text and injecting the produced strings into the DOM
//! are host concerns; [`StyleSink`] is the entire outbound boundary.

use crate::config::FoldConfig;
use crate::css::blocks::{
  find_segment_media_blocks, find_spanning_media_blocks, replace_segment_media_blocks,
  replace_spanning_media_blocks, MediaBlockMatch,
};
use crate::css::condition::{
  classify_fold, segment_counts, strip_feature, SPANNING_KEY, VIEWPORT_SEG_KEY,
};
use crate::css::envsub::substitute_env_pixels;
use crate::css::groups::{FoldGroups, ScopedFoldGroups, SegmentGroups, StyleScope};
use crate::geometry::{
  device_fold_rect, segment_offsets, segment_table_key, SegmentRect, Viewport,
};
use log::debug;

/// One resolved stylesheet: its text and an origin label (URL or "inline").
///
/// Fetching from `<link>`/`<style>` elements is the host's job; by the time
/// a source reaches the pipeline its text is fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
  pub origin: String,
  pub css: String,
}

impl SheetSource {
  /// Creates a source with an explicit origin label.
  pub fn new(origin: impl Into<String>, css: impl Into<String>) -> Self {
    Self {
      origin: origin.into(),
      css: css.into(),
    }
  }

  /// Creates a source labeled `inline`, for `<style>` element content.
  pub fn inline(css: impl Into<String>) -> Self {
    Self::new("inline", css)
  }
}

/// Consumer of final computed CSS text, keyed by injection scope.
///
/// The engine only produces strings; element creation and shadow-root
/// mechanics live behind this trait.
pub trait StyleSink {
  fn inject(&mut self, scope: &StyleScope, css: &str);
}

/// A [`StyleSink`] that records injections in order, for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct CollectedStyles {
  pub entries: Vec<(StyleScope, String)>,
}

impl StyleSink for CollectedStyles {
  fn inject(&mut self, scope: &StyleScope, css: &str) {
    self.entries.push((scope.clone(), css.to_string()));
  }
}

/// Reassembles a matched block as a standalone media rule under a rewritten
/// condition, preserving the surrounding whitespace of the original.
fn reassemble(block: &MediaBlockMatch, condition: &str) -> String {
  format!(
    "{}{}{{{}{}}}",
    block.leading, condition, block.body, block.trailing
  )
}

/// Ingests one sheet for the fold family.
///
/// Every spanning media block is classified, rewritten without the spanning
/// clause, and recorded under its fold state; the returned residual sheet
/// has the spanning blocks stripped and is also recorded on the table.
///
/// # Examples
///
/// ```
/// use foldcss::css::groups::FoldGroups;
/// use foldcss::pipeline::{adjust_spanning_sheet, SheetSource};
/// use foldcss::FoldState;
///
/// let source = SheetSource::inline(
///   "@media (spanning: single-fold-vertical){a{left:env(fold-left)}}b{margin:0}",
/// );
/// let mut groups = FoldGroups::new();
/// let residual = adjust_spanning_sheet(&source, &mut groups);
/// assert_eq!(residual, "b{margin:0}");
/// assert!(groups.read(FoldState::SingleFoldVertical).contains("@media"));
/// ```
pub fn adjust_spanning_sheet(source: &SheetSource, groups: &mut FoldGroups) -> String {
  let blocks = find_spanning_media_blocks(&source.css);
  debug!(
    "spanning ingest: {} block(s) in {}",
    blocks.len(),
    source.origin
  );
  for block in &blocks {
    let state = classify_fold(&block.condition);
    let condition = strip_feature(&block.condition, SPANNING_KEY);
    groups.record(state, &source.origin, reassemble(block, &condition));
  }
  let residual = replace_spanning_media_blocks(&source.css, "");
  groups.record_residual(&source.origin, residual.clone());
  residual
}

/// Ingests one sheet for the fold family into a per-scope table.
///
/// Element scopes model shadow-tree stylesheets processed in isolation:
/// their table is reset before ingest so re-processing an element never
/// accumulates stale variants. The document scope accumulates across sheets.
pub fn adjust_spanning_sheet_scoped(
  source: &SheetSource,
  scope: &StyleScope,
  scoped: &mut ScopedFoldGroups,
) -> String {
  if matches!(scope, StyleScope::Element(_)) {
    scoped.reset(scope);
  }
  adjust_spanning_sheet(source, scoped.scope_mut(scope))
}

/// Ingests one sheet for the segment family.
///
/// Matched blocks land in the `[vertical][horizontal]` cell declared by
/// their condition; the residual sheet goes to the reserved `(0, 0)` cell
/// and is returned.
pub fn adjust_segment_sheet(source: &SheetSource, groups: &mut SegmentGroups) -> String {
  let blocks = find_segment_media_blocks(&source.css);
  debug!(
    "segment ingest: {} block(s) in {}",
    blocks.len(),
    source.origin
  );
  for block in &blocks {
    let counts = segment_counts(&block.condition);
    let condition = strip_feature(&block.condition, VIEWPORT_SEG_KEY);
    groups.record(counts, &source.origin, reassemble(block, &condition));
  }
  let residual = replace_segment_media_blocks(&source.css, "");
  groups.record_residual(&source.origin, residual.clone());
  residual
}

/// Renders the fold-family stylesheet for the current configuration.
///
/// Returns `None` when the feature is inactive (no viewport) or when the
/// selected group holds no styles — "nothing to inject" is a valid state,
/// never an error, and partially substituted `env()` tokens are never
/// emitted.
pub fn spanning_css_for(
  groups: &FoldGroups,
  config: &FoldConfig,
  viewport: Option<Viewport>,
) -> Option<String> {
  let Some(viewport) = viewport else {
    debug!("spanning render skipped: no viewport");
    return None;
  };
  let css = groups.read(config.spanning);
  if css.trim().is_empty() {
    return None;
  }
  let rect = device_fold_rect(config, viewport);
  Some(substitute_env_pixels(&css, &rect.named_pixels()))
}

/// Renders the segment-family stylesheet for a live segment list.
///
/// The table cell is derived from the segment layout with the same index
/// convention the offsets use, so lookups and substitution stay aligned.
/// `None` when the feature is inactive (no viewport, no segments) or the
/// cell is empty.
pub fn segment_css_for(
  groups: &SegmentGroups,
  segments: &[SegmentRect],
  viewport: Option<Viewport>,
) -> Option<String> {
  let Some(viewport) = viewport else {
    debug!("segment render skipped: no viewport");
    return None;
  };
  if segments.is_empty() {
    debug!("segment render skipped: no live segments");
    return None;
  }
  let css = groups.read(segment_table_key(segments, viewport));
  if css.trim().is_empty() {
    return None;
  }
  Some(substitute_env_pixels(&css, &segment_offsets(segments, viewport)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::css::condition::{FoldState, SegmentCounts};

  #[test]
  fn spanning_ingest_records_variant_and_residual() {
    let source = SheetSource::new(
      "https://site/app.css",
      "p{margin:0}@media (spanning: none){a{color:red}}",
    );
    let mut groups = FoldGroups::new();
    let residual = adjust_spanning_sheet(&source, &mut groups);
    assert_eq!(residual, "p{margin:0}");
    let none_css = groups.read(FoldState::None);
    assert!(none_css.contains("/* origin: https://site/app.css */"));
    assert!(none_css.contains("@media{a{color:red}}"));
    assert!(groups.read_residual().contains("p{margin:0}"));
  }

  #[test]
  fn render_is_a_noop_without_viewport_or_styles() {
    let groups = FoldGroups::new();
    let config = FoldConfig::default();
    assert_eq!(
      spanning_css_for(&groups, &config, Some(Viewport::new(100.0, 100.0))),
      None
    );

    let mut groups = FoldGroups::new();
    groups.record(FoldState::None, "inline", "a{}");
    assert_eq!(spanning_css_for(&groups, &config, None), None);
  }

  #[test]
  fn segment_render_requires_live_segments() {
    let mut groups = SegmentGroups::new();
    groups.record(SegmentCounts::default(), "inline", "a{}");
    assert_eq!(
      segment_css_for(&groups, &[], Some(Viewport::new(100.0, 100.0))),
      None
    );
  }

  #[test]
  fn collected_styles_records_in_order() {
    let mut sink = CollectedStyles::default();
    sink.inject(&StyleScope::Document, "a{}");
    sink.inject(&StyleScope::Element("x-card".into()), "b{}");
    assert_eq!(sink.entries.len(), 2);
    assert_eq!(sink.entries[0].0, StyleScope::Document);
  }
}
