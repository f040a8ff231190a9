//! Accumulation tables for rewritten media-block bodies.
//!
//! Each table keeps an explicit ordered list of `(origin, css)` entries and
//! joins them at read time, so provenance comments and ordering stay
//! deterministic no matter how many source sheets feed the same table.
//! Writes are append-only within a parse pass; reads of never-written keys
//! yield an empty string, never an error.

use crate::css::condition::{FoldState, SegmentCounts};
use std::collections::{BTreeMap, HashMap};

/// Where a stylesheet's rewritten output should be injected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleScope {
  /// The main document's `<head>`.
  Document,
  /// A shadow-tree host element, keyed by its (lowercased) element name.
  Element(String),
}

/// One recorded contribution: the origin label and the rewritten CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
  origin: String,
  css: String,
}

fn join(entries: &[Entry]) -> String {
  let mut out = String::new();
  for entry in entries {
    out.push_str("\n/* origin: ");
    out.push_str(&entry.origin);
    out.push_str(" */\n");
    out.push_str(&entry.css);
  }
  out
}

/// Fold-family group table: three fixed fold-state keys plus the residual
/// (non-spanning) stylesheet for the same source set.
#[derive(Debug, Clone, Default)]
pub struct FoldGroups {
  horizontal: Vec<Entry>,
  vertical: Vec<Entry>,
  none: Vec<Entry>,
  residual: Vec<Entry>,
}

impl FoldGroups {
  /// Creates an empty table with all fixed keys initialized.
  pub fn new() -> Self {
    Self::default()
  }

  fn slot(&mut self, state: FoldState) -> &mut Vec<Entry> {
    match state {
      FoldState::SingleFoldHorizontal => &mut self.horizontal,
      FoldState::SingleFoldVertical => &mut self.vertical,
      FoldState::None => &mut self.none,
    }
  }

  /// Appends `css` (tagged with its origin) to the accumulator for `state`.
  pub fn record(&mut self, state: FoldState, origin: &str, css: impl Into<String>) {
    self.slot(state).push(Entry {
      origin: origin.to_string(),
      css: css.into(),
    });
  }

  /// Appends to the residual (extension blocks stripped) stylesheet.
  pub fn record_residual(&mut self, origin: &str, css: impl Into<String>) {
    self.residual.push(Entry {
      origin: origin.to_string(),
      css: css.into(),
    });
  }

  /// Joined CSS for `state`, empty when nothing was recorded.
  pub fn read(&self, state: FoldState) -> String {
    join(match state {
      FoldState::SingleFoldHorizontal => &self.horizontal,
      FoldState::SingleFoldVertical => &self.vertical,
      FoldState::None => &self.none,
    })
  }

  /// Joined residual stylesheet for this table's sources.
  pub fn read_residual(&self) -> String {
    join(&self.residual)
  }

  /// True when no contribution has been recorded under any key.
  pub fn is_empty(&self) -> bool {
    self.horizontal.is_empty()
      && self.vertical.is_empty()
      && self.none.is_empty()
      && self.residual.is_empty()
  }
}

/// Segment-family group table: a sparse 2D table indexed
/// `[vertical][horizontal]`.
///
/// Cell `(0, 0)` is reserved for the residual stylesheet (extension media
/// blocks stripped out); it is not a regular segment count, since an absent
/// axis in a condition defaults to 1.
#[derive(Debug, Clone, Default)]
pub struct SegmentGroups {
  cells: BTreeMap<(u32, u32), Vec<Entry>>,
}

impl SegmentGroups {
  /// Creates an empty table.
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends `css` to the cell for `counts`, creating the cell if absent.
  pub fn record(&mut self, counts: SegmentCounts, origin: &str, css: impl Into<String>) {
    self
      .cells
      .entry((counts.vertical, counts.horizontal))
      .or_default()
      .push(Entry {
        origin: origin.to_string(),
        css: css.into(),
      });
  }

  /// Appends to the reserved residual cell `(0, 0)`.
  pub fn record_residual(&mut self, origin: &str, css: impl Into<String>) {
    self.cells.entry((0, 0)).or_default().push(Entry {
      origin: origin.to_string(),
      css: css.into(),
    });
  }

  /// Joined CSS for the `(vertical, horizontal)` cell, empty when the cell
  /// was never written.
  pub fn read(&self, counts: SegmentCounts) -> String {
    self
      .cells
      .get(&(counts.vertical, counts.horizontal))
      .map(|entries| join(entries))
      .unwrap_or_default()
  }

  /// Joined residual stylesheet from cell `(0, 0)`.
  pub fn read_residual(&self) -> String {
    self
      .cells
      .get(&(0, 0))
      .map(|entries| join(entries))
      .unwrap_or_default()
  }

  /// Populated `(vertical, horizontal)` keys in ascending order, the
  /// residual cell included.
  pub fn keys(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
    self.cells.keys().copied()
  }
}

/// Fold-family tables parameterized by injection scope.
///
/// Each scope owns an independent, default-initialized [`FoldGroups`];
/// shadow-tree stylesheets processed in isolation never share accumulator
/// state with the document or with other elements.
#[derive(Debug, Clone, Default)]
pub struct ScopedFoldGroups {
  scopes: HashMap<StyleScope, FoldGroups>,
}

impl ScopedFoldGroups {
  /// Creates an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// The mutable table for `scope`, created on first access.
  pub fn scope_mut(&mut self, scope: &StyleScope) -> &mut FoldGroups {
    self.scopes.entry(scope.clone()).or_default()
  }

  /// The table for `scope`, if any contribution was ever recorded there.
  pub fn scope(&self, scope: &StyleScope) -> Option<&FoldGroups> {
    self.scopes.get(scope)
  }

  /// Replaces `scope`'s table with a fresh default-initialized one.
  pub fn reset(&mut self, scope: &StyleScope) {
    self.scopes.insert(scope.clone(), FoldGroups::new());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unwritten_keys_read_as_empty() {
    let groups = FoldGroups::new();
    assert_eq!(groups.read(FoldState::SingleFoldVertical), "");
    let segments = SegmentGroups::new();
    assert_eq!(segments.read(SegmentCounts::default()), "");
  }

  #[test]
  fn records_accumulate_in_order_with_origin_comments() {
    let mut groups = FoldGroups::new();
    groups.record(FoldState::None, "inline", "a{color:red}");
    groups.record(FoldState::None, "https://site/app.css", "b{color:blue}");
    let css = groups.read(FoldState::None);
    assert_eq!(
      css,
      "\n/* origin: inline */\na{color:red}\n/* origin: https://site/app.css */\nb{color:blue}"
    );
  }

  #[test]
  fn segment_cells_are_independent() {
    let mut groups = SegmentGroups::new();
    groups.record(
      SegmentCounts {
        vertical: 1,
        horizontal: 2,
      },
      "inline",
      "a{}",
    );
    groups.record_residual("inline", "b{}");
    assert!(groups
      .read(SegmentCounts {
        vertical: 1,
        horizontal: 2
      })
      .contains("a{}"));
    assert!(groups.read_residual().contains("b{}"));
    assert_eq!(
      groups.read(SegmentCounts {
        vertical: 2,
        horizontal: 1
      }),
      ""
    );
    assert_eq!(groups.keys().collect::<Vec<_>>(), vec![(0, 0), (1, 2)]);
  }

  #[test]
  fn scopes_do_not_share_accumulators() {
    let mut scoped = ScopedFoldGroups::new();
    let host = StyleScope::Element("x-card".to_string());
    scoped
      .scope_mut(&StyleScope::Document)
      .record(FoldState::None, "inline", "a{}");
    scoped
      .scope_mut(&host)
      .record(FoldState::None, "x-card", "b{}");

    assert!(scoped
      .scope(&StyleScope::Document)
      .unwrap()
      .read(FoldState::None)
      .contains("a{}"));
    assert!(!scoped
      .scope(&host)
      .unwrap()
      .read(FoldState::None)
      .contains("a{}"));

    scoped.reset(&host);
    assert!(scoped.scope(&host).unwrap().is_empty());
  }
}
