//! Device geometry resolution.
//!
//! Pure functions mapping the current fold configuration (or a live list of
//! viewport segments) to the named pixel values that back `env()`
//! substitution. All units are CSS pixels; values stay unit-less here and
//! get their `px` suffix when rendered into a stylesheet.

use crate::config::FoldConfig;
use crate::css::condition::{FoldState, SegmentCounts};

/// Recognized `env()` variable names for the fold family.
pub const ENV_FOLD_TOP: &str = "fold-top";
pub const ENV_FOLD_LEFT: &str = "fold-left";
pub const ENV_FOLD_HEIGHT: &str = "fold-height";
pub const ENV_FOLD_WIDTH: &str = "fold-width";

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
  pub width: f64,
  pub height: f64,
}

impl Viewport {
  /// Creates a viewport of the given dimensions.
  pub const fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }
}

/// One rectangular viewport segment reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRect {
  pub left: f64,
  pub top: f64,
  pub right: f64,
  pub bottom: f64,
}

impl SegmentRect {
  /// Creates a segment from edge offsets.
  pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
    Self {
      left,
      top,
      right,
      bottom,
    }
  }

  /// Horizontal extent.
  pub fn width(&self) -> f64 {
    self.right - self.left
  }

  /// Vertical extent.
  pub fn height(&self) -> f64 {
    self.bottom - self.top
  }
}

/// The fold (hinge) rectangle for the current configuration.
///
/// For [`FoldState::None`] all four values are 0: a degenerate rect at the
/// origin. Injecting zero-thickness rects is harmless, so callers may skip
/// injection for `none` purely as an optimization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FoldRect {
  pub top: f64,
  pub left: f64,
  pub height: f64,
  pub width: f64,
}

impl FoldRect {
  /// The four `fold-*` env-variable pairs for this rect.
  pub fn named_pixels(&self) -> Vec<(String, f64)> {
    vec![
      (ENV_FOLD_TOP.to_string(), self.top),
      (ENV_FOLD_LEFT.to_string(), self.left),
      (ENV_FOLD_HEIGHT.to_string(), self.height),
      (ENV_FOLD_WIDTH.to_string(), self.width),
    ]
  }
}

/// Computes the fold rectangle from the configuration and viewport.
///
/// # Examples
///
/// ```
/// use foldcss::config::FoldConfig;
/// use foldcss::geometry::{device_fold_rect, Viewport};
/// use foldcss::FoldState;
///
/// let config = FoldConfig {
///   spanning: FoldState::SingleFoldVertical,
///   fold_size: 20.0,
///   browser_shell_size: 0.0,
/// };
/// let rect = device_fold_rect(&config, Viewport::new(1000.0, 800.0));
/// assert_eq!(rect.left, 490.0);
/// assert_eq!(rect.height, 800.0);
/// assert_eq!(rect.width, 20.0);
/// assert_eq!(rect.top, 0.0);
/// ```
pub fn device_fold_rect(config: &FoldConfig, viewport: Viewport) -> FoldRect {
  match config.spanning {
    FoldState::SingleFoldVertical => FoldRect {
      top: 0.0,
      left: viewport.width / 2.0 - config.fold_size / 2.0,
      height: viewport.height,
      width: config.fold_size,
    },
    FoldState::SingleFoldHorizontal => FoldRect {
      top: viewport.height / 2.0 - config.fold_size / 2.0 - config.browser_shell_size,
      left: 0.0,
      height: config.fold_size,
      width: viewport.width,
    },
    FoldState::None => FoldRect::default(),
  }
}

/// True when the segment list represents a vertical split: more than one
/// segment, laid out side by side so each spans the full viewport height.
///
/// Naming follows the media-feature convention where a "vertical" split is a
/// vertical dividing line producing left/right segments.
fn is_vertical_split(segments: &[SegmentRect], viewport: Viewport) -> bool {
  segments.len() > 1 && segments[0].height() >= viewport.height
}

/// The group-table key addressed by a live segment list.
///
/// Keys are `(vertical, horizontal)` counts: a vertical split of N
/// side-by-side segments addresses `(1, N)`, a horizontal split of N stacked
/// segments addresses `(N, 1)`, and a single segment addresses `(1, 1)`.
pub fn segment_table_key(segments: &[SegmentRect], viewport: Viewport) -> SegmentCounts {
  let count = segments.len() as u32;
  if is_vertical_split(segments, viewport) {
    SegmentCounts {
      vertical: 1,
      horizontal: count,
    }
  } else {
    SegmentCounts {
      vertical: count.max(1),
      horizontal: 1,
    }
  }
}

/// Emits the `viewport-segment-{edge} H V` env-variable pairs for a live
/// segment list.
///
/// The live index goes in the horizontal slot when the segments are
/// vertically divided (side by side) and in the vertical slot otherwise; the
/// other slot is fixed at 0. This matches the indices used by
/// [`segment_table_key`], so table lookups and substitution stay aligned.
pub fn segment_offsets(segments: &[SegmentRect], viewport: Viewport) -> Vec<(String, f64)> {
  let vertical_split = is_vertical_split(segments, viewport);
  let mut out = Vec::with_capacity(segments.len() * 4);
  for (index, segment) in segments.iter().enumerate() {
    let (h, v) = if vertical_split { (index, 0) } else { (0, index) };
    out.push((format!("viewport-segment-left {h} {v}"), segment.left));
    out.push((format!("viewport-segment-top {h} {v}"), segment.top));
    out.push((format!("viewport-segment-right {h} {v}"), segment.right));
    out.push((format!("viewport-segment-bottom {h} {v}"), segment.bottom));
  }
  out
}
