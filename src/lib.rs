//! foldcss — graceful degradation for foldable-viewport CSS.
//!
//! Stylesheets authored against the proposed foldable/segmented-viewport
//! media-query extensions — the boolean `spanning` fold state and the
//! two-axis `horizontal-viewport-segments` / `vertical-viewport-segments`
//! counts — do nothing on engines without native support. This crate scans
//! stylesheet text for the extension's `@media` blocks, regroups the guarded
//! CSS into tables addressable by fold state or segment counts, strips the
//! extension feature from each retained condition, and substitutes
//! `env(fold-*)` / `env(viewport-segment-*)` placeholders with concrete
//! pixel values once device geometry is known.
//!
//! The scan is deliberately not a full CSS parser: a single pass with an
//! explicit brace-depth counter, tuned for rewriting rather than validation.
//! Malformed input degrades to documented defaults instead of erroring, so a
//! rewriting pass can never break an unrelated page's styles.
//!
//! # Example
//!
//! ```
//! use foldcss::config::FoldConfig;
//! use foldcss::css::groups::FoldGroups;
//! use foldcss::geometry::Viewport;
//! use foldcss::pipeline::{adjust_spanning_sheet, spanning_css_for, SheetSource};
//! use foldcss::FoldState;
//!
//! let sheet = SheetSource::inline(
//!   "@media (spanning: single-fold-vertical){.fold{left:env(fold-left)}}",
//! );
//! let mut groups = FoldGroups::new();
//! let residual = adjust_spanning_sheet(&sheet, &mut groups);
//! assert_eq!(residual, "");
//!
//! let config = FoldConfig {
//!   spanning: FoldState::SingleFoldVertical,
//!   fold_size: 20.0,
//!   browser_shell_size: 0.0,
//! };
//! let css = spanning_css_for(&groups, &config, Some(Viewport::new(1000.0, 800.0)));
//! assert!(css.unwrap().contains("left:490px"));
//! ```

pub mod config;
pub mod css;
pub mod error;
pub mod geometry;
pub mod pipeline;

pub use config::{ConfigStore, ConfigUpdate, FoldConfig};
pub use css::blocks::MediaBlockMatch;
pub use css::condition::{FoldState, SegmentCounts};
pub use css::groups::{FoldGroups, ScopedFoldGroups, SegmentGroups, StyleScope};
pub use error::{Error, Result};
pub use geometry::{FoldRect, SegmentRect, Viewport};
pub use pipeline::{SheetSource, StyleSink};
