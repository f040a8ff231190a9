//! Stylesheet text processing
//!
//! This module handles locating, classifying, rewriting, and grouping the
//! `@media` blocks that carry the foldable-viewport extension features, and
//! substituting their `env()` placeholders.

pub mod blocks;
pub mod condition;
pub mod envsub;
pub mod groups;
