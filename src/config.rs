//! Device fold configuration and change notification.
//!
//! The host (emulator message channel, debug UI, session restore) owns the
//! current fold description and pushes partial updates here. Subscribers are
//! invoked in registration order on every update, without deduplication, so
//! a sink registered twice renders twice — matching the contract of an
//! ordered observer list.

use crate::css::condition::FoldState;
use std::fmt;

/// Current fold description in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FoldConfig {
  /// Hinge orientation relative to content.
  pub spanning: FoldState,
  /// Thickness of the fold/hinge.
  pub fold_size: f64,
  /// Height of browser chrome overlapping the lower half on horizontal folds.
  pub browser_shell_size: f64,
}

/// A partial configuration update; absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfigUpdate {
  pub spanning: Option<FoldState>,
  pub fold_size: Option<f64>,
  pub browser_shell_size: Option<f64>,
}

type Subscriber = Box<dyn FnMut(&FoldConfig)>;

/// Owns the current [`FoldConfig`] and an ordered subscriber list.
///
/// # Examples
///
/// ```
/// use foldcss::config::{ConfigStore, ConfigUpdate};
/// use foldcss::FoldState;
///
/// let mut store = ConfigStore::default();
/// store.subscribe(|config| {
///   let _ = config.spanning;
/// });
/// store.update(ConfigUpdate {
///   spanning: Some(FoldState::SingleFoldVertical),
///   fold_size: Some(24.0),
///   ..ConfigUpdate::default()
/// });
/// assert_eq!(store.config().fold_size, 24.0);
/// ```
#[derive(Default)]
pub struct ConfigStore {
  config: FoldConfig,
  subscribers: Vec<Subscriber>,
}

impl ConfigStore {
  /// Creates a store seeded with `config` and no subscribers.
  pub fn new(config: FoldConfig) -> Self {
    Self {
      config,
      subscribers: Vec::new(),
    }
  }

  /// The current configuration.
  pub fn config(&self) -> &FoldConfig {
    &self.config
  }

  /// Registers a change subscriber. Subscribers run in registration order
  /// and are never deduplicated.
  pub fn subscribe(&mut self, subscriber: impl FnMut(&FoldConfig) + 'static) {
    self.subscribers.push(Box::new(subscriber));
  }

  /// Applies a partial update, then notifies every subscriber with the new
  /// configuration.
  pub fn update(&mut self, update: ConfigUpdate) {
    if let Some(spanning) = update.spanning {
      self.config.spanning = spanning;
    }
    if let Some(fold_size) = update.fold_size {
      self.config.fold_size = fold_size;
    }
    if let Some(shell) = update.browser_shell_size {
      self.config.browser_shell_size = shell;
    }
    for subscriber in &mut self.subscribers {
      subscriber(&self.config);
    }
  }
}

impl fmt::Debug for ConfigStore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConfigStore")
      .field("config", &self.config)
      .field("subscribers", &self.subscribers.len())
      .finish()
  }
}
