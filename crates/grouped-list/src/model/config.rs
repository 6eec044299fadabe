//! Grouped list configuration.
//!
//! Configuration is fixed before the first mutation. Applications that keep
//! list presets in files can load them from TOML:
//!
//! ```
//! use grouped_list::model::{GroupedListConfig, UpdateNotification};
//!
//! let config = GroupedListConfig::from_toml_str(r#"
//!     expanded_by_default = false
//!     display_empty_cell = true
//!     update_notification = "compact"
//! "#).unwrap();
//!
//! assert!(!config.expanded_by_default);
//! assert!(config.display_empty_cell);
//! assert!(!config.children_above_group);
//! assert_eq!(config.update_notification, UpdateNotification::Compact);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How an update that changes an element's sort key is announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateNotification {
    /// Two change events at the old position, then the move.
    ///
    /// Renderers built against the historical contract count on the
    /// duplicated change.
    #[default]
    Legacy,
    /// One change event at the old position (when content changed), then
    /// the move.
    Compact,
}

/// Configuration for a [`GroupedList`](super::GroupedList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupedListConfig {
    /// Whether newly created groups start expanded.
    pub expanded_by_default: bool,
    /// Whether an empty group shows a placeholder row instead of being removed.
    pub display_empty_cell: bool,
    /// Whether a group's header follows its rows instead of preceding them.
    pub children_above_group: bool,
    /// Whether collapsing is ignored.
    pub disallow_collapse: bool,
    /// How key-changing updates are announced.
    pub update_notification: UpdateNotification,
}

impl Default for GroupedListConfig {
    fn default() -> Self {
        Self {
            expanded_by_default: true,
            display_empty_cell: false,
            children_above_group: false,
            disallow_collapse: false,
            update_notification: UpdateNotification::Legacy,
        }
    }
}

impl GroupedListConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Set whether new groups start expanded.
    pub fn expanded_by_default(mut self, expanded: bool) -> Self {
        self.expanded_by_default = expanded;
        self
    }

    /// Set whether empty groups show a placeholder row.
    pub fn display_empty_cell(mut self, display: bool) -> Self {
        self.display_empty_cell = display;
        self
    }

    /// Set whether headers follow their rows.
    pub fn children_above_group(mut self, above: bool) -> Self {
        self.children_above_group = above;
        self
    }

    /// Set whether collapsing is ignored.
    pub fn disallow_collapse(mut self, disallow: bool) -> Self {
        self.disallow_collapse = disallow;
        self
    }

    /// Set how key-changing updates are announced.
    pub fn update_notification(mut self, notification: UpdateNotification) -> Self {
        self.update_notification = notification;
        self
    }
}
