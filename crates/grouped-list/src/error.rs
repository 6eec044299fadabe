//! Error types for grouped-list.

/// Errors returned by the few fallible grouped-list entry points.
///
/// Structural mutations never fail: lookups that miss report `false` or
/// `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration was changed after groups were added.
    #[error("list configuration is fixed once data exists ({groups} groups present)")]
    ConfigLocked {
        /// Number of groups held when the change was attempted.
        groups: usize,
    },

    /// A TOML configuration preset could not be parsed.
    #[error("failed to parse list configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for grouped-list operations.
pub type Result<T> = std::result::Result<T, Error>;
