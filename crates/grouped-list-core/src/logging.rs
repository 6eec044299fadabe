//! Logging facilities for grouped-list.
//!
//! grouped-list uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("grouped_list=trace")
//!         .init();
//! }
//! ```
//!
//! Every mutation logs under one of the [`targets`]; use them in filter
//! directives to follow a single subsystem.

/// Span names used throughout grouped-list for tracing.
pub mod span_names {
    /// Batch mutation span.
    pub const BATCH: &str = "grouped_list::batch";
    /// Performance measurement span.
    pub const PERF: &str = "grouped_list::perf";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "grouped_list_core::signal";
    /// Single-level ordered collection target.
    pub const SORTED_LIST: &str = "grouped_list::sorted_list";
    /// Grouped collection target.
    pub const GROUPED_LIST: &str = "grouped_list::grouped_list";
}

/// A guard for measuring a named operation.
///
/// The span is entered on creation and exited when the guard is dropped, so
/// every event logged in between is attributed to `operation`.
///
/// ```
/// use grouped_list_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("add_or_update_all_items");
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: span_names::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }

    /// Create a span for a batch mutation of `len` elements.
    pub fn batch(name: &'static str, len: usize) -> Self {
        let span = tracing::debug_span!(target: span_names::BATCH, "batch", operation = name, len);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new("test_operation");
        let _batch = PerfSpan::batch("test_batch", 3);
    }

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("traced_operation");
            tracing::debug!(target: targets::SIGNAL, "inside span");
        });
    }
}
