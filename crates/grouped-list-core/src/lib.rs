//! Core systems for grouped-list.
//!
//! This crate provides the foundation the list model is built on:
//!
//! - **Signal/Slot System**: [`Signal`], a synchronous observer primitive used
//!   to fan out structural change notifications to any number of listeners
//! - **Logging**: `tracing` targets and span helpers shared by all crates
//!
//! # Signal/Slot Example
//!
//! ```
//! use grouped_list_core::Signal;
//!
//! let rows_removed = Signal::<(usize, usize)>::new();
//!
//! let conn_id = rows_removed.connect(|(position, count)| {
//!     println!("removed {count} rows at {position}");
//! });
//!
//! rows_removed.emit((4, 1));
//! rows_removed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
