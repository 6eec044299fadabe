//! Sorted list models with incremental change notification.
//!
//! This module provides the list models a sectioned, recycling list view is
//! built on. Models keep their contents sorted and, for every mutation,
//! report the smallest set of row insertions, removals, moves and changes
//! that turns the previous row sequence into the new one.
//!
//! # Core Types
//!
//! - `GroupCallback` / `ItemCallback`: ordering and identity of groups and items
//! - `SortedList`: one sorted, identity-stable sequence
//! - `GroupedList`: sorted groups of sorted items, projected onto flat rows
//! - `ChangeSink`: receiver of structural change events
//! - `ListSignals`: a `ChangeSink` that fans out to connected slots
//! - `GroupedListConfig`: layout and notification options
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  local events  ┌──────────────┐  flat events  ┌──────────────┐
//! │  SortedList  │───────────────>│ GroupedList  │──────────────>│  ChangeSink  │
//! │ (groups and  │                │ (translates  │               │ (renderer,   │
//! │  items)      │                │  positions)  │               │  signals)    │
//! └──────────────┘                └──────────────┘               └──────────────┘
//! ```
//!
//! Renderers ask the model what lives at a flat position (`row`,
//! `item_view_type`) and apply the reported events to stay in sync.

mod config;
pub mod debug;
mod grouped_list;
mod sink;
mod sorted_list;
mod traits;

pub use config::{GroupedListConfig, UpdateNotification};
pub use debug::{LayoutDebug, LayoutFormatOptions, LayoutStyle};
pub use grouped_list::{GroupedList, VisualRow};
pub use sink::{ChangeEvent, ChangeSink, ListSignals, NoopSink, RecordingSink};
pub use sorted_list::{SortedList, UpdateOutcome};
pub use traits::{
    ElementOrder, EMPTY_CELL_VIEW_TYPE, GroupCallback, GroupId, ItemCallback, ItemId, ViewType,
};
