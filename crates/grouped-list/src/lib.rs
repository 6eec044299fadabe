//! grouped-list - sorted, sectioned list models for recycling list views.
//!
//! A [`GroupedList`](model::GroupedList) keeps groups sorted, keeps each
//! group's items sorted, and exposes the whole structure as one flat run of
//! rows (headers, items, empty-group placeholders). Every mutation reports
//! the minimal row insertions, removals, moves and changes to a
//! [`ChangeSink`](model::ChangeSink), so a renderer can patch its rows
//! instead of reloading them.
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use grouped_list::prelude::*;
//!
//! #[derive(Clone)]
//! struct Day(u64);
//!
//! #[derive(Clone, PartialEq)]
//! struct Task {
//!     id: u64,
//!     title: String,
//! }
//!
//! struct Days;
//! impl GroupCallback<Day> for Days {
//!     fn compare(&self, a: &Day, b: &Day) -> Ordering { a.0.cmp(&b.0) }
//!     fn are_items_the_same(&self, a: &Day, b: &Day) -> bool { a.0 == b.0 }
//!     fn are_contents_the_same(&self, _old: &Day, _new: &Day) -> bool { true }
//!     fn group_type(&self, _day: &Day) -> ViewType { 0 }
//!     fn unique_group_id(&self, day: &Day) -> GroupId { day.0 }
//! }
//!
//! struct Tasks;
//! impl ItemCallback<Day, Task> for Tasks {
//!     fn compare(&self, _day: &Day, a: &Task, b: &Task) -> Ordering { a.title.cmp(&b.title) }
//!     fn are_items_the_same(&self, a: &Task, b: &Task) -> bool { a.id == b.id }
//!     fn are_contents_the_same(&self, old: &Task, new: &Task) -> bool { old == new }
//!     fn child_type(&self, _day: &Day, _task: &Task) -> ViewType { 1 }
//!     fn unique_item_id(&self, task: &Task) -> ItemId { task.id }
//! }
//!
//! let config = GroupedListConfig::new().display_empty_cell(true);
//! let mut list = GroupedList::with_config(config, Days, Tasks, RecordingSink::new());
//!
//! list.add_or_update_group(Day(2));
//! list.add_or_update_item(Day(1), Task { id: 7, title: "write report".into() });
//!
//! // Day 1: header + task, day 2: header + placeholder.
//! assert_eq!(list.size(), 4);
//! assert!(list.is_visual_empty_position(3));
//! assert_eq!(list.item_visual_position(7), Some(1));
//! ```

pub mod error;
pub mod model;
pub mod prelude;

pub use error::{Error, Result};
