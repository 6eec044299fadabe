//! Prelude module for grouped-list.
//!
//! ```ignore
//! use grouped_list::prelude::*;
//! ```

pub use crate::error::Error;
pub use crate::model::{
    ChangeEvent, ChangeSink, GroupCallback, GroupId, GroupedList, GroupedListConfig, ItemCallback,
    ItemId, ListSignals, NoopSink, RecordingSink, UpdateNotification, ViewType, VisualRow,
};
pub use grouped_list_core::Signal;
