//! A single sorted, identity-stable sequence.
//!
//! [`SortedList`] keeps its elements in [`ElementOrder`] order and reports
//! every structural change to a [`ChangeSink`] in its own index space. It is
//! the building block of [`GroupedList`](super::GroupedList), which keeps one
//! for its groups and one per group for their items, and translates the local
//! indices into flat row positions.
//!
//! Every mutator takes the order and the sink explicitly, so the same list can
//! be driven by orders that borrow external context (such as the owning group
//! of an item sequence).
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use grouped_list::model::{ElementOrder, RecordingSink, SortedList, UpdateNotification, UpdateOutcome};
//!
//! struct ByValue;
//!
//! impl ElementOrder<(u32, i32)> for ByValue {
//!     fn compare(&self, a: &(u32, i32), b: &(u32, i32)) -> Ordering {
//!         a.1.cmp(&b.1)
//!     }
//!     fn are_items_the_same(&self, a: &(u32, i32), b: &(u32, i32)) -> bool {
//!         a.0 == b.0
//!     }
//!     fn are_contents_the_same(&self, old: &(u32, i32), new: &(u32, i32)) -> bool {
//!         old == new
//!     }
//! }
//!
//! let mut list = SortedList::new();
//! let mut sink = RecordingSink::new();
//!
//! list.add((1, 30), &ByValue, &mut sink);
//! list.add((2, 10), &ByValue, &mut sink);
//! assert_eq!(sink.inserted(), vec![(0, 1), (0, 1)]);
//!
//! let outcome = list.add_or_update((2, 40), &ByValue, UpdateNotification::Compact, &mut sink);
//! assert_eq!(outcome, UpdateOutcome::Moved { from: 0, to: 1 });
//! ```

use std::cmp::Ordering;
use std::ops::Index;

use grouped_list_core::logging::targets;

use super::config::UpdateNotification;
use super::sink::ChangeSink;
use super::traits::ElementOrder;

/// Result of [`SortedList::add_or_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOutcome {
    /// The element was new and now lives at this index.
    Inserted(usize),
    /// An identical element was already present; nothing changed.
    Unchanged(usize),
    /// The element kept its position but its content changed.
    Changed(usize),
    /// The element's sort key changed; it was re-sorted.
    Moved {
        /// Index before the update.
        from: usize,
        /// Index after the update.
        to: usize,
    },
}

impl UpdateOutcome {
    /// Index of the element after the operation.
    pub fn index(&self) -> usize {
        match *self {
            Self::Inserted(index) | Self::Unchanged(index) | Self::Changed(index) => index,
            Self::Moved { to, .. } => to,
        }
    }

    /// Whether the sequence or the element's content changed.
    pub fn is_modified(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// A sequence kept sorted by an [`ElementOrder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedList<T> {
    data: Vec<T>,
}

impl<T> Default for SortedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Iterates elements in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// The elements in sorted order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Index of the element with the same identity as `element`.
    pub fn index_of<O: ElementOrder<T>>(&self, element: &T, order: &O) -> Option<usize> {
        self.data
            .iter()
            .position(|existing| order.are_items_the_same(existing, element))
    }

    /// Index at which `element` would be inserted: after every element that
    /// does not sort after it.
    fn insertion_index<O: ElementOrder<T>>(&self, element: &T, order: &O) -> usize {
        self.data
            .partition_point(|existing| order.compare(existing, element) != Ordering::Greater)
    }

    /// Inserts `element` at its sorted position without an identity check.
    ///
    /// Emits `inserted(index, 1)` and returns the index.
    pub fn add<O, S>(&mut self, element: T, order: &O, sink: &mut S) -> usize
    where
        O: ElementOrder<T>,
        S: ChangeSink + ?Sized,
    {
        let index = self.insertion_index(&element, order);
        self.data.insert(index, element);
        tracing::trace!(target: targets::SORTED_LIST, index, len = self.data.len(), "inserted");
        sink.on_inserted(index, 1);
        index
    }

    /// Inserts `element`, or replaces the stored element with the same
    /// identity.
    ///
    /// - absent: inserted, one insertion event
    /// - present and identical: nothing happens
    /// - present with the same sort key: replaced in place, one change event
    ///   if content differs
    /// - present with a different sort key: re-sorted; the change event(s)
    ///   selected by `notification` at the old index, then a move if the
    ///   index differs
    pub fn add_or_update<O, S>(
        &mut self,
        element: T,
        order: &O,
        notification: UpdateNotification,
        sink: &mut S,
    ) -> UpdateOutcome
    where
        O: ElementOrder<T>,
        S: ChangeSink + ?Sized,
    {
        let Some(from) = self.index_of(&element, order) else {
            return UpdateOutcome::Inserted(self.add(element, order, sink));
        };

        let existing = &self.data[from];
        let key_changed = order.compare(existing, &element) != Ordering::Equal;
        let content_changed = !order.are_contents_the_same(existing, &element);

        if !key_changed {
            self.data[from] = element;
            if !content_changed {
                return UpdateOutcome::Unchanged(from);
            }
            tracing::trace!(target: targets::SORTED_LIST, index = from, "changed");
            sink.on_changed(from, 1);
            return UpdateOutcome::Changed(from);
        }

        match notification {
            UpdateNotification::Legacy => {
                sink.on_changed(from, 1);
                sink.on_changed(from, 1);
            }
            UpdateNotification::Compact => {
                if content_changed {
                    sink.on_changed(from, 1);
                }
            }
        }

        self.data.remove(from);
        let to = self.insertion_index(&element, order);
        self.data.insert(to, element);
        tracing::trace!(target: targets::SORTED_LIST, from, to, "re-sorted");
        if from != to {
            sink.on_moved(from, to);
        }
        UpdateOutcome::Moved { from, to }
    }

    /// Removes the element with the same identity as `element`.
    ///
    /// Emits `removed(index, 1)` and returns `true` if one was found.
    pub fn remove<O, S>(&mut self, element: &T, order: &O, sink: &mut S) -> bool
    where
        O: ElementOrder<T>,
        S: ChangeSink + ?Sized,
    {
        match self.index_of(element, order) {
            Some(index) => self.remove_at(index, sink).is_some(),
            None => false,
        }
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at<S>(&mut self, index: usize, sink: &mut S) -> Option<T>
    where
        S: ChangeSink + ?Sized,
    {
        if index >= self.data.len() {
            return None;
        }
        let element = self.data.remove(index);
        tracing::trace!(target: targets::SORTED_LIST, index, len = self.data.len(), "removed");
        sink.on_removed(index, 1);
        Some(element)
    }

    /// Removes every element, emitting one removal for the whole range.
    pub fn clear<S>(&mut self, sink: &mut S)
    where
        S: ChangeSink + ?Sized,
    {
        let len = self.data.len();
        if len == 0 {
            return;
        }
        self.data.clear();
        sink.on_removed(0, len);
    }
}

impl<T> Index<usize> for SortedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T> IntoIterator for &'a SortedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
