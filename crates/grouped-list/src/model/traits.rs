//! Ordering and identity callbacks.
//!
//! A list never inspects its elements directly. Every decision it makes
//! (where an element sorts, whether two values are the same record, whether
//! a record's visible content changed) is delegated to one of the traits in
//! this module:
//!
//! - [`ElementOrder`] drives a single [`SortedList`](super::SortedList)
//! - [`GroupCallback`] describes groups of a [`GroupedList`](super::GroupedList)
//! - [`ItemCallback`] describes the items inside those groups
//!
//! # Consistency
//!
//! `compare` must be a total order over the elements that are stored
//! together, and identity must be stable: two values with the same unique id
//! must answer `true` from `are_items_the_same`. The lists do not verify this;
//! violating it leaves the sort order unspecified.

use std::cmp::Ordering;

/// Stable identity of a group.
pub type GroupId = u64;

/// Stable identity of an item, unique across all groups of a list.
pub type ItemId = u64;

/// Render type tag reported for a flat row.
pub type ViewType = i32;

/// Default view type reported for empty-group placeholder rows.
pub const EMPTY_CELL_VIEW_TYPE: ViewType = -1;

/// Ordering and identity rules for the elements of one sorted sequence.
pub trait ElementOrder<T> {
    /// Relative sort order of two elements.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Whether two values denote the same record.
    fn are_items_the_same(&self, a: &T, b: &T) -> bool;

    /// Whether a record's visible content is unchanged between two versions.
    ///
    /// Only called when [`are_items_the_same`](Self::are_items_the_same) holds.
    fn are_contents_the_same(&self, old: &T, new: &T) -> bool;
}

/// Callbacks describing the groups of a grouped list.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use grouped_list::model::{GroupCallback, GroupId, ViewType};
///
/// #[derive(Clone, PartialEq)]
/// struct Course {
///     id: u64,
///     name: String,
/// }
///
/// struct CourseCallback;
///
/// impl GroupCallback<Course> for CourseCallback {
///     fn compare(&self, a: &Course, b: &Course) -> Ordering {
///         a.name.cmp(&b.name)
///     }
///     fn are_items_the_same(&self, a: &Course, b: &Course) -> bool {
///         a.id == b.id
///     }
///     fn are_contents_the_same(&self, old: &Course, new: &Course) -> bool {
///         old == new
///     }
///     fn group_type(&self, _group: &Course) -> ViewType {
///         0
///     }
///     fn unique_group_id(&self, group: &Course) -> GroupId {
///         group.id
///     }
/// }
/// ```
pub trait GroupCallback<G> {
    /// Relative sort order of two groups.
    fn compare(&self, a: &G, b: &G) -> Ordering;

    /// Whether two group values denote the same group.
    ///
    /// Used to find the stored version of a submitted group.
    fn are_items_the_same(&self, a: &G, b: &G) -> bool;

    /// Whether a group's header content is unchanged.
    fn are_contents_the_same(&self, old: &G, new: &G) -> bool;

    /// View type of the group's header row.
    fn group_type(&self, group: &G) -> ViewType;

    /// Stable id of a group. Keys expansion state and the item index.
    fn unique_group_id(&self, group: &G) -> GroupId;

    /// View type of the placeholder row shown for an empty group.
    fn empty_cell_type(&self, _group: &G) -> ViewType {
        EMPTY_CELL_VIEW_TYPE
    }
}

/// Callbacks describing the items of a grouped list.
///
/// Item ordering may depend on the owning group, which is passed to
/// [`compare`](Self::compare) and [`child_type`](Self::child_type).
pub trait ItemCallback<G, I> {
    /// Relative sort order of two items within `group`.
    fn compare(&self, group: &G, a: &I, b: &I) -> Ordering;

    /// Whether two item values denote the same item.
    fn are_items_the_same(&self, a: &I, b: &I) -> bool;

    /// Whether an item's visible content is unchanged.
    fn are_contents_the_same(&self, old: &I, new: &I) -> bool;

    /// View type of an item row.
    fn child_type(&self, group: &G, item: &I) -> ViewType;

    /// Stable id of an item, unique across every group.
    fn unique_item_id(&self, item: &I) -> ItemId;
}

/// Adapts a [`GroupCallback`] to the group-level sorted sequence.
///
/// Groups with equal keys are ordered by id so that the group sequence is
/// deterministic regardless of insertion order.
pub(crate) struct GroupOrder<'a, C> {
    pub(crate) callback: &'a C,
}

impl<G, C: GroupCallback<G>> ElementOrder<G> for GroupOrder<'_, C> {
    fn compare(&self, a: &G, b: &G) -> Ordering {
        self.callback.compare(a, b).then_with(|| {
            self.callback
                .unique_group_id(a)
                .cmp(&self.callback.unique_group_id(b))
        })
    }

    fn are_items_the_same(&self, a: &G, b: &G) -> bool {
        self.callback.are_items_the_same(a, b)
    }

    fn are_contents_the_same(&self, old: &G, new: &G) -> bool {
        self.callback.are_contents_the_same(old, new)
    }
}

/// Adapts an [`ItemCallback`] to one group's item sequence.
pub(crate) struct ItemOrder<'a, G, C> {
    pub(crate) group: &'a G,
    pub(crate) callback: &'a C,
}

impl<G, I, C: ItemCallback<G, I>> ElementOrder<I> for ItemOrder<'_, G, C> {
    fn compare(&self, a: &I, b: &I) -> Ordering {
        self.callback.compare(self.group, a, b)
    }

    fn are_items_the_same(&self, a: &I, b: &I) -> bool {
        self.callback.are_items_the_same(a, b)
    }

    fn are_contents_the_same(&self, old: &I, new: &I) -> bool {
        self.callback.are_contents_the_same(old, new)
    }
}
