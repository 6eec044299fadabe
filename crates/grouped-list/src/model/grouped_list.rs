//! Two-level sorted list projected onto flat row positions.
//!
//! [`GroupedList`] holds sorted groups, each with a sorted list of items, and
//! presents them to a renderer as one flat sequence of rows:
//!
//! ```text
//! 0  header  Group A
//! 1    item  a1
//! 2    item  a2
//! 3  header  Group B        (collapsed: no rows)
//! 4  header  Group C
//! 5    empty placeholder    (zero items, display_empty_cell)
//! ```
//!
//! With [`children_above_group`](GroupedListConfig::children_above_group) each
//! header follows its rows instead of preceding them.
//!
//! Every mutation reports the minimal set of structural changes to the
//! list's [`ChangeSink`] in flat coordinates, synchronously and in an order
//! such that a renderer applying them one by one always matches the list.
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use grouped_list::model::{
//!     GroupCallback, GroupId, GroupedList, ItemCallback, ItemId, RecordingSink, ViewType,
//! };
//!
//! struct Groups;
//! impl GroupCallback<u64> for Groups {
//!     fn compare(&self, a: &u64, b: &u64) -> Ordering { a.cmp(b) }
//!     fn are_items_the_same(&self, a: &u64, b: &u64) -> bool { a == b }
//!     fn are_contents_the_same(&self, _old: &u64, _new: &u64) -> bool { true }
//!     fn group_type(&self, _group: &u64) -> ViewType { 0 }
//!     fn unique_group_id(&self, group: &u64) -> GroupId { *group }
//! }
//!
//! struct Items;
//! impl ItemCallback<u64, (u64, &'static str)> for Items {
//!     fn compare(&self, _g: &u64, a: &(u64, &'static str), b: &(u64, &'static str)) -> Ordering {
//!         a.1.cmp(b.1)
//!     }
//!     fn are_items_the_same(&self, a: &(u64, &'static str), b: &(u64, &'static str)) -> bool {
//!         a.0 == b.0
//!     }
//!     fn are_contents_the_same(&self, old: &(u64, &'static str), new: &(u64, &'static str)) -> bool {
//!         old == new
//!     }
//!     fn child_type(&self, _g: &u64, _item: &(u64, &'static str)) -> ViewType { 1 }
//!     fn unique_item_id(&self, item: &(u64, &'static str)) -> ItemId { item.0 }
//! }
//!
//! let mut list = GroupedList::new(Groups, Items, RecordingSink::new());
//! list.add_or_update_item(1, (10, "b"));
//! list.add_or_update_item(1, (11, "a"));
//!
//! assert_eq!(list.size(), 3);
//! assert!(list.is_visual_group_position(0));
//! assert_eq!(list.item(1), Some(&(11, "a")));
//! assert_eq!(list.sink().inserted(), vec![(0, 1), (1, 1), (1, 1)]);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use grouped_list_core::PerfSpan;
use grouped_list_core::logging::targets;

use super::config::GroupedListConfig;
use super::sink::ChangeSink;
use super::sorted_list::SortedList;
use super::traits::{
    ElementOrder, GroupCallback, GroupId, GroupOrder, ItemCallback, ItemId, ItemOrder, ViewType,
};
use crate::error::{Error, Result};

/// Classification of one flat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualRow<'a, G, I> {
    /// A group header.
    Header(&'a G),
    /// An item of an expanded group.
    Item {
        /// The owning group.
        group: &'a G,
        /// The item.
        item: &'a I,
    },
    /// The placeholder row of an empty group.
    Placeholder(&'a G),
}

impl<'a, G, I> VisualRow<'a, G, I> {
    /// The group this row belongs to.
    pub fn group(&self) -> &'a G {
        match *self {
            Self::Header(group) | Self::Placeholder(group) => group,
            Self::Item { group, .. } => group,
        }
    }

    /// The item shown in this row, if any.
    pub fn item(&self) -> Option<&'a I> {
        match *self {
            Self::Item { item, .. } => Some(item),
            _ => None,
        }
    }
}

/// Where a flat position falls inside one group's block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Header,
    Item(usize),
    Placeholder,
}

/// Block starts and visible row counts of every group, in stored order.
///
/// Used to translate group-level indices into flat positions while the group
/// sequence is mutated.
struct BlockLayout {
    /// `starts[i]` is the first flat position of group `i`; one extra entry
    /// holds the total size.
    starts: Vec<usize>,
    rows: Vec<usize>,
    children_above: bool,
}

impl BlockLayout {
    fn header(&self, index: usize) -> usize {
        let rows = if self.children_above { self.rows[index] } else { 0 };
        self.starts[index] + rows
    }

    fn moved_header(&self, from: usize, to: usize) -> usize {
        let block = 1 + self.rows[from];
        let start = if to > from {
            self.starts[to + 1] - block
        } else {
            self.starts[to]
        };
        let rows = if self.children_above { self.rows[from] } else { 0 };
        start + rows
    }
}

/// Translates group-sequence events into header row events.
struct HeaderSink<'a, S: ?Sized> {
    sink: &'a mut S,
    layout: BlockLayout,
}

impl<S: ChangeSink + ?Sized> ChangeSink for HeaderSink<'_, S> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        let flat = self.layout.starts[position];
        tracing::trace!(target: targets::GROUPED_LIST, group = position, flat, "header inserted");
        self.sink.on_inserted(flat, count);
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        let flat = self.layout.header(position);
        tracing::trace!(target: targets::GROUPED_LIST, group = position, flat, "header removed");
        self.sink.on_removed(flat, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        let flat_from = self.layout.header(from);
        let flat_to = self.layout.moved_header(from, to);
        tracing::trace!(target: targets::GROUPED_LIST, from, to, flat_from, flat_to, "header moved");
        self.sink.on_moved(flat_from, flat_to);
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        self.sink.on_changed(self.layout.header(position), count);
    }
}

/// Translates one group's item events into flat row events.
///
/// Events of collapsed groups are swallowed.
struct RowSink<'a, S: ?Sized> {
    sink: &'a mut S,
    offset: usize,
    visible: bool,
}

impl<S: ChangeSink + ?Sized> ChangeSink for RowSink<'_, S> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        if self.visible {
            self.sink.on_inserted(self.offset + position, count);
        }
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        if self.visible {
            self.sink.on_removed(self.offset + position, count);
        }
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        if self.visible {
            self.sink.on_moved(self.offset + from, self.offset + to);
        }
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        if self.visible {
            self.sink.on_changed(self.offset + position, count);
        }
    }
}

/// A sorted list of groups, each holding a sorted list of items.
///
/// # Type Parameters
///
/// - `G`: group value
/// - `I`: item value
/// - `GC`: [`GroupCallback`] ordering and identifying groups
/// - `IC`: [`ItemCallback`] ordering and identifying items
/// - `S`: [`ChangeSink`] receiving flat structural changes
///
/// # Flat layout
///
/// Each group occupies one block: its header plus its visible rows. A group
/// with items shows them when expanded and nothing when collapsed. A group
/// without items shows a single placeholder row when
/// [`display_empty_cell`](GroupedListConfig::display_empty_cell) is set,
/// regardless of its expansion state.
///
/// # Identity
///
/// Item ids are unique across the whole list. Submitting an item whose id is
/// already stored under another group moves it to the new group.
pub struct GroupedList<G, I, GC, IC, S> {
    groups: SortedList<G>,
    sections: HashMap<GroupId, SortedList<I>>,
    /// Expansion state by group id. Survives group removal so a reloaded
    /// group comes back the way the user left it.
    expanded: HashMap<GroupId, bool>,
    owners: HashMap<ItemId, GroupId>,
    group_callback: GC,
    item_callback: IC,
    config: GroupedListConfig,
    sink: S,
}

impl<G, I, GC, IC, S> std::fmt::Debug for GroupedList<G, I, GC, IC, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupedList")
            .field("groups", &self.groups.len())
            .field("items", &self.owners.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<G, I, GC, IC, S> GroupedList<G, I, GC, IC, S>
where
    GC: GroupCallback<G>,
    IC: ItemCallback<G, I>,
    S: ChangeSink,
{
    /// Creates an empty list with the default configuration.
    pub fn new(group_callback: GC, item_callback: IC, sink: S) -> Self {
        Self::with_config(GroupedListConfig::default(), group_callback, item_callback, sink)
    }

    /// Creates an empty list with `config`.
    pub fn with_config(config: GroupedListConfig, group_callback: GC, item_callback: IC, sink: S) -> Self {
        Self {
            groups: SortedList::new(),
            sections: HashMap::new(),
            expanded: HashMap::new(),
            owners: HashMap::new(),
            group_callback,
            item_callback,
            config,
            sink,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GroupedListConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Fails with [`Error::ConfigLocked`] once the list holds any group, since
    /// changing the layout rules would silently desynchronize renderers.
    pub fn set_config(&mut self, config: GroupedListConfig) -> Result<()> {
        if !self.groups.is_empty() {
            return Err(Error::ConfigLocked {
                groups: self.groups.len(),
            });
        }
        self.config = config;
        Ok(())
    }

    /// The change sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The change sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the list, returning its change sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The group callbacks.
    pub fn group_callback(&self) -> &GC {
        &self.group_callback
    }

    /// The item callbacks.
    pub fn item_callback(&self) -> &IC {
        &self.item_callback
    }

    // =========================================================================
    // Layout helpers
    // =========================================================================

    fn group_id(&self, group: &G) -> GroupId {
        self.group_callback.unique_group_id(group)
    }

    fn stored_group_position(&self, id: GroupId) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| self.group_callback.unique_group_id(group) == id)
    }

    fn is_expanded_id(&self, id: GroupId) -> bool {
        self.expanded
            .get(&id)
            .copied()
            .unwrap_or(self.config.expanded_by_default)
    }

    fn item_count_id(&self, id: GroupId) -> usize {
        self.sections.get(&id).map_or(0, SortedList::len)
    }

    fn visible_rows_id(&self, id: GroupId) -> usize {
        let count = self.item_count_id(id);
        if count == 0 {
            usize::from(self.config.display_empty_cell)
        } else if self.is_expanded_id(id) {
            count
        } else {
            0
        }
    }

    fn visible_rows_at(&self, index: usize) -> usize {
        self.visible_rows_id(self.group_id(&self.groups[index]))
    }

    fn block_start(&self, index: usize) -> usize {
        self.groups
            .iter()
            .take(index)
            .map(|group| 1 + self.visible_rows_id(self.group_id(group)))
            .sum()
    }

    fn header_position_at(&self, index: usize) -> usize {
        let start = self.block_start(index);
        if self.config.children_above_group {
            start + self.visible_rows_at(index)
        } else {
            start
        }
    }

    /// Flat position of the first row (item or placeholder) of a group.
    fn rows_start_at(&self, index: usize) -> usize {
        let start = self.block_start(index);
        if self.config.children_above_group {
            start
        } else {
            start + 1
        }
    }

    /// Snapshot of the current layout. `hidden` is treated as showing no rows.
    fn block_layout(&self, hidden: Option<usize>) -> BlockLayout {
        let mut starts = Vec::with_capacity(self.groups.len() + 1);
        let mut rows = Vec::with_capacity(self.groups.len());
        let mut start = 0;
        for (index, group) in self.groups.iter().enumerate() {
            let visible = if hidden == Some(index) {
                0
            } else {
                self.visible_rows_id(self.group_id(group))
            };
            starts.push(start);
            rows.push(visible);
            start += 1 + visible;
        }
        starts.push(start);
        BlockLayout {
            starts,
            rows,
            children_above: self.config.children_above_group,
        }
    }

    /// Finds the group and slot a flat position falls in.
    fn locate(&self, position: usize) -> Option<(usize, Slot)> {
        let above = self.config.children_above_group;
        let mut start = 0;
        for (index, group) in self.groups.iter().enumerate() {
            let id = self.group_id(group);
            let rows = self.visible_rows_id(id);
            let end = start + 1 + rows;
            if position < end {
                let offset = position - start;
                let header_offset = if above { rows } else { 0 };
                let slot = if offset == header_offset {
                    Slot::Header
                } else if self.item_count_id(id) == 0 {
                    Slot::Placeholder
                } else if above {
                    Slot::Item(offset)
                } else {
                    Slot::Item(offset - 1)
                };
                return Some((index, slot));
            }
            start = end;
        }
        None
    }

    // =========================================================================
    // Group mutation
    // =========================================================================

    /// Inserts a group, or updates the stored group with the same id.
    ///
    /// A new group announces its header and, with
    /// [`display_empty_cell`](GroupedListConfig::display_empty_cell), its
    /// placeholder. An update announces a header change when content
    /// differs, and re-sorts the group (moving its rows along) when its sort
    /// key changed.
    ///
    /// Returns the group's index among groups after the operation.
    pub fn add_or_update_group(&mut self, group: G) -> usize {
        self.upsert_group(group, true).0
    }

    /// Calls [`add_or_update_group`](Self::add_or_update_group) for every group.
    pub fn add_or_update_all_groups<T>(&mut self, groups: T)
    where
        T: IntoIterator<Item = G>,
    {
        let groups = groups.into_iter();
        let _span = PerfSpan::batch("add_or_update_all_groups", groups.size_hint().0);
        for group in groups {
            self.upsert_group(group, true);
        }
    }

    /// Returns the group's stored index and whether it was created.
    fn upsert_group(&mut self, group: G, with_placeholder: bool) -> (usize, bool) {
        let id = self.group_id(&group);
        let order = GroupOrder {
            callback: &self.group_callback,
        };
        match self.groups.index_of(&group, &order) {
            Some(index) => (self.update_group(index, group), false),
            None => (self.insert_group(id, group, with_placeholder), true),
        }
    }

    fn insert_group(&mut self, id: GroupId, group: G, with_placeholder: bool) -> usize {
        let layout = self.block_layout(None);
        let order = GroupOrder {
            callback: &self.group_callback,
        };
        let mut header_sink = HeaderSink {
            sink: &mut self.sink,
            layout,
        };
        let index = self.groups.add(group, &order, &mut header_sink);
        self.sections.entry(id).or_default();

        if with_placeholder && self.config.display_empty_cell {
            let placeholder = self.rows_start_at(index);
            self.sink.on_inserted(placeholder, 1);
        }

        tracing::debug!(target: targets::GROUPED_LIST, group_id = id, index, "group created");
        index
    }

    fn update_group(&mut self, index: usize, group: G) -> usize {
        let order = GroupOrder {
            callback: &self.group_callback,
        };
        let key_changed = order.compare(&self.groups[index], &group) != Ordering::Equal;

        // A re-sorted group travels without its rows; they are taken out
        // before the header moves and put back at the destination.
        let carried = if key_changed {
            self.visible_rows_at(index)
        } else {
            0
        };
        if carried > 0 {
            let start = self.rows_start_at(index);
            self.sink.on_removed(start, carried);
        }

        let layout = self.block_layout(key_changed.then_some(index));
        let order = GroupOrder {
            callback: &self.group_callback,
        };
        let mut header_sink = HeaderSink {
            sink: &mut self.sink,
            layout,
        };
        let outcome =
            self.groups
                .add_or_update(group, &order, self.config.update_notification, &mut header_sink);
        let new_index = outcome.index();

        if carried > 0 {
            let start = self.rows_start_at(new_index);
            self.sink.on_inserted(start, carried);
        }
        new_index
    }

    /// Removes a group and all of its items.
    ///
    /// Announces the item removals from the last stored item to the first,
    /// the placeholder removal when one was shown, then the header removal.
    /// Returns `false` if the group is not stored.
    pub fn remove_group(&mut self, group: &G) -> bool {
        let order = GroupOrder {
            callback: &self.group_callback,
        };
        let Some(index) = self.groups.index_of(group, &order) else {
            return false;
        };
        let id = self.group_id(&self.groups[index]);

        let offset = self.rows_start_at(index);
        let visible = self.is_expanded_id(id);
        if let Some(items) = self.sections.get_mut(&id) {
            let had_items = !items.is_empty();
            let mut row_sink = RowSink {
                sink: &mut self.sink,
                offset,
                visible,
            };
            while let Some(last) = items.len().checked_sub(1) {
                if let Some(item) = items.remove_at(last, &mut row_sink) {
                    self.owners.remove(&self.item_callback.unique_item_id(&item));
                }
            }
            if !had_items && self.config.display_empty_cell {
                self.sink.on_removed(offset, 1);
            }
        }

        self.remove_group_at(index);
        true
    }

    /// Removes the header of an already emptied group.
    fn remove_group_at(&mut self, index: usize) {
        let id = self.group_id(&self.groups[index]);
        let layout = self.block_layout(Some(index));
        let mut header_sink = HeaderSink {
            sink: &mut self.sink,
            layout,
        };
        self.groups.remove_at(index, &mut header_sink);
        self.sections.remove(&id);
        tracing::debug!(target: targets::GROUPED_LIST, group_id = id, index, "group removed");
    }

    // =========================================================================
    // Item mutation
    // =========================================================================

    /// Inserts an item into `group`, or updates the stored item with the same
    /// id.
    ///
    /// The group is upserted first, so it is created (expanded per
    /// configuration, without announcing a placeholder) if missing, and
    /// updated otherwise. An item stored under a different group is moved
    /// here. The first item of a group showing a placeholder replaces it.
    ///
    /// Returns the item's index within its group.
    pub fn add_or_update_item(&mut self, group: G, item: I) -> usize {
        let group_id = self.group_id(&group);
        let item_id = self.item_callback.unique_item_id(&item);

        if let Some(&owner) = self.owners.get(&item_id)
            && owner != group_id
        {
            self.detach_item(owner, &item, true);
        }

        let (index, created) = self.upsert_group(group, false);
        self.upsert_item(index, group_id, item_id, item, created)
    }

    /// Adds or updates every item in `group`.
    ///
    /// An empty batch changes nothing; in particular the group is not created.
    pub fn add_or_update_all_items<T>(&mut self, group: G, items: T)
    where
        G: Clone,
        T: IntoIterator<Item = I>,
    {
        let items: Vec<I> = items.into_iter().collect();
        if items.is_empty() {
            return;
        }
        let _span = PerfSpan::batch("add_or_update_all_items", items.len());
        for item in items {
            self.add_or_update_item(group.clone(), item);
        }
    }

    fn upsert_item(&mut self, index: usize, group_id: GroupId, item_id: ItemId, item: I, created: bool) -> usize {
        let is_new = !self.owners.contains_key(&item_id);
        let offset = self.rows_start_at(index);
        let visible = self.is_expanded_id(group_id);

        if is_new && !created && self.config.display_empty_cell && self.item_count_id(group_id) == 0 {
            self.sink.on_removed(offset, 1);
        }

        let order = ItemOrder {
            group: &self.groups[index],
            callback: &self.item_callback,
        };
        let items = self.sections.entry(group_id).or_default();
        let mut row_sink = RowSink {
            sink: &mut self.sink,
            offset,
            visible,
        };
        let item_index = if is_new {
            items.add(item, &order, &mut row_sink)
        } else {
            items
                .add_or_update(item, &order, self.config.update_notification, &mut row_sink)
                .index()
        };
        self.owners.insert(item_id, group_id);
        item_index
    }

    /// Removes an item, removing its group too if it becomes empty and no
    /// placeholder is configured.
    ///
    /// Returns `false` if the item is not stored.
    pub fn remove_item(&mut self, item: &I) -> bool {
        self.remove_item_with(item, true)
    }

    /// Removes an item.
    ///
    /// When the group becomes empty it shows its placeholder if
    /// [`display_empty_cell`](GroupedListConfig::display_empty_cell) is set;
    /// otherwise it is removed when `remove_group_if_empty` is `true` and
    /// kept as a bare header when `false`.
    pub fn remove_item_with(&mut self, item: &I, remove_group_if_empty: bool) -> bool {
        let item_id = self.item_callback.unique_item_id(item);
        match self.owners.get(&item_id) {
            Some(&group_id) => self.detach_item(group_id, item, remove_group_if_empty),
            None => false,
        }
    }

    fn detach_item(&mut self, group_id: GroupId, item: &I, remove_group_if_empty: bool) -> bool {
        let item_id = self.item_callback.unique_item_id(item);
        let Some(index) = self.stored_group_position(group_id) else {
            self.owners.remove(&item_id);
            return false;
        };
        let offset = self.rows_start_at(index);
        let visible = self.is_expanded_id(group_id);

        let order = ItemOrder {
            group: &self.groups[index],
            callback: &self.item_callback,
        };
        let Some(items) = self.sections.get_mut(&group_id) else {
            return false;
        };
        let Some(item_index) = items.index_of(item, &order) else {
            self.owners.remove(&item_id);
            return false;
        };

        let mut row_sink = RowSink {
            sink: &mut self.sink,
            offset,
            visible,
        };
        items.remove_at(item_index, &mut row_sink);
        let emptied = items.is_empty();
        self.owners.remove(&item_id);

        if emptied {
            if self.config.display_empty_cell {
                self.sink.on_inserted(offset, 1);
            } else if remove_group_if_empty {
                self.remove_group_at(index);
            }
        }
        true
    }

    /// Removes every group and item with a single removal of all rows.
    ///
    /// Expansion state is kept, so groups added again come back expanded or
    /// collapsed as before.
    pub fn clear(&mut self) {
        let _span = PerfSpan::new("clear");
        let size = self.size();
        self.groups = SortedList::new();
        self.sections.clear();
        self.owners.clear();
        if size > 0 {
            self.sink.on_removed(0, size);
        }
        tracing::debug!(target: targets::GROUPED_LIST, rows = size, "cleared");
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Whether `group` is expanded. Unknown groups report the configured
    /// default.
    pub fn is_group_expanded(&self, group: &G) -> bool {
        self.is_expanded_id(self.group_id(group))
    }

    /// Expands a collapsed group, announcing its rows and, when `notify` is
    /// set, a change of its header.
    ///
    /// Returns `true` if the state changed.
    pub fn expand_group(&mut self, group: &G, notify: bool) -> bool {
        self.expand_id(self.group_id(group), notify)
    }

    /// Collapses an expanded group, announcing (when `notify` is set) a
    /// change of its header and then the removal of its rows.
    ///
    /// Returns `true` if the state changed. Always `false` when
    /// [`disallow_collapse`](GroupedListConfig::disallow_collapse) is set.
    pub fn collapse_group(&mut self, group: &G, notify: bool) -> bool {
        self.collapse_id(self.group_id(group), notify)
    }

    /// Toggles a group's expansion without header notification.
    pub fn expand_collapse_group(&mut self, group: &G) -> bool {
        self.expand_collapse_group_with(group, false)
    }

    /// Toggles a group's expansion.
    pub fn expand_collapse_group_with(&mut self, group: &G, notify: bool) -> bool {
        let id = self.group_id(group);
        if self.is_expanded_id(id) {
            self.collapse_id(id, notify)
        } else {
            self.expand_id(id, notify)
        }
    }

    /// Expands every group, without header notifications.
    pub fn expand_all(&mut self) {
        for id in self.group_ids() {
            self.expand_id(id, false);
        }
    }

    /// Collapses every group, without header notifications.
    pub fn collapse_all(&mut self) {
        for id in self.group_ids() {
            self.collapse_id(id, false);
        }
    }

    /// Sets the stored expansion state of the given group ids.
    ///
    /// Only the state is updated; nothing is announced, so this is meant for
    /// restoring state before the groups are added. Ignored when
    /// [`disallow_collapse`](GroupedListConfig::disallow_collapse) is set.
    pub fn mark_expanded<T>(&mut self, ids: T, expanded: bool)
    where
        T: IntoIterator<Item = GroupId>,
    {
        if self.config.disallow_collapse {
            return;
        }
        for id in ids {
            self.expanded.insert(id, expanded);
        }
    }

    /// Forgets every stored expansion state. Nothing is announced.
    pub fn clear_expanded(&mut self) {
        self.expanded.clear();
    }

    fn group_ids(&self) -> Vec<GroupId> {
        self.groups.iter().map(|group| self.group_id(group)).collect()
    }

    fn expand_id(&mut self, id: GroupId, notify: bool) -> bool {
        if self.is_expanded_id(id) {
            return false;
        }
        let Some(index) = self.stored_group_position(id) else {
            return false;
        };

        let before = self.visible_rows_id(id);
        self.expanded.insert(id, true);
        let after = self.visible_rows_id(id);
        if after > before {
            let start = self.rows_start_at(index);
            self.sink.on_inserted(start, after - before);
        }
        if notify {
            let header = self.header_position_at(index);
            self.sink.on_changed(header, 1);
        }
        tracing::debug!(target: targets::GROUPED_LIST, group_id = id, rows = after, "group expanded");
        true
    }

    fn collapse_id(&mut self, id: GroupId, notify: bool) -> bool {
        if self.config.disallow_collapse || !self.is_expanded_id(id) {
            return false;
        }
        let Some(index) = self.stored_group_position(id) else {
            return false;
        };

        if notify {
            let header = self.header_position_at(index);
            self.sink.on_changed(header, 1);
        }
        let before = self.visible_rows_id(id);
        self.expanded.insert(id, false);
        let after = self.visible_rows_id(id);
        if before > after {
            let start = self.rows_start_at(index);
            self.sink.on_removed(start, before - after);
        }
        tracing::debug!(target: targets::GROUPED_LIST, group_id = id, rows = before, "group collapsed");
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Total number of flat rows.
    pub fn size(&self) -> usize {
        self.groups
            .iter()
            .map(|group| 1 + self.visible_rows_id(self.group_id(group)))
            .sum()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of items stored in `group`, visible or not.
    pub fn group_item_count(&self, group: &G) -> usize {
        self.item_count_id(self.group_id(group))
    }

    /// Groups in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = &G> + '_ {
        self.groups.iter()
    }

    /// Items of `group` in sorted order.
    pub fn items(&self, group: &G) -> &[I] {
        self.sections
            .get(&self.group_id(group))
            .map(SortedList::as_slice)
            .unwrap_or(&[])
    }

    /// The stored group with `id`.
    pub fn group_by_id(&self, id: GroupId) -> Option<&G> {
        self.stored_group_position(id).map(|index| &self.groups[index])
    }

    /// The group owning the flat row at `position`.
    pub fn group(&self, position: usize) -> Option<&G> {
        self.locate(position).map(|(index, _)| &self.groups[index])
    }

    /// Classifies the flat row at `position`.
    pub fn row(&self, position: usize) -> Option<VisualRow<'_, G, I>> {
        let (index, slot) = self.locate(position)?;
        let group = &self.groups[index];
        Some(match slot {
            Slot::Header => VisualRow::Header(group),
            Slot::Placeholder => VisualRow::Placeholder(group),
            Slot::Item(item_index) => VisualRow::Item {
                group,
                item: self.sections.get(&self.group_id(group))?.get(item_index)?,
            },
        })
    }

    /// The item shown at flat `position`, if that row is an item.
    pub fn item(&self, position: usize) -> Option<&I> {
        self.row(position)?.item()
    }

    /// The item at `stored` index within `group`, visible or not.
    pub fn item_in_group(&self, group: &G, stored: usize) -> Option<&I> {
        self.sections.get(&self.group_id(group))?.get(stored)
    }

    /// Flat position of the header of the group owning `position`.
    pub fn group_visual_position(&self, position: usize) -> Option<usize> {
        self.locate(position)
            .map(|(index, _)| self.header_position_at(index))
    }

    /// Flat position of the header of the group with `id`.
    pub fn group_header_position(&self, id: GroupId) -> Option<usize> {
        self.stored_group_position(id)
            .map(|index| self.header_position_at(index))
    }

    /// Index of `item` within `group`, visible or not.
    pub fn stored_index_of_item(&self, group: &G, item: &I) -> Option<usize> {
        let order = ItemOrder {
            group,
            callback: &self.item_callback,
        };
        self.sections.get(&self.group_id(group))?.index_of(item, &order)
    }

    /// Flat position of the item with `id`, or `None` if it is not stored or
    /// its group is collapsed.
    pub fn item_visual_position(&self, id: ItemId) -> Option<usize> {
        let group_id = *self.owners.get(&id)?;
        if !self.is_expanded_id(group_id) {
            return None;
        }
        let index = self.stored_group_position(group_id)?;
        let item_index = self
            .sections
            .get(&group_id)?
            .iter()
            .position(|stored| self.item_callback.unique_item_id(stored) == id)?;
        Some(self.rows_start_at(index) + item_index)
    }

    /// Whether the row at `position` is a group header.
    pub fn is_visual_group_position(&self, position: usize) -> bool {
        matches!(self.locate(position), Some((_, Slot::Header)))
    }

    /// Whether the row at `position` is an empty-group placeholder.
    pub fn is_visual_empty_position(&self, position: usize) -> bool {
        matches!(self.locate(position), Some((_, Slot::Placeholder)))
    }

    /// View type of the row at `position`.
    ///
    /// Headers report [`GroupCallback::group_type`], items
    /// [`ItemCallback::child_type`] and placeholders
    /// [`GroupCallback::empty_cell_type`].
    pub fn item_view_type(&self, position: usize) -> Option<ViewType> {
        Some(match self.row(position)? {
            VisualRow::Header(group) => self.group_callback.group_type(group),
            VisualRow::Item { group, item } => self.item_callback.child_type(group, item),
            VisualRow::Placeholder(group) => self.group_callback.empty_cell_type(group),
        })
    }
}
