//! Shared fixtures for grouped-list integration tests.

#![allow(dead_code)]

use std::cmp::Ordering;

use grouped_list::model::{
    GroupCallback, GroupId, GroupedList, GroupedListConfig, ItemCallback, ItemId, RecordingSink,
    ViewType,
};

pub const TYPE_HEADER: ViewType = 100;
pub const TYPE_ITEM: ViewType = 101;

/// A record used both as group and as item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: u64,
    pub key: i64,
    pub data: u32,
}

impl Entry {
    pub fn new(key: i64, id: u64) -> Self {
        Self { id, key, data: 0 }
    }

    pub fn with_key(&self, key: i64) -> Self {
        Self { key, ..self.clone() }
    }

    pub fn with_data(&self, data: u32) -> Self {
        Self { data, ..self.clone() }
    }
}

/// `count` entries keyed `0..count` with ids starting at `id_start`.
pub fn entries(count: usize, id_start: u64) -> Vec<Entry> {
    (0..count)
        .map(|i| Entry::new(i as i64, id_start + i as u64))
        .collect()
}

pub struct EntryGroups;

impl GroupCallback<Entry> for EntryGroups {
    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        a.key.cmp(&b.key)
    }

    fn are_items_the_same(&self, a: &Entry, b: &Entry) -> bool {
        a.id == b.id
    }

    fn are_contents_the_same(&self, old: &Entry, new: &Entry) -> bool {
        old.key == new.key && old.data == new.data
    }

    fn group_type(&self, _group: &Entry) -> ViewType {
        TYPE_HEADER
    }

    fn unique_group_id(&self, group: &Entry) -> GroupId {
        group.id
    }
}

pub struct EntryItems;

impl ItemCallback<Entry, Entry> for EntryItems {
    fn compare(&self, _group: &Entry, a: &Entry, b: &Entry) -> Ordering {
        a.key.cmp(&b.key)
    }

    fn are_items_the_same(&self, a: &Entry, b: &Entry) -> bool {
        a.id == b.id
    }

    fn are_contents_the_same(&self, old: &Entry, new: &Entry) -> bool {
        old.key == new.key && old.data == new.data
    }

    fn child_type(&self, _group: &Entry, _item: &Entry) -> ViewType {
        TYPE_ITEM
    }

    fn unique_item_id(&self, item: &Entry) -> ItemId {
        item.id
    }
}

pub type TestList = GroupedList<Entry, Entry, EntryGroups, EntryItems, RecordingSink>;

pub fn list() -> TestList {
    list_with(GroupedListConfig::default())
}

pub fn list_with(config: GroupedListConfig) -> TestList {
    GroupedList::with_config(config, EntryGroups, EntryItems, RecordingSink::new())
}
