//! Property-based tests for the grouped list.
//!
//! Random operation sequences are applied to a list while the recorded change
//! events are replayed onto a shadow copy of its rows. After every operation
//! the shadow must line up with the list: rows that survived an operation
//! have to be exactly where the events moved them.

mod common;

use grouped_list::model::{ChangeEvent, GroupedListConfig, UpdateNotification, VisualRow};
use proptest::prelude::*;

use common::{Entry, TestList, list_with};

// =============================================================================
// Test helpers
// =============================================================================

/// Identity of one flat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKey {
    Header(u64),
    Item(u64),
    Placeholder(u64),
}

#[derive(Clone, Debug)]
enum Op {
    AddGroup { group: u64, key: i64, data: u32 },
    AddItem { group: u64, group_key: i64, item: u64, key: i64, data: u32 },
    AddItems { group: u64, group_key: i64, first: u64, count: usize },
    RemoveGroup { group: u64 },
    RemoveItem { item: u64, remove_group: bool },
    Toggle { group: u64, notify: bool },
    ExpandAll,
    CollapseAll,
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..5u64, 0..6i64, 0..2u32)
            .prop_map(|(group, key, data)| Op::AddGroup { group, key, data }),
        6 => (0..5u64, 0..6i64, 0..20u64, 0..6i64, 0..2u32).prop_map(
            |(group, group_key, item, key, data)| Op::AddItem { group, group_key, item, key, data }
        ),
        1 => (0..5u64, 0..6i64, 0..20u64, 0..5usize).prop_map(|(group, group_key, first, count)| {
            Op::AddItems { group, group_key, first, count }
        }),
        2 => (0..5u64).prop_map(|group| Op::RemoveGroup { group }),
        3 => (0..20u64, any::<bool>())
            .prop_map(|(item, remove_group)| Op::RemoveItem { item, remove_group }),
        3 => (0..5u64, any::<bool>()).prop_map(|(group, notify)| Op::Toggle { group, notify }),
        1 => Just(Op::ExpandAll),
        1 => Just(Op::CollapseAll),
        1 => Just(Op::Clear),
    ]
}

fn arbitrary_config() -> impl Strategy<Value = GroupedListConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(expanded, empty_cell, above, compact, pinned)| {
            let notification = if compact {
                UpdateNotification::Compact
            } else {
                UpdateNotification::Legacy
            };
            GroupedListConfig::new()
                .expanded_by_default(expanded)
                .display_empty_cell(empty_cell)
                .children_above_group(above)
                .disallow_collapse(pinned)
                .update_notification(notification)
        },
    )
}

fn apply(list: &mut TestList, op: &Op) {
    match *op {
        Op::AddGroup { group, key, data } => {
            list.add_or_update_group(Entry::new(key, group).with_data(data));
        }
        Op::AddItem { group, group_key, item, key, data } => {
            list.add_or_update_item(Entry::new(group_key, group), Entry::new(key, item).with_data(data));
        }
        Op::AddItems { group, group_key, first, count } => {
            let items = (0..count as u64).map(|n| Entry::new(n as i64, first + n));
            list.add_or_update_all_items(Entry::new(group_key, group), items);
        }
        Op::RemoveGroup { group } => {
            list.remove_group(&Entry::new(0, group));
        }
        Op::RemoveItem { item, remove_group } => {
            list.remove_item_with(&Entry::new(0, item), remove_group);
        }
        Op::Toggle { group, notify } => {
            list.expand_collapse_group_with(&Entry::new(0, group), notify);
        }
        Op::ExpandAll => list.expand_all(),
        Op::CollapseAll => list.collapse_all(),
        Op::Clear => list.clear(),
    }
}

fn actual_rows(list: &TestList) -> Vec<RowKey> {
    (0..list.size())
        .map(|position| match list.row(position) {
            Some(VisualRow::Header(group)) => RowKey::Header(group.id),
            Some(VisualRow::Item { item, .. }) => RowKey::Item(item.id),
            Some(VisualRow::Placeholder(group)) => RowKey::Placeholder(group.id),
            None => panic!("no row at {position} of {}", list.size()),
        })
        .collect()
}

/// Replays `events` onto `shadow`. Inserted rows are unknown until compared.
fn replay(shadow: &mut Vec<Option<RowKey>>, events: &[ChangeEvent]) -> Result<(), TestCaseError> {
    for event in events {
        match *event {
            ChangeEvent::Inserted { position, count } => {
                prop_assert!(position <= shadow.len(), "{event:?} past end {}", shadow.len());
                shadow.splice(position..position, std::iter::repeat_n(None, count));
            }
            ChangeEvent::Removed { position, count } => {
                prop_assert!(position + count <= shadow.len(), "{event:?} past end {}", shadow.len());
                shadow.drain(position..position + count);
            }
            ChangeEvent::Moved { from, to } => {
                prop_assert!(from < shadow.len() && to < shadow.len(), "{event:?} out of range");
                let row = shadow.remove(from);
                shadow.insert(to, row);
            }
            ChangeEvent::Changed { position, count } => {
                prop_assert!(position + count <= shadow.len(), "{event:?} past end {}", shadow.len());
            }
        }
    }
    Ok(())
}

fn check_structure(list: &TestList) -> Result<(), TestCaseError> {
    let groups: Vec<&Entry> = list.groups().collect();
    for pair in groups.windows(2) {
        prop_assert!((pair[0].key, pair[0].id) < (pair[1].key, pair[1].id), "groups out of order");
    }

    let mut expected_size = 0;
    for group in &groups {
        let items = list.items(group);
        for pair in items.windows(2) {
            prop_assert!(pair[0].key <= pair[1].key, "items out of order in group {}", group.id);
        }
        let rows = if items.is_empty() {
            usize::from(list.config().display_empty_cell)
        } else if list.is_group_expanded(group) {
            items.len()
        } else {
            0
        };
        expected_size += 1 + rows;

        let config = list.config();
        if config.disallow_collapse && config.expanded_by_default {
            prop_assert!(list.is_group_expanded(group), "group {} collapsed while pinned", group.id);
        }

        prop_assert_eq!(list.group_header_position(group.id).map(|p| list.is_visual_group_position(p)), Some(true));
        for item in items {
            match list.item_visual_position(item.id) {
                Some(position) => {
                    prop_assert_eq!(list.item(position).map(|i| i.id), Some(item.id));
                }
                None => {
                    prop_assert!(!list.is_group_expanded(group));
                }
            }
        }
    }
    prop_assert_eq!(list.size(), expected_size);
    Ok(())
}

// =============================================================================
// Layout properties
// =============================================================================

proptest! {
    /// Replaying the change events keeps every surviving row in place.
    #[test]
    fn prop_events_track_rows(config in arbitrary_config(), ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut list = list_with(config);
        let mut shadow: Vec<Option<RowKey>> = Vec::new();

        for op in &ops {
            apply(&mut list, op);
            let events = list.sink_mut().take();
            replay(&mut shadow, &events)?;

            let actual = actual_rows(&list);
            prop_assert_eq!(shadow.len(), actual.len(), "size mismatch after {:?}", op);
            for (position, (seen, row)) in shadow.iter().zip(&actual).enumerate() {
                if let Some(seen) = seen {
                    prop_assert_eq!(seen, row, "row {} mismatch after {:?}", position, op);
                }
            }
            shadow = actual.into_iter().map(Some).collect();
        }
    }

    /// Sorting, sizing and position lookups agree after any sequence.
    #[test]
    fn prop_structure_consistent(config in arbitrary_config(), ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut list = list_with(config);
        for op in &ops {
            apply(&mut list, op);
            check_structure(&list)?;
        }
    }

    /// The net size change of the events equals the change in size.
    #[test]
    fn prop_event_deltas_sum_to_size(config in arbitrary_config(), ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut list = list_with(config);
        let mut size: isize = 0;
        for op in &ops {
            apply(&mut list, op);
            size += list.sink_mut().take().iter().map(ChangeEvent::size_delta).sum::<isize>();
            prop_assert_eq!(size, list.size() as isize);
        }
    }

    /// Submitting stored values again changes nothing.
    #[test]
    fn prop_resubmit_is_silent(config in arbitrary_config(), ops in prop::collection::vec(arbitrary_op(), 1..30)) {
        let mut list = list_with(config);
        for op in &ops {
            apply(&mut list, op);
        }
        list.sink_mut().clear();

        let groups: Vec<Entry> = list.groups().cloned().collect();
        for group in &groups {
            list.add_or_update_group(group.clone());
            let items = list.items(group).to_vec();
            for item in items {
                list.add_or_update_item(group.clone(), item);
            }
        }
        prop_assert!(list.sink().is_empty(), "unexpected events: {:?}", list.sink().events());
    }

    /// Collapsing then expanding a group restores the flat layout.
    #[test]
    fn prop_collapse_expand_roundtrip(ops in prop::collection::vec(arbitrary_op(), 1..30), notify in any::<bool>()) {
        let mut list = list_with(GroupedListConfig::default());
        for op in &ops {
            apply(&mut list, op);
        }
        list.expand_all();
        let before = actual_rows(&list);

        let groups: Vec<Entry> = list.groups().cloned().collect();
        for group in &groups {
            list.collapse_group(group, notify);
        }
        for group in &groups {
            list.expand_group(group, notify);
        }
        prop_assert_eq!(actual_rows(&list), before);
    }
}
