//! Text rendering of a list's flat layout.
//!
//! When a renderer falls out of sync with its list, the quickest check is to
//! print what the list believes the rows are:
//!
//! ```text
//! Layout (5 rows, 2 groups):
//! ├── [0] header #1 (type 100)
//! │   ├── [1] item #10 (type 200)
//! │   └── [2] item #11 (type 200)
//! └── [3] header #2 (type 100)
//!     └── [4] empty (type -1)
//! ```

use std::fmt::Write;

use grouped_list_core::PerfSpan;

use super::grouped_list::{GroupedList, VisualRow};
use super::sink::ChangeSink;
use super::traits::{GroupCallback, ItemCallback};

/// Style of the branch drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Indentation only.
    Compact,
}

/// Options for [`LayoutDebug`].
#[derive(Debug, Clone)]
pub struct LayoutFormatOptions {
    /// The style of tree visualization.
    pub style: LayoutStyle,
    /// Whether to show group and item ids.
    pub show_ids: bool,
    /// Whether to show view types.
    pub show_types: bool,
    /// Maximum number of rows to print (None for unlimited).
    pub max_rows: Option<usize>,
}

impl Default for LayoutFormatOptions {
    fn default() -> Self {
        Self {
            style: LayoutStyle::default(),
            show_ids: true,
            show_types: true,
            max_rows: None,
        }
    }
}

impl LayoutFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            ..Default::default()
        }
    }
}

/// Formats the flat layout of a [`GroupedList`].
#[derive(Debug, Clone, Default)]
pub struct LayoutDebug {
    options: LayoutFormatOptions,
}

impl LayoutDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: LayoutFormatOptions) -> Self {
        Self { options }
    }

    /// Render every row of `list`.
    pub fn format<G, I, GC, IC, S>(&self, list: &GroupedList<G, I, GC, IC, S>) -> String
    where
        GC: GroupCallback<G>,
        IC: ItemCallback<G, I>,
        S: ChangeSink,
    {
        let _span = PerfSpan::new("layout_debug");
        let size = list.size();
        let group_count = list.group_count();
        let mut output = String::new();
        writeln!(output, "Layout ({size} rows, {group_count} groups):").expect("write to String");

        if size == 0 {
            writeln!(output, "  (empty)").expect("write to String");
            return output;
        }

        let limit = self.options.max_rows.unwrap_or(size).min(size);
        let config = list.config();
        let mut position = 0;

        'groups: for (index, group) in list.groups().enumerate() {
            let items = list.items(group);
            let mut block: Vec<VisualRow<'_, G, I>> = if items.is_empty() {
                if config.display_empty_cell {
                    vec![VisualRow::Placeholder(group)]
                } else {
                    Vec::new()
                }
            } else if list.is_group_expanded(group) {
                items.iter().map(|item| VisualRow::Item { group, item }).collect()
            } else {
                Vec::new()
            };
            if config.children_above_group {
                block.push(VisualRow::Header(group));
            } else {
                block.insert(0, VisualRow::Header(group));
            }

            let is_last_group = index + 1 == group_count;
            let block_len = block.len();
            for (offset, row) in block.into_iter().enumerate() {
                if position >= limit {
                    break 'groups;
                }
                let is_last_in_group = offset + 1 == block_len;
                output.push_str(&self.build_prefix(&row, is_last_group, is_last_in_group));
                self.write_row(&mut output, list, position, row);
                position += 1;
            }
        }

        if limit < size {
            writeln!(output, "  ... {} more rows", size - limit).expect("write to String");
        }
        output
    }

    fn write_row<G, I, GC, IC, S>(
        &self,
        output: &mut String,
        list: &GroupedList<G, I, GC, IC, S>,
        position: usize,
        row: VisualRow<'_, G, I>,
    ) where
        GC: GroupCallback<G>,
        IC: ItemCallback<G, I>,
        S: ChangeSink,
    {
        let groups = list.group_callback();
        let items = list.item_callback();
        write!(output, "[{position}] ").expect("write to String");

        let view_type = match row {
            VisualRow::Header(group) => {
                output.push_str("header");
                if self.options.show_ids {
                    write!(output, " #{}", groups.unique_group_id(group)).expect("write to String");
                }
                groups.group_type(group)
            }
            VisualRow::Item { group, item } => {
                output.push_str("item");
                if self.options.show_ids {
                    write!(output, " #{}", items.unique_item_id(item)).expect("write to String");
                }
                items.child_type(group, item)
            }
            VisualRow::Placeholder(group) => {
                output.push_str("empty");
                groups.empty_cell_type(group)
            }
        };

        if self.options.show_types {
            write!(output, " (type {view_type})").expect("write to String");
        }
        output.push('\n');
    }

    /// Build the prefix string for a row.
    fn build_prefix<G, I>(&self, row: &VisualRow<'_, G, I>, is_last_group: bool, is_last_in_group: bool) -> String {
        let (branch, tee, corner) = match self.options.style {
            LayoutStyle::Ascii => ("|   ", "+-- ", "`-- "),
            LayoutStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            LayoutStyle::Compact => ("  ", "", ""),
        };

        match row {
            VisualRow::Header(_) => {
                let connector = if is_last_group { corner } else { tee };
                connector.to_string()
            }
            VisualRow::Item { .. } | VisualRow::Placeholder(_) => {
                let mut prefix = String::new();
                if is_last_group {
                    prefix.push_str(&" ".repeat(branch.chars().count()));
                } else {
                    prefix.push_str(branch);
                }
                prefix.push_str(if is_last_in_group { corner } else { tee });
                prefix
            }
        }
    }
}
