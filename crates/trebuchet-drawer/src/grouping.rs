//! Grouping sorted drawer items into sections, buckets and adapter rows.
//!
//! [`group_items_into_buckets`] turns a flat, already sorted item list into
//! everything a grid view needs to render it:
//!
//! - [`Section`]: one contiguous run of items sharing a section name
//! - [`Bucket`]: a chunk of at most `items_per_row` items of one section;
//!   only the first bucket of a section carries a header
//! - [`AdapterRow`]: the flattened row sequence, section breaks interleaved
//!   with item rows that know their grid row and column
//!
//! ```text
//!  items:  Apple Avocado Banana #1 Zebra
//!
//!  rows:   [A] Apple Avocado [B] Banana [#] #1 [Z] Zebra
//!  grid:       0:0   0:1         1:0        2:0     3:0
//! ```
//!
//! When a [`MergePolicy`] is supplied, sparse sections are folded into their
//! predecessor: they lose their section break and their items continue in
//! the predecessor's grid rows. Merged sections still keep their own
//! [`Section`] entry so fast scrolling can jump to them.

use std::ops::Range;

use crate::config::MergePolicy;
use crate::item::{self, DrawerItem};
use crate::logging::{span_names, targets, PerfSpan};

/// A contiguous run of items sharing one section name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name, a letter, `#`, or a hinted custom name.
    pub name: String,
    /// Indices of the section's items in the input list.
    pub items: Range<usize>,
    /// Index of the section's first bucket.
    pub first_bucket: usize,
    /// Adapter position of the section break, `None` if the section was
    /// merged into its predecessor.
    pub break_position: Option<usize>,
    /// Adapter position of the section's first item row.
    pub first_item_position: usize,
    /// Whether the name came from an item's section hint.
    pub hinted: bool,
}

impl Section {
    /// Number of items in the section.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section renders its own section break.
    pub fn has_break(&self) -> bool {
        self.break_position.is_some()
    }

    /// The adapter position to scroll to when jumping to this section.
    pub fn scroll_position(&self) -> usize {
        self.break_position.unwrap_or(self.first_item_position)
    }
}

/// A chunk of at most `items_per_row` items of a single section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Section name shared by every item in the bucket.
    pub label: String,
    /// Indices of the bucket's items in the input list.
    pub items: Range<usize>,
    /// `true` for every bucket of a section but the first; these render
    /// without a repeated header.
    pub continuation: bool,
    /// Index of the owning section.
    pub section: usize,
    /// Adapter position of the bucket's first item row.
    pub first_position: usize,
}

impl Bucket {
    /// Number of items in the bucket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the bucket holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One row of the flattened, render-ready drawer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterRow {
    /// A header starting a new section.
    SectionBreak {
        /// Adapter position.
        position: usize,
        /// Index of the section this break introduces.
        section: usize,
    },
    /// A single item.
    Item {
        /// Adapter position.
        position: usize,
        /// Index of the item in the input list.
        item_index: usize,
        /// Index of the owning section.
        section: usize,
        /// Index of the item within its section.
        section_item_index: usize,
        /// Grid row across the whole list.
        row_index: usize,
        /// Column within the grid row.
        column: usize,
    },
}

impl AdapterRow {
    /// Adapter position of this row.
    pub fn position(&self) -> usize {
        match self {
            Self::SectionBreak { position, .. } | Self::Item { position, .. } => *position,
        }
    }

    /// Index of the section this row belongs to.
    pub fn section(&self) -> usize {
        match self {
            Self::SectionBreak { section, .. } | Self::Item { section, .. } => *section,
        }
    }

    /// Returns `true` for item rows.
    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item { .. })
    }

    /// Returns `true` for section breaks.
    pub fn is_section_break(&self) -> bool {
        matches!(self, Self::SectionBreak { .. })
    }

    /// Input index of the item shown in this row, if any.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::Item { item_index, .. } => Some(*item_index),
            Self::SectionBreak { .. } => None,
        }
    }
}

/// The result of grouping a sorted item list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedItems {
    sections: Vec<Section>,
    buckets: Vec<Bucket>,
    rows: Vec<AdapterRow>,
    item_count: usize,
    row_count: usize,
    items_per_row: usize,
}

impl GroupedItems {
    fn empty(items_per_row: usize) -> Self {
        Self {
            items_per_row,
            ..Self::default()
        }
    }

    /// Sections in order of first appearance.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Buckets in display order, continuations included.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// The flattened adapter rows.
    pub fn rows(&self) -> &[AdapterRow] {
        &self.rows
    }

    /// Number of grouped items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of grid rows the items occupy.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of items per grid row used for the layout.
    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    /// Returns `true` if no items were grouped.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Returns the section at `index`.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Section names in order, one per section.
    ///
    /// This is the label list the letter scrubber is built from; a
    /// scrubber's adapter index refers back into [`sections`](Self::sections).
    pub fn section_labels(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Adapter position to scroll to for the section at `index`.
    pub fn position_of_section(&self, index: usize) -> Option<usize> {
        self.sections.get(index).map(Section::scroll_position)
    }

    /// Section owning the adapter row at `position`.
    pub fn section_at_position(&self, position: usize) -> Option<usize> {
        self.rows.get(position).map(AdapterRow::section)
    }
}

/// A run of input items sharing a section name, before layout.
struct Run {
    name: String,
    items: Range<usize>,
    hinted: bool,
}

/// Groups sorted `items` into sections, buckets and adapter rows.
///
/// Items are expected to be sorted by label already. Labels starting with
/// anything but a letter share one `#` section. Sections longer than
/// `items_per_row` are split into continuation buckets. With `merge`,
/// sparse sections are folded into their predecessor as described in the
/// [module documentation](self).
///
/// An `items_per_row` of zero cannot be laid out and yields an empty result.
pub fn group_items_into_buckets<T: DrawerItem>(
    items: &[T],
    items_per_row: usize,
    merge: Option<MergePolicy>,
) -> GroupedItems {
    let _perf = PerfSpan::new(span_names::GROUPING);

    if items_per_row == 0 {
        crate::drawer_warn!(
            items = items.len(),
            "items_per_row is zero, nothing can be laid out"
        );
        return GroupedItems::empty(items_per_row);
    }

    let runs = partition_runs(items);
    let groups = match merge {
        Some(policy) => merge_runs(&runs, items_per_row, policy),
        None => (0..runs.len()).map(|i| i..i + 1).collect(),
    };

    let mut sections = Vec::with_capacity(runs.len());
    let mut buckets = Vec::new();
    let mut rows = Vec::with_capacity(items.len() + runs.len());
    let mut next_grid_row = 0;

    for group in groups {
        // Items of a merged group flow through the same grid rows.
        let mut group_item = 0;

        for (offset, run) in runs[group].iter().enumerate() {
            let section = sections.len();

            let break_position = (offset == 0).then(|| {
                let position = rows.len();
                rows.push(AdapterRow::SectionBreak { position, section });
                position
            });

            let first_item_position = rows.len();
            let first_bucket = buckets.len();

            for (section_item_index, item_index) in run.items.clone().enumerate() {
                let position = rows.len();

                if section_item_index % items_per_row == 0 {
                    let end = (item_index + items_per_row).min(run.items.end);
                    buckets.push(Bucket {
                        label: run.name.clone(),
                        items: item_index..end,
                        continuation: section_item_index != 0,
                        section,
                        first_position: position,
                    });
                }

                rows.push(AdapterRow::Item {
                    position,
                    item_index,
                    section,
                    section_item_index,
                    row_index: next_grid_row + group_item / items_per_row,
                    column: group_item % items_per_row,
                });
                group_item += 1;
            }

            sections.push(Section {
                name: run.name.clone(),
                items: run.items.clone(),
                first_bucket,
                break_position,
                first_item_position,
                hinted: run.hinted,
            });
        }

        next_grid_row += group_item.div_ceil(items_per_row);
    }

    tracing::debug!(
        target: targets::GROUPING,
        items = items.len(),
        sections = sections.len(),
        buckets = buckets.len(),
        rows = rows.len(),
        grid_rows = next_grid_row,
        "grouped drawer items"
    );

    GroupedItems {
        sections,
        buckets,
        rows,
        item_count: items.len(),
        row_count: next_grid_row,
        items_per_row,
    }
}

/// Splits sorted items into runs of equal section name.
fn partition_runs<T: DrawerItem>(items: &[T]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();

    for (index, entry) in items.iter().enumerate() {
        let name = item::section_name(entry);
        match runs.last_mut() {
            Some(run) if run.name == name => run.items.end = index + 1,
            _ => runs.push(Run {
                name,
                items: index..index + 1,
                hinted: item::is_hinted(entry),
            }),
        }
    }

    runs
}

/// Folds sparse runs into their predecessor, returning the run ranges that
/// share a section break.
fn merge_runs(runs: &[Run], items_per_row: usize, policy: MergePolicy) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;

    while start < runs.len() {
        let mut end = start + 1;
        let mut item_count = runs[start].items.len();
        let mut merge_count = 1;

        while end < runs.len()
            && continue_merging(
                &runs[start],
                &runs[end],
                item_count,
                items_per_row,
                merge_count,
                policy,
            )
        {
            item_count += runs[end].items.len();
            merge_count += 1;
            end += 1;
        }

        if end - start > 1 {
            crate::drawer_trace!(
                first = %runs[start].name,
                last = %runs[end - 1].name,
                "merged sparse sections"
            );
        }

        groups.push(start..end);
        start = end;
    }

    groups
}

/// Decides whether `next` joins the group started by `first`.
///
/// Merging continues while the group's last row is ragged (fewer than half
/// a row hanging), the group is still short, the merge limit is not reached
/// and both sections are of the same script.
fn continue_merging(
    first: &Run,
    next: &Run,
    item_count: usize,
    items_per_row: usize,
    merge_count: usize,
    policy: MergePolicy,
) -> bool {
    if first.hinted || next.hinted {
        return false;
    }

    let min_items_per_row = items_per_row.div_ceil(2);
    let rows = item_count / items_per_row;
    let hanging = item_count % items_per_row;
    let cross_script = first.name.is_ascii() != next.name.is_ascii();

    (0 < hanging && hanging < min_items_per_row)
        && rows < policy.min_rows_in_merged_section
        && merge_count < policy.max_merges
        && !cross_script
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hinted(&'static str, &'static str);

    impl DrawerItem for Hinted {
        fn label(&self) -> &str {
            self.0
        }

        fn section_hint(&self) -> Option<&str> {
            (!self.1.is_empty()).then_some(self.1)
        }
    }

    fn item_rows(grouped: &GroupedItems) -> Vec<(usize, usize, usize)> {
        grouped
            .rows()
            .iter()
            .filter_map(|row| match *row {
                AdapterRow::Item {
                    item_index,
                    row_index,
                    column,
                    ..
                } => Some((item_index, row_index, column)),
                AdapterRow::SectionBreak { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_basic_grouping() {
        let items = ["Apple", "Avocado", "Banana", "#1 App", "Zebra"];
        let grouped = group_items_into_buckets(&items, 4, None);

        let names: Vec<_> = grouped.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "#", "Z"]);

        let counts: Vec<_> = grouped.buckets().iter().map(Bucket::len).collect();
        assert_eq!(counts, [2, 1, 1, 1]);
        assert!(grouped.buckets().iter().all(|b| !b.continuation));

        assert_eq!(grouped.rows().len(), 9);
        assert_eq!(grouped.row_count(), 4);
        assert_eq!(grouped.item_count(), 5);
    }

    #[test]
    fn test_non_letters_share_one_section() {
        let items = ["#1 App", "2048", "@home", "Apple"];
        let grouped = group_items_into_buckets(&items, 4, None);

        assert_eq!(grouped.section_labels(), ["#", "A"]);
        assert_eq!(grouped.sections()[0].item_count(), 3);
    }

    #[test]
    fn test_long_sections_split_into_continuations() {
        let items = ["A1", "A2", "A3", "A4", "A5", "B1"];
        let grouped = group_items_into_buckets(&items, 2, None);

        let buckets = grouped.buckets();
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].items, 0..2);
        assert!(!buckets[0].continuation);
        assert_eq!(buckets[1].items, 2..4);
        assert!(buckets[1].continuation);
        assert_eq!(buckets[2].items, 4..5);
        assert!(buckets[2].continuation);
        assert_eq!(buckets[3].label, "B");
        assert!(!buckets[3].continuation);

        // Continuations add item rows but no section breaks
        let breaks = grouped.rows().iter().filter(|r| r.is_section_break()).count();
        assert_eq!(breaks, 2);

        assert_eq!(
            item_rows(&grouped),
            [(0, 0, 0), (1, 0, 1), (2, 1, 0), (3, 1, 1), (4, 2, 0), (5, 3, 0)]
        );
        assert_eq!(grouped.row_count(), 4);
    }

    #[test]
    fn test_positions_are_sequential() {
        let items = ["Apple", "Banana", "Cherry", "Cranberry"];
        let grouped = group_items_into_buckets(&items, 3, None);

        for (expected, row) in grouped.rows().iter().enumerate() {
            assert_eq!(row.position(), expected);
        }
        for bucket in grouped.buckets() {
            let row = grouped.rows()[bucket.first_position];
            assert_eq!(row.item_index(), Some(bucket.items.start));
        }
        assert_eq!(grouped.position_of_section(2), Some(4));
        assert_eq!(grouped.section_at_position(6), Some(2));
        assert_eq!(grouped.section_at_position(99), None);
    }

    #[test]
    fn test_item_rows_match_input_length() {
        let mut sorted: Vec<String> = (0..57u8)
            .map(|i| format!("{}{i}", char::from(b'A' + i % 26)))
            .collect();
        sorted.sort();

        for per_row in 1..7 {
            let grouped = group_items_into_buckets(&sorted, per_row, None);
            let count = grouped.rows().iter().filter(|r| r.is_item()).count();
            assert_eq!(count, sorted.len());

            let bucketed: usize = grouped.buckets().iter().map(Bucket::len).sum();
            assert_eq!(bucketed, sorted.len());
            assert!(grouped.buckets().iter().all(|b| b.len() <= per_row));
        }
    }

    #[test]
    fn test_idempotent() {
        let items = ["Apple", "Avocado", "Banana", "#1 App", "Zebra"];
        let first = group_items_into_buckets(&items, 4, Some(MergePolicy::default()));
        let second = group_items_into_buckets(&items, 4, Some(MergePolicy::default()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_and_zero_per_row() {
        let grouped = group_items_into_buckets::<&str>(&[], 4, None);
        assert!(grouped.is_empty());
        assert!(grouped.rows().is_empty());
        assert_eq!(grouped.row_count(), 0);

        let grouped = group_items_into_buckets(&["Apple"], 0, None);
        assert!(grouped.rows().is_empty());
        assert!(grouped.sections().is_empty());
    }

    #[test]
    fn test_merge_sparse_sections() {
        let items = ["Apple", "Banana", "Cherry"];
        let grouped = group_items_into_buckets(&items, 4, Some(MergePolicy::default()));

        // A absorbs B (one merge allowed), C starts a new group
        let sections = grouped.sections();
        assert!(sections[0].has_break());
        assert!(!sections[1].has_break());
        assert!(sections[2].has_break());

        assert_eq!(item_rows(&grouped), [(0, 0, 0), (1, 0, 1), (2, 1, 0)]);
        assert_eq!(grouped.row_count(), 2);
        assert_eq!(grouped.rows().len(), 5);

        // Merged sections still own their bucket and a scroll target
        assert_eq!(grouped.buckets().len(), 3);
        assert_eq!(grouped.position_of_section(1), Some(2));
        assert_eq!(grouped.section_at_position(2), Some(1));
    }

    #[test]
    fn test_merge_respects_limits() {
        let items = ["Apple", "Banana", "Cherry"];
        let policy = MergePolicy {
            max_merges: 3,
            min_rows_in_merged_section: 3,
        };
        let grouped = group_items_into_buckets(&items, 5, Some(policy));
        let breaks = grouped.rows().iter().filter(|r| r.is_section_break()).count();
        assert_eq!(breaks, 1);

        // Half a row or more hanging stops merging
        let items = ["A1", "A2", "B1"];
        let grouped = group_items_into_buckets(&items, 4, Some(policy));
        let breaks = grouped.rows().iter().filter(|r| r.is_section_break()).count();
        assert_eq!(breaks, 2);

        // A single column never leaves a ragged row
        let grouped = group_items_into_buckets(&["Apple", "Banana"], 1, Some(policy));
        assert!(grouped.sections().iter().all(Section::has_break));
    }

    #[test]
    fn test_merge_skips_cross_script_and_hinted() {
        let grouped =
            group_items_into_buckets(&["Zebra", "Яндекс"], 4, Some(MergePolicy::default()));
        assert!(grouped.sections().iter().all(Section::has_break));

        let items = [Hinted("Cloud Game", "Remote"), Hinted("Apple", ""), Hinted("Banana", "")];
        let grouped = group_items_into_buckets(&items, 4, Some(MergePolicy::default()));
        assert_eq!(grouped.section_labels(), ["Remote", "A", "B"]);
        assert!(grouped.sections()[0].hinted);
        assert!(grouped.sections()[1].has_break());
        assert!(!grouped.sections()[2].has_break());
    }
}
