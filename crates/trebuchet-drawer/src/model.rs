//! The drawer model.
//!
//! [`DrawerModel`] owns the drawer's items and configuration. Every change
//! rebuilds the whole [`DrawerLayout`] (grouped rows, fast-scroll table and
//! scrubber) from scratch; nothing is updated incrementally.
//!
//! # Example
//!
//! ```
//! use trebuchet_drawer::{DrawerConfig, DrawerModel};
//!
//! let mut model = DrawerModel::new(
//!     vec!["Camera".to_string(), "Calendar".to_string(), "Browser".to_string()],
//!     DrawerConfig::default(),
//! );
//! model.sort_by_label();
//!
//! let layout = model.layout();
//! assert_eq!(layout.grouped().section_labels(), ["B", "C"]);
//!
//! // Touching "C" on the scrubber jumps to the C header
//! assert_eq!(model.scroll_target_for_touch(0, 2), Some(2));
//! ```

use crate::config::{DrawerConfig, ScrubberStyle};
use crate::fast_scroll::FastScrollTable;
use crate::grouping::{group_items_into_buckets, GroupedItems};
use crate::item::{self, DrawerItem};
use crate::logging::{span_names, targets, PerfSpan};
use crate::scrubber::Scrubber;

/// Everything a drawer view renders, derived from one item snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawerLayout {
    grouped: GroupedItems,
    fast_scroll: FastScrollTable,
    scrubber: Scrubber,
}

impl DrawerLayout {
    /// Build the layout for sorted `items`.
    pub fn build<T: DrawerItem>(items: &[T], config: &DrawerConfig) -> Self {
        let _perf = PerfSpan::new(span_names::REBUILD);

        let grouped =
            group_items_into_buckets(items, config.items_per_row, config.active_merge_policy());
        let fast_scroll =
            FastScrollTable::build(&grouped, config.fast_scroll, &config.custom_glyphs);

        let labels = grouped.section_labels();
        let scrubber = match config.scrubber {
            ScrubberStyle::Letters => Scrubber::for_sections(&labels, &config.custom_glyphs),
            ScrubberStyle::Raw => Scrubber::raw(&labels),
        };

        Self {
            grouped,
            fast_scroll,
            scrubber,
        }
    }

    /// Sections, buckets and adapter rows.
    pub fn grouped(&self) -> &GroupedItems {
        &self.grouped
    }

    /// The fast-scroll fraction table.
    pub fn fast_scroll(&self) -> &FastScrollTable {
        &self.fast_scroll
    }

    /// The letter scrubber.
    pub fn scrubber(&self) -> &Scrubber {
        &self.scrubber
    }
}

/// A list of drawer items with its current layout.
#[derive(Debug, Clone)]
pub struct DrawerModel<T> {
    items: Vec<T>,
    config: DrawerConfig,
    layout: DrawerLayout,
}

impl<T: DrawerItem> DrawerModel<T> {
    /// Creates a model for `items`, which are kept in the given order.
    pub fn new(items: Vec<T>, config: DrawerConfig) -> Self {
        let layout = DrawerLayout::build(&items, &config);
        Self {
            items,
            config,
            layout,
        }
    }

    /// Creates an empty model.
    pub fn empty(config: DrawerConfig) -> Self {
        Self::new(Vec::new(), config)
    }

    /// Returns the number of items in the model.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items, in drawer order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The configuration the layout is built with.
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// The current layout.
    pub fn layout(&self) -> &DrawerLayout {
        &self.layout
    }

    /// Replaces all items.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.rebuild();
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: DrawerConfig) {
        self.config = config;
        self.rebuild();
    }

    /// Appends an item to the end of the list.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.rebuild();
    }

    /// Inserts an item at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.rebuild();
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.rebuild();
        Some(item)
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.rebuild();
    }

    /// Provides mutable access to an item via a closure.
    pub fn modify<F, R>(&mut self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = f(self.items.get_mut(index)?);
        self.rebuild();
        Some(result)
    }

    /// Sorts the items into drawer order.
    ///
    /// Items with a section hint come first, then labels ignoring case
    /// and accents.
    pub fn sort_by_label(&mut self) {
        self.items.sort_by(|a, b| item::compare_items(a, b));
        self.rebuild();
    }

    /// Returns the item shown in the adapter row at `position`.
    pub fn item_at(&self, position: usize) -> Option<&T> {
        let index = self.layout.grouped.rows().get(position)?.item_index()?;
        self.items.get(index)
    }

    /// Adapter position to scroll to for a scrubber touch moving from
    /// `previous_touch_index` to `current_touch_index`.
    pub fn scroll_target_for_touch(
        &self,
        previous_touch_index: usize,
        current_touch_index: usize,
    ) -> Option<usize> {
        let section = self.layout.scrubber.adapter_index_for_touch(
            previous_touch_index,
            current_touch_index,
            self.config.rtl,
        )?;
        self.layout.grouped.position_of_section(section)
    }

    /// Adapter position to scroll to for a fast-scroll touch at `fraction`.
    pub fn scroll_target_for_fraction(&self, fraction: f32) -> Option<usize> {
        self.layout.fast_scroll.position_at_fraction(fraction)
    }

    /// Visual scrubber index of the section shown at adapter `position`.
    pub fn scrubber_index_for_position(&self, position: usize) -> Option<usize> {
        let section = self.layout.grouped.section_at_position(position)?;
        self.layout
            .scrubber
            .touch_index_for_adapter_index(section, self.config.rtl)
    }

    fn rebuild(&mut self) {
        self.layout = DrawerLayout::build(&self.items, &self.config);
        tracing::debug!(
            target: targets::MODEL,
            items = self.items.len(),
            sections = self.layout.grouped.sections().len(),
            scrubber = ?self.layout.scrubber.mode(),
            "rebuilt drawer layout"
        );
    }
}
