//! Fast-scroll section table.
//!
//! Dragging the fast-scroll thumb produces a touch fraction in `[0, 1]`
//! along the track. [`FastScrollTable`] assigns every drawer section a
//! fraction and maps touch fractions back to the section (and adapter
//! position) to jump to.

use std::collections::BTreeMap;

use crate::config::FastScrollDistribution;
use crate::grouping::{AdapterRow, GroupedItems};
use crate::logging::{span_names, targets, PerfSpan};

/// A fast-scroll jump target.
#[derive(Debug, Clone, PartialEq)]
pub struct FastScrollSection {
    /// Section name.
    pub name: String,
    /// Text shown in the fast-scroll popup, the custom glyph if one is set.
    pub display: String,
    /// Index of the section in [`GroupedItems::sections`].
    pub section: usize,
    /// Adapter position to scroll to.
    pub position: usize,
    /// Touch fraction at which this section starts.
    pub touch_fraction: f32,
}

/// Touch fractions for every section of a grouped layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FastScrollTable {
    sections: Vec<FastScrollSection>,
    distribution: FastScrollDistribution,
}

impl FastScrollTable {
    /// Build the table for `grouped`, one entry per section in order of
    /// first appearance.
    pub fn build(
        grouped: &GroupedItems,
        distribution: FastScrollDistribution,
        glyphs: &BTreeMap<String, String>,
    ) -> Self {
        let _perf = PerfSpan::new(span_names::FAST_SCROLL);

        let section_count = grouped.sections().len();
        let total_rows = grouped.row_count();
        let per_row = grouped.items_per_row();

        let sections: Vec<_> = grouped
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| {
                let touch_fraction = match distribution {
                    FastScrollDistribution::ByRows => row_fraction(
                        grouped.rows().get(section.first_item_position),
                        total_rows,
                        per_row,
                    ),
                    FastScrollDistribution::Evenly => index as f32 / section_count as f32,
                };

                FastScrollSection {
                    name: section.name.clone(),
                    display: glyphs
                        .get(&section.name)
                        .cloned()
                        .unwrap_or_else(|| section.name.clone()),
                    section: index,
                    position: section.scroll_position(),
                    touch_fraction,
                }
            })
            .collect();

        tracing::debug!(
            target: targets::FAST_SCROLL,
            sections = sections.len(),
            ?distribution,
            "built fast-scroll table"
        );

        Self {
            sections,
            distribution,
        }
    }

    /// The jump targets in order.
    pub fn sections(&self) -> &[FastScrollSection] {
        &self.sections
    }

    /// Number of jump targets.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if there is nothing to jump to.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The fraction policy the table was built with.
    pub fn distribution(&self) -> FastScrollDistribution {
        self.distribution
    }

    /// Returns the section a touch at `fraction` jumps to.
    ///
    /// This is the last section whose fraction does not exceed `fraction`.
    /// Fractions outside `[0, 1]` are clamped.
    pub fn section_at_fraction(&self, fraction: f32) -> Option<&FastScrollSection> {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let (first, rest) = self.sections.split_first()?;
        let mut found = first;
        for section in rest {
            if section.touch_fraction > fraction {
                break;
            }
            found = section;
        }
        Some(found)
    }

    /// Returns the adapter position a touch at `fraction` jumps to.
    pub fn position_at_fraction(&self, fraction: f32) -> Option<usize> {
        self.section_at_fraction(fraction).map(|s| s.position)
    }

    /// Returns the touch fraction of the section at `section`.
    pub fn fraction_for_section(&self, section: usize) -> Option<f32> {
        self.sections
            .iter()
            .find(|s| s.section == section)
            .map(|s| s.touch_fraction)
    }
}

/// Fraction of the track at which the grid cell of `first_item` starts.
fn row_fraction(first_item: Option<&AdapterRow>, total_rows: usize, per_row: usize) -> f32 {
    match first_item {
        Some(&AdapterRow::Item {
            row_index, column, ..
        }) if total_rows > 0 && per_row > 0 => {
            let row_fraction = 1.0 / total_rows as f32;
            row_index as f32 * row_fraction + column as f32 * (row_fraction / per_row as f32)
        }
        _ => 0.0,
    }
}
