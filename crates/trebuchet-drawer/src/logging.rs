//! Logging and debugging facilities for the drawer index.
//!
//! This module provides:
//! - Target and span names for filtering the crate's `tracing` output
//! - A text dump of grouped adapter rows for debugging layouts
//! - Performance tracing hooks for profiling rebuilds
//!
//! # Tracing Integration
//!
//! The drawer uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trebuchet_drawer::scrubber=debug")
//!     .init();
//! ```
//!
//! # Layout Dumps
//!
//! ```ignore
//! use trebuchet_drawer::logging::LayoutDebug;
//!
//! let dump = LayoutDebug::new().format(layout.grouped());
//! println!("{dump}");
//! ```

use std::fmt::Write as FmtWrite;

use crate::grouping::{AdapterRow, GroupedItems};

/// Span names used throughout the drawer for tracing.
pub mod span_names {
    /// Item grouping span.
    pub const GROUPING: &str = "trebuchet_drawer::grouping";
    /// Scrubber section build span.
    pub const SCRUBBER: &str = "trebuchet_drawer::scrubber";
    /// Fast-scroll table build span.
    pub const FAST_SCROLL: &str = "trebuchet_drawer::fast_scroll";
    /// Full layout rebuild span.
    pub const REBUILD: &str = "trebuchet_drawer::rebuild";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Crate-wide target.
    pub const DRAWER: &str = "trebuchet_drawer";
    /// Item grouping and section merging.
    pub const GROUPING: &str = "trebuchet_drawer::grouping";
    /// Letter scrubber.
    pub const SCRUBBER: &str = "trebuchet_drawer::scrubber";
    /// Fast-scroll fraction table.
    pub const FAST_SCROLL: &str = "trebuchet_drawer::fast_scroll";
    /// Drawer model rebuilds.
    pub const MODEL: &str = "trebuchet_drawer::model";
    /// Configuration loading.
    pub const CONFIG: &str = "trebuchet_drawer::config";
    /// Performance spans.
    pub const PERF: &str = "trebuchet_drawer::perf";
}

/// Options for [`LayoutDebug`] output.
#[derive(Debug, Clone)]
pub struct LayoutFormatOptions {
    /// Whether to prefix each row with its adapter position.
    pub show_positions: bool,
    /// Whether to show the grid row/column of item rows.
    pub show_grid: bool,
    /// Maximum number of adapter rows to print (None for unlimited).
    pub max_rows: Option<usize>,
}

impl Default for LayoutFormatOptions {
    fn default() -> Self {
        Self {
            show_positions: true,
            show_grid: true,
            max_rows: None,
        }
    }
}

impl LayoutFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_positions: false,
            show_grid: false,
            max_rows: None,
        }
    }
}

/// Debug utility for printing a grouped drawer layout as text.
#[derive(Debug, Clone, Default)]
pub struct LayoutDebug {
    options: LayoutFormatOptions,
}

impl LayoutDebug {
    /// Create a debug printer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug printer with custom options.
    pub fn with_options(options: LayoutFormatOptions) -> Self {
        Self { options }
    }

    /// Format the adapter rows of `grouped`, one line per row.
    pub fn format(&self, grouped: &GroupedItems) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "Drawer layout ({} items, {} sections, {} grid rows):",
            grouped.item_count(),
            grouped.sections().len(),
            grouped.row_count()
        );

        if grouped.rows().is_empty() {
            output.push_str("  (empty)\n");
            return output;
        }

        let limit = self.options.max_rows.unwrap_or(usize::MAX);
        for row in grouped.rows().iter().take(limit) {
            output.push_str("  ");
            if self.options.show_positions {
                let _ = write!(output, "{:>4} ", row.position());
            }
            match row {
                AdapterRow::SectionBreak { section, .. } => {
                    let name = grouped
                        .section(*section)
                        .map(|s| s.name.as_str())
                        .unwrap_or("?");
                    let _ = write!(output, "[{name}]");
                }
                AdapterRow::Item {
                    item_index,
                    row_index,
                    column,
                    ..
                } => {
                    let _ = write!(output, "  item #{item_index}");
                    if self.options.show_grid {
                        let _ = write!(output, " @ {row_index}:{column}");
                    }
                }
            }
            output.push('\n');
        }

        let hidden = grouped.rows().len().saturating_sub(limit);
        if hidden > 0 {
            let _ = writeln!(output, "  ... {hidden} more");
        }

        output
    }
}

/// A guard that emits a tracing span when dropped.
///
/// This is useful for tracking the duration of rebuilds.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with consistent
/// target naming.
#[macro_export]
macro_rules! drawer_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::DRAWER, $($arg)*)
    };
}

#[macro_export]
macro_rules! drawer_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::DRAWER, $($arg)*)
    };
}
