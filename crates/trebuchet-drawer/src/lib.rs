//! App drawer indexing for the Trebuchet launcher.
//!
//! This crate turns the drawer's sorted app list into what the drawer views
//! render and what their scroll controls resolve touches against:
//!
//! - **Grouping**: alphabetic sections, per-row buckets and the flattened
//!   adapter rows, with optional merging of sparse sections
//! - **Fast Scroll**: a touch fraction per section and fraction lookup
//! - **Scrubber**: the A..Z letter strip with custom glyphs, nearest
//!   highlighted letter resolution and right-to-left mirroring
//! - **Model**: a drawer model that rebuilds all of the above on change
//!
//! # Example
//!
//! ```
//! use trebuchet_drawer::{DrawerConfig, DrawerModel, FastScrollDistribution};
//!
//! let apps = ["Apple", "Avocado", "Banana", "#1 App", "Zebra"]
//!     .map(String::from)
//!     .to_vec();
//! let config = DrawerConfig::default()
//!     .with_items_per_row(4)
//!     .with_fast_scroll(FastScrollDistribution::Evenly);
//! let model = DrawerModel::new(apps, config);
//!
//! let fractions: Vec<f32> = model
//!     .layout()
//!     .fast_scroll()
//!     .sections()
//!     .iter()
//!     .map(|s| s.touch_fraction)
//!     .collect();
//! assert_eq!(fractions, [0.0, 0.25, 0.5, 0.75]);
//! ```
//!
//! # Scrubber Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use trebuchet_drawer::Scrubber;
//!
//! let scrubber = Scrubber::letters(&["A", "M", "Z"], &BTreeMap::new())?;
//!
//! // Sliding right across the grayed-out "D" lands on "M"
//! assert_eq!(scrubber.directional_index(2, 3, false), 12);
//! assert_eq!(scrubber.adapter_index_for_touch(2, 3, false), Some(1));
//! # Ok::<(), trebuchet_drawer::ValidationError>(())
//! ```

pub mod config;
mod error;
pub mod fast_scroll;
pub mod grouping;
pub mod item;
pub mod logging;
pub mod model;
pub mod scrubber;

pub use config::{DrawerConfig, FastScrollDistribution, MergePolicy, ScrubberStyle};
pub use error::{ConfigError, Error, Result, ValidationError};
pub use fast_scroll::{FastScrollSection, FastScrollTable};
pub use grouping::{group_items_into_buckets, AdapterRow, Bucket, GroupedItems, Section};
pub use item::{section_name_for, DrawerItem};
pub use logging::{LayoutDebug, LayoutFormatOptions, PerfSpan};
pub use model::{DrawerLayout, DrawerModel};
pub use scrubber::{build_sections, effective_index, Scrubber, ScrubberMode, SectionLabel};
