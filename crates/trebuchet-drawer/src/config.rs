//! Drawer configuration.
//!
//! [`DrawerConfig`] collects the static choices the drawer layout depends on:
//! grid width, section merging, the fast-scroll fraction policy, layout
//! direction and the glyphs shown in place of special section names.
//! Configurations can be loaded from and saved to TOML or JSON files.
//!
//! ```ignore
//! use trebuchet_drawer::config::{DrawerConfig, FastScrollDistribution};
//!
//! let config = DrawerConfig::from_toml_str(r#"
//!     items_per_row = 5
//!     merge_sections = true
//!     fast_scroll = "by-rows"
//!
//!     [custom_glyphs]
//!     Remote = "☆"
//! "#)?;
//! assert_eq!(config.fast_scroll, FastScrollDistribution::ByRows);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::targets;

/// Default number of items in one grid row.
pub const DEFAULT_ITEMS_PER_ROW: usize = 4;

/// How fast-scroll touch fractions are distributed across sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FastScrollDistribution {
    /// Fraction proportional to the grid row (and column) of each section's
    /// first item.
    ByRows,
    /// Every section gets an equal slice of the track, in order of first
    /// appearance.
    #[default]
    Evenly,
}

/// Which labels the scrubber beside the drawer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrubberStyle {
    /// The full alphabet, populated letters highlighted.
    #[default]
    Letters,
    /// One entry per section name, as is.
    Raw,
}

/// Limits for merging sparse sections into a shared header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergePolicy {
    /// Maximum number of sections that may share one header.
    pub max_merges: usize,
    /// Merging stops once the merged group fills this many rows.
    pub min_rows_in_merged_section: usize,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            max_merges: 2,
            min_rows_in_merged_section: 3,
        }
    }
}

/// Static configuration of a drawer layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    /// Number of items in one grid row.
    pub items_per_row: usize,
    /// Whether sparse neighbouring sections share one header.
    pub merge_sections: bool,
    /// Fast-scroll fraction policy.
    pub fast_scroll: FastScrollDistribution,
    /// Labels shown by the scrubber.
    pub scrubber: ScrubberStyle,
    /// Whether the scrubber is laid out right to left.
    pub rtl: bool,
    /// Limits applied when `merge_sections` is enabled.
    pub merge: MergePolicy,
    /// Section names replaced by a single glyph in the scrubber and the
    /// fast-scroll popup.
    pub custom_glyphs: BTreeMap<String, String>,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            items_per_row: DEFAULT_ITEMS_PER_ROW,
            merge_sections: false,
            fast_scroll: FastScrollDistribution::default(),
            scrubber: ScrubberStyle::default(),
            rtl: false,
            merge: MergePolicy::default(),
            custom_glyphs: BTreeMap::new(),
        }
    }
}

impl DrawerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of items per grid row.
    pub fn with_items_per_row(mut self, items_per_row: usize) -> Self {
        self.items_per_row = items_per_row;
        self
    }

    /// Enable or disable section merging.
    pub fn with_merge_sections(mut self, merge: bool) -> Self {
        self.merge_sections = merge;
        self
    }

    /// Set the fast-scroll fraction policy.
    pub fn with_fast_scroll(mut self, distribution: FastScrollDistribution) -> Self {
        self.fast_scroll = distribution;
        self
    }

    /// Set the scrubber style.
    pub fn with_scrubber(mut self, style: ScrubberStyle) -> Self {
        self.scrubber = style;
        self
    }

    /// Set the layout direction.
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Show `glyph` instead of `section` in the scrubber.
    pub fn with_custom_glyph(
        mut self,
        section: impl Into<String>,
        glyph: impl Into<String>,
    ) -> Self {
        self.custom_glyphs.insert(section.into(), glyph.into());
        self
    }

    /// The merge policy in effect, or `None` when merging is disabled.
    pub fn active_merge_policy(&self) -> Option<MergePolicy> {
        self.merge_sections.then_some(self.merge)
    }

    /// Check that the configuration can drive a layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_row == 0 {
            return Err(ConfigError::invalid_value(
                "items_per_row",
                "must be at least 1",
            ));
        }
        if self.merge_sections && self.merge.max_merges == 0 {
            return Err(ConfigError::invalid_value(
                "merge.max_merges",
                "must be at least 1 when merging is enabled",
            ));
        }
        if let Some(section) = self
            .custom_glyphs
            .iter()
            .find_map(|(section, glyph)| glyph.is_empty().then_some(section))
        {
            return Err(ConfigError::invalid_value(
                "custom_glyphs",
                format!("glyph for '{section}' is empty"),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            "loaded TOML config"
        );
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_json_str(&source)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            "loaded JSON config"
        );
        Ok(config)
    }

    /// Save as a TOML file.
    pub fn save_toml(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| ConfigError::io(path, e))
    }

    /// Save as a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| ConfigError::io(path, e))
    }
}
