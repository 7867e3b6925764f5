//! Error types for the drawer index.

use std::path::PathBuf;

/// Result type alias for drawer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the drawer index.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A scrubber label list failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Loading, saving or checking a configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A scrubber label list that cannot be laid out as letters.
///
/// Callers are expected to fall back to an unsectioned scroll track
/// (a plain line instead of letters) when they receive this.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A custom label is longer than a single character.
    #[error("Label '{label}' at position {index} is longer than one character")]
    LabelTooLong { index: usize, label: String },

    /// A letter appears at or before a letter that was already seen.
    #[error("Letter '{letter}' at position {index} follows '{previous}'")]
    LettersOutOfOrder {
        index: usize,
        letter: char,
        previous: char,
    },

    /// Letters resume after a custom label interrupted the alphabet run.
    #[error("Letters resume at position {index} after a custom label")]
    LettersSplit { index: usize },

    /// Too many custom labels to fit next to the alphabet.
    #[error("{custom} custom labels in {total} total exceeds the scrubber capacity")]
    TooManyCustomLabels { custom: usize, total: usize },
}

/// Errors raised by [`DrawerConfig`](crate::config::DrawerConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Invalid TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Failed to serialize config as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON parse or serialization error.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the drawer cannot use.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ValidationError::LettersOutOfOrder {
            index: 2,
            letter: 'B',
            previous: 'C',
        };
        assert_eq!(err.to_string(), "Letter 'B' at position 2 follows 'C'");

        let err = ValidationError::TooManyCustomLabels {
            custom: 9,
            total: 35,
        };
        assert!(err.to_string().contains("9 custom labels"));
    }

    #[test]
    fn test_wraps_into_crate_error() {
        let err: Error = ValidationError::LettersSplit { index: 4 }.into();
        assert!(matches!(err, Error::Validation(_)));

        let err: Error = ConfigError::invalid_value("items_per_row", "must be positive").into();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'items_per_row': must be positive"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConfigError::io("/tmp/drawer.toml", io);
        assert!(err.to_string().contains("/tmp/drawer.toml"));
        assert!(err.source().is_some());
    }
}
