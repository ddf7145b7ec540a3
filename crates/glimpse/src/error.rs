//! Error types for glimpse.
//!
//! The formatter itself never fails: unknown values fall back to generic text
//! and oversize values are truncated. [`GlimpseError`] only covers the places
//! where a caller has to fix something: building a [`HostArray`] from
//! inconsistent data, writing to a [`DebugLog`], or parsing a setting.
//!
//! [`HostArray`]: crate::HostArray
//! [`DebugLog`]: crate::DebugLog

use thiserror::Error;

/// Errors raised outside the formatting path.
#[derive(Debug, Error)]
pub enum GlimpseError {
    /// Array data does not match the declared shape.
    #[error("array shape {shape:?} needs {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// I/O error while writing a debug log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A setting was given a value that cannot be parsed.
    #[error("invalid value {value:?} for setting {key}")]
    InvalidSetting { key: &'static str, value: String },
}

/// Result type for fallible glimpse operations.
pub type Result<T> = std::result::Result<T, GlimpseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_display() {
        let err = GlimpseError::ShapeMismatch {
            shape: vec![2, 3],
            expected: 6,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "array shape [2, 3] needs 6 elements, got 5"
        );
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GlimpseError = io_err.into();
        assert!(matches!(err, GlimpseError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn invalid_setting_display() {
        let err = GlimpseError::InvalidSetting {
            key: "GLIMPSE_WIDTH",
            value: "wide".into(),
        };
        assert!(err.to_string().contains("GLIMPSE_WIDTH"));
        assert!(err.to_string().contains("\"wide\""));
    }
}
