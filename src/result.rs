//! Validation result and the user-facing failure taxonomy.

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::format::Format;

const MIB: f64 = 1024.0 * 1024.0;

fn mb(bytes: &u64) -> String {
    format!("{:.1}", *bytes as f64 / MIB)
}

/// Why a file was rejected. `Display` is the message shown to the uploader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File is empty. Please provide a valid file with content.")]
    EmptyFile,

    #[error("Unable to detect file format. The file may be corrupted or in an unsupported format.")]
    UndetectableFormat,

    #[error("File format \"{format}\" is not supported. Supported formats: {allowed}")]
    FormatNotAllowed { format: Format, allowed: String },

    #[error(
        "File size ({}MB) exceeds the maximum allowed size for {} files ({}MB). Please use a smaller file or compress it before uploading.",
        mb(.size),
        .format.as_str().to_uppercase(),
        mb(.limit)
    )]
    SizeExceeded { format: Format, size: u64, limit: u64 },

    #[error("{reason}")]
    DangerousContent { format: Format, reason: String },

    #[error("{reason}")]
    Corrupted { format: Format, reason: String },

    #[error(
        "{} dimensions ({width}x{height}) exceed maximum allowed dimensions ({max_width}x{max_height}). Please use a smaller image.",
        .format.as_str().to_uppercase()
    )]
    DimensionsExceeded {
        format: Format,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("{0}")]
    ConversionNotSupported(String),

    #[error("{0}")]
    InvalidParameter(String),
}

impl ValidationError {
    pub(crate) fn corrupted(format: Format, reason: impl Into<String>) -> Self {
        ValidationError::Corrupted {
            format,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyFile | ValidationError::UndetectableFormat => {
                "FILE_VALIDATION_FAILED"
            }
            ValidationError::FormatNotAllowed { .. }
            | ValidationError::ConversionNotSupported(_) => "UNSUPPORTED_FORMAT",
            ValidationError::SizeExceeded { .. } => "FILE_SIZE_EXCEEDED",
            ValidationError::DangerousContent { .. } => "SECURITY_VIOLATION",
            ValidationError::Corrupted { .. } => "CORRUPTED_FILE",
            ValidationError::DimensionsExceeded { .. } => "DIMENSION_EXCEEDED",
            ValidationError::InvalidParameter(_) => "INVALID_PARAMETER",
        }
    }

    /// HTTP status an upload endpoint should answer with. Security
    /// violations are a 400 like every other rejected upload, not a 403.
    pub fn http_status(&self) -> u16 {
        match self {
            ValidationError::SizeExceeded { .. } => 413,
            _ => 400,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of validating one file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Resolved format; may be set on failures that happen after detection.
    pub format: Option<Format>,
    /// Size of the input in bytes.
    pub size: u64,
    pub error: Option<ValidationError>,
    /// Non-fatal findings (truncation markers, out-of-range table records).
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid(format: Format, size: u64) -> Self {
        Self {
            is_valid: true,
            format: Some(format),
            size,
            error: None,
            warnings: Vec::new(),
        }
    }

    pub fn invalid(error: ValidationError, format: Option<Format>, size: u64) -> Self {
        Self {
            is_valid: false,
            format,
            size,
            error: Some(error),
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// The error message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}
