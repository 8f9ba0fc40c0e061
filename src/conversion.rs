//! Conversion-level checks: which source→target pairs make sense and whether
//! the requested output parameters are in range.

use crate::format::{Format, FormatSet};
use crate::limits::max_dimensions;
use crate::result::ValidationError;
use crate::validate::{validate, ValidateOptions};

/// Pairs that are never offered, with the reason shown to the user.
const UNSUPPORTED: &[(Format, Format, &str)] = &[
    (Format::Ttf, Format::Mp4, "Cannot convert font files to video format."),
    (Format::Mp4, Format::Ttf, "Cannot convert video files to font format."),
    (Format::Html, Format::Ttf, "Cannot convert HTML to font format."),
    (Format::Ttf, Format::Stl, "Cannot convert font files to 3D model format."),
];

pub const QUALITY_RANGE: std::ops::RangeInclusive<u32> = 1..=100;
pub const DPI_RANGE: std::ops::RangeInclusive<u32> = 72..=2400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Support {
    Supported,
    Unsupported(String),
}

impl Support {
    pub fn is_supported(&self) -> bool {
        matches!(self, Support::Supported)
    }
}

pub fn is_conversion_supported(from: Format, to: Format) -> Support {
    if from == to {
        let label = from.as_str().to_uppercase();
        return Support::Unsupported(format!(
            "Cannot convert {label} to itself. Please choose a different output format."
        ));
    }
    match UNSUPPORTED.iter().find(|(f, t, _)| *f == from && *t == to) {
        Some((_, _, reason)) => Support::Unsupported((*reason).to_string()),
        None => Support::Supported,
    }
}

/// Output parameters a converter accepts. Dimensions are signed because they
/// arrive from form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct ConversionOptions {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub quality: Option<u32>,
    pub dpi: Option<u32>,
    /// 1-based page for multi-page sources.
    pub page: Option<i64>,
}

fn invalid(msg: impl Into<String>) -> Result<(), ValidationError> {
    Err(ValidationError::InvalidParameter(msg.into()))
}

pub fn validate_conversion_params(
    options: &ConversionOptions,
    from: Format,
    to: Format,
) -> Result<(), ValidationError> {
    if options.width.is_some() || options.height.is_some() {
        let width = options.width.unwrap_or(0);
        let height = options.height.unwrap_or(0);
        if width < 0 || height < 0 {
            return invalid("Dimensions cannot be negative.");
        }
        let max = max_dimensions(to);
        if width > i64::from(max.width) || height > i64::from(max.height) {
            return invalid(format!(
                "Output dimensions ({}x{}) exceed maximum allowed for {} format ({}x{}).",
                width,
                height,
                to.as_str().to_uppercase(),
                max.width,
                max.height
            ));
        }
    }

    if let Some(quality) = options.quality {
        if !QUALITY_RANGE.contains(&quality) {
            return invalid("Quality must be between 1 and 100.");
        }
    }

    if let Some(dpi) = options.dpi {
        if !DPI_RANGE.contains(&dpi) {
            return invalid("DPI must be between 72 and 2400.");
        }
    }

    if from == Format::Pdf {
        if let Some(page) = options.page {
            if page < 1 {
                return invalid("Page number must be 1 or greater.");
            }
        }
    }

    Ok(())
}

/// Rendered output must fit the target format's dimension table.
pub fn validate_output_dimensions(width: u32, height: u32, format: Format) -> Result<(), ValidationError> {
    let max = max_dimensions(format);
    if max.fits(width, height) {
        return Ok(());
    }
    Err(ValidationError::DimensionsExceeded {
        format,
        width,
        height,
        max_width: max.width,
        max_height: max.height,
    })
}

/// Source formats a converter for `source` should accept. Illustrator and EPS
/// documents are frequently PDF on the inside.
pub fn accepted_sources(source: Format) -> FormatSet {
    match source {
        Format::Ai => FormatSet::from([Format::Ai, Format::Pdf]),
        Format::Eps => FormatSet::from([Format::Eps, Format::Pdf]),
        other => FormatSet::from([other]),
    }
}

/// Everything a conversion handler checks before touching the bytes: the
/// pair is supported, the input validates for `source`, and the output
/// parameters are in range. Returns the resolved input format.
pub fn validate_conversion(
    data: &[u8],
    source: Format,
    target: Format,
    params: &ConversionOptions,
) -> Result<Format, ValidationError> {
    if let Support::Unsupported(reason) = is_conversion_supported(source, target) {
        return Err(ValidationError::ConversionNotSupported(reason));
    }

    let result = validate(data, &ValidateOptions::allowing(accepted_sources(source)));
    let format = match (result.error, result.format) {
        (Some(e), _) => return Err(e),
        (None, Some(format)) => format,
        (None, None) => return Err(ValidationError::UndetectableFormat),
    };

    validate_conversion_params(params, source, target)?;
    Ok(format)
}
