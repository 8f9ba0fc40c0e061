//! Upload-level validation: format resolution, allow-list, size ceilings,
//! then the per-format structural checks.

use std::path::Path;

use tracing::debug;

use super::{
    validate_gif, validate_html, validate_jpeg, validate_mp4, validate_pdf, validate_png,
    validate_svg, validate_ttf,
};
use crate::conversion::{is_conversion_supported, Support};
use crate::detect::{detect_format, has_pdf_header};
use crate::error::Result;
use crate::format::{Format, FormatSet};
use crate::limits::{max_size, LARGEST_FORMAT_LIMIT};
use crate::result::{ValidationError, ValidationResult};

/// Caller-side constraints for one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOptions {
    pub allowed_formats: FormatSet,
    /// Generic ceiling; the per-format table applies as well and the lower one wins.
    pub max_size: u64,
    /// When set, the source→target conversion must be supported.
    pub target_format: Option<Format>,
    /// SVG active-content blocklist.
    pub security_checks: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            allowed_formats: FormatSet::all(),
            max_size: LARGEST_FORMAT_LIMIT,
            target_format: None,
            security_checks: true,
        }
    }
}

impl ValidateOptions {
    /// Default options restricted to `formats`.
    pub fn allowing(formats: impl Into<FormatSet>) -> Self {
        Self {
            allowed_formats: formats.into(),
            ..Self::default()
        }
    }

    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn target(mut self, target: Format) -> Self {
        self.target_format = Some(target);
        self
    }

    pub fn security_checks(mut self, enabled: bool) -> Self {
        self.security_checks = enabled;
        self
    }
}

/// A file received with metadata (multipart field, file on disk).
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    /// Client-supplied file name; only its extension is used.
    pub name: &'a str,
    /// Declared MIME type, may be empty.
    pub mime_type: &'a str,
    /// Declared size; ignored when `bytes` is present.
    pub size: u64,
    pub bytes: Option<&'a [u8]>,
}

impl<'a> Upload<'a> {
    pub fn new(name: &'a str, mime_type: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            name,
            mime_type,
            size: bytes.len() as u64,
            bytes: Some(bytes),
        }
    }

    /// Lowercased extension of `name`, without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Buffer(&'a [u8]),
    Upload(Upload<'a>),
}

impl<'a> Input<'a> {
    pub fn size(&self) -> u64 {
        match self {
            Input::Buffer(b) => b.len() as u64,
            Input::Upload(u) => u.bytes.map_or(u.size, |b| b.len() as u64),
        }
    }

    pub fn bytes(&self) -> Option<&'a [u8]> {
        match self {
            Input::Buffer(b) => Some(b),
            Input::Upload(u) => u.bytes,
        }
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(b: &'a [u8]) -> Self {
        Input::Buffer(b)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        Input::Buffer(b.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Input::Buffer(b.as_slice())
    }
}

impl<'a> From<Upload<'a>> for Input<'a> {
    fn from(u: Upload<'a>) -> Self {
        Input::Upload(u)
    }
}

fn is_mime(declared: &str, expected: &str) -> bool {
    declared.trim().eq_ignore_ascii_case(expected)
}

/// Declared metadata first, content as the fallback.
fn resolve_upload(upload: &Upload<'_>, allowed: &FormatSet) -> Option<Format> {
    let ext = upload.extension();
    let ext = ext.as_deref();
    let mime = upload.mime_type.trim();

    if ext == Some("ai")
        && (mime.is_empty()
            || is_mime(mime, "application/pdf")
            || is_mime(mime, "application/postscript"))
    {
        debug!("ai extension with PDF/PostScript MIME type, trusting extension");
        return Some(Format::Ai);
    }

    if (is_mime(mime, "application/pdf") || ext == Some("pdf")) && allowed.contains(Format::Ai) {
        debug!("PDF upload with ai allowed, deferring to content markers");
        return match upload.bytes {
            Some(bytes) => detect_format(bytes),
            None => Some(Format::Pdf),
        };
    }

    Format::from_mime(mime)
        .or_else(|| ext.and_then(Format::from_extension))
        .or_else(|| upload.bytes.and_then(detect_format))
}

/// Allow-list decision table.
///
/// | detected | allowed          | outcome |
/// |----------|------------------|---------|
/// | f        | contains f       | f       |
/// | pdf      | ai, not pdf      | ai      |
/// | ai       | pdf, not ai      | pdf, when the bytes carry a PDF header |
/// | f        | otherwise        | rejected |
fn resolve_allowed(
    format: Format,
    bytes: Option<&[u8]>,
    allowed: &FormatSet,
) -> std::result::Result<Format, ValidationError> {
    if allowed.contains(format) {
        return Ok(format);
    }
    match format {
        Format::Pdf if allowed.contains(Format::Ai) => {
            debug!("pdf not allowed but ai is, treating as ai");
            Ok(Format::Ai)
        }
        Format::Ai if allowed.contains(Format::Pdf) && bytes.is_some_and(has_pdf_header) => {
            debug!("Illustrator document with PDF body on a pdf endpoint, treating as pdf");
            Ok(Format::Pdf)
        }
        _ => Err(ValidationError::FormatNotAllowed {
            format,
            allowed: allowed.joined(),
        }),
    }
}

/// Structural checks for `format`; formats without one pass.
pub fn validate_format_specific(
    data: &[u8],
    format: Format,
    options: &ValidateOptions,
) -> ValidationResult {
    match format {
        Format::Svg => validate_svg(data, options.security_checks),
        Format::Png => validate_png(data),
        Format::Jpg => validate_jpeg(data),
        Format::Gif => validate_gif(data),
        Format::Pdf => validate_pdf(data),
        Format::Mp4 => validate_mp4(data),
        Format::Html => validate_html(data),
        Format::Ttf => validate_ttf(data),
        Format::Webp
        | Format::Bmp
        | Format::Ico
        | Format::Tiff
        | Format::Eps
        | Format::Ai
        | Format::Dxf
        | Format::Stl
        | Format::Avif
        | Format::Cdr
        | Format::Emf
        | Format::Wmf => ValidationResult::valid(format, data.len() as u64),
    }
}

/// Markup declared as something else still gets its script blocklist.
fn embedded_markup_threat(
    data: &[u8],
    sniffed: Option<Format>,
    format: Format,
    options: &ValidateOptions,
) -> Option<ValidationError> {
    let sniffed = sniffed.filter(|s| matches!(s, Format::Svg | Format::Html) && *s != format)?;
    match validate_format_specific(data, sniffed, options).error {
        Some(e @ ValidationError::DangerousContent { .. }) => Some(e),
        _ => None,
    }
}

/// Validate a buffer or an upload against `options`. Never panics; every
/// expected failure comes back as an invalid [`ValidationResult`].
pub fn validate<'a>(input: impl Into<Input<'a>>, options: &ValidateOptions) -> ValidationResult {
    let input = input.into();
    let size = input.size();
    let bytes = input.bytes();

    if size == 0 {
        return ValidationResult::invalid(ValidationError::EmptyFile, None, size);
    }

    let mut warnings = Vec::new();
    let (resolved, sniffed) = match &input {
        Input::Buffer(data) => {
            let detected = detect_format(data);
            (detected, detected)
        }
        Input::Upload(upload) => {
            let declared = resolve_upload(upload, &options.allowed_formats);
            let sniffed = upload.bytes.and_then(detect_format);
            if let (Some(declared), Some(sniffed)) = (declared, sniffed) {
                if sniffed != declared {
                    warnings.push(format!(
                        "declared as {} but content looks like {}",
                        declared, sniffed
                    ));
                }
            }
            (declared, sniffed)
        }
    };
    debug!(?resolved, size, "format resolved");

    let Some(detected) = resolved else {
        return ValidationResult::invalid(ValidationError::UndetectableFormat, None, size);
    };

    let format = match resolve_allowed(detected, bytes, &options.allowed_formats) {
        Ok(format) => format,
        Err(e) => return ValidationResult::invalid(e, Some(detected), size),
    };

    if let Some(target) = options.target_format {
        if let Support::Unsupported(reason) = is_conversion_supported(format, target) {
            return ValidationResult::invalid(
                ValidationError::ConversionNotSupported(reason),
                Some(format),
                size,
            );
        }
    }

    let limit = max_size(format).min(options.max_size);
    if size > limit {
        return ValidationResult::invalid(
            ValidationError::SizeExceeded { format, size, limit },
            Some(format),
            size,
        );
    }

    if let Some(data) = bytes {
        let mut structural = validate_format_specific(data, format, options);
        warnings.append(&mut structural.warnings);
        if !structural.is_valid {
            return ValidationResult {
                size,
                warnings,
                ..structural
            };
        }
        if let Some(threat) = embedded_markup_threat(data, sniffed, format, options) {
            return ValidationResult::invalid(threat, Some(format), size).with_warnings(warnings);
        }
    }

    ValidationResult::valid(format, size).with_warnings(warnings)
}

/// Read a file and validate it as an upload named after the path. Files
/// larger than `options.max_size` are judged on metadata without being read.
pub fn validate_path(path: impl AsRef<Path>, options: &ValidateOptions) -> Result<ValidationResult> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if size > options.max_size {
        debug!(size, max_size = options.max_size, "over the ceiling, skipping read");
        let upload = Upload {
            name: &name,
            mime_type: "",
            size,
            bytes: None,
        };
        return Ok(validate(upload, options));
    }

    let bytes = std::fs::read(path)?;
    Ok(validate(Upload::new(&name, "", &bytes), options))
}

/// Result of validating one item in a batch.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchItem<T> {
    pub id: T,
    pub result: ValidationResult,
}

/// Validate many buffers; uses rayon when the `parallel` feature is enabled.
#[cfg(not(feature = "parallel"))]
pub fn validate_batch<T, B>(items: Vec<(T, B)>, options: &ValidateOptions) -> Vec<BatchItem<T>>
where
    B: AsRef<[u8]>,
{
    items
        .into_iter()
        .map(|(id, bytes)| BatchItem {
            result: validate(bytes.as_ref(), options),
            id,
        })
        .collect()
}

/// Validate many buffers; uses rayon when the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn validate_batch<T, B>(items: Vec<(T, B)>, options: &ValidateOptions) -> Vec<BatchItem<T>>
where
    T: Send,
    B: AsRef<[u8]> + Send,
{
    use rayon::prelude::*;

    items
        .into_par_iter()
        .map(|(id, bytes)| BatchItem {
            result: validate(bytes.as_ref(), options),
            id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_extension_is_lowercased() {
        let u = Upload::new("Drawing.AI", "", b"%PDF-1.4");
        assert_eq!(u.extension().as_deref(), Some("ai"));
    }

    #[test]
    fn decision_table() {
        let ai_only = FormatSet::from([Format::Ai]);
        let pdf_only = FormatSet::from([Format::Pdf]);
        let png_only = FormatSet::from([Format::Png]);

        assert_eq!(resolve_allowed(Format::Pdf, None, &ai_only), Ok(Format::Ai));
        assert_eq!(
            resolve_allowed(Format::Ai, Some(&b"%PDF-1.5"[..]), &pdf_only),
            Ok(Format::Pdf)
        );
        assert!(resolve_allowed(Format::Ai, Some(&b"%!PS-Adobe"[..]), &pdf_only).is_err());
        assert!(resolve_allowed(Format::Pdf, None, &png_only).is_err());
    }

    #[test]
    fn content_fallback_for_unknown_metadata() {
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        let r = validate(Upload::new("blob", "application/octet-stream", gif), &ValidateOptions::default());
        assert!(r.is_valid, "{:?}", r);
        assert_eq!(r.format, Some(Format::Gif));
    }

    #[test]
    fn scripted_svg_behind_image_name() {
        let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(1)</script></svg>";
        let r = validate(Upload::new("evil.bmp", "", svg), &ValidateOptions::default());
        assert!(!r.is_valid);
        assert_eq!(r.format, Some(Format::Bmp));
        assert_eq!(r.error.as_ref().map(|e| e.code()), Some("SECURITY_VIOLATION"));
        assert_eq!(r.warnings, ["declared as bmp but content looks like svg"]);

        let relaxed = ValidateOptions::default().security_checks(false);
        assert!(validate(Upload::new("evil.bmp", "", svg), &relaxed).is_valid);
    }

    #[test]
    fn scripted_html_behind_image_name() {
        let page = b"<!DOCTYPE html><html><script>eval(atob('eA=='))</script></html>";
        let r = validate(Upload::new("cat.bmp", "", page), &ValidateOptions::default());
        assert!(!r.is_valid);
        assert!(matches!(
            r.error,
            Some(ValidationError::DangerousContent { format: Format::Html, .. })
        ));
    }
}
