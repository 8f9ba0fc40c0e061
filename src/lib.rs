//! # formatcheck
//!
//! Decide what an uploaded file *is* from its bytes, and whether it is acceptable
//! for a given converter endpoint.
//!
//! Detection looks at content, never at the name alone: leading-byte signatures
//! first, then text sniffing for markup / PostScript / DXF / ASCII STL, then
//! structural field reads for fonts, Windows metafiles, CorelDRAW, AVIF and
//! binary STL. PDFs written by Adobe Illustrator are recognised from their
//! creator markers and reported as `ai`.
//!
//! Validation layers an allow-list, per-format size ceilings and per-format
//! structural checks on top (PNG IHDR and dimensions, PDF header / trailer,
//! SVG active content, font table count, ...). Every expected failure is a
//! [`ValidationResult`] with a human-readable error, never a panic.
//!
//! ## Supported formats
//!
//! png, jpg, gif, webp, bmp, svg, pdf, ico, tiff, eps, ai, dxf, stl, avif,
//! cdr, mp4, html, ttf, emf, wmf.
//!
//! ## Example
//!
//! ```
//! use formatcheck::{validate, Format, ValidateOptions};
//!
//! let png = [
//!     0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13, b'I', b'H', b'D', b'R',
//!     0, 0, 0, 16, 0, 0, 0, 16, 8, 6, 0, 0, 0,
//! ];
//! let result = validate(&png, &ValidateOptions::allowing([Format::Png]));
//! assert!(result.is_valid);
//! assert_eq!(result.format, Some(Format::Png));
//! ```
//!
//! ## Throughput
//!
//! Everything is synchronous and works on borrowed slices. Calls share no
//! mutable state, so callers can validate concurrently; `validate_batch` uses
//! rayon when the `parallel` feature is enabled.

mod bytes;
mod result;

pub mod conversion;
pub mod detect;
pub mod error;
pub mod filename;
pub mod format;
pub mod limits;
pub mod signature;
pub mod validate;

#[cfg(feature = "serde")]
pub mod config;

#[cfg(feature = "serde")]
pub use config::ValidatorConfig;
pub use conversion::{
    is_conversion_supported, validate_conversion, validate_conversion_params, ConversionOptions,
    Support,
};
pub use detect::{detect, detect_format, Detection, Method};
pub use error::{Error, Result};
pub use format::{Format, FormatSet};
pub use result::{ValidationError, ValidationResult};
pub use validate::{
    validate, validate_batch, validate_format_specific, validate_path, BatchItem, Input,
    Upload, ValidateOptions,
};
