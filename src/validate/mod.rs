//! Upload validation: format resolution, allow-list, size ceilings, and
//! per-format structural checks.

mod file;
mod gif;
mod html;
mod jpeg;
mod mp4;
mod pdf;
mod png;
mod svg;
mod ttf;

pub use gif::validate_gif;
pub use html::{validate_html, MAX_HTML_SIZE};
pub use jpeg::validate_jpeg;
pub use mp4::validate_mp4;
pub use pdf::{pdf_version, validate_pdf};
pub use png::validate_png;
pub use svg::{dangerous_matches, validate_svg};
pub use ttf::{table_directory, validate_ttf, TtfTable};

pub use file::{
    validate, validate_batch, validate_format_specific, validate_path, BatchItem, Input, Upload,
    ValidateOptions,
};
