//! Content-based format detection.
//!
//! Three passes, first conclusive one wins:
//!
//! 1. leading-byte signatures ([`crate::signature::SIGNATURES`], in table order);
//! 2. text sniffing over the first 1000 bytes ([`text`]);
//! 3. structural field reads for fonts, metafiles, RIFF/ISO-BMFF and binary STL ([`structural`]).
//!
//! A PDF signature match is re-examined for Illustrator markers ([`illustrator`])
//! and reported as [`Format::Ai`](crate::format::Format::Ai) when one is found.

mod detector;
pub mod illustrator;
pub mod structural;
pub mod text;

pub use detector::{detect, detect_format, has_pdf_header, Detection, Method};
