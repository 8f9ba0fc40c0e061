//! Per-format size and dimension ceilings.

use crate::format::Format;

const MIB: u64 = 1024 * 1024;

/// Maximum accepted upload size for a format, in bytes.
pub const fn max_size(format: Format) -> u64 {
    match format {
        Format::Png => 20 * MIB,
        Format::Jpg => 15 * MIB,
        Format::Gif => 10 * MIB,
        Format::Webp => 15 * MIB,
        Format::Bmp => 50 * MIB,
        Format::Svg => 5 * MIB,
        Format::Pdf => 100 * MIB,
        Format::Ico => MIB,
        Format::Tiff => 50 * MIB,
        Format::Eps => 25 * MIB,
        Format::Ai => 50 * MIB,
        Format::Dxf => 25 * MIB,
        Format::Stl => 100 * MIB,
        Format::Avif => 10 * MIB,
        Format::Cdr => 50 * MIB,
        Format::Mp4 => 200 * MIB,
        Format::Html => 5 * MIB,
        Format::Ttf => 10 * MIB,
        Format::Emf => 25 * MIB,
        Format::Wmf => 10 * MIB,
    }
}

/// Largest entry of the size table; the default generic ceiling.
pub const LARGEST_FORMAT_LIMIT: u64 = 200 * MIB;

/// Pixel (or coordinate) bounds, `width x height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn fits(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

/// Maximum dimensions for a format. Fonts have none and report `0x0`.
pub const fn max_dimensions(format: Format) -> Dimensions {
    match format {
        Format::Png | Format::Jpg | Format::Bmp | Format::Stl | Format::Avif | Format::Html => {
            Dimensions::new(10_000, 10_000)
        }
        Format::Gif => Dimensions::new(5_000, 5_000),
        Format::Webp => Dimensions::new(16_383, 16_383),
        Format::Svg => Dimensions::new(100_000, 100_000),
        Format::Pdf | Format::Eps | Format::Ai | Format::Cdr => Dimensions::new(20_000, 20_000),
        Format::Ico => Dimensions::new(256, 256),
        Format::Tiff => Dimensions::new(30_000, 30_000),
        Format::Dxf => Dimensions::new(50_000, 50_000),
        Format::Mp4 => Dimensions::new(4096, 2160),
        Format::Ttf => Dimensions::new(0, 0),
        Format::Emf | Format::Wmf => Dimensions::new(32_767, 32_767),
    }
}
