//! NTX image structure and RGBA expansion

use crate::error::{Error, Result};
use crate::formats::common::half_to_f32;
use crate::formats::surface::{FormatClass, SurfaceFormat, extract_channel};

/// A decoded NTX texture.
///
/// Pixels hold the packed little-endian value of each texel, with palette
/// indices already resolved to palette entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtxImage {
    pub version: u16,
    pub width: u16,
    pub height: u16,
    pub format: SurfaceFormat,
    pub flags: u16,
    pub user_flags: u16,
    pub palette: Option<Vec<u32>>,
    /// Row-major, `y * width + x`.
    pub pixels: Vec<u32>,
    /// Bytes left after the pixel plane.
    pub trailing_bytes: u64,
}

impl NtxImage {
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    #[must_use]
    pub fn is_paletted(&self) -> bool {
        self.palette.is_some()
    }

    /// Packed value at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    /// Expand every pixel to 8-bit RGBA, row-major.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedSurfaceFormat`] for palette-only,
    /// compressed and wide float formats.
    pub fn to_rgba8(&self) -> Result<Vec<u8>> {
        let expand = pixel_expander(self.format)?;
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &pixel in &self.pixels {
            out.extend_from_slice(&expand(pixel));
        }
        Ok(out)
    }
}

type Expander = Box<dyn Fn(u32) -> [u8; 4]>;

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn depth_to_grey(depth: u32, max: u32) -> [u8; 4] {
    let grey = unit_to_u8((f64::from(depth) / f64::from(max)) as f32);
    [grey, grey, grey, 255]
}

fn pixel_expander(format: SurfaceFormat) -> Result<Expander> {
    let unsupported = || Error::UnsupportedSurfaceFormat {
        format: format.tag(),
    };

    match format.class() {
        FormatClass::Direct => {
            let desc = format.descriptor();
            Ok(Box::new(move |p| {
                [
                    extract_channel(p, desc.red_mask).unwrap_or(0),
                    extract_channel(p, desc.green_mask).unwrap_or(0),
                    extract_channel(p, desc.blue_mask).unwrap_or(0),
                    extract_channel(p, desc.alpha_mask).unwrap_or(255),
                ]
            }))
        }
        FormatClass::Float => match format {
            SurfaceFormat::R16F => Ok(Box::new(|p| {
                [unit_to_u8(half_to_f32(p as u16)), 0, 0, 255]
            })),
            SurfaceFormat::G16R16F => Ok(Box::new(|p| {
                [
                    unit_to_u8(half_to_f32(p as u16)),
                    unit_to_u8(half_to_f32((p >> 16) as u16)),
                    0,
                    255,
                ]
            })),
            SurfaceFormat::R32F => Ok(Box::new(|p| [unit_to_u8(f32::from_bits(p)), 0, 0, 255])),
            _ => Err(unsupported()),
        },
        FormatClass::Depth => match format {
            SurfaceFormat::D16 => Ok(Box::new(|p| depth_to_grey(p & 0xFFFF, 0xFFFF))),
            SurfaceFormat::D24 => Ok(Box::new(|p| depth_to_grey(p & 0x00FF_FFFF, 0x00FF_FFFF))),
            SurfaceFormat::D24S8 => Ok(Box::new(|p| depth_to_grey(p >> 8, 0x00FF_FFFF))),
            _ => Ok(Box::new(|p| depth_to_grey(p, u32::MAX))),
        },
        FormatClass::Unknown | FormatClass::Palettized | FormatClass::Compressed => Err(unsupported()),
    }
}
