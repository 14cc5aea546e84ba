//! NTX → raster image conversion
//!
//! Expands NTX pixels to RGBA8 and hands them to the `image` crate encoders.
//! JPEG has no alpha channel, so it is encoded from an RGB8 copy.
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::ProgressCallback;
use crate::error::{Error, Result};
use crate::formats::ntx::{NtxImage, decode_ntx, parse_ntx_bytes};
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{DynamicImage, ImageBuffer, RgbaImage};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Raster file type written by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ImageFileType {
    #[default]
    Png,
    Jpg,
    Bmp,
    Tiff,
}

impl ImageFileType {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Guess the type from a path's extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpg),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    fn encode_error(self, e: &image::ImageError) -> Error {
        Error::ImageEncodeFailed {
            format: self.extension(),
            message: e.to_string(),
        }
    }
}

/// Expand a decoded texture into an RGBA image buffer.
///
/// # Errors
/// Returns [`Error::UnsupportedSurfaceFormat`] if the pixels cannot be
/// expanded, or [`Error::ImageBufferFailed`] if the buffer size is wrong.
pub fn ntx_to_rgba_image(ntx: &NtxImage) -> Result<RgbaImage> {
    let rgba = ntx.to_rgba8()?;
    ImageBuffer::from_raw(u32::from(ntx.width), u32::from(ntx.height), rgba)
        .ok_or(Error::ImageBufferFailed)
}

/// Encode a decoded texture.
///
/// # Errors
/// Returns an error if the pixels cannot be expanded or encoding fails.
pub fn ntx_to_image_bytes(ntx: &NtxImage, file_type: ImageFileType) -> Result<Vec<u8>> {
    let img = ntx_to_rgba_image(ntx)?;
    let mut out = Vec::new();

    let encoded = match file_type {
        ImageFileType::Png => img.write_with_encoder(PngEncoder::new(&mut out)),
        ImageFileType::Jpg => DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_with_encoder(JpegEncoder::new(&mut out)),
        ImageFileType::Bmp => img.write_with_encoder(BmpEncoder::new(&mut out)),
        ImageFileType::Tiff => img.write_with_encoder(TiffEncoder::new(Cursor::new(&mut out))),
    };
    encoded.map_err(|e| file_type.encode_error(&e))?;

    Ok(out)
}

/// Convert NTX bytes to encoded image bytes
///
/// # Errors
/// Returns an error if the NTX data cannot be decoded or encoding fails.
pub fn ntx_bytes_to_image_bytes(data: &[u8], file_type: ImageFileType) -> Result<Vec<u8>> {
    let ntx = parse_ntx_bytes(data)?;
    ntx_to_image_bytes(&ntx, file_type)
}

/// Convert an NTX file to an image file
///
/// # Errors
/// Returns an error if the file cannot be read, decoded or written.
pub fn convert_ntx<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    dest: Q,
    file_type: ImageFileType,
) -> Result<()> {
    convert_ntx_with_progress(source, dest, file_type, &|_| {})
}

/// Convert an NTX file to an image file, reporting each step
///
/// # Errors
/// Returns an error if the file cannot be read, decoded or written.
pub fn convert_ntx_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    dest: Q,
    file_type: ImageFileType,
    progress: ProgressCallback,
) -> Result<()> {
    tracing::info!(
        "Converting NTX→{}: {:?} → {:?}",
        file_type.extension(),
        source.as_ref(),
        dest.as_ref()
    );

    progress("Reading NTX...");
    let ntx = decode_ntx(BufReader::new(File::open(source.as_ref())?))?;

    progress("Encoding image...");
    let bytes = ntx_to_image_bytes(&ntx, file_type)?;

    progress("Writing file...");
    let mut output = BufWriter::new(File::create(dest.as_ref())?);
    output.write_all(&bytes)?;
    output.flush()?;

    tracing::info!("Conversion complete");
    Ok(())
}
