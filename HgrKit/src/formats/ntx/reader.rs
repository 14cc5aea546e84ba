//! `.ntx` file reading and parsing
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::{NtxHeader, NtxImage};
use crate::error::{Error, Result};
use crate::formats::common::{ByteReader, bounded_capacity};
use crate::formats::surface::SurfaceFormat;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a .ntx file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, or any decode error
/// from [`decode_ntx`].
pub fn read_ntx<P: AsRef<Path>>(path: P) -> Result<NtxImage> {
    let file = File::open(path.as_ref())?;
    tracing::debug!("Reading NTX: {}", path.as_ref().display());
    decode_ntx(BufReader::new(file))
}

/// Parse .ntx data from bytes
///
/// # Errors
///
/// Any decode error from [`decode_ntx`].
pub fn parse_ntx_bytes(data: &[u8]) -> Result<NtxImage> {
    decode_ntx(data)
}

/// Decode an NTX texture.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSurfaceFormat`] for formats that do not fit a
/// 32-bit packed pixel, [`Error::PaletteTooLarge`] or
/// [`Error::PaletteIndexOutOfRange`] for a bad palette, and
/// [`Error::UnexpectedEof`] on truncation.
pub fn decode_ntx<R: Read>(source: R) -> Result<NtxImage> {
    let mut reader = ByteReader::new(source);
    let header = NtxHeader::decode(&mut reader)?;

    let format = SurfaceFormat::from_u16(header.format)?;
    let bits = format.descriptor().bits_per_pixel;
    if bits == 0 || bits % 8 != 0 || bits > 32 {
        return Err(Error::UnsupportedSurfaceFormat {
            format: header.format,
        });
    }
    let bytes_per_pixel = (bits / 8) as usize;
    let pixel_count = usize::from(header.width) * usize::from(header.height);

    tracing::debug!(
        "NTX v{} {}x{} {} ({} bpp), palette {}",
        header.version,
        header.width,
        header.height,
        format,
        bits,
        header.palette_size
    );

    let palette = if header.palette_size > 0 {
        let size = usize::from(header.palette_size);
        if size > pixel_count {
            return Err(Error::PaletteTooLarge {
                size,
                pixels: pixel_count,
            });
        }
        let mut entries = Vec::with_capacity(size);
        for _ in 0..size {
            entries.push(reader.read_packed_le(bytes_per_pixel)?);
        }
        Some(entries)
    } else {
        None
    };

    let mut pixels = Vec::with_capacity(bounded_capacity(pixel_count));
    match &palette {
        Some(entries) => {
            for _ in 0..pixel_count {
                let offset = reader.position();
                let index = reader.read_u8()?;
                let value = entries.get(usize::from(index)).copied().ok_or(
                    Error::PaletteIndexOutOfRange {
                        offset,
                        index,
                        len: entries.len(),
                    },
                )?;
                pixels.push(value);
            }
        }
        None => {
            for _ in 0..pixel_count {
                pixels.push(reader.read_packed_le(bytes_per_pixel)?);
            }
        }
    }

    let trailing_bytes = reader.remaining_len()?;
    if trailing_bytes > 0 {
        tracing::debug!("{} trailing bytes after pixel plane", trailing_bytes);
    }

    Ok(NtxImage {
        version: header.version,
        width: header.width,
        height: header.height,
        format,
        flags: header.flags,
        user_flags: header.user_flags,
        palette,
        pixels,
        trailing_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::ntx::NTX_HEADER_SIZE;
    use pretty_assertions::assert_eq;

    fn header(width: u16, height: u16, format: SurfaceFormat, palette_size: u16) -> Vec<u8> {
        [1u16, height, width, format.tag(), palette_size, 0, 0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect()
    }

    #[test]
    fn test_direct_r5g6b5() {
        let mut data = header(2, 1, SurfaceFormat::R5G6B5, 0);
        data.extend_from_slice(&[0x00, 0xF8, 0x1F, 0x00]);
        assert_eq!(data.len(), NTX_HEADER_SIZE + 4);
        let image = parse_ntx_bytes(&data).unwrap();
        assert!(!image.is_paletted());
        assert_eq!(image.pixels, vec![0xF800, 0x001F]);
        assert_eq!(image.to_rgba8().unwrap(), vec![255, 0, 0, 255, 0, 0, 255, 255]);
        assert_eq!(image.trailing_bytes, 0);
    }

    #[test]
    fn test_three_byte_pixels() {
        let mut data = header(1, 1, SurfaceFormat::R8G8B8, 0);
        data.extend_from_slice(&[0x30, 0x20, 0x10, 0xEE, 0xEE]);
        let image = parse_ntx_bytes(&data).unwrap();
        assert_eq!(image.pixels, vec![0x0010_2030]);
        assert_eq!(image.trailing_bytes, 2);
    }

    #[test]
    fn test_palette_index_out_of_range() {
        let mut data = header(2, 1, SurfaceFormat::A8R8G8B8, 1);
        data.extend_from_slice(&0xFF00_00FFu32.to_le_bytes());
        data.extend_from_slice(&[0, 3]);
        match parse_ntx_bytes(&data) {
            Err(Error::PaletteIndexOutOfRange { offset, index, len }) => {
                assert_eq!(offset, 14 + 4 + 1);
                assert_eq!(index, 3);
                assert_eq!(len, 1);
            }
            other => panic!("expected PaletteIndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_palette_too_large() {
        let data = header(1, 1, SurfaceFormat::A8R8G8B8, 2);
        assert!(matches!(
            parse_ntx_bytes(&data),
            Err(Error::PaletteTooLarge { size: 2, pixels: 1 })
        ));
    }

    #[test]
    fn test_unsupported_formats() {
        for format in [SurfaceFormat::Dxt1, SurfaceFormat::P4, SurfaceFormat::A16B16G16R16F] {
            let data = header(1, 1, format, 0);
            assert!(matches!(
                parse_ntx_bytes(&data),
                Err(Error::UnsupportedSurfaceFormat { format: f }) if f == format.tag()
            ));
        }
        let mut data = header(1, 1, SurfaceFormat::L8, 0);
        data[6] = 99;
        assert!(matches!(
            parse_ntx_bytes(&data),
            Err(Error::UnsupportedSurfaceFormat { format: 99 })
        ));
    }

    #[test]
    fn test_zero_sized_image() {
        let data = header(0, 0, SurfaceFormat::A8R8G8B8, 0);
        let image = parse_ntx_bytes(&data).unwrap();
        assert!(image.pixels.is_empty());
        assert!(image.to_rgba8().unwrap().is_empty());
    }
}
