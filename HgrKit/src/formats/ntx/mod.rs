//! NTX (KA3D texture) format module
//!
//! Little-endian raster container: a 14-byte header, an optional palette and
//! one packed value (or palette index byte) per pixel.

mod document;
mod reader;

pub use document::NtxImage;
pub use reader::{decode_ntx, parse_ntx_bytes, read_ntx};

use crate::error::Result;
use crate::formats::common::ByteReader;
use std::io::Read;

/// Size of the fixed header in bytes.
pub const NTX_HEADER_SIZE: usize = 14;

/// Raw NTX header fields, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtxHeader {
    pub version: u16,
    pub height: u16,
    pub width: u16,
    /// Raw surface format tag.
    pub format: u16,
    pub palette_size: u16,
    pub flags: u16,
    pub user_flags: u16,
}

impl NtxHeader {
    pub(crate) fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        Ok(Self {
            version: reader.read_u16_le()?,
            height: reader.read_u16_le()?,
            width: reader.read_u16_le()?,
            format: reader.read_u16_le()?,
            palette_size: reader.read_u16_le()?,
            flags: reader.read_u16_le()?,
            user_flags: reader.read_u16_le()?,
        })
    }
}
