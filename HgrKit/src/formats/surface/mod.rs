//! Surface pixel format registry
//!
//! Maps every KA3D surface format tag to its bit depth and channel masks.
//! The table is a `static` and never changes after the program starts, so it
//! can be read from any number of decoder threads without synchronization.
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use crate::error::{Error, Result};

/// Pixel layout tag, numbered as stored in NTX headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SurfaceFormat {
    Unknown = 0,
    R8G8B8,
    B8G8R8,
    A8R8G8B8,
    X8R8G8B8,
    X8B8G8R8,
    A8B8G8R8,
    R5G6B5,
    R5G5B5,
    R6G6B6,
    P4,
    P8,
    L8,
    A1R5G5B5,
    X4R4G4B4,
    A4R4G4B4,
    A4B4G4R4,
    R4G4B4A4,
    A1B5G5R5,
    R5G5B5A1,
    R3G3B2,
    R3G2B3,
    A8,
    A8R3G3B2,
    A8R3G2B3,
    Dxt1,
    Dxt3,
    Dxt5,
    R16F,
    G16R16F,
    A16B16G16R16F,
    R32F,
    G32R32F,
    A32B32G32R32F,
    D32,
    D24,
    D16,
    D24S8,
}

/// Broad family a surface format belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    Unknown,
    /// Packed integer channels described by masks.
    Direct,
    Palettized,
    /// Block compressed (DXT).
    Compressed,
    Float,
    Depth,
}

/// Bit depth and channel masks of a surface format.
///
/// Masks are in the pixel's packed integer representation; a zero mask means
/// the channel is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub bits_per_pixel: u32,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
}

impl FormatDescriptor {
    const fn new(bits_per_pixel: u32, red_mask: u32, green_mask: u32, blue_mask: u32, alpha_mask: u32) -> Self {
        Self { bits_per_pixel, red_mask, green_mask, blue_mask, alpha_mask }
    }

    /// Whole bytes per pixel (0 for sub-byte and compressed formats).
    #[must_use]
    pub const fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }

    /// True if any colour or alpha mask is set.
    #[must_use]
    pub const fn has_masks(&self) -> bool {
        (self.red_mask | self.green_mask | self.blue_mask | self.alpha_mask) != 0
    }
}

/// Number of surface format tags.
pub const SURFACE_FORMAT_COUNT: usize = 38;

/// Descriptor per tag, indexed by the tag value.
static FORMAT_TABLE: [FormatDescriptor; SURFACE_FORMAT_COUNT] = [
    FormatDescriptor::new(0, 0x00000000, 0x00000000, 0x00000000, 0x00000000), // UNKNOWN
    FormatDescriptor::new(24, 0x00ff0000, 0x0000ff00, 0x000000ff, 0x00000000), // R8G8B8
    FormatDescriptor::new(24, 0x000000ff, 0x0000ff00, 0x00ff0000, 0x00000000), // B8G8R8
    FormatDescriptor::new(32, 0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000), // A8R8G8B8
    FormatDescriptor::new(32, 0x00ff0000, 0x0000ff00, 0x000000ff, 0x00000000), // X8R8G8B8
    FormatDescriptor::new(32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0x00000000), // X8B8G8R8
    FormatDescriptor::new(32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0xff000000), // A8B8G8R8
    FormatDescriptor::new(16, 0x0000f800, 0x000007e0, 0x0000001f, 0x00000000), // R5G6B5
    FormatDescriptor::new(16, 0x00007c00, 0x000003e0, 0x0000001f, 0x00000000), // R5G5B5
    FormatDescriptor::new(32, 0x3f << 12, 0x3f << 6, 0x3f, 0x00000000),       // R6G6B6
    FormatDescriptor::new(4, 0x00000000, 0x00000000, 0x00000000, 0x00000000),  // P4
    FormatDescriptor::new(8, 0x00000000, 0x00000000, 0x00000000, 0x00000000),  // P8
    FormatDescriptor::new(8, 0x000000ff, 0x000000ff, 0x000000ff, 0x00000000),  // L8
    FormatDescriptor::new(16, 0x00007c00, 0x000003e0, 0x0000001f, 0x00008000), // A1R5G5B5
    FormatDescriptor::new(16, 0x00000f00, 0x000000f0, 0x0000000f, 0x00000000), // X4R4G4B4
    FormatDescriptor::new(16, 0x00000f00, 0x000000f0, 0x0000000f, 0x0000f000), // A4R4G4B4
    FormatDescriptor::new(16, 0x0000000f, 0x000000f0, 0x00000f00, 0x0000f000), // A4B4G4R4
    FormatDescriptor::new(16, 0x0000f000, 0x00000f00, 0x000000f0, 0x0000000f), // R4G4B4A4
    FormatDescriptor::new(16, 0x0000001f, 0x000003e0, 0x00007c00, 0x00008000), // A1B5G5R5
    FormatDescriptor::new(16, 0x1f << 11, 0x1f << 6, 0x1f << 1, 0x00000001),  // R5G5B5A1
    FormatDescriptor::new(8, 0x000000e0, 0x0000001c, 0x00000003, 0x00000000),  // R3G3B2
    FormatDescriptor::new(8, 0x000000e0, 0x00000018, 0x00000007, 0x00000000),  // R3G2B3
    FormatDescriptor::new(8, 0x00000000, 0x00000000, 0x00000000, 0x000000ff),  // A8
    FormatDescriptor::new(16, 0x000000e0, 0x0000001c, 0x00000003, 0x0000ff00), // A8R3G3B2
    FormatDescriptor::new(16, 0x000000e0, 0x00000018, 0x00000007, 0x0000ff00), // A8R3G2B3
    FormatDescriptor::new(0, 0, 0, 0, 0),   // DXT1
    FormatDescriptor::new(0, 0, 0, 0, 0),   // DXT3
    FormatDescriptor::new(0, 0, 0, 0, 0),   // DXT5
    FormatDescriptor::new(16, 0, 0, 0, 0),  // R16F
    FormatDescriptor::new(32, 0, 0, 0, 0),  // G16R16F
    FormatDescriptor::new(64, 0, 0, 0, 0),  // A16B16G16R16F
    FormatDescriptor::new(32, 0, 0, 0, 0),  // R32F
    FormatDescriptor::new(64, 0, 0, 0, 0),  // G32R32F
    FormatDescriptor::new(128, 0, 0, 0, 0), // A32B32G32R32F
    FormatDescriptor::new(32, 0, 0, 0, 0),  // D32
    FormatDescriptor::new(24, 0, 0, 0, 0),  // D24
    FormatDescriptor::new(16, 0, 0, 0, 0),  // D16
    FormatDescriptor::new(32, 0, 0, 0, 0),  // D24S8
];

static FORMAT_NAMES: [&str; SURFACE_FORMAT_COUNT] = [
    "UNKNOWN", "R8G8B8", "B8G8R8", "A8R8G8B8", "X8R8G8B8", "X8B8G8R8", "A8B8G8R8",
    "R5G6B5", "R5G5B5", "R6G6B6", "P4", "P8", "L8", "A1R5G5B5", "X4R4G4B4",
    "A4R4G4B4", "A4B4G4R4", "R4G4B4A4", "A1B5G5R5", "R5G5B5A1", "R3G3B2",
    "R3G2B3", "A8", "A8R3G3B2", "A8R3G2B3", "DXT1", "DXT3", "DXT5", "R16F",
    "G16R16F", "A16B16G16R16F", "R32F", "G32R32F", "A32B32G32R32F", "D32", "D24",
    "D16", "D24S8",
];

impl SurfaceFormat {
    /// Every format, in tag order.
    pub const ALL: [SurfaceFormat; SURFACE_FORMAT_COUNT] = [
        Self::Unknown, Self::R8G8B8, Self::B8G8R8, Self::A8R8G8B8, Self::X8R8G8B8,
        Self::X8B8G8R8, Self::A8B8G8R8, Self::R5G6B5, Self::R5G5B5, Self::R6G6B6,
        Self::P4, Self::P8, Self::L8, Self::A1R5G5B5, Self::X4R4G4B4, Self::A4R4G4B4,
        Self::A4B4G4R4, Self::R4G4B4A4, Self::A1B5G5R5, Self::R5G5B5A1, Self::R3G3B2,
        Self::R3G2B3, Self::A8, Self::A8R3G3B2, Self::A8R3G2B3, Self::Dxt1, Self::Dxt3,
        Self::Dxt5, Self::R16F, Self::G16R16F, Self::A16B16G16R16F, Self::R32F,
        Self::G32R32F, Self::A32B32G32R32F, Self::D32, Self::D24, Self::D16, Self::D24S8,
    ];

    /// Resolve a raw tag.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedSurfaceFormat`] for tags past the last format.
    pub fn from_u16(tag: u16) -> Result<Self> {
        Self::ALL
            .get(tag as usize)
            .copied()
            .ok_or(Error::UnsupportedSurfaceFormat { format: tag })
    }

    /// The raw tag value.
    #[must_use]
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Canonical name ("A8R8G8B8", "DXT1", ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        FORMAT_NAMES[self as usize]
    }

    /// Bit depth and channel masks.
    #[must_use]
    pub fn descriptor(self) -> FormatDescriptor {
        describe(self)
    }

    #[must_use]
    pub fn class(self) -> FormatClass {
        match self {
            Self::Unknown => FormatClass::Unknown,
            Self::P4 | Self::P8 => FormatClass::Palettized,
            Self::Dxt1 | Self::Dxt3 | Self::Dxt5 => FormatClass::Compressed,
            Self::R16F
            | Self::G16R16F
            | Self::A16B16G16R16F
            | Self::R32F
            | Self::G32R32F
            | Self::A32B32G32R32F => FormatClass::Float,
            Self::D32 | Self::D24 | Self::D16 | Self::D24S8 => FormatClass::Depth,
            _ => FormatClass::Direct,
        }
    }
}

impl std::fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the descriptor of a format.
#[must_use]
pub fn describe(format: SurfaceFormat) -> FormatDescriptor {
    FORMAT_TABLE[format as usize]
}

/// Look up the descriptor of a raw tag.
///
/// # Errors
/// Returns [`Error::UnsupportedSurfaceFormat`] for unknown tags.
pub fn describe_tag(tag: u16) -> Result<FormatDescriptor> {
    SurfaceFormat::from_u16(tag).map(describe)
}

/// Expand an `bits`-wide channel value to 8 bits over the full range.
///
/// Computes `round(value * 255 / (2^bits - 1))`, so the maximum input always
/// maps to 255 and zero to zero.
#[must_use]
pub fn expand_channel(value: u32, bits: u32) -> u8 {
    if bits == 0 {
        return 0;
    }
    let max = (1u64 << bits) - 1;
    let value = u64::from(value).min(max);
    ((value * 255 + max / 2) / max) as u8
}

/// Pull the channel selected by `mask` out of `pixel` and expand it to 8 bits.
///
/// Returns `None` when the mask is empty (channel absent).
#[must_use]
pub fn extract_channel(pixel: u32, mask: u32) -> Option<u8> {
    if mask == 0 {
        return None;
    }
    let shift = mask.trailing_zeros();
    let bits = mask.count_ones();
    Some(expand_channel((pixel & mask) >> shift, bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_total() {
        for (i, format) in SurfaceFormat::ALL.iter().enumerate() {
            assert_eq!(format.tag() as usize, i);
            assert_eq!(SurfaceFormat::from_u16(i as u16).unwrap(), *format);
        }
        assert!(matches!(
            SurfaceFormat::from_u16(SURFACE_FORMAT_COUNT as u16),
            Err(Error::UnsupportedSurfaceFormat { format: 38 })
        ));
    }

    #[test]
    fn test_names_round_trip_display() {
        assert_eq!(SurfaceFormat::A4R4G4B4.to_string(), "A4R4G4B4");
        assert_eq!(SurfaceFormat::Dxt5.name(), "DXT5");
        assert_eq!(SurfaceFormat::D24S8.name(), "D24S8");
    }

    #[test]
    fn test_sixteen_bit_masks_fit_sixteen_bits() {
        for format in SurfaceFormat::ALL {
            let desc = describe(format);
            if desc.bits_per_pixel <= 16 {
                for mask in [desc.red_mask, desc.green_mask, desc.blue_mask, desc.alpha_mask] {
                    assert!(mask <= 0xFFFF, "{format} mask {mask:#x} too wide");
                }
            }
        }
    }

    #[test]
    fn test_golden_table() {
        #[rustfmt::skip]
        let golden: [(&str, u32, u32, u32, u32, u32); SURFACE_FORMAT_COUNT] = [
            ("UNKNOWN",        0, 0,          0,          0,          0),
            ("R8G8B8",        24, 0x00ff0000, 0x0000ff00, 0x000000ff, 0),
            ("B8G8R8",        24, 0x000000ff, 0x0000ff00, 0x00ff0000, 0),
            ("A8R8G8B8",      32, 0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000),
            ("X8R8G8B8",      32, 0x00ff0000, 0x0000ff00, 0x000000ff, 0),
            ("X8B8G8R8",      32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0),
            ("A8B8G8R8",      32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0xff000000),
            ("R5G6B5",        16, 0xf800,     0x07e0,     0x001f,     0),
            ("R5G5B5",        16, 0x7c00,     0x03e0,     0x001f,     0),
            ("R6G6B6",        32, 0x3f000,    0xfc0,      0x3f,       0),
            ("P4",             4, 0,          0,          0,          0),
            ("P8",             8, 0,          0,          0,          0),
            ("L8",             8, 0xff,       0xff,       0xff,       0),
            ("A1R5G5B5",      16, 0x7c00,     0x03e0,     0x001f,     0x8000),
            ("X4R4G4B4",      16, 0x0f00,     0x00f0,     0x000f,     0),
            ("A4R4G4B4",      16, 0x0f00,     0x00f0,     0x000f,     0xf000),
            ("A4B4G4R4",      16, 0x000f,     0x00f0,     0x0f00,     0xf000),
            ("R4G4B4A4",      16, 0xf000,     0x0f00,     0x00f0,     0x000f),
            ("A1B5G5R5",      16, 0x001f,     0x03e0,     0x7c00,     0x8000),
            ("R5G5B5A1",      16, 0xf800,     0x07c0,     0x003e,     0x0001),
            ("R3G3B2",         8, 0xe0,       0x1c,       0x03,       0),
            ("R3G2B3",         8, 0xe0,       0x18,       0x07,       0),
            ("A8",             8, 0,          0,          0,          0xff),
            ("A8R3G3B2",      16, 0xe0,       0x1c,       0x03,       0xff00),
            ("A8R3G2B3",      16, 0xe0,       0x18,       0x07,       0xff00),
            ("DXT1",           0, 0,          0,          0,          0),
            ("DXT3",           0, 0,          0,          0,          0),
            ("DXT5",           0, 0,          0,          0,          0),
            ("R16F",          16, 0,          0,          0,          0),
            ("G16R16F",       32, 0,          0,          0,          0),
            ("A16B16G16R16F", 64, 0,          0,          0,          0),
            ("R32F",          32, 0,          0,          0,          0),
            ("G32R32F",       64, 0,          0,          0,          0),
            ("A32B32G32R32F", 128, 0,         0,          0,          0),
            ("D32",           32, 0,          0,          0,          0),
            ("D24",           24, 0,          0,          0,          0),
            ("D16",           16, 0,          0,          0,          0),
            ("D24S8",         32, 0,          0,          0,          0),
        ];

        for (tag, (name, bits, red, green, blue, alpha)) in golden.into_iter().enumerate() {
            let format = SurfaceFormat::from_u16(tag as u16).unwrap();
            let desc = describe(format);
            assert_eq!(format.name(), name);
            assert_eq!(
                (desc.bits_per_pixel, desc.red_mask, desc.green_mask, desc.blue_mask, desc.alpha_mask),
                (bits, red, green, blue, alpha),
                "{name}"
            );
        }
    }

    #[test]
    fn test_classes() {
        assert_eq!(SurfaceFormat::R5G6B5.class(), FormatClass::Direct);
        assert_eq!(SurfaceFormat::P8.class(), FormatClass::Palettized);
        assert_eq!(SurfaceFormat::Dxt1.class(), FormatClass::Compressed);
        assert_eq!(SurfaceFormat::G16R16F.class(), FormatClass::Float);
        assert_eq!(SurfaceFormat::D24S8.class(), FormatClass::Depth);
        assert_eq!(SurfaceFormat::Unknown.class(), FormatClass::Unknown);
        assert!(describe(SurfaceFormat::A8).has_masks());
        assert!(!describe(SurfaceFormat::Unknown).has_masks());
    }

    #[test]
    fn test_expand_channel_full_range() {
        assert_eq!(expand_channel(0, 4), 0);
        assert_eq!(expand_channel(0xF, 4), 255);
        assert_eq!(expand_channel(0x8, 4), 136);
        assert_eq!(expand_channel(31, 5), 255);
        assert_eq!(expand_channel(16, 5), 132);
        assert_eq!(expand_channel(63, 6), 255);
        assert_eq!(expand_channel(1, 1), 255);
        assert_eq!(expand_channel(0xAB, 8), 0xAB);
        assert_eq!(expand_channel(5, 0), 0);
    }

    #[test]
    fn test_extract_channel() {
        let pixel = 0xF800; // pure red in R5G6B5
        let desc = describe(SurfaceFormat::R5G6B5);
        assert_eq!(extract_channel(pixel, desc.red_mask), Some(255));
        assert_eq!(extract_channel(pixel, desc.green_mask), Some(0));
        assert_eq!(extract_channel(pixel, desc.alpha_mask), None);
    }
}
