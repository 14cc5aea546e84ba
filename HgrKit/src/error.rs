//! Error types for `HgrKit`

use thiserror::Error;

/// The error type for `HgrKit` operations.
///
/// Every decode error is terminal for the file being decoded: both formats are
/// strictly sequential, so a single misread shifts every later field.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source ran out before a read could complete.
    #[error("unexpected end of file at offset {offset}")]
    UnexpectedEof {
        /// Offset of the read that could not be satisfied.
        offset: u64,
    },

    // ==================== HGR Format Errors ====================
    /// The file is not an HGR scene (missing `hgrf` magic).
    #[error("invalid HGR magic: expected hgrf, found {found:?}")]
    BadMagic {
        /// The four bytes found where the magic was expected.
        found: [u8; 4],
    },

    /// The HGR version is outside the supported range.
    #[error("unsupported HGR version: {version} (supported: 171-193)")]
    UnsupportedVersion {
        /// The version byte found in the header.
        version: u8,
    },

    /// A section checksum marker was out of sequence, meaning the previous
    /// section consumed the wrong number of bytes.
    #[error("checksum desync at offset {offset} ({section}): expected {expected:#010x}, found {found:#010x}")]
    ChecksumDesync {
        /// Offset of the marker.
        offset: u64,
        /// The section the marker closes.
        section: &'static str,
        /// The value the running counter predicted.
        expected: u32,
        /// The value read from the file.
        found: u32,
    },

    /// A vertex component uses a data format this decoder cannot read.
    #[error("unsupported vertex data format '{tag}' at offset {offset}")]
    UnsupportedVertexFormat {
        /// Offset of the format name.
        offset: u64,
        /// The data format name as stored in the file.
        tag: String,
    },

    /// A vertex component names an unknown semantic.
    #[error("unsupported vertex semantic '{tag}' at offset {offset}")]
    UnsupportedVertexSemantic {
        /// Offset of the semantic name.
        offset: u64,
        /// The semantic name as stored in the file.
        tag: String,
    },

    /// An enumerated field holds a value outside its closed set.
    #[error("invalid {field} value {value} at offset {offset}")]
    InvalidEnumValue {
        /// Which field was being decoded.
        field: &'static str,
        /// The raw value.
        value: u32,
        /// Offset of the field.
        offset: u64,
    },

    /// A node's parent chain loops back onto itself.
    #[error("node hierarchy cycle through node {node}")]
    HierarchyCycle {
        /// Arena index of a node on the cycle.
        node: usize,
    },

    /// An index into another collection points past its end.
    #[error("{kind} index {index} out of range (count {len})")]
    InvalidReference {
        /// What kind of collection the index addresses.
        kind: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the addressed collection.
        len: usize,
    },

    // ==================== Surface / NTX Errors ====================
    /// The surface format tag is unknown, or cannot be handled here.
    #[error("unsupported surface format: {format}")]
    UnsupportedSurfaceFormat {
        /// The raw format tag.
        format: u16,
    },

    /// The NTX palette declares more entries than the image has pixels.
    #[error("palette too large: {size} entries for {pixels} pixels")]
    PaletteTooLarge {
        /// Declared palette size.
        size: usize,
        /// Pixel count of the image.
        pixels: usize,
    },

    /// A palette-indexed pixel names an entry past the end of the palette.
    #[error("palette index {index} out of range (palette size {len}) at offset {offset}")]
    PaletteIndexOutOfRange {
        /// Offset of the index byte.
        offset: u64,
        /// The index read.
        index: u8,
        /// Palette length.
        len: usize,
    },

    // ==================== Export Errors ====================
    /// Failed to create an image buffer from decoded pixels.
    #[error("failed to create image buffer")]
    ImageBufferFailed,

    /// Failed to encode a raster image.
    #[error("failed to encode {format} image: {message}")]
    ImageEncodeFailed {
        /// Target format name.
        format: &'static str,
        /// The encoder's message.
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Byte offset at which the error was detected, when one is known.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::UnexpectedEof { offset }
            | Self::ChecksumDesync { offset, .. }
            | Self::UnsupportedVertexFormat { offset, .. }
            | Self::UnsupportedVertexSemantic { offset, .. }
            | Self::InvalidEnumValue { offset, .. }
            | Self::PaletteIndexOutOfRange { offset, .. } => Some(*offset),
            Self::BadMagic { .. } => Some(0),
            // The version byte follows the four magic bytes
            Self::UnsupportedVersion { .. } => Some(4),
            _ => None,
        }
    }

    /// Short, stable name of the error kind, for logs and batch reports.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Io(_) => "Io",
            Self::UnexpectedEof { .. } => "UnexpectedEof",
            Self::BadMagic { .. } => "BadMagic",
            Self::UnsupportedVersion { .. } => "UnsupportedVersion",
            Self::ChecksumDesync { .. } => "ChecksumDesync",
            Self::UnsupportedVertexFormat { .. } => "UnsupportedVertexFormat",
            Self::UnsupportedVertexSemantic { .. } => "UnsupportedVertexSemantic",
            Self::InvalidEnumValue { .. } => "InvalidEnumValue",
            Self::HierarchyCycle { .. } => "HierarchyCycle",
            Self::InvalidReference { .. } => "InvalidReference",
            Self::UnsupportedSurfaceFormat { .. } => "UnsupportedSurfaceFormat",
            Self::PaletteTooLarge { .. } => "PaletteTooLarge",
            Self::PaletteIndexOutOfRange { .. } => "PaletteIndexOutOfRange",
            Self::ImageBufferFailed => "ImageBufferFailed",
            Self::ImageEncodeFailed { .. } => "ImageEncodeFailed",
            Self::JsonError(_) => "JsonError",
        }
    }
}

/// A specialized Result type for `HgrKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
