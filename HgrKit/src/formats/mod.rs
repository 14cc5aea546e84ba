//! File format handlers for KA3D assets
//!
//! `common` holds the byte cursor and half-float decoder shared by both
//! formats; `surface` is the pixel format table NTX textures are read with.

pub mod common;
pub mod hgr;
pub mod ntx;
pub mod surface;

// Re-export common types for convenience
pub use common::half_to_f32;
pub use surface::{FormatClass, FormatDescriptor, SurfaceFormat, describe, describe_tag};

// Re-export main document types
pub use hgr::{DecodeOptions, HgrDocument, decode_hgr, decode_hgr_with_options, parse_hgr_bytes, read_hgr};
pub use ntx::{NtxImage, decode_ntx, parse_ntx_bytes, read_ntx};
