//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Format conversion utilities
//!
//! - NTX → PNG / JPEG / BMP / TIFF - Texture conversion

mod ntx_image;

/// Progress callback type for conversion operations.
/// The callback receives a message describing the current step.
pub type ProgressCallback<'a> = &'a dyn Fn(&str);

// NTX conversion exports
pub use ntx_image::{
    ImageFileType, convert_ntx, convert_ntx_with_progress, ntx_bytes_to_image_bytes,
    ntx_to_image_bytes, ntx_to_rgba_image,
};
