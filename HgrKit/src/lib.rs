//! # HgrKit
//!
//! A pure-Rust library for reading KA3D engine assets.
//!
//! ## Supported Formats
//!
//! - **HGR** - Scenes: textures, materials, primitives, meshes, cameras
//! - **NTX** - Textures in direct-colour, paletted, float and depth formats
//! - **NTX → PNG/JPEG/BMP/TIFF** - Texture conversion
//!
//! ## Quick Start
//!
//! ### Reading a Scene
//!
//! ```no_run
//! use hgrkit::formats::hgr::read_hgr;
//!
//! let scene = read_hgr("level1.hgr")?;
//! for root in scene.hierarchy().roots() {
//!     println!("root node: {}", scene.node(*root).map_or("?", |n| n.name.as_str()));
//! }
//! # Ok::<(), hgrkit::Error>(())
//! ```
//!
//! ### Converting a Texture
//!
//! ```no_run
//! use hgrkit::converter::{convert_ntx, ImageFileType};
//!
//! convert_ntx("stone.ntx", "stone.png", ImageFileType::Png)?;
//! # Ok::<(), hgrkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `hgrkit` command-line binary

#![allow(non_snake_case)]

pub mod batch;
pub mod converter;
pub mod error;
pub mod formats;
pub mod inspect;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::hgr::{
        DecodeOptions, HgrDocument, Node, NodeHierarchy, decode_hgr, decode_hgr_with_options,
        parse_hgr_bytes, read_hgr,
    };
    pub use crate::formats::ntx::{NtxImage, decode_ntx, parse_ntx_bytes, read_ntx};
    pub use crate::formats::surface::{FormatDescriptor, SurfaceFormat, describe};

    pub use crate::converter::{ImageFileType, convert_ntx};
    pub use crate::inspect::{HgrInfo, NtxInfo, inspect_hgr, inspect_ntx};
    pub use crate::batch::{BatchResult, batch_convert_ntx, batch_decode_hgr, find_files};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
