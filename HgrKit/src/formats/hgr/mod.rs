//! HGR (KA3D scene) format module
//!
//! Big-endian container holding textures, materials, primitives, meshes and
//! cameras. Lights, dummies, shapes, animations and user properties follow
//! the camera section and are reported as a reserved tail without decoding.

mod document;
mod header;
mod hierarchy;
mod options;
mod reader;
mod sections;
mod vertex;

// Public API
pub use document::{
    Camera, Float3x4, FloatParam, HgrDocument, Material, Mesh, MeshBone, Node, Primitive,
    PrimitiveType, ReservedSections, TexParam, Texture, TextureKind, Vec4Param,
};
pub use header::{DataFlags, FogType, HeaderLayout, HgrHeader, Platform, SceneParams};
pub use hierarchy::NodeHierarchy;
pub use options::DecodeOptions;
pub use reader::{decode_hgr, decode_hgr_with_options, parse_hgr_bytes, read_hgr};
pub use vertex::{DataFormat, DataType, VertexArray, VertexComponent, VertexFormat};

/// File signature.
pub const HGR_MAGIC: &[u8; 4] = b"hgrf";

/// Oldest supported version (exclusive bound 170).
pub const MIN_VERSION: u8 = 171;

/// Newest supported version.
pub const MAX_VERSION: u8 = 193;

/// Exporter version assumed for files that do not store one (2.9.3).
pub const DEFAULT_EXPORTED_VERSION: u32 = 0x0002_0903;
