//! HGR and NTX file inspection utilities
//!
//! Summaries of decoded files, printable by the CLI or serialized as JSON.

use crate::error::Result;
use crate::formats::hgr::{
    DecodeOptions, FogType, HgrDocument, PrimitiveType, TextureKind, decode_hgr_with_options,
};
use crate::formats::ntx::{NtxImage, parse_ntx_bytes};
use serde::Serialize;
use std::path::Path;

/// Information about an HGR scene.
#[derive(Debug, Clone, Serialize)]
pub struct HgrInfo {
    pub file_size: u64,
    pub version: u8,
    pub exported_version: String,
    pub data_flags: Vec<&'static str>,
    pub platform: Option<&'static str>,
    pub platform_description: Option<&'static str>,
    pub fog: FogType,
    pub textures: Vec<HgrTextureInfo>,
    pub materials: Vec<HgrMaterialInfo>,
    pub primitives: Vec<HgrPrimitiveInfo>,
    pub nodes: Vec<HgrNodeInfo>,
    pub reserved_offset: u64,
    pub reserved_length: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HgrTextureInfo {
    pub name: String,
    pub kind: TextureKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct HgrMaterialInfo {
    pub name: String,
    pub shader: String,
    /// Texture file names bound through texture params.
    pub textures: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HgrPrimitiveInfo {
    pub material: Option<String>,
    pub primitive_type: PrimitiveType,
    pub vertex_count: u32,
    pub index_count: u32,
    pub triangle_count: usize,
    /// `SEMANTIC:FORMAT` per component.
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HgrNodeInfo {
    pub index: usize,
    pub name: String,
    /// "mesh" or "camera".
    pub kind: &'static str,
    pub parent: Option<usize>,
    pub depth: usize,
}

impl HgrInfo {
    /// Summarize a decoded document.
    #[must_use]
    pub fn from_document(doc: &HgrDocument, file_size: u64) -> Self {
        let textures = doc
            .textures
            .iter()
            .map(|t| HgrTextureInfo {
                name: t.name.clone(),
                kind: t.kind,
            })
            .collect();

        let materials = doc
            .materials
            .iter()
            .map(|m| HgrMaterialInfo {
                name: m.name.clone(),
                shader: m.shader.clone(),
                textures: m
                    .tex_params
                    .iter()
                    .filter_map(|p| doc.textures.get(p.texture_index as usize))
                    .map(|t| t.name.clone())
                    .collect(),
            })
            .collect();

        let primitives = doc
            .primitives
            .iter()
            .enumerate()
            .map(|(i, p)| HgrPrimitiveInfo {
                material: doc.primitive_material(i).map(|m| m.name.clone()),
                primitive_type: p.primitive_type,
                vertex_count: p.vertex_count,
                index_count: p.index_count,
                triangle_count: p.triangle_count(),
                components: p
                    .format
                    .components
                    .iter()
                    .map(|c| format!("{}:{}", c.data_type.name(), c.format.name()))
                    .collect(),
            })
            .collect();

        let hierarchy = doc.hierarchy();
        let nodes = doc
            .nodes()
            .enumerate()
            .map(|(index, node)| HgrNodeInfo {
                index,
                name: node.name.clone(),
                kind: if index < doc.meshes.len() { "mesh" } else { "camera" },
                parent: hierarchy.parent(index),
                depth: hierarchy.depth(index),
            })
            .collect();

        Self {
            file_size,
            version: doc.header.version,
            exported_version: doc.header.exported_version_string(),
            data_flags: doc.header.data_flags.names(),
            platform: doc.header.platform().map(|p| p.name()),
            platform_description: doc.header.platform().map(|p| p.description()),
            fog: doc.scene.fog_type,
            textures,
            materials,
            primitives,
            nodes,
            reserved_offset: doc.reserved.offset,
            reserved_length: doc.reserved.length,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Information about an NTX texture.
#[derive(Debug, Clone, Serialize)]
pub struct NtxInfo {
    pub file_size: u64,
    pub version: u16,
    pub width: u16,
    pub height: u16,
    pub format: &'static str,
    pub format_class: String,
    pub bits_per_pixel: u32,
    pub palette_size: usize,
    pub flags: u16,
    pub user_flags: u16,
    pub trailing_bytes: u64,
}

impl NtxInfo {
    #[must_use]
    pub fn from_image(image: &NtxImage, file_size: u64) -> Self {
        Self {
            file_size,
            version: image.version,
            width: image.width,
            height: image.height,
            format: image.format.name(),
            format_class: format!("{:?}", image.format.class()),
            bits_per_pixel: image.format.descriptor().bits_per_pixel,
            palette_size: image.palette.as_ref().map_or(0, Vec::len),
            flags: image.flags,
            user_flags: image.user_flags,
            trailing_bytes: image.trailing_bytes,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Get information about an HGR file.
///
/// # Errors
/// Returns an error if the file cannot be read or has an invalid format.
pub fn inspect_hgr<P: AsRef<Path>>(source: P) -> Result<HgrInfo> {
    inspect_hgr_with_options(source, &DecodeOptions::default())
}

/// Get information about an HGR file, decoding with `options`.
///
/// # Errors
/// Returns an error if the file cannot be read or has an invalid format.
pub fn inspect_hgr_with_options<P: AsRef<Path>>(source: P, options: &DecodeOptions) -> Result<HgrInfo> {
    let data = std::fs::read(source.as_ref())?;
    let doc = decode_hgr_with_options(&data[..], options)?;
    Ok(HgrInfo::from_document(&doc, data.len() as u64))
}

/// Get information about an NTX file.
///
/// # Errors
/// Returns an error if the file cannot be read or has an invalid format.
pub fn inspect_ntx<P: AsRef<Path>>(source: P) -> Result<NtxInfo> {
    let data = std::fs::read(source.as_ref())?;
    let image = parse_ntx_bytes(&data)?;
    Ok(NtxInfo::from_image(&image, data.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::surface::SurfaceFormat;

    #[test]
    fn test_ntx_info_json() {
        let image = NtxImage {
            version: 3,
            width: 4,
            height: 2,
            format: SurfaceFormat::R5G6B5,
            flags: 0,
            user_flags: 7,
            palette: None,
            pixels: vec![0; 8],
            trailing_bytes: 0,
        };
        let info = NtxInfo::from_image(&image, 30);
        assert_eq!(info.format, "R5G6B5");
        assert_eq!(info.format_class, "Direct");
        assert_eq!(info.bits_per_pixel, 16);

        let json: serde_json::Value = serde_json::from_str(&info.to_json().unwrap()).unwrap();
        assert_eq!(json["width"], 4);
        assert_eq!(json["user_flags"], 7);
    }
}
