//! Per-section HGR decoders
//!
//! Each decoder consumes exactly one section from the cursor. Sections are
//! prefixed with a big-endian u32 element count.
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::document::{
    Camera, Float3x4, FloatParam, Material, Mesh, MeshBone, Node, Primitive, PrimitiveType,
    TexParam, Texture, TextureKind, Vec4Param,
};
use super::vertex::{VertexArray, VertexFormat};
use crate::error::{Error, Result};
use crate::formats::common::{ByteReader, bounded_capacity};
use std::io::Read;

fn read_count<R: Read>(reader: &mut ByteReader<R>) -> Result<usize> {
    Ok(reader.read_u32_be()? as usize)
}

fn read_list<R: Read, T>(
    reader: &mut ByteReader<R>,
    count: usize,
    mut read_one: impl FnMut(&mut ByteReader<R>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::with_capacity(bounded_capacity(count));
    for _ in 0..count {
        items.push(read_one(reader)?);
    }
    Ok(items)
}

fn read_transform<R: Read>(reader: &mut ByteReader<R>) -> Result<Float3x4> {
    Ok(Float3x4::from_row_major(reader.read_f32_array_be::<12>()?))
}

pub(crate) fn decode_textures<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<Texture>> {
    let start = reader.position();
    let count = read_count(reader)?;
    let textures = read_list(reader, count, |r| {
        let name = r.read_prefixed_string()?;
        let kind_offset = r.position();
        let kind = match r.read_u32_be()? {
            0 => TextureKind::Texture,
            1 => TextureKind::Cubemap,
            value => {
                return Err(Error::InvalidEnumValue {
                    field: "texture kind",
                    value,
                    offset: kind_offset,
                });
            }
        };
        tracing::trace!("texture '{}' ({:?})", name, kind);
        Ok(Texture { name, kind })
    })?;
    tracing::debug!("Decoded {} textures at offset {}", textures.len(), start);
    Ok(textures)
}

fn decode_material<R: Read>(reader: &mut ByteReader<R>) -> Result<Material> {
    let name = reader.read_prefixed_string()?;
    let shader = reader.read_prefixed_string()?;
    let lightmap = reader.read_i32_be()?;

    let count = reader.read_u8()? as usize;
    let tex_params = read_list(reader, count, |r| {
        Ok(TexParam {
            name: r.read_prefixed_string()?,
            texture_index: r.read_u16_be()?,
        })
    })?;

    let count = reader.read_u8()? as usize;
    let vec4_params = read_list(reader, count, |r| {
        Ok(Vec4Param {
            name: r.read_prefixed_string()?,
            value: r.read_f32_array_be::<4>()?,
        })
    })?;

    let count = reader.read_u8()? as usize;
    let float_params = read_list(reader, count, |r| {
        Ok(FloatParam {
            name: r.read_prefixed_string()?,
            value: r.read_f32_be()?,
        })
    })?;

    tracing::trace!(
        "material '{}' shader '{}': {} tex, {} vec4, {} float params",
        name,
        shader,
        tex_params.len(),
        vec4_params.len(),
        float_params.len()
    );

    Ok(Material {
        name,
        shader,
        lightmap,
        tex_params,
        vec4_params,
        float_params,
    })
}

pub(crate) fn decode_materials<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<Material>> {
    let start = reader.position();
    let count = read_count(reader)?;
    let materials = read_list(reader, count, decode_material)?;
    tracing::debug!("Decoded {} materials at offset {}", materials.len(), start);
    Ok(materials)
}

fn decode_primitive<R: Read>(reader: &mut ByteReader<R>) -> Result<Primitive> {
    let vertex_count = reader.read_u32_be()?;
    let index_count = reader.read_u32_be()?;
    let format = VertexFormat::decode(reader)?;
    let material_index = reader.read_u16_be()?;

    let type_offset = reader.position();
    let raw_type = reader.read_u16_be()?;
    let primitive_type = PrimitiveType::from_u16(raw_type).ok_or(Error::InvalidEnumValue {
        field: "primitive type",
        value: u32::from(raw_type),
        offset: type_offset,
    })?;

    let arrays = format
        .components
        .iter()
        .map(|c| VertexArray::decode(reader, c.format, vertex_count as usize))
        .collect::<Result<Vec<_>>>()?;

    let indices = read_list(reader, index_count as usize, ByteReader::read_u16_be)?;

    let bone_count = reader.read_u8()? as usize;
    let used_bones = reader.read_bytes(bone_count)?;

    tracing::trace!(
        "primitive {:?}: {} vertices, {} indices, {} components",
        primitive_type,
        vertex_count,
        index_count,
        format.components.len()
    );

    Ok(Primitive {
        vertex_count,
        index_count,
        format,
        material_index,
        primitive_type,
        arrays,
        indices,
        used_bones,
    })
}

pub(crate) fn decode_primitives<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<Primitive>> {
    let start = reader.position();
    let count = read_count(reader)?;
    let primitives = read_list(reader, count, decode_primitive)?;
    tracing::debug!("Decoded {} primitives at offset {}", primitives.len(), start);
    Ok(primitives)
}

pub(crate) fn decode_node<R: Read>(reader: &mut ByteReader<R>) -> Result<Node> {
    Ok(Node {
        name: reader.read_prefixed_string()?,
        transform: read_transform(reader)?,
        flags: reader.read_u32_be()?,
        id: reader.read_u32_be()?,
        parent_index: reader.read_i32_be()?,
    })
}

fn decode_mesh<R: Read>(reader: &mut ByteReader<R>) -> Result<Mesh> {
    let node = decode_node(reader)?;

    let count = read_count(reader)?;
    let primitives = read_list(reader, count, ByteReader::read_u32_be)?;

    let count = read_count(reader)?;
    let bones = read_list(reader, count, |r| {
        Ok(MeshBone {
            node_index: r.read_u32_be()?,
            inverse_bind: read_transform(r)?,
        })
    })?;

    tracing::trace!(
        "mesh '{}': {} primitives, {} bones",
        node.name,
        primitives.len(),
        bones.len()
    );

    Ok(Mesh {
        node,
        primitives,
        bones,
    })
}

pub(crate) fn decode_meshes<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<Mesh>> {
    let start = reader.position();
    let count = read_count(reader)?;
    let meshes = read_list(reader, count, decode_mesh)?;
    tracing::debug!("Decoded {} meshes at offset {}", meshes.len(), start);
    Ok(meshes)
}

pub(crate) fn decode_cameras<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<Camera>> {
    let start = reader.position();
    let count = read_count(reader)?;
    let cameras = read_list(reader, count, |r| {
        let node = decode_node(r)?;
        let front = r.read_f32_be()?;
        let back = r.read_f32_be()?;
        let horizontal_fov = r.read_f32_be()?;
        tracing::trace!("camera '{}': near {} far {} fov {}", node.name, front, back, horizontal_fov);
        Ok(Camera {
            node,
            front,
            back,
            horizontal_fov,
        })
    })?;
    tracing::debug!("Decoded {} cameras at offset {}", cameras.len(), start);
    Ok(cameras)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prefixed(out: &mut Vec<u8>, s: &str) {
        out.extend_from_slice(&(s.len() as u16).to_be_bytes());
        out.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn test_decode_textures() {
        let mut data = 2u32.to_be_bytes().to_vec();
        prefixed(&mut data, "stone.ntx");
        data.extend_from_slice(&0u32.to_be_bytes());
        prefixed(&mut data, "sky.ntx");
        data.extend_from_slice(&1u32.to_be_bytes());

        let mut reader = ByteReader::new(&data[..]);
        let textures = decode_textures(&mut reader).unwrap();
        assert_eq!(
            textures,
            vec![
                Texture { name: "stone.ntx".into(), kind: TextureKind::Texture },
                Texture { name: "sky.ntx".into(), kind: TextureKind::Cubemap },
            ]
        );
        assert_eq!(reader.position(), data.len() as u64);
    }

    #[test]
    fn test_invalid_texture_kind() {
        let mut data = 1u32.to_be_bytes().to_vec();
        prefixed(&mut data, "a");
        data.extend_from_slice(&9u32.to_be_bytes());
        let mut reader = ByteReader::new(&data[..]);
        assert!(matches!(
            decode_textures(&mut reader),
            Err(Error::InvalidEnumValue { field: "texture kind", value: 9, offset: 7 })
        ));
    }

    #[test]
    fn test_decode_material_params() {
        let mut data = 1u32.to_be_bytes().to_vec();
        prefixed(&mut data, "rock");
        prefixed(&mut data, "diffuse");
        data.extend_from_slice(&(-1i32).to_be_bytes());
        data.push(1);
        prefixed(&mut data, "BASEMAP");
        data.extend_from_slice(&3u16.to_be_bytes());
        data.push(1);
        prefixed(&mut data, "DIFFUSEC");
        for v in [1.0f32, 0.5, 0.25, 1.0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.push(0);

        let mut reader = ByteReader::new(&data[..]);
        let materials = decode_materials(&mut reader).unwrap();
        let material = &materials[0];
        assert_eq!(material.shader, "diffuse");
        assert_eq!(material.lightmap, -1);
        assert_eq!(material.texture_param("BASEMAP"), Some(3));
        assert_eq!(material.vec4_param("DIFFUSEC"), Some([1.0, 0.5, 0.25, 1.0]));
        assert!(material.float_params.is_empty());
    }

    #[test]
    fn test_decode_camera_node() {
        let mut data = 1u32.to_be_bytes().to_vec();
        prefixed(&mut data, "cam");
        for v in [1.0f32, 0.0, 0.0, 2.0, 0.0, 1.0, 0.0, 3.0, 0.0, 0.0, 1.0, 4.0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&8u32.to_be_bytes());
        data.extend_from_slice(&77u32.to_be_bytes());
        data.extend_from_slice(&(-1i32).to_be_bytes());
        for v in [0.5f32, 500.0, 1.2] {
            data.extend_from_slice(&v.to_be_bytes());
        }

        let mut reader = ByteReader::new(&data[..]);
        let cameras = decode_cameras(&mut reader).unwrap();
        let camera = &cameras[0];
        assert_eq!(camera.node.name, "cam");
        assert_eq!(camera.node.flags, 8);
        assert_eq!(camera.node.id, 77);
        assert_eq!(camera.node.parent_index, -1);
        assert_eq!(camera.node.transform.translation(), glam::Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(camera.back, 500.0);
        assert_eq!(reader.position(), data.len() as u64);
    }

    #[test]
    fn test_invalid_primitive_type() {
        let mut data = 1u32.to_be_bytes().to_vec();
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.push(0);
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&8u16.to_be_bytes());
        let mut reader = ByteReader::new(&data[..]);
        assert!(matches!(
            decode_primitives(&mut reader),
            Err(Error::InvalidEnumValue { field: "primitive type", value: 8, offset: 15 })
        ));
    }
}
