//! Vertex layouts and quantized vertex arrays

use crate::error::{Error, Result};
use crate::formats::common::{ByteReader, bounded_capacity};
use glam::Vec4;
use std::io::Read;

/// What a vertex component means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Model space position.
    Position,
    /// Screen space position.
    PositionT,
    BoneWeights,
    BoneIndices,
    Normal,
    Diffuse,
    Specular,
    Tex0,
    Tex1,
    Tex2,
    Tex3,
    Tangent,
}

impl DataType {
    /// Match a stored name, with or without the `DT_` prefix.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("DT_").unwrap_or(name);
        Some(match name {
            "POSITION" => Self::Position,
            "POSITIONT" => Self::PositionT,
            "BONEWEIGHTS" => Self::BoneWeights,
            "BONEINDICES" => Self::BoneIndices,
            "NORMAL" => Self::Normal,
            "DIFFUSE" => Self::Diffuse,
            "SPECULAR" => Self::Specular,
            "TEX0" => Self::Tex0,
            "TEX1" => Self::Tex1,
            "TEX2" => Self::Tex2,
            "TEX3" => Self::Tex3,
            "TANGENT" => Self::Tangent,
            _ => return None,
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::PositionT => "POSITIONT",
            Self::BoneWeights => "BONEWEIGHTS",
            Self::BoneIndices => "BONEINDICES",
            Self::Normal => "NORMAL",
            Self::Diffuse => "DIFFUSE",
            Self::Specular => "SPECULAR",
            Self::Tex0 => "TEX0",
            Self::Tex1 => "TEX1",
            Self::Tex2 => "TEX2",
            Self::Tex3 => "TEX3",
            Self::Tangent => "TANGENT",
        }
    }

    /// Texture layer for `TEX0`..`TEX3`.
    #[must_use]
    pub fn texture_layer(self) -> Option<usize> {
        match self {
            Self::Tex0 => Some(0),
            Self::Tex1 => Some(1),
            Self::Tex2 => Some(2),
            Self::Tex3 => Some(3),
            _ => None,
        }
    }
}

/// Storage format of a vertex component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    None,
    S32,
    S16,
    S8,
    V2_32,
    V2_16,
    V2_8,
    V3_32,
    V3_16,
    V3_8,
    V4_32,
    V4_16,
    V4_8,
    /// 4 channels packed into 16 bits.
    V4_5,
}

impl DataFormat {
    /// Match a stored name, with or without the `DF_` prefix.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("DF_").unwrap_or(name);
        Some(match name {
            "NONE" => Self::None,
            "S_32" => Self::S32,
            "S_16" => Self::S16,
            "S_8" => Self::S8,
            "V2_32" => Self::V2_32,
            "V2_16" => Self::V2_16,
            "V2_8" => Self::V2_8,
            "V3_32" => Self::V3_32,
            "V3_16" => Self::V3_16,
            "V3_8" => Self::V3_8,
            "V4_32" => Self::V4_32,
            "V4_16" => Self::V4_16,
            "V4_8" => Self::V4_8,
            "V4_5" => Self::V4_5,
            _ => return None,
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::S32 => "S_32",
            Self::S16 => "S_16",
            Self::S8 => "S_8",
            Self::V2_32 => "V2_32",
            Self::V2_16 => "V2_16",
            Self::V2_8 => "V2_8",
            Self::V3_32 => "V3_32",
            Self::V3_16 => "V3_16",
            Self::V3_8 => "V3_8",
            Self::V4_32 => "V4_32",
            Self::V4_16 => "V4_16",
            Self::V4_8 => "V4_8",
            Self::V4_5 => "V4_5",
        }
    }

    /// Number of scalars per vertex.
    #[must_use]
    pub fn dimension(self) -> usize {
        match self {
            Self::None => 0,
            Self::S32 | Self::S16 | Self::S8 => 1,
            Self::V2_32 | Self::V2_16 | Self::V2_8 => 2,
            Self::V3_32 | Self::V3_16 | Self::V3_8 => 3,
            Self::V4_32 | Self::V4_16 | Self::V4_8 | Self::V4_5 => 4,
        }
    }

    /// Bytes per vertex.
    #[must_use]
    pub fn byte_size(self) -> usize {
        match self {
            Self::None => 0,
            Self::S8 => 1,
            Self::S16 | Self::V2_8 | Self::V4_5 => 2,
            Self::V3_8 => 3,
            Self::S32 | Self::V2_16 | Self::V4_8 => 4,
            Self::V3_16 => 6,
            Self::V2_32 | Self::V4_16 => 8,
            Self::V3_32 => 12,
            Self::V4_32 => 16,
        }
    }

    /// Whether arrays of this format can be decoded. Only the 16-bit
    /// quantized formats have a known on-disk layout.
    #[must_use]
    pub fn is_decodable(self) -> bool {
        matches!(self, Self::S16 | Self::V2_16 | Self::V3_16 | Self::V4_16)
    }
}

/// One component of a vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexComponent {
    pub data_type: DataType,
    pub format: DataFormat,
}

/// Ordered list of vertex components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexFormat {
    pub components: Vec<VertexComponent>,
}

impl VertexFormat {
    #[must_use]
    pub fn has(&self, data_type: DataType) -> bool {
        self.components.iter().any(|c| c.data_type == data_type)
    }

    /// Position of the component with `data_type`, if present.
    #[must_use]
    pub fn index_of(&self, data_type: DataType) -> Option<usize> {
        self.components.iter().position(|c| c.data_type == data_type)
    }

    /// Bytes per vertex across all components.
    #[must_use]
    pub fn vertex_size(&self) -> usize {
        self.components.iter().map(|c| c.format.byte_size()).sum()
    }

    pub(crate) fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let count = reader.read_u8()?;
        let mut components = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let type_offset = reader.position();
            let type_name = reader.read_prefixed_string()?;
            let format_offset = reader.position();
            let format_name = reader.read_prefixed_string()?;

            let data_type = DataType::from_name(&type_name).ok_or(Error::UnsupportedVertexSemantic {
                offset: type_offset,
                tag: type_name,
            })?;
            let format = DataFormat::from_name(&format_name)
                .filter(|f| f.is_decodable())
                .ok_or(Error::UnsupportedVertexFormat {
                    offset: format_offset,
                    tag: format_name,
                })?;
            components.push(VertexComponent { data_type, format });
        }
        Ok(Self { components })
    }
}

/// Quantized values for one vertex component.
///
/// The stored integer `q` on axis `i` stands for `q * scale + bias[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexArray {
    pub scale: f32,
    /// Per-axis offset; the 4th entry is 0 unless the format has 4 axes.
    pub bias: [f32; 4],
    pub dimension: usize,
    pub data: Vec<i16>,
}

impl VertexArray {
    pub(crate) fn decode<R: Read>(
        reader: &mut ByteReader<R>,
        format: DataFormat,
        vertex_count: usize,
    ) -> Result<Self> {
        let dimension = format.dimension();
        let scale = reader.read_f32_be()?;
        let mut bias = [0.0f32; 4];
        for b in bias.iter_mut().take(3) {
            *b = reader.read_f32_be()?;
        }
        if dimension == 4 {
            bias[3] = reader.read_f32_be()?;
        }

        let total = vertex_count.saturating_mul(dimension);
        let mut data = Vec::with_capacity(bounded_capacity(total));
        for _ in 0..total {
            data.push(reader.read_i16_be()?);
        }

        Ok(Self {
            scale,
            bias,
            dimension,
            data,
        })
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    /// Dequantized value of one axis of one vertex.
    #[must_use]
    pub fn value(&self, vertex: usize, axis: usize) -> Option<f32> {
        if axis >= self.dimension {
            return None;
        }
        let q = *self.data.get(vertex * self.dimension + axis)?;
        Some(f32::from(q) * self.scale + self.bias[axis])
    }

    /// Dequantized vertex, unused axes left at 0.
    #[must_use]
    pub fn vertex(&self, vertex: usize) -> Option<Vec4> {
        if vertex >= self.vertex_count() {
            return None;
        }
        let mut out = [0.0f32; 4];
        for (axis, slot) in out.iter_mut().enumerate().take(self.dimension) {
            *slot = self.value(vertex, axis)?;
        }
        Some(Vec4::from_array(out))
    }

    /// All values dequantized, flat in vertex-major order.
    #[must_use]
    pub fn dequantize(&self) -> Vec<f32> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &q)| f32::from(q) * self.scale + self.bias[i % self.dimension.max(1)])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixed(s: &str) -> Vec<u8> {
        let mut out = (s.len() as u16).to_be_bytes().to_vec();
        out.extend_from_slice(s.as_bytes());
        out
    }

    #[test]
    fn test_names_with_and_without_prefix() {
        assert_eq!(DataType::from_name("DT_POSITION"), Some(DataType::Position));
        assert_eq!(DataType::from_name("TEX2"), Some(DataType::Tex2));
        assert_eq!(DataType::from_name("DT_SIZE"), None);
        assert_eq!(DataFormat::from_name("DF_V3_16"), Some(DataFormat::V3_16));
        assert_eq!(DataFormat::from_name("V4_5"), Some(DataFormat::V4_5));
        assert_eq!(DataFormat::from_name("DF_SIZE"), None);
        assert_eq!(DataType::Tex3.texture_layer(), Some(3));
        assert_eq!(DataType::Normal.texture_layer(), None);
    }

    #[test]
    fn test_format_sizes() {
        assert_eq!(DataFormat::V3_16.dimension(), 3);
        assert_eq!(DataFormat::V3_16.byte_size(), 6);
        assert_eq!(DataFormat::V4_5.byte_size(), 2);
        assert_eq!(DataFormat::None.dimension(), 0);
        assert!(DataFormat::S16.is_decodable());
        assert!(!DataFormat::V3_32.is_decodable());
    }

    #[test]
    fn test_decode_vertex_format() {
        let mut data = vec![2u8];
        data.extend(prefixed("DT_POSITION"));
        data.extend(prefixed("DF_V3_16"));
        data.extend(prefixed("TEX0"));
        data.extend(prefixed("V2_16"));
        let mut reader = ByteReader::new(&data[..]);
        let format = VertexFormat::decode(&mut reader).unwrap();
        assert_eq!(format.components.len(), 2);
        assert_eq!(format.index_of(DataType::Tex0), Some(1));
        assert!(format.has(DataType::Position));
        assert!(!format.has(DataType::Normal));
        assert_eq!(format.vertex_size(), 10);
    }

    #[test]
    fn test_undecodable_format_is_rejected_at_name() {
        let mut data = vec![1u8];
        data.extend(prefixed("DT_NORMAL"));
        data.extend(prefixed("DF_V3_8"));
        let mut reader = ByteReader::new(&data[..]);
        match VertexFormat::decode(&mut reader) {
            Err(Error::UnsupportedVertexFormat { offset, tag }) => {
                assert_eq!(offset, 12);
                assert_eq!(tag, "DF_V3_8");
            }
            other => panic!("expected UnsupportedVertexFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_format_name_is_rejected_at_name() {
        let mut data = vec![2u8];
        data.extend(prefixed("DT_POSITION"));
        data.extend(prefixed("DF_V3_16"));
        data.extend(prefixed("DT_NORMAL"));
        data.extend(prefixed("DF_SIZE"));
        let mut reader = ByteReader::new(&data[..]);
        match VertexFormat::decode(&mut reader) {
            Err(Error::UnsupportedVertexFormat { offset, tag }) => {
                assert_eq!(offset, 35);
                assert_eq!(tag, "DF_SIZE");
            }
            other => panic!("expected UnsupportedVertexFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_semantic() {
        let mut data = vec![1u8];
        data.extend(prefixed("DT_WHATEVER"));
        data.extend(prefixed("DF_V3_16"));
        let mut reader = ByteReader::new(&data[..]);
        assert!(matches!(
            VertexFormat::decode(&mut reader),
            Err(Error::UnsupportedVertexSemantic { offset: 1, .. })
        ));
    }

    #[test]
    fn test_vertex_array_dequantize() {
        let mut data = Vec::new();
        for v in [0.5f32, 1.0, 2.0, 3.0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        for q in [2i16, -2, 4, 0, 0, 0] {
            data.extend_from_slice(&q.to_be_bytes());
        }
        let mut reader = ByteReader::new(&data[..]);
        let array = VertexArray::decode(&mut reader, DataFormat::V3_16, 2).unwrap();
        assert_eq!(reader.position(), 28);
        assert_eq!(array.vertex_count(), 2);
        assert_eq!(array.bias[3], 0.0);
        assert_eq!(array.dequantize(), vec![2.0, 1.0, 5.0, 1.0, 2.0, 3.0]);
        assert_eq!(array.vertex(0), Some(Vec4::new(2.0, 1.0, 5.0, 0.0)));
        assert_eq!(array.value(1, 3), None);
        assert_eq!(array.vertex(2), None);
    }

    #[test]
    fn test_vertex_array_four_axes_reads_fourth_bias() {
        let mut data = Vec::new();
        for v in [1.0f32, 0.0, 0.0, 0.0, 7.0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        for q in [1i16, 2, 3, 4] {
            data.extend_from_slice(&q.to_be_bytes());
        }
        let mut reader = ByteReader::new(&data[..]);
        let array = VertexArray::decode(&mut reader, DataFormat::V4_16, 1).unwrap();
        assert_eq!(array.bias[3], 7.0);
        assert_eq!(array.vertex(0), Some(Vec4::new(1.0, 2.0, 3.0, 11.0)));
    }
}
