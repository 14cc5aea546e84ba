//! HGR document structure definitions

use super::header::{HgrHeader, SceneParams};
use super::hierarchy::NodeHierarchy;
use super::vertex::{VertexArray, VertexFormat};
use glam::{Mat4, Vec3, Vec4};

/// Row-major 3x4 affine transform; column 3 holds the translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Float3x4 {
    pub rows: [[f32; 4]; 3],
}

impl Float3x4 {
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    /// Build from 12 floats in file order (row a, row b, row c).
    #[must_use]
    pub fn from_row_major(values: [f32; 12]) -> Self {
        let mut rows = [[0.0f32; 4]; 3];
        for (i, v) in values.into_iter().enumerate() {
            rows[i / 4][i % 4] = v;
        }
        Self { rows }
    }

    /// Expand to a column-major `Mat4` with an implicit `(0, 0, 0, 1)` bottom row.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        let [a, b, c] = self.rows;
        Mat4::from_cols(
            Vec4::new(a[0], b[0], c[0], 0.0),
            Vec4::new(a[1], b[1], c[1], 0.0),
            Vec4::new(a[2], b[2], c[2], 0.0),
            Vec4::new(a[3], b[3], c[3], 1.0),
        )
    }

    #[must_use]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.rows[0][3], self.rows[1][3], self.rows[2][3])
    }
}

impl Default for Float3x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Named, transformable scene object shared by meshes and cameras.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    /// Transform relative to the parent node.
    pub transform: Float3x4,
    pub flags: u32,
    /// Exporter-assigned identifier. Not interpreted.
    pub id: u32,
    /// Raw parent index into the node arena; see [`NodeHierarchy`].
    pub parent_index: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureKind {
    Texture,
    Cubemap,
}

/// Texture reference by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub kind: TextureKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexParam {
    pub name: String,
    /// Index into [`HgrDocument::textures`].
    pub texture_index: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vec4Param {
    pub name: String,
    pub value: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatParam {
    pub name: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub shader: String,
    pub lightmap: i32,
    pub tex_params: Vec<TexParam>,
    pub vec4_params: Vec<Vec4Param>,
    pub float_params: Vec<FloatParam>,
}

impl Material {
    /// Texture index bound to the parameter named `name`.
    #[must_use]
    pub fn texture_param(&self, name: &str) -> Option<u16> {
        self.tex_params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.texture_index)
    }

    #[must_use]
    pub fn vec4_param(&self, name: &str) -> Option<[f32; 4]> {
        self.vec4_params.iter().find(|p| p.name == name).map(|p| p.value)
    }

    #[must_use]
    pub fn float_param(&self, name: &str) -> Option<f32> {
        self.float_params.iter().find(|p| p.name == name).map(|p| p.value)
    }
}

/// Primitive topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Point,
    Line,
    LineStrip,
    Triangle,
    TriangleStrip,
    TriangleFan,
    Sprite,
    Invalid,
}

impl PrimitiveType {
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        Some(match value {
            0 => Self::Point,
            1 => Self::Line,
            2 => Self::LineStrip,
            3 => Self::Triangle,
            4 => Self::TriangleStrip,
            5 => Self::TriangleFan,
            6 => Self::Sprite,
            7 => Self::Invalid,
            _ => return None,
        })
    }
}

/// Renderable batch: vertex arrays, index buffer and material binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub vertex_count: u32,
    pub index_count: u32,
    pub format: VertexFormat,
    /// Index into [`HgrDocument::materials`].
    pub material_index: u16,
    pub primitive_type: PrimitiveType,
    /// One array per component of `format`, same order.
    pub arrays: Vec<VertexArray>,
    pub indices: Vec<u16>,
    /// Mesh bone slots this primitive's bone indices refer to.
    pub used_bones: Vec<u8>,
}

impl Primitive {
    /// Vertex array for a semantic, if the layout has one.
    #[must_use]
    pub fn array(&self, data_type: super::vertex::DataType) -> Option<&VertexArray> {
        self.format
            .index_of(data_type)
            .and_then(|i| self.arrays.get(i))
    }

    /// Number of vertices actually stored in the vertex arrays.
    ///
    /// Bounded by the decoded data, unlike the declared `vertex_count`, which
    /// nothing checks when the layout has no components.
    #[must_use]
    pub fn stored_vertex_count(&self) -> u32 {
        let stored = self.arrays.first().map_or(0, VertexArray::vertex_count);
        self.vertex_count.min(stored as u32)
    }

    /// Flat triangle list for triangle, strip and fan topologies.
    ///
    /// Non-indexed primitives use `0..stored_vertex_count()`. Degenerate strip
    /// triangles are dropped. Other topologies yield an empty list.
    #[must_use]
    pub fn triangle_list(&self) -> Vec<u32> {
        let source: Vec<u32> = if self.indices.is_empty() {
            (0..self.stored_vertex_count()).collect()
        } else {
            self.indices.iter().map(|&i| u32::from(i)).collect()
        };

        match self.primitive_type {
            PrimitiveType::Triangle => {
                let whole = source.len() - source.len() % 3;
                source[..whole].to_vec()
            }
            PrimitiveType::TriangleStrip => {
                let mut out = Vec::with_capacity(source.len().saturating_sub(2) * 3);
                for (i, w) in source.windows(3).enumerate() {
                    if w[0] == w[1] || w[1] == w[2] || w[0] == w[2] {
                        continue;
                    }
                    if i % 2 == 0 {
                        out.extend_from_slice(&[w[0], w[1], w[2]]);
                    } else {
                        out.extend_from_slice(&[w[1], w[0], w[2]]);
                    }
                }
                out
            }
            PrimitiveType::TriangleFan => {
                let Some((&hub, rest)) = source.split_first() else {
                    return Vec::new();
                };
                rest.windows(2).flat_map(|w| [hub, w[0], w[1]]).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Triangle count of [`Primitive::triangle_list`], without building it
    /// unless an indexed strip needs its degenerates counted.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        let n = if self.indices.is_empty() {
            self.stored_vertex_count() as usize
        } else {
            self.indices.len()
        };
        match self.primitive_type {
            PrimitiveType::Triangle => n / 3,
            PrimitiveType::TriangleStrip if !self.indices.is_empty() => self.triangle_list().len() / 3,
            PrimitiveType::TriangleStrip | PrimitiveType::TriangleFan => n.saturating_sub(2),
            _ => 0,
        }
    }
}

/// Skin bone binding of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBone {
    /// Arena index of the bone's node.
    pub node_index: u32,
    /// Inverse bind pose.
    pub inverse_bind: Float3x4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub node: Node,
    /// Indices into [`HgrDocument::primitives`].
    pub primitives: Vec<u32>,
    pub bones: Vec<MeshBone>,
}

impl Mesh {
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        !self.bones.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub node: Node,
    /// Near clip distance.
    pub front: f32,
    /// Far clip distance.
    pub back: f32,
    /// Horizontal field of view in radians.
    pub horizontal_fov: f32,
}

/// Position and size of the sections after the last checksum, which are not
/// decoded (lights, dummies, shapes, other nodes, animations, user properties).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReservedSections {
    pub offset: u64,
    pub length: u64,
}

/// A decoded HGR scene.
#[derive(Debug, Clone, PartialEq)]
pub struct HgrDocument {
    pub header: HgrHeader,
    pub scene: SceneParams,
    /// First checksum value; later markers count up from it.
    pub checksum_seed: u32,
    pub textures: Vec<Texture>,
    pub materials: Vec<Material>,
    pub primitives: Vec<Primitive>,
    pub meshes: Vec<Mesh>,
    pub cameras: Vec<Camera>,
    pub reserved: ReservedSections,
    pub(crate) hierarchy: NodeHierarchy,
}

impl HgrDocument {
    /// Number of nodes in the arena (meshes, then cameras).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.meshes.len() + self.cameras.len()
    }

    /// Node at arena index `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        match index.checked_sub(self.meshes.len()) {
            None => self.meshes.get(index).map(|m| &m.node),
            Some(camera) => self.cameras.get(camera).map(|c| &c.node),
        }
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.meshes
            .iter()
            .map(|m| &m.node)
            .chain(self.cameras.iter().map(|c| &c.node))
    }

    #[must_use]
    pub fn hierarchy(&self) -> &NodeHierarchy {
        &self.hierarchy
    }

    /// Find a node's arena index by name.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<usize> {
        self.nodes().position(|n| n.name == name)
    }

    /// Transform of node `index` composed with all of its ancestors.
    #[must_use]
    pub fn world_transform(&self, index: usize) -> Option<Mat4> {
        let mut world = self.node(index)?.transform.to_mat4();
        for ancestor in self.hierarchy.ancestors(index) {
            let parent = self.node(ancestor)?.transform.to_mat4();
            world = parent * world;
        }
        Some(world)
    }

    /// Material used by primitive `index`.
    #[must_use]
    pub fn primitive_material(&self, index: usize) -> Option<&Material> {
        let primitive = self.primitives.get(index)?;
        self.materials.get(primitive.material_index as usize)
    }

    /// Total vertices across all primitives.
    #[must_use]
    pub fn vertex_count(&self) -> u64 {
        self.primitives.iter().map(|p| u64::from(p.vertex_count)).sum()
    }
}
