//! CPU-side mesh assembly.
//!
//! Every geometry source ends up in the same layout: one sequence per
//! attribute, each uploaded to its own buffer, plus optional 16-bit indices.

use crate::shapes::GeneratedMesh;
use crate::{GLBuffer, GLVertexArray, ObjData};
use math::{Vec2, Vec3};

const QUAD_POSITIONS: [[f32; 3]; 4] = [
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [0.5, 0.5, 0.0],
    [-0.5, 0.5, 0.0],
];
const QUAD_TCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// `None` marks an absent attribute, which is distinct from a present but
/// empty one.
#[derive(Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub tcoords: Option<Vec<Vec2>>,
    pub normals: Option<Vec<Vec3>>,
    pub indices: Option<Vec<u16>>,

    pub pbo: GLBuffer,
    pub tbo: GLBuffer,
    pub nbo: GLBuffer,
    pub ibo: GLBuffer,
    pub vao: GLVertexArray,

    /// Indices drawn when indexed, vertices otherwise. `None` once unloaded.
    pub vertex_count: Option<usize>,
}

impl Mesh {
    /// A non-indexed mesh with positions only.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self {
            vertex_count: Some(positions.len()),
            positions,
            ..Self::default()
        }
    }

    /// Copies generator output and derives vertex normals from its triangles.
    pub fn from_generated(generated: GeneratedMesh) -> Self {
        let normals = generated.compute_normals();

        Self {
            vertex_count: Some(generated.triangles.len()),
            positions: generated.points,
            tcoords: generated.tcoords,
            normals: Some(normals),
            indices: Some(generated.triangles),
            ..Self::default()
        }
    }

    /// Flattens the OBJ corners into a per-corner position stream. Texture
    /// coordinates and normals in the file are not used.
    pub fn from_obj(obj: &ObjData) -> Self {
        Self::from_positions(obj.flattened_positions())
    }

    /// Unit quad in the XY plane facing +Z: four shared vertices, six indices.
    pub fn quad_optimal() -> Self {
        Self {
            positions: QUAD_POSITIONS
                .iter()
                .map(|p| Vec3::from_components(p[0], p[1], p[2]))
                .collect(),
            tcoords: Some(
                QUAD_TCOORDS
                    .iter()
                    .map(|t| Vec2::from_components(t[0], t[1]))
                    .collect(),
            ),
            normals: Some(vec![Vec3::unit_z(); 4]),
            indices: Some(QUAD_INDICES.to_vec()),
            vertex_count: Some(QUAD_INDICES.len()),
            ..Self::default()
        }
    }

    /// The same quad as six independent vertices and no index buffer.
    pub fn quad_unoptimal() -> Self {
        Self::quad_optimal().expanded()
    }

    /// Resolves the index list into duplicated per-corner attributes.
    /// A mesh without indices is copied as is.
    pub fn expanded(&self) -> Self {
        let indices = match &self.indices {
            Some(indices) => indices,
            None => {
                return Self {
                    positions: self.positions.clone(),
                    tcoords: self.tcoords.clone(),
                    normals: self.normals.clone(),
                    vertex_count: Some(self.positions.len()),
                    ..Self::default()
                }
            }
        };

        fn gather<T: Copy>(source: &[T], indices: &[u16]) -> Vec<T> {
            indices.iter().map(|i| source[*i as usize]).collect()
        }

        Self {
            positions: gather(&self.positions, indices),
            tcoords: self.tcoords.as_ref().map(|t| gather(t, indices)),
            normals: self.normals.as_ref().map(|n| gather(n, indices)),
            indices: None,
            vertex_count: Some(indices.len()),
            ..Self::default()
        }
    }

    /// Holds CPU geometry ready for upload.
    pub fn is_loaded(&self) -> bool {
        !self.positions.is_empty()
    }

    pub fn is_uploaded(&self) -> bool {
        !self.vao.is_null()
    }

    pub fn is_indexed(&self) -> bool {
        !self.ibo.is_null()
    }
}
