mod end_cap;
mod tapered;

pub use end_cap::TriangulateEndCap;
pub use tapered::BuildTaperedMesh;

use crate::math::{Point2, Point3, Vector3};

/// Parameters controlling mesh generation.
#[derive(Debug, Clone, Copy)]
pub struct MeshParams {
    /// Ring subdivisions per tapering segment. Uniform segments always
    /// use a single ring pair, since their interpolation is constant.
    pub subdivisions: usize,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self { subdivisions: 1 }
    }
}

/// Triangle mesh buffers in member-local coordinates (axis along +z,
/// centered on the member midpoint).
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl MeshBuffers {
    /// Appends another buffer set, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn append(&mut self, mut other: MeshBuffers) {
        let offset = self.positions.len() as u32;
        self.positions.append(&mut other.positions);
        self.normals.append(&mut other.normals);
        self.uvs.append(&mut other.uvs);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }
}
