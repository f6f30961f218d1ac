use cgmath::Vector3;
use thiserror::Error;

use crate::math::triangle_normal;

/// Floats per vertex for XYZ UV data.
pub const XYZ_UV_STRIDE: usize = 5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeshKind {
    Cube,
    Pentahedron,
    Custom,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("vertex stride {0} is too small to hold a position")]
    InvalidStride(usize),
    #[error("{0} floats do not form whole triangles")]
    InvalidVertexCount(usize),
}

/// Triangle list with flat per-triangle normals.
#[derive(Debug, Clone)]
pub struct Mesh {
    kind: MeshKind,
    vertices: Vec<f32>,
    vertex_stride: usize,
    normals: Vec<f32>,
}

impl Mesh {
    /// `vertices` holds `vertex_stride` floats per vertex, the first three being XYZ.
    pub fn new(kind: MeshKind, vertices: Vec<f32>, vertex_stride: usize) -> Result<Self, MeshError> {
        if vertex_stride < 3 {
            return Err(MeshError::InvalidStride(vertex_stride));
        }

        if vertices.len() % (vertex_stride * 3) != 0 {
            return Err(MeshError::InvalidVertexCount(vertices.len()));
        }

        Ok(Self::build(kind, vertices, vertex_stride))
    }

    /// Construction shared by checked and builtin meshes, expects whole triangles.
    fn build(kind: MeshKind, vertices: Vec<f32>, vertex_stride: usize) -> Self {
        let mut mesh = Self {
            kind,
            vertices,
            vertex_stride,
            normals: Vec::new(),
        };

        mesh.calc_normals();
        mesh
    }

    fn calc_normals(&mut self) {
        let triangle_count = self.triangle_count();
        self.normals = Vec::with_capacity(triangle_count * 9);

        for triangle in self.vertices.chunks_exact(self.vertex_stride * 3) {
            let point = |i: usize| {
                let v = &triangle[i * self.vertex_stride..];
                Vector3::new(v[0], v[1], v[2])
            };

            let normal = triangle_normal(point(0), point(1), point(2));

            for _ in 0..3 {
                self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
            }
        }
    }

    #[rustfmt::skip]
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;

        let vertices = vec![
            -h, -h, -h, 0.0, 0.0,
             h,  h, -h, 1.0, 1.0,
             h, -h, -h, 1.0, 0.0,
             h,  h, -h, 1.0, 1.0,
            -h, -h, -h, 0.0, 0.0,
            -h,  h, -h, 0.0, 1.0,

            -h, -h,  h, 0.0, 0.0,
             h, -h,  h, 1.0, 0.0,
             h,  h,  h, 1.0, 1.0,
             h,  h,  h, 1.0, 1.0,
            -h,  h,  h, 0.0, 1.0,
            -h, -h,  h, 0.0, 0.0,

            -h,  h,  h, 1.0, 0.0,
            -h,  h, -h, 1.0, 1.0,
            -h, -h, -h, 0.0, 1.0,
            -h, -h, -h, 0.0, 1.0,
            -h, -h,  h, 0.0, 0.0,
            -h,  h,  h, 1.0, 0.0,

             h,  h,  h, 1.0, 0.0,
             h, -h, -h, 0.0, 1.0,
             h,  h, -h, 1.0, 1.0,
             h, -h, -h, 0.0, 1.0,
             h,  h,  h, 1.0, 0.0,
             h, -h,  h, 0.0, 0.0,

            -h, -h, -h, 0.0, 1.0,
             h, -h, -h, 1.0, 1.0,
             h, -h,  h, 1.0, 0.0,
             h, -h,  h, 1.0, 0.0,
            -h, -h,  h, 0.0, 0.0,
            -h, -h, -h, 0.0, 1.0,

            -h,  h, -h, 0.0, 1.0,
             h,  h,  h, 1.0, 0.0,
             h,  h, -h, 1.0, 1.0,
             h,  h,  h, 1.0, 0.0,
            -h,  h, -h, 0.0, 1.0,
            -h,  h,  h, 0.0, 0.0,
        ];

        Self::build(MeshKind::Cube, vertices, XYZ_UV_STRIDE)
    }

    /// Square based pyramid with its apex on +Y.
    #[rustfmt::skip]
    pub fn pentahedron(size: f32) -> Self {
        let h = size / 2.0;

        let vertices = vec![
             h, -h,  h, 0.0, 1.0,
            -h, -h, -h, 1.0, 0.0,
             h, -h, -h, 0.0, 0.0,
             h, -h,  h, 0.0, 1.0,
            -h, -h,  h, 1.0, 1.0,
            -h, -h, -h, 1.0, 0.0,

            0.0,  h, 0.0, 0.5, 1.0,
              h, -h,  -h, 1.0, 0.0,
             -h, -h,  -h, 0.0, 0.0,

            0.0,  h, 0.0, 0.5, 1.0,
              h, -h,   h, 1.0, 0.0,
              h, -h,  -h, 0.0, 0.0,

            0.0,  h, 0.0, 0.5, 1.0,
             -h, -h,   h, 1.0, 0.0,
              h, -h,   h, 0.0, 0.0,

            0.0,  h, 0.0, 0.5, 1.0,
             -h, -h,  -h, 1.0, 0.0,
             -h, -h,   h, 0.0, 0.0,
        ];

        Self::build(MeshKind::Pentahedron, vertices, XYZ_UV_STRIDE)
    }

    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn vertex_stride(&self) -> usize {
        self.vertex_stride
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.vertex_stride
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Zero};

    fn normal_at(mesh: &Mesh, vertex: usize) -> Vector3<f32> {
        let n = &mesh.normals()[vertex * 3..];
        Vector3::new(n[0], n[1], n[2])
    }

    fn position_at(mesh: &Mesh, vertex: usize) -> Vector3<f32> {
        let v = &mesh.vertices()[vertex * mesh.vertex_stride()..];
        Vector3::new(v[0], v[1], v[2])
    }

    fn triangle_center(mesh: &Mesh, triangle: usize) -> Vector3<f32> {
        (0..3)
            .map(|i| position_at(mesh, triangle * 3 + i))
            .fold(Vector3::zero(), |acc, p| acc + p)
            / 3.0
    }

    #[test]
    fn cube_counts() {
        let cube = Mesh::cube(1.0);

        assert_eq!(cube.kind(), MeshKind::Cube);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.normals().len(), 36 * 3);
    }

    #[test]
    fn cube_normals_point_outwards() {
        let cube = Mesh::cube(2.0);

        for tri in 0..cube.triangle_count() {
            let normal = normal_at(&cube, tri * 3);

            assert!((normal.magnitude() - 1.0).abs() < 1e-5);
            assert!(normal.dot(triangle_center(&cube, tri)) > 0.0, "triangle {tri}");

            // one axis aligned normal shared by all three vertices
            assert_eq!(normal_at(&cube, tri * 3 + 1), normal);
            assert_eq!(normal_at(&cube, tri * 3 + 2), normal);
            assert_eq!(normal.x.abs() + normal.y.abs() + normal.z.abs(), 1.0);
        }
    }

    #[test]
    fn cube_size() {
        let cube = Mesh::cube(3.0);

        for v in 0..cube.vertex_count() {
            let p = position_at(&cube, v);
            assert_eq!(p.x.abs(), 1.5);
            assert_eq!(p.y.abs(), 1.5);
            assert_eq!(p.z.abs(), 1.5);
        }
    }

    #[test]
    fn pentahedron_shape() {
        let pyramid = Mesh::pentahedron(1.0);

        assert_eq!(pyramid.kind(), MeshKind::Pentahedron);
        assert_eq!(pyramid.triangle_count(), 6);

        // base faces down
        assert_eq!(normal_at(&pyramid, 0), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(normal_at(&pyramid, 3), Vector3::new(0.0, -1.0, 0.0));

        // sides face outwards and up
        let apex_center = Vector3::new(0.0, -0.25, 0.0);
        for tri in 2..6 {
            let normal = normal_at(&pyramid, tri * 3);
            assert!(normal.y > 0.0);
            assert!(normal.dot(triangle_center(&pyramid, tri) - apex_center) > 0.0);
        }
    }

    #[test]
    fn builtin_tables_pass_validation() {
        for mesh in [Mesh::cube(1.0), Mesh::pentahedron(1.0)] {
            let checked =
                Mesh::new(mesh.kind(), mesh.vertices().to_vec(), mesh.vertex_stride()).unwrap();

            assert_eq!(checked.vertex_stride(), XYZ_UV_STRIDE);
            assert_eq!(checked.normals(), mesh.normals());
        }
    }

    #[test]
    fn custom_mesh() {
        let mesh = Mesh::new(
            MeshKind::Custom,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            3,
        )
        .unwrap();

        assert_eq!(mesh.normals(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn custom_mesh_validation() {
        assert_eq!(
            Mesh::new(MeshKind::Custom, vec![0.0; 6], 2).err(),
            Some(MeshError::InvalidStride(2))
        );
        assert_eq!(
            Mesh::new(MeshKind::Custom, vec![0.0; 10], 5).err(),
            Some(MeshError::InvalidVertexCount(10))
        );
    }
}
