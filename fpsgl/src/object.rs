use cgmath::Matrix4;
use thiserror::Error;

use gl_wrapper::buffer::{Buffer, BufferTarget, BufferUsage, VertexArray};
use gl_wrapper::layout::{BufferLayout, BufferLoader, LayoutError, VertexAttribute};
use gl_wrapper::shader::Shader;

use crate::mesh::{Mesh, XYZ_UV_STRIDE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjectError {
    #[error("objects need XYZ UV vertices (5 floats each), got stride {0}")]
    UnsupportedStride(usize),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// A mesh uploaded to the GPU.
///
/// Attribute locations: 0 position, 1 uv, 2 normal.
pub struct Object {
    mesh: Mesh,
    vao: VertexArray,
    // kept alive for the lifetime of the vao
    _vbo: Buffer,
    _nbo: Buffer,
}

impl Object {
    pub fn new(mesh: Mesh) -> Result<Self, ObjectError> {
        if mesh.vertex_stride() != XYZ_UV_STRIDE {
            return Err(ObjectError::UnsupportedStride(mesh.vertex_stride()));
        }

        let mut loader = BufferLoader::new();
        let vao = VertexArray::gen_bind();

        let vertex_layout = BufferLayout::new(
            &[VertexAttribute::Vec3, VertexAttribute::Vec2],
            mesh.vertices(),
        )?;
        let vbo = Buffer::gen_bind(BufferTarget::Array);
        loader.build_buffer(&vao, &vbo, &vertex_layout, BufferUsage::StaticDraw);

        let normal_layout = BufferLayout::new(&[VertexAttribute::Vec3], mesh.normals())?;
        let nbo = Buffer::gen_bind(BufferTarget::Array);
        loader.build_buffer(&vao, &nbo, &normal_layout, BufferUsage::StaticDraw);

        VertexArray::unbind();

        Ok(Self {
            mesh,
            vao,
            _vbo: vbo,
            _nbo: nbo,
        })
    }

    pub fn cube(size: f32) -> Result<Self, ObjectError> {
        Self::new(Mesh::cube(size))
    }

    pub fn pentahedron(size: f32) -> Result<Self, ObjectError> {
        Self::new(Mesh::pentahedron(size))
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Draws once with `model` bound to the `model` uniform.
    pub fn draw<S: Shader + ?Sized>(&self, shader: &S, model: Matrix4<f32>) {
        self.vao.bind();

        shader.set_matrix4("model", model);
        self.draw_arrays();
    }

    /// Draws `count` instances, the model matrix of instance `i` given by `model(i)`.
    pub fn draw_multiple<S, F>(&self, shader: &S, count: usize, model: F)
    where
        S: Shader + ?Sized,
        F: Fn(usize) -> Matrix4<f32>,
    {
        self.vao.bind();

        for i in 0..count {
            shader.set_matrix4("model", model(i));
            self.draw_arrays();
        }
    }

    fn draw_arrays(&self) {
        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, self.mesh.vertex_count() as i32);
        }
    }
}
