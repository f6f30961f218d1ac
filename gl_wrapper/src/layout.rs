use std::ffi::c_void;
use thiserror::Error;

use crate::buffer::{buffer_data, Buffer, BufferUsage, VertexArray};

/// Scalar types that can back a vertex attribute.
pub trait GlScalar: Copy {
    const GL_TYPE: u32;
}

impl GlScalar for f32 {
    const GL_TYPE: u32 = gl::FLOAT;
}

impl GlScalar for i32 {
    const GL_TYPE: u32 = gl::INT;
}

impl GlScalar for u32 {
    const GL_TYPE: u32 = gl::UNSIGNED_INT;
}

impl GlScalar for u8 {
    const GL_TYPE: u32 = gl::UNSIGNED_BYTE;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Layout needs at least one attribute")]
    Empty,
}

/// Interleaved vertex data together with the attributes describing one vertex.
pub struct BufferLayout<'a, T: GlScalar> {
    attributes: Vec<VertexAttribute>,
    data: &'a [T],
}

impl<'a, T: GlScalar> BufferLayout<'a, T> {
    pub fn new(attributes: &[VertexAttribute], data: &'a [T]) -> Result<Self, LayoutError> {
        if attributes.is_empty() {
            return Err(LayoutError::Empty);
        }

        let layout = Self {
            attributes: attributes.to_vec(),
            data,
        };

        if layout.data.len() % layout.components() != 0 {
            return Err(LayoutError::InvalidDataLength);
        }

        Ok(layout)
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn data(&self) -> &[T] {
        self.data
    }

    /// Components per vertex.
    pub fn components(&self) -> usize {
        self.attributes.iter().map(|a| a.size()).sum()
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.components() * std::mem::size_of::<T>()
    }

    /// Byte offset of attribute `index` inside one vertex.
    pub fn offset(&self, index: usize) -> usize {
        let preceding: usize = self.attributes[..index].iter().map(|a| a.size()).sum();

        preceding * std::mem::size_of::<T>()
    }

    pub fn vertices(&self) -> usize {
        self.data.len() / self.components()
    }
}

/// Feeds several buffers into one vertex array at consecutive attribute locations.
#[derive(Debug, Default)]
pub struct BufferLoader {
    layout_index: u32,
}

impl BufferLoader {
    pub fn new() -> Self {
        Self { layout_index: 0 }
    }

    pub fn next_location(&self) -> u32 {
        self.layout_index
    }

    pub fn build_buffer<T: GlScalar>(
        &mut self,
        vao: &VertexArray,
        buffer: &Buffer,
        layout: &BufferLayout<'_, T>,
        usage: BufferUsage,
    ) {
        vao.bind();
        buffer.bind();
        buffer_data(buffer.target(), layout.data(), usage);

        let stride = layout.stride() as i32;

        for (i, attr) in layout.attributes().iter().enumerate() {
            let location = self.layout_index + i as u32;

            unsafe {
                gl::VertexAttribPointer(
                    location,
                    attr.size() as i32,
                    T::GL_TYPE,
                    gl::FALSE,
                    stride,
                    layout.offset(i) as *const c_void,
                );
                gl::EnableVertexAttribArray(location);
            }
        }

        self.layout_index += layout.attributes().len() as u32;
    }
}
