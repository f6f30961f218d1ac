use std::ffi::c_void;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    pub fn gl_enum(&self) -> u32 {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

impl BufferUsage {
    pub fn gl_enum(&self) -> u32 {
        match self {
            BufferUsage::StaticDraw => gl::STATIC_DRAW,
            BufferUsage::DynamicDraw => gl::DYNAMIC_DRAW,
            BufferUsage::StreamDraw => gl::STREAM_DRAW,
        }
    }
}

/// General purpose GL buffer, e.g. a vertex buffer or a normal buffer.
pub struct Buffer {
    id: u32,
    target: BufferTarget,
}

impl Buffer {
    /// Generates a new buffer and binds it to `target`.
    pub fn gen_bind(target: BufferTarget) -> Self {
        let mut id = 0;

        unsafe {
            gl::GenBuffers(1, (&mut id) as *mut u32);
            gl::BindBuffer(target.gl_enum(), id);
        }

        log::debug!("generated buffer {id} ({target:?})");

        Self { id, target }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(self.target.gl_enum(), self.id);
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.id) as *const u32);
        }
    }
}

pub struct VertexArray {
    id: u32,
}

impl VertexArray {
    /// Generates a new vertex array object and binds it.
    pub fn gen_bind() -> Self {
        let mut id = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut id) as *mut u32);
            gl::BindVertexArray(id);
        }

        log::debug!("generated vertex array {id}");

        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    pub fn unbind() {
        unsafe {
            gl::BindVertexArray(0);
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, (&self.id) as *const u32);
        }
    }
}

/// Uploads `data` into whatever buffer is currently bound to `target`.
pub fn buffer_data<T>(target: BufferTarget, data: &[T], usage: BufferUsage) {
    unsafe {
        gl::BufferData(
            target.gl_enum(),
            std::mem::size_of_val(data) as isize,
            data.as_ptr() as *const c_void,
            usage.gl_enum(),
        );
    }
}
