use cgmath::{Matrix, Matrix4, Vector3};
use gl::types::{GLint, GLuint};
use std::ffi::{c_char, CString};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    fn gl_enum(&self) -> u32 {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for ShaderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("shader source contains an interior nul byte")]
    InteriorNul,
    #[error("failed to compile {0} shader:\n{1}")]
    Compilation(ShaderKind, String),
    #[error("failed to link program:\n{0}")]
    Linking(String),
    #[error("cannot read shader {0:?}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

pub struct CompiledShader {
    id: GLuint,
}

impl CompiledShader {
    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for CompiledShader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) }
    }
}

pub fn compile_shader(source: &str, kind: ShaderKind) -> Result<CompiledShader, ProgramError> {
    let source = CString::new(source).map_err(|_| ProgramError::InteriorNul)?;
    let mut success: i32 = 0;

    unsafe {
        let shader = CompiledShader {
            id: gl::CreateShader(kind.gl_enum()),
        };

        gl::ShaderSource(
            shader.id,
            1,
            (&source.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader.id);
        gl::GetShaderiv(shader.id, gl::COMPILE_STATUS, (&mut success) as *mut i32);
        if success != gl::TRUE as i32 {
            let mut len = 0;
            gl::GetShaderiv(shader.id, gl::INFO_LOG_LENGTH, (&mut len) as *mut i32);

            let mut buf = vec![0_u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader.id,
                buf.len() as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );

            return Err(ProgramError::Compilation(kind, info_log_to_string(&buf)));
        }

        Ok(shader)
    }
}

fn info_log_to_string(buf: &[u8]) -> String {
    let data = buf.split(|a| *a == 0).next().unwrap_or(buf);

    String::from_utf8_lossy(data).trim_end().to_string()
}

pub struct ProgramBuilder {
    vert: String,
    frag: String,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: vert_src.to_owned(),
            frag: frag_src.to_owned(),
        }
    }

    pub fn from_paths<P: AsRef<Path>>(vert_path: P, frag_path: P) -> Result<Self, ProgramError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|e| ProgramError::Io(path.to_path_buf(), e))
        };

        Ok(Self {
            vert: read(vert_path.as_ref())?,
            frag: read(frag_path.as_ref())?,
        })
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        let vert = compile_shader(&self.vert, ShaderKind::Vertex)?;
        let frag = compile_shader(&self.frag, ShaderKind::Fragment)?;

        let mut success: i32 = 0;

        unsafe {
            let program = Program {
                id: gl::CreateProgram(),
            };
            gl::AttachShader(program.id, vert.id());
            gl::AttachShader(program.id, frag.id());
            gl::LinkProgram(program.id);

            gl::GetProgramiv(program.id, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != gl::TRUE as i32 {
                let mut len = 0;
                gl::GetProgramiv(program.id, gl::INFO_LOG_LENGTH, (&mut len) as *mut i32);

                let mut buf = vec![0_u8; len.max(1) as usize];
                gl::GetProgramInfoLog(
                    program.id,
                    buf.len() as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );

                return Err(ProgramError::Linking(info_log_to_string(&buf)));
            }

            gl::DetachShader(program.id, vert.id());
            gl::DetachShader(program.id, frag.id());

            log::debug!("linked program {}", program.id);

            Ok(program)
        }
    }
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    /// Location of uniform `name`, `None` if the program has no such active uniform.
    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        let name = CString::new(name).ok()?;
        let loc = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };

        (loc >= 0).then_some(loc)
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_int(name, value as i32);
    }

    pub fn set_int(&self, name: &str, value: i32) {
        if let Some(loc) = self.uniform_location(name) {
            unsafe { gl::Uniform1i(loc, value) }
        }
    }

    pub fn set_float(&self, name: &str, value: f32) {
        if let Some(loc) = self.uniform_location(name) {
            unsafe { gl::Uniform1f(loc, value) }
        }
    }

    pub fn set_vec3(&self, name: &str, value: Vector3<f32>) {
        if let Some(loc) = self.uniform_location(name) {
            let v: [f32; 3] = value.into();
            unsafe { gl::Uniform3fv(loc, 1, v.as_ptr()) }
        }
    }

    pub fn set_matrix4(&self, name: &str, value: Matrix4<f32>) {
        if let Some(loc) = self.uniform_location(name) {
            unsafe { gl::UniformMatrix4fv(loc, 1, gl::FALSE, value.as_ptr()) }
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
