use std::ffi::CStr;

pub struct GlRenderer {
    clear_bits: u32,
}

impl GlRenderer {
    /// Depth testing and culling are context state owned by window setup.
    pub fn new() -> Self {
        Self {
            clear_bits: gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT,
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(self.clear_bits);
        }
    }

    pub fn gl_version(&self) -> String {
        unsafe {
            let version = gl::GetString(gl::VERSION);
            if version.is_null() {
                return String::new();
            }

            CStr::from_ptr(version.cast()).to_string_lossy().into_owned()
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
