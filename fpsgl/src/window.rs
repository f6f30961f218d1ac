use sdl2::keyboard::Scancode;
use sdl2::video::{GLContext, GLProfile, Window, WindowBuildError};
use sdl2::{EventPump, Sdl, VideoSubsystem};
use thiserror::Error;

use crate::camera::MovementDirs;

const GL_MAJOR_VERSION: u8 = 3;
const GL_MINOR_VERSION: u8 = 3;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error(transparent)]
    Build(#[from] WindowBuildError),
}

impl From<String> for WindowError {
    fn from(e: String) -> Self {
        WindowError::Sdl(e)
    }
}

/// An SDL window with a current GL context and the mouse captured in relative mode.
pub struct FpsWindow {
    // XXX the context must be dropped before the window.
    _gl_context: GLContext,
    window: Window,
    video: VideoSubsystem,
    sdl: Sdl,
}

/// Creates a resizable, centered GL 3.3 core window that behaves like a first person game.
pub fn setup_fps_window(title: &str, width: u32, height: u32) -> Result<FpsWindow, WindowError> {
    let sdl = sdl2::init()?;
    let video = sdl.video()?;

    let gl_attr = video.gl_attr();
    gl_attr.set_context_profile(GLProfile::Core);
    gl_attr.set_context_version(GL_MAJOR_VERSION, GL_MINOR_VERSION);

    let window = video
        .window(title, width, height)
        .position_centered()
        .opengl()
        .resizable()
        .build()?;

    let gl_context = window.gl_create_context()?;
    gl::load_with(|s| video.gl_get_proc_address(s).cast());

    unsafe {
        gl::Enable(gl::DEPTH_TEST);
        gl::Enable(gl::CULL_FACE);
        gl::Viewport(0, 0, width as i32, height as i32);
    }

    sdl.mouse().set_relative_mouse_mode(true);

    log::info!("created window '{title}' ({width}x{height})");

    Ok(FpsWindow {
        _gl_context: gl_context,
        window,
        video,
        sdl,
    })
}

impl FpsWindow {
    pub fn event_pump(&self) -> Result<EventPump, WindowError> {
        Ok(self.sdl.event_pump()?)
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    pub fn size(&self) -> (u32, u32) {
        self.window.size()
    }

    pub fn id(&self) -> u32 {
        self.window.id()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn video(&self) -> &VideoSubsystem {
        &self.video
    }

    /// WASD moves, space rises, left shift sinks.
    pub fn movement_dirs(&self, events: &EventPump) -> MovementDirs {
        let keys = events.keyboard_state();

        MovementDirs::new(
            keys.is_scancode_pressed(Scancode::W),
            keys.is_scancode_pressed(Scancode::S),
            keys.is_scancode_pressed(Scancode::D),
            keys.is_scancode_pressed(Scancode::A),
            keys.is_scancode_pressed(Scancode::Space),
            keys.is_scancode_pressed(Scancode::LShift),
        )
    }
}
