use std::path::PathBuf;

use clap::Parser;

use fpsgl::CameraSettings;

#[derive(Debug, Parser)]
#[command(about = "First person walk around a field of cubes")]
pub struct ArgsInteractive {
    /// Window title
    #[arg(long, default_value = "fpsgl")]
    pub title: String,
    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    pub width: u32,
    /// Initial window height
    #[arg(long, default_value_t = 720)]
    pub height: u32,
    /// Vertex shader file, reloaded on change (needs --frag)
    #[arg(long, requires = "frag")]
    pub vert: Option<PathBuf>,
    /// Fragment shader file, reloaded on change (needs --vert)
    #[arg(long, requires = "vert")]
    pub frag: Option<PathBuf>,
    /// PNG texture for the objects, a checkerboard is generated if missing
    #[arg(short, long)]
    pub texture: Option<PathBuf>,
    /// Movement speed in units per second
    #[arg(long, default_value_t = 5.0)]
    pub speed: f32,
    /// Degrees of rotation per pixel of mouse movement
    #[arg(long, default_value_t = 0.1)]
    pub sensitivity: f32,
    /// Cubes per side of the grid
    #[arg(short, long, default_value_t = 10)]
    pub grid: usize,
}

impl ArgsInteractive {
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            movement_speed: self.speed,
            mouse_sensitivity: self.sensitivity,
        }
    }
}
