use std::time::{Duration, Instant};

use cgmath::{perspective, Deg, Matrix4, Vector3};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use thiserror::Error;

use fpsgl::{setup_fps_window, Camera, FpsWindow, Object, ObjectError, WindowError};

use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::shader::{EmbeddedShader, FileShader, Shader, ShaderError};
use gl_wrapper::texture::{RgbaImage, Texture2D, TextureError, TextureFilter, TextureWrap};

use crate::args::ArgsInteractive;

const SHADER_POLL_INTERVAL: Duration = Duration::from_millis(500);
const CUBE_SPACING: f32 = 2.0;

pub struct App {
    // GL objects first, they have to go before the context does
    shader: Box<dyn Shader>,
    texture: Texture2D,
    cube: Object,
    pentahedron: Object,
    renderer: GlRenderer,
    camera: Camera,
    grid: usize,
    window: FpsWindow,
}

impl App {
    pub fn new(args: &ArgsInteractive) -> Result<Self, AppError> {
        let window = setup_fps_window(&args.title, args.width, args.height)?;
        let renderer = GlRenderer::new();

        log::info!("OpenGL version: {}", renderer.gl_version());

        let shader: Box<dyn Shader> = match (&args.vert, &args.frag) {
            (Some(vert), Some(frag)) => {
                log::info!("watching shaders {} and {}", vert.display(), frag.display());
                Box::new(FileShader::new(vert, frag)?)
            }
            _ => Box::new(EmbeddedShader::new(
                include_str!("gl_shaders/basic.vert"),
                include_str!("gl_shaders/basic.frag"),
            )?),
        };

        let texture = match &args.texture {
            Some(path) => Texture2D::from_png(path)?,
            None => {
                let image = checkerboard(64, 8);
                Texture2D::new(
                    image.width,
                    image.height,
                    &image.pixels,
                    TextureFilter::Nearest,
                    TextureWrap::Repeat,
                )?
            }
        };

        let cube = Object::cube(1.0)?;
        let pentahedron = Object::pentahedron(1.5)?;

        let start_z = args.grid as f32 * CUBE_SPACING / 2.0 + 5.0;
        let camera = Camera::with_settings(
            Vector3::new(0.0, 1.5, start_z),
            Vector3::unit_y(),
            -90.0,
            0.0,
            args.camera_settings(),
        );

        Ok(Self {
            shader,
            texture,
            cube,
            pentahedron,
            renderer,
            camera,
            grid: args.grid,
            window,
        })
    }

    pub fn run(mut self) -> Result<(), AppError> {
        let mut events = self.window.event_pump()?;

        let (mut width, mut height) = self.window.size();
        self.renderer.resize(width, height);

        let mut last_frame = Instant::now();
        let mut last_shader_check = Instant::now();
        let mut last_report = Instant::now();
        let mut frame_times = Vec::new();

        'running: loop {
            for event in events.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::ESCAPE),
                        ..
                    } => break 'running,
                    Event::Window {
                        window_id,
                        win_event: WindowEvent::Resized(w, h),
                        ..
                    } if window_id == self.window.id() => {
                        width = w.max(1) as u32;
                        height = h.max(1) as u32;
                        self.renderer.resize(width, height);
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            let delta_time = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;

            // screen y grows downwards, pitch grows upwards
            let mouse = events.relative_mouse_state();
            let dirs = self.window.movement_dirs(&events);
            self.camera
                .update(dirs, delta_time, mouse.x() as f32, -(mouse.y() as f32));

            if last_shader_check.elapsed() >= SHADER_POLL_INTERVAL {
                last_shader_check = Instant::now();

                match self.shader.check_for_changes() {
                    Ok(true) => log::info!("shader program reloaded"),
                    Ok(false) => {}
                    Err(e) => log::error!("shader reload failed, keeping previous program: {e}"),
                }
            }

            self.draw(width, height);
            self.window.swap();

            frame_times.push(delta_time);
            if last_report.elapsed() >= Duration::from_secs(1) {
                let avg = frame_times.iter().sum::<f32>() / frame_times.len() as f32;
                log::info!("frametime: {avg:0.6}, FPS: {:0.1}", 1.0 / avg);

                frame_times.clear();
                last_report = Instant::now();
            }
        }

        log::info!("exiting");

        Ok(())
    }

    fn draw(&self, width: u32, height: u32) {
        let shader = self.shader.as_ref();

        self.renderer.clear_color(0.1, 0.1, 0.15);

        shader.use_shader();
        self.texture.bind(0);
        shader.set_int("texture1", 0);
        shader.set_bool("lighting", true);
        shader.set_vec3("lightPos", Vector3::new(4.0, 8.0, 4.0));
        shader.set_vec3("viewPos", self.camera.pos);

        let aspect = width as f32 / height.max(1) as f32;
        shader.set_matrix4("projection", perspective(Deg(45.0), aspect, 0.1, 200.0));
        shader.set_matrix4("view", self.camera.view_matrix());

        let grid = self.grid;
        self.cube
            .draw_multiple(shader, grid * grid, |i| grid_model(i, grid));

        self.pentahedron.draw(
            shader,
            Matrix4::from_translation(Vector3::new(0.0, 2.0, 0.0)),
        );
    }
}

/// Model matrix of cube `index` in a `grid` x `grid` layout centered on the origin.
fn grid_model(index: usize, grid: usize) -> Matrix4<f32> {
    let offset = (grid.saturating_sub(1)) as f32 * CUBE_SPACING / 2.0;
    let x = (index % grid) as f32 * CUBE_SPACING - offset;
    let z = (index / grid) as f32 * CUBE_SPACING - offset;

    Matrix4::from_translation(Vector3::new(x, 0.0, z))
}

/// Two-tone RGBA checkerboard of `size` x `size` pixels.
fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    let cell = cell.max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let value = if (x / cell + y / cell) % 2 == 0 { 230 } else { 60 };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
    }

    RgbaImage {
        width: size,
        height: size,
        pixels,
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Object(#[from] ObjectError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn translation(m: Matrix4<f32>) -> Vector4<f32> {
        m.w
    }

    #[test]
    fn grid_is_centered() {
        assert_eq!(translation(grid_model(0, 3)), Vector4::new(-2.0, 0.0, -2.0, 1.0));
        assert_eq!(translation(grid_model(4, 3)), Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(translation(grid_model(8, 3)), Vector4::new(2.0, 0.0, 2.0, 1.0));
        assert_eq!(translation(grid_model(0, 1)), Vector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn checkerboard_cells() {
        let image = checkerboard(4, 2);

        assert_eq!(image.pixels.len(), 4 * 4 * 4);

        let px = |x: usize, y: usize| image.pixels[(y * 4 + x) * 4];
        assert_eq!(px(0, 0), 230);
        assert_eq!(px(1, 1), 230);
        assert_eq!(px(2, 0), 60);
        assert_eq!(px(0, 2), 60);
        assert_eq!(px(3, 3), 230);
    }
}
