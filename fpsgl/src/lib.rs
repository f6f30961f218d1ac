pub mod camera;
pub mod math;
pub mod mesh;
pub mod object;
pub mod window;

pub use camera::{Camera, CameraSettings, MovementDirs};
pub use mesh::{Mesh, MeshKind};
pub use object::{Object, ObjectError};
pub use window::{setup_fps_window, FpsWindow, WindowError};
