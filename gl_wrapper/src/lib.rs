pub mod buffer;
pub mod layout;
pub mod program;
pub mod renderer;
pub mod shader;
pub mod texture;
