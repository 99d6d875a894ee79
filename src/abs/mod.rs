//! Thin wrappers over SDL2 and OpenGL: window/context setup, shader management and GPU meshes.

pub mod app;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use mesh::*;
pub use shader::*;
