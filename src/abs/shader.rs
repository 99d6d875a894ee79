//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders,
//! the [`load_shader_source`] helper that reads shader text from disk, and the [`Uniform`] trait
//! for setting uniform variables in shader programs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;

/// The pipeline stage a [`Shader`] is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Everything that can go wrong while building a [`ShaderProgram`].
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("no shader source available at {}", .0.display())]
    MissingSource(PathBuf),
    #[error("failed to create {what}: {reason}")]
    Create { what: &'static str, reason: String },
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link: {0}")]
    Link(String),
}

/// Reads a whole shader file into an owned string.
///
/// Returns `None` if the file cannot be opened or read. The failure is logged with the offending
/// path, callers only need to decide what "no source" means for them.
pub fn load_shader_source(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(err) => {
            log::error!("Could not open shader file {}: {err}", path.display());
            None
        }
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the driver's info log is logged and returned, and the shader object is deleted.
    pub fn new(
        gl: &Arc<glow::Context>,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(stage.gl_enum())
                .map_err(|reason| ShaderError::Create {
                    what: "shader",
                    reason,
                })?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                log::error!("Error compiling {stage} shader: {log}");
                return Err(ShaderError::Compile { stage, log });
            }

            log::debug!("Compiled {stage} shader");

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
            })
        }
    }

    /// Returns the stage this shader was compiled for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref());
            }
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    ///
    /// `attributes` pins vertex attribute names to locations before linking. The shaders are
    /// detached again once linking succeeded, so dropping them afterwards releases the stage
    /// objects while the program keeps the linked code.
    pub fn new(
        gl: &Arc<glow::Context>,
        shaders: &[&Shader],
        attributes: &[(u32, &str)],
    ) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl
                .create_program()
                .map_err(|reason| ShaderError::Create {
                    what: "program",
                    reason,
                })?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            for &(location, name) in attributes {
                gl.bind_attrib_location(program, location, name);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                log::error!("Error linking shader program: {log}");
                return Err(ShaderError::Link(log));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Loads, compiles and links a vertex/fragment pair read from disk.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex_path: &Path,
        fragment_path: &Path,
        attributes: &[(u32, &str)],
    ) -> Result<Self, ShaderError> {
        let vert = Self::compile_file(gl, ShaderStage::Vertex, vertex_path)?;
        let frag = Self::compile_file(gl, ShaderStage::Fragment, fragment_path)?;
        let program = Self::new(gl, &[&vert, &frag], attributes)?;
        log::info!(
            "Linked shader program from {} ({}) and {} ({})",
            vertex_path.display(),
            vert.stage(),
            fragment_path.display(),
            frag.stage(),
        );
        Ok(program)
    }

    fn compile_file(
        gl: &Arc<glow::Context>,
        stage: ShaderStage,
        path: &Path,
    ) -> Result<Shader, ShaderError> {
        let source =
            load_shader_source(path).ok_or_else(|| ShaderError::MissingSource(path.to_owned()))?;
        Shader::new(gl, stage, &source)
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
