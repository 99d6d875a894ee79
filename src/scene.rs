//! The cube scene: one-time GPU setup and the per-frame render tick.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::{Mesh, ShaderError, ShaderProgram};
use crate::config::Config;
use crate::cube::{ATTRIBUTES, INDICES, VERTICES};
use crate::event::{EventHandler, Key};
use crate::transform::{FrameTransform, Rotation, Viewport};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to upload cube mesh: {0}")]
    Mesh(String),
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Rendering,
}

/// CPU-side frame state: spin angle, current viewport and where in a frame we are.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    rotation: Rotation,
    viewport: Viewport,
    phase: FramePhase,
}

impl FrameState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            rotation: Rotation::default(),
            viewport,
            phase: FramePhase::Idle,
        }
    }

    pub fn angle(&self) -> f32 {
        self.rotation.angle()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Enters the rendering phase, advances the spin and builds this frame's matrices.
    pub fn begin_frame(&mut self) -> FrameTransform {
        debug_assert_eq!(self.phase, FramePhase::Idle, "frames must not overlap");
        self.phase = FramePhase::Rendering;
        let angle = self.rotation.advance();
        FrameTransform::build(angle, self.viewport)
    }

    pub fn end_frame(&mut self) {
        self.phase = FramePhase::Idle;
    }
}

/// Owns every GPU resource the demo uses. Dropping the scene releases them.
pub struct Scene {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    program: ShaderProgram,
    frame: FrameState,
}

impl Scene {
    /// Uploads the cube and builds its shader program from the configured files.
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, SceneError> {
        let mesh =
            Mesh::new(gl, &VERTICES, &INDICES, glow::TRIANGLES).map_err(SceneError::Mesh)?;
        let program = ShaderProgram::from_files(
            gl,
            &config.vertex_shader,
            &config.fragment_shader,
            &ATTRIBUTES,
        )?;

        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            program,
            frame: FrameState::new(Viewport::new(config.width, config.height)),
        })
    }

    /// Renders one frame. The caller presents it by swapping buffers.
    pub fn render(&mut self) {
        let transform = self.frame.begin_frame();

        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_uniform("mvp", transform.mvp);
        self.mesh.draw();

        self.check_gl_errors();

        unsafe {
            self.gl.flush();
        }

        self.frame.end_frame();
    }

    fn check_gl_errors(&self) {
        loop {
            let err = unsafe { self.gl.get_error() };
            if err == glow::NO_ERROR {
                break;
            }
            log::error!("OpenGL error: 0x{err:04X}");
        }
    }
}

impl EventHandler for Scene {
    fn resize(&mut self, viewport: Viewport) {
        unsafe {
            self.gl
                .viewport(0, 0, viewport.width as i32, viewport.height as i32);
        }
        self.frame.resize(viewport);
        let Viewport { width, height } = self.frame.viewport();
        log::debug!("Resized to {width}x{height}");
    }

    fn key(&mut self, key: Key) {
        match key {
            Key::Space | Key::Left => log::trace!("{key:?} pressed"),
            Key::Other(keycode) => log::trace!("Unhandled key {}", keycode.name()),
            Key::Escape => {}
        }
    }

    fn redraw(&mut self) {
        self.render();
    }
}
