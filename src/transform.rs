//! Per-frame transform math for the spinning cube.
//!
//! Nothing in here touches OpenGL, so all of it can be exercised without a context.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

pub const FOV_Y_DEGREES: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Rotation applied per rendered frame.
pub fn step() -> f32 {
    1.0f32.to_radians()
}

/// The cube's spin angle, always kept in `[0, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    angle: f32,
}

impl Rotation {
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances the angle by one step, wrapping at a full turn.
    pub fn advance(&mut self) -> f32 {
        self.angle = (self.angle + step()).rem_euclid(TAU);
        self.angle
    }
}

/// Drawable size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport, clamping both sides to at least one pixel so the aspect stays finite.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// The matrices built for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub mvp: Mat4,
}

impl FrameTransform {
    /// Builds projection, view and model for the given spin angle and viewport.
    ///
    /// The model spins about Y by `angle` and, inside that, about X by twice the angle.
    pub fn build(angle: f32, viewport: Viewport) -> Self {
        let projection = Mat4::perspective_rh_gl(
            FOV_Y_DEGREES.to_radians(),
            viewport.aspect(),
            Z_NEAR,
            Z_FAR,
        );
        let view = Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y);
        let model = Mat4::from_rotation_y(angle) * Mat4::from_rotation_x(angle * 2.0);

        Self {
            projection,
            view,
            model,
            mvp: projection * view * model,
        }
    }
}
