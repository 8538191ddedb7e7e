use glam::{Mat4, Vec3};

use crate::config;
use crate::gfx::camera::Camera;

/// Projection, view and model matrices uploaded every frame.
#[derive(Debug, Clone)]
pub struct Transforms {
    pub projection: Mat4,
    pub camera: Camera,
    pub model: Mat4,
    step: Mat4,
}

impl Transforms {
    pub fn new() -> Self {
        let aspect = config::WIDTH as f32 / config::HEIGHT as f32;

        Self {
            projection: Mat4::perspective_rh_gl(
                config::FOV_Y_DEGREES.to_radians(),
                aspect,
                config::Z_NEAR,
                config::Z_FAR,
            ),
            camera: Camera::new()
                .with_pos(config::CAMERA_POS)
                .with_target(config::CAMERA_TARGET)
                .with_up(config::CAMERA_UP),
            model: initial_model(),
            step: Mat4::from_axis_angle(config::MODEL_AXIS, config::ROTATION_STEP_DEGREES.to_radians()),
        }
    }

    #[allow(dead_code)]
    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model;
        self
    }

    /// Composes one more rotation step onto the model matrix. Nothing is wrapped, so the
    /// angle keeps growing for as long as frames are drawn.
    pub fn advance(&mut self) {
        self.model *= self.step;
    }

    #[allow(dead_code)]
    pub fn step(&self) -> Mat4 {
        self.step
    }
}

impl Default for Transforms {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_model() -> Mat4 {
    Mat4::from_axis_angle(config::MODEL_AXIS, config::MODEL_START_DEGREES.to_radians())
        * Mat4::from_scale(Vec3::splat(config::MODEL_SCALE))
}
