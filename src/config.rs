//! Startup constants. Nothing here is read from the command line or the environment.

use glam::Vec3;

use crate::gfx::shader::ShaderFailurePolicy;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;
pub const TITLE: &str = "OpenGL Cube";

pub const VERTEX_SHADER_PATH: &str = "Shaders/cube.vs";
pub const FRAGMENT_SHADER_PATH: &str = "Shaders/cube.fs";

/// What to do when a shader file is missing or a stage fails to compile/link.
pub const SHADER_FAILURE_POLICY: ShaderFailurePolicy = ShaderFailurePolicy::FailFast;

/// Driver diagnostics are cut to this many bytes before they are logged.
pub const SHADER_LOG_CAPACITY: usize = 1024;

/// Oldest desktop GL the shaders are written for (`#version 330 core`).
pub const MIN_GL_VERSION: (u32, u32) = (3, 3);

pub const CLEAR_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub const CAMERA_POS: Vec3 = Vec3::new(2.0, 1.0, -1.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_UP: Vec3 = Vec3::Y;

pub const MODEL_AXIS: Vec3 = Vec3::Z;
pub const MODEL_START_DEGREES: f32 = 45.0;
pub const MODEL_SCALE: f32 = 0.5;
/// Added to the model rotation once per rendered frame, not per second.
pub const ROTATION_STEP_DEGREES: f32 = 0.03;

pub const INIT_FAILURE_EXIT_CODE: i32 = -1;
