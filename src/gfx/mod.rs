pub mod camera;
pub mod mesh;
pub mod shader;
pub mod transform;
pub mod vertex;
pub mod viewport;

pub use mesh::Mesh;
pub use shader::Shader;

use eframe::glow;

use crate::error::AppResult;

/// Anything that owns GPU storage and can be drawn with the currently bound program.
pub trait Model {
    fn setup_gl(&mut self, gl: &glow::Context) -> AppResult<()>;
    fn destroy_gl(&mut self, gl: &glow::Context);

    fn draw(&self, gl: &glow::Context);
}
