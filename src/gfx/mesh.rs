use std::mem::size_of;

use eframe::glow;
use glam::Vec3;
use zerocopy::AsBytes;

use crate::error::{AppError, AppResult};
use crate::gfx::vertex::{Vertex, VERTEX_ATTRIBS, VERTEX_STRIDE};
use crate::gfx::Model;

/// Non-indexed triangle list. Every three consecutive vertices form one triangle.
#[derive(Debug, Clone)]
pub struct Mesh {
    verts: Vec<Vertex>,
    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
}

impl Mesh {
    pub fn new(verts: Vec<Vertex>) -> AppResult<Self> {
        if verts.len() % 3 != 0 {
            return Err(AppError::MeshLayout { len: verts.len() });
        }

        Ok(Self {
            verts,
            vao: None,
            vbo: None,
        })
    }

    /// Unit cube centred on the origin, 12 triangles with every corner repeated per face.
    pub fn cube() -> AppResult<Self> {
        Self::new(cube_vertices())
    }

    /// Single triangle in the z = 0 plane using the default colour.
    #[allow(dead_code)]
    pub fn triangle() -> AppResult<Self> {
        Self::new(vec![
            Vertex::at(Vec3::new(-0.5, -0.5, 0.0)),
            Vertex::at(Vec3::new(0.5, -0.5, 0.0)),
            Vertex::at(Vec3::new(0.0, 0.5, 0.0)),
        ])
    }

    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    /// Exactly what gets copied into the vertex buffer.
    pub fn bytes(&self) -> &[u8] {
        self.verts.as_bytes()
    }

    pub fn byte_len(&self) -> usize {
        self.verts.len() * size_of::<Vertex>()
    }

    pub fn is_uploaded(&self) -> bool {
        self.vao.is_some() && self.vbo.is_some()
    }
}

fn cube_vertices() -> Vec<Vertex> {
    let v = |x: f32, y: f32, z: f32, r: f32, g: f32, b: f32| {
        Vertex::new(Vec3::new(x, y, z), Vec3::new(r, g, b))
    };

    vec![
        // Back
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
        v(0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
        v(0.5, 0.5, -0.5, 0.0, 0.0, 1.0),
        v(0.5, 0.5, -0.5, 0.0, 0.0, 1.0),
        v(-0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
        // Front
        v(-0.5, -0.5, 0.5, 1.0, 0.0, 1.0),
        v(0.5, -0.5, 0.5, 0.0, 1.0, 1.0),
        v(0.5, 0.5, 0.5, 1.0, 1.0, 1.0),
        v(0.5, 0.5, 0.5, 1.0, 1.0, 1.0),
        v(-0.5, 0.5, 0.5, 0.5, 0.5, 0.5),
        v(-0.5, -0.5, 0.5, 1.0, 0.0, 1.0),
        // Left
        Vertex::at(Vec3::new(-0.5, 0.5, 0.5)),
        v(-0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
        v(-0.5, -0.5, 0.5, 1.0, 0.0, 1.0),
        v(-0.5, 0.5, 0.5, 0.5, 0.5, 0.5),
        // Right
        v(0.5, 0.5, 0.5, 1.0, 1.0, 1.0),
        v(0.5, 0.5, -0.5, 0.0, 0.0, 1.0),
        v(0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
        v(0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
        v(0.5, -0.5, 0.5, 0.0, 1.0, 1.0),
        v(0.5, 0.5, 0.5, 1.0, 1.0, 1.0),
        // Bottom
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
        v(0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
        v(0.5, -0.5, 0.5, 0.0, 1.0, 1.0),
        v(0.5, -0.5, 0.5, 0.0, 1.0, 1.0),
        v(-0.5, -0.5, 0.5, 1.0, 0.0, 1.0),
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
        // Top
        v(-0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
        v(0.5, 0.5, -0.5, 0.0, 0.0, 1.0),
        v(0.5, 0.5, 0.5, 1.0, 1.0, 1.0),
        v(0.5, 0.5, 0.5, 1.0, 1.0, 1.0),
        v(-0.5, 0.5, 0.5, 0.5, 0.5, 0.5),
        v(-0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
    ]
}

impl Model for Mesh {
    fn setup_gl(&mut self, gl: &glow::Context) -> AppResult<()> {
        if self.vao.is_some() || self.vbo.is_some() {
            return Err(AppError::Gl("mesh is already uploaded".into()));
        }

        unsafe {
            use glow::HasContext as _;

            let vao = gl.create_vertex_array().map_err(AppError::Gl)?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(AppError::Gl(e));
                }
            };

            // The VAO has to be bound before the buffer so it records the attribute layout
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, self.bytes(), glow::STATIC_DRAW);

            for attrib in VERTEX_ATTRIBS {
                gl.vertex_attrib_pointer_f32(
                    attrib.location,
                    attrib.components,
                    glow::FLOAT,
                    false,
                    VERTEX_STRIDE,
                    attrib.offset,
                );
                gl.enable_vertex_attrib_array(attrib.location);
            }

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            self.vao = Some(vao);
            self.vbo = Some(vbo);
        }

        log::debug!(
            "Uploaded mesh: {} vertices, {} bytes",
            self.vertex_count(),
            self.byte_len()
        );
        Ok(())
    }

    fn destroy_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if let Some(vao) = self.vao.take() {
                gl.delete_vertex_array(vao);
            }
            if let Some(vbo) = self.vbo.take() {
                gl.delete_buffer(vbo);
            }
        }
    }

    fn draw(&self, gl: &glow::Context) {
        if !self.is_uploaded() {
            return;
        }

        unsafe {
            use glow::HasContext as _;

            gl.bind_vertex_array(self.vao);
            gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count() as i32);
        }
    }
}
