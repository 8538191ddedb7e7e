use std::mem::{offset_of, size_of};

use glam::Vec3;
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Colour given to vertices that are built from a position only.
pub const DEFAULT_CLR: Vec3 = Vec3::new(0.8, 0.4, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, AsBytes, FromZeroes, FromBytes)]
#[repr(C)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub clr: [f32; 3],
}

impl Vertex {
    pub fn new(pos: Vec3, clr: Vec3) -> Self {
        Self {
            pos: pos.to_array(),
            clr: clr.to_array(),
        }
    }

    pub fn at(pos: Vec3) -> Self {
        Self::new(pos, DEFAULT_CLR)
    }
}

/// One float attribute as the vertex shader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    pub location: u32,
    pub components: i32,
    pub offset: i32,
}

/// Attribute table for [`Vertex`]: location 0 is the position, location 1 the colour.
pub const VERTEX_ATTRIBS: [VertexAttrib; 2] = [
    VertexAttrib {
        location: 0,
        components: 3,
        offset: offset_of!(Vertex, pos) as i32,
    },
    VertexAttrib {
        location: 1,
        components: 3,
        offset: offset_of!(Vertex, clr) as i32,
    },
];

pub const VERTEX_STRIDE: i32 = size_of::<Vertex>() as i32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_two_packed_vec3() {
        assert_eq!(size_of::<Vertex>(), 24);
        assert_eq!(VERTEX_STRIDE, 24);
        assert_eq!(VERTEX_ATTRIBS[0], VertexAttrib { location: 0, components: 3, offset: 0 });
        assert_eq!(VERTEX_ATTRIBS[1], VertexAttrib { location: 1, components: 3, offset: 12 });
    }

    #[test]
    fn position_only_vertex_is_purple() {
        let vtx = Vertex::at(Vec3::new(-0.5, 0.5, 0.5));
        assert_eq!(vtx.pos, [-0.5, 0.5, 0.5]);
        assert_eq!(vtx.clr, [0.8, 0.4, 1.0]);
    }

    #[test]
    fn bytes_follow_field_order() {
        let vtx = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        let bytes = vtx.as_bytes();
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &4.0f32.to_ne_bytes());
        assert_eq!(&bytes[20..24], &6.0f32.to_ne_bytes());
    }
}
