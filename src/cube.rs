//! Static cube geometry: eight colored corners and the 36 indices that stitch them into twelve
//! triangles.

use glow::HasContext;

use crate::abs::Vertex;

/// A cube corner with an interleaved position and RGB color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const fn v(position: [f32; 3], color: [f32; 3]) -> CubeVertex {
    CubeVertex { position, color }
}

pub const VERTICES: [CubeVertex; 8] = [
    v([-1.0, -1.0, 1.0], [1.0, 0.0, 0.0]),
    v([1.0, -1.0, 1.0], [1.0, 1.0, 0.0]),
    v([-1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
    v([1.0, 1.0, 1.0], [0.0, 1.0, 1.0]),
    v([-1.0, -1.0, -1.0], [0.0, 0.0, 1.0]),
    v([1.0, -1.0, -1.0], [1.0, 0.0, 1.0]),
    v([-1.0, 1.0, -1.0], [1.0, 1.0, 1.0]),
    v([1.0, 1.0, -1.0], [0.0, 0.0, 0.0]),
];

#[rustfmt::skip]
pub const INDICES: [u32; 36] = [
    2, 6, 7,  2, 3, 7, // top
    0, 4, 5,  0, 1, 5, // bottom
    0, 2, 6,  0, 4, 6, // left
    1, 3, 7,  1, 5, 7, // right
    0, 2, 3,  0, 1, 3, // front
    4, 6, 7,  4, 5, 7, // back
];

/// Attribute locations as the shaders name them.
pub const ATTRIBUTES: [(u32, &str); 2] = [(0, "position"), (1, "color")];

impl Vertex for CubeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<CubeVertex>() as i32;

            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);

            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(CubeVertex, color) as i32,
            );
            gl.enable_vertex_attrib_array(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<CubeVertex>(), 6 * std::mem::size_of::<f32>());
        assert_eq!(std::mem::offset_of!(CubeVertex, position), 0);
        assert_eq!(
            std::mem::offset_of!(CubeVertex, color),
            3 * std::mem::size_of::<f32>()
        );
    }

    #[test]
    fn test_indices_form_twelve_triangles_over_eight_corners() {
        assert_eq!(INDICES.len(), 36);
        assert_eq!(INDICES.chunks_exact(3).count(), 12);
        assert!(INDICES.iter().all(|&i| (i as usize) < VERTICES.len()));

        let used: HashSet<u32> = INDICES.iter().copied().collect();
        assert_eq!(used.len(), VERTICES.len());
    }

    #[test]
    fn test_no_degenerate_triangles() {
        for tri in INDICES.chunks_exact(3) {
            assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2], "{tri:?}");
        }
    }

    #[test]
    fn test_every_triangle_lies_on_a_face() {
        // All three corners of a face triangle share one coordinate.
        for tri in INDICES.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| VERTICES[i as usize].position);
            assert!(
                (0..3).any(|axis| a[axis] == b[axis] && b[axis] == c[axis]),
                "{tri:?}"
            );
        }
    }

    #[test]
    fn test_corners_are_unit_cube() {
        for vertex in VERTICES {
            assert!(vertex.position.iter().all(|c| c.abs() == 1.0));
            assert!(vertex.color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
