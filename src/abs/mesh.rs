//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// Represents an indexed mesh stored on the GPU side.
///
/// Owns one vertex array, one vertex buffer and one index buffer. All three are deleted exactly
/// once, when the mesh is dropped.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: usize,
}

impl Mesh {
    /// Uploads the given vertex and index data into new static GPU buffers.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, String> {
        unsafe {
            let (vao, vbo, ebo) = create_objects(
                || gl.create_vertex_array(),
                || gl.create_buffer(),
                |vao| gl.delete_vertex_array(vao),
                |buffer| gl.delete_buffer(buffer),
            )?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    vertices.as_ptr() as *const u8,
                    std::mem::size_of_val(vertices),
                ),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    indices.as_ptr() as *const u8,
                    std::mem::size_of_val(indices),
                ),
                glow::STATIC_DRAW,
            );

            V::vertex_attribs(gl);

            // The element buffer binding is VAO state, so unbind the VAO first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            log::debug!(
                "Uploaded mesh with {} vertices and {} indices",
                vertices.len(),
                indices.len()
            );

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo,
                index_count: indices.len(),
            })
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_elements(
                self.draw_mode,
                self.index_count as i32,
                glow::UNSIGNED_INT,
                0,
            );
            self.gl.bind_vertex_array(None);
        }
    }
}

/// Creates one vertex array and two buffers. If a later creation fails, the objects already
/// created are deleted before the error is returned.
fn create_objects<V, B>(
    create_vao: impl FnOnce() -> Result<V, String>,
    mut create_buffer: impl FnMut() -> Result<B, String>,
    delete_vao: impl FnOnce(V),
    mut delete_buffer: impl FnMut(B),
) -> Result<(V, B, B), String> {
    let vao = create_vao()?;
    let vbo = match create_buffer() {
        Ok(vbo) => vbo,
        Err(err) => {
            delete_vao(vao);
            return Err(err);
        }
    };
    let ebo = match create_buffer() {
        Ok(ebo) => ebo,
        Err(err) => {
            delete_buffer(vbo);
            delete_vao(vao);
            return Err(err);
        }
    };
    Ok((vao, vbo, ebo))
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ebo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Hands out numbered buffers and fails on the `fail_at`-th request.
    fn run(fail_at: Option<u32>) -> (Result<(u32, u32, u32), String>, Vec<String>) {
        let deleted = RefCell::new(Vec::new());
        let mut next = 10;
        let result = create_objects(
            || Ok(1),
            || {
                next += 1;
                if Some(next - 10) == fail_at {
                    Err("out of memory".to_string())
                } else {
                    Ok(next)
                }
            },
            |vao| deleted.borrow_mut().push(format!("vao {vao}")),
            |buffer| deleted.borrow_mut().push(format!("buffer {buffer}")),
        );
        (result, deleted.into_inner())
    }

    #[test]
    fn test_create_objects_success_deletes_nothing() {
        let (result, deleted) = run(None);
        assert_eq!(result, Ok((1, 11, 12)));
        assert!(deleted.is_empty());
    }

    #[test]
    fn test_failed_vertex_buffer_releases_vao() {
        let (result, deleted) = run(Some(1));
        assert_eq!(result, Err("out of memory".to_string()));
        assert_eq!(deleted, ["vao 1"]);
    }

    #[test]
    fn test_failed_index_buffer_releases_vao_and_vertex_buffer() {
        let (result, deleted) = run(Some(2));
        assert!(result.is_err());
        assert_eq!(deleted, ["buffer 11", "vao 1"]);
    }

    #[test]
    fn test_failed_vao_creates_no_buffers() {
        let mut buffers = 0;
        let result: Result<(u32, u32, u32), String> = create_objects(
            || Err("no context".to_string()),
            || {
                buffers += 1;
                Ok(buffers)
            },
            |_| panic!("nothing to delete"),
            |_| panic!("nothing to delete"),
        );
        assert!(result.is_err());
        assert_eq!(buffers, 0);
    }
}
