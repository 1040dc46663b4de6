//! Vertex array backend.

use crate::vertex_array::{VertexArrayError, VertexAttrib};

/// Vertex array backend.
pub unsafe trait VertexArray {
  /// Backend representation of a vertex array.
  ///
  /// Dropping it deletes the GPU object but must not change the recorded vertex array binding.
  type VertexArrayRepr;

  /// Create an empty vertex array. Creation does not bind it.
  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError>;

  /// Make `vertex_array` the current vertex array.
  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr);

  /// Reset the vertex array binding to nothing.
  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr);

  /// Describe and enable one float attribute sourced from the currently bound array buffer.
  ///
  /// The attribute is recorded into the currently bound vertex array.
  unsafe fn set_vertex_attrib(vertex_array: &Self::VertexArrayRepr, attrib: VertexAttrib);

  /// Backend handle of the vertex array.
  unsafe fn vertex_array_handle(vertex_array: &Self::VertexArrayRepr) -> u32;
}
