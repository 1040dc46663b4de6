//! Vertex arrays.

use crate::backend::vertex_array::VertexArray as VertexArrayBackend;
use crate::context::GraphicsContext;
use std::{error, fmt};

/// Errors that vertex arrays can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VertexArrayError {
  /// The backend could not allocate a vertex array object.
  CannotCreate,
}

impl fmt::Display for VertexArrayError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexArrayError::CannotCreate => f.write_str("cannot create vertex array"),
    }
  }
}

impl error::Error for VertexArrayError {}

/// Layout of one float vertex attribute inside interleaved vertex data.
///
/// Stride and offset are counted in `f32`s, which is how interleaved arrays are usually written
/// down (e.g. `x, y, z, r, g, b` is a stride of 6).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttrib {
  /// Attribute index (`layout (location = index)` in the vertex shader).
  pub index: u32,
  /// Number of components, 1 to 4.
  pub components: u8,
  /// Distance between two consecutive vertices, in floats.
  pub stride: usize,
  /// Offset of the attribute inside a vertex, in floats.
  pub offset: usize,
}

impl VertexAttrib {
  /// Describe an attribute.
  pub fn new(index: u32, components: u8, stride: usize, offset: usize) -> Self {
    VertexAttrib {
      index,
      components,
      stride,
      offset,
    }
  }

  /// Stride in bytes.
  pub fn stride_bytes(&self) -> usize {
    self.stride * std::mem::size_of::<f32>()
  }

  /// Offset in bytes.
  pub fn offset_bytes(&self) -> usize {
    self.offset * std::mem::size_of::<f32>()
  }
}

/// A vertex array object.
pub struct VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  repr: B::VertexArrayRepr,
}

impl<B> VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  /// Create an empty vertex array.
  pub fn new<C>(ctx: &mut C) -> Result<Self, VertexArrayError>
  where
    C: GraphicsContext<Backend = B>,
  {
    unsafe {
      ctx
        .backend()
        .new_vertex_array()
        .map(|repr| VertexArray { repr })
    }
  }

  /// Bind as the current vertex array.
  pub fn bind(&self) {
    unsafe { B::bind_vertex_array(&self.repr) }
  }

  /// Reset the current vertex array to nothing.
  pub fn unbind(&self) {
    unsafe { B::unbind_vertex_array(&self.repr) }
  }

  /// Record `attrib` into this vertex array, sourced from the currently bound array buffer.
  ///
  /// The vertex array is bound first; it stays bound afterwards.
  pub fn set_attribute(&self, attrib: VertexAttrib) {
    self.bind();
    unsafe { B::set_vertex_attrib(&self.repr, attrib) }
  }

  /// Backend handle.
  pub fn handle(&self) -> u32 {
    unsafe { B::vertex_array_handle(&self.repr) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn byte_layout_of_interleaved_color() {
    // x, y, z, r, g, b
    let color = VertexAttrib::new(1, 3, 6, 3);

    assert_eq!(color.stride_bytes(), 24);
    assert_eq!(color.offset_bytes(), 12);
  }
}
