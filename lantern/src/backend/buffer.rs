//! Buffer backend.

use std::{error, fmt};

/// Binding point a buffer is created for and bound to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BufferTarget {
  /// Vertex data (`GL_ARRAY_BUFFER`).
  Array,
  /// Vertex indices (`GL_ELEMENT_ARRAY_BUFFER`).
  ElementArray,
}

impl fmt::Display for BufferTarget {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BufferTarget::Array => f.write_str("array buffer"),
      BufferTarget::ElementArray => f.write_str("element array buffer"),
    }
  }
}

/// Errors that buffers can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BufferError {
  /// The backend could not allocate a buffer object.
  CannotCreate(BufferTarget),
}

impl fmt::Display for BufferError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BufferError::CannotCreate(target) => write!(f, "cannot create {}", target),
    }
  }
}

impl error::Error for BufferError {}

/// Buffer backend.
///
/// A buffer is uploaded once, at creation, and never mutated afterwards.
pub unsafe trait Buffer {
  /// Backend representation of a buffer.
  ///
  /// Dropping it deletes the GPU buffer but must not change the recorded binding of its target.
  type BufferRepr;

  /// Create a buffer for `target` and upload `bytes` into it as static data.
  ///
  /// Creating a buffer binds it to `target`.
  unsafe fn new_buffer(
    &mut self,
    target: BufferTarget,
    bytes: &[u8],
  ) -> Result<Self::BufferRepr, BufferError>;

  /// Make `buffer` the current binding of its target.
  unsafe fn bind_buffer(buffer: &Self::BufferRepr);

  /// Reset the binding of the target of `buffer` to nothing.
  unsafe fn unbind_buffer(buffer: &Self::BufferRepr);

  /// Backend handle of the buffer.
  unsafe fn buffer_handle(buffer: &Self::BufferRepr) -> u32;
}
