//! Vertex and element buffers.
//!
//! Both buffer kinds are uploaded once, at creation, as static data. Binding a buffer makes it the
//! current buffer of its target; dropping it releases the GPU buffer without touching the binding.

use crate::backend::buffer::{Buffer as BufferBackend, BufferTarget};
use crate::context::GraphicsContext;
use std::{mem, slice};

pub use crate::backend::buffer::BufferError;

/// Buffer of vertex data.
pub struct VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  repr: B::BufferRepr,
  size: usize,
}

impl<B> VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  /// Create a vertex buffer holding a copy of `vertices`.
  ///
  /// `T` must be a plain-old-data type without padding (floats, arrays of floats, `#[repr(C)]`
  /// structs of those).
  pub fn new<C, T>(ctx: &mut C, vertices: &[T]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
    T: Copy,
  {
    let bytes = as_bytes(vertices);
    let repr = unsafe { ctx.backend().new_buffer(BufferTarget::Array, bytes)? };

    Ok(VertexBuffer {
      repr,
      size: bytes.len(),
    })
  }

  /// Bind as the current array buffer.
  pub fn bind(&self) {
    unsafe { B::bind_buffer(&self.repr) }
  }

  /// Reset the current array buffer to nothing.
  pub fn unbind(&self) {
    unsafe { B::unbind_buffer(&self.repr) }
  }

  /// Size of the uploaded data, in bytes.
  pub fn size(&self) -> usize {
    self.size
  }

  /// Backend handle.
  pub fn handle(&self) -> u32 {
    unsafe { B::buffer_handle(&self.repr) }
  }
}

/// Buffer of `u32` vertex indices.
pub struct ElementBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  repr: B::BufferRepr,
  count: usize,
}

impl<B> ElementBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  /// Create an element buffer holding a copy of `indices`.
  pub fn new<C>(ctx: &mut C, indices: &[u32]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let repr = unsafe {
      ctx
        .backend()
        .new_buffer(BufferTarget::ElementArray, as_bytes(indices))?
    };

    Ok(ElementBuffer {
      repr,
      count: indices.len(),
    })
  }

  /// Bind as the current element array buffer.
  pub fn bind(&self) {
    unsafe { B::bind_buffer(&self.repr) }
  }

  /// Reset the current element array buffer to nothing.
  pub fn unbind(&self) {
    unsafe { B::unbind_buffer(&self.repr) }
  }

  /// Number of indices, as passed at creation.
  pub fn count(&self) -> usize {
    self.count
  }

  /// Size of the uploaded indices, in bytes.
  pub fn size(&self) -> usize {
    self.count * mem::size_of::<u32>()
  }

  /// Backend handle.
  pub fn handle(&self) -> u32 {
    unsafe { B::buffer_handle(&self.repr) }
  }
}

fn as_bytes<T>(data: &[T]) -> &[u8]
where
  T: Copy,
{
  unsafe { slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bytes_cover_whole_slice() {
    let vertices = [[0.5f32, -0.5, 0.], [0., 0.5, 0.]];
    let bytes = as_bytes(&vertices);

    assert_eq!(bytes.len(), 6 * mem::size_of::<f32>());
    assert_eq!(&bytes[..4], &0.5f32.to_ne_bytes());
  }

  #[test]
  fn empty_slice_has_no_bytes() {
    let indices: [u32; 0] = [];
    assert!(as_bytes(&indices).is_empty());
  }
}
