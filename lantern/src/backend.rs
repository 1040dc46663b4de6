//! Backend interfacing.
//!
//! Each submodule declares the trait a backend implements for one family of GPU objects. The
//! traits are `unsafe` to implement: the safe wrappers of this crate rely on the backend honoring
//! the binding semantics documented on each method.
//!
//! Representations (`*Repr` associated types) own their GPU object and release it in their own
//! `Drop` implementation.

pub mod buffer;
pub mod pipeline;
pub mod shader;
pub mod state;
pub mod texture;
pub mod vertex_array;

/// Everything a backend must provide to run lantern code.
///
/// This trait is implemented automatically for any type implementing every backend trait.
pub trait Backend:
  buffer::Buffer
  + vertex_array::VertexArray
  + shader::Shader
  + texture::Texture
  + pipeline::Pipeline
  + state::BindingQuery
{
}

impl<B> Backend for B where
  B: ?Sized
    + buffer::Buffer
    + vertex_array::VertexArray
    + shader::Shader
    + texture::Texture
    + pipeline::Pipeline
    + state::BindingQuery
{
}
