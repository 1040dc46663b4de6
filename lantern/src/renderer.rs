//! Bind-and-draw facade.

use crate::backend::buffer::Buffer;
use crate::backend::pipeline::Pipeline;
use crate::backend::shader::Shader;
use crate::backend::vertex_array::VertexArray as VertexArrayBackend;
use crate::buffer::ElementBuffer;
use crate::context::GraphicsContext;
use crate::shader::Program;
use crate::vertex_array::VertexArray;

/// Stateless renderer.
///
/// It only sequences bindings before a draw call: program first, so that the draw sees its
/// uniforms, then the vertex array, then (for indexed draws) the element buffer, which gets
/// recorded into that vertex array. Draw failures are not reported.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer;

impl Renderer {
  /// Create a renderer.
  pub fn new() -> Self {
    Renderer
  }

  /// Set the color [`Renderer::clear`] fills the framebuffer with.
  pub fn set_clear_color<C>(&self, ctx: &mut C, rgba: [f32; 4])
  where
    C: GraphicsContext,
    C::Backend: Pipeline,
  {
    unsafe { ctx.backend().set_clear_color(rgba) }
  }

  /// Clear the color buffer.
  pub fn clear<C>(&self, ctx: &mut C)
  where
    C: GraphicsContext,
    C::Backend: Pipeline,
  {
    unsafe { ctx.backend().clear() }
  }

  /// Set the viewport, typically after the framebuffer got resized.
  pub fn set_viewport<C>(&self, ctx: &mut C, viewport: [i32; 4])
  where
    C: GraphicsContext,
    C::Backend: Pipeline,
  {
    unsafe { ctx.backend().set_viewport(viewport) }
  }

  /// Draw `element_buffer.count()` indices as triangles.
  pub fn draw_elements<C, B>(
    &self,
    ctx: &mut C,
    vertex_array: &VertexArray<B>,
    element_buffer: &ElementBuffer<B>,
    program: &Program<B>,
  ) where
    C: GraphicsContext<Backend = B>,
    B: ?Sized + Pipeline + Shader + VertexArrayBackend + Buffer,
  {
    program.bind();
    vertex_array.bind();
    element_buffer.bind();

    unsafe { ctx.backend().draw_elements(element_buffer.count()) }
  }

  /// Draw vertices `[first, first + count)` as triangles.
  pub fn draw_arrays<C, B>(
    &self,
    ctx: &mut C,
    vertex_array: &VertexArray<B>,
    first: usize,
    count: usize,
    program: &Program<B>,
  ) where
    C: GraphicsContext<Backend = B>,
    B: ?Sized + Pipeline + Shader + VertexArrayBackend,
  {
    program.bind();
    vertex_array.bind();

    unsafe { ctx.backend().draw_arrays(first, count) }
  }
}
