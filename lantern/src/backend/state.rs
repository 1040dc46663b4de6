//! Binding state queries.

use crate::backend::buffer::BufferTarget;

/// Read access to the bindings a backend tracks.
///
/// `0` means “nothing bound”. Values reflect what was last bound, even if the bound object has
/// since been dropped.
pub trait BindingQuery {
  /// Handle of the program in use.
  fn current_program(&self) -> u32;

  /// Handle of the bound vertex array.
  fn bound_vertex_array(&self) -> u32;

  /// Handle of the buffer bound to `target`.
  fn bound_buffer(&self, target: BufferTarget) -> u32;

  /// Index of the active texture unit.
  fn active_texture_unit(&self) -> u32;

  /// Handle of the 2D texture bound to `unit`.
  fn bound_texture(&self, unit: u32) -> u32;
}
