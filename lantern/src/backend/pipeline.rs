//! Draw and framebuffer backend.

/// Framebuffer clearing and draw call submission.
///
/// Draw calls use whatever program, vertex array and element buffer are currently bound.
pub unsafe trait Pipeline {
  /// Set the color used by [`Pipeline::clear`].
  unsafe fn set_clear_color(&mut self, rgba: [f32; 4]);

  /// Clear the color buffer of the bound framebuffer.
  unsafe fn clear(&mut self);

  /// Set the viewport rectangle (`x`, `y`, `width`, `height`).
  unsafe fn set_viewport(&mut self, viewport: [i32; 4]);

  /// Draw `count` `u32` indices from the bound element buffer as a triangle list.
  unsafe fn draw_elements(&mut self, count: usize);

  /// Draw vertices `[first, first + count)` of the bound vertex array as a triangle list.
  unsafe fn draw_arrays(&mut self, first: usize, count: usize);
}
