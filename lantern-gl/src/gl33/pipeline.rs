//! OpenGL draw and framebuffer implementation.

use crate::gl33::GL33;
use gl::types::*;
use lantern::backend::pipeline::Pipeline;
use std::ptr;

unsafe impl Pipeline for GL33 {
  unsafe fn set_clear_color(&mut self, rgba: [f32; 4]) {
    self.state.borrow_mut().set_clear_color(rgba);
  }

  unsafe fn clear(&mut self) {
    gl::Clear(gl::COLOR_BUFFER_BIT);
  }

  unsafe fn set_viewport(&mut self, viewport: [i32; 4]) {
    self.state.borrow_mut().set_viewport(viewport);
  }

  unsafe fn draw_elements(&mut self, count: usize) {
    gl::DrawElements(
      gl::TRIANGLES,
      count as GLsizei,
      gl::UNSIGNED_INT,
      ptr::null(),
    );
  }

  unsafe fn draw_arrays(&mut self, first: usize, count: usize) {
    gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei);
  }
}
