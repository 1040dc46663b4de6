//! OpenGL buffer implementation.

use crate::gl33::{state::GLState, GL33};
use gl::types::*;
use lantern::backend::buffer::{Buffer, BufferError, BufferTarget};
use std::{cell::RefCell, rc::Rc};

/// Wrapped OpenGL buffer.
///
/// Used to drop the buffer.
#[derive(Debug)]
pub struct BufferWrapper {
  handle: GLuint,
  target: BufferTarget,
  state: Rc<RefCell<GLState>>,
}

impl Drop for BufferWrapper {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteBuffers(1, &self.handle);
    }
  }
}

fn gl_target(target: BufferTarget) -> GLenum {
  match target {
    BufferTarget::Array => gl::ARRAY_BUFFER,
    BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
  }
}

unsafe impl Buffer for GL33 {
  type BufferRepr = BufferWrapper;

  unsafe fn new_buffer(
    &mut self,
    target: BufferTarget,
    bytes: &[u8],
  ) -> Result<Self::BufferRepr, BufferError> {
    let mut handle: GLuint = 0;

    gl::GenBuffers(1, &mut handle);

    if handle == 0 {
      return Err(BufferError::CannotCreate(target));
    }

    self.state.borrow_mut().bind_buffer(target, handle);

    gl::BufferData(
      gl_target(target),
      bytes.len() as isize,
      bytes.as_ptr() as _,
      gl::STATIC_DRAW,
    );

    Ok(BufferWrapper {
      handle,
      target,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_buffer(buffer: &Self::BufferRepr) {
    buffer
      .state
      .borrow_mut()
      .bind_buffer(buffer.target, buffer.handle);
  }

  unsafe fn unbind_buffer(buffer: &Self::BufferRepr) {
    buffer.state.borrow_mut().bind_buffer(buffer.target, 0);
  }

  unsafe fn buffer_handle(buffer: &Self::BufferRepr) -> u32 {
    buffer.handle
  }
}
