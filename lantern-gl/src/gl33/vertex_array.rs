//! OpenGL vertex array implementation.

use crate::gl33::{state::GLState, GL33};
use gl::types::*;
use lantern::backend::vertex_array::VertexArray;
use lantern::vertex_array::{VertexArrayError, VertexAttrib};
use std::{cell::RefCell, ffi::c_void, ptr, rc::Rc};

/// Wrapped OpenGL vertex array object.
#[derive(Debug)]
pub struct VertexArrayWrapper {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for VertexArrayWrapper {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteVertexArrays(1, &self.handle);
    }
  }
}

unsafe impl VertexArray for GL33 {
  type VertexArrayRepr = VertexArrayWrapper;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let mut handle: GLuint = 0;

    gl::GenVertexArrays(1, &mut handle);

    if handle == 0 {
      return Err(VertexArrayError::CannotCreate);
    }

    Ok(VertexArrayWrapper {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array
      .state
      .borrow_mut()
      .bind_vertex_array(vertex_array.handle);
  }

  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array.state.borrow_mut().bind_vertex_array(0);
  }

  unsafe fn set_vertex_attrib(_: &Self::VertexArrayRepr, attrib: VertexAttrib) {
    gl::VertexAttribPointer(
      attrib.index,
      attrib.components as GLint,
      gl::FLOAT,
      gl::FALSE,
      attrib.stride_bytes() as GLsizei,
      ptr::null::<c_void>().add(attrib.offset_bytes()),
    );

    gl::EnableVertexAttribArray(attrib.index);
  }

  unsafe fn vertex_array_handle(vertex_array: &Self::VertexArrayRepr) -> u32 {
    vertex_array.handle
  }
}
