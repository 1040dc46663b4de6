use crate::state::{Call, HeadlessState};
use crate::Headless;
use lantern::backend::vertex_array::VertexArray;
use lantern::vertex_array::{VertexArrayError, VertexAttrib};
use std::{cell::RefCell, rc::Rc};

/// A recorded vertex array.
#[derive(Debug)]
pub struct HeadlessVertexArray {
  handle: u32,
  state: Rc<RefCell<HeadlessState>>,
}

impl Drop for HeadlessVertexArray {
  fn drop(&mut self) {
    self
      .state
      .borrow_mut()
      .record(Call::DeleteVertexArray(self.handle));
  }
}

unsafe impl VertexArray for Headless {
  type VertexArrayRepr = HeadlessVertexArray;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let mut state = self.state.borrow_mut();
    let handle = state.gen_vertex_array();
    state.record(Call::CreateVertexArray(handle));

    Ok(HeadlessVertexArray {
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

  unsafe fn set_vertex_attrib(vertex_array: &Self::VertexArrayRepr, attrib: VertexAttrib) {
    let mut state = vertex_array.state.borrow_mut();

    // attributes land in whatever vertex array is bound
    let bound = state.bound_vertex_array();
    state.record(Call::VertexAttrib {
      vertex_array: bound,
      index: attrib.index,
      components: attrib.components,
      stride: attrib.stride,
      offset: attrib.offset,
    });
  }

  unsafe fn vertex_array_handle(vertex_array: &Self::VertexArrayRepr) -> u32 {
    vertex_array.handle
  }
}
