use crate::state::{Call, HeadlessState};
use crate::Headless;
use lantern::backend::buffer::{Buffer, BufferError, BufferTarget};
use std::{cell::RefCell, rc::Rc};

/// A recorded buffer.
#[derive(Debug)]
pub struct HeadlessBuffer {
  handle: u32,
  target: BufferTarget,
  state: Rc<RefCell<HeadlessState>>,
}

impl Drop for HeadlessBuffer {
  fn drop(&mut self) {
    self
      .state
      .borrow_mut()
      .record(Call::DeleteBuffer(self.handle));
  }
}

unsafe impl Buffer for Headless {
  type BufferRepr = HeadlessBuffer;

  unsafe fn new_buffer(
    &mut self,
    target: BufferTarget,
    bytes: &[u8],
  ) -> Result<Self::BufferRepr, BufferError> {
    let mut state = self.state.borrow_mut();
    let handle = state.gen_buffer();

    state.record(Call::CreateBuffer {
      target,
      handle,
      size: bytes.len(),
    });
    state.bind_buffer(target, handle);

    Ok(HeadlessBuffer {
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
