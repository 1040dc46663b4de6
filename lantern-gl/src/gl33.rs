//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for lantern. The backend type is [`GL33`].

mod buffer;
mod pipeline;
mod shader;
mod state;
mod texture;
mod vertex_array;

use self::state::GLState;
pub use self::state::StateQueryError;
use lantern::backend::{buffer::BufferTarget, state::BindingQuery};
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// This type is to be used as a lantern backend type. It implements the whole backend API.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// The OpenGL context must be current and its function pointers loaded. Only one backend can
  /// exist per thread.
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }
}

impl BindingQuery for GL33 {
  fn current_program(&self) -> u32 {
    self.state.borrow().current_program()
  }

  fn bound_vertex_array(&self) -> u32 {
    self.state.borrow().bound_vertex_array()
  }

  fn bound_buffer(&self, target: BufferTarget) -> u32 {
    self.state.borrow().bound_buffer(target)
  }

  fn active_texture_unit(&self) -> u32 {
    self.state.borrow().active_texture_unit()
  }

  fn bound_texture(&self, unit: u32) -> u32 {
    self.state.borrow().bound_texture(unit)
  }
}
