//! Headless backend for lantern.
//!
//! [`Headless`] implements every lantern backend trait without a GPU. It keeps the bindings a real
//! driver would keep, checks shader sources well enough to reject the usual mistakes, resolves
//! uniform locations the way a linker does and records each call it receives as a [`Call`].
//!
//! It exists so that code written against lantern can be tested without a window:
//!
//! ```
//! use lantern::shader::Program;
//! use lantern_headless::HeadlessContext;
//!
//! let mut ctx = HeadlessContext::new();
//! let program = Program::from_strings(
//!   &mut ctx,
//!   "void main() {\n  gl_Position = vec4(0.0);\n}",
//!   "out vec4 c;\nvoid main() {\n  c = vec4(1.0);\n}",
//! );
//!
//! program.bind();
//! assert_eq!(ctx.state().current_program(), program.handle());
//! ```

#![deny(missing_docs)]

mod buffer;
mod glsl;
mod pipeline;
mod shader;
mod state;
mod texture;
mod vertex_array;

pub use crate::state::{Call, HeadlessState};
use lantern::backend::buffer::BufferTarget;
use lantern::backend::state::BindingQuery;
use lantern::context::GraphicsContext;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// The headless backend.
#[derive(Debug)]
pub struct Headless {
  pub(crate) state: Rc<RefCell<HeadlessState>>,
}

impl Headless {
  /// Create a backend with no bindings and an empty call log.
  pub fn new() -> Self {
    Headless {
      state: Rc::new(RefCell::new(HeadlessState::new())),
    }
  }

  /// Recorded state.
  pub fn state(&self) -> Ref<HeadlessState> {
    self.state.borrow()
  }
}

impl Default for Headless {
  fn default() -> Self {
    Self::new()
  }
}

impl BindingQuery for Headless {
  fn current_program(&self) -> u32 {
    self.state().current_program()
  }

  fn bound_vertex_array(&self) -> u32 {
    self.state().bound_vertex_array()
  }

  fn bound_buffer(&self, target: BufferTarget) -> u32 {
    self.state().bound_buffer(target)
  }

  fn active_texture_unit(&self) -> u32 {
    self.state().active_texture_unit()
  }

  fn bound_texture(&self, unit: u32) -> u32 {
    self.state().bound_texture(unit)
  }
}

/// Graphics context over a [`Headless`] backend.
///
/// Unlike windowed contexts, any number of them can live on a thread; each has its own state.
#[derive(Debug, Default)]
pub struct HeadlessContext {
  backend: Headless,
}

impl HeadlessContext {
  /// Create a context with a fresh backend.
  pub fn new() -> Self {
    HeadlessContext {
      backend: Headless::new(),
    }
  }

  /// Recorded state of the backend.
  pub fn state(&self) -> Ref<HeadlessState> {
    self.backend.state()
  }

  /// Copy of the call log.
  pub fn calls(&self) -> Vec<Call> {
    self.backend.state().calls().to_vec()
  }

  /// Forget the calls received so far.
  pub fn clear_calls(&mut self) {
    self.backend.state.borrow_mut().clear_calls();
  }
}

unsafe impl GraphicsContext for HeadlessContext {
  type Backend = Headless;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}
