//! Graphics state.

use gl::types::*;
use lantern::backend::buffer::BufferTarget;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

// 16 is the platform minimal requirement for fragment texture units.
const MIN_TEXTURE_UNITS: usize = 16;

/// Cached value.
///
/// A cached value is used to prevent issuing GPU commands if we know the target value is already
/// set to what the command tries to set.
///
/// Only plain values are cached. Object bindings are always issued, since the driver silently
/// resets a binding when the bound object gets deleted and may hand the same name out again.
#[derive(Debug)]
struct Cached<T>(T)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn new(initial: T) -> Self {
    Cached(initial)
  }

  fn set(&mut self, value: T) {
    self.0 = value;
  }

  /// Whether `new_val` differs from the cached value.
  fn is_invalid(&self, new_val: &T) -> bool {
    self.0 != *new_val
  }
}

/// The graphics state.
///
/// This type mirrors the bindings of the current OpenGL context. Every binding change goes through
/// it so that lantern can answer binding queries without round-tripping to the driver.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  // viewport
  viewport: Cached<[GLint; 4]>,

  // clear buffers
  clear_color: Cached<[GLfloat; 4]>,

  // texture
  current_texture_unit: GLuint,
  bound_textures: Vec<GLuint>,

  // array buffer
  bound_array_buffer: GLuint,

  // element buffer
  bound_element_array_buffer: GLuint,

  // vertex array
  bound_vertex_array: GLuint,

  // shader program
  current_program: GLuint,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Self::get_from_context()
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }

  /// Get a `GLState` from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let viewport = Cached::new(get_ctx_viewport()?);
      let clear_color = Cached::new(get_ctx_clear_color()?);
      let current_texture_unit = get_ctx_current_texture_unit()?;
      let bound_textures = vec![0; MIN_TEXTURE_UNITS];
      let bound_array_buffer = get_ctx_bound_buffer(gl::ARRAY_BUFFER_BINDING)?;
      let bound_element_array_buffer = get_ctx_bound_buffer(gl::ELEMENT_ARRAY_BUFFER_BINDING)?;
      let bound_vertex_array = get_ctx_bound_vertex_array()?;
      let current_program = get_ctx_current_program()?;

      Ok(GLState {
        _a: PhantomData,
        viewport,
        clear_color,
        current_texture_unit,
        bound_textures,
        bound_array_buffer,
        bound_element_array_buffer,
        bound_vertex_array,
        current_program,
      })
    }
  }

  pub(crate) fn current_program(&self) -> GLuint {
    self.current_program
  }

  pub(crate) fn bound_vertex_array(&self) -> GLuint {
    self.bound_vertex_array
  }

  pub(crate) fn bound_buffer(&self, target: BufferTarget) -> GLuint {
    match target {
      BufferTarget::Array => self.bound_array_buffer,
      BufferTarget::ElementArray => self.bound_element_array_buffer,
    }
  }

  pub(crate) fn active_texture_unit(&self) -> GLuint {
    self.current_texture_unit
  }

  pub(crate) fn bound_texture(&self, unit: u32) -> GLuint {
    self.bound_textures.get(unit as usize).cloned().unwrap_or(0)
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.is_invalid(&viewport) {
      gl::Viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
      self.viewport.set(viewport);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn set_texture_unit(&mut self, unit: u32) {
    gl::ActiveTexture(gl::TEXTURE0 + unit);
    self.current_texture_unit = unit;
  }

  pub(crate) unsafe fn bind_texture(&mut self, handle: GLuint) {
    let unit = self.current_texture_unit as usize;

    gl::BindTexture(gl::TEXTURE_2D, handle);

    if unit >= self.bound_textures.len() {
      // not enough registered texture units; let’s grow a bit more
      self.bound_textures.resize(unit + 1, 0);
    }

    self.bound_textures[unit] = handle;
  }

  pub(crate) unsafe fn bind_buffer(&mut self, target: BufferTarget, handle: GLuint) {
    match target {
      BufferTarget::Array => {
        gl::BindBuffer(gl::ARRAY_BUFFER, handle);
        self.bound_array_buffer = handle;
      }

      BufferTarget::ElementArray => {
        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, handle);
        self.bound_element_array_buffer = handle;
      }
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint) {
    gl::BindVertexArray(handle);
    self.bound_vertex_array = handle;
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    gl::UseProgram(handle);
    self.current_program = handle;
  }
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
  /// Corrupted active texture unit.
  UnknownTextureUnit(GLenum),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::UnknownTextureUnit(ref u) => write!(f, "unknown texture unit: {}", u),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_viewport() -> Result<[GLint; 4], StateQueryError> {
  let mut data = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, data.as_mut_ptr());
  Ok(data)
}

unsafe fn get_ctx_clear_color() -> Result<[GLfloat; 4], StateQueryError> {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  Ok(data)
}

unsafe fn get_ctx_current_texture_unit() -> Result<GLuint, StateQueryError> {
  let mut active_texture = gl::TEXTURE0 as GLint;
  gl::GetIntegerv(gl::ACTIVE_TEXTURE, &mut active_texture);

  let active_texture = active_texture as GLenum;
  active_texture
    .checked_sub(gl::TEXTURE0)
    .ok_or(StateQueryError::UnknownTextureUnit(active_texture))
}

unsafe fn get_ctx_bound_buffer(binding: GLenum) -> Result<GLuint, StateQueryError> {
  let mut bound = 0 as GLint;
  gl::GetIntegerv(binding, &mut bound);
  Ok(bound as GLuint)
}

unsafe fn get_ctx_bound_vertex_array() -> Result<GLuint, StateQueryError> {
  let mut bound = 0 as GLint;
  gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut bound);
  Ok(bound as GLuint)
}

unsafe fn get_ctx_current_program() -> Result<GLuint, StateQueryError> {
  let mut used = 0 as GLint;
  gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut used);
  Ok(used as GLuint)
}
