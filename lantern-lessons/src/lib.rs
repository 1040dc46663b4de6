//! lantern lessons.
//!
//! Each module of this crate is one step of a classic OpenGL tutorial, rewritten on top of
//! lantern: a first triangle, an indexed rectangle, shaders read from files, a textured and
//! transformed quad, and finally a fly-through camera.
//!
//! # Lesson architecture
//!
//! Lessons don’t know about windows or system events. They allocate their resources in
//! [`Lesson::bootstrap`], get abstract [`InputAction`]s every frame and tell the runner whether to
//! keep going with [`LoopFeedback`]. Anything they need from the outside world (shader files,
//! decoded images) goes through [`PlatformServices`].
//!
//! Lessons are generic over the lantern backend, so the very same code runs on the OpenGL backend
//! in the `lantern-lessons` binary and on the headless backend in tests.

pub mod camera;
pub mod fly_camera;
pub mod hello_triangle;
pub mod indexed_quad;
pub mod platform;
pub mod shader_files;
mod shared;
pub mod textured_quad;

use lantern::backend::Backend;
use lantern::buffer::BufferError;
use lantern::context::GraphicsContext;
use lantern::texture::{Texels, TextureError};
use lantern::vertex_array::VertexArrayError;
use std::path::PathBuf;
use std::{error, fmt};

/// Lesson interface.
pub trait Lesson<B>: Sized
where
  B: ?Sized + Backend,
{
  /// Platform features the lesson needs.
  fn features() -> Features;

  /// Allocate the lesson’s resources.
  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, LessonError>;

  /// Render a frame of the lesson.
  ///
  /// `time` is the number of seconds elapsed since the lesson started.
  fn render_frame(
    self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> LoopFeedback<Self>;
}

/// A type used to pass “inputs” to lessons.
#[derive(Clone, Debug, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Move forward.
  Forward,

  /// Move backward.
  Backward,

  /// Strafe left.
  Left,

  /// Strafe right.
  Right,

  /// Cursor moved to a new position, in window coordinates.
  CursorMoved { x: f32, y: f32 },

  /// Vertical scroll.
  VScroll { amount: f32 },

  /// Framebuffer size changed.
  Resized { width: u32, height: u32 },
}

/// Whether a lesson wants to keep running.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback<T> {
  /// Keep going with the new lesson state.
  Continue(T),

  /// Stop the lesson.
  Exit,
}

/// Platform features required by a lesson.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Features {
  textures: Vec<String>,
  cursor_captured: bool,
}

impl Features {
  /// No feature.
  pub fn none() -> Self {
    Self::default()
  }

  /// Require a texture, by name.
  pub fn texture(mut self, name: impl Into<String>) -> Self {
    self.textures.push(name.into());
    self
  }

  /// Require the cursor to be captured by the window.
  pub fn capture_cursor(self) -> Self {
    Features {
      cursor_captured: true,
      ..self
    }
  }

  /// Required textures.
  pub fn textures(&self) -> &[String] {
    &self.textures
  }

  /// Whether the cursor must be captured.
  pub fn cursor_captured(&self) -> bool {
    self.cursor_captured
  }
}

/// Services a platform provides to lessons.
pub trait PlatformServices {
  /// Error that might happen while fetching resources.
  type FetchError: error::Error;

  /// Fetch a decoded texture by name.
  fn fetch_texture(&mut self, name: &str) -> Result<&Texels, Self::FetchError>;

  /// Path of the shader source file named `name`.
  fn shader_path(&self, name: &str) -> PathBuf;
}

/// Errors that can stop a lesson from bootstrapping.
///
/// Shader problems are not part of it: programs are always built and report their own
/// diagnostics.
#[non_exhaustive]
#[derive(Debug)]
pub enum LessonError {
  /// A buffer could not be created.
  Buffer(BufferError),
  /// A vertex array could not be created.
  VertexArray(VertexArrayError),
  /// A texture could not be created.
  Texture(TextureError),
}

impl fmt::Display for LessonError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      LessonError::Buffer(ref e) => write!(f, "buffer error: {}", e),
      LessonError::VertexArray(ref e) => write!(f, "vertex array error: {}", e),
      LessonError::Texture(ref e) => write!(f, "texture error: {}", e),
    }
  }
}

impl error::Error for LessonError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      LessonError::Buffer(e) => Some(e),
      LessonError::VertexArray(e) => Some(e),
      LessonError::Texture(e) => Some(e),
    }
  }
}

impl From<BufferError> for LessonError {
  fn from(e: BufferError) -> Self {
    LessonError::Buffer(e)
  }
}

impl From<VertexArrayError> for LessonError {
  fn from(e: VertexArrayError) -> Self {
    LessonError::VertexArray(e)
  }
}

impl From<TextureError> for LessonError {
  fn from(e: TextureError) -> Self {
    LessonError::Texture(e)
  }
}
