//! Shader backend.

use crate::linear::{M33, M44, V2, V3, V4};
use std::{error, fmt};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile. The `String` is the compiler log.
  CompilationFailed(StageType, String),
  /// Occurs when the backend cannot even create a stage object of that type.
  CannotCreate(StageType),
}

impl StageError {
  /// Create a compilation failure from a compiler log.
  pub fn compilation_failed(ty: StageType, log: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, log.into())
  }

  /// Stage type this error is about.
  pub fn stage_type(&self) -> StageType {
    match *self {
      StageError::CompilationFailed(ty, _) | StageError::CannotCreate(ty) => ty,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
      StageError::CannotCreate(ty) => write!(f, "cannot create {}", ty),
    }
  }
}

impl error::Error for StageError {}

/// A value written to a uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
  /// `int` (also used for sampler units).
  Int(i32),
  /// `float`.
  Float(f32),
  /// `vec2`.
  Vec2(V2),
  /// `vec3`.
  Vec3(V3),
  /// `vec4`.
  Vec4(V4),
  /// `mat3`, column-major.
  Mat3(M33),
  /// `mat4`, column-major.
  Mat4(M44),
}

/// Shader backend.
///
/// Programs are built in the same order as the API they model: create, attach stages, link,
/// validate. Link failures are reported but never destroy the program by themselves; the caller
/// decides with [`Shader::discard_program`].
pub unsafe trait Shader {
  /// Backend representation of a compiled stage. Dropping it deletes the stage object.
  type StageRepr;

  /// Backend representation of a program. Dropping it deletes the program object.
  type ProgramRepr;

  /// Create a stage of type `ty` and compile `src` into it.
  ///
  /// A stage that fails to compile is deleted before the error is returned.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Create an empty program object.
  unsafe fn new_program(&mut self) -> Self::ProgramRepr;

  /// Attach a compiled stage to a program.
  unsafe fn attach_stage(program: &Self::ProgramRepr, stage: &Self::StageRepr);

  /// Link a program. On failure, the linker log is returned.
  unsafe fn link_program(program: &Self::ProgramRepr) -> Result<(), String>;

  /// Validate a program against the current state. On failure, the validation log is returned.
  unsafe fn validate_program(program: &Self::ProgramRepr) -> Result<(), String>;

  /// Delete the program object now and make the representation refer to no program (handle `0`).
  unsafe fn discard_program(program: &mut Self::ProgramRepr);

  /// Backend handle of the program; `0` once discarded.
  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32;

  /// Make `program` the program in use.
  unsafe fn use_program(program: &Self::ProgramRepr);

  /// Stop using any program.
  unsafe fn unuse_program(program: &Self::ProgramRepr);

  /// Query the location of a uniform in `program`; `-1` if the program has no such active uniform.
  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> i32;

  /// Write `value` at `location` of the program currently in use.
  ///
  /// `program` only gives access to the backend state; as with the modeled API, the write lands in
  /// whatever program is bound.
  unsafe fn set_uniform(program: &Self::ProgramRepr, location: i32, value: UniformValue);
}
