//! Shader programs.
//!
//! A [`Program`] is built from a vertex and a fragment source, either given inline
//! ([`Program::from_strings`]) or read from files ([`Program::from_files`]). Building never fails:
//! compilation and link problems are logged, recorded as [`Diagnostic`]s and leave the program
//! flagged unusable (see [`Program::is_usable`]). An unusable program has handle `0` and ignores
//! uniform writes.
//!
//! Uniform locations are resolved lazily, once per name, and cached for the lifetime of the
//! program. A name the program does not declare resolves to `-1`; it is reported once and every
//! later write to it is dropped silently.

use crate::backend::shader::Shader;
use crate::context::GraphicsContext;
use crate::linear::{M33, M44, V2, V3, V4};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::{error, fmt};

pub use crate::backend::shader::{StageError, StageType, UniformValue};

/// Something that happened while building or using a [`Program`].
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
  /// A source file could not be read; an empty source was compiled instead.
  SourceUnreadable {
    /// Stage the file was meant for.
    stage: StageType,
    /// Path of the file.
    path: PathBuf,
    /// Reason reported by the file system.
    reason: String,
  },
  /// A stage compiled.
  StageCompiled(StageType),
  /// A stage failed to compile; the stage was discarded.
  StageFailed(StageError),
  /// The program linked.
  Linked,
  /// The program failed to link. The `String` is the linker log.
  LinkFailed(String),
  /// The linked program did not validate against the state at build time. This doesn’t make the
  /// program unusable.
  ValidationFailed(String),
  /// A uniform was asked for but the program has no such active uniform.
  UniformNotFound(String),
}

impl Diagnostic {
  /// Whether this diagnostic reports a problem rather than a success.
  pub fn is_error(&self) -> bool {
    !matches!(*self, Diagnostic::StageCompiled(_) | Diagnostic::Linked)
  }

  fn log(&self) {
    match *self {
      Diagnostic::StageCompiled(_) | Diagnostic::Linked => log::info!("{}", self),
      Diagnostic::ValidationFailed(_) | Diagnostic::UniformNotFound(_) => log::warn!("{}", self),
      _ => log::error!("{}", self),
    }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      Diagnostic::SourceUnreadable {
        stage,
        ref path,
        ref reason,
      } => write!(f, "cannot read {} source {}: {}", stage, path.display(), reason),
      Diagnostic::StageCompiled(stage) => write!(f, "{} compiled", stage),
      Diagnostic::StageFailed(ref e) => write!(f, "{}", e),
      Diagnostic::Linked => f.write_str("shader program linked"),
      Diagnostic::LinkFailed(ref log) => write!(f, "shader program failed to link: {}", log),
      Diagnostic::ValidationFailed(ref log) => {
        write!(f, "shader program failed to validate: {}", log)
      }
      Diagnostic::UniformNotFound(ref name) => write!(f, "uniform {} not found", name),
    }
  }
}

/// Errors that a [`Program`] can generate when looked at strictly.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      ProgramError::LinkFailed(_) => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// A vertex + fragment shader program.
pub struct Program<B>
where
  B: ?Sized + Shader,
{
  repr: B::ProgramRepr,
  vertex_path: Option<PathBuf>,
  fragment_path: Option<PathBuf>,
  usable: bool,
  diagnostics: Vec<Diagnostic>,
  uniform_cache: HashMap<String, i32>,
}

impl<B> Program<B>
where
  B: ?Sized + Shader,
{
  /// Build a program from a vertex and a fragment source file.
  ///
  /// Files are read line by line, each line being appended after a `\n`. An unreadable file is
  /// reported and replaced by an empty source, which then fails to compile.
  pub fn from_files<C, V, F>(ctx: &mut C, vertex_path: V, fragment_path: F) -> Self
  where
    C: GraphicsContext<Backend = B>,
    V: AsRef<Path>,
    F: AsRef<Path>,
  {
    let vertex_path = vertex_path.as_ref();
    let fragment_path = fragment_path.as_ref();
    let mut diagnostics = Vec::new();

    let vs = read_or_report(StageType::VertexShader, vertex_path, &mut diagnostics);
    let fs = read_or_report(StageType::FragmentShader, fragment_path, &mut diagnostics);

    let mut program = Self::build(ctx, &vs, &fs, diagnostics);
    program.vertex_path = Some(vertex_path.to_owned());
    program.fragment_path = Some(fragment_path.to_owned());
    program
  }

  /// Build a program from inline vertex and fragment sources.
  pub fn from_strings<C, V, F>(ctx: &mut C, vertex: V, fragment: F) -> Self
  where
    C: GraphicsContext<Backend = B>,
    V: AsRef<str>,
    F: AsRef<str>,
  {
    Self::build(ctx, vertex.as_ref(), fragment.as_ref(), Vec::new())
  }

  fn build<C>(ctx: &mut C, vs: &str, fs: &str, mut diagnostics: Vec<Diagnostic>) -> Self
  where
    C: GraphicsContext<Backend = B>,
  {
    let backend = ctx.backend();

    unsafe {
      let vertex = compile_stage(backend, StageType::VertexShader, vs, &mut diagnostics);
      let fragment = compile_stage(backend, StageType::FragmentShader, fs, &mut diagnostics);

      let mut repr = backend.new_program();

      for stage in vertex.iter().chain(fragment.iter()) {
        B::attach_stage(&repr, stage);
      }

      let linked = match B::link_program(&repr) {
        Ok(()) => {
          report(&mut diagnostics, Diagnostic::Linked);
          true
        }

        Err(log) => {
          report(&mut diagnostics, Diagnostic::LinkFailed(log));
          false
        }
      };

      if let Err(log) = B::validate_program(&repr) {
        // a program that didn’t link never validates; that’s already reported
        if linked {
          report(&mut diagnostics, Diagnostic::ValidationFailed(log));
        }
      }

      let usable = vertex.is_some() && fragment.is_some() && linked;

      // intermediate stages are released whatever happened
      drop(vertex);
      drop(fragment);

      if !usable {
        B::discard_program(&mut repr);
      }

      Program {
        repr,
        vertex_path: None,
        fragment_path: None,
        usable,
        diagnostics,
        uniform_cache: HashMap::new(),
      }
    }
  }

  /// Whether both stages compiled and the program linked.
  pub fn is_usable(&self) -> bool {
    self.usable
  }

  /// Backend handle; `0` if the program is unusable.
  pub fn handle(&self) -> u32 {
    unsafe { B::program_handle(&self.repr) }
  }

  /// Everything reported while building and using this program, oldest first.
  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  /// Path of the vertex source, if built from files.
  pub fn vertex_path(&self) -> Option<&Path> {
    self.vertex_path.as_deref()
  }

  /// Path of the fragment source, if built from files.
  pub fn fragment_path(&self) -> Option<&Path> {
    self.fragment_path.as_deref()
  }

  /// Turn an unusable program into the error that made it so.
  pub fn into_result(self) -> Result<Self, ProgramError> {
    if self.usable {
      return Ok(self);
    }

    let err = self
      .diagnostics
      .iter()
      .find_map(|d| match *d {
        Diagnostic::StageFailed(ref e) => Some(ProgramError::StageError(e.clone())),
        Diagnostic::LinkFailed(ref log) => Some(ProgramError::LinkFailed(log.clone())),
        _ => None,
      })
      .unwrap_or_else(|| ProgramError::LinkFailed(String::new()));

    Err(err)
  }

  /// Make this program the one in use.
  pub fn bind(&self) {
    unsafe { B::use_program(&self.repr) }
  }

  /// Stop using any program.
  pub fn unbind(&self) {
    unsafe { B::unuse_program(&self.repr) }
  }

  /// Location of the uniform `name`, resolved once and cached; `-1` if the program doesn’t have it.
  ///
  /// The first miss for a name is recorded as [`Diagnostic::UniformNotFound`]; later lookups of
  /// that name hit the cache and report nothing. An unusable program resolves every name to `-1`
  /// without asking the backend.
  pub fn uniform_location(&mut self, name: &str) -> i32 {
    if !self.usable {
      return -1;
    }

    if let Some(&location) = self.uniform_cache.get(name) {
      return location;
    }

    let location = unsafe { B::uniform_location(&self.repr, name) };

    if location == -1 {
      report(
        &mut self.diagnostics,
        Diagnostic::UniformNotFound(name.to_owned()),
      );
    }

    self.uniform_cache.insert(name.to_owned(), location);
    location
  }

  /// Write `value` to the uniform `name` of the program in use.
  ///
  /// Returns whether a write was issued: nothing is written for an unknown name or an unusable
  /// program. Bind the program first.
  pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> bool {
    let location = self.uniform_location(name);

    if location == -1 {
      return false;
    }

    unsafe { B::set_uniform(&self.repr, location, value) };
    true
  }

  /// Set an `int` (or sampler) uniform.
  pub fn set_uniform_1i(&mut self, name: &str, value: i32) -> bool {
    self.set_uniform(name, UniformValue::Int(value))
  }

  /// Set a `float` uniform.
  pub fn set_uniform_1f(&mut self, name: &str, value: f32) -> bool {
    self.set_uniform(name, UniformValue::Float(value))
  }

  /// Set a `vec2` uniform.
  pub fn set_uniform_2f(&mut self, name: &str, value: impl Into<V2>) -> bool {
    self.set_uniform(name, UniformValue::Vec2(value.into()))
  }

  /// Set a `vec3` uniform.
  pub fn set_uniform_3f(&mut self, name: &str, value: impl Into<V3>) -> bool {
    self.set_uniform(name, UniformValue::Vec3(value.into()))
  }

  /// Set a `vec4` uniform.
  pub fn set_uniform_4f(&mut self, name: &str, value: impl Into<V4>) -> bool {
    self.set_uniform(name, UniformValue::Vec4(value.into()))
  }

  /// Set a `mat3` uniform from a column-major matrix.
  pub fn set_uniform_mat3(&mut self, name: &str, matrix: impl Into<M33>) -> bool {
    self.set_uniform(name, UniformValue::Mat3(matrix.into()))
  }

  /// Set a `mat4` uniform from a column-major matrix.
  pub fn set_uniform_mat4(&mut self, name: &str, matrix: impl Into<M44>) -> bool {
    self.set_uniform(name, UniformValue::Mat4(matrix.into()))
  }
}

/// Read a shader source file the way programs expect it: every line is appended after a `\n`.
///
/// Line terminators (`\n` or `\r\n`) are not kept, so the result starts with a newline and never
/// ends with one.
pub fn read_source(path: impl AsRef<Path>) -> io::Result<String> {
  let reader = BufReader::new(File::open(path)?);
  let mut source = String::new();

  for line in reader.lines() {
    source.push('\n');
    source.push_str(&line?);
  }

  Ok(source)
}

fn read_or_report(stage: StageType, path: &Path, diagnostics: &mut Vec<Diagnostic>) -> String {
  read_source(path).unwrap_or_else(|e| {
    report(
      diagnostics,
      Diagnostic::SourceUnreadable {
        stage,
        path: path.to_owned(),
        reason: e.to_string(),
      },
    );

    String::new()
  })
}

unsafe fn compile_stage<B>(
  backend: &mut B,
  ty: StageType,
  src: &str,
  diagnostics: &mut Vec<Diagnostic>,
) -> Option<B::StageRepr>
where
  B: ?Sized + Shader,
{
  match backend.new_stage(ty, src) {
    Ok(stage) => {
      report(diagnostics, Diagnostic::StageCompiled(ty));
      Some(stage)
    }

    Err(e) => {
      report(diagnostics, Diagnostic::StageFailed(e));
      None
    }
  }
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
  diagnostic.log();
  diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use std::sync::atomic::{AtomicUsize, Ordering};

  static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

  fn temp_file(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
      "lantern-shader-{}-{}.glsl",
      std::process::id(),
      NEXT_FILE.fetch_add(1, Ordering::Relaxed)
    ));
    fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn every_line_gets_a_leading_newline() {
    let path = temp_file("#version 330 core\nvoid main() {}\n");
    let source = read_source(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(source, "\n#version 330 core\nvoid main() {}");
  }

  #[test]
  fn missing_trailing_newline_reads_the_same() {
    let path = temp_file("a\nb");
    let source = read_source(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(source, "\na\nb");
  }

  #[test]
  fn crlf_terminators_are_dropped() {
    let path = temp_file("a\r\nb\r\n");
    let source = read_source(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(source, "\na\nb");
  }

  #[test]
  fn empty_file_is_empty_source() {
    let path = temp_file("");
    let source = read_source(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(source.is_empty());
  }

  #[test]
  fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("lantern-shader-does-not-exist.glsl");
    assert!(read_source(&path).is_err());
  }

  #[test]
  fn diagnostics_split_successes_from_problems() {
    assert!(!Diagnostic::Linked.is_error());
    assert!(!Diagnostic::StageCompiled(StageType::VertexShader).is_error());
    assert!(Diagnostic::UniformNotFound("u_Color".to_owned()).is_error());
    assert!(Diagnostic::LinkFailed(String::new()).is_error());
  }

  #[test]
  fn stage_error_display_names_the_stage() {
    let e = StageError::compilation_failed(StageType::FragmentShader, "0:3: error");
    assert_eq!(e.to_string(), "fragment shader compilation error: 0:3: error");
    assert_eq!(e.stage_type(), StageType::FragmentShader);
  }
}
