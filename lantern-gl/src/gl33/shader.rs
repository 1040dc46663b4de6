//! OpenGL shader implementation.

use crate::gl33::{state::GLState, GL33};
use gl::types::*;
use lantern::backend::shader::{Shader, StageError, StageType, UniformValue};
use std::{
  cell::RefCell,
  ffi::CString,
  ptr::{null, null_mut},
  rc::Rc,
};

#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

#[derive(Debug)]
pub struct Program {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    // deleting program 0 is a no-op
    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

fn gl_stage_type(ty: StageType) -> GLenum {
  match ty {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

// Turn a raw info log into a string; the driver includes the terminating NUL in the length.
fn info_log(mut log: Vec<u8>) -> String {
  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).into_owned()
}

unsafe fn shader_info_log(handle: GLuint) -> String {
  let mut log_len: GLint = 0;
  gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

  let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
  gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

  info_log(log)
}

unsafe fn program_info_log(handle: GLuint) -> String {
  let mut log_len: GLint = 0;
  gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

  let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
  gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

  info_log(log)
}

unsafe fn program_status(handle: GLuint, status: GLenum) -> Result<(), String> {
  let mut ok: GLint = gl::FALSE.into();
  gl::GetProgramiv(handle, status, &mut ok);

  if ok == gl::TRUE.into() {
    Ok(())
  } else {
    Err(program_info_log(handle))
  }
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let handle = gl::CreateShader(gl_stage_type(ty));

    if handle == 0 {
      return Err(StageError::CannotCreate(ty));
    }

    let c_src = match CString::new(src.as_bytes()) {
      Ok(c_src) => c_src,
      Err(_) => {
        gl::DeleteShader(handle);
        return Err(StageError::compilation_failed(
          ty,
          "source contains a NUL byte",
        ));
      }
    };

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle, ty })
    } else {
      let log = shader_info_log(handle);
      gl::DeleteShader(handle);

      Err(StageError::compilation_failed(ty, log))
    }
  }

  unsafe fn new_program(&mut self) -> Self::ProgramRepr {
    Program {
      handle: gl::CreateProgram(),
      state: self.state.clone(),
    }
  }

  unsafe fn attach_stage(program: &Self::ProgramRepr, stage: &Self::StageRepr) {
    log::trace!("attaching {} {} to program {}", stage.ty, stage.handle, program.handle);
    gl::AttachShader(program.handle, stage.handle);
  }

  unsafe fn link_program(program: &Self::ProgramRepr) -> Result<(), String> {
    gl::LinkProgram(program.handle);
    program_status(program.handle, gl::LINK_STATUS)
  }

  unsafe fn validate_program(program: &Self::ProgramRepr) -> Result<(), String> {
    gl::ValidateProgram(program.handle);
    program_status(program.handle, gl::VALIDATE_STATUS)
  }

  unsafe fn discard_program(program: &mut Self::ProgramRepr) {
    gl::DeleteProgram(program.handle);
    program.handle = 0;
  }

  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32 {
    program.handle
  }

  unsafe fn use_program(program: &Self::ProgramRepr) {
    program.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn unuse_program(program: &Self::ProgramRepr) {
    program.state.borrow_mut().use_program(0);
  }

  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> i32 {
    match CString::new(name.as_bytes()) {
      Ok(c_name) => gl::GetUniformLocation(program.handle, c_name.as_ptr() as *const GLchar),
      Err(_) => -1,
    }
  }

  unsafe fn set_uniform(_: &Self::ProgramRepr, location: i32, value: UniformValue) {
    match value {
      UniformValue::Int(x) => gl::Uniform1i(location, x),
      UniformValue::Float(x) => gl::Uniform1f(location, x),
      UniformValue::Vec2(v) => gl::Uniform2fv(location, 1, v.as_ptr()),
      UniformValue::Vec3(v) => gl::Uniform3fv(location, 1, v.as_ptr()),
      UniformValue::Vec4(v) => gl::Uniform4fv(location, 1, v.as_ptr()),
      UniformValue::Mat3(m) => gl::UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr() as _),
      UniformValue::Mat4(m) => gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr() as _),
    }
  }
}
