use crate::glsl;
use crate::state::{Call, HeadlessState, ProgramRecord, StageRecord};
use crate::Headless;
use lantern::backend::shader::{Shader, StageError, StageType, UniformValue};
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// A recorded shader stage.
#[derive(Debug)]
pub struct HeadlessStage {
  handle: u32,
  state: Rc<RefCell<HeadlessState>>,
}

impl Drop for HeadlessStage {
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();
    state.stages.remove(&self.handle);
    state.record(Call::DeleteShader(self.handle));
  }
}

/// A recorded program.
#[derive(Debug)]
pub struct HeadlessProgram {
  handle: u32,
  state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessProgram {
  fn delete(&mut self) {
    if self.handle == 0 {
      return;
    }

    let mut state = self.state.borrow_mut();
    state.programs.remove(&self.handle);
    state.record(Call::DeleteProgram(self.handle));
    self.handle = 0;
  }
}

impl Drop for HeadlessProgram {
  fn drop(&mut self) {
    self.delete();
  }
}

// Resolve the active uniforms of the attached stages, in order of declaration.
fn link(state: &HeadlessState, attached: &[u32]) -> Result<HashMap<String, i32>, String> {
  let stages: Vec<&StageRecord> = attached
    .iter()
    .filter_map(|handle| state.stages.get(handle))
    .collect();

  for &ty in &[StageType::VertexShader, StageType::FragmentShader] {
    if !stages.iter().any(|stage| stage.ty == ty) {
      return Err(format!("error: no {} attached", ty));
    }
  }

  let mut locations = HashMap::new();

  for uniform in stages.iter().flat_map(|stage| stage.uniforms.iter()) {
    if uniform.used && !locations.contains_key(&uniform.name) {
      let location = locations.len() as i32;
      locations.insert(uniform.name.clone(), location);
    }
  }

  Ok(locations)
}

unsafe impl Shader for Headless {
  type StageRepr = HeadlessStage;

  type ProgramRepr = HeadlessProgram;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let mut state = self.state.borrow_mut();
    let handle = state.gen_shader();

    state.record(Call::CreateShader { ty, handle });
    state.record(Call::CompileShader(handle));

    match glsl::check(src) {
      Ok(uniforms) => {
        state.stages.insert(handle, StageRecord { ty, uniforms });

        Ok(HeadlessStage {
          handle,
          state: self.state.clone(),
        })
      }

      Err(log) => {
        state.record(Call::DeleteShader(handle));
        Err(StageError::compilation_failed(ty, log))
      }
    }
  }

  unsafe fn new_program(&mut self) -> Self::ProgramRepr {
    let mut state = self.state.borrow_mut();
    let handle = state.gen_shader();

    state.programs.insert(handle, ProgramRecord::default());
    state.record(Call::CreateProgram(handle));

    HeadlessProgram {
      handle,
      state: self.state.clone(),
    }
  }

  unsafe fn attach_stage(program: &Self::ProgramRepr, stage: &Self::StageRepr) {
    let mut state = program.state.borrow_mut();

    if let Some(record) = state.programs.get_mut(&program.handle) {
      record.attached.push(stage.handle);
    }

    state.record(Call::AttachShader {
      program: program.handle,
      shader: stage.handle,
    });
  }

  unsafe fn link_program(program: &Self::ProgramRepr) -> Result<(), String> {
    let mut state = program.state.borrow_mut();
    state.record(Call::LinkProgram(program.handle));

    let attached = match state.programs.get(&program.handle) {
      Some(record) => record.attached.clone(),
      None => return Err("error: invalid program".to_owned()),
    };

    let result = link(&state, &attached);

    if let Some(record) = state.programs.get_mut(&program.handle) {
      match result {
        Ok(locations) => {
          record.linked = true;
          record.locations = locations;
          return Ok(());
        }

        Err(log) => {
          record.linked = false;
          record.locations.clear();
          return Err(log);
        }
      }
    }

    Err("error: invalid program".to_owned())
  }

  unsafe fn validate_program(program: &Self::ProgramRepr) -> Result<(), String> {
    let mut state = program.state.borrow_mut();
    state.record(Call::ValidateProgram(program.handle));

    match state.programs.get(&program.handle) {
      Some(record) if record.linked => Ok(()),
      _ => Err("error: program not successfully linked".to_owned()),
    }
  }

  unsafe fn discard_program(program: &mut Self::ProgramRepr) {
    program.delete();
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
    let mut state = program.state.borrow_mut();

    state.record(Call::GetUniformLocation {
      program: program.handle,
      name: name.to_owned(),
    });

    state
      .programs
      .get(&program.handle)
      .and_then(|record| record.locations.get(name))
      .cloned()
      .unwrap_or(-1)
  }

  unsafe fn set_uniform(program: &Self::ProgramRepr, location: i32, value: UniformValue) {
    let mut state = program.state.borrow_mut();
    let current = state.current_program();

    state.record(Call::Uniform {
      program: current,
      location,
      value,
    });
  }
}
