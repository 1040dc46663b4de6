//! Recorded state.

use crate::glsl::UniformDecl;
use lantern::backend::buffer::BufferTarget;
use lantern::backend::shader::{StageType, UniformValue};
use lantern::texture::{Sampler, TexelFormat};
use std::collections::HashMap;
use std::marker::PhantomData;

/// One call received by the headless backend, in the vocabulary of the API it models.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
  /// A buffer was generated and filled with `size` bytes.
  CreateBuffer {
    /// Target the buffer was created for.
    target: BufferTarget,
    /// Buffer name.
    handle: u32,
    /// Uploaded size, in bytes.
    size: usize,
  },
  /// A buffer was bound to `target`; `0` unbinds.
  BindBuffer {
    /// Binding target.
    target: BufferTarget,
    /// Buffer name.
    handle: u32,
  },
  /// A buffer was deleted.
  DeleteBuffer(u32),
  /// A vertex array was generated.
  CreateVertexArray(u32),
  /// A vertex array was bound; `0` unbinds.
  BindVertexArray(u32),
  /// A vertex array was deleted.
  DeleteVertexArray(u32),
  /// A float attribute was declared and enabled. Stride and offset are in bytes.
  VertexAttrib {
    /// Vertex array receiving the attribute.
    vertex_array: u32,
    /// Attribute index.
    index: u32,
    /// Number of floats per vertex.
    components: u8,
    /// Distance between two vertices.
    stride: usize,
    /// Offset of the first component.
    offset: usize,
  },
  /// A shader stage was created.
  CreateShader {
    /// Stage type.
    ty: StageType,
    /// Shader name.
    handle: u32,
  },
  /// A shader stage was compiled.
  CompileShader(u32),
  /// A shader stage was deleted.
  DeleteShader(u32),
  /// A program was created.
  CreateProgram(u32),
  /// A stage was attached to a program.
  AttachShader {
    /// Program name.
    program: u32,
    /// Shader name.
    shader: u32,
  },
  /// A program was linked.
  LinkProgram(u32),
  /// A program was validated.
  ValidateProgram(u32),
  /// A program was deleted.
  DeleteProgram(u32),
  /// A program was made current; `0` uses none.
  UseProgram(u32),
  /// The location of a uniform was queried.
  GetUniformLocation {
    /// Program queried.
    program: u32,
    /// Uniform name.
    name: String,
  },
  /// A uniform of the current program was written.
  Uniform {
    /// Program current at the time of the write.
    program: u32,
    /// Uniform location.
    location: i32,
    /// Written value.
    value: UniformValue,
  },
  /// A texture was generated and its sampler applied.
  CreateTexture {
    /// Texture name.
    handle: u32,
    /// Applied sampler.
    sampler: Sampler,
  },
  /// A texture unit was made active.
  ActiveTexture(u32),
  /// A texture was bound to the active unit; `0` unbinds.
  BindTexture(u32),
  /// Texels were uploaded to the bound texture.
  TexImage {
    /// Width and height.
    size: [u32; 2],
    /// Pixel format.
    format: TexelFormat,
  },
  /// Mipmaps of the bound texture were generated.
  GenerateMipmap,
  /// A texture was deleted.
  DeleteTexture(u32),
  /// The clear color was set.
  ClearColor([f32; 4]),
  /// The color buffer was cleared.
  Clear,
  /// The viewport was set.
  Viewport([i32; 4]),
  /// An indexed triangle list of `count` indices was drawn.
  DrawElements {
    /// Number of indices.
    count: usize,
  },
  /// A triangle list over vertices `[first, first + count)` was drawn.
  DrawArrays {
    /// First vertex.
    first: usize,
    /// Number of vertices.
    count: usize,
  },
}

#[derive(Debug)]
pub(crate) struct StageRecord {
  pub(crate) ty: StageType,
  pub(crate) uniforms: Vec<UniformDecl>,
}

#[derive(Debug, Default)]
pub(crate) struct ProgramRecord {
  pub(crate) attached: Vec<u32>,
  pub(crate) linked: bool,
  pub(crate) locations: HashMap<String, i32>,
}

/// Bindings, live objects and call log of a headless backend.
#[derive(Debug)]
pub struct HeadlessState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  calls: Vec<Call>,

  // one name space per object family, as in GL; shaders and programs share one
  next_buffer: u32,
  next_vertex_array: u32,
  next_shader: u32,
  next_texture: u32,

  pub(crate) stages: HashMap<u32, StageRecord>,
  pub(crate) programs: HashMap<u32, ProgramRecord>,

  bound_array_buffer: u32,
  bound_element_array_buffer: u32,
  bound_vertex_array: u32,
  current_program: u32,
  current_texture_unit: u32,
  bound_textures: HashMap<u32, u32>,
  clear_color: [f32; 4],
  viewport: [i32; 4],
}

impl HeadlessState {
  pub(crate) fn new() -> Self {
    HeadlessState {
      _a: PhantomData,
      calls: Vec::new(),
      next_buffer: 1,
      next_vertex_array: 1,
      next_shader: 1,
      next_texture: 1,
      stages: HashMap::new(),
      programs: HashMap::new(),
      bound_array_buffer: 0,
      bound_element_array_buffer: 0,
      bound_vertex_array: 0,
      current_program: 0,
      current_texture_unit: 0,
      bound_textures: HashMap::new(),
      clear_color: [0., 0., 0., 0.],
      viewport: [0, 0, 0, 0],
    }
  }

  /// Every call received so far, oldest first.
  pub fn calls(&self) -> &[Call] {
    &self.calls
  }

  /// Forget the calls received so far. Bindings and live objects are kept.
  pub fn clear_calls(&mut self) {
    self.calls.clear();
  }

  /// Number of recorded calls matching `pred`.
  pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
    self.calls.iter().filter(|call| pred(call)).count()
  }

  /// Program in use; `0` if none.
  pub fn current_program(&self) -> u32 {
    self.current_program
  }

  /// Bound vertex array; `0` if none.
  pub fn bound_vertex_array(&self) -> u32 {
    self.bound_vertex_array
  }

  /// Buffer bound to `target`; `0` if none.
  pub fn bound_buffer(&self, target: BufferTarget) -> u32 {
    match target {
      BufferTarget::Array => self.bound_array_buffer,
      BufferTarget::ElementArray => self.bound_element_array_buffer,
    }
  }

  /// Active texture unit.
  pub fn active_texture_unit(&self) -> u32 {
    self.current_texture_unit
  }

  /// Texture bound to `unit`; `0` if none.
  pub fn bound_texture(&self, unit: u32) -> u32 {
    self.bound_textures.get(&unit).cloned().unwrap_or(0)
  }

  /// Current clear color.
  pub fn clear_color(&self) -> [f32; 4] {
    self.clear_color
  }

  /// Current viewport, as `[x, y, width, height]`.
  pub fn viewport(&self) -> [i32; 4] {
    self.viewport
  }

  /// Number of programs created and not yet deleted.
  pub fn live_programs(&self) -> usize {
    self.programs.len()
  }

  /// Number of shader stages created and not yet deleted.
  pub fn live_stages(&self) -> usize {
    self.stages.len()
  }

  pub(crate) fn record(&mut self, call: Call) {
    log::trace!("{:?}", call);
    self.calls.push(call);
  }

  pub(crate) fn gen_buffer(&mut self) -> u32 {
    let handle = self.next_buffer;
    self.next_buffer += 1;
    handle
  }

  pub(crate) fn gen_vertex_array(&mut self) -> u32 {
    let handle = self.next_vertex_array;
    self.next_vertex_array += 1;
    handle
  }

  pub(crate) fn gen_shader(&mut self) -> u32 {
    let handle = self.next_shader;
    self.next_shader += 1;
    handle
  }

  pub(crate) fn gen_texture(&mut self) -> u32 {
    let handle = self.next_texture;
    self.next_texture += 1;
    handle
  }

  pub(crate) fn bind_buffer(&mut self, target: BufferTarget, handle: u32) {
    match target {
      BufferTarget::Array => self.bound_array_buffer = handle,
      BufferTarget::ElementArray => self.bound_element_array_buffer = handle,
    }

    self.record(Call::BindBuffer { target, handle });
  }

  pub(crate) fn bind_vertex_array(&mut self, handle: u32) {
    self.bound_vertex_array = handle;
    self.record(Call::BindVertexArray(handle));
  }

  pub(crate) fn use_program(&mut self, handle: u32) {
    self.current_program = handle;
    self.record(Call::UseProgram(handle));
  }

  pub(crate) fn set_texture_unit(&mut self, unit: u32) {
    self.current_texture_unit = unit;
    self.record(Call::ActiveTexture(unit));
  }

  pub(crate) fn bind_texture(&mut self, handle: u32) {
    self.bound_textures.insert(self.current_texture_unit, handle);
    self.record(Call::BindTexture(handle));
  }

  pub(crate) fn set_clear_color(&mut self, rgba: [f32; 4]) {
    self.clear_color = rgba;
    self.record(Call::ClearColor(rgba));
  }

  pub(crate) fn set_viewport(&mut self, viewport: [i32; 4]) {
    self.viewport = viewport;
    self.record(Call::Viewport(viewport));
  }
}
