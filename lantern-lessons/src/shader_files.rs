//! Shaders read from files, and a first uniform.
//!
//! The sources live in the shader directory of the platform. Each vertex carries its own color,
//! which the fragment shader tints with `u_Color`, whose green channel pulses over time.

use crate::shared::{full_viewport, CLEAR_COLOR};
use crate::{Features, InputAction, Lesson, LessonError, LoopFeedback, PlatformServices};
use lantern::backend::Backend;
use lantern::buffer::VertexBuffer;
use lantern::context::GraphicsContext;
use lantern::renderer::Renderer;
use lantern::shader::Program;
use lantern::vertex_array::{VertexArray, VertexAttrib};

pub const VS_PATH: &str = "colored.vert.glsl";
pub const FS_PATH: &str = "colored.frag.glsl";

// position, color
#[rustfmt::skip]
const VERTICES: [f32; 18] = [
   0.5, -0.5, 0.,   1., 0., 0.,
  -0.5, -0.5, 0.,   0., 1., 0.,
   0.,   0.5, 0.,   0., 0., 1.,
];

pub struct LocalLesson<B>
where
  B: ?Sized + Backend,
{
  program: Program<B>,
  vertex_array: VertexArray<B>,
  _vertices: VertexBuffer<B>,
  renderer: Renderer,
}

impl<B> Lesson<B> for LocalLesson<B>
where
  B: ?Sized + Backend,
{
  fn features() -> Features {
    Features::none()
  }

  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, LessonError> {
    let program = Program::from_files(
      context,
      platform.shader_path(VS_PATH),
      platform.shader_path(FS_PATH),
    );

    let vertex_array = VertexArray::new(context)?;
    vertex_array.bind();

    let vertices = VertexBuffer::new(context, &VERTICES)?;
    vertex_array.set_attribute(VertexAttrib::new(0, 3, 6, 0));
    vertex_array.set_attribute(VertexAttrib::new(1, 3, 6, 3));

    vertex_array.unbind();

    Ok(LocalLesson {
      program,
      vertex_array,
      _vertices: vertices,
      renderer: Renderer::new(),
    })
  }

  fn render_frame(
    mut self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> LoopFeedback<Self> {
    for action in actions {
      match action {
        InputAction::Quit => return LoopFeedback::Exit,
        InputAction::Resized { width, height } => {
          self
            .renderer
            .set_viewport(context, full_viewport(width, height));
        }
        _ => (),
      }
    }

    self.renderer.set_clear_color(context, CLEAR_COLOR);
    self.renderer.clear(context);

    // uniforms go to the bound program
    let green = time.sin() / 2. + 0.5;
    self.program.bind();
    self.program.set_uniform_4f("u_Color", [0., green, 0., 1.]);

    self
      .renderer
      .draw_arrays(context, &self.vertex_array, 0, 3, &self.program);

    LoopFeedback::Continue(self)
  }
}
