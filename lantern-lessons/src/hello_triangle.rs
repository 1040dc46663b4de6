//! The first lesson: one triangle with a color per vertex.
//!
//! Shaders are given inline. The vertex buffer interleaves positions and colors, which two
//! attributes of the vertex array pick apart; the triangle is drawn straight from the vertices,
//! without indices.

use crate::shared::{full_viewport, CLEAR_COLOR};
use crate::{Features, InputAction, Lesson, LessonError, LoopFeedback, PlatformServices};
use lantern::backend::Backend;
use lantern::buffer::VertexBuffer;
use lantern::context::GraphicsContext;
use lantern::renderer::Renderer;
use lantern::shader::Program;
use lantern::vertex_array::{VertexArray, VertexAttrib};

const VS: &str = "#version 330 core
layout (location = 0) in vec3 a_Position;
layout (location = 1) in vec3 a_Color;

out vec3 v_Color;

void main()
{
  gl_Position = vec4(a_Position, 1.0);
  v_Color = a_Color;
}";

const FS: &str = "#version 330 core
in vec3 v_Color;
out vec4 FragColor;

void main()
{
  FragColor = vec4(v_Color, 1.0);
}";

// position, color
#[rustfmt::skip]
const VERTICES: [f32; 18] = [
  -0.5, -0.5, 0.,   1., 0., 0.,
   0.5, -0.5, 0.,   0., 1., 0.,
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
    _: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, LessonError> {
    let program = Program::from_strings(context, VS, FS);

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
    self,
    _: f32,
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
    self
      .renderer
      .draw_arrays(context, &self.vertex_array, 0, 3, &self.program);

    LoopFeedback::Continue(self)
  }
}
