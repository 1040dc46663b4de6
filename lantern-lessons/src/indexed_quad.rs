//! A rectangle out of two triangles sharing an edge.
//!
//! Four vertices and six indices instead of six vertices. The element buffer is created while the
//! vertex array is bound, so that the array remembers it.

use crate::shared::{full_viewport, CLEAR_COLOR};
use crate::{Features, InputAction, Lesson, LessonError, LoopFeedback, PlatformServices};
use lantern::backend::Backend;
use lantern::buffer::{ElementBuffer, VertexBuffer};
use lantern::context::GraphicsContext;
use lantern::renderer::Renderer;
use lantern::shader::Program;
use lantern::vertex_array::{VertexArray, VertexAttrib};

const VS: &str = "#version 330 core
layout (location = 0) in vec3 a_Position;

void main()
{
  gl_Position = vec4(a_Position, 1.0);
}";

const FS: &str = "#version 330 core
out vec4 FragColor;

void main()
{
  FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}";

#[rustfmt::skip]
const VERTICES: [f32; 12] = [
   0.5,  0.5, 0., // top right
   0.5, -0.5, 0., // bottom right
  -0.5, -0.5, 0., // bottom left
  -0.5,  0.5, 0., // top left
];

#[rustfmt::skip]
const INDICES: [u32; 6] = [
  0, 1, 3,
  1, 2, 3,
];

pub struct LocalLesson<B>
where
  B: ?Sized + Backend,
{
  program: Program<B>,
  vertex_array: VertexArray<B>,
  _vertices: VertexBuffer<B>,
  elements: ElementBuffer<B>,
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
    let elements = ElementBuffer::new(context, &INDICES)?;
    vertex_array.set_attribute(VertexAttrib::new(0, 3, 3, 0));

    vertex_array.unbind();

    Ok(LocalLesson {
      program,
      vertex_array,
      _vertices: vertices,
      elements,
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
    self.renderer.draw_elements(
      context,
      &self.vertex_array,
      &self.elements,
      &self.program,
    );

    LoopFeedback::Continue(self)
  }
}
