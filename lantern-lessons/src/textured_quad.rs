//! A textured rectangle, spinning around its center.
//!
//! Vertices interleave a position, a color and texture coordinates. The texture is bound to unit 0
//! and `u_Texture` tells the fragment shader so. `u_Transform` moves the quad to the bottom right
//! corner and rotates it about `Z` by one radian per second.

use crate::shared::{full_viewport, load_texture, CLEAR_COLOR};
use crate::{Features, InputAction, Lesson, LessonError, LoopFeedback, PlatformServices};
use cgmath::{Matrix4, Rad, Vector3};
use lantern::backend::Backend;
use lantern::buffer::{ElementBuffer, VertexBuffer};
use lantern::context::GraphicsContext;
use lantern::renderer::Renderer;
use lantern::shader::Program;
use lantern::texture::Texture;
use lantern::vertex_array::{VertexArray, VertexAttrib};

pub const VS_PATH: &str = "textured.vert.glsl";
pub const FS_PATH: &str = "textured.frag.glsl";
pub const TEXTURE: &str = "container.png";

// position, color, texture coordinates
#[rustfmt::skip]
const VERTICES: [f32; 32] = [
   0.5,  0.5, 0.,   1., 0., 0.,   1., 1.,
   0.5, -0.5, 0.,   0., 1., 0.,   1., 0.,
  -0.5, -0.5, 0.,   0., 0., 1.,   0., 0.,
  -0.5,  0.5, 0.,   1., 1., 0.,   0., 1.,
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
  texture: Texture<B>,
  renderer: Renderer,
}

impl<B> Lesson<B> for LocalLesson<B>
where
  B: ?Sized + Backend,
{
  fn features() -> Features {
    Features::none().texture(TEXTURE)
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

    let texture = load_texture(context, platform, TEXTURE)?;

    let vertex_array = VertexArray::new(context)?;
    vertex_array.bind();

    let vertices = VertexBuffer::new(context, &VERTICES)?;
    let elements = ElementBuffer::new(context, &INDICES)?;
    vertex_array.set_attribute(VertexAttrib::new(0, 3, 8, 0));
    vertex_array.set_attribute(VertexAttrib::new(1, 3, 8, 3));
    vertex_array.set_attribute(VertexAttrib::new(2, 2, 8, 6));

    vertex_array.unbind();

    Ok(LocalLesson {
      program,
      vertex_array,
      _vertices: vertices,
      elements,
      texture,
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

    self.texture.bind(0);

    let transform: Matrix4<f32> = Matrix4::from_translation(Vector3::new(0.5, -0.5, 0.))
      * Matrix4::from_angle_z(Rad(time));

    self.program.bind();
    self.program.set_uniform_1i("u_Texture", 0);
    self.program.set_uniform_mat4("u_Transform", transform);

    self.renderer.draw_elements(
      context,
      &self.vertex_array,
      &self.elements,
      &self.program,
    );

    LoopFeedback::Continue(self)
  }
}
