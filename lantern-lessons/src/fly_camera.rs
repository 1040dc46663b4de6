//! A field of textured quads, seen through a fly-through camera.
//!
//! WASD moves, the mouse looks around and the scroll wheel zooms. Movement is scaled by the time
//! elapsed since the previous frame so that speed doesn’t depend on the frame rate.

use crate::camera::{Camera, CameraMovement};
use crate::shared::{full_viewport, load_texture, CLEAR_COLOR};
use crate::{Features, InputAction, Lesson, LessonError, LoopFeedback, PlatformServices};
use cgmath::{perspective, Deg, InnerSpace, Matrix4, Point3, Vector3};
use lantern::backend::Backend;
use lantern::buffer::{ElementBuffer, VertexBuffer};
use lantern::context::GraphicsContext;
use lantern::renderer::Renderer;
use lantern::shader::Program;
use lantern::texture::Texture;
use lantern::vertex_array::{VertexArray, VertexAttrib};

pub const VS_PATH: &str = "camera.vert.glsl";
pub const FS_PATH: &str = "textured.frag.glsl";
pub const TEXTURE: &str = "container.png";

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.;

// position, texture coordinates
#[rustfmt::skip]
const VERTICES: [f32; 20] = [
   0.5,  0.5, 0.,   1., 1.,
   0.5, -0.5, 0.,   1., 0.,
  -0.5, -0.5, 0.,   0., 0.,
  -0.5,  0.5, 0.,   0., 1.,
];

#[rustfmt::skip]
const INDICES: [u32; 6] = [
  0, 1, 3,
  1, 2, 3,
];

#[rustfmt::skip]
const QUAD_POSITIONS: [[f32; 3]; 6] = [
  [ 0.,   0.,    0. ],
  [ 2.,   5.,  -15. ],
  [-1.5, -2.2,  -2.5],
  [-3.8, -2.,  -12.3],
  [ 2.4, -0.4,  -3.5],
  [ 1.3, -2.,   -2.5],
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
  camera: Camera,
  aspect_ratio: f32,
  last_time: Option<f32>,
  last_cursor: Option<[f32; 2]>,
}

impl<B> LocalLesson<B>
where
  B: ?Sized + Backend,
{
  fn look(&mut self, x: f32, y: f32) {
    let [last_x, last_y] = self.last_cursor.unwrap_or([x, y]);
    self.last_cursor = Some([x, y]);

    // window coordinates grow downward
    self.camera.process_mouse_movement(x - last_x, last_y - y, true);
  }

  fn model(index: usize) -> Matrix4<f32> {
    let axis = Vector3::new(1., 0.3, 0.5).normalize();

    Matrix4::from_translation(QUAD_POSITIONS[index].into())
      * Matrix4::from_axis_angle(axis, Deg(20. * index as f32))
  }
}

impl<B> Lesson<B> for LocalLesson<B>
where
  B: ?Sized + Backend,
{
  fn features() -> Features {
    Features::none().texture(TEXTURE).capture_cursor()
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
    vertex_array.set_attribute(VertexAttrib::new(0, 3, 5, 0));
    vertex_array.set_attribute(VertexAttrib::new(2, 2, 5, 3));

    vertex_array.unbind();

    Ok(LocalLesson {
      program,
      vertex_array,
      _vertices: vertices,
      elements,
      texture,
      renderer: Renderer::new(),
      camera: Camera::new(Point3::new(0., 0., 3.)),
      aspect_ratio: 800. / 600.,
      last_time: None,
      last_cursor: None,
    })
  }

  fn render_frame(
    mut self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> LoopFeedback<Self> {
    let dt = time - self.last_time.unwrap_or(time);
    self.last_time = Some(time);

    for action in actions {
      match action {
        InputAction::Quit => return LoopFeedback::Exit,
        InputAction::Forward => self.camera.process_keyboard(CameraMovement::Forward, dt),
        InputAction::Backward => self.camera.process_keyboard(CameraMovement::Backward, dt),
        InputAction::Left => self.camera.process_keyboard(CameraMovement::Left, dt),
        InputAction::Right => self.camera.process_keyboard(CameraMovement::Right, dt),
        InputAction::CursorMoved { x, y } => self.look(x, y),
        InputAction::VScroll { amount } => self.camera.process_mouse_scroll(amount),

        InputAction::Resized { width, height } => {
          if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
          }

          self
            .renderer
            .set_viewport(context, full_viewport(width, height));
        }
      }
    }

    self.renderer.set_clear_color(context, CLEAR_COLOR);
    self.renderer.clear(context);

    self.texture.bind(0);

    let projection = perspective(Deg(self.camera.zoom), self.aspect_ratio, Z_NEAR, Z_FAR);
    let view = self.camera.view_matrix();

    self.program.bind();
    self.program.set_uniform_1i("u_Texture", 0);
    self.program.set_uniform_mat4("u_Projection", projection);
    self.program.set_uniform_mat4("u_View", view);

    for index in 0..QUAD_POSITIONS.len() {
      self.program.set_uniform_mat4("u_Model", Self::model(index));
      self.renderer.draw_elements(
        context,
        &self.vertex_array,
        &self.elements,
        &self.program,
      );
    }

    LoopFeedback::Continue(self)
  }
}
