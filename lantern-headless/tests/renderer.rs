use lantern::backend::buffer::BufferTarget;
use lantern::buffer::{ElementBuffer, VertexBuffer};
use lantern::renderer::Renderer;
use lantern::shader::Program;
use lantern::vertex_array::{VertexArray, VertexAttrib};
use lantern_headless::{Call, HeadlessContext};

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

#[test]
fn indexed_draw_binds_program_vertex_array_then_elements() {
  let mut ctx = HeadlessContext::new();
  let program = Program::from_strings(&mut ctx, VS, FS);
  let va = VertexArray::new(&mut ctx).unwrap();
  let _vertices =
    VertexBuffer::new(&mut ctx, &[0.5f32, 0.5, 0., 0.5, -0.5, 0., -0.5, -0.5, 0.]).unwrap();
  va.set_attribute(VertexAttrib::new(0, 3, 3, 0));
  let elements = ElementBuffer::new(&mut ctx, &[0, 1, 2]).unwrap();

  ctx.clear_calls();
  Renderer::new().draw_elements(&mut ctx, &va, &elements, &program);

  assert_eq!(
    ctx.calls(),
    vec![
      Call::UseProgram(program.handle()),
      Call::BindVertexArray(va.handle()),
      Call::BindBuffer {
        target: BufferTarget::ElementArray,
        handle: elements.handle(),
      },
      Call::DrawElements { count: 3 },
    ]
  );
}

#[test]
fn array_draw_binds_program_then_vertex_array() {
  let mut ctx = HeadlessContext::new();
  let program = Program::from_strings(&mut ctx, VS, FS);
  let va = VertexArray::new(&mut ctx).unwrap();

  ctx.clear_calls();
  Renderer::new().draw_arrays(&mut ctx, &va, 0, 3, &program);

  assert_eq!(
    ctx.calls(),
    vec![
      Call::UseProgram(program.handle()),
      Call::BindVertexArray(va.handle()),
      Call::DrawArrays { first: 0, count: 3 },
    ]
  );
  assert_eq!(ctx.state().current_program(), program.handle());
  assert_eq!(ctx.state().bound_vertex_array(), va.handle());
}

#[test]
fn unusable_program_still_draws() {
  let mut ctx = HeadlessContext::new();
  let program = Program::from_strings(&mut ctx, VS, "void main() {");
  let va = VertexArray::new(&mut ctx).unwrap();

  ctx.clear_calls();
  Renderer::new().draw_arrays(&mut ctx, &va, 0, 3, &program);

  assert_eq!(ctx.calls()[0], Call::UseProgram(0));
  assert_eq!(ctx.calls().last(), Some(&Call::DrawArrays { first: 0, count: 3 }));
}

#[test]
fn clear_and_viewport() {
  let mut ctx = HeadlessContext::new();
  let renderer = Renderer::new();

  renderer.set_clear_color(&mut ctx, [0.2, 0.3, 0.3, 1.]);
  renderer.clear(&mut ctx);
  renderer.set_viewport(&mut ctx, [0, 0, 800, 600]);

  assert_eq!(ctx.state().clear_color(), [0.2, 0.3, 0.3, 1.]);
  assert_eq!(ctx.state().viewport(), [0, 0, 800, 600]);
  assert_eq!(
    ctx.calls(),
    vec![
      Call::ClearColor([0.2, 0.3, 0.3, 1.]),
      Call::Clear,
      Call::Viewport([0, 0, 800, 600]),
    ]
  );
}
