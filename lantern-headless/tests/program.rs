use lantern::backend::shader::StageType;
use lantern::shader::{Diagnostic, Program, ProgramError, UniformValue};
use lantern_headless::{Call, Headless, HeadlessContext};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

const VS: &str = "#version 330 core
layout (location = 0) in vec3 a_Position;
uniform mat4 u_Transform;

void main()
{
  gl_Position = u_Transform * vec4(a_Position, 1.0);
}";

const FS: &str = "#version 330 core
out vec4 FragColor;
uniform vec4 u_Color;

void main()
{
  FragColor = u_Color;
}";

const BROKEN_FS: &str = "#version 330 core
out vec4 FragColor;

void main()
{
  FragColor = vec4(1.0, 0.5, 0.2, 1.0)
}";

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

fn temp_file(contents: &str) -> PathBuf {
  let path = std::env::temp_dir().join(format!(
    "lantern-headless-{}-{}.glsl",
    std::process::id(),
    NEXT_FILE.fetch_add(1, Ordering::Relaxed)
  ));
  fs::write(&path, contents).unwrap();
  path
}

fn location_queries(ctx: &HeadlessContext, uniform: &str) -> usize {
  ctx
    .state()
    .count_calls(|call| matches!(call, Call::GetUniformLocation { name, .. } if name == uniform))
}

fn uniform_writes(ctx: &HeadlessContext) -> usize {
  ctx
    .state()
    .count_calls(|call| matches!(call, Call::Uniform { .. }))
}

#[test]
fn linked_program_binds() {
  let mut ctx = HeadlessContext::new();
  let program = Program::from_strings(&mut ctx, VS, FS);

  assert!(program.is_usable());
  assert_ne!(program.handle(), 0);
  assert_eq!(ctx.state().current_program(), 0);

  program.bind();
  assert_eq!(ctx.state().current_program(), program.handle());

  program.unbind();
  assert_eq!(ctx.state().current_program(), 0);
}

#[test]
fn build_reports_each_step() {
  let mut ctx = HeadlessContext::new();
  let program = Program::from_strings(&mut ctx, VS, FS);

  assert_eq!(
    program.diagnostics(),
    &[
      Diagnostic::StageCompiled(StageType::VertexShader),
      Diagnostic::StageCompiled(StageType::FragmentShader),
      Diagnostic::Linked,
    ]
  );
  assert!(program.vertex_path().is_none());
}

#[test]
fn stages_are_released_after_link() {
  let mut ctx = HeadlessContext::new();
  let program = Program::from_strings(&mut ctx, VS, FS);

  assert_eq!(ctx.state().live_stages(), 0);
  assert_eq!(ctx.state().live_programs(), 1);

  let calls = ctx.calls();
  let link = calls
    .iter()
    .position(|call| *call == Call::LinkProgram(program.handle()))
    .unwrap();
  let deletes: Vec<usize> = calls
    .iter()
    .enumerate()
    .filter(|(_, call)| matches!(call, Call::DeleteShader(_)))
    .map(|(i, _)| i)
    .collect();

  assert_eq!(deletes.len(), 2);
  assert!(deletes.iter().all(|&i| i > link));
}

#[test]
fn syntax_error_leaves_program_unusable() {
  let mut ctx = HeadlessContext::new();
  let program = Program::from_strings(&mut ctx, VS, BROKEN_FS);

  assert!(!program.is_usable());
  assert_eq!(program.handle(), 0);
  assert_eq!(ctx.state().live_programs(), 0);

  let failure = program
    .diagnostics()
    .iter()
    .find_map(|d| match d {
      Diagnostic::StageFailed(e) => Some(e.clone()),
      _ => None,
    })
    .unwrap();

  assert_eq!(failure.stage_type(), StageType::FragmentShader);
  assert!(failure.to_string().contains("0:6: error"));
  assert!(program
    .diagnostics()
    .iter()
    .any(|d| matches!(d, Diagnostic::LinkFailed(_))));
}

#[test]
fn unusable_program_never_reaches_the_backend_for_uniforms() {
  let mut ctx = HeadlessContext::new();
  let mut program = Program::from_strings(&mut ctx, VS, BROKEN_FS);
  program.bind();

  assert!(!program.set_uniform_4f("u_Color", [1f32, 0., 0., 1.]));
  assert_eq!(program.uniform_location("u_Color"), -1);
  assert_eq!(location_queries(&ctx, "u_Color"), 0);
  assert_eq!(uniform_writes(&ctx), 0);
}

#[test]
fn strict_view_of_a_broken_program() {
  let mut ctx = HeadlessContext::new();

  match Program::from_strings(&mut ctx, VS, BROKEN_FS).into_result() {
    Err(ProgramError::StageError(e)) => assert_eq!(e.stage_type(), StageType::FragmentShader),
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("broken program is usable"),
  }

  assert!(Program::from_strings(&mut ctx, VS, FS).into_result().is_ok());
}

#[test]
fn uniform_location_is_looked_up_once() {
  let mut ctx = HeadlessContext::new();
  let mut program = Program::from_strings(&mut ctx, VS, FS);
  program.bind();

  assert!(program.set_uniform_4f("u_Color", [0.2f32, 0.3, 0.8, 1.]));
  assert!(program.set_uniform_4f("u_Color", [0.8f32, 0.3, 0.2, 1.]));

  assert_eq!(location_queries(&ctx, "u_Color"), 1);
  assert_eq!(uniform_writes(&ctx), 2);
}

#[test]
fn uniform_writes_target_the_bound_program() {
  let mut ctx = HeadlessContext::new();
  let mut program = Program::from_strings(&mut ctx, VS, FS);
  program.bind();

  let location = program.uniform_location("u_Color");
  program.set_uniform_1f("u_Color", 0.5);

  assert_eq!(
    ctx.calls().last(),
    Some(&Call::Uniform {
      program: program.handle(),
      location,
      value: UniformValue::Float(0.5),
    })
  );
}

#[test]
fn missing_uniform_is_reported_once() {
  let mut ctx = HeadlessContext::new();
  let mut program = Program::from_strings(&mut ctx, VS, FS);
  program.bind();

  assert!(!program.set_uniform_1i("u_Missing", 3));
  assert!(!program.set_uniform_1i("u_Missing", 4));

  let not_found = program
    .diagnostics()
    .iter()
    .filter(|d| matches!(d, Diagnostic::UniformNotFound(name) if name == "u_Missing"))
    .count();

  assert_eq!(not_found, 1);
  assert_eq!(location_queries(&ctx, "u_Missing"), 1);
  assert_eq!(uniform_writes(&ctx), 0);
}

#[test]
fn unused_uniform_is_not_active() {
  let fs = "#version 330 core
out vec4 FragColor;
uniform float u_Time;

void main()
{
  FragColor = vec4(1.0);
}";

  let mut ctx = HeadlessContext::new();
  let mut program = Program::from_strings(&mut ctx, VS, fs);

  assert!(program.is_usable());
  assert_eq!(program.uniform_location("u_Time"), -1);
}

#[test]
fn locations_are_distinct_across_stages() {
  let mut ctx = HeadlessContext::new();
  let mut program = Program::from_strings(&mut ctx, VS, FS);

  let transform = program.uniform_location("u_Transform");
  let color = program.uniform_location("u_Color");

  assert!(transform >= 0);
  assert!(color >= 0);
  assert_ne!(transform, color);
}

#[test]
fn from_files_builds_from_line_joined_sources() {
  let vs_path = temp_file(&format!("{}\r\n", VS.replace('\n', "\r\n")));
  let fs_path = temp_file(FS);

  let mut ctx = HeadlessContext::new();
  let program = Program::from_files(&mut ctx, &vs_path, &fs_path);

  assert!(program.is_usable());
  assert_eq!(program.vertex_path(), Some(vs_path.as_path()));
  assert_eq!(program.fragment_path(), Some(fs_path.as_path()));

  fs::remove_file(&vs_path).unwrap();
  fs::remove_file(&fs_path).unwrap();
}

#[test]
fn unreadable_file_becomes_a_failed_stage() {
  let vs_path = std::env::temp_dir().join("lantern-headless-missing-vertex.glsl");
  let fs_path = temp_file(FS);

  let mut ctx = HeadlessContext::new();
  let program = Program::from_files(&mut ctx, &vs_path, &fs_path);
  fs::remove_file(&fs_path).unwrap();

  assert!(!program.is_usable());
  assert!(matches!(
    program.diagnostics()[0],
    Diagnostic::SourceUnreadable {
      stage: StageType::VertexShader,
      ..
    }
  ));
  assert!(program.diagnostics().iter().any(
    |d| matches!(d, Diagnostic::StageFailed(e) if e.stage_type() == StageType::VertexShader)
  ));
}

#[test]
fn dropping_a_program_deletes_it() {
  let mut ctx = HeadlessContext::new();
  let program = Program::<Headless>::from_strings(&mut ctx, VS, FS);
  let handle = program.handle();

  program.bind();
  drop(program);

  assert_eq!(ctx.calls().last(), Some(&Call::DeleteProgram(handle)));
  assert_eq!(ctx.state().live_programs(), 0);
  // the binding is left alone
  assert_eq!(ctx.state().current_program(), handle);
}

const VECTOR_VS: &str = "#version 330 core
layout (location = 0) in vec2 a_Position;
uniform vec2 u_Offset;
uniform mat3 u_Normal;

void main()
{
  vec3 p = u_Normal *
    vec3(a_Position + u_Offset, 1.0);
  gl_Position = vec4(p, 1.0);
}";

const VECTOR_FS: &str = "#version 330 core
out vec4 FragColor;
/* tinted by
   the host */
uniform vec3 u_Tint;

void main()
{
  FragColor = vec4(u_Tint, 1.0);
}";

#[test]
fn vector_and_matrix_uniforms_are_recorded_as_given() {
  let mut ctx = HeadlessContext::new();
  let mut program = Program::from_strings(&mut ctx, VECTOR_VS, VECTOR_FS);
  assert!(program.is_usable(), "{:?}", program.diagnostics());
  program.bind();

  // columns: x axis, y axis, translation
  let normal = [[1f32, 0., 0.], [0., 1., 0.], [0.5, -0.5, 1.]];

  assert!(program.set_uniform_2f("u_Offset", [0.25f32, -0.25]));
  assert!(program.set_uniform_3f("u_Tint", [1f32, 0.5, 0.]));
  assert!(program.set_uniform_mat3("u_Normal", normal));

  let written: Vec<UniformValue> = ctx
    .calls()
    .into_iter()
    .filter_map(|call| match call {
      Call::Uniform { program: p, value, .. } if p == program.handle() => Some(value),
      _ => None,
    })
    .collect();

  assert_eq!(
    written,
    vec![
      UniformValue::Vec2([0.25, -0.25]),
      UniformValue::Vec3([1., 0.5, 0.]),
      UniformValue::Mat3(normal),
    ]
  );
}
