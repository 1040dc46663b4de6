use lantern_headless::{Call, Headless, HeadlessContext};
use lantern_lessons::platform::FsPlatformServices;
use lantern_lessons::{
  fly_camera, hello_triangle, indexed_quad, shader_files, textured_quad, InputAction, Lesson,
  LoopFeedback,
};
use std::iter;
use std::path::{Path, PathBuf};

fn res(dir: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join("res").join(dir)
}

fn services<L: Lesson<Headless>>() -> FsPlatformServices {
  FsPlatformServices::new(res("shaders"), res("textures"), &L::features())
}

// Bootstrap a lesson and render its first frame, returning the calls of that frame.
fn first_frame<L: Lesson<Headless>>(ctx: &mut HeadlessContext) -> (L, Vec<Call>) {
  let lesson = L::bootstrap(&mut services::<L>(), ctx).unwrap();
  ctx.clear_calls();

  let resized = InputAction::Resized {
    width: 800,
    height: 600,
  };

  match lesson.render_frame(0., iter::once(resized), ctx) {
    LoopFeedback::Continue(lesson) => (lesson, ctx.calls()),
    LoopFeedback::Exit => panic!("lesson exited on its first frame"),
  }
}

fn used_programs(calls: &[Call]) -> Vec<u32> {
  calls
    .iter()
    .filter_map(|call| match *call {
      Call::UseProgram(handle) => Some(handle),
      _ => None,
    })
    .collect()
}

fn uniform_writes(calls: &[Call]) -> usize {
  calls
    .iter()
    .filter(|call| matches!(call, Call::Uniform { .. }))
    .count()
}

fn assert_frame_state(ctx: &HeadlessContext) {
  assert_eq!(ctx.state().viewport(), [0, 0, 800, 600]);
  assert_eq!(ctx.state().clear_color(), [0.2, 0.3, 0.3, 1.]);
}

#[test]
fn hello_triangle_draws_three_vertices() {
  let mut ctx = HeadlessContext::new();
  let (_lesson, calls) = first_frame::<hello_triangle::LocalLesson<Headless>>(&mut ctx);

  assert_frame_state(&ctx);
  assert!(used_programs(&calls).iter().all(|&handle| handle != 0));
  assert_eq!(calls.last(), Some(&Call::DrawArrays { first: 0, count: 3 }));
}

#[test]
fn indexed_quad_draws_six_indices() {
  let mut ctx = HeadlessContext::new();
  let (_lesson, calls) = first_frame::<indexed_quad::LocalLesson<Headless>>(&mut ctx);

  assert_frame_state(&ctx);
  assert!(used_programs(&calls).iter().all(|&handle| handle != 0));
  assert_eq!(calls.last(), Some(&Call::DrawElements { count: 6 }));
}

#[test]
fn shader_files_build_and_write_the_color() {
  let mut ctx = HeadlessContext::new();
  let (_lesson, calls) = first_frame::<shader_files::LocalLesson<Headless>>(&mut ctx);

  let programs = used_programs(&calls);
  assert!(!programs.is_empty());
  assert!(programs.iter().all(|&handle| handle != 0));
  assert_eq!(uniform_writes(&calls), 1);
  assert_eq!(calls.last(), Some(&Call::DrawArrays { first: 0, count: 3 }));
}

#[test]
fn textured_quad_binds_its_texture_and_transforms() {
  let mut ctx = HeadlessContext::new();
  let (lesson, calls) = first_frame::<textured_quad::LocalLesson<Headless>>(&mut ctx);

  assert!(used_programs(&calls).iter().all(|&handle| handle != 0));
  assert_ne!(ctx.state().bound_texture(0), 0);
  assert_eq!(uniform_writes(&calls), 2);
  assert_eq!(calls.last(), Some(&Call::DrawElements { count: 6 }));

  // locations are looked up once, whatever the number of frames
  ctx.clear_calls();
  let lesson = match lesson.render_frame(0.5, iter::empty(), &mut ctx) {
    LoopFeedback::Continue(lesson) => lesson,
    LoopFeedback::Exit => panic!("lesson exited"),
  };
  let calls = ctx.calls();
  assert_eq!(uniform_writes(&calls), 2);
  assert!(!calls
    .iter()
    .any(|call| matches!(call, Call::GetUniformLocation { .. })));

  assert!(matches!(
    lesson.render_frame(1., iter::once(InputAction::Quit), &mut ctx),
    LoopFeedback::Exit
  ));
}

#[test]
fn camera_draws_every_quad_with_its_model() {
  let mut ctx = HeadlessContext::new();
  let (lesson, calls) = first_frame::<fly_camera::LocalLesson<Headless>>(&mut ctx);

  let draws = calls
    .iter()
    .filter(|call| matches!(call, Call::DrawElements { count: 6 }))
    .count();
  assert_eq!(draws, 6);

  // sampler, projection, view, then one model per quad
  assert_eq!(uniform_writes(&calls), 3 + 6);

  let actions = vec![
    InputAction::Forward,
    InputAction::CursorMoved { x: 10., y: 10. },
    InputAction::CursorMoved { x: 20., y: 5. },
    InputAction::VScroll { amount: 2. },
  ];
  assert!(matches!(
    lesson.render_frame(0.5, actions.into_iter(), &mut ctx),
    LoopFeedback::Continue(_)
  ));
}

#[test]
fn missing_textures_fall_back_to_an_empty_texture() {
  let mut ctx = HeadlessContext::new();
  let features = <textured_quad::LocalLesson<Headless> as Lesson<Headless>>::features();
  let mut services = FsPlatformServices::new(res("shaders"), res("no-textures"), &features);

  let lesson = textured_quad::LocalLesson::<Headless>::bootstrap(&mut services, &mut ctx);
  assert!(lesson.is_ok());
  assert_eq!(
    ctx
      .state()
      .count_calls(|call| matches!(call, Call::TexImage { .. })),
    0
  );
}
