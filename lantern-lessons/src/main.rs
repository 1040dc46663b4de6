use glfw::{Action, Context as _, Key, WindowEvent};
use lantern_gl::GL33;
use lantern_glfw::{CursorMode, GlfwSurface, WindowDim, WindowOpt};
use lantern_lessons::platform::FsPlatformServices;
use lantern_lessons::{InputAction, Lesson, LoopFeedback};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::{iter, process, time::Instant};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available lessons.
  list_lessons: bool,

  #[structopt(short, long)]
  /// Directory where to pick shader sources from.
  shaders: Option<PathBuf>,

  #[structopt(short, long)]
  /// Directory where to pick textures from.
  textures: Option<PathBuf>,

  #[structopt(long, default_value = "800")]
  /// Width of the window.
  width: u32,

  #[structopt(long, default_value = "600")]
  /// Height of the window.
  height: u32,

  /// Lesson to run.
  lesson: Option<String>,
}

impl CLIOpts {
  fn resource_root(dir: &Option<PathBuf>, default: &str) -> PathBuf {
    dir
      .clone()
      .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("res").join(default))
  }
}

/// Macro to declaratively add lessons.
macro_rules! lessons {
  ($($name:literal, $module:ident),* $(,)?) => {
    fn show_available_lessons() {
      println!("available lessons:");
      $( println!("  - {}", $name); )*
    }

    // run a lesson based on its name
    fn pick_and_run_lesson(cli_opts: CLIOpts) -> Result<(), Box<dyn Error>> {
      let lesson_name = cli_opts.lesson.as_deref();
      match lesson_name {
        $(
          Some($name) => {
            run_lesson::<lantern_lessons::$module::LocalLesson<GL33>>(&cli_opts, $name)
          }
        ),*

        _ => {
          log::error!("no lesson found");
          show_available_lessons();
          Ok(())
        }
      }
    }
  }
}

// Run a lesson until it exits or its window is closed.
fn run_lesson<L>(cli_opts: &CLIOpts, name: &str) -> Result<(), Box<dyn Error>>
where
  L: Lesson<GL33>,
{
  let features = L::features();
  let mut services = FsPlatformServices::new(
    CLIOpts::resource_root(&cli_opts.shaders, "shaders"),
    CLIOpts::resource_root(&cli_opts.textures, "textures"),
    &features,
  );

  let cursor_mode = if features.cursor_captured() {
    CursorMode::Disabled
  } else {
    CursorMode::Visible
  };
  let dim = WindowDim::Windowed {
    width: cli_opts.width,
    height: cli_opts.height,
  };
  let surface = GlfwSurface::new_gl33(
    name,
    WindowOpt::default()
      .set_dim(dim)
      .set_cursor_mode(cursor_mode),
  )?;
  let mut context = surface.context;
  let events = surface.events_rx;

  let lesson = L::bootstrap(&mut services, &mut context)?;
  let start_t = Instant::now();

  // a first frame with no time elapsed tells the lesson the actual framebuffer size
  let [fb_w, fb_h] = context.framebuffer_size();
  let feedback = lesson.render_frame(
    0.,
    iter::once(InputAction::Resized {
      width: fb_w,
      height: fb_h,
    }),
    &mut context,
  );
  let mut lesson = match feedback {
    LoopFeedback::Exit => return Ok(()),
    LoopFeedback::Continue(lesson) => lesson,
  };
  context.window.swap_buffers();

  'app: loop {
    context.window.glfw.poll_events();
    let held = held_keys(&context.window);
    let actions = glfw::flush_messages(&events)
      .flat_map(|(_, event)| adapt_events(event))
      .chain(held);

    let t = start_t.elapsed().as_secs_f32();
    let feedback = lesson.render_frame(t, actions, &mut context);

    if let LoopFeedback::Continue(stepped) = feedback {
      lesson = stepped;
      context.window.swap_buffers();
    } else {
      break 'app;
    }
  }

  Ok(())
}

fn adapt_events(event: WindowEvent) -> Option<InputAction> {
  match event {
    WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
      Some(InputAction::Quit)
    }

    WindowEvent::CursorPos(x, y) => Some(InputAction::CursorMoved {
      x: x as _,
      y: y as _,
    }),

    WindowEvent::FramebufferSize(width, height) => Some(InputAction::Resized {
      width: width.max(0) as _,
      height: height.max(0) as _,
    }),

    WindowEvent::Scroll(_, amount) => Some(InputAction::VScroll {
      amount: amount as f32,
    }),

    _ => None,
  }
}

// Movement keys act for as long as they are held, not once per key event.
fn held_keys(window: &glfw::Window) -> Vec<InputAction> {
  [
    (Key::W, InputAction::Forward),
    (Key::S, InputAction::Backward),
    (Key::A, InputAction::Left),
    (Key::D, InputAction::Right),
  ]
  .iter()
  .filter(|(key, _)| window.get_key(*key) == Action::Press)
  .map(|(_, action)| action.clone())
  .collect()
}

lessons! {
  "hello-triangle", hello_triangle,
  "indexed-quad", indexed_quad,
  "shader-files", shader_files,
  "textured-quad", textured_quad,
  "camera", fly_camera,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_lessons {
    show_available_lessons();
  } else if let Err(e) = pick_and_run_lesson(cli_opts) {
    log::error!("{}", e);
    process::exit(1);
  }
}
