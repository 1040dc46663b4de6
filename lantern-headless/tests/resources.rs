use lantern::backend::buffer::BufferTarget;
use lantern::buffer::{ElementBuffer, VertexBuffer};
use lantern::texture::{Sampler, TexelFormat, Texels, Texture, TextureError};
use lantern::vertex_array::{VertexArray, VertexAttrib};
use lantern_headless::{Call, Headless, HeadlessContext};

const VERTICES: [f32; 12] = [
  0.5, 0.5, 0., //
  0.5, -0.5, 0., //
  -0.5, -0.5, 0., //
  -0.5, 0.5, 0., //
];

const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

#[test]
fn element_buffer_counts_indices() {
  let mut ctx = HeadlessContext::new();
  let elements = ElementBuffer::new(&mut ctx, &INDICES).unwrap();

  assert_eq!(elements.count(), 6);
  assert_eq!(elements.size(), 24);
}

#[test]
fn buffers_upload_their_bytes_once() {
  let mut ctx = HeadlessContext::new();
  let vertices = VertexBuffer::new(&mut ctx, &VERTICES).unwrap();

  assert_eq!(vertices.size(), 48);
  assert_eq!(
    ctx.calls(),
    vec![
      Call::CreateBuffer {
        target: BufferTarget::Array,
        handle: vertices.handle(),
        size: 48,
      },
      Call::BindBuffer {
        target: BufferTarget::Array,
        handle: vertices.handle(),
      },
    ]
  );
}

#[test]
fn bind_and_unbind_toggle_the_target() {
  let mut ctx = HeadlessContext::new();
  let vertices = VertexBuffer::new(&mut ctx, &VERTICES).unwrap();
  let elements = ElementBuffer::new(&mut ctx, &INDICES).unwrap();

  vertices.unbind();
  assert_eq!(ctx.state().bound_buffer(BufferTarget::Array), 0);
  assert_eq!(
    ctx.state().bound_buffer(BufferTarget::ElementArray),
    elements.handle()
  );

  vertices.bind();
  assert_eq!(
    ctx.state().bound_buffer(BufferTarget::Array),
    vertices.handle()
  );

  elements.unbind();
  assert_eq!(ctx.state().bound_buffer(BufferTarget::ElementArray), 0);
}

#[test]
fn dropping_a_bound_buffer_leaves_the_binding() {
  let mut ctx = HeadlessContext::new();
  let vertices = VertexBuffer::<Headless>::new(&mut ctx, &VERTICES).unwrap();
  let handle = vertices.handle();

  vertices.bind();
  drop(vertices);

  assert_eq!(ctx.calls().last(), Some(&Call::DeleteBuffer(handle)));
  assert_eq!(ctx.state().bound_buffer(BufferTarget::Array), handle);
}

#[test]
fn vertex_array_is_not_bound_at_creation() {
  let mut ctx = HeadlessContext::new();
  let va = VertexArray::new(&mut ctx).unwrap();

  assert_ne!(va.handle(), 0);
  assert_eq!(ctx.state().bound_vertex_array(), 0);

  va.bind();
  assert_eq!(ctx.state().bound_vertex_array(), va.handle());

  va.unbind();
  assert_eq!(ctx.state().bound_vertex_array(), 0);
}

#[test]
fn dropping_a_bound_vertex_array_leaves_the_binding() {
  let mut ctx = HeadlessContext::new();
  let va = VertexArray::<Headless>::new(&mut ctx).unwrap();
  let handle = va.handle();

  va.bind();
  drop(va);

  assert_eq!(ctx.calls().last(), Some(&Call::DeleteVertexArray(handle)));
  assert_eq!(ctx.state().bound_vertex_array(), handle);
}

#[test]
fn attributes_are_recorded_into_their_vertex_array() {
  let mut ctx = HeadlessContext::new();
  let va = VertexArray::new(&mut ctx).unwrap();
  let _vertices = VertexBuffer::new(&mut ctx, &VERTICES).unwrap();

  ctx.clear_calls();
  va.set_attribute(VertexAttrib::new(0, 3, 3, 0));

  assert_eq!(
    ctx.calls(),
    vec![
      Call::BindVertexArray(va.handle()),
      Call::VertexAttrib {
        vertex_array: va.handle(),
        index: 0,
        components: 3,
        stride: 3,
        offset: 0,
      },
    ]
  );
}

fn checkerboard() -> Texels {
  Texels {
    pixels: vec![255, 255, 255, 0, 0, 0, 0, 0, 0, 255, 255, 255],
    width: 2,
    height: 2,
    channels: 3,
  }
}

#[test]
fn texture_uploads_and_generates_mipmaps() {
  let mut ctx = HeadlessContext::new();
  let texture = Texture::new(&mut ctx, &checkerboard(), Sampler::default()).unwrap();

  assert!(texture.is_valid());
  assert_eq!(texture.size(), [2, 2]);
  assert_eq!(texture.channels(), 3);
  assert_eq!(
    ctx.calls(),
    vec![
      Call::CreateTexture {
        handle: texture.handle(),
        sampler: Sampler::default(),
      },
      Call::BindTexture(texture.handle()),
      Call::TexImage {
        size: [2, 2],
        format: TexelFormat::RGB,
      },
      Call::GenerateMipmap,
    ]
  );
}

#[test]
fn texture_binds_to_its_unit() {
  let mut ctx = HeadlessContext::new();
  let texture = Texture::new(&mut ctx, &checkerboard(), Sampler::default()).unwrap();

  texture.bind(1);
  assert_eq!(ctx.state().active_texture_unit(), 1);
  assert_eq!(ctx.state().bound_texture(1), texture.handle());

  texture.unbind(1);
  assert_eq!(ctx.state().bound_texture(1), 0);
}

#[test]
fn texel_mismatches_are_rejected() {
  let mut ctx = HeadlessContext::new();

  let mut short = checkerboard();
  short.pixels.pop();
  assert_eq!(
    Texture::new(&mut ctx, &short, Sampler::default()).err(),
    Some(TextureError::SizeMismatch {
      expected: 12,
      provided: 11
    })
  );

  let mut odd = checkerboard();
  odd.channels = 5;
  assert_eq!(
    Texture::new(&mut ctx, &odd, Sampler::default()).err(),
    Some(TextureError::UnsupportedChannels(5))
  );

  assert!(ctx.calls().is_empty());
}

#[test]
fn empty_texture_has_no_content() {
  let mut ctx = HeadlessContext::new();
  let texture = Texture::empty(&mut ctx).unwrap();

  assert!(!texture.is_valid());
  assert_eq!(texture.size(), [0, 0]);
  assert_eq!(
    ctx
      .state()
      .count_calls(|call| matches!(call, Call::TexImage { .. })),
    0
  );
}
