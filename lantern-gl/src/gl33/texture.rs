//! OpenGL texture implementation.

use crate::gl33::{state::GLState, GL33};
use gl::types::*;
use lantern::backend::texture::Texture;
use lantern::texture::{MagFilter, MinFilter, Sampler, TexelFormat, TextureError, Wrap};
use std::{cell::RefCell, rc::Rc};

#[derive(Debug)]
pub struct TextureWrapper {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for TextureWrapper {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteTextures(1, &self.handle);
    }
  }
}

fn apply_sampler_to_texture(sampler: Sampler) {
  unsafe {
    gl::TexParameteri(
      gl::TEXTURE_2D,
      gl::TEXTURE_WRAP_S,
      opengl_wrap(sampler.wrap_s) as GLint,
    );
    gl::TexParameteri(
      gl::TEXTURE_2D,
      gl::TEXTURE_WRAP_T,
      opengl_wrap(sampler.wrap_t) as GLint,
    );
    gl::TexParameteri(
      gl::TEXTURE_2D,
      gl::TEXTURE_MIN_FILTER,
      opengl_min_filter(sampler.min_filter) as GLint,
    );
    gl::TexParameteri(
      gl::TEXTURE_2D,
      gl::TEXTURE_MAG_FILTER,
      opengl_mag_filter(sampler.mag_filter) as GLint,
    );
  }
}

fn opengl_wrap(wrap: Wrap) -> GLenum {
  match wrap {
    Wrap::ClampToEdge => gl::CLAMP_TO_EDGE,
    Wrap::Repeat => gl::REPEAT,
    Wrap::MirroredRepeat => gl::MIRRORED_REPEAT,
  }
}

fn opengl_min_filter(filter: MinFilter) -> GLenum {
  match filter {
    MinFilter::Nearest => gl::NEAREST,
    MinFilter::Linear => gl::LINEAR,
    MinFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
  }
}

fn opengl_mag_filter(filter: MagFilter) -> GLenum {
  match filter {
    MagFilter::Nearest => gl::NEAREST,
    MagFilter::Linear => gl::LINEAR,
  }
}

// (internal format, format) couple of a texel format; all formats use normalized unsigned bytes.
fn opengl_pixel_format(format: TexelFormat) -> (GLenum, GLenum) {
  match format {
    TexelFormat::Red => (gl::R8, gl::RED),
    TexelFormat::RedGreen => (gl::RG8, gl::RG),
    TexelFormat::RGB => (gl::RGB8, gl::RGB),
    TexelFormat::RGBA => (gl::RGBA8, gl::RGBA),
  }
}

unsafe impl Texture for GL33 {
  type TextureRepr = TextureWrapper;

  unsafe fn new_texture(
    &mut self,
    sampler: Sampler,
    texels: Option<(&[u8], [u32; 2], TexelFormat)>,
  ) -> Result<Self::TextureRepr, TextureError> {
    let mut handle: GLuint = 0;

    gl::GenTextures(1, &mut handle);

    if handle == 0 {
      return Err(TextureError::CannotCreate);
    }

    self.state.borrow_mut().bind_texture(handle);
    apply_sampler_to_texture(sampler);

    if let Some((pixels, [width, height], format)) = texels {
      let (internal_format, format) = opengl_pixel_format(format);

      // rows of RGB and single-channel images are rarely 4-byte aligned
      gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
      gl::TexImage2D(
        gl::TEXTURE_2D,
        0,
        internal_format as GLint,
        width as GLsizei,
        height as GLsizei,
        0,
        format,
        gl::UNSIGNED_BYTE,
        pixels.as_ptr() as _,
      );
      gl::GenerateMipmap(gl::TEXTURE_2D);
    }

    Ok(TextureWrapper {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_texture(texture: &Self::TextureRepr, unit: u32) {
    let mut state = texture.state.borrow_mut();
    state.set_texture_unit(unit);
    state.bind_texture(texture.handle);
  }

  unsafe fn unbind_texture(texture: &Self::TextureRepr, unit: u32) {
    let mut state = texture.state.borrow_mut();
    state.set_texture_unit(unit);
    state.bind_texture(0);
  }

  unsafe fn texture_handle(texture: &Self::TextureRepr) -> u32 {
    texture.handle
  }
}
