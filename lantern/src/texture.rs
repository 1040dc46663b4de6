//! 2D textures.
//!
//! A [`Texture`] is created from already-decoded [`Texels`]; decoding image files is left to the
//! application. When decoding fails, [`Texture::empty`] gives a texture object with no content so
//! that rendering code can carry on.

use crate::backend::texture::Texture as TextureBackend;
use crate::context::GraphicsContext;
use std::{error, fmt};

/// Decoded pixel data, rows bottom to top.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Texels {
  /// Raw 8-bit channels, row after row, with no padding between rows.
  pub pixels: Vec<u8>,
  /// Width in pixels.
  pub width: u32,
  /// Height in pixels.
  pub height: u32,
  /// Number of channels per pixel.
  pub channels: u8,
}

impl Texels {
  /// Number of bytes `pixels` must hold for the announced size and channel count.
  pub fn expected_len(&self) -> usize {
    self.width as usize * self.height as usize * self.channels as usize
  }
}

/// How texels are laid out on the GPU, picked from the channel count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TexelFormat {
  /// One channel.
  Red,
  /// Two channels.
  RedGreen,
  /// Three channels.
  RGB,
  /// Four channels.
  RGBA,
}

impl TexelFormat {
  /// Format for a number of channels.
  pub fn from_channels(channels: u8) -> Option<Self> {
    match channels {
      1 => Some(TexelFormat::Red),
      2 => Some(TexelFormat::RedGreen),
      3 => Some(TexelFormat::RGB),
      4 => Some(TexelFormat::RGBA),
      _ => None,
    }
  }

  /// Number of channels of the format.
  pub fn channels(self) -> u8 {
    match self {
      TexelFormat::Red => 1,
      TexelFormat::RedGreen => 2,
      TexelFormat::RGB => 3,
      TexelFormat::RGBA => 4,
    }
  }
}

/// Wrapping mode of texture coordinates out of `[0, 1]`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Wrap {
  /// Clamp to the edge texel.
  ClampToEdge,
  /// Repeat the texture.
  Repeat,
  /// Repeat the texture, mirroring every other copy.
  MirroredRepeat,
}

/// Minification filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MinFilter {
  /// Nearest texel.
  Nearest,
  /// Linear interpolation between texels.
  Linear,
  /// Linear interpolation between texels and between mipmaps.
  LinearMipmapLinear,
}

/// Magnification filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MagFilter {
  /// Nearest texel.
  Nearest,
  /// Linear interpolation between texels.
  Linear,
}

/// Sampling configuration of a texture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sampler {
  /// Wrapping along `s`.
  pub wrap_s: Wrap,
  /// Wrapping along `t`.
  pub wrap_t: Wrap,
  /// Minification filter.
  pub min_filter: MinFilter,
  /// Magnification filter.
  pub mag_filter: MagFilter,
}

impl Default for Sampler {
  /// Defaults:
  ///
  /// - `wrap_s` and `wrap_t` set to `Wrap::Repeat`.
  /// - `min_filter` set to `MinFilter::LinearMipmapLinear`.
  /// - `mag_filter` set to `MagFilter::Linear`.
  fn default() -> Self {
    Sampler {
      wrap_s: Wrap::Repeat,
      wrap_t: Wrap::Repeat,
      min_filter: MinFilter::LinearMipmapLinear,
      mag_filter: MagFilter::Linear,
    }
  }
}

/// Errors that textures can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextureError {
  /// The backend could not allocate a texture object.
  CannotCreate,
  /// No GPU format matches this number of channels.
  UnsupportedChannels(u8),
  /// The pixel buffer doesn’t match the announced size.
  SizeMismatch {
    /// Bytes needed for the announced size.
    expected: usize,
    /// Bytes actually provided.
    provided: usize,
  },
}

impl fmt::Display for TextureError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      TextureError::CannotCreate => f.write_str("cannot create texture"),
      TextureError::UnsupportedChannels(n) => write!(f, "unsupported channel count: {}", n),
      TextureError::SizeMismatch { expected, provided } => write!(
        f,
        "texel size mismatch: expected {} bytes, got {}",
        expected, provided
      ),
    }
  }
}

impl error::Error for TextureError {}

/// A 2D texture.
pub struct Texture<B>
where
  B: ?Sized + TextureBackend,
{
  repr: B::TextureRepr,
  size: [u32; 2],
  channels: u8,
  valid: bool,
}

impl<B> Texture<B>
where
  B: ?Sized + TextureBackend,
{
  /// Create a texture and upload `texels` into it.
  pub fn new<C>(ctx: &mut C, texels: &Texels, sampler: Sampler) -> Result<Self, TextureError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let format = TexelFormat::from_channels(texels.channels)
      .ok_or(TextureError::UnsupportedChannels(texels.channels))?;

    let expected = texels.expected_len();
    if texels.pixels.len() != expected {
      return Err(TextureError::SizeMismatch {
        expected,
        provided: texels.pixels.len(),
      });
    }

    let size = [texels.width, texels.height];
    let repr = unsafe {
      ctx
        .backend()
        .new_texture(sampler, Some((texels.pixels.as_slice(), size, format)))?
    };

    Ok(Texture {
      repr,
      size,
      channels: texels.channels,
      valid: true,
    })
  }

  /// Create a texture object with no content.
  ///
  /// Used in place of a texture whose image couldn’t be decoded; [`Texture::is_valid`] is `false`.
  pub fn empty<C>(ctx: &mut C) -> Result<Self, TextureError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let repr = unsafe { ctx.backend().new_texture(Sampler::default(), None)? };

    Ok(Texture {
      repr,
      size: [0, 0],
      channels: 0,
      valid: false,
    })
  }

  /// Activate texture unit `unit` and bind this texture to it.
  pub fn bind(&self, unit: u32) {
    unsafe { B::bind_texture(&self.repr, unit) }
  }

  /// Activate texture unit `unit` and bind no texture to it.
  pub fn unbind(&self, unit: u32) {
    unsafe { B::unbind_texture(&self.repr, unit) }
  }

  /// Whether texels were uploaded.
  pub fn is_valid(&self) -> bool {
    self.valid
  }

  /// Width and height in pixels; zero for an empty texture.
  pub fn size(&self) -> [u32; 2] {
    self.size
  }

  /// Number of channels of the uploaded texels; zero for an empty texture.
  pub fn channels(&self) -> u8 {
    self.channels
  }

  /// Backend handle.
  pub fn handle(&self) -> u32 {
    unsafe { B::texture_handle(&self.repr) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_follow_channel_count() {
    assert_eq!(TexelFormat::from_channels(3), Some(TexelFormat::RGB));
    assert_eq!(TexelFormat::from_channels(4), Some(TexelFormat::RGBA));
    assert_eq!(TexelFormat::from_channels(0), None);
    assert_eq!(TexelFormat::from_channels(5), None);

    for n in 1..=4 {
      assert_eq!(TexelFormat::from_channels(n).map(TexelFormat::channels), Some(n));
    }
  }

  #[test]
  fn expected_len_counts_every_channel() {
    let texels = Texels {
      pixels: Vec::new(),
      width: 3,
      height: 2,
      channels: 4,
    };

    assert_eq!(texels.expected_len(), 24);
  }
}
