//! Texture backend.

use crate::texture::{Sampler, TexelFormat, TextureError};

/// Texture backend.
pub unsafe trait Texture {
  /// Backend representation of a 2D texture. Dropping it deletes the GPU texture but must not
  /// change the recorded texture bindings.
  type TextureRepr;

  /// Create a 2D texture with `sampler` applied.
  ///
  /// When `texels` is provided, they are uploaded as level 0 in `format` and mipmaps are generated.
  /// The texture is left bound to the active unit.
  unsafe fn new_texture(
    &mut self,
    sampler: Sampler,
    texels: Option<(&[u8], [u32; 2], TexelFormat)>,
  ) -> Result<Self::TextureRepr, TextureError>;

  /// Activate texture unit `unit` and bind `texture` to it.
  unsafe fn bind_texture(texture: &Self::TextureRepr, unit: u32);

  /// Activate texture unit `unit` and bind no texture to it.
  unsafe fn unbind_texture(texture: &Self::TextureRepr, unit: u32);

  /// Backend handle of the texture.
  unsafe fn texture_handle(texture: &Self::TextureRepr) -> u32;
}
