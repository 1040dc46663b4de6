use crate::PlatformServices;
use lantern::backend::Backend;
use lantern::context::GraphicsContext;
use lantern::texture::{Sampler, Texture, TextureError};

/// Background color shared by every lesson.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.];

/// Upload the texture named `name`.
///
/// A texture that can’t be fetched or uploaded is logged and replaced by an empty one, so that the
/// lesson keeps running (and samples black).
pub fn load_texture<B>(
  context: &mut impl GraphicsContext<Backend = B>,
  platform: &mut impl PlatformServices,
  name: &str,
) -> Result<Texture<B>, TextureError>
where
  B: ?Sized + Backend,
{
  let uploaded = match platform.fetch_texture(name) {
    Ok(texels) => Texture::new(context, texels, Sampler::default()),

    Err(e) => {
      log::error!("{}", e);
      return Texture::empty(context);
    }
  };

  match uploaded {
    Ok(texture) => Ok(texture),

    Err(TextureError::CannotCreate) => Err(TextureError::CannotCreate),

    Err(e) => {
      log::error!("cannot upload {}: {}", name, e);
      Texture::empty(context)
    }
  }
}

/// Viewport covering a whole framebuffer.
pub fn full_viewport(width: u32, height: u32) -> [i32; 4] {
  [0, 0, width as i32, height as i32]
}
