//! File system platform services.

use crate::{Features, PlatformServices};
use image::{GenericImageView, ImageError};
use lantern::texture::Texels;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{error, fmt};

/// Decode the image at `path` into texels, bottom row first.
///
/// Images are flipped vertically since texture coordinates start at the bottom. Pixels are
/// converted to 8 bits per channel, keeping the channel count of the file (at most 4).
pub fn load_texels(path: impl AsRef<Path>) -> Result<Texels, FetchError> {
  let path = path.as_ref();
  let img = image::open(path)
    .map_err(|source| FetchError::Image {
      path: path.to_owned(),
      source,
    })?
    .flipv();

  let (width, height) = img.dimensions();
  let channels = img.color().channel_count().min(4);

  let pixels = match channels {
    1 => img.to_luma8().into_raw(),
    2 => img.to_luma_alpha8().into_raw(),
    3 => img.to_rgb8().into_raw(),
    _ => img.to_rgba8().into_raw(),
  };

  log::info!(
    "loaded {} ({}x{}, {} channels)",
    path.display(),
    width,
    height,
    channels
  );

  Ok(Texels {
    pixels,
    width,
    height,
    channels,
  })
}

/// Platform services reading from two resource directories.
#[derive(Debug)]
pub struct FsPlatformServices {
  shader_root: PathBuf,
  texture_root: PathBuf,
  textures: HashMap<String, Texels>,
}

impl FsPlatformServices {
  /// Create the services and decode the textures `features` asks for.
  ///
  /// Textures that fail to decode are only reported here; fetching them later reports the error
  /// again.
  pub fn new(
    shader_root: impl Into<PathBuf>,
    texture_root: impl Into<PathBuf>,
    features: &Features,
  ) -> Self {
    let mut services = FsPlatformServices {
      shader_root: shader_root.into(),
      texture_root: texture_root.into(),
      textures: HashMap::new(),
    };

    for name in features.textures() {
      if let Err(e) = services.fetch_texture(name) {
        log::error!("{}", e);
      }
    }

    services
  }
}

impl PlatformServices for FsPlatformServices {
  type FetchError = FetchError;

  fn fetch_texture(&mut self, name: &str) -> Result<&Texels, Self::FetchError> {
    if !self.textures.contains_key(name) {
      let texels = load_texels(self.texture_root.join(name))?;
      self.textures.insert(name.to_owned(), texels);
    }

    self
      .textures
      .get(name)
      .ok_or_else(|| FetchError::UnknownTexture(name.to_owned()))
  }

  fn shader_path(&self, name: &str) -> PathBuf {
    self.shader_root.join(name)
  }
}

/// Errors that can happen while fetching resources.
#[non_exhaustive]
#[derive(Debug)]
pub enum FetchError {
  /// The texture is not known.
  UnknownTexture(String),
  /// The image couldn’t be opened or decoded.
  Image {
    /// Path of the image.
    path: PathBuf,
    /// Decoding error.
    source: ImageError,
  },
}

impl fmt::Display for FetchError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      FetchError::UnknownTexture(ref name) => write!(f, "unknown texture: {}", name),
      FetchError::Image { ref path, ref source } => {
        write!(f, "cannot load texture {}: {}", path.display(), source)
      }
    }
  }
}

impl error::Error for FetchError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      FetchError::UnknownTexture(_) => None,
      FetchError::Image { source, .. } => Some(source),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{Rgb, RgbImage};

  fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lantern-lessons-{}-{}", std::process::id(), name))
  }

  #[test]
  fn texels_are_flipped_and_sized() {
    let path = temp_path("flip.png");

    // red top row, blue bottom row
    let img = RgbImage::from_fn(3, 2, |_, y| {
      if y == 0 {
        Rgb([255, 0, 0])
      } else {
        Rgb([0, 0, 255])
      }
    });
    img.save(&path).unwrap();

    let texels = load_texels(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!((texels.width, texels.height, texels.channels), (3, 2, 3));
    assert_eq!(texels.pixels.len(), texels.expected_len());
    assert_eq!(&texels.pixels[..3], &[0, 0, 255]);
    assert_eq!(&texels.pixels[9..12], &[255, 0, 0]);
  }

  #[test]
  fn missing_image_is_an_error() {
    let err = load_texels(temp_path("missing.png")).unwrap_err();
    assert!(matches!(err, FetchError::Image { .. }));
  }

  #[test]
  fn missing_textures_are_reported_not_fatal() {
    let root = temp_path("no-textures");
    let features = Features::none().texture("container.png");
    let mut services = FsPlatformServices::new(&root, &root, &features);

    assert!(services.fetch_texture("container.png").is_err());
    assert_eq!(services.shader_path("a.glsl"), root.join("a.glsl"));
  }
}
