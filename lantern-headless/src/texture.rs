use crate::state::{Call, HeadlessState};
use crate::Headless;
use lantern::backend::texture::Texture;
use lantern::texture::{Sampler, TexelFormat, TextureError};
use std::{cell::RefCell, rc::Rc};

/// A recorded texture.
#[derive(Debug)]
pub struct HeadlessTexture {
  handle: u32,
  state: Rc<RefCell<HeadlessState>>,
}

impl Drop for HeadlessTexture {
  fn drop(&mut self) {
    self
      .state
      .borrow_mut()
      .record(Call::DeleteTexture(self.handle));
  }
}

unsafe impl Texture for Headless {
  type TextureRepr = HeadlessTexture;

  unsafe fn new_texture(
    &mut self,
    sampler: Sampler,
    texels: Option<(&[u8], [u32; 2], TexelFormat)>,
  ) -> Result<Self::TextureRepr, TextureError> {
    let mut state = self.state.borrow_mut();
    let handle = state.gen_texture();

    state.record(Call::CreateTexture { handle, sampler });
    state.bind_texture(handle);

    if let Some((_, size, format)) = texels {
      state.record(Call::TexImage { size, format });
      state.record(Call::GenerateMipmap);
    }

    Ok(HeadlessTexture {
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
