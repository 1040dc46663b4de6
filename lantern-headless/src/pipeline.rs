use crate::state::Call;
use crate::Headless;
use lantern::backend::pipeline::Pipeline;

unsafe impl Pipeline for Headless {
  unsafe fn set_clear_color(&mut self, rgba: [f32; 4]) {
    self.state.borrow_mut().set_clear_color(rgba);
  }

  unsafe fn clear(&mut self) {
    self.state.borrow_mut().record(Call::Clear);
  }

  unsafe fn set_viewport(&mut self, viewport: [i32; 4]) {
    self.state.borrow_mut().set_viewport(viewport);
  }

  unsafe fn draw_elements(&mut self, count: usize) {
    self
      .state
      .borrow_mut()
      .record(Call::DrawElements { count });
  }

  unsafe fn draw_arrays(&mut self, first: usize, count: usize) {
    self
      .state
      .borrow_mut()
      .record(Call::DrawArrays { first, count });
  }
}
