//! Fly-through camera.
//!
//! Euler-angle camera driven by keyboard, mouse and scroll input. Angles are in degrees.

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};

/// Default yaw; looks down `-Z`.
pub const YAW: f32 = -90.;
/// Default pitch.
pub const PITCH: f32 = 0.;
/// Default movement speed, in units per second.
pub const SPEED: f32 = 2.5;
/// Default mouse sensitivity, in degrees per pixel.
pub const SENSITIVITY: f32 = 0.1;
/// Default (and maximum) vertical field of view.
pub const ZOOM: f32 = 45.;

const MAX_PITCH: f32 = 89.;
const MIN_ZOOM: f32 = 1.;

/// Direction to move the camera in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CameraMovement {
  Forward,
  Backward,
  Left,
  Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
  pub position: Point3<f32>,
  pub front: Vector3<f32>,
  pub up: Vector3<f32>,
  pub right: Vector3<f32>,
  pub world_up: Vector3<f32>,
  pub yaw: f32,
  pub pitch: f32,
  pub movement_speed: f32,
  pub mouse_sensitivity: f32,
  pub zoom: f32,
}

impl Default for Camera {
  fn default() -> Self {
    Camera::new(Point3::new(0., 0., 0.))
  }
}

impl Camera {
  /// Camera at `position` with default angles, looking down `-Z` with `+Y` up.
  pub fn new(position: Point3<f32>) -> Self {
    Camera::with_angles(position, Vector3::unit_y(), YAW, PITCH)
  }

  pub fn with_angles(
    position: Point3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
  ) -> Self {
    let mut camera = Camera {
      position,
      front: -Vector3::unit_z(),
      up: world_up,
      right: Vector3::unit_x(),
      world_up,
      yaw,
      pitch,
      movement_speed: SPEED,
      mouse_sensitivity: SENSITIVITY,
      zoom: ZOOM,
    };

    camera.update_vectors();
    camera
  }

  /// Look-at view matrix.
  pub fn view_matrix(&self) -> Matrix4<f32> {
    Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
  }

  /// Move along the camera axes for `dt` seconds.
  pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
    let velocity = self.movement_speed * dt;

    match direction {
      CameraMovement::Forward => self.position += self.front * velocity,
      CameraMovement::Backward => self.position -= self.front * velocity,
      CameraMovement::Left => self.position -= self.right * velocity,
      CameraMovement::Right => self.position += self.right * velocity,
    }
  }

  /// Turn by a cursor offset, in pixels; `dy` grows upward.
  ///
  /// With `constrain_pitch`, pitch stays within ±89° so the view never flips.
  pub fn process_mouse_movement(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
    self.yaw += dx * self.mouse_sensitivity;
    self.pitch += dy * self.mouse_sensitivity;

    if constrain_pitch {
      self.pitch = self.pitch.max(-MAX_PITCH).min(MAX_PITCH);
    }

    self.update_vectors();
  }

  /// Zoom in or out; the field of view stays within [1°, 45°].
  pub fn process_mouse_scroll(&mut self, dy: f32) {
    self.zoom = (self.zoom - dy).max(MIN_ZOOM).min(ZOOM);
  }

  fn update_vectors(&mut self) {
    let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

    self.front = Vector3::new(
      yaw.cos() * pitch.cos(),
      pitch.sin(),
      yaw.sin() * pitch.cos(),
    )
    .normalize();
    self.right = self.front.cross(self.world_up).normalize();
    self.up = self.right.cross(self.front).normalize();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const EPSILON: f32 = 1e-5;

  fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
    assert!((a - b).magnitude() < EPSILON, "{:?} != {:?}", a, b);
  }

  #[test]
  fn default_camera_looks_down_negative_z() {
    let camera = Camera::default();

    assert_close(camera.front, -Vector3::unit_z());
    assert_close(camera.right, Vector3::unit_x());
    assert_close(camera.up, Vector3::unit_y());
    assert_eq!(camera.zoom, ZOOM);
  }

  #[test]
  fn pitch_is_clamped() {
    let mut camera = Camera::default();

    camera.process_mouse_movement(0., 10_000., true);
    assert_eq!(camera.pitch, 89.);

    camera.process_mouse_movement(0., -20_000., true);
    assert_eq!(camera.pitch, -89.);
  }

  #[test]
  fn pitch_is_free_when_unconstrained() {
    let mut camera = Camera::default();

    camera.process_mouse_movement(0., 1_000., false);
    assert!((camera.pitch - 100.).abs() < EPSILON);
  }

  #[test]
  fn zoom_is_clamped() {
    let mut camera = Camera::default();

    camera.process_mouse_scroll(100.);
    assert_eq!(camera.zoom, 1.);

    camera.process_mouse_scroll(-100.);
    assert_eq!(camera.zoom, 45.);

    camera.process_mouse_scroll(5.);
    assert_eq!(camera.zoom, 40.);
  }

  #[test]
  fn keyboard_moves_along_front_and_right() {
    let mut camera = Camera::new(Point3::new(0., 0., 3.));

    camera.process_keyboard(CameraMovement::Forward, 0.4);
    assert!((camera.position.z - 2.).abs() < EPSILON);

    camera.process_keyboard(CameraMovement::Right, 0.4);
    assert!((camera.position.x - 1.).abs() < EPSILON);
  }

  #[test]
  fn yaw_turns_the_front() {
    let mut camera = Camera::default();

    // 900 px at 0.1°/px
    camera.process_mouse_movement(900., 0., true);
    assert_close(camera.front, Vector3::unit_x());
  }
}
