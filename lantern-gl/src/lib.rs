//! OpenGL backends.
//!
//! This crate exports [OpenGL](https://www.khronos.org/opengl/) backends for lantern. Pick the
//! backend type ([`GL33`]) once a context is current and its function pointers are loaded, then
//! hand it to lantern through a graphics context (see `lantern-glfw`).

pub mod gl33;

pub use gl33::GL33;
