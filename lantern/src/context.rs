//! Graphics context.
//!
//! A graphics context is an object that gives access to a backend, the thing that actually talks
//! to a graphics device (a GPU driver, or an in-memory recorder in tests).
//!
//! This crate doesn’t create such contexts. Instead, a windowing crate (or a test) builds one
//! once a device context is current and passes it to the constructors of this crate.
//!
//! # On context and threads
//!
//!   - An object which type implements `GraphicsContext` must be `!Send` and `!Sync`: the bindings
//!     it tracks belong to the thread that made the device context current.
//!   - You can only create a single context per thread.

/// Class of graphics context.
///
/// Such a context must not be Send nor Sync, which means that you cannot share it between
/// threads in any way (move / borrow).
pub unsafe trait GraphicsContext {
  /// Backend this context forwards to.
  type Backend: ?Sized;

  /// Access the backend.
  fn backend(&mut self) -> &mut Self::Backend;
}
