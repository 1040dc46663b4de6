//! # Thin graphics handles for step-by-step rendering lessons
//!
//! lantern wraps the handful of GPU objects a first OpenGL program needs behind small, scoped
//! Rust types:
//!
//! - [`VertexBuffer`](buffer::VertexBuffer) and [`ElementBuffer`](buffer::ElementBuffer) own one
//!   GPU buffer each, uploaded once at creation.
//! - [`VertexArray`](vertex_array::VertexArray) owns one vertex array object and describes how
//!   vertex attributes are laid out.
//! - [`Program`](shader::Program) compiles a vertex and a fragment stage, links them and caches
//!   uniform locations.
//! - [`Texture`](texture::Texture) owns one 2D texture uploaded from decoded texels.
//! - [`Renderer`](renderer::Renderer) binds a program and a vertex array and issues one draw call.
//!
//! Every handle is released when its owner goes out of scope.
//!
//! # Backends
//!
//! This crate does not talk to a GPU by itself. It is written against the traits of the
//! [`backend`] module, which a backend crate implements. Two exist:
//!
//! - `lantern-gl`, the OpenGL 3.3 backend used by real applications.
//! - `lantern-headless`, an in-memory backend that records every call it receives, used to test
//!   rendering code without a window.
//!
//! A backend is reached through a [`GraphicsContext`](context::GraphicsContext), which a windowing
//! crate (`lantern-glfw`) hands out once a context is current.
//!
//! # Bindings
//!
//! Like the API it models, lantern has a notion of *current binding*: the program in use, the
//! bound vertex array, the buffer bound to each target, the texture bound to each unit. Those live
//! in one explicit state object per backend instance rather than in a process global. Binding a
//! resource changes that state; dropping a resource releases the GPU object but leaves the state
//! untouched, so a dropped-while-bound resource is still reported as bound until something else is
//! bound over it or `unbind` is called.
//!
//! # Failure policy
//!
//! Shader compilation and linking are lenient: a program that fails to build is still returned,
//! flagged unusable and carrying its diagnostics. Uniform writes to such a program, or to names the
//! program does not declare, are dropped. [`Program::into_result`](shader::Program::into_result)
//! offers the strict view for callers that prefer a typed error.

pub mod backend;
pub mod buffer;
pub mod context;
pub mod linear;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex_array;
