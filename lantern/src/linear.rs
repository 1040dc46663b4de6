//! Aliases types used to make it easier using long linear algebra types.
//!
//! Matrices are column-major: `m[c][r]` is the element at column `c`, row `r`, which is the layout
//! shaders expect when uploaded without transposition.

/// 2-component floating vector.
pub type V2 = [f32; 2];

/// 3-component floating vector.
pub type V3 = [f32; 3];

/// 4-component floating vector.
pub type V4 = [f32; 4];

/// 3x3 floating matrix.
pub type M33 = [[f32; 3]; 3];

/// 4x4 floating matrix.
pub type M44 = [[f32; 4]; 4];

