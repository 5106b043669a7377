//! # pivot_math - Planar Math Primitives
//!
//! Small, copyable 2D math types used by the rigid body core:
//! - [`Vec2`] for points, velocities and forces
//! - [`Transform`] for local <-> world conversion
//! - [`Bounds`] for axis-aligned extents fed to the broad phase

pub mod vector;
pub mod transform;
pub mod bounds;

pub use vector::*;
pub use transform::*;
pub use bounds::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

pub mod prelude {
    pub use crate::vector::Vec2;
    pub use crate::transform::Transform;
    pub use crate::bounds::Bounds;
    pub use crate::{radians, degrees};
}
