//! Pivot Physics - 2D Rigid Body Core
//!
//! This crate holds the authoritative state of rigid bodies in a planar
//! simulation and the per-step algorithms a solver and collision pipeline
//! build on. It performs no collision detection and no constraint solving.
//!
//! # Features
//!
//! - Static, kinetic and dynamic bodies
//! - Mass, centroid and inertia aggregated from circle, segment and polygon shapes
//! - Semi-implicit Euler integration split into velocity and position passes
//! - Forces, torques and impulses
//! - Sleep state with rest timers
//! - Joint-aware collision filtering
//! - Records for saving and rebuilding bodies
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  RigidBody                    │
//! │  ┌───────────┐  ┌──────────┐  ┌────────────┐  │
//! │  │ Transform │  │ MassData │  │ JointLinks │  │
//! │  └───────────┘  └──────────┘  └────────────┘  │
//! │  ┌─────────────────────────────────────────┐  │
//! │  │        Shapes (owned, by value)         │  │
//! │  └─────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────┘
//!          │                         │
//!          ▼                         ▼
//!    ┌───────────┐            ┌─────────────┐
//!    │  Solver   │            │ Broad phase │
//!    │ (v, w, p) │            │  (Bounds)   │
//!    └───────────┘            └─────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pivot_physics::prelude::*;
//!
//! let ids = BodyIdAllocator::new();
//! let config = PhysicsConfig::default();
//!
//! let mut body = RigidBodyDesc::dynamic().with_position(0.0, 10.0).build(&ids);
//! body.add_shape(Shape::circle(Vec2::ZERO, 0.5)?);
//! body.reset_mass_data()?;
//!
//! body.update_velocity_with(&config);
//! // ... solver adjusts velocities here ...
//! body.update_position_with(&config);
//! body.sync_transform();
//! body.cache_data();
//!
//! assert!(body.position().y < 10.0);
//! # Ok::<(), PhysicsError>(())
//! ```

pub mod body;
pub mod config;
pub mod error;
pub mod id;
pub mod joint;
pub mod mass;
pub mod record;
pub mod shape;

pub mod prelude {
    //! Common imports for rigid body functionality
    pub use crate::body::{BodyKind, RigidBody, RigidBodyDesc, SleepState};
    pub use crate::config::{PhysicsConfig, SleepConfig};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::id::{BodyId, BodyIdAllocator, ShapeKey};
    pub use crate::joint::{JointId, JointLink};
    pub use crate::mass::MassData;
    pub use crate::record::{BodyRecord, RecordKind};
    pub use crate::shape::{Shape, ShapeKind, ShapeRecord, WorldGeometry};
    pub use pivot_math::{Bounds, Transform, Vec2};
}

pub use prelude::*;
