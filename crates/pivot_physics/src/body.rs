//! Rigid body state and per-step dynamics
//!
//! A body owns its shapes and keeps pose, motion and mass distribution
//! consistent. The world drives it each step in this order:
//!
//! ```text
//! update_velocity -> [solver] -> update_position -> sync_transform -> cache_data
//! ```
//!
//! Two positions are tracked: the transform places the body's local origin
//! (where shapes are defined), while `p` is the world center of mass that
//! integration moves. `p == transform(centroid)` after `set_transform`,
//! `reset_mass_data` and `sync_transform`.

use crate::config::{PhysicsConfig, SleepConfig};
use crate::error::{PhysicsError, Result};
use crate::id::{BodyId, BodyIdAllocator, ShapeKey};
use crate::joint::{JointId, JointLink};
use crate::mass::{self, MassData};
use crate::record::BodyRecord;
use crate::shape::Shape;
use pivot_math::{Bounds, Transform, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Static body - never moves, infinite mass
    Static,
    /// Kinetic body - classified separately, simulated like a dynamic body
    Kinetic,
    /// Dynamic body - fully simulated
    #[default]
    Dynamic,
}

/// Sleep state of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepState {
    Awake,
    /// Bodies start asleep until something wakes them
    #[default]
    Asleep,
}

/// Description for creating a rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    /// Type of rigid body
    pub kind: BodyKind,
    /// Initial local origin
    pub position: Vec2,
    /// Initial angle (radians)
    pub angle: f32,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position: Vec2::ZERO,
            angle: 0.0,
        }
    }
}

impl RigidBodyDesc {
    /// Create a static body description
    pub fn fixed() -> Self {
        Self {
            kind: BodyKind::Static,
            ..Default::default()
        }
    }

    /// Create a dynamic body description
    pub fn dynamic() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            ..Default::default()
        }
    }

    /// Create a kinetic body description
    pub fn kinetic() -> Self {
        Self {
            kind: BodyKind::Kinetic,
            ..Default::default()
        }
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set angle
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Build a body with a fresh id from `ids`
    pub fn build(&self, ids: &BodyIdAllocator) -> RigidBody {
        RigidBody::new(ids, self.kind, self.position, self.angle)
    }
}

/// A rigid body in the plane
#[derive(Debug)]
pub struct RigidBody {
    id: BodyId,
    name: String,
    kind: BodyKind,

    /// Local to world transform
    xf: Transform,
    /// Local center of mass
    centroid: Vec2,

    /// World center of mass
    p: Vec2,
    /// Orientation
    a: f32,
    /// Linear velocity
    v: Vec2,
    /// Angular velocity
    w: f32,
    /// Accumulated force
    f: Vec2,
    /// Accumulated torque
    t: f32,

    m: f32,
    m_inv: f32,
    i: f32,
    i_inv: f32,

    sleep_time: f32,
    sleep_state: SleepState,

    shapes: Vec<(ShapeKey, Shape)>,
    next_shape_key: u32,
    joints: HashMap<JointId, JointLink>,

    /// Union of all shape bounds
    bounds: Bounds,
    step_count: u64,
}

impl RigidBody {
    /// Create a body with its local origin at `position`.
    ///
    /// Mass and inertia start at the infinite sentinel; call
    /// [`RigidBody::reset_mass_data`] once shapes are attached.
    pub fn new(ids: &BodyIdAllocator, kind: BodyKind, position: Vec2, angle: f32) -> Self {
        let id = ids.next();
        Self {
            id,
            name: format!("body{}", id),
            kind,
            xf: Transform::new(position, angle),
            centroid: Vec2::ZERO,
            p: position,
            a: angle,
            v: Vec2::ZERO,
            w: 0.0,
            f: Vec2::ZERO,
            t: 0.0,
            m: f32::INFINITY,
            m_inv: 0.0,
            i: f32::INFINITY,
            i_inv: 0.0,
            sleep_time: 0.0,
            sleep_state: SleepState::Asleep,
            shapes: Vec::new(),
            next_shape_key: 0,
            joints: HashMap::new(),
            bounds: Bounds::EMPTY,
            step_count: 0,
        }
    }

    /// Deep copy with a fresh id, independently owned shapes and recomputed
    /// mass data. Motion state is not copied.
    pub fn duplicate(&self, ids: &BodyIdAllocator) -> Result<Self> {
        let mut body = Self::new(ids, self.kind, self.xf.t, self.a);
        for (_, shape) in &self.shapes {
            body.add_shape(shape.duplicate());
        }
        body.reset_mass_data()?;
        log::debug!("Duplicated {} as {}", self.name, body.name);
        Ok(body)
    }

    /// Snapshot placement and shapes
    pub fn serialize(&self) -> BodyRecord {
        BodyRecord {
            kind: self.kind.into(),
            name: self.name.clone(),
            position: self.xf.t,
            angle: self.xf.a,
            shapes: self.shapes.iter().map(|(_, shape)| shape.serialize()).collect(),
        }
    }

    /// [`RigidBody::serialize`] as JSON
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.serialize())?)
    }

    /// Rebuild a body from a record. The record's name is kept; the id is fresh.
    pub fn from_record(record: &BodyRecord, ids: &BodyIdAllocator) -> Result<Self> {
        let mut body = Self::new(ids, record.kind.into(), record.position, record.angle);
        body.name = record.name.clone();
        for shape in &record.shapes {
            body.add_shape(Shape::from_record(shape)?);
        }
        body.reset_mass_data()?;
        log::debug!("Rebuilt {} with {} shapes", body.name, body.shapes.len());
        Ok(body)
    }

    /// Parse a JSON record and rebuild the body
    pub fn from_json(value: serde_json::Value, ids: &BodyIdAllocator) -> Result<Self> {
        let record: BodyRecord = serde_json::from_value(value)?;
        Self::from_record(&record, ids)
    }

    // ==================== Identity ====================

    /// Unique id
    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Display name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the body
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get body kind
    #[inline]
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Check if static
    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Check if dynamic
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    // ==================== Shapes ====================

    /// Attach a shape. Mass data is stale until [`RigidBody::reset_mass_data`].
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeKey {
        let key = ShapeKey(self.next_shape_key);
        self.next_shape_key += 1;
        shape.set_body(Some(self.id));
        self.shapes.push((key, shape));
        log::trace!("{}: attached shape {:?}", self.name, key);
        key
    }

    /// Detach a shape and hand it back. Unknown keys are ignored.
    pub fn remove_shape(&mut self, key: ShapeKey) -> Option<Shape> {
        let index = self.shapes.iter().position(|(k, _)| *k == key)?;
        let (_, mut shape) = self.shapes.remove(index);
        shape.set_body(None);
        log::trace!("{}: detached shape {:?}", self.name, key);
        Some(shape)
    }

    /// Attached shape by key
    pub fn shape(&self, key: ShapeKey) -> Option<&Shape> {
        self.shapes.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    /// Mutable access to an attached shape. Call
    /// [`RigidBody::reset_mass_data`] after changing its geometry or density.
    pub fn shape_mut(&mut self, key: ShapeKey) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    /// Attached shapes in attach order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().map(|(_, s)| s)
    }

    /// Keys of attached shapes in attach order
    pub fn shape_keys(&self) -> impl Iterator<Item = ShapeKey> + '_ {
        self.shapes.iter().map(|(k, _)| *k)
    }

    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    // ==================== Mass ====================

    /// Set mass. Only positive values or `f32::INFINITY` are accepted, and
    /// static bodies accept only the latter.
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        mass::check_positive("mass", mass)?;
        if self.is_static() && mass != f32::INFINITY {
            return Err(PhysicsError::InvalidMassConfiguration(format!(
                "static body {} must keep infinite mass",
                self.name
            )));
        }
        self.m = mass;
        self.m_inv = mass::inverse(mass);
        Ok(())
    }

    /// Set moment of inertia about the center of mass. Same rules as
    /// [`RigidBody::set_mass`].
    pub fn set_inertia(&mut self, inertia: f32) -> Result<()> {
        mass::check_positive("inertia", inertia)?;
        if self.is_static() && inertia != f32::INFINITY {
            return Err(PhysicsError::InvalidMassConfiguration(format!(
                "static body {} must keep infinite inertia",
                self.name
            )));
        }
        self.i = inertia;
        self.i_inv = mass::inverse(inertia);
        Ok(())
    }

    /// Recompute centroid, mass and inertia from the attached shapes.
    ///
    /// Nothing is written if the shapes do not describe a valid mass
    /// distribution.
    pub fn reset_mass_data(&mut self) -> Result<()> {
        let data = if self.is_static() {
            MassData::INFINITE
        } else {
            match MassData::from_shapes(self.shapes()) {
                Ok(data) => data,
                Err(err) => {
                    log::warn!("{}: mass data rejected: {}", self.name, err);
                    return Err(err);
                }
            }
        };

        self.centroid = data.centroid;
        self.m = data.mass;
        self.m_inv = mass::inverse(data.mass);
        self.i = data.inertia;
        self.i_inv = mass::inverse(data.inertia);

        let old_p = self.p;
        self.p = self.xf.transform(self.centroid);
        if !self.is_static() {
            // Keep the velocity field of the spinning body across the center shift
            self.v += (self.p - old_p).perp() * self.w;
            log::debug!("{}: mass = {} inertia = {}", self.name, self.m, self.i);
        }
        Ok(())
    }

    /// Get mass
    #[inline]
    pub fn mass(&self) -> f32 {
        self.m
    }

    /// Get inverse mass (0 for infinite mass)
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.m_inv
    }

    /// Get moment of inertia about the center of mass
    #[inline]
    pub fn inertia(&self) -> f32 {
        self.i
    }

    /// Get inverse inertia (0 for infinite inertia)
    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        self.i_inv
    }

    /// Center of mass in local coordinates
    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    // ==================== Transform ====================

    /// Place the local origin at `position` with the given angle
    pub fn set_transform(&mut self, position: Vec2, angle: f32) {
        self.xf.set(position, angle);
        self.p = self.xf.transform(self.centroid);
        self.a = angle;
    }

    /// Move the local origin so it agrees with the integrated `p` and `a`
    pub fn sync_transform(&mut self) {
        self.xf.set_rotation(self.a);
        let origin = self.p - self.xf.rotate(self.centroid);
        self.xf.set_position(origin);
    }

    /// Overwrite the center-of-mass pose, e.g. from a position solver.
    /// Call [`RigidBody::sync_transform`] afterwards.
    pub fn set_center_pose(&mut self, p: Vec2, a: f32) {
        self.p = p;
        self.a = a;
    }

    /// Local-to-world transform
    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.xf
    }

    /// World center of mass
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.p
    }

    /// Get rotation angle (radians)
    #[inline]
    pub fn angle(&self) -> f32 {
        self.a
    }

    /// Convert a local point to world coordinates
    #[inline]
    pub fn get_world_point(&self, p: Vec2) -> Vec2 {
        self.xf.transform(p)
    }

    /// Rotate a local vector into world space
    #[inline]
    pub fn get_world_vector(&self, v: Vec2) -> Vec2 {
        self.xf.rotate(v)
    }

    /// Convert a world point to local coordinates
    #[inline]
    pub fn get_local_point(&self, p: Vec2) -> Vec2 {
        self.xf.untransform(p)
    }

    /// Rotate a world vector into local space
    #[inline]
    pub fn get_local_vector(&self, v: Vec2) -> Vec2 {
        self.xf.unrotate(v)
    }

    // ==================== Bounds ====================

    /// Refresh world geometry of every shape and the aggregate bounds
    pub fn cache_data(&mut self) {
        self.bounds.clear();
        for (_, shape) in &mut self.shapes {
            shape.cache_data(&self.xf);
            self.bounds.add_bounds(shape.bounds());
        }
    }

    /// World bounds as of the last [`RigidBody::cache_data`]
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    // ==================== Integration ====================

    /// Integrate accumulated force and torque into velocity, then clear them.
    /// Static bodies are left untouched.
    pub fn update_velocity(&mut self, gravity: Vec2, damping: f32, dt: f32) {
        if self.is_static() {
            return;
        }
        self.v = self.v * damping + (gravity + self.f * self.m_inv) * dt;
        self.w = self.w * damping + self.t * self.i_inv * dt;

        self.f = Vec2::ZERO;
        self.t = 0.0;
    }

    /// Integrate velocity into the center-of-mass pose. Static bodies are
    /// left untouched.
    pub fn update_position(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }
        self.p += self.v * dt;
        self.a += self.w * dt;
    }

    /// [`RigidBody::update_velocity`] with gravity, damping and timestep from `config`
    pub fn update_velocity_with(&mut self, config: &PhysicsConfig) {
        self.update_velocity(config.gravity, config.damping, config.timestep);
    }

    /// [`RigidBody::update_position`] with the timestep from `config`
    pub fn update_position_with(&mut self, config: &PhysicsConfig) {
        self.update_position(config.timestep);
    }

    /// Clear accumulated force and torque
    pub fn reset_force(&mut self) {
        self.f = Vec2::ZERO;
        self.t = 0.0;
    }

    /// Get linear velocity of the center of mass
    #[inline]
    pub fn linear_velocity(&self) -> Vec2 {
        self.v
    }

    /// Get angular velocity
    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.w
    }

    /// Accumulated force
    #[inline]
    pub fn force(&self) -> Vec2 {
        self.f
    }

    /// Accumulated torque
    #[inline]
    pub fn torque(&self) -> f32 {
        self.t
    }

    /// Set linear velocity (ignored for static bodies)
    pub fn set_linear_velocity(&mut self, v: Vec2) {
        if self.is_static() {
            return;
        }
        self.v = v;
    }

    /// Set angular velocity (ignored for static bodies)
    pub fn set_angular_velocity(&mut self, w: f32) {
        if self.is_static() {
            return;
        }
        self.w = w;
    }

    // ==================== Forces & Impulses ====================

    /// Wake the body and report whether it accepts forces at all
    fn prepare_for_force(&mut self) -> bool {
        if self.is_static() {
            return false;
        }
        if !self.is_awake() {
            self.set_awake(true);
        }
        true
    }

    /// Accumulate a force applied at a world point
    pub fn apply_force(&mut self, force: Vec2, point: Vec2) {
        if !self.prepare_for_force() {
            return;
        }
        self.f += force;
        self.t += (point - self.p).cross(force);
    }

    /// Accumulate a force at the center of mass
    pub fn apply_force_to_center(&mut self, force: Vec2) {
        if !self.prepare_for_force() {
            return;
        }
        self.f += force;
    }

    /// Accumulate a torque
    pub fn apply_torque(&mut self, torque: f32) {
        if !self.prepare_for_force() {
            return;
        }
        self.t += torque;
    }

    /// Change velocity immediately by an impulse applied at a world point
    pub fn apply_linear_impulse(&mut self, impulse: Vec2, point: Vec2) {
        if !self.prepare_for_force() {
            return;
        }
        self.v += impulse * self.m_inv;
        self.w += (point - self.p).cross(impulse) * self.i_inv;
    }

    /// Change angular velocity immediately
    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        if !self.prepare_for_force() {
            return;
        }
        self.w += impulse * self.i_inv;
    }

    /// `0.5 (m |v|^2 + i w^2)`. Not finite for static bodies.
    pub fn kinetic_energy(&self) -> f32 {
        let vsq = self.v.dot(self.v);
        let wsq = self.w * self.w;
        0.5 * (self.m * vsq + self.i * wsq)
    }

    // ==================== Sleep ====================

    /// Check if awake
    #[inline]
    pub fn is_awake(&self) -> bool {
        self.sleep_state == SleepState::Awake
    }

    /// Current sleep state
    #[inline]
    pub fn sleep_state(&self) -> SleepState {
        self.sleep_state
    }

    /// Waking clears the sleep timer; sleeping clears motion and keeps the timer
    pub fn set_awake(&mut self, awake: bool) {
        if awake {
            self.sleep_state = SleepState::Awake;
            self.sleep_time = 0.0;
        } else {
            self.sleep_state = SleepState::Asleep;
            self.v = Vec2::ZERO;
            self.w = 0.0;
            self.f = Vec2::ZERO;
            self.t = 0.0;
        }
    }

    /// Wake up the body
    pub fn wake(&mut self) {
        self.set_awake(true);
    }

    /// Put the body to sleep
    pub fn sleep(&mut self) {
        self.set_awake(false);
    }

    /// Time spent below the sleep tolerances
    #[inline]
    pub fn sleep_time(&self) -> f32 {
        self.sleep_time
    }

    /// Advance the rest timer by `dt`, or reset it if the body moves faster
    /// than the tolerances. Returns the new timer.
    pub fn update_sleep_time(&mut self, dt: f32, config: &SleepConfig) -> f32 {
        if self.is_static() {
            self.sleep_time = 0.0;
            return 0.0;
        }
        let lin_tol_sq = config.linear_tolerance * config.linear_tolerance;
        let ang_tol_sq = config.angular_tolerance * config.angular_tolerance;
        if self.w * self.w > ang_tol_sq || self.v.dot(self.v) > lin_tol_sq {
            self.sleep_time = 0.0;
        } else {
            self.sleep_time += dt;
        }
        self.sleep_time
    }

    /// Whether the body has rested long enough to be put to sleep
    pub fn is_sleep_candidate(&self, config: &SleepConfig) -> bool {
        config.enabled && !self.is_static() && self.sleep_time >= config.time_to_sleep
    }

    // ==================== Joints & Filtering ====================

    /// Record participation in a joint
    pub fn link_joint(&mut self, joint: JointId, collide_connected: bool) {
        self.joints.insert(joint, JointLink::new(collide_connected));
        log::trace!("{}: linked {:?}", self.name, joint);
    }

    /// Forget a joint
    pub fn unlink_joint(&mut self, joint: JointId) -> Option<JointLink> {
        let link = self.joints.remove(&joint);
        if link.is_some() {
            log::trace!("{}: unlinked {:?}", self.name, joint);
        }
        link
    }

    /// Joints this body belongs to
    pub fn joints(&self) -> impl Iterator<Item = (&JointId, &JointLink)> {
        self.joints.iter()
    }

    #[inline]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Whether the two bodies share any joint
    pub fn is_joined_to(&self, other: &RigidBody) -> bool {
        self.joints.keys().any(|id| other.joints.contains_key(id))
    }

    /// Whether contacts between `self` and `other` should be generated.
    ///
    /// Only joints in `self`'s set are consulted, so query from a consistent
    /// side (or both) when the joint sets can differ.
    pub fn is_collidable(&self, other: &RigidBody) -> bool {
        if self.id == other.id {
            return false;
        }
        if self.is_static() && other.is_static() {
            return false;
        }
        for (id, link) in &self.joints {
            if !link.collide_connected && other.joints.contains_key(id) {
                return false;
            }
        }
        true
    }

    // ==================== Step bookkeeping ====================

    /// Stamp left by the last traversal that visited this body
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Stamp the body with the current step
    pub fn set_step_count(&mut self, step: u64) {
        self.step_count = step;
    }
}
