//! Collision shapes and their mass formulas
//!
//! Shapes are defined relative to the owning body's local origin. Each one
//! reports area, centroid and inertia about that origin so the body can
//! aggregate its mass properties, and caches its world-space geometry and
//! bounds once per step for the broad phase.

use crate::error::{PhysicsError, Result};
use crate::id::BodyId;
use pivot_math::{consts::PI, Bounds, Transform, Vec2};
use serde::{Deserialize, Serialize};

/// Geometry of a shape in body-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    /// Disc around `center`
    Circle {
        center: Vec2,
        radius: f32,
    },
    /// Capsule swept from `a` to `b`
    Segment {
        a: Vec2,
        b: Vec2,
        radius: f32,
    },
    /// Convex polygon, counter-clockwise winding
    Poly {
        verts: Vec<Vec2>,
    },
}

/// Geometry of a shape after the last [`Shape::cache_data`]
#[derive(Debug, Clone, PartialEq)]
pub enum WorldGeometry {
    Circle {
        center: Vec2,
    },
    Segment {
        a: Vec2,
        b: Vec2,
        normal: Vec2,
    },
    Poly {
        verts: Vec<Vec2>,
        /// Outward normal of the edge starting at the vertex with the same index
        normals: Vec<Vec2>,
    },
}

/// Serialized form of a shape: geometry plus material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(flatten)]
    pub geometry: ShapeKind,
    /// Elasticity
    pub e: f32,
    /// Friction
    pub u: f32,
    pub density: f32,
}

/// A shape attached (or attachable) to a rigid body
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    density: f32,
    /// Restitution (0 = no bounce, 1 = perfect bounce)
    pub elasticity: f32,
    /// Friction coefficient
    pub friction: f32,
    body: Option<BodyId>,
    world: WorldGeometry,
    bounds: Bounds,
}

impl Shape {
    /// Create a circle
    pub fn circle(center: Vec2, radius: f32) -> Result<Self> {
        if !center.is_finite() || !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidShape(format!(
                "circle needs a finite center and positive radius, got {:?} / {}",
                center, radius
            )));
        }
        Ok(Self::from_kind(ShapeKind::Circle { center, radius }))
    }

    /// Create a segment (capsule) of the given radius
    pub fn segment(a: Vec2, b: Vec2, radius: f32) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() || !(radius.is_finite() && radius >= 0.0) {
            return Err(PhysicsError::InvalidShape(format!(
                "segment needs finite endpoints and a non-negative radius, got {:?}-{:?} / {}",
                a, b, radius
            )));
        }
        if a == b {
            return Err(PhysicsError::InvalidShape(format!(
                "segment endpoints must differ, got {:?} twice",
                a
            )));
        }
        Ok(Self::from_kind(ShapeKind::Segment { a, b, radius }))
    }

    /// Create a convex polygon from counter-clockwise vertices
    pub fn poly(verts: Vec<Vec2>) -> Result<Self> {
        validate_poly(&verts)?;
        Ok(Self::from_kind(ShapeKind::Poly { verts }))
    }

    /// Axis-aligned box of the given size centered on the local origin
    pub fn boxed(width: f32, height: f32) -> Result<Self> {
        Self::rect(Vec2::ZERO, width, height)
    }

    /// Axis-aligned box of the given size centered on `offset`
    pub fn rect(offset: Vec2, width: f32, height: f32) -> Result<Self> {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::poly(vec![
            offset + Vec2::new(-hw, -hh),
            offset + Vec2::new(hw, -hh),
            offset + Vec2::new(hw, hh),
            offset + Vec2::new(-hw, hh),
        ])
    }

    fn from_kind(kind: ShapeKind) -> Self {
        let mut shape = Self {
            kind,
            density: 1.0,
            elasticity: 0.0,
            friction: 1.0,
            body: None,
            world: WorldGeometry::Circle { center: Vec2::ZERO },
            bounds: Bounds::EMPTY,
        };
        shape.cache_data(&Transform::IDENTITY);
        shape
    }

    /// Rebuild a shape from its record
    pub fn from_record(record: &ShapeRecord) -> Result<Self> {
        let mut shape = match &record.geometry {
            ShapeKind::Circle { center, radius } => Self::circle(*center, *radius)?,
            ShapeKind::Segment { a, b, radius } => Self::segment(*a, *b, *radius)?,
            ShapeKind::Poly { verts } => Self::poly(verts.clone())?,
        };
        shape.set_density(record.density)?;
        shape.elasticity = record.e;
        shape.friction = record.u;
        Ok(shape)
    }

    /// Set density (builder pattern)
    pub fn with_density(mut self, density: f32) -> Result<Self> {
        self.set_density(density)?;
        Ok(self)
    }

    /// Set elasticity and friction (builder pattern)
    pub fn with_material(mut self, elasticity: f32, friction: f32) -> Self {
        self.elasticity = elasticity;
        self.friction = friction;
        self
    }

    /// Set density; must be positive and finite
    pub fn set_density(&mut self, density: f32) -> Result<()> {
        if !(density.is_finite() && density > 0.0) {
            return Err(PhysicsError::InvalidShape(format!(
                "density must be positive and finite, got {}",
                density
            )));
        }
        self.density = density;
        Ok(())
    }

    #[inline]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Owning body, if attached
    #[inline]
    pub fn body(&self) -> Option<BodyId> {
        self.body
    }

    pub(crate) fn set_body(&mut self, body: Option<BodyId>) {
        self.body = body;
    }

    /// Area, including the rounded caps of segments
    pub fn area(&self) -> f32 {
        match &self.kind {
            ShapeKind::Circle { radius, .. } => PI * radius * radius,
            ShapeKind::Segment { a, b, radius } => radius * (PI * radius + 2.0 * a.distance(*b)),
            ShapeKind::Poly { verts } => twice_area(verts) * 0.5,
        }
    }

    /// Center of area in body-local coordinates
    pub fn centroid(&self) -> Vec2 {
        match &self.kind {
            ShapeKind::Circle { center, .. } => *center,
            ShapeKind::Segment { a, b, .. } => a.lerp(*b, 0.5),
            ShapeKind::Poly { verts } => {
                let Some(&origin) = verts.first() else {
                    return Vec2::ZERO;
                };
                let mut twice_area = 0.0;
                let mut sum = Vec2::ZERO;
                for (v1, v2) in edges(verts) {
                    let (d1, d2) = (v1 - origin, v2 - origin);
                    let cross = d1.cross(d2);
                    twice_area += cross;
                    sum += (d1 + d2) * cross;
                }
                origin + sum / (3.0 * twice_area)
            }
        }
    }

    /// Moment of inertia about the shape's own centroid for the given mass
    pub fn centroid_inertia(&self, mass: f32) -> f32 {
        match &self.kind {
            ShapeKind::Circle { radius, .. } => mass * radius * radius * 0.5,
            ShapeKind::Segment { a, b, .. } => mass * a.distance_squared(*b) / 12.0,
            ShapeKind::Poly { verts } => {
                let center = self.centroid();
                let mut numer = 0.0;
                let mut denom = 0.0;
                for (v1, v2) in edges(verts) {
                    let (u1, u2) = (v1 - center, v2 - center);
                    let cross = u1.cross(u2);
                    numer += cross * (u1.dot(u1) + u1.dot(u2) + u2.dot(u2));
                    denom += cross;
                }
                mass * numer / (6.0 * denom)
            }
        }
    }

    /// Moment of inertia about the body-local origin for the given mass
    pub fn inertia(&self, mass: f32) -> f32 {
        self.centroid_inertia(mass) + mass * self.centroid().length_squared()
    }

    /// `area * density`
    #[inline]
    pub fn mass(&self) -> f32 {
        self.area() * self.density
    }

    /// Recompute world geometry and bounds from the owning body's transform
    pub fn cache_data(&mut self, xf: &Transform) {
        let mut bounds = Bounds::EMPTY;
        self.world = match &self.kind {
            ShapeKind::Circle { center, radius } => {
                let center = xf.transform(*center);
                bounds.add_extents(center, Vec2::splat(*radius));
                WorldGeometry::Circle { center }
            }
            ShapeKind::Segment { a, b, radius } => {
                let a = xf.transform(*a);
                let b = xf.transform(*b);
                bounds.add_point(a);
                bounds.add_point(b);
                bounds.expand(*radius);
                WorldGeometry::Segment {
                    a,
                    b,
                    normal: (b - a).normalize().perp(),
                }
            }
            ShapeKind::Poly { verts } => {
                let verts: Vec<Vec2> = verts.iter().map(|v| xf.transform(*v)).collect();
                let normals = edges(&verts).map(|(v1, v2)| (v2 - v1).normalize().rperp()).collect();
                for v in &verts {
                    bounds.add_point(*v);
                }
                WorldGeometry::Poly { verts, normals }
            }
        };
        self.bounds = bounds;
    }

    /// World bounds as of the last [`Shape::cache_data`]
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn world(&self) -> &WorldGeometry {
        &self.world
    }

    /// Unowned copy of this shape
    /// Detached copy with the same geometry and material
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.body = None;
        copy.cache_data(&Transform::IDENTITY);
        copy
    }

    /// Snapshot geometry and material
    pub fn serialize(&self) -> ShapeRecord {
        ShapeRecord {
            geometry: self.kind.clone(),
            e: self.elasticity,
            u: self.friction,
            density: self.density,
        }
    }
}

/// Consecutive vertex pairs, wrapping from the last vertex to the first
fn edges(verts: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = verts.len();
    (0..n).map(move |i| (verts[i], verts[(i + 1) % n]))
}

/// Twice the signed area, measured from the first vertex
fn twice_area(verts: &[Vec2]) -> f32 {
    let Some(&origin) = verts.first() else {
        return 0.0;
    };
    edges(verts)
        .map(|(v1, v2)| (v1 - origin).cross(v2 - origin))
        .sum()
}

fn validate_poly(verts: &[Vec2]) -> Result<()> {
    let n = verts.len();
    if n < 3 {
        return Err(PhysicsError::InvalidShape(format!(
            "polygon needs at least 3 vertices, got {}",
            n
        )));
    }
    if verts.iter().any(|v| !v.is_finite()) {
        return Err(PhysicsError::InvalidShape(
            "polygon vertices must be finite".to_string(),
        ));
    }
    // Every vertex on or left of every edge
    for (i, (a, b)) in edges(verts).enumerate() {
        if verts.iter().any(|&v| (b - a).cross(v - a) < 0.0) {
            return Err(PhysicsError::InvalidShape(format!(
                "polygon must be convex and counter-clockwise (edge {} has a vertex on its right)",
                i
            )));
        }
    }
    if twice_area(verts) <= 0.0 {
        return Err(PhysicsError::InvalidShape(
            "polygon has no area".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pivot_math::consts::TAU;

    #[test]
    fn test_circle_mass_formulas() {
        let circle = Shape::circle(Vec2::new(2.0, 0.0), 1.0).unwrap();
        assert_relative_eq!(circle.area(), PI);
        assert_eq!(circle.centroid(), Vec2::new(2.0, 0.0));
        // m (r^2 / 2 + d^2)
        assert_relative_eq!(circle.inertia(2.0), 2.0 * (0.5 + 4.0));
    }

    #[test]
    fn test_box_mass_formulas() {
        let square = Shape::rect(Vec2::new(3.0, -1.0), 2.0, 2.0).unwrap();
        assert_relative_eq!(square.area(), 4.0, epsilon = 1e-5);
        let c = square.centroid();
        assert_relative_eq!(c.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(c.y, -1.0, epsilon = 1e-5);

        // Centered box: m (w^2 + h^2) / 12
        let centered = Shape::boxed(2.0, 4.0).unwrap();
        assert_relative_eq!(centered.inertia(3.0), 3.0 * (4.0 + 16.0) / 12.0, epsilon = 1e-5);
    }

    #[test]
    fn test_segment_mass_formulas() {
        let seg = Shape::segment(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), 0.5).unwrap();
        assert_relative_eq!(seg.area(), 0.5 * (PI * 0.5 + 4.0));
        assert_eq!(seg.centroid(), Vec2::ZERO);
        assert_relative_eq!(seg.inertia(6.0), 6.0 * 4.0 / 12.0);
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        assert!(Shape::circle(Vec2::ZERO, 0.0).is_err());
        assert!(Shape::circle(Vec2::new(f32::NAN, 0.0), 1.0).is_err());
        assert!(Shape::segment(Vec2::ZERO, Vec2::X, -1.0).is_err());
        assert!(Shape::poly(vec![Vec2::ZERO, Vec2::X]).is_err());

        // Clockwise winding
        let cw = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];
        assert!(matches!(Shape::poly(cw), Err(PhysicsError::InvalidShape(_))));

        // Non-convex dart
        let dart = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 2.0),
        ];
        assert!(Shape::poly(dart).is_err());

        // Pentagon visited in star order: every turn is left but the winding
        // goes round twice
        let corner = |k: usize| Vec2::from_angle(PI * 0.5 + k as f32 * TAU / 5.0);
        let pentagram: Vec<Vec2> = [0, 2, 4, 1, 3].into_iter().map(corner).collect();
        assert!(matches!(
            Shape::poly(pentagram),
            Err(PhysicsError::InvalidShape(_))
        ));
        let pentagon: Vec<Vec2> = (0..5).map(corner).collect();
        assert!(Shape::poly(pentagon).is_ok());

        // Zero-length segment
        assert!(matches!(
            Shape::segment(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), 0.5),
            Err(PhysicsError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_centroid_inertia_far_from_origin() {
        let square = Shape::rect(Vec2::new(5000.0, 0.0), 2.0, 2.0).unwrap();
        assert_relative_eq!(square.area(), 4.0, epsilon = 1e-5);
        assert_relative_eq!(square.centroid().x, 5000.0);
        // m (w^2 + h^2) / 12
        assert_relative_eq!(square.centroid_inertia(4.0), 4.0 * 8.0 / 12.0, max_relative = 1e-5);

        let circle = Shape::circle(Vec2::new(10000.0, 0.0), 1.0).unwrap();
        assert_relative_eq!(circle.centroid_inertia(PI), PI * 0.5);
    }

    #[test]
    fn test_density_validation() {
        let mut shape = Shape::boxed(1.0, 1.0).unwrap();
        assert!(shape.set_density(0.0).is_err());
        assert!(shape.set_density(f32::INFINITY).is_err());
        shape.set_density(2.5).unwrap();
        assert_relative_eq!(shape.mass(), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_cache_data_moves_bounds() {
        let mut circle = Shape::circle(Vec2::new(1.0, 0.0), 0.5).unwrap();
        circle.cache_data(&Transform::new(Vec2::new(10.0, 0.0), core::f32::consts::FRAC_PI_2));
        let b = circle.bounds();
        assert_abs_diff_eq!(b.center().x, 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(b.center().y, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(b.extents().x, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_poly_world_normals_point_outward() {
        let mut square = Shape::boxed(2.0, 2.0).unwrap();
        square.cache_data(&Transform::IDENTITY);
        match square.world() {
            WorldGeometry::Poly { normals, .. } => {
                assert_eq!(normals.len(), 4);
                // Bottom edge faces -Y
                assert_abs_diff_eq!(normals[0].x, 0.0, epsilon = 1e-6);
                assert_abs_diff_eq!(normals[0].y, -1.0, epsilon = 1e-6);
            }
            other => panic!("unexpected world geometry {:?}", other),
        }
    }

    #[test]
    fn test_record_roundtrip() {
        let shape = Shape::segment(Vec2::ZERO, Vec2::new(0.0, 3.0), 0.25)
            .unwrap()
            .with_density(4.0)
            .unwrap()
            .with_material(0.3, 0.7);
        let record = shape.serialize();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "segment");
        assert_eq!(json["density"], 4.0);

        let back: ShapeRecord = serde_json::from_value(json).unwrap();
        let rebuilt = Shape::from_record(&back).unwrap();
        assert_eq!(rebuilt.serialize(), record);
    }

    #[test]
    fn test_duplicate_drops_owner() {
        let mut shape = Shape::boxed(1.0, 1.0).unwrap();
        shape.set_body(Some(BodyId::from_raw(7)));
        let copy = shape.duplicate();
        assert_eq!(copy.body(), None);
        assert_eq!(copy.serialize(), shape.serialize());
    }
}
