//! Mass property aggregation over a set of shapes

use crate::error::{PhysicsError, Result};
use crate::shape::Shape;
use pivot_math::Vec2;

/// Aggregated mass properties of a body, relative to its local origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassData {
    /// Total mass
    pub mass: f32,
    /// Center of mass in body-local coordinates
    pub centroid: Vec2,
    /// Moment of inertia about the center of mass
    pub inertia: f32,
}

impl MassData {
    /// Infinite mass and inertia, centered on the local origin
    pub const INFINITE: Self = Self {
        mass: f32::INFINITY,
        centroid: Vec2::ZERO,
        inertia: f32::INFINITY,
    };

    /// Combine shapes into a single mass distribution.
    ///
    /// Each shape contributes `area * density` at its centroid. Once the
    /// combined centroid is known, every shape's inertia about its own
    /// centroid is shifted onto it with the parallel-axis theorem, so parts
    /// far from the local origin do not lose precision.
    pub fn from_shapes<'a, I>(shapes: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Shape>,
    {
        // (mass, centroid, inertia about centroid)
        let parts: Vec<(f32, Vec2, f32)> = shapes
            .into_iter()
            .map(|shape| {
                let mass = shape.mass();
                (mass, shape.centroid(), shape.centroid_inertia(mass))
            })
            .collect();

        if parts.is_empty() {
            return Err(PhysicsError::InvalidMassConfiguration(
                "body has no shapes".to_string(),
            ));
        }
        let total_mass: f32 = parts.iter().map(|&(mass, _, _)| mass).sum();
        if !(total_mass.is_finite() && total_mass > 0.0) {
            return Err(PhysicsError::InvalidMassConfiguration(format!(
                "total mass of {} shapes is {}",
                parts.len(),
                total_mass
            )));
        }

        let weighted = parts
            .iter()
            .fold(Vec2::ZERO, |acc, &(mass, centroid, _)| acc + centroid * mass);
        let centroid = weighted / total_mass;
        let inertia: f32 = parts
            .iter()
            .map(|&(mass, c, own)| own + mass * (c - centroid).length_squared())
            .sum();
        check_positive("inertia", inertia)?;

        Ok(Self {
            mass: total_mass,
            centroid,
            inertia,
        })
    }
}

/// Reject anything but a positive value or the `+inf` sentinel
pub(crate) fn check_positive(what: &str, value: f32) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMassConfiguration(format!(
            "{} must be positive or infinite, got {}",
            what, value
        )))
    }
}

/// `1 / value`, with `1 / inf = 0`
#[inline]
pub(crate) fn inverse(value: f32) -> f32 {
    if value == f32::INFINITY { 0.0 } else { 1.0 / value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pivot_math::consts::PI;

    #[test]
    fn test_empty_shape_set_fails() {
        let shapes: Vec<Shape> = Vec::new();
        assert!(matches!(
            MassData::from_shapes(&shapes),
            Err(PhysicsError::InvalidMassConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_area_fails() {
        let line = Shape::segment(Vec2::ZERO, Vec2::X, 0.0).unwrap();
        assert!(MassData::from_shapes([&line]).is_err());
    }

    #[test]
    fn test_two_boxes() {
        let shapes = vec![
            Shape::rect(Vec2::ZERO, 1.0, 1.0).unwrap(),
            Shape::rect(Vec2::new(2.0, 0.0), 1.0, 1.0).unwrap(),
        ];
        let md = MassData::from_shapes(&shapes).unwrap();
        assert_relative_eq!(md.mass, 2.0, epsilon = 1e-5);
        assert_relative_eq!(md.centroid.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(md.centroid.y, 0.0, epsilon = 1e-5);
        // Two unit boxes each 1 away from the center: 2 * (1/6 + 1)
        assert_relative_eq!(md.inertia, 2.0 * (1.0 / 6.0 + 1.0), epsilon = 1e-4);
    }

    #[test]
    fn test_inertia_far_from_origin() {
        for offset in [3000.0, 10000.0] {
            let circle = Shape::circle(Vec2::new(offset, 0.0), 1.0).unwrap();
            let md = MassData::from_shapes([&circle]).unwrap();
            assert_relative_eq!(md.mass, PI);
            assert_relative_eq!(md.centroid.x, offset, max_relative = 1e-6);
            assert_relative_eq!(md.inertia, PI * 0.5, max_relative = 1e-5);
        }

        let pair = vec![
            Shape::rect(Vec2::new(4999.0, 0.0), 1.0, 1.0).unwrap(),
            Shape::rect(Vec2::new(5001.0, 0.0), 1.0, 1.0).unwrap(),
        ];
        let md = MassData::from_shapes(&pair).unwrap();
        assert_relative_eq!(md.centroid.x, 5000.0);
        assert_relative_eq!(md.inertia, 2.0 * (1.0 / 6.0 + 1.0), max_relative = 1e-4);
    }

    #[test]
    fn test_check_positive() {
        assert!(check_positive("mass", 1.0).is_ok());
        assert!(check_positive("mass", f32::INFINITY).is_ok());
        assert!(check_positive("mass", 0.0).is_err());
        assert!(check_positive("mass", -2.0).is_err());
        assert!(check_positive("mass", f32::NAN).is_err());
        assert!(check_positive("mass", f32::NEG_INFINITY).is_err());
        assert_eq!(inverse(f32::INFINITY), 0.0);
        assert_eq!(inverse(4.0), 0.25);
    }
}
