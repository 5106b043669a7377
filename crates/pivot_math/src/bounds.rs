//! Axis-aligned bounding boxes for broad-phase queries

use crate::vector::Vec2;

/// Axis-aligned bounding box accumulated from points and other boxes
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub mins: Vec2,
    pub maxs: Vec2,
}

impl Bounds {
    /// Empty (inverted) bounds; adding anything to it yields that thing's extent
    pub const EMPTY: Self = Self {
        mins: Vec2::new(f32::MAX, f32::MAX),
        maxs: Vec2::new(f32::MIN, f32::MIN),
    };

    #[inline]
    pub const fn new(mins: Vec2, maxs: Vec2) -> Self {
        Self { mins, maxs }
    }

    /// Create from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            mins: center - half_extents,
            maxs: center + half_extents,
        }
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut bounds = Self::EMPTY;
        for &point in points {
            bounds.add_point(point);
        }
        bounds
    }

    /// Reset to the empty state
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    #[inline]
    pub fn add_point(&mut self, point: Vec2) {
        self.mins = self.mins.min(point);
        self.maxs = self.maxs.max(point);
    }

    /// Grow to enclose `other`
    #[inline]
    pub fn add_bounds(&mut self, other: &Bounds) {
        self.mins = self.mins.min(other.mins);
        self.maxs = self.maxs.max(other.maxs);
    }

    /// Grow to enclose a box given by center and half-extents
    #[inline]
    pub fn add_extents(&mut self, center: Vec2, half_extents: Vec2) {
        self.add_bounds(&Self::from_center_half_extents(center, half_extents));
    }

    /// Expand by a uniform margin on every side
    #[inline]
    pub fn expand(&mut self, margin: f32) {
        let m = Vec2::splat(margin);
        self.mins -= m;
        self.maxs += m;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mins.x > self.maxs.x || self.mins.y > self.maxs.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.mins + self.maxs) * 0.5
    }

    /// Half-extents
    #[inline]
    pub fn extents(&self) -> Vec2 {
        (self.maxs - self.mins) * 0.5
    }

    #[inline]
    pub fn perimeter(&self) -> f32 {
        let size = self.maxs - self.mins;
        2.0 * (size.x + size.y)
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.mins.x && point.x <= self.maxs.x &&
        point.y >= self.mins.y && point.y <= self.maxs.y
    }

    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.mins.x <= other.maxs.x && self.maxs.x >= other.mins.x &&
        self.mins.y <= other.maxs.y && self.maxs.y >= other.mins.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let b = Bounds::default();
        assert!(b.is_empty());
        assert!(!b.contains_point(Vec2::ZERO));
    }

    #[test]
    fn test_add_bounds_union() {
        let mut b = Bounds::EMPTY;
        b.add_bounds(&Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)));
        b.add_bounds(&Bounds::new(Vec2::new(-2.0, 0.5), Vec2::new(-1.0, 3.0)));
        assert_eq!(b.mins, Vec2::new(-2.0, 0.0));
        assert_eq!(b.maxs, Vec2::new(1.0, 3.0));
        assert!(!b.is_empty());
    }

    #[test]
    fn test_clear_resets() {
        let mut b = Bounds::from_points(&[Vec2::new(1.0, 1.0), Vec2::new(2.0, -1.0)]);
        assert!(b.contains_point(Vec2::new(1.5, 0.0)));
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn test_intersects_and_expand() {
        let a = Bounds::new(Vec2::ZERO, Vec2::ONE);
        let mut b = Bounds::new(Vec2::new(1.5, 0.0), Vec2::new(2.0, 1.0));
        assert!(!a.intersects(&b));
        b.expand(0.5);
        assert!(a.intersects(&b));
        assert_eq!(b.center(), Vec2::new(1.75, 0.5));
    }
}
