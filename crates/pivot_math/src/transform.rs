//! Rigid 2D transform (rotation followed by translation)

use crate::vector::Vec2;

/// Local-to-world transform of a rigid body.
///
/// The rotation is cached as cosine/sine alongside the angle it was built
/// from, so repeated point conversions never call into trigonometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub t: Vec2,
    /// Cosine of the rotation angle
    pub c: f32,
    /// Sine of the rotation angle
    pub s: f32,
    /// Rotation angle in radians
    pub a: f32,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        t: Vec2::ZERO,
        c: 1.0,
        s: 0.0,
        a: 0.0,
    };

    /// Create a transform from a position and an angle
    #[inline]
    pub fn new(position: Vec2, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self { t: position, c, s, a: angle }
    }

    /// Replace both translation and rotation
    #[inline]
    pub fn set(&mut self, position: Vec2, angle: f32) {
        *self = Self::new(position, angle);
    }

    #[inline]
    pub fn set_rotation(&mut self, angle: f32) {
        let (s, c) = angle.sin_cos();
        self.c = c;
        self.s = s;
        self.a = angle;
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.t = position;
    }

    /// Unit direction of the rotation
    #[inline]
    pub fn rotation(&self) -> Vec2 {
        Vec2::new(self.c, self.s)
    }

    /// Rotate a vector (no translation)
    #[inline]
    pub fn rotate(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.c - v.y * self.s, v.x * self.s + v.y * self.c)
    }

    /// Inverse rotation of a vector
    #[inline]
    pub fn unrotate(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.c + v.y * self.s, -v.x * self.s + v.y * self.c)
    }

    /// Local point to world point
    #[inline]
    pub fn transform(&self, p: Vec2) -> Vec2 {
        self.rotate(p) + self.t
    }

    /// World point to local point
    #[inline]
    pub fn untransform(&self, p: Vec2) -> Vec2 {
        self.unrotate(p - self.t)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Transform;
    use crate::vector::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // Only position and angle are persisted; the trig cache is rebuilt on load.
    #[derive(Serialize, Deserialize)]
    struct TransformRepr {
        position: Vec2,
        angle: f32,
    }

    impl Serialize for Transform {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            TransformRepr { position: self.t, angle: self.a }.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Transform {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = TransformRepr::deserialize(deserializer)?;
            Ok(Transform::new(repr.position, repr.angle))
        }
    }
}
