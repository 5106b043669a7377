//! Joint membership metadata carried by bodies
//!
//! Joints themselves (anchors, limits, solver state) live in the world. A
//! body only records which joints it participates in and whether each joint
//! lets its bodies collide, which is all collision filtering needs.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Handle to a joint owned by the simulation world
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointId(pub u64);

impl fmt::Debug for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JointId({})", self.0)
    }
}

/// A body's view of one joint it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JointLink {
    /// Whether bodies connected by this joint still generate contacts
    pub collide_connected: bool,
}

impl JointLink {
    /// Create a link with the given contact policy
    pub fn new(collide_connected: bool) -> Self {
        Self { collide_connected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_link_blocks_contacts() {
        assert!(!JointLink::default().collide_connected);
        assert_eq!(JointLink::new(true), JointLink { collide_connected: true });
        assert_eq!(format!("{:?}", JointId(3)), "JointId(3)");
    }
}
