//! Identifiers for bodies and the shapes they own

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};

/// Unique body identifier, issued by a [`BodyIdAllocator`]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(u64);

impl BodyId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyId({})", self.0)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thread-safe, monotonically increasing body id source.
///
/// One allocator lives as long as the simulation world that owns it; ids are
/// unique within that lifetime.
pub struct BodyIdAllocator {
    next: AtomicU64,
}

impl BodyIdAllocator {
    /// Create a new allocator starting at zero
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Issue the next id
    pub fn next(&self) -> BodyId {
        BodyId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for BodyIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a shape attached to a body, unique within that body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeKey(pub(crate) u32);

impl ShapeKey {
    #[inline]
    pub const fn index(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_monotonic() {
        let ids = BodyIdAllocator::new();
        let a = ids.next();
        let b = ids.next();
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert!(a < b);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_allocators_are_independent() {
        let first = BodyIdAllocator::new();
        let second = BodyIdAllocator::new();
        first.next();
        first.next();
        assert_eq!(second.next().raw(), 0);
    }
}
