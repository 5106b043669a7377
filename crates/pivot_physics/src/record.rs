//! Serialized form of bodies

use crate::body::BodyKind;
use crate::shape::ShapeRecord;
use pivot_math::Vec2;
use serde::{Deserialize, Serialize};

/// Body classification as written to records.
///
/// Kinetic bodies are recorded as dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Static,
    Dynamic,
}

impl From<BodyKind> for RecordKind {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Static => RecordKind::Static,
            BodyKind::Kinetic | BodyKind::Dynamic => RecordKind::Dynamic,
        }
    }
}

impl From<RecordKind> for BodyKind {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Static => BodyKind::Static,
            RecordKind::Dynamic => BodyKind::Dynamic,
        }
    }
}

/// Structured snapshot of a body: placement and shapes, no motion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub kind: RecordKind,
    pub name: String,
    /// Local origin in world coordinates
    pub position: Vec2,
    pub angle: f32,
    pub shapes: Vec<ShapeRecord>,
}
