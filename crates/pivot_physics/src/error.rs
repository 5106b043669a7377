//! Error types for the rigid body core

use thiserror::Error;

/// Physics errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Mass or inertia would become zero, negative, or non-finite
    #[error("Invalid mass configuration: {0}")]
    InvalidMassConfiguration(String),

    /// Shape geometry or material rejected at construction
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),

    /// Body or shape record could not be converted
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
