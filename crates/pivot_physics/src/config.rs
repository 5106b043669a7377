//! Physics configuration

use crate::error::{PhysicsError, Result};
use pivot_math::Vec2;
use serde::{Deserialize, Serialize};

/// Thresholds used to decide when a body is still enough to fall asleep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Enable sleeping for inactive bodies
    pub enabled: bool,
    /// Linear speed below which a body counts as resting
    pub linear_tolerance: f32,
    /// Angular speed (radians per second) below which a body counts as resting
    pub angular_tolerance: f32,
    /// Seconds a body must rest before it becomes a sleep candidate
    pub time_to_sleep: f32,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            linear_tolerance: 0.5,
            angular_tolerance: pivot_math::radians(2.0),
            time_to_sleep: 0.5,
        }
    }
}

impl SleepConfig {
    /// Sleeping switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Per-step integration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 in Y)
    pub gravity: Vec2,

    /// Velocity damping factor applied every step (1.0 = none)
    pub damping: f32,

    /// Fixed timestep for the simulation
    pub timestep: f32,

    /// Sleep thresholds
    pub sleep: SleepConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            damping: 1.0,
            timestep: 1.0 / 60.0,
            sleep: SleepConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Zero gravity, no damping
    pub fn zero_gravity() -> Self {
        Self {
            gravity: Vec2::ZERO,
            ..Default::default()
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = Vec2::new(x, y);
        self
    }

    /// Set damping
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set sleep thresholds
    pub fn with_sleep(mut self, sleep: SleepConfig) -> Self {
        self.sleep = sleep;
        self
    }

    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be positive and finite, got {}",
                self.timestep
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(PhysicsError::InvalidConfig(format!(
                "damping must lie in [0, 1], got {}",
                self.damping
            )));
        }
        let sleep = &self.sleep;
        if !(sleep.linear_tolerance >= 0.0
            && sleep.angular_tolerance >= 0.0
            && sleep.time_to_sleep >= 0.0)
        {
            return Err(PhysicsError::InvalidConfig(
                "sleep tolerances must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
        assert!(PhysicsConfig::zero_gravity().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_timestep() {
        let config = PhysicsConfig::default().with_timestep(0.0);
        assert!(matches!(config.validate(), Err(PhysicsError::InvalidConfig(_))));

        let config = PhysicsConfig::default().with_timestep(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_damping() {
        assert!(PhysicsConfig::default().with_damping(1.5).validate().is_err());
        assert!(PhysicsConfig::default().with_damping(-0.1).validate().is_err());
        assert!(PhysicsConfig::default().with_damping(0.98).validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = PhysicsConfig::default()
            .with_gravity(0.0, -20.0)
            .with_sleep(SleepConfig::disabled());
        let json = serde_json::to_string(&config).unwrap();
        let back: PhysicsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.gravity, Vec2::new(0.0, -20.0));
        assert!(!back.sleep.enabled);
    }
}
