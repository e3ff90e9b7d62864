//! Routing configuration.

use serde::{Deserialize, Serialize};

use super::RouterError;

/// Parameters that turn road distances into travel times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Time spent waiting for a bus at every boarding, in minutes.
    pub bus_wait_time: u32,

    /// Bus speed, in km/h.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create settings with the given wait time and velocity.
    pub fn new(bus_wait_time: u32, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Check that the settings yield finite, non-negative travel times.
    pub fn validate(&self) -> Result<(), RouterError> {
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(RouterError::InvalidSettings(format!(
                "bus velocity must be a positive number of km/h, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }

    /// Returns the boarding wait in minutes.
    pub fn wait_minutes(&self) -> f64 {
        f64::from(self.bus_wait_time)
    }

    /// Minutes needed to drive `meters` at the configured velocity.
    pub fn travel_minutes(&self, meters: u64) -> f64 {
        meters as f64 * 60.0 / (self.bus_velocity * 1000.0)
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6,
            bus_velocity: 40.0,
        }
    }
}
