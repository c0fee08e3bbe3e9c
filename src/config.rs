//! Planner configuration (§6): physical limits, grid sizing and cost weights.

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// All tunables for one planner instance. Read-only during a planning call;
/// may be swapped wholesale between calls (§5).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlannerConfig {
    pub max_speed: f64,
    pub max_accel: f64,
    pub max_decel: f64,
    pub max_curvature: f64,

    pub vehicle_length: f64,
    pub vehicle_width: f64,
    /// rear-axle-to-center offset L_r
    pub vehicle_rear_axle_offset: f64,

    pub center_offset: f64,

    pub num_width: usize,
    pub num_speed: usize,
    pub num_t: usize,

    pub lowest_speed: f64,
    pub highest_speed: f64,

    pub min_t: f64,
    pub max_t: f64,

    pub tick_t: f64,

    pub safety_margin_lon: f64,
    pub safety_margin_lat: f64,

    pub k_jerk: f64,
    pub k_time: f64,
    pub k_diff: f64,
    pub k_lat: f64,
    pub k_lon: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            max_speed: 50.0 / 3.6,
            max_accel: 2.0,
            max_decel: -6.0,
            max_curvature: 1.0,

            vehicle_length: 4.5,
            vehicle_width: 1.9,
            vehicle_rear_axle_offset: 1.2,

            center_offset: 0.0,

            num_width: 7,
            num_speed: 5,
            num_t: 5,

            lowest_speed: 5.0 / 3.6,
            highest_speed: 50.0 / 3.6,

            min_t: 4.0,
            max_t: 5.0,

            tick_t: 0.2,

            safety_margin_lon: 2.0,
            safety_margin_lat: 0.5,

            k_jerk: 0.1,
            k_time: 0.1,
            k_diff: 1.0,
            k_lat: 1.0,
            k_lon: 1.0,
        }
    }
}

impl PlannerConfig {
    /// Validate the configuration-level invariants from §7. Waypoint and
    /// horizon validation that depends on the call's actual inputs lives in
    /// [`crate::planner::Planner::plan`]; this only checks what is knowable
    /// from the config alone.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.num_width < 2 {
            return Err(PlannerError::InvalidGridSize { field: "num_width", value: self.num_width });
        }
        if self.num_speed < 2 {
            return Err(PlannerError::InvalidGridSize { field: "num_speed", value: self.num_speed });
        }
        if self.num_t < 2 {
            return Err(PlannerError::InvalidGridSize { field: "num_t", value: self.num_t });
        }
        if self.max_t <= self.min_t || self.min_t <= 0.0 {
            return Err(PlannerError::InvalidHorizon { min_t: self.min_t, max_t: self.max_t });
        }
        if self.tick_t <= 0.0 {
            return Err(PlannerError::InvalidTick { tick_t: self.tick_t });
        }
        Ok(())
    }
}
