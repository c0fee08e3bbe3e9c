//! Classified, non-panicking errors for configuration and input validation.
//!
//! A [`PlannerError`] is only ever returned for problems the caller could
//! have avoided by passing valid input (§7 "Invalid input"). A planning call
//! that simply found no safe trajectory is not an error: it returns
//! `Ok(None)`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlannerError {
    #[error("need at least 3 waypoints, got {got}")]
    TooFewWaypoints { got: usize },

    #[error("waypoints are not strictly monotone at index {index}")]
    NonMonotoneWaypoints { index: usize },

    #[error("invalid planning horizon: min_t={min_t}, max_t={max_t}")]
    InvalidHorizon { min_t: f64, max_t: f64 },

    #[error("invalid grid size for {field}: {value}")]
    InvalidGridSize { field: &'static str, value: usize },

    #[error("invalid tick duration: {tick_t}")]
    InvalidTick { tick_t: f64 },
}
