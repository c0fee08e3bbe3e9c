//! Frenet data model (§3): start states, end-state targets, and the
//! candidate trajectory ([`FrenetPath`]) that flows through sampling,
//! search, conversion and validation.

use serde::{Deserialize, Serialize};

/// A Frenet state `(s, s_d, s_dd, d, d_d, d_dd)`. `T` only applies to end
/// states sampled by the grid and is carried on [`EndState`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrenetState {
    pub s: f64,
    pub s_d: f64,
    pub s_dd: f64,
    pub d: f64,
    pub d_d: f64,
    pub d_dd: f64,
}

impl FrenetState {
    pub fn new(s: f64, s_d: f64, s_dd: f64, d: f64, d_d: f64, d_dd: f64) -> Self {
        FrenetState { s, s_d, s_dd, d, d_d, d_dd }
    }
}

/// The (d, v, T) end state a grid cell targets (§4.C).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndState {
    pub d: f64,
    pub v: f64,
    pub t: f64,
}

/// A candidate trajectory: per-tick Frenet and Cartesian samples plus its
/// cost breakdown and validation flags. Lifecycle per §3: created with only
/// `end`/`fix_cost`/`hur_cost`; [`generate`](FrenetPath) fills the rest
/// exactly once.
#[derive(Debug, Clone)]
pub struct FrenetPath {
    pub lane_id: i32,
    pub end: EndState,

    pub t: Vec<f64>,

    pub s: Vec<f64>,
    pub s_d: Vec<f64>,
    pub s_dd: Vec<f64>,
    pub s_ddd: Vec<f64>,

    pub d: Vec<f64>,
    pub d_d: Vec<f64>,
    pub d_dd: Vec<f64>,
    pub d_ddd: Vec<f64>,

    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub yaw: Vec<f64>,
    pub ds: Vec<f64>,
    pub c: Vec<f64>,

    pub is_generated: bool,
    pub is_used: bool,
    pub constraint_passed: Option<bool>,
    pub collision_passed: Option<bool>,

    pub fix_cost: f64,
    pub hur_cost: f64,
    pub dyn_cost: f64,
    pub final_cost: f64,
}

impl FrenetPath {
    /// A seed record: only the end state and the sampling-time costs are
    /// known yet (§3 "Lifecycle").
    pub fn seed(lane_id: i32, end: EndState, fix_cost: f64, hur_cost: f64) -> Self {
        FrenetPath {
            lane_id,
            end,
            t: Vec::new(),
            s: Vec::new(),
            s_d: Vec::new(),
            s_dd: Vec::new(),
            s_ddd: Vec::new(),
            d: Vec::new(),
            d_d: Vec::new(),
            d_dd: Vec::new(),
            d_ddd: Vec::new(),
            x: Vec::new(),
            y: Vec::new(),
            yaw: Vec::new(),
            ds: Vec::new(),
            c: Vec::new(),
            is_generated: false,
            is_used: false,
            constraint_passed: None,
            collision_passed: None,
            fix_cost,
            hur_cost,
            dyn_cost: 0.0,
            final_cost: fix_cost,
        }
    }

    pub fn num_ticks(&self) -> usize {
        self.t.len()
    }
}
