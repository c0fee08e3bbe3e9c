//! Frenet-frame optimal trajectory planner for an autonomous ground vehicle.
//!
//! Given a reference centerline, an ego start state in Frenet coordinates,
//! a set of predicted moving obstacles and a [`config::PlannerConfig`], the
//! [`planner::Planner`] selects a single collision-free, dynamically
//! feasible trajectory minimizing a weighted cost over lateral offset, speed
//! tracking, planning horizon and jerk.
//!
//! The pipeline, leaf modules first:
//! - [`polynomial`] -- quartic/quintic boundary-value interpolators (§4.A)
//! - [`spline`] -- natural cubic spline reference curve (§4.B)
//! - [`sampling`] -- the `(d, v, T)` candidate grid and its cheap lower-bound
//!   costs (§4.C)
//! - [`search`] -- gradient-descent selector with on-demand materialization
//!   (§4.D)
//! - [`convert`] -- Frenet -> Cartesian lift (§4.E)
//! - [`constraints`] -- kinematic feasibility checks (§4.F)
//! - [`collision`] -- SAT polygon overlap against predicted obstacles (§4.G)
//! - [`obstacle`] -- constant-velocity obstacle prediction (§4.H)
//! - [`planner`] -- the orchestrator tying the above together (§4.I)

pub mod collision;
pub mod config;
pub mod constraints;
pub mod convert;
pub mod error;
pub mod frenet;
pub mod obstacle;
pub mod planner;
pub mod polynomial;
pub mod sampling;
pub mod search;
pub mod spline;
pub mod telemetry;

pub use config::PlannerConfig;
pub use error::PlannerError;
pub use frenet::{EndState, FrenetPath, FrenetState};
pub use planner::{PlanRequest, Planner, Waypoint};
