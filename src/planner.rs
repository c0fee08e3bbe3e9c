//! Planner orchestrator (§4.I): the state machine that composes A-H.
//!
//! `INIT -> PREDICT_OBSTACLES -> SAMPLE_GRID -> SEARCH -> VALIDATE -> RETURN`.
//! Every stage is terminal; nothing survives a call except configuration and
//! the telemetry counters an [`Observer`] chooses to keep.

use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::collision;
use crate::config::PlannerConfig;
use crate::constraints;
use crate::convert;
use crate::error::PlannerError;
use crate::frenet::{FrenetPath, FrenetState};
use crate::obstacle::{predict_all, Obstacle, ObstacleTrajectory};
use crate::sampling::build_grid;
use crate::search::descend;
use crate::spline::Spline2D;
use crate::telemetry::{Observer, Timer};

/// One point of the reference centerline. `yaw`, when present, is carried
/// for callers but not consulted: [`Spline2D`] recomputes heading from its
/// own derivatives (§3 "Waypoint list").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub yaw: Option<f64>,
}

impl Waypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Waypoint { x, y, yaw: None }
    }
}

/// Everything one planning call needs beyond the planner's own configuration
/// (§6 "Planning call inputs").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub waypoints: Vec<Waypoint>,
    pub start: FrenetState,
    pub lane_id: i32,
    pub left_width: f64,
    pub right_width: f64,
    pub current_speed: f64,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default = "default_true")]
    pub check_collision: bool,
    #[serde(default)]
    pub use_async: bool,
}

fn default_true() -> bool {
    true
}

/// Owns a [`PlannerConfig`] and runs planning calls against it. Not
/// re-entrant on the same instance across concurrent calls sharing mutable
/// state, but a single call's grid and queue are entirely local (§5).
#[derive(Debug, Clone)]
pub struct Planner {
    cfg: PlannerConfig,
}

impl Planner {
    pub fn new(cfg: PlannerConfig) -> Self {
        Planner { cfg }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.cfg
    }

    fn validate_waypoints(waypoints: &[Waypoint]) -> Result<(), PlannerError> {
        if waypoints.len() < 3 {
            return Err(PlannerError::TooFewWaypoints { got: waypoints.len() });
        }
        for i in 1..waypoints.len() {
            let dx = waypoints[i].x - waypoints[i - 1].x;
            let dy = waypoints[i].y - waypoints[i - 1].y;
            if dx * dx + dy * dy <= 0.0 {
                return Err(PlannerError::NonMonotoneWaypoints { index: i });
            }
        }
        Ok(())
    }

    /// Runs one planning call (§4.I). `observer` is an optional telemetry
    /// hook (§4.K); it never influences the returned trajectory. Always an
    /// `async fn` so a single entry point can serve both the synchronous and
    /// `use_async` collision-check paths (§4.N) -- when `use_async` is unset
    /// nothing in the body actually suspends.
    pub async fn plan(
        &self,
        req: &PlanRequest,
        mut observer: Option<&mut dyn Observer>,
    ) -> Result<Option<FrenetPath>, PlannerError> {
        self.cfg.validate()?;
        Self::validate_waypoints(&req.waypoints)?;

        let xs: Vec<f64> = req.waypoints.iter().map(|w| w.x).collect();
        let ys: Vec<f64> = req.waypoints.iter().map(|w| w.y).collect();
        let reference = Spline2D::new(&xs, &ys);

        // PREDICT_OBSTACLES
        let predict_timer = Timer::default();
        let obstacle_trajs: Vec<ObstacleTrajectory> = predict_all(&req.obstacles, &self.cfg);
        if let Some(obs) = observer.as_deref_mut() {
            obs.on_predicted(obstacle_trajs.len(), predict_timer.dur_ms());
        }

        // SAMPLE_GRID
        let sample_timer = Timer::default();
        let (mut grid, seed) = build_grid(
            &self.cfg,
            &req.start,
            req.lane_id,
            req.left_width,
            req.right_width,
            req.current_speed,
        );
        if let Some(obs) = observer.as_deref_mut() {
            obs.on_sampled(grid.len(), sample_timer.dur_ms());
        }

        // SEARCH
        let search_timer = Timer::default();
        let mut queue = BinaryHeap::new();
        let visited = descend(&mut grid, seed, &req.start, &self.cfg, &mut queue);
        if let Some(obs) = observer.as_deref_mut() {
            obs.on_searched(visited, search_timer.dur_ms());
        }

        // VALIDATE
        let validate_timer = Timer::default();
        let mut validated = 0usize;
        let mut total_collision_checks = 0usize;
        let collision_timer = Timer::default();

        let mut winner = None;
        while let Some(candidate) = queue.pop() {
            validated += 1;
            let mut path = grid.get(candidate.idx).clone();

            convert::to_cartesian(&mut path, &reference);
            if !constraints::check(&mut path, &self.cfg) {
                continue;
            }

            if req.check_collision {
                let (passed, checks) = if req.use_async {
                    collision::check_async(path.clone(), obstacle_trajs.clone(), self.cfg).await
                } else {
                    collision::check(&path, &obstacle_trajs, &self.cfg)
                };
                total_collision_checks += checks;
                path.collision_passed = Some(passed);
                if !passed {
                    continue;
                }
            }

            winner = Some(path);
            break;
        }

        if let Some(obs) = observer.as_deref_mut() {
            obs.on_validated(validated, validate_timer.dur_ms());
            obs.on_collision_checked(total_collision_checks, collision_timer.dur_ms());
        }

        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frenet::FrenetState;

    fn straight_waypoints() -> Vec<Waypoint> {
        vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(10.0, 0.0),
            Waypoint::new(20.0, 0.0),
            Waypoint::new(30.0, 0.0),
            Waypoint::new(40.0, 0.0),
        ]
    }

    fn base_config() -> PlannerConfig {
        PlannerConfig {
            num_width: 3,
            num_speed: 3,
            num_t: 3,
            lowest_speed: 4.0,
            highest_speed: 6.0,
            min_t: 2.0,
            max_t: 4.0,
            ..PlannerConfig::default()
        }
    }

    fn base_request() -> PlanRequest {
        PlanRequest {
            waypoints: straight_waypoints(),
            start: FrenetState::new(0.0, 5.0, 0.0, 0.0, 0.0, 0.0),
            lane_id: 0,
            left_width: 1.0,
            right_width: 1.0,
            current_speed: 5.0,
            obstacles: Vec::new(),
            check_collision: true,
            use_async: false,
        }
    }

    #[tokio::test]
    async fn straight_road_no_obstacles_finds_trajectory() {
        let planner = Planner::new(base_config());
        let req = base_request();
        let result = planner.plan(&req, None).await.unwrap();
        let path = result.expect("expected a feasible trajectory");
        assert!(path.end.d.abs() < 1e-6);
        assert!(path.constraint_passed == Some(true));
    }

    #[tokio::test]
    async fn too_few_waypoints_is_rejected_before_grid_work() {
        let planner = Planner::new(base_config());
        let mut req = base_request();
        req.waypoints = vec![Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 0.0)];
        let err = planner.plan(&req, None).await.unwrap_err();
        assert!(matches!(err, PlannerError::TooFewWaypoints { got: 2 }));
    }

    #[tokio::test]
    async fn non_monotone_waypoints_rejected() {
        let planner = Planner::new(base_config());
        let mut req = base_request();
        req.waypoints = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.0),
            Waypoint::new(10.0, 0.0),
        ];
        let err = planner.plan(&req, None).await.unwrap_err();
        assert!(matches!(err, PlannerError::NonMonotoneWaypoints { index: 1 }));
    }

    #[tokio::test]
    async fn infeasible_speed_returns_empty_without_panicking() {
        let mut cfg = base_config();
        cfg.max_speed = 1.0;
        let planner = Planner::new(cfg);
        let req = base_request();
        let result = planner.plan(&req, None).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn async_collision_path_agrees_with_sync() {
        let planner = Planner::new(base_config());
        let mut req = base_request();
        req.use_async = true;
        let result = planner.plan(&req, None).await.unwrap();
        assert!(result.is_some());
    }
}
