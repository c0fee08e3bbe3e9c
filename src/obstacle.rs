//! Obstacle predictor (§4.H): constant-velocity straight-line forward
//! simulation from a detected pose to a sequence of predicted rectangles.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;

/// Orientation as a quaternion `(x, y, z, w)`; only yaw is extracted, roll
/// and pitch are discarded (ground-vehicle obstacles are assumed planar).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub fn yaw(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }
}

/// A detected moving obstacle: pose, orientation and linear velocity vector,
/// plus its bounding box (§6 "Planning call inputs").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub orientation: Quaternion,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub length: f64,
    pub width: f64,
}

impl Obstacle {
    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy + self.vz * self.vz).sqrt()
    }
}

/// One `(x, y, yaw, v)` sample of a predicted obstacle trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSample {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
    pub v: f64,
}

/// Predicted forward trajectory for one obstacle, one sample per tick.
#[derive(Debug, Clone)]
pub struct ObstacleTrajectory {
    pub samples: Vec<ObstacleSample>,
    pub length: f64,
    pub width: f64,
}

/// Straight-line constant-velocity propagation over the planning horizon
/// (§4.H, corrected per §9: the historical source appended to `x` for both
/// axes in one branch; this always advances `x` with cosine and `y` with
/// sine).
pub fn predict(obstacle: &Obstacle, cfg: &PlannerConfig) -> ObstacleTrajectory {
    let yaw = obstacle.orientation.yaw();
    let v = obstacle.speed();

    let n = (cfg.max_t / cfg.tick_t).floor() as usize + 1;
    let mut samples = Vec::with_capacity(n);

    let mut x = obstacle.x;
    let mut y = obstacle.y;
    samples.push(ObstacleSample { x, y, yaw, v });

    for _ in 1..n {
        x += v * cfg.tick_t * yaw.cos();
        y += v * cfg.tick_t * yaw.sin();
        samples.push(ObstacleSample { x, y, yaw, v });
    }

    ObstacleTrajectory { samples, length: obstacle.length, width: obstacle.width }
}

/// Predicts every obstacle's trajectory. Each obstacle's propagation is
/// independent, so this fans out across a rayon thread pool rather than
/// looping sequentially.
pub fn predict_all(obstacles: &[Obstacle], cfg: &PlannerConfig) -> Vec<ObstacleTrajectory> {
    use rayon::prelude::*;
    obstacles.par_iter().map(|o| predict(o, cfg)).collect()
}
