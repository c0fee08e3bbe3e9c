//! SAT collision checker (§4.G): oriented-rectangle overlap of the ego
//! footprint against every predicted obstacle rectangle, tick by tick.

use crate::config::PlannerConfig;
use crate::frenet::FrenetPath;
use crate::obstacle::ObstacleTrajectory;

/// An oriented rectangle: center, heading and half-extents.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub center_x: f64,
    pub center_y: f64,
    pub yaw: f64,
    pub half_length: f64,
    pub half_width: f64,
}

impl Rect {
    fn corners(&self) -> [(f64, f64); 4] {
        let (sin, cos) = self.yaw.sin_cos();
        let l = self.half_length;
        let w = self.half_width;
        // local-frame offsets, rotated into world frame
        [(l, w), (l, -w), (-l, -w), (-l, w)].map(|(lx, ly)| {
            (self.center_x + lx * cos - ly * sin, self.center_y + lx * sin + ly * cos)
        })
    }

    /// The two outward edge normals, sufficient as separating-axis
    /// candidates for an axis-aligned-in-its-own-frame rectangle.
    fn axes(&self) -> [(f64, f64); 2] {
        let (sin, cos) = self.yaw.sin_cos();
        [(cos, sin), (-sin, cos)]
    }
}

fn project(corners: &[(f64, f64); 4], axis: (f64, f64)) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(x, y) in corners {
        let d = x * axis.0 + y * axis.1;
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// SAT overlap test. Rectangles that share exactly an edge are reported as
/// overlapping (§8 property 10, closed-set convention).
pub fn overlap(a: &Rect, b: &Rect) -> bool {
    let corners_a = a.corners();
    let corners_b = b.corners();

    for axis in a.axes().iter().chain(b.axes().iter()) {
        let (min_a, max_a) = project(&corners_a, *axis);
        let (min_b, max_b) = project(&corners_b, *axis);
        if max_a < min_b || max_b < min_a {
            return false;
        }
    }
    true
}

fn ego_rect(path: &FrenetPath, tick: usize, cfg: &PlannerConfig) -> Rect {
    let yaw = path.yaw[tick];
    let cx = path.x[tick] + cfg.vehicle_rear_axle_offset * yaw.cos();
    let cy = path.y[tick] + cfg.vehicle_rear_axle_offset * yaw.sin();
    Rect {
        center_x: cx,
        center_y: cy,
        yaw,
        half_length: cfg.vehicle_length / 2.0,
        half_width: cfg.vehicle_width / 2.0,
    }
}

fn obstacle_rect(traj: &ObstacleTrajectory, tick: usize, cfg: &PlannerConfig) -> Rect {
    let sample = traj.samples[tick];
    Rect {
        center_x: sample.x,
        center_y: sample.y,
        yaw: sample.yaw,
        half_length: (traj.length + 2.0 * cfg.safety_margin_lon) / 2.0,
        half_width: (traj.width + 2.0 * cfg.safety_margin_lat) / 2.0,
    }
}

/// Checks `path` against every obstacle trajectory over their shared ticks.
/// Returns `(passed, num_checks)`: `passed` is `false` and the function
/// returns immediately on the first collision found; otherwise `true` after
/// exhausting every pair (§4.G).
pub fn check(path: &FrenetPath, obstacles: &[ObstacleTrajectory], cfg: &PlannerConfig) -> (bool, usize) {
    let mut num_checks = 0usize;

    for traj in obstacles {
        let shared = path.num_ticks().min(traj.samples.len());
        for tick in 0..shared {
            num_checks += 1;
            let ego = ego_rect(path, tick, cfg);
            let obs = obstacle_rect(traj, tick, cfg);
            if overlap(&ego, &obs) {
                return (false, num_checks);
            }
        }
    }

    (true, num_checks)
}

/// Async adapter (§4.N): dispatches the same synchronous SAT routine as a
/// single blocking task. Used when the orchestrator's `use_async` flag is
/// set; the underlying check is identical either way.
pub async fn check_async(
    path: FrenetPath,
    obstacles: Vec<ObstacleTrajectory>,
    cfg: PlannerConfig,
) -> (bool, usize) {
    tokio::task::spawn_blocking(move || check(&path, &obstacles, &cfg))
        .await
        .unwrap_or((false, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(cx: f64, cy: f64, yaw: f64, l: f64, w: f64) -> Rect {
        Rect { center_x: cx, center_y: cy, yaw, half_length: l / 2.0, half_width: w / 2.0 }
    }

    #[test]
    fn disjoint_rectangles_do_not_overlap() {
        let a = rect(0.0, 0.0, 0.0, 2.0, 2.0);
        let b = rect(10.0, 10.0, 0.0, 2.0, 2.0);
        assert!(!overlap(&a, &b));
    }

    #[test]
    fn concentric_rectangles_overlap() {
        let a = rect(0.0, 0.0, 0.0, 2.0, 2.0);
        let b = rect(0.5, 0.0, 0.0, 2.0, 2.0);
        assert!(overlap(&a, &b));
    }

    #[test]
    fn sat_is_symmetric() {
        let a = rect(0.0, 0.0, 0.3, 4.0, 2.0);
        let b = rect(3.0, 1.0, -0.6, 5.0, 2.5);
        assert_eq!(overlap(&a, &b), overlap(&b, &a));

        let c = rect(20.0, 20.0, 0.1, 1.0, 1.0);
        assert_eq!(overlap(&a, &c), overlap(&c, &a));
    }

    #[test]
    fn edge_touching_counts_as_overlap() {
        // two 2x2 axis-aligned squares sharing exactly the edge at x=1
        let a = rect(0.0, 0.0, 0.0, 2.0, 2.0);
        let b = rect(2.0, 0.0, 0.0, 2.0, 2.0);
        assert!(overlap(&a, &b));
    }
}
