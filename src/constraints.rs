//! Kinematic constraint checker (§4.F). Pure and idempotent: running it
//! twice on the same trajectory yields the same verdict (§8 property 8).

use crate::config::PlannerConfig;
use crate::frenet::FrenetPath;

/// Checks every tick for finiteness and the configured speed/accel/curvature
/// bounds. Stops at the first violation and records the verdict on the
/// trajectory.
pub fn check(path: &mut FrenetPath, cfg: &PlannerConfig) -> bool {
    let n = path.x.len();
    let mut passed = n > 0;

    for k in 0..n {
        if !path.x[k].is_finite() || !path.y[k].is_finite() {
            passed = false;
            break;
        }
        if path.s_d[k] > cfg.max_speed {
            passed = false;
            break;
        }
        if path.s_dd[k] < cfg.max_decel || path.s_dd[k] > cfg.max_accel {
            passed = false;
            break;
        }
        if path.c[k].abs() > cfg.max_curvature {
            passed = false;
            break;
        }
    }

    path.constraint_passed = Some(passed);
    passed
}
