//! Sampling engine (§4.C): enumerates the `(d, v, T)` grid of candidate end
//! states and scores each cell with a fixed cost plus a heuristic lower
//! bound, without materializing a single polynomial trajectory.

use crate::config::PlannerConfig;
use crate::frenet::{EndState, FrenetPath, FrenetState};

/// Grid index `(lateral, speed, horizon)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl GridIndex {
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        GridIndex { i, j, k }
    }
}

/// Dense 3D array of seeded [`FrenetPath`]s plus the dimensions needed to
/// walk neighbours during the descent (§4.D).
pub struct Grid {
    pub num_width: usize,
    pub num_speed: usize,
    pub num_t: usize,
    cells: Vec<FrenetPath>,
    lane_id: i32,
}

impl Grid {
    pub fn flat_index(&self, idx: GridIndex) -> usize {
        (idx.i * self.num_speed + idx.j) * self.num_t + idx.k
    }

    pub fn get(&self, idx: GridIndex) -> &FrenetPath {
        &self.cells[self.flat_index(idx)]
    }

    pub fn get_mut(&mut self, idx: GridIndex) -> &mut FrenetPath {
        let flat = self.flat_index(idx);
        &mut self.cells[flat]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn lane_id(&self) -> i32 {
        self.lane_id
    }

    /// `d` axis value at sample index `i`, signed (left positive), spanning
    /// `[-right_w, left_w]` when `center_offset == 0`.
    pub fn d_axis(&self, left_w: f64, right_w: f64, center_offset: f64, i: usize) -> f64 {
        let half = (self.num_width as f64 - 1.0) / 2.0;
        let dw = (left_w - center_offset) / half;
        -right_w + i as f64 * dw
    }

    pub fn v_axis(&self, v_lo: f64, v_hi: f64, j: usize) -> f64 {
        v_lo + j as f64 * (v_hi - v_lo) / (self.num_speed as f64 - 1.0)
    }

    pub fn t_axis(&self, t_min: f64, t_max: f64, k: usize) -> f64 {
        t_min + k as f64 * (t_max - t_min) / (self.num_t as f64 - 1.0)
    }
}

/// Per-cell fixed cost terms, precomputable without generating a trajectory.
pub fn fix_cost(
    cfg: &PlannerConfig,
    left_w: f64,
    right_w: f64,
    current_speed: f64,
    d: f64,
    v: f64,
    t: f64,
) -> f64 {
    let denom = {
        let l = (left_w - cfg.center_offset).powi(2);
        let r = (right_w - cfg.center_offset).powi(2);
        l.max(r)
    };
    let lat_cost = if denom > 0.0 { (d - cfg.center_offset).powi(2) / denom } else { 0.0 };
    let speed_cost = (cfg.highest_speed - v).powi(2) + 0.5 * (current_speed - v).powi(2);
    let time_cost = 1.0 - t / cfg.max_t;

    cfg.k_lat * cfg.k_diff * lat_cost + cfg.k_lon * (cfg.k_time * time_cost + cfg.k_diff * speed_cost)
}

/// Heuristic lower bound on the remaining jerk-weighted lateral effort.
pub fn heuristic_cost(cfg: &PlannerConfig, start: &FrenetState, d: f64) -> f64 {
    cfg.k_lat * cfg.k_diff * (start.d - d).powi(2)
}

/// Builds the sampling grid and returns it along with the seed index that
/// minimizes `fix_cost + hur_cost` (§4.C).
pub fn build_grid(
    cfg: &PlannerConfig,
    start: &FrenetState,
    lane_id: i32,
    left_w: f64,
    right_w: f64,
    current_speed: f64,
) -> (Grid, GridIndex) {
    let mut grid = Grid {
        num_width: cfg.num_width,
        num_speed: cfg.num_speed,
        num_t: cfg.num_t,
        cells: Vec::with_capacity(cfg.num_width * cfg.num_speed * cfg.num_t),
        lane_id,
    };

    let mut best_idx = GridIndex::new(0, 0, 0);
    let mut best_cost = f64::INFINITY;

    for i in 0..cfg.num_width {
        let d = grid.d_axis(left_w, right_w, cfg.center_offset, i);
        for j in 0..cfg.num_speed {
            let v = grid.v_axis(cfg.lowest_speed, cfg.highest_speed, j);
            for k in 0..cfg.num_t {
                let t = grid.t_axis(cfg.min_t, cfg.max_t, k);

                let fc = fix_cost(cfg, left_w, right_w, current_speed, d, v, t);
                let hc = heuristic_cost(cfg, start, d);

                if fc + hc < best_cost {
                    best_cost = fc + hc;
                    best_idx = GridIndex::new(i, j, k);
                }

                grid.cells.push(FrenetPath::seed(lane_id, EndState { d, v, t }, fc, hc));
            }
        }
    }

    (grid, best_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PlannerConfig {
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

    #[test]
    fn grid_has_expected_size() {
        let cfg = cfg();
        let start = FrenetState::new(0.0, 5.0, 0.0, 0.0, 0.0, 0.0);
        let (grid, _) = build_grid(&cfg, &start, 0, 1.0, 1.0, 5.0);
        assert_eq!(grid.len(), 3 * 3 * 3);
    }

    #[test]
    fn fix_cost_never_negative_for_symmetric_lane() {
        let cfg = cfg();
        let start = FrenetState::new(0.0, 5.0, 0.0, 0.0, 0.0, 0.0);
        let (grid, seed) = build_grid(&cfg, &start, 0, 1.0, 1.0, 5.0);
        for cell in 0..grid.len() {
            let i = cell / (grid.num_speed * grid.num_t);
            let rem = cell % (grid.num_speed * grid.num_t);
            let j = rem / grid.num_t;
            let k = rem % grid.num_t;
            let c = grid.get(GridIndex::new(i, j, k));
            assert!(c.fix_cost >= 0.0);
        }
        // seed should exist within bounds
        assert!(seed.i < grid.num_width && seed.j < grid.num_speed && seed.k < grid.num_t);
    }
}
