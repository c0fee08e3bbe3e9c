//! Gradient-descent selector (§4.D): coordinate descent over the sampling
//! grid with on-demand materialization, feeding a real-cost-ordered
//! candidate queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::PlannerConfig;
use crate::frenet::FrenetState;
use crate::polynomial::{QuarticPolynomial, QuinticPolynomial};
use crate::sampling::{Grid, GridIndex};

/// A generated candidate, ordered by ascending `final_cost` when popped from
/// a [`BinaryHeap`] (which is otherwise a max-heap, hence the reversed `Ord`).
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub cost: f64,
    pub idx: GridIndex,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap, we want the lowest cost first.
        other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
    }
}

/// Materializes the real cost of a cell: builds the quintic lateral and
/// quartic longitudinal polynomials, samples them at `tick_t`, and computes
/// the jerk-integral dynamic cost (§4.D "Real cost of a cell").
fn generate(grid: &mut Grid, idx: GridIndex, start: &FrenetState, cfg: &PlannerConfig) -> f64 {
    {
        let cell = grid.get(idx);
        if cell.is_generated {
            return cell.final_cost;
        }
    }

    let end = grid.get(idx).end;
    let t = end.t;

    let lat_poly = QuinticPolynomial::new((start.d, start.d_d, start.d_dd), (end.d, 0.0, 0.0), t);
    let lon_poly = QuarticPolynomial::new((start.s, start.s_d, start.s_dd), (end.v, 0.0), t);

    let n_ticks = (t / cfg.tick_t).floor() as usize + 1;

    let mut j_s = 0.0;
    let mut j_d = 0.0;

    let cell = grid.get_mut(idx);
    cell.t.clear();
    cell.s.clear();
    cell.s_d.clear();
    cell.s_dd.clear();
    cell.s_ddd.clear();
    cell.d.clear();
    cell.d_d.clear();
    cell.d_dd.clear();
    cell.d_ddd.clear();

    for k in 0..n_ticks {
        let tk = (k as f64) * cfg.tick_t;

        let s = lon_poly.value(tk);
        let s_d = lon_poly.d1(tk);
        let s_dd = lon_poly.d2(tk);
        let s_ddd = lon_poly.d3(tk);

        let d = lat_poly.value(tk);
        let d_d = lat_poly.d1(tk);
        let d_dd = lat_poly.d2(tk);
        let d_ddd = lat_poly.d3(tk);

        j_s += s_ddd * s_ddd;
        j_d += d_ddd * d_ddd;

        cell.t.push(tk);
        cell.s.push(s);
        cell.s_d.push(s_d);
        cell.s_dd.push(s_dd);
        cell.s_ddd.push(s_ddd);
        cell.d.push(d);
        cell.d_d.push(d_d);
        cell.d_dd.push(d_dd);
        cell.d_ddd.push(d_ddd);
    }

    let dyn_cost = cfg.k_jerk * (cfg.k_lon * j_s + cfg.k_lat * j_d);
    cell.dyn_cost = dyn_cost;
    cell.final_cost = cell.fix_cost + dyn_cost;
    cell.is_generated = true;

    cell.final_cost
}

fn ensure_generated(
    grid: &mut Grid,
    idx: GridIndex,
    start: &FrenetState,
    cfg: &PlannerConfig,
    queue: &mut BinaryHeap<Candidate>,
) -> f64 {
    let was_generated = grid.get(idx).is_generated;
    let cost = generate(grid, idx, start, cfg);
    if !was_generated {
        queue.push(Candidate { cost, idx });
    }
    cost
}

fn axis_dim(grid: &Grid, axis: usize) -> usize {
    match axis {
        0 => grid.num_width,
        1 => grid.num_speed,
        2 => grid.num_t,
        _ => unreachable!("grid only has 3 axes"),
    }
}

fn axis_component(idx: GridIndex, axis: usize) -> usize {
    match axis {
        0 => idx.i,
        1 => idx.j,
        2 => idx.k,
        _ => unreachable!("grid only has 3 axes"),
    }
}

fn with_axis(idx: GridIndex, axis: usize, value: usize) -> GridIndex {
    let mut out = idx;
    match axis {
        0 => out.i = value,
        1 => out.j = value,
        2 => out.k = value,
        _ => unreachable!("grid only has 3 axes"),
    }
    out
}

/// Runs the coordinate descent from the seed index, materializing cells and
/// filling `queue` as it goes. Returns the number of cells visited
/// (`is_used`), bounded by `N_w * N_v * N_t` (§8 property 6).
pub fn descend(
    grid: &mut Grid,
    seed: GridIndex,
    start: &FrenetState,
    cfg: &PlannerConfig,
    queue: &mut BinaryHeap<Candidate>,
) -> usize {
    let mut idx = seed;
    let mut visited = 0usize;

    loop {
        if grid.get(idx).is_used {
            break;
        }
        grid.get_mut(idx).is_used = true;
        visited += 1;

        let cur_cost = ensure_generated(grid, idx, start, cfg, queue);

        let mut gradients = [0.0f64; 3];
        for axis in 0..3 {
            let dim = axis_dim(grid, axis);
            let cur = axis_component(idx, axis);
            let dir: i32 = if cur == dim - 1 { -1 } else { 1 };
            let neighbor_component = (cur as i32 + dir) as usize;
            let neighbor_idx = with_axis(idx, axis, neighbor_component);

            let neighbor_cost = ensure_generated(grid, neighbor_idx, start, cfg, queue);

            let mut g = if dir == 1 { neighbor_cost - cur_cost } else { cur_cost - neighbor_cost };

            // clamp: stuck against a boundary in the direction the gradient wants to move
            if cur == 0 && g > 0.0 {
                g = 0.0;
            }
            if cur == dim - 1 && g < 0.0 {
                g = 0.0;
            }

            gradients[axis] = g;
        }

        let (best_axis, best_g) = gradients
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().partial_cmp(&b.abs()).unwrap_or(Ordering::Equal))
            .map(|(a, g)| (a, *g))
            .unwrap();

        if best_g == 0.0 {
            // no further descent possible; next loop iteration observes is_used and stops.
            continue;
        }

        let dim = axis_dim(grid, best_axis);
        let cur = axis_component(idx, best_axis);
        let step: i32 = if best_g > 0.0 { -1 } else { 1 };
        let next = (cur as i32 + step).clamp(0, dim as i32 - 1) as usize;
        idx = with_axis(idx, best_axis, next);
    }

    visited
}
