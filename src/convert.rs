//! Frenet → Cartesian lift (§4.E): extends a sampled Frenet trajectory with
//! global x/y/yaw/curvature using the reference [`Spline2D`].

use std::f64::consts::PI;

use crate::frenet::FrenetPath;
use crate::spline::Spline2D;

/// Normalizes any angle into `(-pi, pi]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle;
    while a > PI {
        a -= 2.0 * PI;
    }
    while a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Fills `path.x/y/yaw/ds/c` in place. On the first non-finite Cartesian
/// point, truncates every per-tick array to the ticks generated so far (§7
/// "Numerical degeneracy").
pub fn to_cartesian(path: &mut FrenetPath, reference: &Spline2D) {
    let n = path.num_ticks();
    path.x = Vec::with_capacity(n);
    path.y = Vec::with_capacity(n);

    let mut truncate_at = n;
    for k in 0..n {
        let s = path.s[k];
        let (x_ref, y_ref) = reference.position(s);
        let yaw_ref = reference.yaw(s);

        let d = path.d[k];
        let x = x_ref + d * (yaw_ref + PI / 2.0).cos();
        let y = y_ref + d * (yaw_ref + PI / 2.0).sin();

        if !x.is_finite() || !y.is_finite() {
            truncate_at = k;
            break;
        }

        path.x.push(x);
        path.y.push(y);
    }

    if truncate_at < n {
        truncate_frenet_arrays(path, truncate_at);
    }

    let n = path.x.len();
    let mut yaw = vec![0.0; n];
    let mut ds = vec![0.0; n];

    for k in 0..n.saturating_sub(1) {
        let dx = path.x[k + 1] - path.x[k];
        let dy = path.y[k + 1] - path.y[k];
        yaw[k] = dy.atan2(dx);
        ds[k] = (dx * dx + dy * dy).sqrt();
    }
    if n >= 2 {
        yaw[n - 1] = yaw[n - 2];
        ds[n - 1] = ds[n - 2];
    }

    let mut c = vec![0.0; n];
    for k in 0..n.saturating_sub(1) {
        c[k] = if ds[k] > 0.0 { normalize_angle(yaw[k + 1] - yaw[k]) / ds[k] } else { 0.0 };
    }
    if n >= 2 {
        c[n - 1] = c[n - 2];
    }

    path.yaw = yaw;
    path.ds = ds;
    path.c = c;
}

fn truncate_frenet_arrays(path: &mut FrenetPath, len: usize) {
    path.t.truncate(len);
    path.s.truncate(len);
    path.s_d.truncate(len);
    path.s_dd.truncate(len);
    path.s_ddd.truncate(len);
    path.d.truncate(len);
    path.d_d.truncate(len);
    path.d_dd.truncate(len);
    path.d_ddd.truncate(len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frenet::{EndState, FrenetPath};

    fn straight_reference() -> Spline2D {
        let xs = vec![0.0, 10.0, 20.0, 30.0, 40.0];
        let ys = vec![0.0, 0.0, 0.0, 0.0, 0.0];
        Spline2D::new(&xs, &ys)
    }

    #[test]
    fn zero_offset_reproduces_reference() {
        let reference = straight_reference();
        let mut path = FrenetPath::seed(0, EndState { d: 0.0, v: 5.0, t: 2.0 }, 0.0, 0.0);
        path.t = vec![0.0, 1.0, 2.0];
        path.s = vec![5.0, 10.0, 15.0];
        path.d = vec![0.0, 0.0, 0.0];
        path.d_d = vec![0.0; 3];
        path.d_dd = vec![0.0; 3];
        path.d_ddd = vec![0.0; 3];
        path.s_d = vec![5.0; 3];
        path.s_dd = vec![0.0; 3];
        path.s_ddd = vec![0.0; 3];

        to_cartesian(&mut path, &reference);

        assert!((path.x[1] - 10.0).abs() < 1e-6);
        assert!((path.y[1] - 0.0).abs() < 1e-6);
        assert!(path.yaw[0].abs() < 1e-6);
        assert!(path.c[0].abs() < 1e-6);
    }

    #[test]
    fn non_finite_point_truncates_trajectory() {
        let reference = straight_reference();
        let mut path = FrenetPath::seed(0, EndState { d: 0.0, v: 5.0, t: 2.0 }, 0.0, 0.0);
        path.t = vec![0.0, 1.0, 2.0];
        // s = 100 lies outside the reference domain [0, 40]; spline value
        // there is defined as 0, so yaw/curvature stay finite there, but we
        // can force non-finite d with NaN directly to exercise truncation.
        path.s = vec![5.0, 10.0, 15.0];
        path.d = vec![0.0, f64::NAN, 0.0];
        path.d_d = vec![0.0; 3];
        path.d_dd = vec![0.0; 3];
        path.d_ddd = vec![0.0; 3];
        path.s_d = vec![5.0; 3];
        path.s_dd = vec![0.0; 3];
        path.s_ddd = vec![0.0; 3];

        to_cartesian(&mut path, &reference);

        assert_eq!(path.x.len(), 1);
        assert_eq!(path.s.len(), 1);
    }
}
