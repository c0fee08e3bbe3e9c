//! Natural cubic spline, 1D and 2D (§4.B).
//!
//! The reference implementation this crate grew out of solved the
//! tridiagonal system with a dense inverse hard-coded for five knots. That
//! shortcut silently returns zeroes for any other `n`. [`Spline1D::new`]
//! instead runs a general Thomas-algorithm sweep, valid for any `n >= 3`.

/// A natural cubic spline over strictly increasing `x`.
#[derive(Debug, Clone)]
pub struct Spline1D {
    x: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl Spline1D {
    /// Builds the spline from paired samples. Panics if fewer than 3 points
    /// are given or `x` is not strictly increasing; callers that need a
    /// recoverable error should validate with [`crate::error::PlannerError`]
    /// before construction (see [`crate::planner::Planner::plan`]).
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        assert!(x.len() >= 3, "spline needs at least 3 points, got {}", x.len());
        assert_eq!(x.len(), y.len(), "x and y must be the same length");

        let n = x.len();
        let h: Vec<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
        for (i, hi) in h.iter().enumerate() {
            assert!(*hi > 0.0, "x must be strictly increasing at index {}", i);
        }

        let c = solve_second_derivatives(&h, y);

        let a = y.to_vec();
        let mut b = vec![0.0; n - 1];
        let mut d = vec![0.0; n - 1];
        for i in 0..n - 1 {
            d[i] = (c[i + 1] - c[i]) / (3.0 * h[i]);
            b[i] = (y[i + 1] - y[i]) / h[i] - h[i] * (c[i + 1] + 2.0 * c[i]) / 3.0;
        }

        Spline1D { x: x.to_vec(), a, b, c, d }
    }

    fn segment(&self, t: f64) -> Option<usize> {
        if t < self.x[0] || t > *self.x.last().unwrap() {
            return None;
        }
        // binary search for the rightmost knot <= t
        let mut lo = 0usize;
        let mut hi = self.x.len() - 1;
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if self.x[mid] <= t {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Some(lo.min(self.x.len() - 2))
    }

    pub fn value(&self, t: f64) -> f64 {
        match self.segment(t) {
            Some(i) => {
                let dx = t - self.x[i];
                self.a[i] + self.b[i] * dx + self.c[i] * dx.powi(2) + self.d[i] * dx.powi(3)
            }
            None => 0.0,
        }
    }

    pub fn d1(&self, t: f64) -> f64 {
        match self.segment(t) {
            Some(i) => {
                let dx = t - self.x[i];
                self.b[i] + 2.0 * self.c[i] * dx + 3.0 * self.d[i] * dx.powi(2)
            }
            None => 0.0,
        }
    }

    pub fn d2(&self, t: f64) -> f64 {
        match self.segment(t) {
            Some(i) => {
                let dx = t - self.x[i];
                2.0 * self.c[i] + 6.0 * self.d[i] * dx
            }
            None => 0.0,
        }
    }
}

/// Thomas algorithm for the natural-spline second-derivative system.
/// Works for any `n = h.len() + 1 >= 3`.
fn solve_second_derivatives(h: &[f64], y: &[f64]) -> Vec<f64> {
    let n = y.len();

    // interior unknowns c_1..c_{n-2}; c_0 = c_{n-1} = 0 (natural boundary)
    let m = n - 2;
    if m == 0 {
        return vec![0.0; n];
    }

    let mut sub = vec![0.0; m]; // sub-diagonal, sub[0] unused
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m]; // super-diagonal, sup[m-1] unused
    let mut rhs = vec![0.0; m];

    for k in 0..m {
        let i = k + 1; // interior knot index into h/y
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        rhs[k] = 3.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        if k > 0 {
            sub[k] = h[i - 1];
        }
        if k + 1 < m {
            sup[k] = h[i];
        }
    }

    // forward sweep
    let mut c_prime = vec![0.0; m];
    let mut d_prime = vec![0.0; m];
    c_prime[0] = sup[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];
    for k in 1..m {
        let denom = diag[k] - sub[k] * c_prime[k - 1];
        c_prime[k] = sup[k] / denom;
        d_prime[k] = (rhs[k] - sub[k] * d_prime[k - 1]) / denom;
    }

    // back substitution
    let mut interior = vec![0.0; m];
    interior[m - 1] = d_prime[m - 1];
    for k in (0..m - 1).rev() {
        interior[k] = d_prime[k] - c_prime[k] * interior[k + 1];
    }

    let mut c = vec![0.0; n];
    c[1..n - 1].copy_from_slice(&interior);
    c
}

/// Pair of Spline1Ds parameterized by cumulative arc length.
#[derive(Debug, Clone)]
pub struct Spline2D {
    pub s: Vec<f64>,
    sx: Spline1D,
    sy: Spline1D,
}

impl Spline2D {
    pub fn new(xs: &[f64], ys: &[f64]) -> Self {
        let s = cumulative_arc_length(xs, ys);
        let sx = Spline1D::new(&s, xs);
        let sy = Spline1D::new(&s, ys);
        Spline2D { s, sx, sy }
    }

    pub fn s_max(&self) -> f64 {
        *self.s.last().unwrap()
    }

    pub fn position(&self, s: f64) -> (f64, f64) {
        (self.sx.value(s), self.sy.value(s))
    }

    pub fn yaw(&self, s: f64) -> f64 {
        let dx = self.sx.d1(s);
        let dy = self.sy.d1(s);
        dy.atan2(dx)
    }

    /// Signed curvature `(x'y'' - y'x'') / (x'^2 + y'^2)^{3/2}` (§9).
    pub fn curvature(&self, s: f64) -> f64 {
        let dx = self.sx.d1(s);
        let dy = self.sy.d1(s);
        let ddx = self.sx.d2(s);
        let ddy = self.sy.d2(s);
        let denom = (dx * dx + dy * dy).powf(1.5);
        if denom == 0.0 {
            0.0
        } else {
            (dx * ddy - dy * ddx) / denom
        }
    }
}

fn cumulative_arc_length(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let mut s = vec![0.0; xs.len()];
    for i in 1..xs.len() {
        let dx = xs[i] - xs[i - 1];
        let dy = ys[i] - ys[i - 1];
        s[i] = s[i - 1] + (dx * dx + dy * dy).sqrt();
    }
    s
}
