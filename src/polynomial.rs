//! Quartic and quintic boundary-value polynomials (§4.A).
//!
//! Both interpolate a scalar coordinate between a start and end kinematic
//! state over a fixed duration `T`. Queries outside `t ∈ [0, T]` are not
//! meaningful and are left to the caller to avoid.

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

/// Quintic polynomial matching position/velocity/acceleration at both ends.
/// Used for the lateral (`d`) profile, which has a fixed end position.
#[derive(Debug, Clone, Copy)]
pub struct QuinticPolynomial {
    a0: f64,
    a1: f64,
    a2: f64,
    a3: f64,
    a4: f64,
    a5: f64,
}

impl QuinticPolynomial {
    /// `start = (pos, vel, accel)`, `end = (pos, vel, accel)`, `t > 0`.
    pub fn new(start: (f64, f64, f64), end: (f64, f64, f64), t: f64) -> Self {
        debug_assert!(t > 0.0, "quintic polynomial duration must be positive");

        let (d0, d0_d, d0_dd) = start;
        let (d1, d1_d, d1_dd) = end;

        let a0 = d0;
        let a1 = d0_d;
        let a2 = d0_dd / 2.0;

        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        let t5 = t4 * t;

        let m = Matrix3::new(
            t3, t4, t5,
            3.0 * t2, 4.0 * t3, 5.0 * t4,
            6.0 * t, 12.0 * t2, 20.0 * t3,
        );
        let b = Vector3::new(
            d1 - (a0 + a1 * t + a2 * t2),
            d1_d - (a1 + 2.0 * a2 * t),
            d1_dd - 2.0 * a2,
        );

        let x = m
            .lu()
            .solve(&b)
            .expect("quintic boundary-value system is singular for t > 0");

        QuinticPolynomial { a0, a1, a2, a3: x[0], a4: x[1], a5: x[2] }
    }

    pub fn value(&self, t: f64) -> f64 {
        self.a0
            + self.a1 * t
            + self.a2 * t.powi(2)
            + self.a3 * t.powi(3)
            + self.a4 * t.powi(4)
            + self.a5 * t.powi(5)
    }

    pub fn d1(&self, t: f64) -> f64 {
        self.a1
            + 2.0 * self.a2 * t
            + 3.0 * self.a3 * t.powi(2)
            + 4.0 * self.a4 * t.powi(3)
            + 5.0 * self.a5 * t.powi(4)
    }

    pub fn d2(&self, t: f64) -> f64 {
        2.0 * self.a2 + 6.0 * self.a3 * t + 12.0 * self.a4 * t.powi(2) + 20.0 * self.a5 * t.powi(3)
    }

    pub fn d3(&self, t: f64) -> f64 {
        6.0 * self.a3 + 24.0 * self.a4 * t + 60.0 * self.a5 * t.powi(2)
    }
}

/// Quartic polynomial matching position/velocity/acceleration at the start
/// and only velocity/acceleration at the end. Used for the longitudinal
/// (`s`) profile, whose end position is free.
#[derive(Debug, Clone, Copy)]
pub struct QuarticPolynomial {
    a0: f64,
    a1: f64,
    a2: f64,
    a3: f64,
    a4: f64,
}

impl QuarticPolynomial {
    /// `start = (pos, vel, accel)`, `end = (vel, accel)`, `t > 0`.
    pub fn new(start: (f64, f64, f64), end: (f64, f64), t: f64) -> Self {
        debug_assert!(t > 0.0, "quartic polynomial duration must be positive");

        let (s0, s0_d, s0_dd) = start;
        let (s1_d, s1_dd) = end;

        let a0 = s0;
        let a1 = s0_d;
        let a2 = s0_dd / 2.0;

        let t2 = t * t;
        let t3 = t2 * t;

        let m = Matrix2::new(3.0 * t2, 4.0 * t3, 6.0 * t, 12.0 * t2);
        let b = Vector2::new(s1_d - (a1 + 2.0 * a2 * t), s1_dd - 2.0 * a2);

        let x = m
            .lu()
            .solve(&b)
            .expect("quartic boundary-value system is singular for t > 0");

        QuarticPolynomial { a0, a1, a2, a3: x[0], a4: x[1] }
    }

    pub fn value(&self, t: f64) -> f64 {
        self.a0 + self.a1 * t + self.a2 * t.powi(2) + self.a3 * t.powi(3) + self.a4 * t.powi(4)
    }

    pub fn d1(&self, t: f64) -> f64 {
        self.a1 + 2.0 * self.a2 * t + 3.0 * self.a3 * t.powi(2) + 4.0 * self.a4 * t.powi(3)
    }

    pub fn d2(&self, t: f64) -> f64 {
        2.0 * self.a2 + 6.0 * self.a3 * t + 12.0 * self.a4 * t.powi(2)
    }

    pub fn d3(&self, t: f64) -> f64 {
        6.0 * self.a3 + 24.0 * self.a4 * t
    }
}
