//! Immutable 2D vector used for positions, sizes and velocities
//!
//! Arithmetic is delegated to `glam::DVec2`; the wrapper keeps the value
//! `Copy` so no operation can ever mutate an operand.

use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point or displacement in grid units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };
    pub const ONE: Vector = Vector { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        (self.as_dvec2() + other.as_dvec2()).into()
    }

    /// Scale both components
    #[inline]
    pub fn times(self, factor: f64) -> Vector {
        (self.as_dvec2() * factor).into()
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// True when both components are finite
    pub fn is_finite(self) -> bool {
        self.as_dvec2().is_finite()
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        v.as_dvec2()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.plus(-rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.times(-1.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.times(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plus_and_times() {
        let start = Vector::new(30.0, 50.0);
        let step = Vector::new(5.0, 10.0);
        let finish = start.plus(step.times(2.0));
        assert_eq!(finish, Vector::new(40.0, 70.0));
        // Operands unchanged
        assert_eq!(start, Vector::new(30.0, 50.0));
        assert_eq!(step, Vector::new(5.0, 10.0));
    }

    #[test]
    fn test_operators_match_methods() {
        let a = Vector::new(1.5, -2.0);
        let b = Vector::new(-0.5, 4.0);
        assert_eq!(a + b, a.plus(b));
        assert_eq!(a * 3.0, a.times(3.0));
        assert_eq!(-a, Vector::new(-1.5, 2.0));
        assert_eq!(a - a, Vector::ZERO);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Vector::default(), Vector::ZERO);
        assert_eq!(Vector::ONE, Vector::new(1.0, 1.0));
    }

    proptest! {
        #[test]
        fn plus_adds_components(
            ax in -1e6f64..1e6, ay in -1e6f64..1e6,
            bx in -1e6f64..1e6, by in -1e6f64..1e6,
        ) {
            let a = Vector::new(ax, ay);
            let b = Vector::new(bx, by);
            let sum = a.plus(b);
            prop_assert_eq!(sum.x, ax + bx);
            prop_assert_eq!(sum.y, ay + by);
            prop_assert_eq!(a, Vector::new(ax, ay));
            prop_assert_eq!(b, Vector::new(bx, by));
        }

        #[test]
        fn times_is_invertible(
            x in -1e3f64..1e3, y in -1e3f64..1e3,
            s in prop_oneof![-100.0f64..-0.01, 0.01f64..100.0],
        ) {
            let a = Vector::new(x, y);
            let back = a.times(s).times(1.0 / s);
            prop_assert!((back.x - x).abs() <= 1e-9 * x.abs().max(1.0));
            prop_assert!((back.y - y).abs() <= 1e-9 * y.abs().max(1.0));
        }
    }
}
