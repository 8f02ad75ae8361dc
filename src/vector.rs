use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, Neg, Sub, SubAssign};

use ultraviolet::{DVec2, DVec3};

/// Vector operations shared by the 2D and 3D simulations.
///
/// Value operations (`a + b`, `a - b`, `a * k`, `a / k`) return new vectors.
/// Accumulation goes through `+=` / `-=`, so every in-place update is visible
/// at the call site.
pub trait Vector:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + DivAssign<f64>
    + Send
    + Sync
    + 'static
{
    /// Number of components.
    const DIM: usize;

    fn zero() -> Self;

    fn length_squared(&self) -> f64;

    fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns `self * k`.
    fn scale(self, k: f64) -> Self {
        self * k
    }

    /// Component along `axis`. Panics if `axis >= DIM`.
    fn axis(&self, axis: usize) -> f64;

    fn axis_mut(&mut self, axis: usize) -> &mut f64;

    /// Appends the components to `out` in axis order.
    fn extend_into(&self, out: &mut Vec<f64>) {
        out.extend((0..Self::DIM).map(|axis| self.axis(axis)));
    }
}

impl Vector for DVec2 {
    const DIM: usize = 2;

    #[inline]
    fn zero() -> Self {
        DVec2::zero()
    }

    #[inline]
    fn length_squared(&self) -> f64 {
        self.mag_sq()
    }

    #[inline]
    fn axis(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("axis {axis} out of range for a 2D vector"),
        }
    }

    #[inline]
    fn axis_mut(&mut self, axis: usize) -> &mut f64 {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("axis {axis} out of range for a 2D vector"),
        }
    }
}

impl Vector for DVec3 {
    const DIM: usize = 3;

    #[inline]
    fn zero() -> Self {
        DVec3::zero()
    }

    #[inline]
    fn length_squared(&self) -> f64 {
        self.mag_sq()
    }

    #[inline]
    fn axis(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {axis} out of range for a 3D vector"),
        }
    }

    #[inline]
    fn axis_mut(&mut self, axis: usize) -> &mut f64 {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("axis {axis} out of range for a 3D vector"),
        }
    }
}
