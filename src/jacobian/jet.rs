//! Dual number (Jet) type for forward-mode automatic differentiation
//!
//! A `Jet<T, N>` carries a value together with its derivatives with respect to
//! N parameters. Evaluating a function on jets seeded with [`Jet::variable`]
//! yields the exact Jacobian of that function, with no step size involved.

use nalgebra::{SMatrix, SVector};
use num_traits::Float;
use std::ops::{Add, Mul, Neg, Sub};

/// A dual number containing a value and its derivatives
///
/// Generic over:
/// - T: the scalar type (usually f64)
/// - N: the number of parameters (compile-time constant)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jet<T, const N: usize> {
    /// The scalar value
    pub value: T,
    /// Derivatives with respect to each parameter
    pub derivs: [T; N],
}

impl<T: Float, const N: usize> Jet<T, N> {
    /// Create a constant (zero derivatives)
    pub fn constant(value: T) -> Self {
        Self {
            value,
            derivs: [T::zero(); N],
        }
    }

    /// Create a variable with unit derivative at the given index
    ///
    /// Panics if `index >= N`.
    pub fn variable(value: T, index: usize) -> Self {
        let mut derivs = [T::zero(); N];
        derivs[index] = T::one();
        Self { value, derivs }
    }

    /// True if the value and every derivative are finite.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.derivs.iter().all(|d| d.is_finite())
    }
}

/// Addition: (a + da) + (b + db) = (a + b) + (da + db)
impl<T: Float, const N: usize> Add for Jet<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            derivs: std::array::from_fn(|i| self.derivs[i] + rhs.derivs[i]),
        }
    }
}

/// Subtraction: (a + da) - (b + db) = (a - b) + (da - db)
impl<T: Float, const N: usize> Sub for Jet<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
            derivs: std::array::from_fn(|i| self.derivs[i] - rhs.derivs[i]),
        }
    }
}

/// Multiplication: (a + da) * (b + db) = ab + a*db + b*da
impl<T: Float, const N: usize> Mul for Jet<T, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            value: self.value * rhs.value,
            derivs: std::array::from_fn(|i| {
                self.value * rhs.derivs[i] + rhs.value * self.derivs[i]
            }),
        }
    }
}

impl<T: Float, const N: usize> Neg for Jet<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            value: -self.value,
            derivs: self.derivs.map(|d| -d),
        }
    }
}

/// Scalar types the tangent-vector expressions can be evaluated on.
///
/// Implemented for `f64` (plain evaluation) and `Jet<f64, N>` (evaluation with
/// derivatives), so an expression is written once and differentiated exactly.
pub trait Scalar:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// Lift an `f64` constant into this scalar type.
    fn from_f64(value: f64) -> Self;

    fn zero() -> Self {
        Self::from_f64(0.0)
    }
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }
}

impl<const N: usize> Scalar for Jet<f64, N> {
    fn from_f64(value: f64) -> Self {
        Jet::constant(value)
    }
}

/// Evaluate `f` at `x` with forward-mode autodiff.
///
/// Returns the value f(x) and the Jacobian ∂f/∂x, exact up to floating-point
/// rounding of the operations inside `f`.
pub fn jacobian<const M: usize, const N: usize, F>(
    f: F,
    x: &SVector<f64, N>,
) -> (SVector<f64, M>, SMatrix<f64, M, N>)
where
    F: Fn(&[Jet<f64, N>; N]) -> [Jet<f64, N>; M],
{
    let seeded: [Jet<f64, N>; N] = std::array::from_fn(|i| Jet::variable(x[i], i));
    let output = f(&seeded);

    let value = SVector::<f64, M>::from_fn(|row, _| output[row].value);
    let jac = SMatrix::<f64, M, N>::from_fn(|row, col| output[row].derivs[col]);
    (value, jac)
}
