//! Numerical right-Jacobian estimator for SE(2) exponential coordinates.
//!
//! The estimate is built in two stages:
//!
//! 1. Dᵢ ≈ ∂Exp(ξ)/∂ξᵢ by forward finite differences of the matrix exponential.
//! 2. v_r(ξ̇) = (Exp(ξ)⁻¹ · Σᵢ Dᵢ ξ̇ᵢ)^∨ is linear in the rate ξ̇; it is evaluated on
//!    [`Jet`]s to read off ∂v_r/∂ξ̇ = Jr(ξ) exactly.
//!
//! Stage 1 never touches the closed-form Jacobian, so the result is an
//! independent check of [`crate::manifold::se2::right_jacobian`]. Its accuracy
//! is bounded by the finite-difference error of stage 1 only.

use crate::error::{LieError, LieResult};
use crate::jacobian::finite_difference::forward_differences;
use crate::jacobian::jet::{self, Jet, Scalar};
use crate::manifold::se2;
use nalgebra::{Matrix3, Vector3};
use tracing::trace;

/// The right-tangent-vector map v_r(ξ̇) at a fixed configuration ξ.
#[derive(Debug, Clone, PartialEq)]
pub struct RightTangentMap {
    /// Configuration ξ the map is linearized at
    coordinates: Vector3<f64>,
    /// Exp(ξ)⁻¹
    exp_inverse: Matrix3<f64>,
    /// Finite-difference partials ∂Exp/∂ξᵢ
    partials: [Matrix3<f64>; 3],
}

impl RightTangentMap {
    /// Build the map at `xi` using forward differences with the given `step`.
    ///
    /// # Errors
    /// - [`LieError::InvalidInput`] for an invalid step
    /// - [`LieError::SingularJacobian`] if Exp(ξ) is not invertible (non-finite ξ)
    pub fn new(xi: &Vector3<f64>, step: f64) -> LieResult<Self> {
        if !xi.iter().all(|value| value.is_finite()) {
            return Err(LieError::SingularJacobian { theta: xi[2] });
        }
        let partials = forward_differences(se2::exp, xi, step)?;
        let exp_inverse = se2::exp(xi)
            .try_inverse()
            .ok_or(LieError::SingularJacobian { theta: xi[2] })?;

        Ok(RightTangentMap {
            coordinates: *xi,
            exp_inverse,
            partials,
        })
    }

    pub fn coordinates(&self) -> Vector3<f64> {
        self.coordinates
    }

    pub fn partials(&self) -> &[Matrix3<f64>; 3] {
        &self.partials
    }

    /// Evaluate v_r(ξ̇) = (Exp(ξ)⁻¹ · Σᵢ Dᵢ ξ̇ᵢ)^∨ on any [`Scalar`].
    pub fn evaluate<T: Scalar>(&self, rate: &[T; 3]) -> [T; 3] {
        let derivative: [[T; 3]; 3] = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                self.partials
                    .iter()
                    .zip(rate.iter())
                    .fold(T::zero(), |acc, (partial, &r)| {
                        acc + T::from_f64(partial[(row, col)]) * r
                    })
            })
        });

        let body = |row: usize, col: usize| {
            (0..3).fold(T::zero(), |acc, k| {
                acc + T::from_f64(self.exp_inverse[(row, k)]) * derivative[k][col]
            })
        };

        // vee: (Ξ[0,2], Ξ[1,2], Ξ[1,0])
        [body(0, 2), body(1, 2), body(1, 0)]
    }

    /// Body-frame velocity for a concrete coordinate rate.
    pub fn velocity(&self, rate: &Vector3<f64>) -> Vector3<f64> {
        Vector3::from(self.evaluate(&[rate[0], rate[1], rate[2]]))
    }

    /// ∂v_r/∂ξ̇ via forward-mode autodiff.
    pub fn jacobian(&self) -> Matrix3<f64> {
        let (_, jac) = jet::jacobian(
            |rate: &[Jet<f64, 3>; 3]| self.evaluate(rate),
            &Vector3::zeros(),
        );
        jac
    }
}

/// Numerical estimate of the right Jacobian Jr(ξ).
///
/// # Arguments
/// * `xi` - Exponential coordinates [ρ₁, ρ₂, θ]
/// * `step` - Finite-difference step for ∂Exp/∂ξᵢ (see
///   [`crate::jacobian::finite_difference::DEFAULT_STEP_SIZE`])
///
/// # Errors
/// [`LieError::InvalidInput`] for an invalid step, [`LieError::SingularJacobian`]
/// if the estimate is not finite.
pub fn numerical_right_jacobian(xi: &Vector3<f64>, step: f64) -> LieResult<Matrix3<f64>> {
    let jacobian = RightTangentMap::new(xi, step)?.jacobian();

    if !jacobian.iter().all(|value| value.is_finite()) {
        return Err(LieError::SingularJacobian { theta: xi[2] });
    }

    trace!(
        "Numerical Jr at [{:.6}, {:.6}, {:.6}] with step {:e}",
        xi[0],
        xi[1],
        xi[2],
        step
    );
    Ok(jacobian)
}
