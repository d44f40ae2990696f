//! Forward finite-difference partial derivatives.
//!
//! ∂f/∂xᵢ(x) ≈ (f(x + ε·eᵢ) − f(x)) / ε
//!
//! The truncation error is O(ε) while floating-point cancellation grows as
//! O(u/ε) (u = machine epsilon), so accuracy is best around ε ≈ √u ≈ 1e-8 for
//! well-scaled functions and degrades in both directions. The step is used as
//! given: there is no adaptive step-size selection.

use crate::error::{LieError, LieResult};
use nalgebra::{SMatrix, SVector};

/// Step used by the numerical right-Jacobian estimator unless told otherwise.
pub const DEFAULT_STEP_SIZE: f64 = 1e-6;

fn check_step(step: f64) -> LieResult<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(LieError::InvalidInput(format!(
            "finite-difference step must be positive and finite, got {step}"
        )))
    }
}

/// Forward-difference approximation of ∂f/∂x_index at `x`.
///
/// `f` maps an N-vector to an R×C matrix (vectors are the C = 1 case).
///
/// # Arguments
/// * `index` - Coordinate to differentiate with respect to (0-based, `< N`)
/// * `f` - Function to differentiate
/// * `x` - Base point
/// * `step` - Step ε, must be positive and finite
///
/// # Errors
/// [`LieError::InvalidInput`] for an out-of-range index or an invalid step.
pub fn forward_difference<const N: usize, const R: usize, const C: usize, F>(
    index: usize,
    f: F,
    x: &SVector<f64, N>,
    step: f64,
) -> LieResult<SMatrix<f64, R, C>>
where
    F: Fn(&SVector<f64, N>) -> SMatrix<f64, R, C>,
{
    if index >= N {
        return Err(LieError::InvalidInput(format!(
            "coordinate index {index} out of range for dimension {N}"
        )));
    }
    check_step(step)?;

    let mut shifted = *x;
    shifted[index] += step;
    Ok((f(&shifted) - f(x)) / step)
}

/// Forward-difference partials with respect to every coordinate.
///
/// Equivalent to calling [`forward_difference`] for each index, but evaluates
/// f(x) only once.
pub fn forward_differences<const N: usize, const R: usize, const C: usize, F>(
    f: F,
    x: &SVector<f64, N>,
    step: f64,
) -> LieResult<[SMatrix<f64, R, C>; N]>
where
    F: Fn(&SVector<f64, N>) -> SMatrix<f64, R, C>,
{
    check_step(step)?;

    let base = f(x);
    let mut partials = [SMatrix::<f64, R, C>::zeros(); N];
    for (index, partial) in partials.iter_mut().enumerate() {
        let mut shifted = *x;
        shifted[index] += step;
        *partial = (f(&shifted) - base) / step;
    }
    Ok(partials)
}
