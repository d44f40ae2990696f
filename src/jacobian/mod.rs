//! Numerical differentiation and Jacobian validation.
//!
//! - [`finite_difference`]: forward-difference partial derivatives of vector→matrix maps
//! - [`jet`]: forward-mode automatic differentiation with dual numbers
//! - [`numerical`]: right-Jacobian estimator combining the two
//! - [`validation`]: random-sample comparison against the closed-form Jacobian

pub mod finite_difference;
pub mod jet;
pub mod numerical;
pub mod validation;

pub use finite_difference::{forward_difference, forward_differences, DEFAULT_STEP_SIZE};
pub use jet::{Jet, Scalar};
pub use numerical::{numerical_right_jacobian, RightTangentMap};
pub use validation::{
    check_right_jacobian_at, compare_right_jacobians, max_abs_discrepancy,
    run_right_jacobian_check, sample_coordinates, validate_right_jacobian, JacobianCheckConfig,
    JacobianCheckReport,
};
