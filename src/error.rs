//! Error types for the lie-jacobians library
//!
//! This module provides the main error and result types used throughout the library.
//! All errors use the `thiserror` crate for automatic trait implementations.
//!
//! Every failure is local to a single call: a violated caller precondition
//! (malformed group element, bad step size) or a numerical signal (non-finite
//! Jacobian, disagreement beyond tolerance). Nothing is retried.

use thiserror::Error;

/// Main result type used throughout the lie-jacobians library
pub type LieResult<T> = Result<T, LieError>;

/// Main error type for the lie-jacobians library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LieError {
    /// Matrix passed to Log is not an SE(2) element
    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    /// Matrix passed to the checked vee does not have the se(2) structure
    #[error("Invalid Lie algebra element: {0}")]
    InvalidLieAlgebraElement(String),

    /// The Jacobian could not be evaluated to a finite matrix
    #[error("Singular Jacobian at theta = {theta}")]
    SingularJacobian { theta: f64 },

    /// Numerical and closed-form Jacobians disagree
    #[error(
        "Jacobian tolerance exceeded: max discrepancy {max_discrepancy:.3e} > {tolerance:.3e} at xi = [{:.6}, {:.6}, {:.6}]",
        .coordinates[0],
        .coordinates[1],
        .coordinates[2]
    )]
    ToleranceExceeded {
        max_discrepancy: f64,
        tolerance: f64,
        coordinates: [f64; 3],
    },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LieError {
    /// Largest elementwise discrepancy carried by a tolerance failure.
    pub fn max_discrepancy(&self) -> Option<f64> {
        match self {
            LieError::ToleranceExceeded {
                max_discrepancy, ..
            } => Some(*max_discrepancy),
            _ => None,
        }
    }
}
