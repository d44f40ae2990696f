//! # lie-jacobians
//!
//! Exponential coordinates on the planar rigid-motion group SE(2), with a
//! closed-form right Jacobian and an independent numerical estimator used to
//! validate it.
//!
//! ## Features
//!
//! - **SE(2) maps**: generators, wedge/vee, Exp (matrix exponential) and the principal Log
//! - **Closed-form Jacobians**: right, left and inverse right Jacobians with small-angle series
//! - **Numerical estimator**: forward finite differences of Exp combined with forward-mode autodiff
//! - **Validation harness**: seeded random sampling with maximum-discrepancy reporting
//!
//! ## Example
//!
//! ```rust
//! use lie_jacobians::jacobian::{numerical_right_jacobian, DEFAULT_STEP_SIZE};
//! use lie_jacobians::manifold::se2;
//! use nalgebra::Vector3;
//!
//! let xi = Vector3::new(1.0, 2.0, std::f64::consts::FRAC_PI_2);
//! let numerical = numerical_right_jacobian(&xi, DEFAULT_STEP_SIZE).unwrap();
//! let closed_form = se2::right_jacobian(&xi);
//! assert!((numerical - closed_form).amax() < 1e-5);
//! ```

pub mod error;
pub mod jacobian;
pub mod logger;
pub mod manifold;

pub use error::{LieError, LieResult};
pub use jacobian::{
    numerical_right_jacobian, validate_right_jacobian, JacobianCheckConfig, JacobianCheckReport,
};
pub use logger::{init_logger, init_logger_with_level};
pub use manifold::se2::{SE2, SE2Tangent};
pub use manifold::{LieGroup, Tangent};
