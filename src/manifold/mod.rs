//! Lie group representations for exponential coordinates.
//!
//! This module provides the planar rigid-motion group used throughout the crate:
//! - **SE(2)**: Rigid transformations in 2D (rotation + translation)
//!
//! Lie group M,° | size   | dim | X ∈ M             | Constraint | T_E M        | T_X M      | Exp(T)     | Comp. | Action
//! ------------- | ------ | --- | ----------------- | ---------- | ------------ | ---------- | ---------- | ----- | ------
//! Rigid motion  | SE(2),.| 9   | M = [C r; 0 1]    | CᵀC = I    | [ξ̂] ∈ se(2)  | ξ ∈ R³     | Exp([ξ̂])   | M₁M₂  | Cx+r
//!
//! Tangent vectors are exponential coordinates ξ = [ρ₁, ρ₂, θ]: two translation-like
//! components followed by the rotation angle in radians. Note that ρ is *not* the
//! translation of Exp(ξ); the translation is V(θ)·ρ.
//!
//! # Mathematical Background
//!
//! The right Jacobian Jr(ξ) maps a rate of change of coordinates ξ̇ to the body-frame
//! velocity v_r = (Exp(ξ)⁻¹ · d/dt Exp(ξ))^∨ = Jr(ξ) · ξ̇. The left Jacobian is related
//! to it by the adjoint: Jl(ξ) = Ad(Exp(ξ)) · Jr(ξ).
//!
//! # Example
//!
//! ```rust
//! use lie_jacobians::manifold::se2::SE2Tangent;
//! use lie_jacobians::manifold::{LieGroup, Tangent};
//!
//! let tangent = SE2Tangent::from_components(1.0, 2.0, 0.3);
//! let pose = tangent.exp(None);
//! let recovered = pose.log(None);
//! assert!(recovered.is_approx(&tangent, 1e-10));
//! ```

use std::fmt::Debug;

pub mod se2;

/// Below this |θ| the SE(2) coefficient functions switch to their Taylor series.
pub const SMALL_ANGLE_THRESHOLD: f64 = 1e-3;

/// Default tolerance used when checking that a matrix is a valid group element.
pub const GROUP_TOLERANCE: f64 = 1e-9;

/// Core trait for Lie group operations.
///
/// Associated types define the mathematical structure:
/// - `TangentVector`: exponential coordinates of the group
/// - `JacobianMatrix`: DOF × DOF Jacobian type
/// - `LieAlgebra`: matrix representation of tangent vectors
///
/// # Dimensions
///
/// - `DIM`: Space dimension - dimension of ambient space (2 for SE(2))
/// - `DOF`: Degrees of freedom - tangent space dimension (3 for SE(2))
/// - `REP_SIZE`: Representation size - underlying data size (9 for SE(2))
pub trait LieGroup: Clone + Debug + PartialEq {
    /// The tangent space vector type
    type TangentVector: Tangent<Self>;

    /// The Jacobian matrix type
    type JacobianMatrix: Clone + Debug + PartialEq;

    /// Associated Lie algebra type
    type LieAlgebra: Clone + Debug + PartialEq;

    /// Space dimension - dimension of the ambient space that the group acts on
    const DIM: usize;

    /// Degrees of freedom - dimension of the tangent space
    const DOF: usize;

    /// Representation size - size of the underlying data representation
    const REP_SIZE: usize;

    /// Get the identity element of the group.
    fn identity() -> Self;

    /// Compute the inverse g⁻¹ such that g ∘ g⁻¹ = e.
    fn inverse(&self) -> Self;

    /// Compose this element with another (group multiplication g₁ ∘ g₂).
    fn compose(&self, other: &Self) -> Self;

    /// Logarithmic map from the group to exponential coordinates.
    ///
    /// # Arguments
    /// * `jacobian` - Optional output for Jr⁻¹ evaluated at the returned coordinates
    fn log(&self, jacobian: Option<&mut Self::JacobianMatrix>) -> Self::TangentVector;

    /// Adjoint matrix Ad(g), satisfying g · φ^∧ · g⁻¹ = (Ad(g) φ)^∧.
    fn adjoint(&self) -> Self::JacobianMatrix;

    /// Check if the element is approximately on the manifold.
    fn is_valid(&self, tolerance: f64) -> bool;

    /// Check if this element is approximately equal to another.
    fn is_approx(&self, other: &Self, tolerance: f64) -> bool;
}

/// Trait for Lie algebra operations expressed in exponential coordinates.
pub trait Tangent<G: LieGroup>: Clone + Debug + PartialEq {
    /// Dimension of the tangent space (same as Lie group DOF)
    const DIM: usize = G::DOF;

    /// Exponential map to the Lie group: exp(φ^∧).
    ///
    /// # Arguments
    /// * `jacobian` - Optional output for the right Jacobian Jr(φ)
    fn exp(&self, jacobian: Option<&mut G::JacobianMatrix>) -> G;

    /// Right Jacobian Jr.
    ///
    /// Matrix Jr such that for small δφ:
    /// exp((φ + δφ)^∧) ≈ exp(φ^∧) ∘ exp((Jr δφ)^∧)
    fn right_jacobian(&self) -> G::JacobianMatrix;

    /// Left Jacobian Jl.
    ///
    /// Matrix Jl such that for small δφ:
    /// exp((φ + δφ)^∧) ≈ exp((Jl δφ)^∧) ∘ exp(φ^∧)
    fn left_jacobian(&self) -> G::JacobianMatrix;

    /// Inverse of right Jacobian Jr⁻¹.
    fn right_jacobian_inv(&self) -> G::JacobianMatrix;

    /// Hat operator: φ^∧ (vector to matrix).
    fn hat(&self) -> G::LieAlgebra;

    /// Zero tangent vector.
    fn zero() -> Self;

    /// Check if the tangent vector is approximately zero.
    fn is_zero(&self, tolerance: f64) -> bool;

    /// Check if this tangent vector is approximately equal to another.
    fn is_approx(&self, other: &Self, tolerance: f64) -> bool;

    /// Get the ith generator of the Lie algebra.
    fn generator(&self, i: usize) -> G::LieAlgebra;
}
