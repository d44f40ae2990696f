//! SE(2) - Special Euclidean Group in 2D
//!
//! This module implements the Special Euclidean group SE(2), which represents
//! rigid body transformations in 2D space (rotation + translation).
//!
//! SE(2) elements are stored as their homogeneous 3×3 matrix [[C, r], [0, 1]].
//! SE(2) tangent elements are exponential coordinates [ρ₁, ρ₂, θ] = 3 components,
//! and the exponential map is the matrix exponential of the hat (wedge) of ξ.
//!
//! Two layers are provided:
//! - free functions on raw `nalgebra` types ([`generators`], [`wedge`], [`vee`],
//!   [`exp`], [`log`], [`right_jacobian`]), used by the numerical estimator;
//! - the typed [`SE2`] / [`SE2Tangent`] pair implementing [`LieGroup`] / [`Tangent`].
//!
//! # Small angles
//!
//! The closed-form Jacobians divide by θ and θ². For |θ| < [`SMALL_ANGLE_THRESHOLD`]
//! every coefficient function is replaced by its Taylor series, so Jr(0) = I exactly
//! and Jr stays finite as θ → 0.

use crate::error::{LieError, LieResult};
use crate::manifold::{LieGroup, Tangent, SMALL_ANGLE_THRESHOLD};
use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};
use std::f64::consts::PI;
use std::fmt;
use tracing::warn;

/// Basis {E₁, E₂, E₃} of se(2): x translation, y translation, rotation.
pub fn generators() -> [Matrix3<f64>; 3] {
    [
        Matrix3::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        Matrix3::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0),
        Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ]
}

/// Wedge (hat) map: ξ₁E₁ + ξ₂E₂ + ξ₃E₃.
pub fn wedge(xi: &Vector3<f64>) -> Matrix3<f64> {
    generators()
        .iter()
        .zip(xi.iter())
        .fold(Matrix3::zeros(), |acc, (generator, &coeff)| {
            acc + generator * coeff
        })
}

/// Vee map: reads (Ξ[0,2], Ξ[1,2], Ξ[1,0]) by position.
///
/// # Precondition
/// `matrix` must have the se(2) structure (skew-symmetric top-left block, zero
/// diagonal and bottom row). This is not checked: for an arbitrary matrix the
/// result silently fails to round-trip through [`wedge`]. Use [`try_vee`] when
/// the input is not known to be well formed.
pub fn vee(matrix: &Matrix3<f64>) -> Vector3<f64> {
    Vector3::new(matrix[(0, 2)], matrix[(1, 2)], matrix[(1, 0)])
}

/// Checked vee map.
///
/// Fails with [`LieError::InvalidLieAlgebraElement`] if any entry that must be zero
/// (or the skew-symmetric counterpart of θ) deviates by more than `tolerance`.
pub fn try_vee(matrix: &Matrix3<f64>, tolerance: f64) -> LieResult<Vector3<f64>> {
    if matrix.iter().any(|value| !value.is_finite()) {
        return Err(LieError::InvalidLieAlgebraElement(
            "matrix contains non-finite entries".to_string(),
        ));
    }

    let zero_entries = [(0, 0), (1, 1), (2, 0), (2, 1), (2, 2)];
    for (row, col) in zero_entries {
        let value = matrix[(row, col)];
        if value.abs() > tolerance {
            return Err(LieError::InvalidLieAlgebraElement(format!(
                "entry ({row}, {col}) = {value} should be zero"
            )));
        }
    }

    let skew_error = (matrix[(0, 1)] + matrix[(1, 0)]).abs();
    if skew_error > tolerance {
        return Err(LieError::InvalidLieAlgebraElement(format!(
            "rotation block is not skew-symmetric (|Ξ01 + Ξ10| = {skew_error:e})"
        )));
    }

    Ok(vee(matrix))
}

/// Exponential map: matrix exponential of `wedge(xi)`.
pub fn exp(xi: &Vector3<f64>) -> Matrix3<f64> {
    wedge(xi).exp()
}

/// Principal matrix logarithm of an SE(2) matrix, as an se(2) matrix.
///
/// The rotation angle is returned in (-π, π]; coordinates whose θ lies outside
/// that range are not recovered.
pub fn log_matrix(matrix: &Matrix3<f64>, tolerance: f64) -> LieResult<Matrix3<f64>> {
    let element = SE2::from_matrix(*matrix, tolerance)?;
    Ok(element.log(None).hat())
}

/// Logarithmic map: `vee(log_matrix(T))`.
///
/// Fails with [`LieError::InvalidGroupElement`] if `matrix` is not an SE(2) element
/// within `tolerance`.
pub fn log(matrix: &Matrix3<f64>, tolerance: f64) -> LieResult<Vector3<f64>> {
    log_matrix(matrix, tolerance).map(|algebra| vee(&algebra))
}

/// Closed-form right Jacobian Jr(ξ) for ξ = [ρ₁, ρ₂, θ].
///
/// ```text
/// [ sinθ/θ,      (1-cosθ)/θ,  (θρ1 - ρ2 + ρ2 cosθ - ρ1 sinθ)/θ² ]
/// [ (cosθ-1)/θ,  sinθ/θ,      (ρ1 + θρ2 - ρ1 cosθ - ρ2 sinθ)/θ² ]
/// [ 0,           0,           1                                 ]
/// ```
///
/// The third column is evaluated as ρ₁(θ - sinθ)/θ² - ρ₂(1 - cosθ)/θ² (and the
/// symmetric form below it), which is algebraically identical and keeps the
/// small-angle series well defined.
pub fn right_jacobian(xi: &Vector3<f64>) -> Matrix3<f64> {
    let (rho1, rho2) = (xi[0], xi[1]);
    let c = Coefficients::new(xi[2]);

    Matrix3::new(
        c.sin_over_theta,
        c.one_minus_cos_over_theta,
        rho1 * c.theta_minus_sin_over_theta_sq - rho2 * c.one_minus_cos_over_theta_sq,
        -c.one_minus_cos_over_theta,
        c.sin_over_theta,
        rho1 * c.one_minus_cos_over_theta_sq + rho2 * c.theta_minus_sin_over_theta_sq,
        0.0,
        0.0,
        1.0,
    )
}

/// Fallible closed-form right Jacobian.
///
/// θ = 0 is handled by the small-angle series, so the only failure is a
/// non-finite input, reported as [`LieError::SingularJacobian`].
pub fn try_right_jacobian(xi: &Vector3<f64>) -> LieResult<Matrix3<f64>> {
    if !xi[2].is_finite() {
        return Err(LieError::SingularJacobian { theta: xi[2] });
    }
    let jacobian = right_jacobian(xi);
    if jacobian.iter().all(|value| value.is_finite()) {
        Ok(jacobian)
    } else {
        Err(LieError::SingularJacobian { theta: xi[2] })
    }
}

/// Coefficient functions of the SE(2) exponential, with small-angle fallback.
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    /// sinθ/θ
    sin_over_theta: f64,
    /// (1 - cosθ)/θ
    one_minus_cos_over_theta: f64,
    /// (1 - cosθ)/θ²
    one_minus_cos_over_theta_sq: f64,
    /// (θ - sinθ)/θ²
    theta_minus_sin_over_theta_sq: f64,
}

impl Coefficients {
    fn new(theta: f64) -> Self {
        if theta.abs() < SMALL_ANGLE_THRESHOLD {
            let theta2 = theta * theta;
            Self {
                sin_over_theta: 1.0 - theta2 / 6.0 + theta2 * theta2 / 120.0,
                one_minus_cos_over_theta: theta * (0.5 - theta2 / 24.0),
                one_minus_cos_over_theta_sq: 0.5 - theta2 / 24.0 + theta2 * theta2 / 720.0,
                theta_minus_sin_over_theta_sq: theta * (1.0 / 6.0 - theta2 / 120.0),
            }
        } else {
            let (sin_theta, cos_theta) = theta.sin_cos();
            let theta2 = theta * theta;
            Self {
                sin_over_theta: sin_theta / theta,
                one_minus_cos_over_theta: (1.0 - cos_theta) / theta,
                one_minus_cos_over_theta_sq: (1.0 - cos_theta) / theta2,
                theta_minus_sin_over_theta_sq: (theta - sin_theta) / theta2,
            }
        }
    }
}

/// Checks the [[C, r], [0, 1]] structure of a candidate SE(2) matrix.
fn check_group_structure(matrix: &Matrix3<f64>, tolerance: f64) -> LieResult<()> {
    if matrix.iter().any(|value| !value.is_finite()) {
        return Err(LieError::InvalidGroupElement(
            "matrix contains non-finite entries".to_string(),
        ));
    }

    let bottom_row_error = matrix[(2, 0)]
        .abs()
        .max(matrix[(2, 1)].abs())
        .max((matrix[(2, 2)] - 1.0).abs());
    if bottom_row_error > tolerance {
        return Err(LieError::InvalidGroupElement(format!(
            "bottom row [{}, {}, {}] is not [0, 0, 1]",
            matrix[(2, 0)],
            matrix[(2, 1)],
            matrix[(2, 2)]
        )));
    }

    let rotation: Matrix2<f64> = matrix.fixed_view::<2, 2>(0, 0).into_owned();
    let orthogonality_error = (rotation.transpose() * rotation - Matrix2::identity()).amax();
    if orthogonality_error > tolerance {
        return Err(LieError::InvalidGroupElement(format!(
            "rotation block is not orthonormal (max |CᵀC - I| = {orthogonality_error:e})"
        )));
    }

    let determinant = rotation.determinant();
    if (determinant - 1.0).abs() > tolerance {
        return Err(LieError::InvalidGroupElement(format!(
            "rotation block has determinant {determinant}, expected 1"
        )));
    }

    Ok(())
}

/// SE(2) group element representing rigid body transformations in 2D.
///
/// Stored as the homogeneous matrix [[C, r], [0, 1]]. Constructors either build
/// the structure directly or validate it ([`SE2::from_matrix`]).
#[derive(Clone, Debug, PartialEq)]
pub struct SE2 {
    matrix: Matrix3<f64>,
}

impl fmt::Display for SE2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SE2(translation: [{:.4}, {:.4}], rotation: {:.4})",
            self.x(),
            self.y(),
            self.angle()
        )
    }
}

impl SE2 {
    /// Create SE(2) from a homogeneous matrix, checking the group structure.
    ///
    /// # Arguments
    /// * `matrix` - Candidate [[C, r], [0, 1]] matrix
    /// * `tolerance` - Allowed deviation from orthonormality / the fixed bottom row
    pub fn from_matrix(matrix: Matrix3<f64>, tolerance: f64) -> LieResult<Self> {
        check_group_structure(&matrix, tolerance).inspect_err(|err| {
            warn!("Rejected SE(2) candidate: {err}");
        })?;
        Ok(SE2 { matrix })
    }

    /// Create SE(2) from translation components and a rotation angle.
    pub fn from_xy_angle(x: f64, y: f64, theta: f64) -> Self {
        let (sin_theta, cos_theta) = theta.sin_cos();
        SE2 {
            matrix: Matrix3::new(
                cos_theta, -sin_theta, x, sin_theta, cos_theta, y, 0.0, 0.0, 1.0,
            ),
        }
    }

    /// Homogeneous 3×3 matrix.
    pub fn matrix(&self) -> Matrix3<f64> {
        self.matrix
    }

    /// Rotation block C.
    pub fn rotation_matrix(&self) -> Matrix2<f64> {
        self.matrix.fixed_view::<2, 2>(0, 0).into_owned()
    }

    /// Translation block r.
    pub fn translation(&self) -> Vector2<f64> {
        Vector2::new(self.matrix[(0, 2)], self.matrix[(1, 2)])
    }

    pub fn x(&self) -> f64 {
        self.matrix[(0, 2)]
    }

    pub fn y(&self) -> f64 {
        self.matrix[(1, 2)]
    }

    /// Rotation angle in (-π, π].
    pub fn angle(&self) -> f64 {
        let theta = self.matrix[(1, 0)].atan2(self.matrix[(0, 0)]);
        if theta <= -PI {
            PI
        } else {
            theta
        }
    }

    /// Transform a point: C·p + r.
    pub fn act(&self, point: &Vector2<f64>) -> Vector2<f64> {
        self.rotation_matrix() * point + self.translation()
    }
}

impl LieGroup for SE2 {
    type TangentVector = SE2Tangent;
    type JacobianMatrix = Matrix3<f64>;
    type LieAlgebra = Matrix3<f64>;

    const DIM: usize = 2;
    const DOF: usize = 3;
    const REP_SIZE: usize = 9;

    fn identity() -> Self {
        SE2 {
            matrix: Matrix3::identity(),
        }
    }

    /// Inverse: [[Cᵀ, -Cᵀr], [0, 1]].
    fn inverse(&self) -> Self {
        let rotation_t = self.rotation_matrix().transpose();
        let translation = -(rotation_t * self.translation());
        let mut matrix = Matrix3::identity();
        matrix.fixed_view_mut::<2, 2>(0, 0).copy_from(&rotation_t);
        matrix.fixed_view_mut::<2, 1>(0, 2).copy_from(&translation);
        SE2 { matrix }
    }

    fn compose(&self, other: &Self) -> Self {
        SE2 {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Principal logarithm: θ = atan2(C₁₀, C₀₀), ρ = V(θ)⁻¹ r with
    /// V(θ)⁻¹ = [[θ/2·cot(θ/2), θ/2], [-θ/2, θ/2·cot(θ/2)]].
    fn log(&self, jacobian: Option<&mut Self::JacobianMatrix>) -> Self::TangentVector {
        let theta = self.angle();
        let half_theta = 0.5 * theta;
        let half_cot = if theta.abs() < SMALL_ANGLE_THRESHOLD {
            let theta2 = theta * theta;
            1.0 - theta2 / 12.0 - theta2 * theta2 / 720.0
        } else {
            half_theta * half_theta.cos() / half_theta.sin()
        };

        let r = self.translation();
        let tangent = SE2Tangent::from_components(
            half_cot * r[0] + half_theta * r[1],
            -half_theta * r[0] + half_cot * r[1],
            theta,
        );

        if let Some(jac) = jacobian {
            *jac = tangent.right_jacobian_inv();
        }

        tangent
    }

    /// Ad(g) = [[C, [r₂, -r₁]ᵀ], [0, 0, 1]].
    fn adjoint(&self) -> Self::JacobianMatrix {
        let mut adjoint = Matrix3::identity();
        adjoint
            .fixed_view_mut::<2, 2>(0, 0)
            .copy_from(&self.rotation_matrix());
        adjoint[(0, 2)] = self.y();
        adjoint[(1, 2)] = -self.x();
        adjoint
    }

    fn is_valid(&self, tolerance: f64) -> bool {
        check_group_structure(&self.matrix, tolerance).is_ok()
    }

    fn is_approx(&self, other: &Self, tolerance: f64) -> bool {
        (self.matrix - other.matrix).amax() < tolerance
    }
}

/// SE(2) tangent space element in exponential coordinates [ρ₁, ρ₂, θ].
///
/// Carries only the three independent components of an se(2) matrix, so
/// [`Tangent::hat`] and [`SE2Tangent::vee`] are lossless on this type.
#[derive(Clone, Debug, PartialEq)]
pub struct SE2Tangent {
    /// Internal data: [ρ₁, ρ₂, θ]
    data: Vector3<f64>,
}

impl fmt::Display for SE2Tangent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "se2(rho: [{:.4}, {:.4}], theta: {:.4})",
            self.data[0], self.data[1], self.data[2]
        )
    }
}

impl From<Vector3<f64>> for SE2Tangent {
    fn from(data: Vector3<f64>) -> Self {
        SE2Tangent::new(data)
    }
}

impl From<SE2Tangent> for Vector3<f64> {
    fn from(tangent: SE2Tangent) -> Self {
        tangent.data
    }
}

impl SE2Tangent {
    /// Create a new SE2Tangent from [ρ₁, ρ₂, θ].
    pub fn new(data: Vector3<f64>) -> Self {
        SE2Tangent { data }
    }

    pub fn from_components(rho1: f64, rho2: f64, theta: f64) -> Self {
        SE2Tangent::new(Vector3::new(rho1, rho2, theta))
    }

    /// Unchecked vee of an se(2) matrix; see [`vee`] for the precondition.
    pub fn vee(matrix: &Matrix3<f64>) -> Self {
        SE2Tangent::new(vee(matrix))
    }

    /// Checked vee of an se(2) matrix; see [`try_vee`].
    pub fn try_vee(matrix: &Matrix3<f64>, tolerance: f64) -> LieResult<Self> {
        try_vee(matrix, tolerance).map(SE2Tangent::new)
    }

    pub fn rho1(&self) -> f64 {
        self.data[0]
    }

    pub fn rho2(&self) -> f64 {
        self.data[1]
    }

    pub fn theta(&self) -> f64 {
        self.data[2]
    }

    pub fn coeffs(&self) -> Vector3<f64> {
        self.data
    }
}

impl Tangent<SE2> for SE2Tangent {
    const DIM: usize = 3;

    /// Exponential map via the matrix exponential of the hat.
    fn exp(&self, jacobian: Option<&mut <SE2 as LieGroup>::JacobianMatrix>) -> SE2 {
        if let Some(jac) = jacobian {
            *jac = self.right_jacobian();
        }
        SE2 {
            matrix: exp(&self.data),
        }
    }

    fn right_jacobian(&self) -> <SE2 as LieGroup>::JacobianMatrix {
        right_jacobian(&self.data)
    }

    /// Left Jacobian, Jl(ξ) = Jr(-ξ) = Ad(Exp(ξ)) · Jr(ξ).
    fn left_jacobian(&self) -> <SE2 as LieGroup>::JacobianMatrix {
        right_jacobian(&(-self.data))
    }

    /// Right Jacobian inverse.
    ///
    /// Jr = [[A, b], [0, 1]] with A = [[s, q], [-q, s]] and s² + q² = 2(1 - cosθ)/θ²,
    /// so Jr⁻¹ = [[A⁻¹, -A⁻¹b], [0, 1]]. Singular at θ = 2πk, k ≠ 0.
    fn right_jacobian_inv(&self) -> <SE2 as LieGroup>::JacobianMatrix {
        let jr = self.right_jacobian();
        let c = Coefficients::new(self.data[2]);
        let scale = 1.0 / (2.0 * c.one_minus_cos_over_theta_sq);
        let a_inv = Matrix2::new(jr[(0, 0)], -jr[(0, 1)], -jr[(1, 0)], jr[(1, 1)]) * scale;
        let b = Vector2::new(jr[(0, 2)], jr[(1, 2)]);
        let column = -(a_inv * b);

        let mut jac = Matrix3::identity();
        jac.fixed_view_mut::<2, 2>(0, 0).copy_from(&a_inv);
        jac.fixed_view_mut::<2, 1>(0, 2).copy_from(&column);
        jac
    }

    fn hat(&self) -> <SE2 as LieGroup>::LieAlgebra {
        wedge(&self.data)
    }

    fn zero() -> Self {
        SE2Tangent::new(Vector3::zeros())
    }

    fn is_zero(&self, tolerance: f64) -> bool {
        self.data.norm() < tolerance
    }

    fn is_approx(&self, other: &Self, tolerance: f64) -> bool {
        (self.data - other.data).norm() < tolerance
    }

    /// Get the ith generator of se(2); panics for `i >= 3`.
    fn generator(&self, i: usize) -> <SE2 as LieGroup>::LieAlgebra {
        assert!(i < 3, "SE(2) only has generators for indices 0-2");
        generators()[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifold::GROUP_TOLERANCE;
    use std::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn test_se2_generators_are_exact() {
        let [e1, e2, e3] = generators();
        assert_eq!(e1[(0, 2)], 1.0);
        assert_eq!(e2[(1, 2)], 1.0);
        assert_eq!(e3[(0, 1)], -1.0);
        assert_eq!(e3[(1, 0)], 1.0);
        assert_eq!(e1.iter().filter(|v| **v != 0.0).count(), 1);
        assert_eq!(e2.iter().filter(|v| **v != 0.0).count(), 1);
        assert_eq!(e3.iter().filter(|v| **v != 0.0).count(), 2);
        assert_eq!(generators(), generators());
    }

    #[test]
    fn test_se2_wedge_structure() {
        let xi = Vector3::new(1.5, -2.0, 0.7);
        let algebra = wedge(&xi);
        let expected = Matrix3::new(0.0, -0.7, 1.5, 0.7, 0.0, -2.0, 0.0, 0.0, 0.0);
        assert_eq!(algebra, expected);
    }

    #[test]
    fn test_se2_vee_wedge_exact() {
        let samples = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, FRAC_PI_2),
            Vector3::new(-3.25, 1e-300, 42.0),
            Vector3::new(1e12, -7.5, -1e-8),
        ];
        for xi in samples {
            assert_eq!(vee(&wedge(&xi)), xi);
        }
    }

    #[test]
    fn test_se2_unchecked_vee_does_not_validate() {
        // Arbitrary matrix: vee reads by position and silently loses information.
        let malformed = Matrix3::new(1.0, 5.0, 2.0, 3.0, 1.0, 4.0, 9.0, 9.0, 9.0);
        let xi = vee(&malformed);
        assert_eq!(xi, Vector3::new(2.0, 4.0, 3.0));
        assert_ne!(wedge(&xi), malformed);

        // The checked mode refuses the same input.
        assert!(matches!(
            try_vee(&malformed, TOLERANCE),
            Err(LieError::InvalidLieAlgebraElement(_))
        ));
    }

    #[test]
    fn test_se2_try_vee_accepts_well_formed() -> Result<(), Box<dyn std::error::Error>> {
        let xi = Vector3::new(0.3, -0.4, 2.5);
        assert_eq!(try_vee(&wedge(&xi), TOLERANCE)?, xi);
        let tangent = SE2Tangent::try_vee(&wedge(&xi), TOLERANCE)?;
        assert_eq!(tangent.coeffs(), xi);
        Ok(())
    }

    #[test]
    fn test_se2_try_vee_rejects_non_skew() {
        let mut algebra = wedge(&Vector3::new(1.0, 2.0, 0.5));
        algebra[(0, 1)] = 0.5;
        assert!(try_vee(&algebra, TOLERANCE).is_err());
    }

    #[test]
    fn test_se2_exp_zero_is_identity() {
        assert_eq!(exp(&Vector3::zeros()), Matrix3::identity());
        assert_eq!(SE2Tangent::zero().exp(None), SE2::identity());
    }

    #[test]
    fn test_se2_exp_quarter_turn() {
        let t = exp(&Vector3::new(1.0, 2.0, FRAC_PI_2));
        assert!((t[(0, 0)]).abs() < TOLERANCE);
        assert!((t[(0, 1)] + 1.0).abs() < TOLERANCE);
        assert!((t[(1, 0)] - 1.0).abs() < TOLERANCE);
        assert!((t[(1, 1)]).abs() < TOLERANCE);
        // Translation is V(π/2)·ρ = (2/π)·[[1, -1], [1, 1]]·(1, 2).
        assert!((t[(0, 2)] + 2.0 / PI).abs() < TOLERANCE);
        assert!((t[(1, 2)] - 6.0 / PI).abs() < TOLERANCE);
        assert_eq!(t[(2, 0)], 0.0);
        assert_eq!(t[(2, 1)], 0.0);
        assert!((t[(2, 2)] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_se2_exp_matches_closed_form_pose() {
        let tangent = SE2Tangent::from_components(0.1, 0.2, 0.3);
        let pose = tangent.exp(None);
        let (s, c) = 0.3_f64.sin_cos();
        let x = (s * 0.1 - (1.0 - c) * 0.2) / 0.3;
        let y = ((1.0 - c) * 0.1 + s * 0.2) / 0.3;
        assert!(pose.is_approx(&SE2::from_xy_angle(x, y, 0.3), TOLERANCE));
    }

    #[test]
    fn test_se2_exp_log_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let samples = [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(-4.0, 7.5, -3.0),
            Vector3::new(9.0, -9.0, 3.1),
            Vector3::new(2.0, 1.0, 1e-9),
            Vector3::new(0.0, 0.0, 0.0),
        ];
        for xi in samples {
            let recovered = log(&exp(&xi), GROUP_TOLERANCE)?;
            let error = (recovered - xi).norm() / xi.norm().max(1.0);
            assert!(error < 1e-8, "round trip failed for {xi:?}: {recovered:?}");
        }
        Ok(())
    }

    #[test]
    fn test_se2_log_principal_branch() -> Result<(), Box<dyn std::error::Error>> {
        // θ = 3π/2 comes back as -π/2 with different ρ, but the same group element.
        let xi = Vector3::new(1.0, 0.5, 1.5 * PI);
        let recovered = log(&exp(&xi), GROUP_TOLERANCE)?;
        assert!((recovered[2] + FRAC_PI_2).abs() < 1e-9);
        assert!((exp(&recovered) - exp(&xi)).amax() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_se2_angle_at_pi_is_positive() -> Result<(), Box<dyn std::error::Error>> {
        // atan2(-0.0, -1.0) is -π; the principal branch maps it to +π.
        let half_turn = Matrix3::new(-1.0, 0.0, 0.0, -0.0, -1.0, 0.0, 0.0, 0.0, 1.0);
        let pose = SE2::from_matrix(half_turn, GROUP_TOLERANCE)?;
        assert_eq!(pose.angle(), PI);
        Ok(())
    }

    #[test]
    fn test_se2_log_matrix_is_lie_algebra() -> Result<(), Box<dyn std::error::Error>> {
        let t = exp(&Vector3::new(0.5, -1.0, 0.8));
        let algebra = log_matrix(&t, GROUP_TOLERANCE)?;
        assert!(try_vee(&algebra, TOLERANCE).is_ok());
        assert!((algebra.exp() - t).amax() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_se2_log_rejects_bad_bottom_row() {
        let mut t = exp(&Vector3::new(0.5, -1.0, 0.8));
        t[(2, 0)] = 0.1;
        let result = log(&t, GROUP_TOLERANCE);
        assert!(matches!(result, Err(LieError::InvalidGroupElement(_))));
    }

    #[test]
    fn test_se2_log_rejects_non_rotation() {
        let scaled = Matrix3::new(2.0, 0.0, 1.0, 0.0, 2.0, 1.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            log(&scaled, GROUP_TOLERANCE),
            Err(LieError::InvalidGroupElement(_))
        ));

        let reflection = Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            log(&reflection, GROUP_TOLERANCE),
            Err(LieError::InvalidGroupElement(_))
        ));

        let singular = Matrix3::zeros();
        assert!(log(&singular, GROUP_TOLERANCE).is_err());
    }

    #[test]
    fn test_se2_log_rejects_non_finite() {
        let mut t = Matrix3::identity();
        t[(0, 2)] = f64::NAN;
        assert!(matches!(
            log(&t, GROUP_TOLERANCE),
            Err(LieError::InvalidGroupElement(_))
        ));
    }

    #[test]
    fn test_se2_right_jacobian_identity_at_zero() {
        assert_eq!(right_jacobian(&Vector3::zeros()), Matrix3::identity());
    }

    #[test]
    fn test_se2_right_jacobian_small_angle_limit() {
        let (rho1, rho2) = (3.0, -4.0);
        let jr = right_jacobian(&Vector3::new(rho1, rho2, 1e-8));
        assert!(jr.iter().all(|v| v.is_finite()));
        let limit = Matrix3::new(1.0, 0.0, -rho2 / 2.0, 0.0, 1.0, rho1 / 2.0, 0.0, 0.0, 1.0);
        assert!((jr - limit).amax() < 1e-7);
    }

    #[test]
    fn test_se2_right_jacobian_continuous_across_threshold() {
        let below = right_jacobian(&Vector3::new(2.0, 3.0, SMALL_ANGLE_THRESHOLD * 0.999));
        let above = right_jacobian(&Vector3::new(2.0, 3.0, SMALL_ANGLE_THRESHOLD * 1.001));
        assert!((below - above).amax() < 1e-5);
    }

    #[test]
    fn test_se2_right_jacobian_matches_listed_formula() {
        let (rho1, rho2, theta) = (1.3, -0.7, 2.1_f64);
        let (s, c) = theta.sin_cos();
        let expected = Matrix3::new(
            s / theta,
            (1.0 - c) / theta,
            (theta * rho1 - rho2 + rho2 * c - rho1 * s) / (theta * theta),
            (c - 1.0) / theta,
            s / theta,
            (rho1 + theta * rho2 - rho1 * c - rho2 * s) / (theta * theta),
            0.0,
            0.0,
            1.0,
        );
        let jr = right_jacobian(&Vector3::new(rho1, rho2, theta));
        assert!((jr - expected).amax() < 1e-12);
    }

    #[test]
    fn test_se2_try_right_jacobian() {
        assert!(try_right_jacobian(&Vector3::new(1.0, 2.0, 0.0)).is_ok());
        assert!(matches!(
            try_right_jacobian(&Vector3::new(1.0, 2.0, f64::NAN)),
            Err(LieError::SingularJacobian { .. })
        ));
        assert!(try_right_jacobian(&Vector3::new(f64::INFINITY, 2.0, 0.5)).is_err());
    }

    #[test]
    fn test_se2_right_jacobian_first_order() {
        // exp(ξ + δξ) ≈ exp(ξ) ∘ exp(Jr(ξ)·δξ)
        let xi = Vector3::new(0.4, -1.2, 0.9);
        let jr = right_jacobian(&xi);
        let delta = 1e-6;
        for i in 0..3 {
            let mut step = Vector3::zeros();
            step[i] = delta;
            let base = SE2Tangent::new(xi).exp(None);
            let perturbed = SE2Tangent::new(xi + step).exp(None);
            let numerical = base.inverse().compose(&perturbed).log(None).coeffs();
            let error = (jr * step - numerical).norm();
            assert!(error < 1e-11, "column {i}: error = {error}");
        }
    }

    #[test]
    fn test_se2_right_jacobian_inverse() {
        let tangent = SE2Tangent::from_components(2.0, -1.0, 1.1);
        let product = tangent.right_jacobian() * tangent.right_jacobian_inv();
        assert!((product - Matrix3::identity()).amax() < TOLERANCE);

        let small = SE2Tangent::from_components(2.0, -1.0, 1e-9);
        let product = small.right_jacobian() * small.right_jacobian_inv();
        assert!((product - Matrix3::identity()).amax() < TOLERANCE);
    }

    #[test]
    fn test_se2_log_jacobian_is_right_jacobian_inverse() {
        let pose = SE2::from_xy_angle(1.0, -2.0, 0.6);
        let mut jac = Matrix3::zeros();
        let tangent = pose.log(Some(&mut jac));
        assert!((jac * tangent.right_jacobian() - Matrix3::identity()).amax() < TOLERANCE);
    }

    #[test]
    fn test_se2_exp_jacobian_output() {
        let tangent = SE2Tangent::from_components(0.3, 0.1, -0.4);
        let mut jac = Matrix3::zeros();
        tangent.exp(Some(&mut jac));
        assert_eq!(jac, tangent.right_jacobian());
    }

    #[test]
    fn test_se2_adjoint_conjugation() {
        let pose = SE2Tangent::from_components(1.0, -0.5, 0.7).exp(None);
        let v = Vector3::new(0.3, 0.2, -0.1);
        let conjugated = pose.matrix() * wedge(&v) * pose.inverse().matrix();
        let expected = wedge(&(pose.adjoint() * v));
        assert!((conjugated - expected).amax() < TOLERANCE);
    }

    #[test]
    fn test_se2_left_right_jacobian_adjoint_relation() {
        let tangent = SE2Tangent::from_components(2.5, -1.5, 1.2);
        let jl = tangent.left_jacobian();
        let via_adjoint = tangent.exp(None).adjoint() * tangent.right_jacobian();
        assert!((jl - via_adjoint).amax() < TOLERANCE);
    }

    #[test]
    fn test_se2_group_closure() {
        let samples = [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(9.9, 0.1, 9.9),
            Vector3::new(-5.0, 5.0, -7.0),
        ];
        for xi in samples {
            let pose = SE2Tangent::new(xi).exp(None);
            assert!(pose.is_valid(TOLERANCE), "Exp({xi:?}) left the group");
        }
    }

    #[test]
    fn test_se2_inverse_compose() {
        let pose = SE2::from_xy_angle(1.0, 2.0, PI / 4.0);
        let identity = pose.compose(&pose.inverse());
        assert!(identity.is_approx(&SE2::identity(), TOLERANCE));
    }

    #[test]
    fn test_se2_act() {
        let pose = SE2::from_xy_angle(1.0, 2.0, FRAC_PI_2);
        let moved = pose.act(&Vector2::new(1.0, 0.0));
        assert!((moved - Vector2::new(1.0, 3.0)).norm() < TOLERANCE);
    }

    #[test]
    fn test_se2_from_matrix() {
        let t = exp(&Vector3::new(0.2, 0.3, 0.4));
        let pose = SE2::from_matrix(t, GROUP_TOLERANCE);
        assert!(pose.is_ok());
        assert!(SE2::from_matrix(Matrix3::zeros(), GROUP_TOLERANCE).is_err());
    }

    #[test]
    fn test_se2_generator_access() {
        let tangent = SE2Tangent::zero();
        for (i, expected) in generators().iter().enumerate() {
            assert_eq!(&tangent.generator(i), expected);
        }
    }

    #[test]
    #[should_panic]
    fn test_se2_generator_invalid_index() {
        let tangent = SE2Tangent::from_components(1.0, 1.0, 1.0);
        let _generator = tangent.generator(3);
    }

    #[test]
    fn test_se2_tangent_accessors_and_display() {
        let tangent = SE2Tangent::from_components(1.0, 2.0, 0.5);
        assert_eq!(tangent.rho1(), 1.0);
        assert_eq!(tangent.rho2(), 2.0);
        assert_eq!(tangent.theta(), 0.5);
        assert_eq!(
            tangent.to_string(),
            "se2(rho: [1.0000, 2.0000], theta: 0.5000)"
        );
        let raw: Vector3<f64> = tangent.clone().into();
        assert_eq!(SE2Tangent::from(raw), tangent);
    }
}
