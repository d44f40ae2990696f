//! Validation harness: numerical vs closed-form right Jacobian.
//!
//! Random coordinates are drawn from a seeded generator, both Jacobians are
//! evaluated, and the largest elementwise absolute discrepancy is tracked. A
//! failure reports that discrepancy together with the worst coordinates, since
//! a mismatch usually points at one of: a step size that is too large or too
//! small, θ close to a numerically delicate region, or a genuine bug.

use crate::error::{LieError, LieResult};
use crate::jacobian::finite_difference::DEFAULT_STEP_SIZE;
use crate::jacobian::numerical::numerical_right_jacobian;
use crate::manifold::se2;
use nalgebra::{Matrix3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, info, warn};

/// Configuration for [`validate_right_jacobian`].
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianCheckConfig {
    /// Number of random coordinates to check
    pub samples: usize,
    /// Inclusive lower bound of every coordinate component
    pub lower: f64,
    /// Exclusive upper bound of every coordinate component
    pub upper: f64,
    /// Finite-difference step for the numerical estimator
    pub step_size: f64,
    /// Maximum allowed elementwise absolute discrepancy
    pub tolerance: f64,
    /// Seed of the sampling generator
    pub seed: u64,
}

impl Default for JacobianCheckConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            lower: 0.0,
            upper: 10.0,
            step_size: DEFAULT_STEP_SIZE,
            tolerance: 1e-5,
            seed: 42,
        }
    }
}

impl JacobianCheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the sampling range [lower, upper) used for every component.
    pub fn with_range(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Set the finite-difference step.
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the absolute tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the configuration describes a runnable experiment.
    pub fn validate(&self) -> LieResult<()> {
        if self.samples == 0 {
            return Err(LieError::InvalidInput(
                "at least one sample is required".to_string(),
            ));
        }
        if !(self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper) {
            return Err(LieError::InvalidInput(format!(
                "sampling range [{}, {}) is empty or not finite",
                self.lower, self.upper
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(LieError::InvalidInput(format!(
                "step size must be positive and finite, got {}",
                self.step_size
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(LieError::InvalidInput(format!(
                "tolerance must be non-negative and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianCheckReport {
    /// Number of coordinates checked
    pub samples: usize,
    /// Number of coordinates whose discrepancy exceeded the tolerance
    pub failures: usize,
    /// Largest elementwise absolute discrepancy over all samples
    pub max_discrepancy: f64,
    /// Mean of the per-sample maximum discrepancies
    pub mean_discrepancy: f64,
    /// Coordinates at which `max_discrepancy` occurred
    pub worst_coordinates: Vector3<f64>,
    /// Tolerance the run was checked against
    pub tolerance: f64,
}

impl JacobianCheckReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

impl fmt::Display for JacobianCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SE(2) Right Jacobian Validation ===")?;
        writeln!(f, "Samples checked:    {}", self.samples)?;
        writeln!(
            f,
            "Failures:           {} ({:.1}%)",
            self.failures,
            100.0 * self.failures as f64 / self.samples.max(1) as f64
        )?;
        writeln!(f, "Tolerance:          {:.3e}", self.tolerance)?;
        writeln!(f, "Max discrepancy:    {:.3e}", self.max_discrepancy)?;
        writeln!(f, "Mean discrepancy:   {:.3e}", self.mean_discrepancy)?;
        writeln!(
            f,
            "Worst coordinates:  [{:.6}, {:.6}, {:.6}]",
            self.worst_coordinates[0], self.worst_coordinates[1], self.worst_coordinates[2]
        )?;
        write!(
            f,
            "Status:             {}",
            if self.passed() { "PASSED" } else { "FAILED" }
        )
    }
}

/// Largest elementwise absolute difference |a - b|.
///
/// NaN entries count as an infinite discrepancy.
pub fn max_abs_discrepancy(a: &Matrix3<f64>, b: &Matrix3<f64>) -> f64 {
    (a - b).iter().fold(0.0_f64, |worst, value| {
        if value.is_nan() {
            f64::INFINITY
        } else {
            worst.max(value.abs())
        }
    })
}

/// Discrepancy between the numerical and closed-form Jr at `xi`.
pub fn compare_right_jacobians(xi: &Vector3<f64>, step: f64) -> LieResult<f64> {
    let numerical = numerical_right_jacobian(xi, step)?;
    let closed_form = se2::try_right_jacobian(xi)?;
    Ok(max_abs_discrepancy(&numerical, &closed_form))
}

/// Check a single coordinate against `tolerance`.
///
/// Returns the discrepancy on success and [`LieError::ToleranceExceeded`] otherwise.
pub fn check_right_jacobian_at(xi: &Vector3<f64>, step: f64, tolerance: f64) -> LieResult<f64> {
    let discrepancy = compare_right_jacobians(xi, step)?;
    if discrepancy > tolerance {
        warn!(
            "Jr mismatch at [{:.6}, {:.6}, {:.6}]: {:.3e} > {:.3e}",
            xi[0], xi[1], xi[2], discrepancy, tolerance
        );
        return Err(LieError::ToleranceExceeded {
            max_discrepancy: discrepancy,
            tolerance,
            coordinates: [xi[0], xi[1], xi[2]],
        });
    }
    Ok(discrepancy)
}

/// Draw a coordinate vector with each component uniform in [lower, upper).
pub fn sample_coordinates<R: Rng + ?Sized>(rng: &mut R, lower: f64, upper: f64) -> Vector3<f64> {
    Vector3::new(
        rng.gen_range(lower..upper),
        rng.gen_range(lower..upper),
        rng.gen_range(lower..upper),
    )
}

/// Run the comparison over all samples and report, without failing on tolerance.
pub fn run_right_jacobian_check(config: &JacobianCheckConfig) -> LieResult<JacobianCheckReport> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut failures = 0;
    let mut max_discrepancy = 0.0_f64;
    let mut sum_discrepancy = 0.0_f64;
    let mut worst_coordinates = Vector3::zeros();

    for index in 0..config.samples {
        let xi = sample_coordinates(&mut rng, config.lower, config.upper);
        let discrepancy = compare_right_jacobians(&xi, config.step_size)?;

        debug!(
            "Sample {index}: xi = [{:.6}, {:.6}, {:.6}], discrepancy = {:.3e}",
            xi[0], xi[1], xi[2], discrepancy
        );

        if discrepancy > config.tolerance {
            failures += 1;
        }
        if discrepancy > max_discrepancy || index == 0 {
            max_discrepancy = discrepancy;
            worst_coordinates = xi;
        }
        sum_discrepancy += discrepancy;
    }

    let report = JacobianCheckReport {
        samples: config.samples,
        failures,
        max_discrepancy,
        mean_discrepancy: sum_discrepancy / config.samples as f64,
        worst_coordinates,
        tolerance: config.tolerance,
    };

    info!(
        "Checked {} samples: max discrepancy {:.3e}, {} above tolerance {:.3e}",
        report.samples, report.max_discrepancy, report.failures, report.tolerance
    );

    Ok(report)
}

/// Validate the closed-form right Jacobian against the numerical estimator.
///
/// # Errors
/// - [`LieError::InvalidInput`] for an invalid configuration
/// - [`LieError::ToleranceExceeded`] carrying the maximum discrepancy and the
///   coordinates where it occurred, if any sample exceeds the tolerance
pub fn validate_right_jacobian(config: &JacobianCheckConfig) -> LieResult<JacobianCheckReport> {
    let report = run_right_jacobian_check(config)?;
    if !report.passed() {
        warn!(
            "{} of {} samples exceeded tolerance",
            report.failures, report.samples
        );
        return Err(LieError::ToleranceExceeded {
            max_discrepancy: report.max_discrepancy,
            tolerance: report.tolerance,
            coordinates: [
                report.worst_coordinates[0],
                report.worst_coordinates[1],
                report.worst_coordinates[2],
            ],
        });
    }
    Ok(report)
}
