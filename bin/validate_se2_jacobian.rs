use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use lie_jacobians::jacobian::{JacobianCheckConfig, DEFAULT_STEP_SIZE};
use lie_jacobians::{init_logger_with_level, validate_right_jacobian, LieError};
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(name = "validate_se2_jacobian")]
#[command(about = "Compare the numerical and closed-form SE(2) right Jacobians on random coordinates")]
struct Args {
    /// Number of random coordinate vectors to check
    #[arg(short, long, default_value = "100")]
    samples: usize,

    /// Lower bound of every sampled component
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    lower: f64,

    /// Upper bound (exclusive) of every sampled component
    #[arg(long, default_value = "10.0", allow_negative_numbers = true)]
    upper: f64,

    /// Forward-difference step for the numerical estimator
    #[arg(long, default_value_t = DEFAULT_STEP_SIZE)]
    step_size: f64,

    /// Maximum allowed elementwise absolute discrepancy
    #[arg(short, long, default_value = "1e-5")]
    tolerance: f64,

    /// Seed of the sampling generator
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Log every sample (DEBUG level)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger_with_level(if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    });

    let config = JacobianCheckConfig::new()
        .with_samples(args.samples)
        .with_range(args.lower, args.upper)
        .with_step_size(args.step_size)
        .with_tolerance(args.tolerance)
        .with_seed(args.seed);

    info!(
        "Validating SE(2) right Jacobian: {} samples in [{}, {}), step {:e}, tolerance {:e}",
        config.samples, config.lower, config.upper, config.step_size, config.tolerance
    );

    let start = Instant::now();
    match validate_right_jacobian(&config) {
        Ok(report) => {
            println!("{report}");
            info!("Finished in {:?}", start.elapsed());
            ExitCode::SUCCESS
        }
        Err(err @ LieError::ToleranceExceeded { .. }) => {
            error!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("Validation could not run: {err}");
            ExitCode::from(2)
        }
    }
}
