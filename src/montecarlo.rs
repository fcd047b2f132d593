//! Full-run orchestration: reset, thermalize, sample, normalize, with
//! wall-clock timing of the thermalization and sampling phases.
//!
//! The engines expose `reset`/`thermalize`/`run` individually, so callers
//! with other timing needs can drive the phases themselves; this module is
//! the standard pipeline.

use std::time::{Duration, Instant};

use crate::batched::BatchedHarmonicOscillator;
use crate::conf::LatticeParams;
use crate::correlation::{accumulate_g, accumulate_g_batched, normalize_g};
use crate::error::ConfigError;
use crate::lattice::HarmonicOscillator;
use crate::rng::RandomSource;

/// Decorrelation blocks discarded before sampling starts.
pub const THERMALIZE_FACTOR: usize = 5;

/// Output of one full Monte Carlo evaluation.
#[derive(Clone, Debug)]
pub struct MonteCarloResults {
    /// Correlation estimate G(dist), indexed by lattice distance; index 0
    /// is the <x²> self-correlation.
    pub g: Vec<f64>,
    /// Fraction of proposed moves accepted over the whole run.
    pub acceptance_rate: f64,
    /// Wall-clock time of the sampling loop only.
    pub time_compute: Duration,
    /// Wall-clock time including thermalization.
    pub time_total: Duration,
}

/// Validate the configuration, then thermalize, sample and normalize.
///
/// `sample_count` decorrelated paths are collected in total. With
/// `batch_size == 1` a single chain produces them sequentially; with
/// `batch_size > 1` they arrive as `sample_count / batch_size` blocks of
/// `batch_size` independent replicas each, so the estimate's scale is
/// independent of how the total is split.
pub fn run_montecarlo<R: RandomSource>(
    params: &LatticeParams,
    sample_count: usize,
    batch_size: usize,
    rng: R,
) -> Result<MonteCarloResults, ConfigError> {
    params.validate()?;
    if sample_count == 0 {
        return Err(ConfigError::NoSamples);
    }
    if batch_size == 0 {
        return Err(ConfigError::EmptyBatch);
    }
    if sample_count % batch_size != 0 {
        return Err(ConfigError::BatchMismatch {
            samples: sample_count,
            batch: batch_size,
        });
    }
    if batch_size == 1 {
        run_single(params, sample_count, rng)
    } else {
        run_batched(params, sample_count / batch_size, batch_size, rng)
    }
}

fn run_single<R: RandomSource>(
    params: &LatticeParams,
    n_samples: usize,
    rng: R,
) -> Result<MonteCarloResults, ConfigError> {
    let mut osc = HarmonicOscillator::new(params, rng);
    let mut g = vec![0.0; params.length];
    osc.reset();
    let start = Instant::now();
    osc.thermalize(THERMALIZE_FACTOR);
    let start_compute = Instant::now();
    for _ in 0..n_samples {
        osc.run();
        accumulate_g(&mut g, &osc.x);
    }
    let stop = Instant::now();
    normalize_g(&mut g, n_samples);
    Ok(MonteCarloResults {
        g,
        acceptance_rate: osc.acceptance_rate(),
        time_compute: stop - start_compute,
        time_total: stop - start,
    })
}

fn run_batched<R: RandomSource>(
    params: &LatticeParams,
    n_batches: usize,
    batch_size: usize,
    rng: R,
) -> Result<MonteCarloResults, ConfigError> {
    let mut osc = BatchedHarmonicOscillator::new(params, batch_size, rng);
    let mut g = vec![0.0; params.length];
    osc.reset();
    let start = Instant::now();
    osc.thermalize(THERMALIZE_FACTOR);
    let start_compute = Instant::now();
    for _ in 0..n_batches {
        osc.run();
        accumulate_g_batched(&mut g, &osc.x);
    }
    let stop = Instant::now();
    // Every replica contributes one path per batch.
    normalize_g(&mut g, n_batches * batch_size);
    Ok(MonteCarloResults {
        g,
        acceptance_rate: osc.acceptance_rate(),
        time_compute: stop - start_compute,
        time_total: stop - start,
    })
}
