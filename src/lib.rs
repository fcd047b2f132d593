//! Lattice MC - Metropolis Monte Carlo for the 1D quantum harmonic oscillator.
//!
//! This crate estimates the two-point correlation function
//! G(dist) = <x(i) x(i+dist)> of a particle on a discretized periodic
//! imaginary-time lattice, using single-site Metropolis updates. Two engine
//! variants share the same statistical algorithm: a single-chain engine that
//! advances one scalar path, and a batched engine that advances many
//! independent replicas in lock-step with elementwise lane operations.
//!
//! Reference: G. Peter Lepage, "Lattice QCD for Novices",
//! Proceedings of HUGS 98, World Scientific (2000), arXiv:hep-lat/0506036

pub mod batched;
pub mod conf;
pub mod correlation;
pub mod error;
pub mod lattice;
pub mod montecarlo;
pub mod rng;

// Re-export commonly used types at crate root
pub use batched::BatchedHarmonicOscillator;
pub use conf::{read_params, LatticeParams};
pub use correlation::{accumulate_g, accumulate_g_batched, normalize_g};
pub use error::ConfigError;
pub use lattice::HarmonicOscillator;
pub use montecarlo::{run_montecarlo, MonteCarloResults, THERMALIZE_FACTOR};
pub use rng::{seeded_source, thread_source, RandomSource, UniformSource};
