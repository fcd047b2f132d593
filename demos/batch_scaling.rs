//! Throughput of batched versus sequential chains.
//!
//! Run with: cargo run --release --example batch_scaling
//!
//! Collects the same total number of decorrelated samples at increasing
//! batch sizes and prints the wall-clock cost of each phase. The sequential
//! engine pays the full sweep cost per sample; batching amortizes it over
//! the replicas at the price of thermalizing every replica.

use lattice_mc::rng::seeded_source;
use lattice_mc::{run_montecarlo, LatticeParams};

fn main() {
    let params = LatticeParams::default();
    let samples = 4096;

    println!("Collecting {} samples on the default lattice", samples);
    println!(
        "{:>8} {:>10} {:>14} {:>14} {:>12}",
        "batch", "blocks", "sampling [s]", "total [s]", "accept [%]"
    );
    for batch in [1usize, 4, 16, 64, 256] {
        let results = run_montecarlo(&params, samples, batch, seeded_source(17))
            .expect("sample count divisible by every batch size");
        println!(
            "{:>8} {:>10} {:>14.4} {:>14.4} {:>12.1}",
            batch,
            samples / batch,
            results.time_compute.as_secs_f64(),
            results.time_total.as_secs_f64(),
            100.0 * results.acceptance_rate
        );
    }
}
