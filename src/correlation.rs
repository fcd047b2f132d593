//! Two-point correlation accumulation G(dist) = <x(i) x(i+dist)>.

use nalgebra::DVector;

/// Add every lag product x[i]·x[(i+dist) mod L] of one sample path to the
/// running sums in `g`. Mutates `g` in place, O(L²) per call.
pub fn accumulate_g(g: &mut [f64], x: &[f64]) {
    let size = x.len();
    for dist in 0..size {
        for i in 0..size {
            g[dist] += x[i] * x[(i + dist) % size];
        }
    }
}

/// Batched form: the lag product is additionally reduced over the replica
/// lanes of each site row before it lands in `g[dist]`, amortizing the
/// O(L²) pass over all replicas of the sample.
pub fn accumulate_g_batched(g: &mut [f64], x: &[DVector<f64>]) {
    let size = x.len();
    for dist in 0..size {
        for i in 0..size {
            g[dist] += x[i].dot(&x[(i + dist) % size]);
        }
    }
}

/// Scale the running sums into the correlation estimate. Called exactly
/// once per run, with `n_paths` the total number of contributing paths
/// (samples × replicas).
pub fn normalize_g(g: &mut [f64], n_paths: usize) {
    let norm = 1.0 / (g.len() as f64 * n_paths as f64);
    for value in g.iter_mut() {
        *value *= norm;
    }
}
