//! Single-chain Metropolis engine for the lattice harmonic oscillator.
//!
//! Discretizes one particle worldline on a periodic imaginary-time lattice
//! of `length` sites and updates it site by site with the Metropolis
//! algorithm. One `run()` performs `n_cor` sweeps and yields the next
//! decorrelated sample path.
//!
//! Reference: G.P. Lepage, "Lattice QCD for Novices", arXiv:hep-lat/0506036

use crate::conf::LatticeParams;
use crate::rng::RandomSource;

/// One harmonic-oscillator path with periodic boundary x[L] = x[0].
pub struct HarmonicOscillator<R: RandomSource> {
    /// Positions at each imaginary-time slice.
    pub x: Vec<f64>,
    length: usize,
    n_cor: usize,
    /// a/2, weight of the potential term.
    factor0: f64,
    /// 1/a, weight of the kinetic (spring) term.
    factor1: f64,
    eps: f64,
    rng: R,
    accepted: usize,
    attempted: usize,
}

impl<R: RandomSource> HarmonicOscillator<R> {
    /// Create a cold (all-zero) lattice owning its random source.
    pub fn new(params: &LatticeParams, rng: R) -> Self {
        Self {
            x: vec![0.0; params.length],
            length: params.length,
            n_cor: params.n_cor,
            factor0: 0.5 * params.spacing,
            factor1: 1.0 / params.spacing,
            eps: params.eps,
            rng,
            accepted: 0,
            attempted: 0,
        }
    }

    /// Return every site to the cold start and clear the move counters.
    pub fn reset(&mut self) {
        self.x.fill(0.0);
        self.accepted = 0;
        self.attempted = 0;
    }

    /// Local action at site `i`:
    /// S(i) = (a/2)·x[i]² + (1/a)·x[i]·(x[i] − x[i−1] − x[i+1]),
    /// neighbor indices taken modulo the lattice length. Terms that do not
    /// involve x[i] drop out of the Metropolis difference, so they are not
    /// evaluated here.
    pub fn evaluate_action(&self, i: usize) -> f64 {
        let prev = self.x[(i + self.length - 1) % self.length];
        let next = self.x[(i + 1) % self.length];
        let xi = self.x[i];
        self.factor0 * xi * xi + self.factor1 * xi * (xi - prev - next)
    }

    /// One Metropolis pass over all sites in increasing order. Mutation is
    /// in place: later sites see the already-updated values of earlier
    /// neighbors within the same sweep.
    pub fn sweep(&mut self) {
        for i in 0..self.length {
            let x_old = self.x[i];
            let val_old = self.evaluate_action(i);
            self.x[i] += self.rng.uniform(-self.eps, self.eps);
            let diff = self.evaluate_action(i) - val_old;
            // The accept draw happens even for diff <= 0 so the random
            // stream matches the batched engine's lane draws; the
            // exponential is still skipped on that branch. exp(-diff)
            // underflows to 0 for large diff, which rejects as required.
            let r = self.rng.uniform(0.0, 1.0);
            if diff > 0.0 && r >= (-diff).exp() {
                self.x[i] = x_old;
            } else {
                self.accepted += 1;
            }
            self.attempted += 1;
        }
    }

    /// One decorrelation block of `n_cor` sweeps.
    pub fn run(&mut self) {
        for _ in 0..self.n_cor {
            self.sweep();
        }
    }

    /// Discard `factor` decorrelation blocks so the chain can reach its
    /// stationary distribution from the cold start.
    pub fn thermalize(&mut self, factor: usize) {
        for _ in 0..factor {
            self.run();
        }
    }

    /// Fraction of proposed moves accepted since the last `reset`.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{seeded_source, ScriptedSource};
    use approx::assert_relative_eq;
    use std::collections::VecDeque;

    fn small_params() -> LatticeParams {
        LatticeParams {
            length: 3,
            n_cor: 1,
            spacing: 0.5,
            eps: 1.4,
        }
    }

    #[test]
    fn test_evaluate_action_by_hand() {
        // a = 0.5 gives factor0 = 0.25 and factor1 = 2.
        let mut osc = HarmonicOscillator::new(
            &LatticeParams {
                length: 4,
                ..LatticeParams::default()
            },
            seeded_source(0),
        );
        osc.x = vec![1.0, 2.0, -0.5, 0.0];
        // S(1) = 0.25*4 + 2*2*(2 - 1 - (-0.5)) = 1 + 6 = 7
        assert_relative_eq!(osc.evaluate_action(1), 7.0, epsilon = 1e-12);
        // Wraparound at the boundary: S(0) sees x[3] and x[1].
        // S(0) = 0.25*1 + 2*1*(1 - 0 - 2) = 0.25 - 2 = -1.75
        assert_relative_eq!(osc.evaluate_action(0), -1.75, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_action_is_deterministic() {
        let mut osc = HarmonicOscillator::new(&small_params(), seeded_source(11));
        osc.x = vec![0.3, -1.2, 0.7];
        let first = osc.evaluate_action(2);
        for _ in 0..10 {
            assert_eq!(osc.evaluate_action(2), first);
        }
    }

    #[test]
    fn test_reset_zeroes_every_site() {
        let mut osc = HarmonicOscillator::new(&LatticeParams::default(), seeded_source(5));
        osc.thermalize(2);
        assert!(osc.x.iter().any(|&v| v != 0.0));
        osc.reset();
        assert!(osc.x.iter().all(|&v| v == 0.0));
        assert_relative_eq!(osc.acceptance_rate(), 0.0);
    }

    #[test]
    fn test_downhill_move_always_accepts() {
        // Start from x = [2, 0, 0]; proposing -1 at site 0 lowers the
        // action, so even an accept draw of ~1 must keep the move.
        let script = ScriptedSource(VecDeque::from(vec![
            -1.0, 0.9999, // site 0: downhill proposal, adversarial draw
            0.0, 0.5, //  site 1: no-op proposal, diff = 0 accepts
            0.0, 0.5, //  site 2
        ]));
        let mut osc = HarmonicOscillator::new(&small_params(), script);
        osc.x = vec![2.0, 0.0, 0.0];
        osc.sweep();
        assert_relative_eq!(osc.x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(osc.acceptance_rate(), 1.0);
    }

    #[test]
    fn test_uphill_move_rejected_by_adversarial_draw() {
        // From the cold start, +1 at site 0 raises the action by 2.25;
        // exp(-2.25) ~ 0.105 < 0.9999, so the site must be restored.
        let script = ScriptedSource(VecDeque::from(vec![
            1.0, 0.9999, 0.0, 0.5, 0.0, 0.5,
        ]));
        let mut osc = HarmonicOscillator::new(&small_params(), script);
        osc.sweep();
        assert_relative_eq!(osc.x[0], 0.0);
        assert_relative_eq!(osc.acceptance_rate(), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uphill_move_accepted_by_small_draw() {
        // Same uphill proposal, but r = 0.05 < exp(-2.25) keeps it.
        let script = ScriptedSource(VecDeque::from(vec![
            1.0, 0.05, 0.0, 0.5, 0.0, 0.5,
        ]));
        let mut osc = HarmonicOscillator::new(&small_params(), script);
        osc.sweep();
        assert_relative_eq!(osc.x[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_acceptance_rate_reasonable_after_thermalization() {
        let mut osc = HarmonicOscillator::new(&LatticeParams::default(), seeded_source(19));
        osc.thermalize(5);
        let rate = osc.acceptance_rate();
        // eps = 1.4 is tuned for roughly half the moves accepted.
        assert!(rate > 0.3 && rate < 0.8, "acceptance rate {rate}");
    }

    #[test]
    fn test_single_site_lattice_does_not_panic() {
        let params = LatticeParams {
            length: 1,
            n_cor: 5,
            ..LatticeParams::default()
        };
        let mut osc = HarmonicOscillator::new(&params, seeded_source(23));
        osc.thermalize(3);
        osc.run();
        assert!(osc.x[0].is_finite());
    }
}
