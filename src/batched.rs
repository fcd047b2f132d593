//! Batched Metropolis engine: B independent replicas advanced in lock-step.
//!
//! The path becomes an L×B array stored as one contiguous lane vector per
//! site, and every step of the site update - proposal, action evaluation,
//! accept/reject - is an elementwise operation over the lanes. Lanes never
//! interact: each one is its own Markov chain fed independent draws, and
//! rejected lanes are restored by mask while the rest keep moving, so all
//! replicas advance through the same control flow.

use nalgebra::DVector;

use crate::conf::LatticeParams;
use crate::rng::RandomSource;

/// B harmonic-oscillator paths sharing one lattice geometry.
pub struct BatchedHarmonicOscillator<R: RandomSource> {
    /// Site rows; `x[i][b]` is site `i` of replica `b`.
    pub x: Vec<DVector<f64>>,
    length: usize,
    n_cor: usize,
    batch_size: usize,
    factor0: f64,
    factor1: f64,
    eps: f64,
    // Sweep scratch, allocated once per engine and reused across sweeps.
    x_buffer: DVector<f64>,
    val_buffer: DVector<f64>,
    diff_buffer: DVector<f64>,
    prop_buffer: DVector<f64>,
    accept_buffer: DVector<f64>,
    rng: R,
    accepted: usize,
    attempted: usize,
}

/// S(i) = (a/2)·x² + (1/a)·x·(x − x_prev − x_next), lane by lane into `dst`.
fn site_action(
    xi: &DVector<f64>,
    prev: &DVector<f64>,
    next: &DVector<f64>,
    factor0: f64,
    factor1: f64,
    dst: &mut DVector<f64>,
) {
    dst.copy_from(xi);
    dst.zip_zip_apply(prev, next, |v, p, n| {
        let x = *v;
        *v = factor0 * x * x + factor1 * x * (x - p - n);
    });
}

impl<R: RandomSource> BatchedHarmonicOscillator<R> {
    /// Create `batch_size` cold replicas owning one shared random source.
    pub fn new(params: &LatticeParams, batch_size: usize, rng: R) -> Self {
        Self {
            x: (0..params.length)
                .map(|_| DVector::zeros(batch_size))
                .collect(),
            length: params.length,
            n_cor: params.n_cor,
            batch_size,
            factor0: 0.5 * params.spacing,
            factor1: 1.0 / params.spacing,
            eps: params.eps,
            x_buffer: DVector::zeros(batch_size),
            val_buffer: DVector::zeros(batch_size),
            diff_buffer: DVector::zeros(batch_size),
            prop_buffer: DVector::zeros(batch_size),
            accept_buffer: DVector::zeros(batch_size),
            rng,
            accepted: 0,
            attempted: 0,
        }
    }

    /// Return every lane of every site to the cold start.
    pub fn reset(&mut self) {
        for row in self.x.iter_mut() {
            row.fill(0.0);
        }
        self.accepted = 0;
        self.attempted = 0;
    }

    /// Elementwise local action at site `i` across all lanes, written to
    /// `dst`. Pure arithmetic, no reduction, no cross-lane interaction.
    pub fn evaluate_action(&self, i: usize, dst: &mut DVector<f64>) {
        let prev = (i + self.length - 1) % self.length;
        let next = (i + 1) % self.length;
        site_action(
            &self.x[i],
            &self.x[prev],
            &self.x[next],
            self.factor0,
            self.factor1,
            dst,
        );
    }

    /// One Metropolis pass over all sites, updating every replica at each
    /// site before moving on. Sites mutate in place, so later sites see
    /// already-updated neighbor rows within the same sweep.
    pub fn sweep(&mut self) {
        let Self {
            x,
            x_buffer,
            val_buffer,
            diff_buffer,
            prop_buffer,
            accept_buffer,
            rng,
            length,
            batch_size,
            factor0,
            factor1,
            eps,
            accepted,
            attempted,
            ..
        } = self;
        let n = *length;
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            x_buffer.copy_from(&x[i]);
            site_action(&x[i], &x[prev], &x[next], *factor0, *factor1, val_buffer);
            rng.fill_uniform(prop_buffer, -*eps, *eps);
            x[i] += &*prop_buffer;
            site_action(&x[i], &x[prev], &x[next], *factor0, *factor1, diff_buffer);
            *diff_buffer -= &*val_buffer;
            rng.fill_uniform(accept_buffer, 0.0, 1.0);
            // Masked restore: only lanes that went uphill and lost the
            // accept draw revert. exp(-diff) underflows to 0 for large
            // diff, which rejects; the exponential is skipped entirely on
            // downhill lanes.
            let row = &mut x[i];
            for b in 0..*batch_size {
                let diff = diff_buffer[b];
                if diff > 0.0 && accept_buffer[b] >= (-diff).exp() {
                    row[b] = x_buffer[b];
                } else {
                    *accepted += 1;
                }
            }
            *attempted += *batch_size;
        }
    }

    /// One decorrelation block of `n_cor` sweeps for all replicas.
    pub fn run(&mut self) {
        for _ in 0..self.n_cor {
            self.sweep();
        }
    }

    /// Discard `factor` decorrelation blocks from the cold start.
    pub fn thermalize(&mut self, factor: usize) {
        for _ in 0..factor {
            self.run();
        }
    }

    /// Number of replicas advanced per sweep.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Fraction of proposed moves accepted since the last `reset`, counted
    /// over all lanes.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}
