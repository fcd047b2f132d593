use clap::Parser;
use lattice_mc::{read_params, run_montecarlo, LatticeParams, MonteCarloResults};
use lattice_mc::rng::{seeded_source, thread_source};

#[derive(Parser, Debug)]
#[command(version, about = "Metropolis Monte Carlo for the lattice harmonic oscillator", long_about = None)]
struct Args {
    /// Total number of decorrelated samples to collect.
    samples: usize,

    /// Number of replicas advanced in lock-step (1 runs the single-chain engine).
    #[arg(short, long, default_value_t = 1)]
    batch_size: usize,

    /// Optional YAML file overriding the lattice parameters.
    #[arg(short, long)]
    config: Option<String>,

    /// Fixed RNG seed for reproducible runs.
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let params = match &args.config {
        Some(path) => match read_params(path) {
            Ok(params) => params,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
        None => LatticeParams::default(),
    };

    let results = match args.seed {
        Some(seed) => run_montecarlo(&params, args.samples, args.batch_size, seeded_source(seed)),
        None => run_montecarlo(&params, args.samples, args.batch_size, thread_source()),
    };
    let results = match results {
        Ok(results) => results,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    print_report(&params, args.samples, args.batch_size, &results);
}

fn print_report(
    params: &LatticeParams,
    samples: usize,
    batch_size: usize,
    results: &MonteCarloResults,
) {
    println!("Lattice Harmonic Oscillator - Metropolis Monte Carlo");
    println!("----------------------------------------------------");
    println!(
        "Lattice: L = {}, nCor = {}, a = {}, eps = {}",
        params.length, params.n_cor, params.spacing, params.eps
    );
    println!("Samples: {} (batch size {})", samples, batch_size);
    println!(
        "Acceptance rate: {:.1}%",
        100.0 * results.acceptance_rate
    );
    println!(
        "Sampling time: {:.4} s ({:.4} s including thermalization)",
        results.time_compute.as_secs_f64(),
        results.time_total.as_secs_f64()
    );
    println!("Average G:");
    for (dist, g) in results.g.iter().enumerate() {
        println!("  G({:2}) = {:9.6}", dist, g);
    }
}
