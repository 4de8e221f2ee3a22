//! toric-syndrome CLI: scripted error patterns and Monte Carlo sweeps.

use clap::{Parser, Subcommand};
use log::info;

use toric_syndrome::prelude::*;

#[derive(Parser)]
#[command(name = "toric-syndrome")]
#[command(about = "Toric code error patterns, syndromes and logical error checks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the three scripted patterns: single error, winding loop, trivial loop
    Demo {
        /// Lattice size L (at least 3)
        #[arg(short, long, default_value = "5")]
        size: usize,
    },

    /// Inject random errors over a range of error rates and tally check results
    Sweep {
        /// Lattice size L
        #[arg(short, long, default_value = "5")]
        size: usize,

        /// Trials per error rate
        #[arg(short, long, default_value = "1000")]
        trials: usize,

        /// Comma-separated X error rates
        #[arg(short, long, value_delimiter = ',', default_values_t = [0.01, 0.02, 0.05, 0.1, 0.2])]
        rates: Vec<f64>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo { size } => cmd_demo(size),
        Commands::Sweep {
            size,
            trials,
            rates,
            seed,
        } => cmd_sweep(size, trials, &rates, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn report(lattice: &ToricLattice) {
    println!("{}", lattice);
    let (valid, reason) = check_correction(lattice.qubits()).into_pair();
    println!("Result: {} -> {}", valid, reason);
}

fn cmd_demo(size: usize) -> Result<(), Box<dyn std::error::Error>> {
    if size < 3 {
        return Err(LatticeError::InvalidConfig(format!(
            "demo patterns need L >= 3, got {}",
            size
        ))
        .into());
    }

    println!("=== 1: Single qubit error ===");
    let mut lattice = ToricLattice::new(size)?;
    mark_error(&mut lattice, 4, 2)?;
    report(&lattice);
    println!();

    println!("=== 2: Winding loop along qubit row 0 ===");
    let mut lattice = ToricLattice::new(size)?;
    for col in 0..size {
        lattice.qubits_mut().set(0, col, 1)?;
    }
    report(&lattice);
    println!();

    println!("=== 3: Trivial loop around one face ===");
    let mut lattice = ToricLattice::new(size)?;
    for (row, col) in [(3, 2), (5, 2), (4, 1), (4, 2)] {
        mark_error(&mut lattice, row, col)?;
    }
    report(&lattice);

    Ok(())
}

fn cmd_sweep(
    size: usize,
    trials: usize,
    rates: &[f64],
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = SimConfig {
        n: size,
        trials,
        seed,
        ..SimConfig::default()
    };
    info!(
        "sweeping {} error rates on L={} ({} trials each)",
        rates.len(),
        size,
        trials
    );
    let results = error_rate_sweep(&base, rates)?;

    println!(
        "  {:>6}  {:>9}  {:>6}  {:>6}  {:>6}  {:>8}",
        "px", "pass rate", "X1", "X2", "stab", "errors"
    );
    println!(
        "  {:─>6}  {:─>9}  {:─>6}  {:─>6}  {:─>6}  {:─>8}",
        "", "", "", "", "", ""
    );
    for r in &results {
        println!(
            "  {:>6.3}  {:>9.4}  {:>6}  {:>6}  {:>6}  {:>8.2}",
            r.px,
            r.pass_rate(),
            r.x1_failures,
            r.x2_failures,
            r.stabilizer_failures,
            r.mean_errors
        );
    }
    Ok(())
}
