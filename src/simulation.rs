//! Monte Carlo trials: inject random errors, then check the raw error pattern.
//!
//! No decoder runs between injection and the check, so a trial only passes when
//! the sampled errors happen to form trivial loops (or nothing at all). The pass
//! rate is therefore the probability that an uncorrected pattern is harmless.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LatticeError, Result};
use crate::lattice::ToricLattice;
use crate::noise::inject_errors;
use crate::syndrome::{check_correction, CheckOutcome};

/// Configuration for a batch of trials.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Lattice size L (L×L stabilizers, 2L×L qubits).
    pub n: usize,
    /// Per-qubit X error probability.
    pub px: f64,
    /// Reserved for Z errors; passed through unchanged.
    pub pz: f64,
    /// Number of Monte Carlo trials.
    pub trials: usize,
    /// Seed for a reproducible run. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n: 5,
            px: 0.05,
            pz: 0.0,
            trials: 1000,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reject a zero lattice size, zero trials, or probabilities outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(LatticeError::InvalidConfig(
                "lattice size must be at least 1".into(),
            ));
        }
        if self.trials == 0 {
            return Err(LatticeError::InvalidConfig(
                "trials must be at least 1".into(),
            ));
        }
        for p in [self.px, self.pz] {
            if !(0.0..=1.0).contains(&p) {
                return Err(LatticeError::InvalidProbability(p));
            }
        }
        Ok(())
    }
}

/// Outcome of one trial.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    /// Qubits hit during injection.
    pub errors: usize,
    pub outcome: CheckOutcome,
    /// The lattice after injection, kept for rendering.
    pub lattice: ToricLattice,
}

/// Aggregated result of [`run_experiment`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimResult {
    pub n: usize,
    pub px: f64,
    pub trials: usize,
    pub passed: usize,
    pub x1_failures: usize,
    pub x2_failures: usize,
    pub stabilizer_failures: usize,
    /// Mean number of qubit errors per trial.
    pub mean_errors: f64,
}

impl SimResult {
    /// Trials that ended in any failure.
    pub fn failures(&self) -> usize {
        self.trials - self.passed
    }

    /// Fraction of trials that passed the check.
    pub fn pass_rate(&self) -> f64 {
        self.passed as f64 / self.trials as f64
    }
}

/// Run a single trial on a fresh lattice.
pub fn run_trial<R: Rng + ?Sized>(
    n: usize,
    px: f64,
    pz: f64,
    rng: &mut R,
) -> Result<TrialOutcome> {
    let mut lattice = ToricLattice::new(n)?;
    let errors = inject_errors(&mut lattice, px, pz, rng)?;
    let outcome = check_correction(lattice.qubits());
    Ok(TrialOutcome {
        errors,
        outcome,
        lattice,
    })
}

fn run_with<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Result<SimResult> {
    let mut result = SimResult {
        n: config.n,
        px: config.px,
        trials: config.trials,
        passed: 0,
        x1_failures: 0,
        x2_failures: 0,
        stabilizer_failures: 0,
        mean_errors: 0.0,
    };
    let mut total_errors = 0usize;

    for _ in 0..config.trials {
        let trial = run_trial(config.n, config.px, config.pz, rng)?;
        total_errors += trial.errors;
        match trial.outcome {
            CheckOutcome::Valid => result.passed += 1,
            CheckOutcome::X1Error => result.x1_failures += 1,
            CheckOutcome::X2Error => result.x2_failures += 1,
            CheckOutcome::StabilizerError { .. } => result.stabilizer_failures += 1,
        }
    }
    result.mean_errors = total_errors as f64 / config.trials as f64;
    Ok(result)
}

/// Run `config.trials` independent trials.
pub fn run_experiment(config: &SimConfig) -> Result<SimResult> {
    config.validate()?;
    let result = match config.seed {
        Some(seed) => run_with(config, &mut StdRng::seed_from_u64(seed))?,
        None => run_with(config, &mut rand::thread_rng())?,
    };
    info!(
        "L={} px={:.3}: {}/{} passed (X1 {}, X2 {}, stabilizer {})",
        result.n,
        result.px,
        result.passed,
        result.trials,
        result.x1_failures,
        result.x2_failures,
        result.stabilizer_failures
    );
    Ok(result)
}

/// Run [`run_experiment`] for each error rate, keeping the rest of `base`.
///
/// With a seed, each rate gets `seed + index` so rates do not share samples.
pub fn error_rate_sweep(base: &SimConfig, rates: &[f64]) -> Result<Vec<SimResult>> {
    rates
        .iter()
        .enumerate()
        .map(|(i, &px)| {
            run_experiment(&SimConfig {
                px,
                seed: base.seed.map(|s| s.wrapping_add(i as u64)),
                ..base.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_error_rate_always_passes() {
        let result = run_experiment(&SimConfig {
            n: 4,
            px: 0.0,
            trials: 100,
            seed: Some(3),
            ..SimConfig::default()
        })
        .unwrap();
        assert_eq!(result.passed, 100);
        assert_eq!(result.failures(), 0);
        assert_eq!(result.mean_errors, 0.0);
    }

    #[test]
    fn test_outcome_tallies_add_up() {
        let result = run_experiment(&SimConfig {
            n: 5,
            px: 0.1,
            trials: 200,
            seed: Some(42),
            ..SimConfig::default()
        })
        .unwrap();
        assert_eq!(
            result.passed
                + result.x1_failures
                + result.x2_failures
                + result.stabilizer_failures,
            200
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            n: 4,
            px: 0.15,
            trials: 50,
            seed: Some(99),
            ..SimConfig::default()
        };
        assert_eq!(
            run_experiment(&config).unwrap(),
            run_experiment(&config).unwrap()
        );
    }

    #[test]
    fn test_every_qubit_hit_fails_x1_on_odd_size() {
        // L=5 with px=1: row 0 carries five errors.
        let result = run_experiment(&SimConfig {
            n: 5,
            px: 1.0,
            trials: 10,
            seed: Some(0),
            ..SimConfig::default()
        })
        .unwrap();
        assert_eq!(result.x1_failures, 10);
        assert_eq!(result.mean_errors, 50.0);
    }

    #[test]
    fn test_trial_lattice_stays_consistent() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..20 {
            let trial = run_trial(5, 0.2, 0.0, &mut rng).unwrap();
            assert!(trial.lattice.is_consistent());
            assert_eq!(trial.errors, trial.lattice.qubits().error_count());
            assert_eq!(trial.outcome, check_correction(trial.lattice.qubits()));
        }
    }

    #[test]
    fn test_sweep_pass_rate_drops_with_error_rate() {
        let base = SimConfig {
            n: 5,
            trials: 300,
            seed: Some(7),
            ..SimConfig::default()
        };
        let results = error_rate_sweep(&base, &[0.0, 0.3]).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].pass_rate(), 1.0);
        assert!(results[1].pass_rate() < results[0].pass_rate());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let zero_size = SimConfig {
            n: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            zero_size.validate(),
            Err(LatticeError::InvalidConfig(_))
        ));
        let zero_trials = SimConfig {
            trials: 0,
            ..SimConfig::default()
        };
        assert!(run_experiment(&zero_trials).is_err());
        let bad_p = SimConfig {
            px: 2.0,
            ..SimConfig::default()
        };
        assert_eq!(bad_p.validate(), Err(LatticeError::InvalidProbability(2.0)));
    }
}
