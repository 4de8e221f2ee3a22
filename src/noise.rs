//! Error injection on the qubit grid.
//!
//! Each qubit independently receives an X-type error with probability `px`. Every
//! marked error bumps the qubit's cell and both adjacent stabilizers by one, so the
//! stabilizer grid always counts the errors on each plaquette.
//!
//! The random source is injected as any [`rand::Rng`]; one `f64` sample is drawn per
//! qubit, in row-major order over the 2L×L grid.

use log::debug;
use rand::Rng;

use crate::error::{LatticeError, Result};
use crate::lattice::ToricLattice;

fn check_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(LatticeError::InvalidProbability(p));
    }
    Ok(())
}

/// Mark a single error on qubit `(row, col)` and update its two stabilizers.
pub fn mark_error(lattice: &mut ToricLattice, row: usize, col: usize) -> Result<()> {
    lattice.qubits().ensure_in_range(row, col)?;
    lattice.record_error(row, col);
    Ok(())
}

/// Inject random X errors with probability `px` on every qubit.
///
/// A qubit is hit when its sample is `<= px`. The Z error rate is accepted but
/// has no effect yet. Returns the number of qubits hit by this call.
///
/// Errors accumulate: calling this twice on the same lattice can push a qubit
/// count past 1.
pub fn inject_errors<R: Rng + ?Sized>(
    lattice: &mut ToricLattice,
    px: f64,
    _pz: f64,
    rng: &mut R,
) -> Result<usize> {
    check_probability(px)?;

    let n = lattice.size();
    let mut hits = 0;
    for row in 0..2 * n {
        for col in 0..n {
            if rng.gen::<f64>() <= px {
                lattice.record_error(row, col);
                hits += 1;
            }
        }
    }
    debug!(
        "injected {} X errors on {} qubits (px = {})",
        hits,
        2 * n * n,
        px
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mark_error_bumps_two_stabilizers() {
        let mut lat = ToricLattice::new(5).unwrap();
        mark_error(&mut lat, 4, 2).unwrap();
        assert_eq!(lat.qubits()[(4, 2)], 1);
        assert_eq!(lat.stabilizers()[(2, 2)], 1);
        assert_eq!(lat.stabilizers()[(1, 2)], 1);
        assert_eq!(lat.stabilizers().total(), 2);
    }

    #[test]
    fn test_mark_error_out_of_range() {
        let mut lat = ToricLattice::new(3).unwrap();
        let err = mark_error(&mut lat, 6, 0).unwrap_err();
        assert_eq!(
            err,
            LatticeError::QubitOutOfRange {
                row: 6,
                col: 0,
                rows: 6,
                cols: 3
            }
        );
        assert_eq!(lat.stabilizers().total(), 0);
    }

    #[test]
    fn test_zero_probability_leaves_grids_unchanged() {
        let mut lat = ToricLattice::new(5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let hits = inject_errors(&mut lat, 0.0, 0.0, &mut rng).unwrap();
        assert_eq!(hits, 0);
        assert_eq!(lat.stabilizers().total(), 0);
        assert_eq!(lat.qubits().error_count(), 0);
    }

    #[test]
    fn test_certain_probability_hits_every_qubit() {
        let mut lat = ToricLattice::new(4).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let hits = inject_errors(&mut lat, 1.0, 0.0, &mut rng).unwrap();
        assert_eq!(hits, 32);
        // Every stabilizer touches four qubits.
        assert!(lat.stabilizers().rows().iter().flatten().all(|&v| v == 4));
        assert!(lat.is_consistent());
    }

    #[test]
    fn test_zero_sample_counts_as_hit() {
        // StepRng(0, 0) always yields 0.0, and the comparison is `<=`.
        let mut lat = ToricLattice::new(2).unwrap();
        let mut rng = StepRng::new(0, 0);
        let hits = inject_errors(&mut lat, 0.0, 0.0, &mut rng).unwrap();
        assert_eq!(hits, 8);
    }

    #[test]
    fn test_injection_keeps_stabilizer_counts_exact() {
        let mut rng = StdRng::seed_from_u64(2024);
        for &p in &[0.05, 0.2, 0.5, 0.9] {
            let mut lat = ToricLattice::new(5).unwrap();
            let hits = inject_errors(&mut lat, p, 0.0, &mut rng).unwrap();
            assert!(lat.is_consistent(), "counts drifted at p = {}", p);
            assert_eq!(lat.stabilizers().total() as usize, 2 * hits);
        }
    }

    #[test]
    fn test_repeated_injection_accumulates() {
        let mut lat = ToricLattice::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        inject_errors(&mut lat, 1.0, 0.0, &mut rng).unwrap();
        inject_errors(&mut lat, 1.0, 0.0, &mut rng).unwrap();
        assert!(lat.qubits().rows().iter().flatten().all(|&v| v == 2));
        assert!(lat.is_consistent());
    }

    #[test]
    fn test_pz_is_ignored() {
        let mut a = ToricLattice::new(4).unwrap();
        let mut b = ToricLattice::new(4).unwrap();
        inject_errors(&mut a, 0.3, 0.0, &mut StdRng::seed_from_u64(5)).unwrap();
        inject_errors(&mut b, 0.3, 0.9, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let mut lat = ToricLattice::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(inject_errors(&mut lat, 1.5, 0.0, &mut rng).is_err());
        assert!(inject_errors(&mut lat, -0.1, 0.0, &mut rng).is_err());
        assert!(inject_errors(&mut lat, f64::NAN, 0.0, &mut rng).is_err());
    }
}
