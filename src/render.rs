//! Console rendering of the lattice grids.
//!
//! Stabilizers print as an L-row block of digits. Qubits print one grid row per
//! line, with even (vertical-edge) rows shifted right by one space and odd
//! (horizontal-edge) rows padded on the right, which approximates the brick layout
//! of qubits between stabilizers.

use std::fmt;

use crate::lattice::{QubitGrid, QubitKind, StabilizerGrid, ToricLattice};

fn join(row: &[u32]) -> String {
    row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for StabilizerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size());
        writeln!(f, "{}", rule)?;
        for row in self.rows() {
            writeln!(f, "{}", join(row))?;
        }
        write!(f, "{}", rule)
    }
}

impl fmt::Display for QubitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size() * 3);
        writeln!(f, "{}", rule)?;
        for (r, row) in self.rows().iter().enumerate() {
            match QubitKind::of_row(r) {
                QubitKind::VerticalEdge => writeln!(f, " {}", join(row))?,
                QubitKind::HorizontalEdge => writeln!(f, "{} ", join(row))?,
            }
        }
        write!(f, "{}", rule)
    }
}

impl fmt::Display for ToricLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Qubits:")?;
        writeln!(f, "{}", self.qubits())?;
        writeln!(f, "Stabilizers:")?;
        write!(f, "{}", self.stabilizers())
    }
}

#[cfg(test)]
mod tests {
    use crate::lattice::ToricLattice;
    use crate::noise::mark_error;

    #[test]
    fn test_stabilizer_rendering() {
        let mut lat = ToricLattice::new(3).unwrap();
        mark_error(&mut lat, 2, 1).unwrap();
        assert_eq!(
            lat.stabilizers().to_string(),
            "---\n0 1 0\n0 1 0\n0 0 0\n---"
        );
    }

    #[test]
    fn test_qubit_rendering_alternates_indent() {
        let mut lat = ToricLattice::new(2).unwrap();
        lat.qubits_mut().set(1, 1, 1).unwrap();
        assert_eq!(
            lat.qubits().to_string(),
            "------\n 0 0\n0 1 \n 0 0\n0 0 \n------"
        );
    }

    #[test]
    fn test_lattice_rendering_has_both_grids() {
        let lat = ToricLattice::new(2).unwrap();
        let text = lat.to_string();
        assert!(text.starts_with("Qubits:\n"));
        assert!(text.contains("\nStabilizers:\n--\n0 0\n0 0\n--"));
    }
}
