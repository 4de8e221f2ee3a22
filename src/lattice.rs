//! Toric lattice with a stabilizer grid and a qubit grid.
//!
//! The code lives on an L×L torus (periodic in both directions). Stabilizers sit on
//! the sites of an L×L grid and qubits sit between neighbouring stabilizers. Qubits
//! are stored in a 2L×L grid whose rows alternate in role:
//! - even row `2k`: vertical-edge qubits, between stabilizer rows `k-1` and `k`
//! - odd row `2k+1`: horizontal-edge qubits, between stabilizer columns `c-1` and `c`
//!   of stabilizer row `k`
//!
//! Each stabilizer therefore touches four qubits (its plaquette):
//! - above: `(2r, c)`
//! - left: `(2r+1, c)`
//! - below: `(2((r+1)%L), c)`
//! - right: `(2r+1, (c+1)%L)`
//!
//! Cells are accumulating counters, not booleans. All parity tests reduce mod 2.

use std::ops::Index;

use crate::error::{LatticeError, Result};

/// Step one site backwards on a periodic axis of length `n`.
#[inline]
pub fn wrap_dec(i: usize, n: usize) -> usize {
    (i + n - 1) % n
}

/// Step one site forwards on a periodic axis of length `n`.
#[inline]
pub fn wrap_inc(i: usize, n: usize) -> usize {
    (i + 1) % n
}

/// Role of a qubit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QubitKind {
    /// Even rows: qubit between two vertically stacked stabilizers.
    VerticalEdge,
    /// Odd rows: qubit between two horizontally adjacent stabilizers.
    HorizontalEdge,
}

impl QubitKind {
    /// Even rows hold vertical-edge qubits, odd rows horizontal-edge qubits.
    pub fn of_row(row: usize) -> Self {
        if row % 2 == 0 {
            QubitKind::VerticalEdge
        } else {
            QubitKind::HorizontalEdge
        }
    }
}

/// The four qubits around stabilizer `(row, col)` on a lattice of size `n`.
///
/// Order: above, left, below, right.
pub fn plaquette(n: usize, row: usize, col: usize) -> [(usize, usize); 4] {
    [
        (2 * row, col),
        (2 * row + 1, col),
        (2 * wrap_inc(row, n), col),
        (2 * row + 1, wrap_inc(col, n)),
    ]
}

/// The two stabilizers touched by qubit `(row, col)` on a lattice of size `n`.
///
/// For a vertical-edge qubit these are the stabilizers below and above it, for a
/// horizontal-edge qubit the stabilizers right and left of it. On the first row or
/// column the second neighbour wraps to the last one.
pub fn qubit_stabilizers(n: usize, row: usize, col: usize) -> [(usize, usize); 2] {
    match QubitKind::of_row(row) {
        QubitKind::VerticalEdge => {
            let k = row / 2;
            [(k, col), (wrap_dec(k, n), col)]
        }
        QubitKind::HorizontalEdge => {
            let k = (row - 1) / 2;
            [(k, col), (k, wrap_dec(col, n))]
        }
    }
}

fn check_rectangular(
    rows: &[Vec<u32>],
    expected_rows: usize,
    cols: usize,
    what: &str,
) -> Result<()> {
    if rows.len() != expected_rows {
        return Err(LatticeError::InvalidGeometry(format!(
            "{} grid has {} rows, expected {}",
            what,
            rows.len(),
            expected_rows
        )));
    }
    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(LatticeError::InvalidGeometry(format!(
            "{} grid row {} has {} columns, expected {}",
            what,
            idx,
            row.len(),
            cols
        )));
    }
    Ok(())
}

/// L×L grid of stabilizer counts.
///
/// A value counts how many of the four neighbouring qubits have received an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizerGrid {
    n: usize,
    cells: Vec<Vec<u32>>,
}

impl StabilizerGrid {
    fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![vec![0; n]; n],
        }
    }

    /// Build a grid from explicit rows. The rows must form a non-empty square.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(LatticeError::InvalidGeometry("stabilizer grid is empty".into()));
        }
        check_rectangular(&rows, n, n, "stabilizer")?;
        Ok(Self { n, cells: rows })
    }

    /// Lattice dimension L.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Row-major view of the counts.
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// Sum of all counts, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().fold(0, |acc, &v| acc.saturating_add(v))
    }

    pub(crate) fn increment(&mut self, row: usize, col: usize) {
        let cell = &mut self.cells[row][col];
        *cell = cell.saturating_add(1);
    }

    fn reset(&mut self) {
        self.cells.iter_mut().flatten().for_each(|v| *v = 0);
    }
}

impl Index<(usize, usize)> for StabilizerGrid {
    type Output = u32;

    fn index(&self, (row, col): (usize, usize)) -> &u32 {
        &self.cells[row][col]
    }
}

/// 2L×L grid of qubit error counts (0 = no error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QubitGrid {
    n: usize,
    cells: Vec<Vec<u32>>,
}

impl QubitGrid {
    fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![vec![0; n]; 2 * n],
        }
    }

    /// Build a grid from explicit rows. Requires 2L rows of L columns, L ≥ 1.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let num_rows = rows.len();
        if num_rows == 0 || num_rows % 2 != 0 {
            return Err(LatticeError::InvalidGeometry(format!(
                "qubit grid needs a positive even number of rows, got {}",
                num_rows
            )));
        }
        let n = num_rows / 2;
        check_rectangular(&rows, num_rows, n, "qubit")?;
        Ok(Self { n, cells: rows })
    }

    /// Lattice dimension L (the grid has 2L rows and L columns).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of qubit rows, 2L.
    pub fn num_rows(&self) -> usize {
        2 * self.n
    }

    /// Row-major view of the counts.
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// One qubit row, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[u32]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Role of the qubits in `row`.
    pub fn kind(&self, row: usize) -> QubitKind {
        QubitKind::of_row(row)
    }

    /// Overwrite a single cell. Stabilizer counts are not touched; use
    /// [`crate::noise::mark_error`] to keep them in step.
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> Result<()> {
        self.ensure_in_range(row, col)?;
        self.cells[row][col] = value;
        Ok(())
    }

    /// Number of qubits carrying at least one error.
    pub fn error_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v > 0).count()
    }

    pub(crate) fn ensure_in_range(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.num_rows() || col >= self.n {
            return Err(LatticeError::QubitOutOfRange {
                row,
                col,
                rows: self.num_rows(),
                cols: self.n,
            });
        }
        Ok(())
    }

    pub(crate) fn increment(&mut self, row: usize, col: usize) {
        let cell = &mut self.cells[row][col];
        *cell = cell.saturating_add(1);
    }

    fn reset(&mut self) {
        self.cells.iter_mut().flatten().for_each(|v| *v = 0);
    }
}

impl Index<(usize, usize)> for QubitGrid {
    type Output = u32;

    fn index(&self, (row, col): (usize, usize)) -> &u32 {
        &self.cells[row][col]
    }
}

/// The toric lattice: stabilizer grid and qubit grid of one simulation trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToricLattice {
    n: usize,
    stabilizers: StabilizerGrid,
    qubits: QubitGrid,
}

impl ToricLattice {
    /// Create a clean L×L lattice (all counts zero).
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(LatticeError::InvalidGeometry(
                "lattice size must be at least 1".into(),
            ));
        }
        Ok(Self {
            n,
            stabilizers: StabilizerGrid::zeros(n),
            qubits: QubitGrid::zeros(n),
        })
    }

    /// Assemble a lattice from existing grids of matching size.
    pub fn from_grids(stabilizers: StabilizerGrid, qubits: QubitGrid) -> Result<Self> {
        if stabilizers.size() != qubits.size() {
            return Err(LatticeError::InvalidGeometry(format!(
                "stabilizer grid is {0}x{0} but qubit grid is {1}x{2}",
                stabilizers.size(),
                qubits.num_rows(),
                qubits.size()
            )));
        }
        Ok(Self {
            n: stabilizers.size(),
            stabilizers,
            qubits,
        })
    }

    /// Lattice dimension.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Stabilizer counts.
    pub fn stabilizers(&self) -> &StabilizerGrid {
        &self.stabilizers
    }

    /// Qubit error counts.
    pub fn qubits(&self) -> &QubitGrid {
        &self.qubits
    }

    /// Mutable access to the qubit grid, for hand-built error patterns.
    pub fn qubits_mut(&mut self) -> &mut QubitGrid {
        &mut self.qubits
    }

    /// Split into `(stabilizers, qubits)`.
    pub fn into_grids(self) -> (StabilizerGrid, QubitGrid) {
        (self.stabilizers, self.qubits)
    }

    /// The two stabilizers adjacent to qubit `(row, col)`.
    pub fn stabilizers_of(&self, row: usize, col: usize) -> Result<[(usize, usize); 2]> {
        self.qubits.ensure_in_range(row, col)?;
        Ok(qubit_stabilizers(self.n, row, col))
    }

    /// The four qubits around stabilizer `(row, col)`: above, left, below, right.
    pub fn plaquette(&self, row: usize, col: usize) -> Result<[(usize, usize); 4]> {
        if row >= self.n || col >= self.n {
            return Err(LatticeError::StabilizerOutOfRange {
                row,
                col,
                n: self.n,
            });
        }
        Ok(plaquette(self.n, row, col))
    }

    /// Mark one error on qubit `(row, col)` and bump both adjacent stabilizers.
    pub(crate) fn record_error(&mut self, row: usize, col: usize) {
        for (sr, sc) in qubit_stabilizers(self.n, row, col) {
            self.stabilizers.increment(sr, sc);
        }
        self.qubits.increment(row, col);
    }

    /// Stabilizer counts implied by the current qubit grid.
    ///
    /// Counts saturate at `u32::MAX`, matching [`ToricLattice::record_error`].
    pub fn expected_stabilizers(&self) -> StabilizerGrid {
        let mut expected = StabilizerGrid::zeros(self.n);
        for r in 0..self.n {
            for c in 0..self.n {
                expected.cells[r][c] = plaquette(self.n, r, c)
                    .iter()
                    .fold(0, |acc: u32, &(qr, qc)| {
                        acc.saturating_add(self.qubits[(qr, qc)])
                    });
            }
        }
        expected
    }

    /// True when every stabilizer count matches the errors on its plaquette.
    pub fn is_consistent(&self) -> bool {
        self.expected_stabilizers() == self.stabilizers
    }

    /// Reset both grids to zero.
    pub fn clear(&mut self) {
        self.stabilizers.reset();
        self.qubits.reset();
    }
}
