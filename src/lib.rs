//! # toric-syndrome
//!
//! Error patterns on an L×L toric code and their stabilizer syndromes.
//!
//! Qubits live between stabilizers on a torus. Random X errors are injected one
//! qubit at a time, each error bumping the counts of the two stabilizers it
//! touches. A finished pattern is then checked for:
//!
//! - **Logical errors**: odd crossings of the two non-contractible cuts (X1, X2)
//! - **Local syndrome**: any stabilizer with an odd number of errors on its plaquette
//!
//! There is no decoder here; the check only says whether a given pattern (errors
//! plus any correction already applied as further errors) left the code intact.
//!
//! ```
//! use toric_syndrome::prelude::*;
//!
//! let mut lattice = ToricLattice::new(5).unwrap();
//! mark_error(&mut lattice, 4, 2).unwrap();
//! let outcome = check_correction(lattice.qubits());
//! assert_eq!(outcome.to_string(), "Stabilizer error at (1,2)");
//! ```

pub mod error;
pub mod lattice;
pub mod noise;
pub mod render;
pub mod simulation;
pub mod syndrome;

pub mod prelude {
    pub use crate::error::LatticeError;
    pub use crate::lattice::*;
    pub use crate::noise::*;
    pub use crate::simulation::*;
    pub use crate::syndrome::*;
}
