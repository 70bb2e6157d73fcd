//! Displacement/force measurement records.
//!
//! These are produced by an external dataset loader (the serde derives are
//! the interchange surface) and consumed read-only by the fitting engines,
//! which validate them against the supercell before doing any work.

use crate::FailResult;
use fcfit_array_types::V3;

/// A single-displacement measurement: one atom displaced once, and the
/// force felt by every atom of the supercell in response.
///
/// This is the unit of input for second-order fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleDisplacement {
    /// Index of the displaced atom.
    pub atom: usize,
    /// The applied displacement, cartesian.
    pub displacement: V3,
    /// Force on each atom of the supercell, cartesian, one entry per atom.
    pub forces: Vec<V3>,
}

/// A first displacement together with every second displacement measured
/// on top of it.  The unit of input for third-order fitting.
///
/// Forces live on the second displacements; the first displacement alone
/// contributes through the constant column of the design matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstDisplacement {
    /// Index of the first displaced atom.
    pub atom: usize,
    /// The applied first displacement, cartesian.
    pub displacement: V3,
    /// Measurements taken with this first displacement held fixed.
    pub second_atoms: Vec<SecondDisplacement>,
}

/// One second displacement applied while a first displacement is held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondDisplacement {
    /// Index of the second displaced atom.
    pub atom: usize,
    /// The applied second displacement, cartesian.
    pub displacement: V3,
    /// Force on each atom under the combined displacement.
    pub forces: Vec<V3>,
}

impl SingleDisplacement {
    pub(crate) fn validate(&self, num_atoms: usize) -> FailResult<()> {
        ensure!(
            self.atom < num_atoms,
            "displaced atom {} out of range for {} atoms", self.atom, num_atoms,
        );
        ensure!(
            self.forces.len() == num_atoms,
            "force set for atom {} has {} entries, supercell has {} atoms",
            self.atom, self.forces.len(), num_atoms,
        );
        Ok(())
    }
}

impl FirstDisplacement {
    pub(crate) fn validate(&self, num_atoms: usize) -> FailResult<()> {
        ensure!(
            self.atom < num_atoms,
            "first displaced atom {} out of range for {} atoms", self.atom, num_atoms,
        );
        for second in &self.second_atoms {
            ensure!(
                second.atom < num_atoms,
                "second displaced atom {} out of range for {} atoms", second.atom, num_atoms,
            );
            ensure!(
                second.forces.len() == num_atoms,
                "force set for pair ({}, {}) has {} entries, supercell has {} atoms",
                self.atom, second.atom, second.forces.len(), num_atoms,
            );
        }
        Ok(())
    }
}
