//! Force-constant fitting from finite-displacement force sets.
//!
//! Given an immutable supercell, the site symmetry of each of its atoms,
//! and a dataset of displacement/force measurements, this crate fits the
//! second-order (and, from double-displacement data, third-order)
//! force-constant tensors by expanding each measurement over the site
//! symmetry of the displaced atom and solving the resulting overdetermined
//! linear system with a pseudo-inverse.
//!
//! Discovering the symmetry, generating the displacements, and persisting
//! the tensors are all jobs for the surrounding tooling; this crate only
//! consumes their results.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate serde_derive;
extern crate fcfit_array_types;
extern crate fcfit_linalg;
extern crate fcfit_structure;
#[cfg(test)]
#[macro_use]
extern crate fcfit_assert_close;

/// The catch-all result type used at the crate's entry points.
pub type FailResult<T> = Result<T, failure::Error>;

macro_rules! throw {
    ($e:expr) => {
        return Err(::std::convert::Into::into($e))
    }
}

pub mod dataset;
mod fc2;
mod fc3;
pub mod symmetry;
pub mod tensor;

pub use crate::dataset::{FirstDisplacement, SecondDisplacement, SingleDisplacement};
pub use crate::fc2::fit_fc2;
pub use crate::fc3::{fit_fc3, SymmetryCompletionError};
pub use crate::symmetry::SiteSymmetries;
pub use crate::tensor::{Fc2, Fc3};

// Foundation types, re-exported so callers building the inputs don't need
// to name the member crates.
pub use fcfit_array_types::{M3, M33, V3};
pub use fcfit_structure::{CoordsKind, FracRot, Lattice, PositionMatchError, Supercell};
