//! Periodic structure types for force-constant fitting.
//!
//! This crate knows nothing about displacements or force sets; it provides
//! the supercell geometry, fractional rotation operators, and the
//! position-matching search that the fitting engines are built on.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate fcfit_array_types;
#[cfg(test)]
#[macro_use]
extern crate fcfit_assert_close;

mod cell;
mod coords;
mod lattice;
mod map_sites;
mod symmop;

pub use crate::cell::Supercell;
pub use crate::coords::CoordsKind;
pub use crate::lattice::Lattice;
pub use crate::map_sites::{atoms_sent_by_rot_inv, PositionMatchError};
pub use crate::symmop::FracRot;
