/* ************************************************************************ **
** This file is part of fcfit, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Small fixed-size vector and matrix types for crystal arithmetic.
//!
//! This crate uses a row-based formalism; matrices are conceptually
//! containers of row-vectors.  Fractional coordinates are row vectors
//! multiplied against a lattice on the right, so most vector-matrix
//! products here have the matrix on the right.  Column-style products
//! (`&M33 * &V3`) are also provided for rotation operators that are
//! most naturally written in the conventional orientation.

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_derive;

mod types;
mod methods;
mod ops;

pub use crate::types::{V3, M3, M33};
pub use crate::methods::{dot, inv, mat};
