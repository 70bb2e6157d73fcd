//! Site-symmetry data, as delivered by an external symmetry finder.
//!
//! Discovering the operations is someone else's job (spglib or a port of
//! it, typically); this module just stores the per-atom operation lists
//! and the position tolerance they were discovered with, and provides the
//! two derived forms the engines need: cartesian operator matrices and
//! the subgroup compatible with a fixed displacement direction.

use crate::FailResult;
use fcfit_array_types::{M33, V3};
use fcfit_structure::{FracRot, Lattice};

/// Site-symmetry operations for every atom of a supercell, plus the
/// numerical tolerance (`symprec`) under which they hold.
#[derive(Debug, Clone)]
pub struct SiteSymmetries {
    rots: Vec<Vec<FracRot>>,
    symprec: f64,
}

impl SiteSymmetries {
    /// `rots[atom]` is the list of fractional operations fixing that atom.
    ///
    /// The list order is preserved and observable: symmetry completion
    /// resolves ties by taking the first operation that works.
    pub fn new(rots: Vec<Vec<FracRot>>, symprec: f64) -> FailResult<Self> {
        ensure!(symprec > 0.0, "symprec must be positive, got {}", symprec);
        for (atom, ops) in rots.iter().enumerate() {
            ensure!(
                !ops.is_empty(),
                "atom {} has no site symmetry; even an asymmetric site has the identity", atom,
            );
        }
        Ok(SiteSymmetries { rots, symprec })
    }

    /// The trivial site symmetry: just the identity at every atom.
    pub fn identity(num_atoms: usize, symprec: f64) -> Self
    { SiteSymmetries {
        rots: vec![vec![FracRot::eye()]; num_atoms],
        symprec,
    }}

    #[inline]
    pub fn num_atoms(&self) -> usize
    { self.rots.len() }

    #[inline]
    pub fn site_symmetry(&self, atom: usize) -> &[FracRot]
    { &self.rots[atom] }

    #[inline]
    pub fn symprec(&self) -> f64
    { self.symprec }
}

/// Restrict a site-symmetry set to the operations leaving a fractional
/// direction invariant (componentwise, within `tol`).
///
/// Order-preserving; see `SiteSymmetries::new`.
pub fn reduced_site_symmetry(rots: &[FracRot], direction: &V3, tol: f64) -> Vec<FracRot> {
    rots.iter()
        .filter(|rot| {
            let image = rot.transform_frac(direction);
            izip!(&image, direction).all(|(a, b)| (a - b).abs() < tol)
        })
        .cloned()
        .collect()
}

/// Cartesian matrices of fractional operations, in the same order.
pub fn cart_rotations(lattice: &Lattice, rots: &[FracRot]) -> Vec<M33> {
    rots.iter().map(|rot| rot.cart(lattice)).collect()
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    fn c4z_group() -> Vec<FracRot> {
        vec![
            FracRot::eye(),
            FracRot::from(&[[ 0, -1, 0], [ 1,  0, 0], [0, 0, 1]]),
            FracRot::from(&[[-1,  0, 0], [ 0, -1, 0], [0, 0, 1]]),
            FracRot::from(&[[ 0,  1, 0], [-1,  0, 0], [0, 0, 1]]),
        ]
    }

    #[test]
    fn z_direction_keeps_the_whole_axis_group() {
        let reduced = reduced_site_symmetry(&c4z_group(), &V3([0.0, 0.0, 0.3]), 1e-5);
        assert_eq!(reduced.len(), 4);
    }

    #[test]
    fn x_direction_keeps_only_identity() {
        let reduced = reduced_site_symmetry(&c4z_group(), &V3([0.1, 0.0, 0.0]), 1e-5);
        assert_eq!(reduced, vec![FracRot::eye()]);
    }

    #[test]
    fn reduction_preserves_order() {
        let group = c4z_group();
        // the zero direction is fixed by everything, in the original order
        let reduced = reduced_site_symmetry(&group, &V3([0.0, 0.0, 0.0]), 1e-5);
        assert_eq!(reduced, group);
    }
}
