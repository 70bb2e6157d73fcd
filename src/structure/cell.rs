use crate::{CoordsKind, Lattice};
use fcfit_array_types::V3;

/// An immutable supercell: a lattice plus the fractional position of
/// every atom in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Supercell {
    lattice: Lattice,
    fracs: Vec<V3>,
}

impl Supercell {
    pub fn new(lattice: Lattice, coords: CoordsKind) -> Self {
        let fracs = coords.into_fracs(&lattice);
        Supercell { lattice, fracs }
    }

    #[inline]
    pub fn num_atoms(&self) -> usize
    { self.fracs.len() }

    #[inline]
    pub fn lattice(&self) -> &Lattice
    { &self.lattice }

    #[inline]
    pub fn fracs(&self) -> &[V3]
    { &self.fracs }

    pub fn to_carts(&self) -> Vec<V3>
    { self.fracs.iter().map(|v| v * self.lattice.matrix()).collect() }

    /// Fractional positions translated so the given atom sits at the origin.
    ///
    /// Site-symmetry operations rotate the crystal about one atom, so all
    /// position matching under them happens in this frame.
    pub fn fracs_about(&self, atom: usize) -> Vec<V3> {
        let center = self.fracs[atom];
        self.fracs.iter().map(|v| v - center).collect()
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn fracs_about_recenters() {
        let cell = Supercell::new(
            Lattice::cubic(2.0),
            CoordsKind::Fracs(vec![
                V3([0.25, 0.25, 0.0]),
                V3([0.75, 0.25, 0.5]),
            ]),
        );
        let rel = cell.fracs_about(1);
        assert_eq!(rel[1], V3([0.0, 0.0, 0.0]));
        assert_eq!(rel[0], V3([-0.5, 0.0, -0.5]));
    }

    #[test]
    fn carts_accepted_on_input() {
        let cell = Supercell::new(
            Lattice::cubic(2.0),
            CoordsKind::Carts(vec![V3([1.0, 0.0, 1.0])]),
        );
        assert_eq!(cell.fracs(), &[V3([0.5, 0.0, 0.5])]);
    }
}
