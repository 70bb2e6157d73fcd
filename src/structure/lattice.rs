use fcfit_array_types::{inv, mat, M33, V3, M3};
use std::sync::Arc;

/// Defines a vector basis for periodic boundary conditions in three dimensions.
///
/// A `Lattice` is a linear transformation between "fractional" data (row
/// vectors in units of the lattice vectors) and "cartesian" data, with a
/// precomputed inverse for the opposite direction.
#[derive(Debug, Clone)]
pub struct Lattice {
    matrix: Arc<M33>,
    inverse: Arc<M33>,
}

// Manual impl that doesn't compare the inverse.
impl PartialEq<Lattice> for Lattice {
    fn eq(&self, other: &Lattice) -> bool {
        // deconstruct to get errors when new fields are added
        let Lattice { ref matrix, inverse: _ } = *self;
        matrix == &other.matrix
    }
}

impl Lattice {
    /// Create a lattice from a matrix where the rows are lattice vectors.
    #[inline]
    pub fn new(matrix: &M33) -> Self {
        let inverse = Arc::new(inv(matrix));
        let matrix = Arc::new(*matrix);
        Self { matrix, inverse }
    }

    #[inline(always)]
    pub fn from_vectors(vectors: &[V3; 3]) -> Self {
        Self::new(&M3(*vectors))
    }

    /// Matrix where lattice vectors are rows.
    #[inline]
    pub fn matrix(&self) -> &M33
    { &self.matrix }

    /// Get the (precomputed) inverse of the matrix where lattice vectors are rows.
    #[inline]
    pub fn inverse_matrix(&self) -> &M33
    { &self.inverse }

    #[inline]
    pub fn vectors(&self) -> &[V3; 3]
    { &self.matrix.0 }

    /// Get the (positive) volume of the lattice cell.
    pub fn volume(&self) -> f64
    { self.matrix.det().abs() }
}

/// Helper constructors
impl Lattice {
    /// The identity lattice.
    #[inline]
    pub fn eye() -> Self { Self::cubic(1.0) }

    #[inline]
    pub fn diagonal(&[x, y, z]: &[f64; 3]) -> Self { Self::orthorhombic(x, y, z) }

    #[inline]
    pub fn orthorhombic(x: f64, y: f64, z: f64) -> Self
    { Self::new(&mat::from_array([
        [ x , 0.0, 0.0],
        [0.0,  y , 0.0],
        [0.0, 0.0,  z ],
    ]))}

    #[inline]
    pub fn cubic(a: f64) -> Self
    { Self::orthorhombic(a, a, a) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_precomputed() {
        let lattice = Lattice::new(&mat::from_array([
            [2.0, 0.0, 0.0],
            [1.0, 2.0, 0.0],
            [0.0, 0.0, 3.0],
        ]));
        let prod = lattice.matrix() * lattice.inverse_matrix();
        assert_close!(abs=1e-12, prod, M33::eye());
    }

    #[test]
    fn volume() {
        assert_close!(abs=1e-12, Lattice::orthorhombic(2.0, 3.0, 4.0).volume(), 24.0);
    }
}
