use crate::Lattice;
use fcfit_array_types::{mat, M33, V3};

/// A point group operation in fractional coordinates.
///
/// Site-symmetry operations of a crystal are always integer matrices in
/// the fractional basis; storing them as such keeps equality and hashing
/// exact.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FracRot {
    /// This is the transpose of what one would
    /// typically think of as the "rotation matrix"
    ///
    /// Invariants:
    ///  - `abs(det(t)) == 1`
    t: M33<i32>,
}

impl Default for FracRot {
    fn default() -> Self
    { Self::eye() }
}

impl FracRot {
    pub fn eye() -> Self
    { Self { t: mat::from_array([[1, 0, 0], [0, 1, 0], [0, 0, 1]]) } }

    /// Construct from a matrix.
    ///
    /// The input should be a matrix `R` such that `X R^T ~ X`,
    /// where the rows of `X` are fractional positions.
    pub fn new(mat: &M33<i32>) -> FracRot
    {
        assert_eq!(mat.det().abs(), 1);
        FracRot { t: mat.t() }
    }

    // transposed float matrix
    pub(crate) fn float_t(&self) -> M33
    { self.t.map(|x| x as f64) }

    /// The operation as a conventional (column-acting) matrix.
    pub fn frac(&self) -> M33<i32>
    { self.t.t() }
}

impl FracRot {
    /// Apply to a fractional row vector.
    #[inline]
    pub fn transform_frac(&self, frac: &V3) -> V3
    { frac * &self.float_t() }

    pub fn transform_fracs(&self, fracs: &[V3]) -> Vec<V3>
    {
        let t = self.float_t();
        fracs.iter().map(|v| v * &t).collect()
    }

    /// The transposed cartesian form (to right-multiply row vectors by).
    pub fn cart_t(&self, lattice: &Lattice) -> M33
    { &(lattice.inverse_matrix() * &self.float_t()) * lattice.matrix() }

    /// The operation as a conventional (column-acting) cartesian matrix.
    ///
    /// This is the similarity transform of the fractional matrix by the
    /// column-vector lattice basis.
    pub fn cart(&self, lattice: &Lattice) -> M33
    { self.cart_t(lattice).t() }
}

impl<'a> From<&'a [[i32; 3]; 3]> for FracRot {
    fn from(m: &'a [[i32; 3]; 3]) -> Self
    { FracRot::new(&mat::from_array(*m)) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn rot_transform()
    {
        let r = [
            [0, -1, 0],
            [1,  0, 0],
            [0,  0, 1],
        ];
        assert_eq!(
            FracRot::from(&r).transform_frac(&V3([1.0, 5.0, 7.0])),
            V3([-5.0, 1.0, 7.0]),
        );
        assert_eq!(FracRot::from(&r).frac(), mat::from_array(r));
    }

    #[test]
    fn cart_of_orthorhombic_lattice()
    {
        // quarter turn about z, in a lattice where x and y have different
        // lengths; the cartesian matrix must absorb the aspect ratio
        let lattice = Lattice::orthorhombic(2.0, 4.0, 1.0);
        let rot = FracRot::from(&[
            [0, -1, 0],
            [1,  0, 0],
            [0,  0, 1],
        ]);
        let cart = rot.cart(&lattice);
        let v = &cart * &V3([2.0, 0.0, 0.0]);
        assert_close!(abs=1e-12, v, V3([0.0, 4.0, 0.0]));
    }

    #[test]
    fn cart_is_plain_rotation_for_cubic()
    {
        let lattice = Lattice::cubic(3.1);
        let rot = FracRot::from(&[
            [0, 0, 1],
            [1, 0, 0],
            [0, 1, 0],
        ]);
        let expected = rot.float_t().t();
        assert_close!(abs=1e-12, rot.cart(&lattice), expected);
    }
}
