/* ************************************************************************ **
** This file is part of fcfit, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::types::{V3, M3, M33};
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// vector methods

impl<X> V3<X> {
    /// Apply a function to each element.
    #[inline]
    pub fn map<B, F>(self, mut f: F) -> V3<B>
    where F: FnMut(X) -> B,
    {
        let V3([a, b, c]) = self;
        V3([f(a), f(b), f(c)])
    }

    /// Apply a fallible function to each element, with short-circuiting.
    #[inline]
    pub fn try_map<B, E, F>(self, mut f: F) -> Result<V3<B>, E>
    where F: FnMut(X) -> Result<B, E>,
    {
        let V3([a, b, c]) = self;
        Ok(V3([f(a)?, f(b)?, f(c)?]))
    }

    /// Construct from a function on indices.
    #[inline]
    pub fn from_fn<F>(mut f: F) -> Self
    where F: FnMut(usize) -> X,
    { V3([f(0), f(1), f(2)]) }
}

impl V3<f64> {
    /// The zero vector.
    #[inline(always)]
    pub fn zero() -> Self
    { V3([0.0; 3]) }

    /// Square of the vector's magnitude.
    #[inline]
    pub fn sqnorm(&self) -> f64
    { dot(self, self) }

    /// The vector's magnitude.
    #[inline]
    pub fn norm(&self) -> f64
    { self.sqnorm().sqrt() }
}

/// Vector inner product.
#[inline]
pub fn dot<X>(a: &V3<X>, b: &V3<X>) -> X
where X: Copy + Add<Output = X> + Mul<Output = X>,
{ a[0] * b[0] + a[1] * b[1] + a[2] * b[2] }

// ---------------------------------------------------------------------------
// matrix methods

impl<X> M33<X> {
    /// Construct a matrix from a function on indices.
    #[inline]
    pub fn from_fn<F>(mut f: F) -> Self
    where F: FnMut(usize, usize) -> X,
    { M3([
        V3([f(0, 0), f(0, 1), f(0, 2)]),
        V3([f(1, 0), f(1, 1), f(1, 2)]),
        V3([f(2, 0), f(2, 1), f(2, 2)]),
    ])}

    /// Map each scalar element of a matrix.
    #[inline]
    pub fn map<B, F>(self, mut f: F) -> M33<B>
    where F: FnMut(X) -> B,
    {
        let M3([r0, r1, r2]) = self;
        M3([r0.map(&mut f), r1.map(&mut f), r2.map(&mut f)])
    }
}

impl<X: Copy> M33<X> {
    /// Matrix transpose. (does not conjugate)
    #[inline]
    pub fn t(&self) -> M33<X>
    { M33::from_fn(|r, c| self[c][r]) }
}

impl<X> M33<X>
where X: Copy + Add<Output = X> + Sub<Output = X> + Mul<Output = X>,
{
    /// Matrix determinant.
    pub fn det(&self) -> X
    {
        let m = self;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
}

impl M33<f64> {
    /// The zero matrix.
    #[inline]
    pub fn zero() -> Self
    { M33::from_fn(|_, _| 0.0) }

    /// The identity matrix.
    #[inline]
    pub fn eye() -> Self
    { M33::from_fn(|r, c| if r == c { 1.0 } else { 0.0 }) }
}

/// Matrix inverse.  Panics on a singular matrix.
pub fn inv(m: &M33) -> M33
{
    let det = m.det();
    assert!(det.abs() > 0.0, "matrix not invertible: {:?}", m);

    // transposed cofactor matrix over the determinant
    let cofactor = |r: usize, c: usize| {
        let sub = |i: usize, j: usize| m[(r + i) % 3][(c + j) % 3];
        sub(1, 1) * sub(2, 2) - sub(1, 2) * sub(2, 1)
    };
    M33::from_fn(|r, c| cofactor(c, r) / det)
}

/// Free functions for matrix construction.
pub mod mat {
    use super::*;

    /// Construct a matrix from a 2D array (of rows).
    #[inline(always)]
    pub fn from_array<X>(arr: [[X; 3]; 3]) -> M33<X>
    {
        let [r0, r1, r2] = arr;
        M3([V3(r0), V3(r1), V3(r2)])
    }

    pub use super::inv;
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn determinant() {
        let m = mat::from_array([
            [2, 0, 0],
            [0, 3, 0],
            [0, 0, 4],
        ]);
        assert_eq!(m.det(), 24);

        let m = mat::from_array([
            [0, -1, 0],
            [1,  0, 0],
            [0,  0, 1],
        ]);
        assert_eq!(m.det(), 1);
    }

    #[test]
    fn inverse() {
        let m = mat::from_array([
            [2.0, 1.0, 0.0],
            [0.0, 1.0, 3.0],
            [1.0, 0.0, 1.0],
        ]);
        let prod = &m * &inv(&m);
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert!((prod[r][c] - expected).abs() < 1e-12, "{:?}", prod);
            }
        }
    }

    #[test]
    fn transpose() {
        let m = mat::from_array([
            [1, 2, 3],
            [4, 5, 6],
            [7, 8, 9],
        ]);
        assert_eq!(m.t()[0], V3([1, 4, 7]));
        assert_eq!(m.t().t(), m);
    }
}
