/* ************************************************************************ **
** This file is part of fcfit, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Operator impls.  Binary operators are provided for all four
//! combinations of value and reference operands.

use crate::methods::dot;
use crate::types::{V3, M3, M33};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// implements the three reference forms of a binary operator in terms
// of the value-value form (everything here is Copy)
macro_rules! forward_ref_binop {
    (
        [$($generics:tt)*] $Op:ident::$op:ident
        for $Lhs:ty, $Rhs:ty => $Out:ty
    ) => {
        impl<'a, $($generics)*> $Op<$Rhs> for &'a $Lhs {
            type Output = $Out;

            #[inline]
            fn $op(self, rhs: $Rhs) -> $Out
            { (*self).$op(rhs) }
        }

        impl<'b, $($generics)*> $Op<&'b $Rhs> for $Lhs {
            type Output = $Out;

            #[inline]
            fn $op(self, rhs: &'b $Rhs) -> $Out
            { self.$op(*rhs) }
        }

        impl<'a, 'b, $($generics)*> $Op<&'b $Rhs> for &'a $Lhs {
            type Output = $Out;

            #[inline]
            fn $op(self, rhs: &'b $Rhs) -> $Out
            { (*self).$op(*rhs) }
        }
    };
}

// ---------------------------------------------------------------------------
// elementwise vector ops

macro_rules! impl_v_elementwise {
    ($Op:ident, $op:ident) => {
        impl<X: Copy + $Op<Output = X>> $Op<V3<X>> for V3<X> {
            type Output = V3<X>;

            #[inline]
            fn $op(self, rhs: V3<X>) -> V3<X>
            { V3([self[0].$op(rhs[0]), self[1].$op(rhs[1]), self[2].$op(rhs[2])]) }
        }

        forward_ref_binop!{
            [X: Copy + $Op<Output = X>] $Op::$op
            for V3<X>, V3<X> => V3<X>
        }
    };
}

impl_v_elementwise!{Add, add}
impl_v_elementwise!{Sub, sub}

impl<X: Copy + Add<Output = X>> AddAssign<V3<X>> for V3<X> {
    #[inline]
    fn add_assign(&mut self, rhs: V3<X>)
    { *self = *self + rhs; }
}

impl<X: Copy + Sub<Output = X>> SubAssign<V3<X>> for V3<X> {
    #[inline]
    fn sub_assign(&mut self, rhs: V3<X>)
    { *self = *self - rhs; }
}

impl<X: Copy + Neg<Output = X>> Neg for V3<X> {
    type Output = V3<X>;

    #[inline]
    fn neg(self) -> V3<X>
    { self.map(|x| -x) }
}

impl<'a, X: Copy + Neg<Output = X>> Neg for &'a V3<X> {
    type Output = V3<X>;

    #[inline]
    fn neg(self) -> V3<X>
    { (*self).neg() }
}

// ---------------------------------------------------------------------------
// scalar ops (f64 only; this crate has no use for generic scalars here)

impl Mul<f64> for V3<f64> {
    type Output = V3;

    #[inline]
    fn mul(self, rhs: f64) -> V3<f64>
    { self.map(|x| x * rhs) }
}

impl Mul<V3<f64>> for f64 {
    type Output = V3;

    #[inline]
    fn mul(self, rhs: V3) -> V3
    { rhs.map(|x| self * x) }
}

impl Div<f64> for V3<f64> {
    type Output = V3;

    #[inline]
    fn div(self, rhs: f64) -> V3
    { self.map(|x| x / rhs) }
}

forward_ref_binop!{[] Mul::mul for V3<f64>, f64 => V3<f64>}
forward_ref_binop!{[] Mul::mul for f64, V3<f64> => V3<f64>}
forward_ref_binop!{[] Div::div for V3<f64>, f64 => V3<f64>}

impl Mul<f64> for M33<f64> {
    type Output = M33;

    #[inline]
    fn mul(self, rhs: f64) -> M33
    { self.map(|x| x * rhs) }
}

impl Div<f64> for M33<f64> {
    type Output = M33;

    #[inline]
    fn div(self, rhs: f64) -> M33
    { self.map(|x| x / rhs) }
}

forward_ref_binop!{[] Mul::mul for M33<f64>, f64 => M33<f64>}
forward_ref_binop!{[] Div::div for M33<f64>, f64 => M33<f64>}

// ---------------------------------------------------------------------------
// elementwise matrix ops

macro_rules! impl_m_elementwise {
    ($Op:ident, $op:ident) => {
        impl<X: Copy + $Op<Output = X>> $Op<M33<X>> for M33<X> {
            type Output = M33<X>;

            #[inline]
            fn $op(self, rhs: M33<X>) -> M33<X>
            { M3([self[0].$op(rhs[0]), self[1].$op(rhs[1]), self[2].$op(rhs[2])]) }
        }

        forward_ref_binop!{
            [X: Copy + $Op<Output = X>] $Op::$op
            for M33<X>, M33<X> => M33<X>
        }
    };
}

impl_m_elementwise!{Add, add}
impl_m_elementwise!{Sub, sub}

impl<X: Copy + Add<Output = X>> AddAssign<M33<X>> for M33<X> {
    #[inline]
    fn add_assign(&mut self, rhs: M33<X>)
    { *self = *self + rhs; }
}

impl<X: Copy + Neg<Output = X>> Neg for M33<X> {
    type Output = M33<X>;

    #[inline]
    fn neg(self) -> M33<X>
    { self.map(|x| -x) }
}

impl<'a, X: Copy + Neg<Output = X>> Neg for &'a M33<X> {
    type Output = M33<X>;

    #[inline]
    fn neg(self) -> M33<X>
    { (*self).neg() }
}

// ---------------------------------------------------------------------------
// products

/// row vector times matrix
impl<X> Mul<M33<X>> for V3<X>
where X: Copy + Add<Output = X> + Mul<Output = X>,
{
    type Output = V3<X>;

    #[inline]
    fn mul(self, rhs: M33<X>) -> V3<X>
    { V3::from_fn(|c| {
        self[0] * rhs[0][c] + self[1] * rhs[1][c] + self[2] * rhs[2][c]
    })}
}

/// matrix times column vector
impl<X> Mul<V3<X>> for M33<X>
where X: Copy + Add<Output = X> + Mul<Output = X>,
{
    type Output = V3<X>;

    #[inline]
    fn mul(self, rhs: V3<X>) -> V3<X>
    { V3::from_fn(|r| dot(&self[r], &rhs)) }
}

/// matrix product
impl<X> Mul<M33<X>> for M33<X>
where X: Copy + Add<Output = X> + Mul<Output = X>,
{
    type Output = M33<X>;

    #[inline]
    fn mul(self, rhs: M33<X>) -> M33<X>
    { M33::from_fn(|r, c| {
        self[r][0] * rhs[0][c] + self[r][1] * rhs[1][c] + self[r][2] * rhs[2][c]
    })}
}

forward_ref_binop!{
    [X: Copy + Add<Output = X> + Mul<Output = X>] Mul::mul
    for V3<X>, M33<X> => V3<X>
}
forward_ref_binop!{
    [X: Copy + Add<Output = X> + Mul<Output = X>] Mul::mul
    for M33<X>, V3<X> => V3<X>
}
forward_ref_binop!{
    [X: Copy + Add<Output = X> + Mul<Output = X>] Mul::mul
    for M33<X>, M33<X> => M33<X>
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use crate::methods::{inv, mat};
    use crate::types::{V3, M33};

    #[test]
    fn row_and_column_products_are_transposes() {
        let m = mat::from_array([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let v = V3([1.0, -1.0, 2.0]);
        assert_eq!(v * &m, m.t() * v);
        assert_eq!(&m * v, v * m.t());
    }

    #[test]
    fn matmul_against_inverse() {
        let m = mat::from_array([
            [ 3.0, 1.0, 0.0],
            [-1.0, 2.0, 2.0],
            [ 0.0, 0.5, 1.0],
        ]);
        let prod = &m * &inv(&m);
        let eye = M33::eye();
        for (row, expected) in izip_rows(&prod, &eye) {
            for (x, e) in row.iter().zip(expected) {
                assert!((x - e).abs() < 1e-12);
            }
        }
    }

    fn izip_rows<'a>(a: &'a M33, b: &'a M33)
    -> impl Iterator<Item = (&'a V3, &'a V3)>
    { a.iter().zip(b.iter()) }

    #[test]
    fn vector_arithmetic() {
        let a = V3([1.0, 2.0, 3.0]);
        let b = V3([0.5, 0.5, 0.5]);
        assert_eq!(a + b, V3([1.5, 2.5, 3.5]));
        assert_eq!(&a - &b, V3([0.5, 1.5, 2.5]));
        assert_eq!(-a, V3([-1.0, -2.0, -3.0]));
        assert_eq!(a * 2.0, V3([2.0, 4.0, 6.0]));
        assert_eq!(a / 2.0, V3([0.5, 1.0, 1.5]));
        assert_eq!(a.sqnorm(), 14.0);
    }
}
