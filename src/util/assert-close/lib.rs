//! `assert_close!`, a float comparison assertion with `abs=`/`rel=`
//! tolerance options.  Intended for use in tests.

#[macro_use]
extern crate failure;
extern crate fcfit_array_types;

use fcfit_array_types::{V3, M3};
use std::fmt;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    (abs=$abs:expr, rel=$rel:expr, $a:expr, $b:expr $(,)*) => {
        $crate::assert_close_with(&$a, &$b, $crate::Tolerances { abs: $abs, rel: $rel })
    };
    (rel=$rel:expr, abs=$abs:expr, $a:expr, $b:expr $(,)*) => {
        $crate::assert_close_with(&$a, &$b, $crate::Tolerances { abs: $abs, rel: $rel })
    };
    (abs=$abs:expr, $a:expr, $b:expr $(,)*) => {
        $crate::assert_close_with(&$a, &$b, $crate::Tolerances {
            abs: $abs,
            rel: $crate::DEFAULT_NONZERO_TOL,
        })
    };
    (rel=$rel:expr, $a:expr, $b:expr $(,)*) => {
        $crate::assert_close_with(&$a, &$b, $crate::Tolerances { abs: 0.0, rel: $rel })
    };
    ($a:expr, $b:expr $(,)*) => {
        $crate::assert_close_with(&$a, &$b, $crate::Tolerances {
            abs: 0.0,
            rel: $crate::DEFAULT_NONZERO_TOL,
        })
    };
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
pub fn assert_close_with<A, B>(a: &A, b: &B, tol: Tolerances)
where
    A: CheckClose<B> + fmt::Debug + ?Sized,
    B: fmt::Debug + ?Sized,
    A::Scalar: fmt::Debug,
{
    if let Err(e) = a.check_close(b, tol) {
        panic!(
            "not nearly equal! (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
            tol.rel, tol.abs, a, b, e,
        );
    }
}

#[doc(hidden)]
#[inline]
pub fn __is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    // Implementation from Python 3.5.
    // https://hg.python.org/cpython/file/tip/Modules/mathmodule.c#l1993
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // catch infinities of same sign
    if a == b { return true; }

    // catch infinities of opposite sign, avoiding infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    // case for general values and NaN.
    (a - b).abs() < abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone)]
pub struct Tolerances<T = f64> {
    pub abs: T,
    pub rel: T,
}

#[derive(Debug)]
pub struct CheckCloseError<T = f64> {
    pub values: (T, T),
    pub tol: Tolerances<T>,
}

impl<T: fmt::Debug + Send + Sync + 'static> failure::Fail for CheckCloseError<T> {}

impl<T: fmt::Debug> fmt::Display for CheckCloseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ref left, ref right) = self.values;
        write!(f, "failed at:
  left: {:?}
 right: {:?}
   tol: {:?}", left, right, self.tol)
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    type Scalar;

    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>;
}

impl CheckClose for f64 {
    type Scalar = f64;

    #[inline]
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    {
        if __is_close(*self, *other, tol) {
            Ok(())
        } else {
            Err(CheckCloseError {
                values: (*self, *other),
                tol,
            })
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { CheckClose::check_close(*self, *other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    {
        assert_eq!(self.len(), other.len());
        self.iter().zip(other)
            .map(|(a, b)| a.check_close(b, tol))
            .collect()
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { (&self[..]).check_close(&other[..], tol) }
}

macro_rules! gen_array_impls {
    ($($n:tt)*) => {
        $(
        impl<T: CheckClose> CheckClose for [T; $n] {
            type Scalar = T::Scalar;

            fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
            { (&self[..]).check_close(&other[..], tol) }
        }
        )*
    };
}

gen_array_impls! { 1 2 3 4 6 9 16 }

impl<T: CheckClose> CheckClose for V3<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { (&self[..]).check_close(&other[..], tol) }
}

impl<V: CheckClose> CheckClose for M3<V> {
    type Scalar = V::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { (&self[..]).check_close(&other[..], tol) }
}
