/* ************************************************************************ **
** This file is part of fcfit, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense least-squares primitives for the fitting engines.
//!
//! The design and observation matrices here are small (their row count is
//! `measurements x site operations`, their width 3 or 16) but of dynamic
//! size, so they live in `nalgebra`'s heap-backed `DMatrix`.

#[macro_use]
extern crate failure;
extern crate nalgebra;
#[cfg(test)]
#[macro_use]
extern crate fcfit_assert_close;
#[cfg(test)]
extern crate rand;

use failure::Error;

pub use nalgebra::DMatrix;

/// Compute the left Moore-Penrose pseudo-inverse of a real matrix.
///
/// Singular values below `max(rows, cols) * machine epsilon * sigma_max`
/// are treated as zero.  In particular, a rank-deficient matrix does not
/// produce an error here; downstream solves quietly degrade to the
/// minimum-norm solution.  Callers that need to trust the result for a
/// poorly-spanned problem must check the design matrix themselves.
pub fn left_pseudoinverse(mat: DMatrix<f64>) -> Result<DMatrix<f64>, Error>
{
    let (rows, cols) = mat.shape();
    let svd = mat.svd(true, true);
    let sigma_max = svd.singular_values.iter().cloned().fold(0.0, f64::max);
    let cutoff = usize::max(rows, cols) as f64 * std::f64::EPSILON * sigma_max;
    svd.pseudo_inverse(cutoff)
        .map_err(|message| format_err!("pseudoinverse failed: {}", message))
}

#[test]
fn test_pseudoinverse() {
    use rand::Rng;

    for _ in 0..100 {
        let mut rng = rand::thread_rng();
        // Produce an overdetermined or well-determined problem to solve.
        let r = rng.gen_range(1, 20);
        let c = rng.gen_range(1, r + 1);

        let mat = DMatrix::from_fn(r, c, |_, _| 1.0 - 2.0 * rng.gen::<f64>());
        let p_inv = match left_pseudoinverse(mat.clone()) {
            Ok(inv) => inv,
            Err(e) => panic!("SVD failure for size {:?}: {}", (r, c), e),
        };
        let prod = &p_inv * &mat;
        let eye = DMatrix::<f64>::identity(c, c);
        assert_close!(abs=1e-8, prod.as_slice(), eye.as_slice());
    }
}

#[test]
fn minimum_norm_for_rank_deficient_input() {
    // one informative row; the pseudo-inverse must send the unseen
    // directions to zero rather than complain
    let mat = DMatrix::from_row_slice(1, 3, &[2.0, 0.0, 0.0]);
    let p_inv = left_pseudoinverse(mat).unwrap();
    assert_close!(abs=1e-12, p_inv.as_slice(), [0.5, 0.0, 0.0].as_ref());
}
