//! Matrix factorizations.
//!
//! Currently just the Cholesky decomposition used to impose a correlation
//! structure on independent normal draws.

use crate::matrix::Matrix;
use qf_core::{ensure, errors::Result, Real};

/// Relative tolerance for the symmetry precheck.
const SYMMETRY_TOL: Real = 1.0e-12;

/// Cholesky decomposition of a symmetric positive-definite matrix.
///
/// Returns the lower-triangular factor `L` such that `A = L · Lᵀ`. The
/// input is left untouched.
///
/// The factorization proceeds column by column: the diagonal entry is
/// `sqrt(a[j][j] − Σ_k L[j][k]²)` and the sub-diagonal entries are
/// `(a[i][j] − Σ_k L[i][k]·L[j][k]) / L[j][j]`. A pivot that is not
/// strictly positive means the matrix is not positive-definite and the
/// factorization fails with [`qf_core::Error::Numerical`]; near-singular
/// correlation matrices must be repaired (e.g. by spectral truncation)
/// before being passed here.
pub fn cholesky(a: &Matrix) -> Result<Matrix> {
    ensure!(a.is_square(), InvalidArgument, "matrix must be square, got {}×{}", a.rows(), a.cols());
    let n = a.rows();

    let scale = (0..n).map(|i| a[(i, i)].abs()).fold(1.0_f64, Real::max);
    for i in 0..n {
        for j in (i + 1)..n {
            ensure!(
                (a[(i, j)] - a[(j, i)]).abs() <= SYMMETRY_TOL * scale,
                InvalidArgument,
                "matrix is not symmetric at ({i},{j}): {} vs {}",
                a[(i, j)],
                a[(j, i)]
            );
        }
    }

    let mut l = Matrix::zeros(n, n);
    for j in 0..n {
        let mut diag = a[(j, j)];
        for k in 0..j {
            diag -= l[(j, k)] * l[(j, k)];
        }
        ensure!(
            diag > 0.0,
            Numerical,
            "matrix is not positive definite (pivot {diag:e} at column {j})"
        );
        l[(j, j)] = diag.sqrt();

        for i in (j + 1)..n {
            let mut off = a[(i, j)];
            for k in 0..j {
                off -= l[(i, k)] * l[(j, k)];
            }
            l[(i, j)] = off / l[(j, j)];
        }
    }
    Ok(l)
}
