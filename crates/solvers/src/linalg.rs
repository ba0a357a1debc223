//! Dense linear algebra the solvers need beyond `ndarray` arithmetic.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Solves `a x = b` by LU decomposition with partial pivoting.
///
/// Returns `None` if `a` is not square, the sizes disagree, the matrix is
/// singular, or the solution is not finite.
pub(crate) fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    if a.nrows() != n || a.ncols() != n {
        return None;
    }

    let matrix = DMatrix::from_fn(n, n, |i, j| a[[i, j]]);
    let rhs = DVector::from_iterator(n, b.iter().copied());
    let solution = matrix.lu().solve(&rhs)?;

    if solution.iter().all(|v| v.is_finite()) {
        Some(Array1::from_iter(solution.iter().copied()))
    } else {
        None
    }
}

/// Returns the outer product `u vᵀ`.
pub(crate) fn outer(u: ArrayView1<'_, f64>, v: ArrayView1<'_, f64>) -> Array2<f64> {
    let column = u.insert_axis(Axis(1));
    let row = v.insert_axis(Axis(0));
    column.dot(&row)
}

/// Returns `a + shift * I`.
pub(crate) fn shift_diagonal(a: &Array2<f64>, shift: f64) -> Array2<f64> {
    let mut shifted = a.clone();
    shifted.diag_mut().mapv_inplace(|d| d + shift);
    shifted
}
