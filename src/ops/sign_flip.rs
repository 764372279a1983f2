//! Sign stabilization for column-major eigenvector / singular-vector matrices.
//!
//! Decompositions return each vector only up to sign. Flipping every column so
//! that its largest-magnitude entry is non-negative makes repeated runs agree.

use crate::error::PrimsResult;
use crate::kernel_types::KernelFloat;
use crate::parallel::for_each_run_mut;
use crate::validation::check_matrix;

/// Index of the largest-magnitude entry of `column`.
///
/// The scan starts from a maximum of zero and only moves on a strictly larger
/// magnitude, so the first occurrence wins ties, NaN never wins, and an
/// all-zero column yields `0`.
#[inline]
pub fn max_abs_index<T: KernelFloat>(column: &[T]) -> usize {
    let mut max = T::zero();
    let mut max_index = 0;
    for (i, &v) in column.iter().enumerate() {
        let mag = v.abs();
        if mag > max {
            max = mag;
            max_index = i;
        }
    }
    max_index
}

/// Negate `column` if its largest-magnitude entry is negative.
///
/// Returns `true` if the column was flipped.
#[inline]
pub fn sign_flip_column<T: KernelFloat>(column: &mut [T]) -> bool {
    let Some(&pivot) = column.get(max_abs_index(column)) else {
        return false;
    };
    if pivot < T::zero() {
        for x in column.iter_mut() {
            *x = -*x;
        }
        true
    } else {
        false
    }
}

/// Flip the sign of each column of a column-major `n_rows x n_cols` matrix so
/// that the entry with the largest absolute value is non-negative.
///
/// Columns are processed independently and in parallel. Applying the flip
/// twice is a no-op.
pub fn sign_flip<T: KernelFloat>(data: &mut [T], n_rows: usize, n_cols: usize) {
    let len = n_rows * n_cols;
    debug_assert!(data.len() >= len);
    if len == 0 {
        return;
    }
    for_each_run_mut(&mut data[..len], n_rows, |_, column| {
        sign_flip_column(column);
    });
}

/// Checked [`sign_flip`]: `data` must hold exactly `n_rows * n_cols` values.
pub fn try_sign_flip<T: KernelFloat>(data: &mut [T], n_rows: usize, n_cols: usize) -> PrimsResult<()> {
    check_matrix(data.len(), n_rows, n_cols)?;
    sign_flip(data, n_rows, n_cols);
    Ok(())
}
