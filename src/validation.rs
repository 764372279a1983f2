//! Shape validation for the checked (`try_*`) entry points.
//!
//! Checks return `Result<(), String>` so each caller can map the message
//! into its own error variant; the typed helpers at the bottom do that for
//! [`PrimsError`].

use crate::error::{PrimsError, PrimsResult};

/// Validate matrix dimensions and that `n_rows * n_cols` does not overflow.
///
/// # Returns
/// - `Ok(len)` with the element count of the matrix
/// - `Err(String)` describing the validation failure
#[inline]
pub fn validate_matrix_dims(n_rows: usize, n_cols: usize) -> Result<usize, String> {
    if n_rows == 0 || n_cols == 0 {
        return Err(format!(
            "matrix dimensions must be > 0 (n_rows={}, n_cols={})",
            n_rows, n_cols
        ));
    }
    n_rows
        .checked_mul(n_cols)
        .ok_or_else(|| format!("n_rows * n_cols overflows ({} x {})", n_rows, n_cols))
}

/// Validate a matrix buffer and its broadcast vector.
///
/// Both layouts read one vector entry per column (row-major indexes
/// `idx % n_cols`, column-major indexes `idx / n_rows`), so the vector needs
/// at least `n_cols` entries.
pub fn check_matrix_vector(
    data_len: usize,
    vec_len: usize,
    n_rows: usize,
    n_cols: usize,
) -> PrimsResult<()> {
    let len = validate_matrix_dims(n_rows, n_cols).map_err(PrimsError::InvalidDimension)?;
    if data_len != len {
        return Err(PrimsError::LengthMismatch {
            expected: len,
            actual: data_len,
        });
    }
    if vec_len < n_cols {
        return Err(PrimsError::VectorLength {
            expected: n_cols,
            actual: vec_len,
        });
    }
    Ok(())
}

/// Validate a column-major matrix buffer.
pub fn check_matrix(data_len: usize, n_rows: usize, n_cols: usize) -> PrimsResult<()> {
    let len = validate_matrix_dims(n_rows, n_cols).map_err(PrimsError::InvalidDimension)?;
    if data_len != len {
        return Err(PrimsError::LengthMismatch {
            expected: len,
            actual: data_len,
        });
    }
    Ok(())
}

/// Validate an out-of-place element-wise call.
pub fn check_same_len(src_len: usize, dst_len: usize) -> PrimsResult<()> {
    if src_len != dst_len {
        return Err(PrimsError::LengthMismatch {
            expected: src_len,
            actual: dst_len,
        });
    }
    Ok(())
}
