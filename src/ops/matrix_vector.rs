//! Matrix-vector broadcast operators.
//!
//! [`matrix_vector_op`] combines every entry of a flat `n_rows x n_cols`
//! matrix with one entry of a vector, in place:
//!
//! ```text
//! RowMajor: data[idx] = op(data[idx], vec[idx % n_cols])
//! ColMajor: data[idx] = op(data[idx], vec[idx / n_rows])
//! ```
//!
//! Either way the vector holds one value per column and is broadcast down
//! the rows. The named operators below are thin wrappers choosing `op`.
//!
//! # Example
//!
//! ```
//! use ml_prims::{matrix_vector_binary_mult, Layout};
//!
//! // 2 x 2 column-major matrix [1, 2 | 3, 4]
//! let mut data = vec![1.0f32, 2.0, 3.0, 4.0];
//! matrix_vector_binary_mult(&mut data, &[1.0, 2.0], 2, 2, Layout::ColMajor);
//! assert_eq!(data, vec![1.0, 2.0, 6.0, 8.0]);
//! ```

use crate::error::PrimsResult;
use crate::kernel_types::{KernelFloat, Layout, SKIP_ZERO_THRESHOLD};
use crate::parallel::for_each_run_mut;
use crate::validation::check_matrix_vector;

/// Built-in combine rules for the broadcast operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `a * b`
    Mult,
    /// `a` when `b == 0`, else `a * b`
    MultSkipZero,
    /// `a / b`, unguarded
    Div,
    /// `a / b`; when `b < 1e-10` the result is `0` if `return_zero`, else `a`
    DivSkipZero { return_zero: bool },
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `0` when `b < 1e-10`, else `a`
    ZeroWhereSmall,
}

impl BinaryOp {
    /// Apply the rule to one matrix entry `a` and its vector entry `b`.
    #[inline(always)]
    pub fn apply<T: KernelFloat>(self, a: T, b: T) -> T {
        match self {
            BinaryOp::Mult => a * b,
            BinaryOp::MultSkipZero => mult_skip_zero(a, b),
            BinaryOp::Div => a / b,
            BinaryOp::DivSkipZero { return_zero } => div_skip_zero(a, b, return_zero),
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::ZeroWhereSmall => zero_where_small(a, b),
        }
    }
}

#[inline(always)]
fn mult_skip_zero<T: KernelFloat>(a: T, b: T) -> T {
    if b == T::zero() {
        a
    } else {
        a * b
    }
}

#[inline(always)]
fn div_skip_zero<T: KernelFloat>(a: T, b: T, return_zero: bool) -> T {
    if b < T::from_f64(SKIP_ZERO_THRESHOLD) {
        if return_zero {
            T::zero()
        } else {
            a
        }
    } else {
        a / b
    }
}

#[inline(always)]
fn zero_where_small<T: KernelFloat>(a: T, b: T) -> T {
    if b < T::from_f64(SKIP_ZERO_THRESHOLD) {
        T::zero()
    } else {
        a
    }
}

/// Broadcast `vec` over the matrix in `data` with an arbitrary combine rule.
///
/// # Arguments
///
/// * `data` - Matrix `[n_rows, n_cols]` in `layout` order, updated in place
/// * `vec` - One value per column (`n_cols` entries)
/// * `n_rows` - Number of rows
/// * `n_cols` - Number of columns
/// * `layout` - Storage order of `data`
/// * `op` - `op(matrix_entry, vector_entry)`
///
/// # Panics
///
/// Panics in debug mode if slice lengths don't match expected sizes. Use
/// [`try_matrix_vector_op`] to get an error instead.
///
/// In release builds a `vec` shorter than `n_cols` is not caught up front:
/// `RowMajor` pairs each row with the available entries and leaves the
/// trailing columns unchanged, while `ColMajor` panics with an index out of
/// bounds on the first column past the end of `vec`.
#[inline]
pub fn matrix_vector_op<T, F>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
    op: F,
) where
    T: KernelFloat,
    F: Fn(T, T) -> T + Sync + Send,
{
    let len = n_rows * n_cols;
    if len == 0 {
        return;
    }
    debug_assert!(data.len() >= len);
    debug_assert!(vec.len() >= n_cols);
    let data = &mut data[..len];
    let run_len = layout.run_len(n_rows, n_cols);

    match layout {
        Layout::RowMajor => for_each_run_mut(data, run_len, |_, row| {
            for (a, &b) in row.iter_mut().zip(vec.iter()) {
                *a = op(*a, b);
            }
        }),
        Layout::ColMajor => for_each_run_mut(data, run_len, |col, column| {
            let b = vec[col];
            for a in column.iter_mut() {
                *a = op(*a, b);
            }
        }),
    }
}

/// Checked [`matrix_vector_op`]: `data` must hold exactly `n_rows * n_cols`
/// values and `vec` at least `n_cols`.
pub fn try_matrix_vector_op<T, F>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
    op: F,
) -> PrimsResult<()>
where
    T: KernelFloat,
    F: Fn(T, T) -> T + Sync + Send,
{
    check_matrix_vector(data.len(), vec.len(), n_rows, n_cols)?;
    matrix_vector_op(data, vec, n_rows, n_cols, layout, op);
    Ok(())
}

/// Broadcast with a built-in rule chosen at runtime.
///
/// Each rule gets its own monomorphized kernel; the match happens once per
/// call, not per element.
pub fn matrix_vector_binary_op<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
    op: BinaryOp,
) {
    match op {
        BinaryOp::Mult => matrix_vector_op(data, vec, n_rows, n_cols, layout, |a, b| a * b),
        BinaryOp::MultSkipZero => {
            matrix_vector_op(data, vec, n_rows, n_cols, layout, mult_skip_zero)
        }
        BinaryOp::Div => matrix_vector_op(data, vec, n_rows, n_cols, layout, |a, b| a / b),
        BinaryOp::DivSkipZero { return_zero: true } => {
            matrix_vector_op(data, vec, n_rows, n_cols, layout, |a, b| div_skip_zero(a, b, true))
        }
        BinaryOp::DivSkipZero { return_zero: false } => {
            matrix_vector_op(data, vec, n_rows, n_cols, layout, |a, b| div_skip_zero(a, b, false))
        }
        BinaryOp::Add => matrix_vector_op(data, vec, n_rows, n_cols, layout, |a, b| a + b),
        BinaryOp::Sub => matrix_vector_op(data, vec, n_rows, n_cols, layout, |a, b| a - b),
        BinaryOp::ZeroWhereSmall => {
            matrix_vector_op(data, vec, n_rows, n_cols, layout, zero_where_small)
        }
    }
}

/// Checked [`matrix_vector_binary_op`].
pub fn try_matrix_vector_binary_op<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
    op: BinaryOp,
) -> PrimsResult<()> {
    check_matrix_vector(data.len(), vec.len(), n_rows, n_cols)?;
    matrix_vector_binary_op(data, vec, n_rows, n_cols, layout, op);
    Ok(())
}

/// `data = data * vec` (broadcast).
#[inline]
pub fn matrix_vector_binary_mult<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
) {
    matrix_vector_binary_op(data, vec, n_rows, n_cols, layout, BinaryOp::Mult);
}

/// `data = data * vec`, except entries paired with an exact zero stay as they are.
#[inline]
pub fn matrix_vector_binary_mult_skip_zero<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
) {
    matrix_vector_binary_op(data, vec, n_rows, n_cols, layout, BinaryOp::MultSkipZero);
}

/// `data = data / vec` (broadcast). Zeros in `vec` give inf/NaN.
#[inline]
pub fn matrix_vector_binary_div<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
) {
    matrix_vector_binary_op(data, vec, n_rows, n_cols, layout, BinaryOp::Div);
}

/// `data = data / vec`, guarded against vector entries below `1e-10`.
///
/// Guarded entries become `0` when `return_zero` is set and are left
/// unchanged otherwise (the usual choice).
#[inline]
pub fn matrix_vector_binary_div_skip_zero<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
    return_zero: bool,
) {
    matrix_vector_binary_op(
        data,
        vec,
        n_rows,
        n_cols,
        layout,
        BinaryOp::DivSkipZero { return_zero },
    );
}

/// `data = data + vec` (broadcast).
#[inline]
pub fn matrix_vector_binary_add<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
) {
    matrix_vector_binary_op(data, vec, n_rows, n_cols, layout, BinaryOp::Add);
}

/// `data = data - vec` (broadcast).
#[inline]
pub fn matrix_vector_binary_sub<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
    layout: Layout,
) {
    matrix_vector_binary_op(data, vec, n_rows, n_cols, layout, BinaryOp::Sub);
}

/// Zero every entry of a column-major matrix whose column value in `vec` is
/// below `1e-10`.
///
/// Used to drop components with vanishing variance after a decomposition.
#[inline]
pub fn set_small_values_zero_by_vector<T: KernelFloat>(
    data: &mut [T],
    vec: &[T],
    n_rows: usize,
    n_cols: usize,
) {
    matrix_vector_binary_op(data, vec, n_rows, n_cols, Layout::ColMajor, BinaryOp::ZeroWhereSmall);
}
