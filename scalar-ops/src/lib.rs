#![allow(clippy::needless_range_loop)]

//! Scalar reference kernels for ml-prims.
//!
//! Straight single-threaded index loops, one module per element type. These
//! are the golden reference for the parallel kernels in `ml_prims`:
//! integration tests compare the two bit-for-bit.
//!
//! The loops deliberately mirror the per-element formulation of each
//! operation, e.g. [`f32_ops::ratio`] recomputes the full sum for every output
//! element rather than hoisting it.

/// Generates the reference kernels for one float type.
macro_rules! define_reference_ops {
    ($module_name:ident, $elem:ident) => {
        pub mod $module_name {
            /// `out[i] = x[i] * x[i] * scalar`
            pub fn power(x: &[$elem], out: &mut [$elem], scalar: $elem) {
                for i in 0..x.len() {
                    out[i] = x[i] * x[i] * scalar;
                }
            }

            /// `out[i] = sqrt(x[i] * scalar)`, `0` for negative sources when `clamp_negative`.
            pub fn sqrt_scaled(x: &[$elem], out: &mut [$elem], scalar: $elem, clamp_negative: bool) {
                for i in 0..x.len() {
                    if clamp_negative && x[i] < 0.0 {
                        out[i] = 0.0;
                    } else {
                        out[i] = (x[i] * scalar).sqrt();
                    }
                }
            }

            /// `x[i] = scalar / x[i]`, `0` for `x[i] <= threshold` when `clamp_small`.
            pub fn reciprocal_inplace(x: &mut [$elem], scalar: $elem, clamp_small: bool, threshold: $elem) {
                for i in 0..x.len() {
                    if clamp_small && x[i] <= threshold {
                        x[i] = 0.0;
                    } else {
                        x[i] = scalar / x[i];
                    }
                }
            }

            /// `x[i] = 0` where `x[i] <= threshold`.
            pub fn set_small_values_zero(x: &mut [$elem], threshold: $elem) {
                for i in 0..x.len() {
                    if x[i] <= threshold {
                        x[i] = 0.0;
                    }
                }
            }

            /// `out[i] = x[i] / sum(x)`; `out` untouched when the sum is zero.
            ///
            /// O(n^2): every element recomputes the sum.
            pub fn ratio(x: &[$elem], out: &mut [$elem]) {
                let n = x.len();
                for idx in 0..n {
                    let mut total: $elem = 0.0;
                    for i in 0..n {
                        total += x[i];
                    }
                    if total != 0.0 {
                        out[idx] = x[idx] / total;
                    }
                }
            }

            /// [`ratio`] with the sum taken once up front, still accumulated in
            /// index order. Linear, so usable on large buffers.
            pub fn ratio_single_sum(x: &[$elem], out: &mut [$elem]) {
                let mut total: $elem = 0.0;
                for i in 0..x.len() {
                    total += x[i];
                }
                if total == 0.0 {
                    return;
                }
                for i in 0..x.len() {
                    out[i] = x[i] / total;
                }
            }

            /// Column-major sign flip.
            pub fn sign_flip(x: &mut [$elem], n_rows: usize, n_cols: usize) {
                for col in 0..n_cols {
                    let start = col * n_rows;
                    let end = start + n_rows;

                    let mut max: $elem = 0.0;
                    let mut max_index = start;
                    for i in start..end {
                        let mut val = x[i];
                        if val < 0.0 {
                            val = -val;
                        }
                        if val > max {
                            max = val;
                            max_index = i;
                        }
                    }

                    if n_rows > 0 && x[max_index] < 0.0 {
                        for i in start..end {
                            x[i] = -x[i];
                        }
                    }
                }
            }

            /// `x[idx] = op(x[idx], v[col(idx)])` with the column taken from the layout.
            pub fn matrix_vector_op<F: Fn($elem, $elem) -> $elem>(
                x: &mut [$elem],
                v: &[$elem],
                n_rows: usize,
                n_cols: usize,
                row_major: bool,
                op: F,
            ) {
                for idx in 0..n_rows * n_cols {
                    let col = if row_major { idx % n_cols } else { idx / n_rows };
                    x[idx] = op(x[idx], v[col]);
                }
            }
        }
    };
}

define_reference_ops!(f32_ops, f32);
define_reference_ops!(f64_ops, f64);
