//! ml-prims: element-wise and matrix-vector primitives for ML building blocks.
//!
//! Stateless numeric kernels over caller-owned flat buffers, used by
//! decomposition code such as PCA and truncated SVD:
//! - **Element-wise**: square-and-scale, scaled square root, reciprocal,
//!   small-value zeroing, ratio-to-sum
//! - **Sign flip**: per-column sign stabilization of eigenvector matrices
//! - **Broadcast**: matrix-vector multiply/divide/add/subtract with
//!   skip-zero guards, plus an injectable combine rule
//!
//! Every kernel is generic over [`KernelFloat`] (f32, f64, half::f16,
//! half::bf16) and runs as a data-parallel map on the rayon pool once the
//! buffer is large enough (see [`parallel`]).
//!
//! # Quick Start
//!
//! ```
//! use ml_prims::{ratio, sign_flip, ReciprocalConfig, reciprocal_inplace};
//!
//! let explained_var = vec![6.0f64, 3.0, 1.0];
//! let mut explained_ratio = vec![0.0; 3];
//! ratio(&explained_var, &mut explained_ratio);
//! assert_eq!(explained_ratio, vec![0.6, 0.3, 0.1]);
//!
//! // 2 x 2 column-major components
//! let mut components = vec![0.6f64, -0.8, -0.8, -0.6];
//! sign_flip(&mut components, 2, 2);
//! assert_eq!(components, vec![-0.6, 0.8, 0.8, 0.6]);
//!
//! let mut singular = vec![2.0f64, 0.0];
//! reciprocal_inplace(&mut singular, ReciprocalConfig::default().clamped(1e-15));
//! assert_eq!(singular, vec![0.5, 0.0]);
//! ```

pub mod error;
pub mod kernel_types;
pub mod ops;
pub mod parallel;
pub mod validation;

pub use error::{PrimsError, PrimsResult};
pub use kernel_types::{
    KernelFloat, Layout, ReciprocalConfig, SqrtConfig, DEFAULT_SMALL_THRESHOLD,
    SKIP_ZERO_THRESHOLD,
};
pub use parallel::ParallelConfig;

// Element-wise exports
pub use ops::elementwise::{
    ordered_sum, power, power_inplace, ratio, reciprocal, reciprocal_inplace,
    set_small_values_zero, set_small_values_zero_default, sqrt_scaled, sqrt_scaled_inplace,
    try_power, try_ratio, try_reciprocal, try_sqrt_scaled,
};

// Sign flip exports
pub use ops::sign_flip::{max_abs_index, sign_flip, sign_flip_column, try_sign_flip};

// Broadcast exports
pub use ops::matrix_vector::{
    matrix_vector_binary_add, matrix_vector_binary_div, matrix_vector_binary_div_skip_zero,
    matrix_vector_binary_mult, matrix_vector_binary_mult_skip_zero, matrix_vector_binary_op,
    matrix_vector_binary_sub, matrix_vector_op, set_small_values_zero_by_vector,
    try_matrix_vector_binary_op, try_matrix_vector_op, BinaryOp,
};
