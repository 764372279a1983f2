//! Numerical stability of the decomposition post-processing kernels.
//!
//! These tests verify that:
//! 1. Ratio stays normalized over long inputs and reduced-precision types
//! 2. Clamped sqrt / reciprocal never produce NaN or Inf on rank-deficient spectra
//! 3. Sign flip keeps magnitudes exact on large eigenvector matrices
//! 4. A whitening pipeline survives zero-variance components

use half::{bf16, f16};
use ml_prims::{
    matrix_vector_binary_div_skip_zero, max_abs_index, ratio, reciprocal_inplace,
    set_small_values_zero_by_vector, sign_flip, sqrt_scaled, KernelFloat, Layout,
    ReciprocalConfig, SqrtConfig,
};

/// Generate deterministic test data.
fn generate_values(n: usize, seed: u64, scale: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(n);
    let mut state = seed;
    for _ in 0..n {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let val = ((state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0;
        data.push(val * scale);
    }
    data
}

fn assert_all_finite<T: KernelFloat>(data: &[T], what: &str) {
    for (i, v) in data.iter().enumerate() {
        let x = v.to_f64();
        assert!(x.is_finite(), "{what}: non-finite value {x} at {i}");
    }
}

// =============================================================================
// Ratio
// =============================================================================

/// One million equal shares, each exactly 1e-6 of the total.
#[test]
fn test_ratio_long_uniform_input() {
    let n = 1_000_000;
    let input = vec![1.0f64; n];
    let mut output = vec![0.0f64; n];
    ratio(&input, &mut output);
    assert!(output.iter().all(|&v| v == 1e-6));

    let input = vec![1.0f32; n];
    let mut output = vec![0.0f32; n];
    ratio(&input, &mut output);
    assert!(output.iter().all(|&v| v == 1.0 / 1_000_000.0));
}

/// Decaying spectrum: ratios stay ordered and sum to one.
#[test]
fn test_ratio_decaying_spectrum() {
    let n = 4096;
    let spectrum: Vec<f64> = (0..n).map(|i| (-(i as f64) / 50.0).exp()).collect();
    let mut output = vec![0.0f64; n];
    ratio(&spectrum, &mut output);

    assert_all_finite(&output, "ratio");
    let total: f64 = output.iter().sum();
    assert!((total - 1.0).abs() < 1e-12, "ratio total = {}", total);
    for w in output.windows(2) {
        assert!(w[0] >= w[1], "ratio lost ordering: {} < {}", w[0], w[1]);
    }
}

/// Cancelling input: zero total, destination untouched and no NaN written.
#[test]
fn test_ratio_zero_total_leaves_output() {
    let _ = env_logger::builder().is_test(true).try_init();
    let input: Vec<f64> = generate_values(2048, 3, 10.0)
        .into_iter()
        .flat_map(|v| [v, -v])
        .collect();
    let mut output = vec![7.0f64; input.len()];
    ratio(&input, &mut output);
    assert!(output.iter().all(|&v| v == 7.0));
}

/// Values near the top of the f64 range do not overflow the total.
#[test]
fn test_ratio_large_magnitudes() {
    let input = [4e300f64, 3e300, 1e300];
    let mut output = [0.0f64; 3];
    ratio(&input, &mut output);
    assert_all_finite(&output, "ratio large");
    assert!((output[0] - 0.5).abs() < 1e-15);
    assert!((output[2] - 0.125).abs() < 1e-15);
}

/// Half-precision ratio stays within the type's resolution.
#[test]
fn test_ratio_half_precision() {
    let input: Vec<f16> = [6.0f32, 3.0, 1.0].iter().map(|&v| f16::from_f32(v)).collect();
    let mut output = vec![f16::from_f32(0.0); 3];
    ratio(&input, &mut output);
    for (o, e) in output.iter().zip([0.6f32, 0.3, 0.1]) {
        assert!((o.to_f32() - e).abs() < 1e-3, "f16 ratio {} vs {}", o.to_f32(), e);
    }

    let input: Vec<bf16> = [6.0f32, 3.0, 1.0].iter().map(|&v| bf16::from_f32(v)).collect();
    let mut output = vec![bf16::from_f32(0.0); 3];
    ratio(&input, &mut output);
    for (o, e) in output.iter().zip([0.6f32, 0.3, 0.1]) {
        assert!((o.to_f32() - e).abs() < 1e-2, "bf16 ratio {} vs {}", o.to_f32(), e);
    }
}

// =============================================================================
// Rank-deficient spectra
// =============================================================================

/// Eigenvalues that round to tiny negatives become zero singular values.
#[test]
fn test_sqrt_clamp_on_roundoff_negatives() {
    let eigenvalues = [9.0f64, 4.0, 1e-18, -1e-17, -3e-16];
    let mut singular = [f64::NAN; 5];
    sqrt_scaled(
        &eigenvalues,
        &mut singular,
        SqrtConfig::default().clamp_negative(true),
    );
    assert_all_finite(&singular, "sqrt_scaled");
    assert_eq!(singular[0], 3.0);
    assert_eq!(singular[1], 2.0);
    assert_eq!(&singular[3..], &[0.0, 0.0]);
}

/// Pseudo-inverse of singular values: tiny entries map to zero, not Inf.
#[test]
fn test_reciprocal_clamp_rank_deficient() {
    let mut singular: Vec<f64> = (0..1000)
        .map(|i| if i % 10 == 0 { 0.0 } else { 1.0 / (i as f64) })
        .collect();
    singular.push(1e-16);
    singular.push(-0.0);

    reciprocal_inplace(&mut singular, ReciprocalConfig::default().clamped(1e-15));
    assert_all_finite(&singular, "reciprocal");
    for (i, v) in singular.iter().take(1000).enumerate() {
        let expected = if i % 10 == 0 { 0.0 } else { 1.0 / (1.0 / (i as f64)) };
        assert_eq!(*v, expected, "index {i}");
    }
    assert_eq!(singular[1000], 0.0);
    assert_eq!(singular[1001], 0.0);
}

// =============================================================================
// Sign flip
// =============================================================================

/// Large column-major matrix: magnitudes untouched, every pivot non-negative.
#[test]
fn test_sign_flip_large_matrix() {
    let n_rows = 1000;
    let n_cols = 50;
    let original = generate_values(n_rows * n_cols, 42, 1.0);
    let mut data: Vec<f32> = original.iter().map(|&v| v as f32).collect();
    let before = data.clone();

    sign_flip(&mut data, n_rows, n_cols);

    assert_all_finite(&data, "sign_flip");
    for (a, b) in data.iter().zip(before.iter()) {
        assert_eq!(a.abs(), b.abs());
    }
    for col in data.chunks(n_rows) {
        assert!(col[max_abs_index(col)] >= 0.0);
    }
}

/// bf16 columns flip on the same pivot as their f32 counterparts.
#[test]
fn test_sign_flip_bf16_agrees_with_f32() {
    let n_rows = 8;
    let n_cols = 6;
    let source: Vec<f32> = generate_values(n_rows * n_cols, 7, 2.0)
        .into_iter()
        .map(|v| bf16::from_f64(v).to_f32())
        .collect();

    let mut wide = source.clone();
    sign_flip(&mut wide, n_rows, n_cols);

    let mut narrow: Vec<bf16> = source.iter().map(|&v| bf16::from_f32(v)).collect();
    sign_flip(&mut narrow, n_rows, n_cols);

    for (n, w) in narrow.iter().zip(wide.iter()) {
        assert_eq!(n.to_f32(), *w);
    }
}

// =============================================================================
// Whitening pipeline
// =============================================================================

/// components / sqrt(explained_var) with zero-variance columns dropped.
#[test]
fn test_whitening_with_zero_variance_components() {
    let n_rows = 16;
    let n_cols = 4;
    let mut components = generate_values(n_rows * n_cols, 99, 1.0);
    let explained_var = [4.0f64, 1.0, 0.0, 1e-12];

    let mut scale = [0.0f64; 4];
    sqrt_scaled(&explained_var, &mut scale, SqrtConfig::default());

    set_small_values_zero_by_vector(&mut components, &explained_var, n_rows, n_cols);
    matrix_vector_binary_div_skip_zero(
        &mut components,
        &scale,
        n_rows,
        n_cols,
        Layout::ColMajor,
        true,
    );

    assert_all_finite(&components, "whitening");
    let cols: Vec<&[f64]> = components.chunks(n_rows).collect();
    assert!(cols[2].iter().all(|&v| v == 0.0));
    assert!(cols[3].iter().all(|&v| v == 0.0));
    assert!(cols[0].iter().any(|&v| v != 0.0));
}
