#![allow(dead_code)]

use rand::Rng;

/// Bytes touched by an in-place element-wise kernel (read + write).
pub fn inplace_rw_bytes(n: usize, elem_size: usize) -> u64 {
    2 * n as u64 * elem_size as u64
}

/// Bytes touched by an out-of-place element-wise kernel (input + output).
pub fn elementwise_rw_bytes(n: usize, elem_size: usize) -> u64 {
    2 * n as u64 * elem_size as u64
}

/// Bytes touched by a broadcast op: matrix read + write, vector read once.
pub fn broadcast_rw_bytes(n_rows: usize, n_cols: usize, elem_size: usize) -> u64 {
    (2 * n_rows as u64 * n_cols as u64 + n_cols as u64) * elem_size as u64
}

/// Random f32 values in [-1.0, 1.0).
pub fn random_f32_vec(n: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Random f64 values in [-1.0, 1.0).
pub fn random_f64_vec(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Random positive f64 values in [lo, hi), e.g. a variance spectrum.
pub fn random_positive_f64_vec(n: usize, lo: f64, hi: f64) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(lo..hi)).collect()
}
