//! Numeric types, matrix layout and per-operation configs shared across ops.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Default threshold below which values are treated as zero by
/// [`set_small_values_zero`](crate::ops::elementwise::set_small_values_zero)
/// and the clamped reciprocal.
///
/// Converted with [`KernelFloat::from_f64`]. `half::f16` cannot represent it
/// and rounds it to `0`, so for that type the guard becomes `x <= 0`.
pub const DEFAULT_SMALL_THRESHOLD: f64 = 1e-15;

/// Near-zero bound used by the vector guards of the broadcast operators.
///
/// `half::f16` cannot represent it and rounds it to `0`, so for that type the
/// guard becomes `b < 0`. `half::bf16` shares the f32 exponent range and
/// keeps both bounds nonzero.
pub const SKIP_ZERO_THRESHOLD: f64 = 1e-10;

/// Trait for kernel-compatible floating point types.
/// Implemented for f32, f64, half::f16 and half::bf16. Zero-cost via monomorphization.
///
/// Arithmetic goes through the std operator traits so every kernel is written
/// once; the half types round through f32 on each operation.
pub trait KernelFloat:
    Copy
    + Default
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;
    fn zero() -> Self;
    fn one() -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
}

impl KernelFloat for f32 {
    #[inline(always)]
    fn to_f64(self) -> f64 { self as f64 }
    #[inline(always)]
    fn from_f64(v: f64) -> Self { v as f32 }
    #[inline(always)]
    fn zero() -> Self { 0.0 }
    #[inline(always)]
    fn one() -> Self { 1.0 }
    #[inline(always)]
    fn sqrt(self) -> Self { f32::sqrt(self) }
    #[inline(always)]
    fn abs(self) -> Self { f32::abs(self) }
}

impl KernelFloat for f64 {
    #[inline(always)]
    fn to_f64(self) -> f64 { self }
    #[inline(always)]
    fn from_f64(v: f64) -> Self { v }
    #[inline(always)]
    fn zero() -> Self { 0.0 }
    #[inline(always)]
    fn one() -> Self { 1.0 }
    #[inline(always)]
    fn sqrt(self) -> Self { f64::sqrt(self) }
    #[inline(always)]
    fn abs(self) -> Self { f64::abs(self) }
}

impl KernelFloat for half::f16 {
    #[inline(always)]
    fn to_f64(self) -> f64 { half::f16::to_f64(self) }
    #[inline(always)]
    fn from_f64(v: f64) -> Self { half::f16::from_f64(v) }
    #[inline(always)]
    fn zero() -> Self { half::f16::ZERO }
    #[inline(always)]
    fn one() -> Self { half::f16::ONE }
    #[inline(always)]
    fn sqrt(self) -> Self { half::f16::from_f32(self.to_f32().sqrt()) }
    #[inline(always)]
    fn abs(self) -> Self { half::f16::from_f32(self.to_f32().abs()) }
}

impl KernelFloat for half::bf16 {
    #[inline(always)]
    fn to_f64(self) -> f64 { half::bf16::to_f64(self) }
    #[inline(always)]
    fn from_f64(v: f64) -> Self { half::bf16::from_f64(v) }
    #[inline(always)]
    fn zero() -> Self { half::bf16::ZERO }
    #[inline(always)]
    fn one() -> Self { half::bf16::ONE }
    #[inline(always)]
    fn sqrt(self) -> Self { half::bf16::from_f32(self.to_f32().sqrt()) }
    #[inline(always)]
    fn abs(self) -> Self { half::bf16::from_f32(self.to_f32().abs()) }
}

/// Storage order of a flat `n_rows x n_cols` matrix buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Elements of a row are contiguous.
    #[default]
    RowMajor,
    /// Elements of a column are contiguous.
    ColMajor,
}

impl Layout {
    #[inline(always)]
    pub const fn is_row_major(self) -> bool {
        matches!(self, Layout::RowMajor)
    }

    /// Length of one contiguous run in the flat buffer
    /// (a row for row-major, a column for column-major).
    #[inline(always)]
    pub const fn run_len(self, n_rows: usize, n_cols: usize) -> usize {
        match self {
            Layout::RowMajor => n_cols,
            Layout::ColMajor => n_rows,
        }
    }

    /// Linear index of element `(row, col)`.
    #[inline(always)]
    pub const fn index(self, row: usize, col: usize, n_rows: usize, n_cols: usize) -> usize {
        match self {
            Layout::RowMajor => row * n_cols + col,
            Layout::ColMajor => col * n_rows + row,
        }
    }
}

/// Options for the out-of-place scaled square root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtConfig<T: KernelFloat> {
    /// Every source element is multiplied by `scalar` before the root.
    pub scalar: T,
    /// Write `0` for negative sources instead of producing NaN.
    pub clamp_negative_to_zero: bool,
}

impl<T: KernelFloat> Default for SqrtConfig<T> {
    fn default() -> Self {
        Self {
            scalar: T::one(),
            clamp_negative_to_zero: false,
        }
    }
}

impl<T: KernelFloat> SqrtConfig<T> {
    pub fn with_scalar(scalar: T) -> Self {
        Self {
            scalar,
            ..Self::default()
        }
    }

    pub fn clamp_negative(mut self, clamp: bool) -> Self {
        self.clamp_negative_to_zero = clamp;
        self
    }
}

/// Options for the in-place reciprocal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReciprocalConfig<T: KernelFloat> {
    /// Numerator of `scalar / x`.
    pub scalar: T,
    /// Write `0` for elements `<= threshold` instead of dividing.
    pub clamp_small: bool,
    /// Clamp bound, only read when `clamp_small` is set.
    pub threshold: T,
}

impl<T: KernelFloat> Default for ReciprocalConfig<T> {
    fn default() -> Self {
        Self {
            scalar: T::one(),
            clamp_small: false,
            threshold: T::from_f64(DEFAULT_SMALL_THRESHOLD),
        }
    }
}

impl<T: KernelFloat> ReciprocalConfig<T> {
    pub fn with_scalar(scalar: T) -> Self {
        Self {
            scalar,
            ..Self::default()
        }
    }

    /// Enable clamping with the given threshold.
    pub fn clamped(mut self, threshold: T) -> Self {
        self.clamp_small = true;
        self.threshold = threshold;
        self
    }
}
