//! Element-wise scalar operations.
//!
//! Square-and-scale, scaled square root, reciprocal, small-value zeroing and
//! ratio-to-sum, each with in-place and out-of-place variants where the
//! callers need both.
//!
//! # Edge-case policies
//!
//! Nothing here returns an error. Risky inputs are handled by explicit flags:
//!
//! - [`sqrt_scaled`] can map negative sources to `0` instead of NaN.
//! - [`reciprocal_inplace`] can map values `<= threshold` to `0` instead of
//!   dividing. The out-of-place [`reciprocal`] has no such option.
//! - [`ratio`] leaves the destination untouched when the sum is exactly zero.
//!
//! The out-of-place kernels only `debug_assert!` matching lengths. Their
//! `try_*` forms return [`PrimsError::LengthMismatch`](crate::error::PrimsError::LengthMismatch)
//! instead and leave `output` untouched.

use crate::error::PrimsResult;
use crate::kernel_types::{KernelFloat, ReciprocalConfig, SqrtConfig, DEFAULT_SMALL_THRESHOLD};
use crate::parallel::{map_inplace, map_into};
use crate::validation::check_same_len;

// ============================================================================
// Power: x * x * scalar
// ============================================================================

/// Square every element and scale it in-place: `x = x * x * scalar`.
///
/// This is a fixed square, not a general exponent. Pass `T::one()` for the
/// unscaled square.
#[inline]
pub fn power_inplace<T: KernelFloat>(data: &mut [T], scalar: T) {
    map_inplace(data, |x| x * x * scalar);
}

/// Square and scale: `output = input * input * scalar`.
#[inline]
pub fn power<T: KernelFloat>(input: &[T], output: &mut [T], scalar: T) {
    debug_assert_eq!(input.len(), output.len());
    map_into(input, output, |x| x * x * scalar);
}

/// Checked [`power`].
pub fn try_power<T: KernelFloat>(input: &[T], output: &mut [T], scalar: T) -> PrimsResult<()> {
    check_same_len(input.len(), output.len())?;
    power(input, output, scalar);
    Ok(())
}

// ============================================================================
// Scaled square root: sqrt(x * scalar)
// ============================================================================

/// Scaled square root in-place: `x = sqrt(x * scalar)`.
///
/// Negative products yield NaN; use [`sqrt_scaled`] with
/// `clamp_negative_to_zero` to avoid that.
#[inline]
pub fn sqrt_scaled_inplace<T: KernelFloat>(data: &mut [T], scalar: T) {
    map_inplace(data, |x| (x * scalar).sqrt());
}

/// Scaled square root: `output = sqrt(input * scalar)`.
///
/// With `clamp_negative_to_zero`, a negative *source* value writes `0`. The
/// check is made before scaling, so a positive source with a negative scalar
/// still yields NaN.
#[inline]
pub fn sqrt_scaled<T: KernelFloat>(input: &[T], output: &mut [T], config: SqrtConfig<T>) {
    debug_assert_eq!(input.len(), output.len());
    let SqrtConfig {
        scalar,
        clamp_negative_to_zero,
    } = config;
    let zero = T::zero();

    if clamp_negative_to_zero {
        map_into(input, output, |x| if x < zero { zero } else { (x * scalar).sqrt() });
    } else {
        map_into(input, output, |x| (x * scalar).sqrt());
    }
}

/// Checked [`sqrt_scaled`].
pub fn try_sqrt_scaled<T: KernelFloat>(
    input: &[T],
    output: &mut [T],
    config: SqrtConfig<T>,
) -> PrimsResult<()> {
    check_same_len(input.len(), output.len())?;
    sqrt_scaled(input, output, config);
    Ok(())
}

// ============================================================================
// Reciprocal: scalar / x
// ============================================================================

/// Reciprocal in-place: `x = scalar / x`.
///
/// With `clamp_small`, any element `<= threshold` becomes `0` instead. Note the
/// comparison is signed, so every negative value is clamped too.
#[inline]
pub fn reciprocal_inplace<T: KernelFloat>(data: &mut [T], config: ReciprocalConfig<T>) {
    let ReciprocalConfig {
        scalar,
        clamp_small,
        threshold,
    } = config;
    let zero = T::zero();

    if clamp_small {
        map_inplace(data, |x| if x <= threshold { zero } else { scalar / x });
    } else {
        map_inplace(data, |x| scalar / x);
    }
}

/// Reciprocal: `output = scalar / input`.
///
/// Unguarded; zeros divide to infinity per IEEE semantics.
#[inline]
pub fn reciprocal<T: KernelFloat>(input: &[T], output: &mut [T], scalar: T) {
    debug_assert_eq!(input.len(), output.len());
    map_into(input, output, |x| scalar / x);
}

/// Checked [`reciprocal`].
pub fn try_reciprocal<T: KernelFloat>(input: &[T], output: &mut [T], scalar: T) -> PrimsResult<()> {
    check_same_len(input.len(), output.len())?;
    reciprocal(input, output, scalar);
    Ok(())
}

// ============================================================================
// Small-value zeroing
// ============================================================================

/// Zero every element `<= threshold`, leave the rest unchanged.
///
/// [`DEFAULT_SMALL_THRESHOLD`] (`1e-15`) is the usual threshold; see
/// [`set_small_values_zero_default`].
#[inline]
pub fn set_small_values_zero<T: KernelFloat>(data: &mut [T], threshold: T) {
    let zero = T::zero();
    map_inplace(data, |x| if x <= threshold { zero } else { x });
}

/// [`set_small_values_zero`] with the default `1e-15` threshold.
#[inline]
pub fn set_small_values_zero_default<T: KernelFloat>(data: &mut [T]) {
    set_small_values_zero(data, T::from_f64(DEFAULT_SMALL_THRESHOLD));
}

// ============================================================================
// Ratio: x / sum(src)
// ============================================================================

/// Sum accumulated left to right in `T`.
#[inline]
pub fn ordered_sum<T: KernelFloat>(data: &[T]) -> T {
    data.iter().fold(T::zero(), |acc, &x| acc + x)
}

/// Each element's share of the total: `output[i] = input[i] / sum(input)`.
///
/// Used for explained-variance ratios in PCA. When the sum is exactly zero the
/// output buffer is not written at all.
///
/// The sum is computed once, sequentially in index order, so the result is
/// the same as recomputing it per element.
pub fn ratio<T: KernelFloat>(input: &[T], output: &mut [T]) {
    debug_assert_eq!(input.len(), output.len());
    let total = ordered_sum(input);
    if total == T::zero() {
        log::debug!(
            "ratio: zero total over {} elements, output left unchanged",
            input.len()
        );
        return;
    }
    map_into(input, output, |x| x / total);
}

/// Checked [`ratio`].
pub fn try_ratio<T: KernelFloat>(input: &[T], output: &mut [T]) -> PrimsResult<()> {
    check_same_len(input.len(), output.len())?;
    ratio(input, output);
    Ok(())
}
