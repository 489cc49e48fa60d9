//! Shared numeric tolerances.

/// Tolerance for zero tests, support-feature ties, and separation checks.
pub const EPSILON: f32 = 1e-6;

/// Whether a scalar is within [`EPSILON`] of zero.
#[inline]
pub fn is_near_zero(value: f32) -> bool {
    value.abs() < EPSILON
}
