// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Numeric Tolerances
//!
//! Every floating-point comparison in the planning solvers goes through the
//! helpers in this module, so the whole workspace agrees on a single
//! definition of "satisfied within tolerance".
//!
//! The tolerance is *relative* to the magnitude of the bound: a usage of
//! `7_000_000.000001` against a cap of `7_000_000` is accepted, while the
//! same absolute slack against a cap of `1` would not be.

/// Relative tolerance used when checking a computed value against a
/// constraint bound. A left-hand side `a` satisfies `a <= b` when
/// `a <= b + FEASIBILITY_TOLERANCE * max(1, |b|)`.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Continuous volumes below this threshold are reported as zero
/// ("work item not performed") instead of as tiny fractional activity.
pub const VOLUME_EPSILON: f64 = 0.01;

/// Absolute slack granted by the relative tolerance for a bound `b`.
#[inline]
fn slack(bound: f64) -> f64 {
    FEASIBILITY_TOLERANCE * bound.abs().max(1.0)
}

/// Returns `true` if `lhs <= bound` within the feasibility tolerance.
#[inline]
pub fn le_within(lhs: f64, bound: f64) -> bool {
    lhs <= bound + slack(bound)
}

/// Returns `true` if `lhs >= bound` within the feasibility tolerance.
#[inline]
pub fn ge_within(lhs: f64, bound: f64) -> bool {
    lhs >= bound - slack(bound)
}

/// Returns `true` if `lhs == bound` within the feasibility tolerance.
#[inline]
pub fn eq_within(lhs: f64, bound: f64) -> bool {
    (lhs - bound).abs() <= slack(bound)
}

/// The amount by which `lhs` exceeds `bound` beyond the tolerance,
/// or `0.0` if it does not.
#[inline]
pub fn excess_over(lhs: f64, bound: f64) -> f64 {
    let over = lhs - bound;
    if over > slack(bound) { over } else { 0.0 }
}
