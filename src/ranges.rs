//! Span arguments and the draw-mapping arithmetic shared by both
//! façades.
//!
//! The mapping functions are pure: the façades plan a span, pull the one
//! or two raw draws the plan calls for, and hand them here. Keeping the
//! arithmetic free of generator access lets both the blocking and the
//! suspension-capable façade reuse it unchanged, and lets the tests pin
//! the edge behavior with hand-picked draws.

use crate::error::{Error, Result};
use std::ops::{Range, RangeInclusive};

/// The widest span `random_integer` can fill: 2^53-1, the largest range
/// the two-draw scheme (32 + 21 bits) covers exactly.
pub(crate) const MAX_EXACT_RANGE: u64 = (1 << 53) - 1;

/// Span argument for `random_integer`.
///
/// Converts from `()` (the full unsigned 32-bit range), a single `max`
/// (implicit `min = 0`), a `(min, max)` pair, or `a..b` / `a..=b` range
/// sugar. Bounds are inclusive; an inverted pair is swapped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IntegerSpan {
    /// One raw draw, returned as-is.
    Full,
    /// 0 to `max`, both inclusive.
    UpTo(i64),
    /// `min` to `max`, both inclusive.
    Bounded(i64, i64),
}

impl From<()> for IntegerSpan {
    fn from((): ()) -> Self {
        IntegerSpan::Full
    }
}

impl From<i64> for IntegerSpan {
    fn from(max: i64) -> Self {
        IntegerSpan::UpTo(max)
    }
}

impl From<(i64, i64)> for IntegerSpan {
    fn from((min, max): (i64, i64)) -> Self {
        IntegerSpan::Bounded(min, max)
    }
}

impl From<RangeInclusive<i64>> for IntegerSpan {
    fn from(range: RangeInclusive<i64>) -> Self {
        IntegerSpan::Bounded(*range.start(), *range.end())
    }
}

impl From<Range<i64>> for IntegerSpan {
    fn from(range: Range<i64>) -> Self {
        IntegerSpan::Bounded(
            range.start,
            range.end.checked_sub(1).expect("Range end underflow"),
        )
    }
}

/// Span argument for `random_float64` / `random_float32`.
///
/// Converts from `()` (the unit interval), a single `max` (scales the
/// unit draw; a negative `max` mirrors it), a `(min, max)` pair (swapped
/// when inverted), or `a..b` range sugar.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FloatSpan {
    /// The unit interval [0, 1).
    Unit,
    /// [0, max): the unit draw scaled, without reordering.
    UpTo(f64),
    /// [min, max), swapped when inverted.
    Bounded(f64, f64),
}

impl From<()> for FloatSpan {
    fn from((): ()) -> Self {
        FloatSpan::Unit
    }
}

impl From<f64> for FloatSpan {
    fn from(max: f64) -> Self {
        FloatSpan::UpTo(max)
    }
}

impl From<(f64, f64)> for FloatSpan {
    fn from((min, max): (f64, f64)) -> Self {
        FloatSpan::Bounded(min, max)
    }
}

impl From<Range<f64>> for FloatSpan {
    fn from(range: Range<f64>) -> Self {
        FloatSpan::Bounded(range.start, range.end)
    }
}

// A planned integer draw: either the raw pass-through or a bounded
// reduction.
#[derive(Debug)]
pub(crate) enum IntegerPlan {
    Passthrough,
    Reduce { min: i64, range: u64 },
}

/// Validates a span before any draw happens, so a failure never advances
/// generator state.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn plan_integer(span: IntegerSpan) -> Result<IntegerPlan> {
    let (min, max) = match span {
        IntegerSpan::Full => return Ok(IntegerPlan::Passthrough),
        IntegerSpan::UpTo(max) => (0, max),
        IntegerSpan::Bounded(min, max) => (min, max),
    };
    let (min, max) = if min > max { (max, min) } else { (min, max) };
    let range = i128::from(max) - i128::from(min);
    if range > i128::from(MAX_EXACT_RANGE) {
        return Err(Error::RangeTooLarge);
    }
    Ok(IntegerPlan::Reduce {
        min,
        range: range as u64,
    })
}

/// Whether the plan needs a second, precision-widening draw.
pub(crate) fn needs_wide_draw(range: u64) -> bool {
    range > 0xFFFF_FFFF
}

/// Reduces one or two raw draws into `min..=min+range`.
///
/// The second draw contributes its top 21 bits, scaled by 2^32, for 53
/// draw bits in total. The reduction is `draw % (range + 1)` whenever
/// the draw exceeds the range: spans that do not evenly divide the draw
/// space are slightly biased towards their low end. That modulo behavior
/// is the documented contract of this generator family, kept here over
/// rejection sampling.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn reduce_integer(min: i64, range: u64, low: u32, high: Option<u32>) -> i64 {
    let mut draw = u64::from(low);
    if let Some(high) = high {
        draw += u64::from(high >> 11) << 32;
    }
    let value = if draw > range { draw % (range + 1) } else { draw };
    min + value as i64
}

/// Combines two raw draws into a float in [0, 1) with every mantissa bit
/// drawn: the low word plus the top 21 bits of the high word, scaled by
/// 2^-53.
pub(crate) fn unit_from_draws(low: u32, high: u32) -> f64 {
    (f64::from(low) + f64::from(high >> 11) * 4_294_967_296.0) * 2_f64.powi(-53)
}

/// Scales a unit draw into the span.
pub(crate) fn scale_float(span: FloatSpan, unit: f64) -> f64 {
    match span {
        FloatSpan::Unit => unit,
        FloatSpan::UpTo(max) => unit * max,
        FloatSpan::Bounded(min, max) => {
            let (min, max) = if min > max { (max, min) } else { (min, max) };
            min + unit * (max - min)
        }
    }
}
