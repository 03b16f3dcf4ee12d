//! Subsets of the real line: everything, nothing, or one interval with open or closed ends.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{FuncError, Result};
use crate::format::pretty_number;

#[derive(Clone, Copy, Debug)]
pub enum Range {
    All,
    Empty,
    Bounded {
        low: f64,
        high: f64,
        low_inclusive: bool,
        high_inclusive: bool,
    },
}

impl Range {
    /// Checked constructor. Infinite endpoints are always open, and a bounded range spanning
    /// the whole line collapses to [`Range::All`].
    pub fn new(low: f64, high: f64, low_inclusive: bool, high_inclusive: bool) -> Result<Self> {
        if low.is_nan() || high.is_nan() {
            return Err(FuncError::invalid("range bounds must not be NaN"));
        }
        if low > high {
            return Err(FuncError::invalid(format!(
                "range lower bound {low} exceeds upper bound {high}"
            )));
        }
        Ok(Range::make(low, high, low_inclusive, high_inclusive))
    }

    pub fn point(value: f64) -> Self {
        Range::make(value, value, true, true)
    }

    pub fn open(low: f64, high: f64) -> Self {
        Range::make(low, high, false, false)
    }

    pub fn closed(low: f64, high: f64) -> Self {
        Range::make(low, high, true, true)
    }

    /// `(low, ∞)` or `[low, ∞)`.
    pub fn above(low: f64, inclusive: bool) -> Self {
        Range::make(low, f64::INFINITY, inclusive, false)
    }

    /// `(-∞, high)` or `(-∞, high]`.
    pub fn below(high: f64, inclusive: bool) -> Self {
        Range::make(f64::NEG_INFINITY, high, false, inclusive)
    }

    /// Normalizing constructor: degenerate input yields `Empty` instead of an error.
    pub(crate) fn make(low: f64, high: f64, low_inclusive: bool, high_inclusive: bool) -> Self {
        if low.is_nan() || high.is_nan() || low > high {
            return Range::Empty;
        }
        let low_inclusive = low_inclusive && low.is_finite();
        let high_inclusive = high_inclusive && high.is_finite();
        if low == high && !(low_inclusive && high_inclusive) {
            return Range::Empty;
        }
        if low == f64::NEG_INFINITY && high == f64::INFINITY {
            return Range::All;
        }
        Range::Bounded {
            low: low + 0.0,
            high: high + 0.0,
            low_inclusive,
            high_inclusive,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Range::Empty)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Range::All)
    }

    /// The value of a single-point range.
    pub fn as_point(&self) -> Option<f64> {
        match *self {
            Range::Bounded { low, high, .. } if low == high => Some(low),
            _ => None,
        }
    }

    pub fn low(&self) -> Option<f64> {
        self.ends().map(|(low, _, _, _)| low)
    }

    pub fn high(&self) -> Option<f64> {
        self.ends().map(|(_, high, _, _)| high)
    }

    fn ends(&self) -> Option<(f64, f64, bool, bool)> {
        match *self {
            Range::All => Some((f64::NEG_INFINITY, f64::INFINITY, false, false)),
            Range::Empty => None,
            Range::Bounded {
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => Some((low, high, low_inclusive, high_inclusive)),
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        match self.ends() {
            None => false,
            Some(_) if x.is_nan() => false,
            Some((low, high, low_inclusive, high_inclusive)) => {
                (x > low || (low_inclusive && x == low))
                    && (x < high || (high_inclusive && x == high))
            }
        }
    }

    pub fn intersect(&self, other: &Range) -> Range {
        let (Some(a), Some(b)) = (self.ends(), other.ends()) else {
            return Range::Empty;
        };
        let (low, low_inclusive) = match a.0.total_cmp(&b.0) {
            Ordering::Greater => (a.0, a.2),
            Ordering::Less => (b.0, b.2),
            Ordering::Equal => (a.0, a.2 && b.2),
        };
        let (high, high_inclusive) = match a.1.total_cmp(&b.1) {
            Ordering::Less => (a.1, a.3),
            Ordering::Greater => (b.1, b.3),
            Ordering::Equal => (a.1, a.3 && b.3),
        };
        Range::make(low, high, low_inclusive, high_inclusive)
    }

    /// One range when the operands overlap or touch, two otherwise.
    pub fn union(&self, other: &Range) -> Vec<Range> {
        merge_ranges(vec![*self, *other])
    }

    pub fn complement(&self) -> Vec<Range> {
        complement_all(std::slice::from_ref(self))
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Range::Empty => 0,
            Range::All => 1,
            Range::Bounded { .. } => 2,
        }
    }
}

/// Sorts, drops empties and fuses overlapping or touching ranges into maximal ones.
pub fn merge_ranges(mut ranges: Vec<Range>) -> Vec<Range> {
    ranges.retain(|r| !r.is_empty());
    if ranges.iter().any(Range::is_all) {
        return vec![Range::All];
    }
    ranges.sort();

    let mut merged: Vec<(f64, f64, bool, bool)> = Vec::with_capacity(ranges.len());
    for (low, high, low_inclusive, high_inclusive) in ranges.iter().filter_map(Range::ends) {
        if let Some(last) = merged.last_mut() {
            let touches = low < last.1 || (low == last.1 && (last.3 || low_inclusive));
            if touches {
                match high.total_cmp(&last.1) {
                    Ordering::Greater => {
                        last.1 = high;
                        last.3 = high_inclusive;
                    }
                    Ordering::Equal => last.3 |= high_inclusive,
                    Ordering::Less => {}
                }
                continue;
            }
        }
        merged.push((low, high, low_inclusive, high_inclusive));
    }

    merged
        .into_iter()
        .map(|(low, high, li, hi)| Range::make(low, high, li, hi))
        .collect()
}

/// Everything on the real line not covered by `ranges`.
pub fn complement_all(ranges: &[Range]) -> Vec<Range> {
    let mut gaps = Vec::new();
    let mut cursor = (f64::NEG_INFINITY, false);
    for (low, high, low_inclusive, high_inclusive) in merge_ranges(ranges.to_vec())
        .iter()
        .filter_map(Range::ends)
    {
        gaps.push(Range::make(cursor.0, low, cursor.1, !low_inclusive));
        cursor = (high, !high_inclusive);
    }
    gaps.push(Range::make(cursor.0, f64::INFINITY, cursor.1, false));
    gaps.retain(|r| !r.is_empty());
    gaps
}

impl Ord for Range {
    /// Orders by lower bound (a closed start sorts before an open one at the same value), then by
    /// upper bound.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.ends(), other.ends()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a
                .0
                .total_cmp(&b.0)
                .then_with(|| b.2.cmp(&a.2))
                .then_with(|| a.1.total_cmp(&b.1))
                .then_with(|| a.3.cmp(&b.3))
                .then_with(|| self.kind_rank().cmp(&other.kind_rank())),
        }
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind_rank().hash(state);
        if let Some((low, high, low_inclusive, high_inclusive)) = self.ends() {
            low.to_bits().hash(state);
            high.to_bits().hash(state);
            low_inclusive.hash(state);
            high_inclusive.hash(state);
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Range::All => write!(f, "ℝ"),
            Range::Empty => write!(f, "∅"),
            Range::Bounded {
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => write!(
                f,
                "{}{}, {}{}",
                if low_inclusive { '[' } else { '(' },
                pretty_number(low),
                pretty_number(high),
                if high_inclusive { ']' } else { ')' },
            ),
        }
    }
}
