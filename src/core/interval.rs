//! A 1-based, fully-closed interval consisting of a start and end position.
//!
//! ```text
//! ================ seq0 ===============
//!
//! | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! -------------------------------------
//! |   |   | X | X | X | X | X |   |   |  <= 3-7
//! |   |   |   |   |   |   |   | X |   |  <= 8-8
//! ```
//!
//! - The first interval above (`3-7`) covers positions 3 up to and including
//!   7, so it has a length of 5.
//! - The second interval above (`8-8`) covers the single position 8. Because
//!   it starts immediately after the first interval ends, the two intervals
//!   are _adjacent_ and [`merge()`] will coalesce them into `3-8`.
//!
//! ## Parsing Intervals
//!
//! Intervals are parsed from strings in the form `<start>-<end>` (e.g.,
//! `100-150`). Both positions are 1-based and inclusive, so the start position
//! must be at least one and must not exceed the end position.

use std::num::NonZeroU64;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::core::Position;

/// The delimiter between the start and end position of a textual interval.
const INTERVAL_DELIMITER: char = '-';

/// An error related to an interval.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A position of zero was provided, which is not valid within a 1-based
    /// coordinate system.
    ZeroPosition,
    /// The start position is greater than the end position.
    StartGreaterThanEnd(Position, Position),
    /// Could not parse an interval from the given value.
    ParseError(String),
    /// Could not parse a position within an interval.
    InvalidPosition(ParseIntError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroPosition => write!(f, "positions are 1-based and cannot be zero"),
            Error::StartGreaterThanEnd(start, end) => write!(
                f,
                "start position ({start}) cannot be greater than the end position ({end})"
            ),
            Error::ParseError(val) => write!(f, "could not parse interval from the value: {val}"),
            Error::InvalidPosition(err) => write!(f, "invalid position: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A 1-based, fully-closed interval.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Interval {
    /// The start position (inclusive).
    start: Position,
    /// The end position (inclusive).
    end: Position,
}

impl Interval {
    /// Attempts to create a new [`Interval`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    ///
    /// let interval = Interval::try_new(100, 150)?;
    /// assert_eq!(interval.start(), 100);
    /// assert_eq!(interval.end(), 150);
    ///
    /// assert!(Interval::try_new(0, 10).is_err());
    /// assert!(Interval::try_new(10, 9).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: Position, end: Position) -> Result<Self, Error> {
        if start == 0 {
            return Err(Error::ZeroPosition);
        }

        if start > end {
            return Err(Error::StartGreaterThanEnd(start, end));
        }

        Ok(Self { start, end })
    }

    /// Creates the interval `[1, end]`.
    pub(crate) fn from_one_to(end: NonZeroU64) -> Self {
        Self {
            start: 1,
            end: end.get(),
        }
    }

    /// Gets the start position of the interval.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the end position of the interval.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Gets the number of positions covered by the interval.
    ///
    /// Since both ends are inclusive, an interval always covers at least one
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    ///
    /// assert_eq!(Interval::try_new(100, 150)?.len(), 51);
    /// assert_eq!(Interval::try_new(7, 7)?.len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Position {
        self.end - self.start + 1
    }

    /// Returns whether `other` is entirely enclosed by this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns whether the two intervals share at least one position.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    ///
    /// let a = Interval::try_new(1, 5)?;
    /// assert!(a.overlaps(&Interval::try_new(5, 10)?));
    /// assert!(!a.overlaps(&Interval::try_new(6, 10)?));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns whether `next` can be merged onto the end of this interval:
    /// it either overlaps this interval or starts immediately after it.
    ///
    /// This assumes `next` does not start before this interval.
    fn absorbs(&self, next: &Interval) -> bool {
        next.start <= self.end.saturating_add(1)
    }

    /// Widens the interval in place so that it also covers `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    ///
    /// let mut interval = Interval::try_new(100, 150)?;
    /// interval.widen(&Interval::try_new(90, 120)?);
    /// assert_eq!(interval, Interval::try_new(90, 150)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn widen(&mut self, other: &Interval) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.start, INTERVAL_DELIMITER, self.end)
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(INTERVAL_DELIMITER)
            .ok_or_else(|| Error::ParseError(s.into()))?;

        let start = start.parse().map_err(Error::InvalidPosition)?;
        let end = end.parse().map_err(Error::InvalidPosition)?;

        Self::try_new(start, end)
    }
}

/// Collapses a set of intervals into the minimal equivalent set of disjoint,
/// non-adjacent intervals sorted by start position.
///
/// Intervals that overlap _or_ touch (`b.start == a.end + 1`) are coalesced.
///
/// # Examples
///
/// ```
/// use gffpartition::core::Interval;
/// use gffpartition::core::interval::merge;
///
/// let merged = merge([
///     "6-10".parse::<Interval>()?,
///     "1-5".parse::<Interval>()?,
///     "20-30".parse::<Interval>()?,
///     "22-25".parse::<Interval>()?,
/// ]);
///
/// assert_eq!(
///     merged,
///     vec!["1-10".parse::<Interval>()?, "20-30".parse::<Interval>()?]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn merge<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut intervals = intervals.into_iter().collect::<Vec<_>>();
    intervals.sort_unstable_by_key(|interval| interval.start);

    let mut results = Vec::<Interval>::with_capacity(intervals.len());

    for interval in intervals {
        match results.last_mut() {
            Some(current) if current.absorbs(&interval) => {
                current.end = current.end.max(interval.end);
            }
            _ => results.push(interval),
        }
    }

    results
}

/// Sums the lengths of a set of intervals without merging them.
///
/// The sum saturates at the largest representable position.
pub fn total_length<'a, I>(intervals: I) -> Position
where
    I: IntoIterator<Item = &'a Interval>,
{
    intervals
        .into_iter()
        .map(Interval::len)
        .fold(0, Position::saturating_add)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn iv(start: Position, end: Position) -> Interval {
        Interval::try_new(start, end).unwrap()
    }

    #[test]
    fn test_valid_interval() -> Result<(), Box<dyn std::error::Error>> {
        let interval = Interval::try_new(10, 20)?;
        assert_eq!(interval.start(), 10);
        assert_eq!(interval.end(), 20);
        assert_eq!(interval.len(), 11);
        Ok(())
    }

    #[test]
    fn test_zero_position() {
        let err = Interval::try_new(0, 10).unwrap_err();
        assert_eq!(err, Error::ZeroPosition);
        assert_eq!(err.to_string(), "positions are 1-based and cannot be zero");
    }

    #[test]
    fn test_start_greater_than_end() {
        let err = Interval::try_new(11, 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "start position (11) cannot be greater than the end position (10)"
        );
    }

    #[test]
    fn test_parse_and_display() -> Result<(), Box<dyn std::error::Error>> {
        let interval = "100-150".parse::<Interval>()?;
        assert_eq!(interval, iv(100, 150));
        assert_eq!(interval.to_string(), "100-150");

        let err = "100".parse::<Interval>().unwrap_err();
        assert_eq!(err.to_string(), "could not parse interval from the value: 100");

        let err = "a-150".parse::<Interval>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid position: invalid digit found in string"
        );

        Ok(())
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_adjacent_intervals_coalesce() {
        assert_eq!(merge([iv(1, 5), iv(6, 10)]), vec![iv(1, 10)]);
    }

    #[test]
    fn test_merge_single_base_gap_is_kept() {
        assert_eq!(merge([iv(1, 5), iv(7, 10)]), vec![iv(1, 5), iv(7, 10)]);
    }

    #[test]
    fn test_merge_unsorted_and_nested() {
        let merged = merge([iv(40, 50), iv(1, 30), iv(5, 10), iv(29, 35), iv(52, 60)]);
        assert_eq!(merged, vec![iv(1, 35), iv(40, 50), iv(52, 60)]);
    }

    #[test]
    fn test_merge_duplicates() {
        assert_eq!(merge([iv(3, 9), iv(3, 9), iv(3, 4)]), vec![iv(3, 9)]);
    }

    #[test]
    fn test_merge_is_idempotent_and_closed() {
        let input = [
            iv(100, 200),
            iv(150, 160),
            iv(201, 250),
            iv(300, 310),
            iv(1, 1),
            iv(3, 3),
            iv(2, 2),
            iv(500, 600),
            iv(450, 499),
        ];

        let once = merge(input);
        let twice = merge(once.clone());
        assert_eq!(once, twice);

        for pair in once.windows(2) {
            assert!(pair[0].end() + 1 < pair[1].start());
        }

        assert_eq!(
            once,
            vec![iv(1, 3), iv(100, 250), iv(300, 310), iv(450, 600)]
        );
    }

    #[test]
    fn test_merge_does_not_overflow_at_maximum_position() {
        let merged = merge([iv(1, Position::MAX), iv(10, 20)]);
        assert_eq!(merged, vec![iv(1, Position::MAX)]);
    }

    #[test]
    fn test_total_length() {
        assert_eq!(total_length(&[iv(1, 10), iv(5, 6)]), 12);
        assert_eq!(total_length(&[]), 0);
    }

    #[test]
    fn test_total_length_saturates() {
        let whole = iv(1, Position::MAX);
        assert_eq!(total_length(&[whole, whole]), Position::MAX);
    }

    #[test]
    fn test_from_one_to() {
        let end = NonZeroU64::new(Position::MAX).unwrap();
        assert_eq!(Interval::from_one_to(end), iv(1, Position::MAX));
        assert_eq!(Interval::from_one_to(NonZeroU64::MIN), iv(1, 1));
    }

    #[test]
    fn test_widen_and_overlaps() {
        let mut interval = iv(10, 20);
        interval.widen(&iv(15, 30));
        assert_eq!(interval, iv(10, 30));

        assert!(interval.overlaps(&iv(30, 40)));
        assert!(!interval.overlaps(&iv(31, 40)));
        assert!(interval.contains(&iv(12, 18)));
        assert!(!interval.contains(&iv(5, 18)));
    }
}
