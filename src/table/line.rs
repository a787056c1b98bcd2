//! A line within a labeled-interval table.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::core::Interval;
use crate::core::Label;
use crate::core::LabeledInterval;
use crate::core::interval;

/// The token that starts a header line (compared case-insensitively).
pub const HEADER_TOKEN: &str = "feature";

/// The minimum number of expected fields in a row.
pub const NUM_ROW_FIELDS: usize = 3;

/// An error related to the parsing of a table line.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the row.
    IncorrectNumberOfFields(usize),
    /// An invalid start position.
    InvalidStart(ParseIntError),
    /// An invalid end position.
    InvalidEnd(ParseIntError),
    /// The start and end positions do not form a valid interval.
    InvalidInterval(interval::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in row: expected at least {} fields, found {} fields",
                NUM_ROW_FIELDS, n
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {}", err),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {}", err),
            ParseError::InvalidInterval(err) => write!(f, "invalid interval: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

/// A data row within a labeled-interval table.
///
/// The label is kept as upper-cased text so that rows carrying labels other
/// than `EXON`, `INTRON`, or `NC` can still be read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    /// The upper-cased label text.
    label: String,
    /// The interval.
    interval: Interval,
}

impl Row {
    /// Gets the upper-cased label text of the row.
    pub fn raw_label(&self) -> &str {
        &self.label
    }

    /// Gets the label of the row, if it is one of the recognized labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Label;
    /// use gffpartition::table::Row;
    ///
    /// let row = "exon\t5\t10".parse::<Row>()?;
    /// assert_eq!(row.raw_label(), "EXON");
    /// assert_eq!(row.label(), Some(Label::Exon));
    ///
    /// let row = "UTR 5 10".parse::<Row>()?;
    /// assert_eq!(row.label(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn label(&self) -> Option<Label> {
        self.label.parse().ok()
    }

    /// Gets the interval of the row.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl From<LabeledInterval> for Row {
    fn from(value: LabeledInterval) -> Self {
        Self {
            label: value.label().to_string(),
            interval: *value.interval(),
        }
    }
}

impl FromStr for Row {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();
        if parts.len() < NUM_ROW_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parts[1].parse().map_err(ParseError::InvalidStart)?;
        let end = parts[2].parse().map_err(ParseError::InvalidEnd)?;
        let interval = Interval::try_new(start, end).map_err(ParseError::InvalidInterval)?;

        Ok(Row {
            label: parts[0].to_ascii_uppercase(),
            interval,
        })
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.label,
            self.interval.start(),
            self.interval.end()
        )
    }
}

/// A line within a labeled-interval table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,
    /// The header line.
    Header,
    /// A data row.
    Row(Row),
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().next() {
            None => Ok(Line::Empty),
            Some(first) if first.eq_ignore_ascii_case(HEADER_TOKEN) => Ok(Line::Header),
            Some(_) => s.parse().map(Line::Row),
        }
    }
}
