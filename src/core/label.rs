//! The functional label assigned to a stretch of the chromosome.

use std::io;
use std::str::FromStr;

use crate::core::Interval;
use crate::core::Position;

/// An error related to the parsing of a label.
#[derive(Debug)]
pub struct ParseLabelError(io::Error);

impl std::fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse label error: {}", self.0)
    }
}

impl std::error::Error for ParseLabelError {}

/// The label of an interval within a partition.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Label {
    /// A coding or retained segment of a transcript (`EXON`).
    Exon,
    /// A non-coding segment between two exons of the same gene (`INTRON`).
    Intron,
    /// Sequence outside of any gene (`NC`).
    Nc,
}

impl Label {
    /// Every label, in output order.
    pub const ALL: [Label; 3] = [Label::Exon, Label::Intron, Label::Nc];

    /// Gets the canonical, upper-cased name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Exon => "EXON",
            Label::Intron => "INTRON",
            Label::Nc => "NC",
        }
    }

    /// Gets a dense index for the label, suitable for indexing arrays of
    /// length [`Label::ALL.len()`](Label::ALL).
    pub(crate) fn index(&self) -> usize {
        match self {
            Label::Exon => 0,
            Label::Intron => 1,
            Label::Nc => 2,
        }
    }
}

impl FromStr for Label {
    type Err = ParseLabelError;

    /// Labels are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EXON" => Ok(Self::Exon),
            "INTRON" => Ok(Self::Intron),
            "NC" => Ok(Self::Nc),
            _ => Err(ParseLabelError(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not a valid label", s),
            ))),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An interval tagged with a [`Label`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LabeledInterval {
    /// The label.
    label: Label,
    /// The interval.
    interval: Interval,
}

impl LabeledInterval {
    /// Creates a new [`LabeledInterval`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    /// use gffpartition::core::Label;
    /// use gffpartition::core::LabeledInterval;
    ///
    /// let labeled = LabeledInterval::new(Label::Intron, Interval::try_new(151, 199)?);
    /// assert_eq!(labeled.len(), 49);
    /// assert_eq!(labeled.to_string(), "INTRON\t151\t199");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(label: Label, interval: Interval) -> Self {
        Self { label, interval }
    }

    /// Gets the label.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Gets the interval.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Gets the start position.
    pub fn start(&self) -> Position {
        self.interval.start()
    }

    /// Gets the end position.
    pub fn end(&self) -> Position {
        self.interval.end()
    }

    /// Gets the number of positions covered.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Position {
        self.interval.len()
    }
}

impl Ord for LabeledInterval {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.start(), self.end(), self.label).cmp(&(other.start(), other.end(), other.label))
    }
}

impl PartialOrd for LabeledInterval {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for LabeledInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.label, self.start(), self.end())
    }
}
