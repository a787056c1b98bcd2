//! Re-deriving summary statistics from a labeled-interval table.
//!
//! The [`Reducer`] only sees the rows of a table, so it can check a table
//! produced by an earlier run or by another tool.
//!
//! Per-label counts and lengths are tallied in input order without any
//! merging. The denominator for percentages, however, is the length of the
//! _merged_ union of every row regardless of label. When rows overlap (for
//! example, the exons of two overlapping genes), the per-label lengths add
//! up to more than the merged total and the report is flagged as
//! inconsistent.

use std::io::BufRead;

use tracing::debug;

use crate::core::Interval;
use crate::core::Label;
use crate::core::Position;
use crate::core::interval;
use crate::table;
use crate::table::Line;
use crate::table::Row;

/// A running count and summed length of intervals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    /// The number of intervals.
    count: usize,
    /// The summed length of the intervals.
    total_length: Position,
}

impl Tally {
    /// Adds an interval to the tally. The summed length saturates at the
    /// largest representable position.
    pub fn add(&mut self, interval: &Interval) {
        self.count += 1;
        self.total_length = self.total_length.saturating_add(interval.len());
    }

    /// Gets the number of intervals.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Gets the summed length of the intervals.
    pub fn total_length(&self) -> Position {
        self.total_length
    }

    /// Gets the mean interval length, or `0` when the tally is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    /// use gffpartition::stats::Tally;
    ///
    /// let mut tally = Tally::default();
    /// assert_eq!(tally.mean_length(), 0.0);
    ///
    /// tally.add(&Interval::try_new(1, 10)?);
    /// tally.add(&Interval::try_new(21, 25)?);
    /// assert_eq!(tally.mean_length(), 7.5);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn mean_length(&self) -> f64 {
        self.total_length as f64 / self.count.max(1) as f64
    }

    /// Gets the summed length as a percentage of `denominator`, or `0` when
    /// the denominator is zero.
    pub fn percentage_of(&self, denominator: Position) -> f64 {
        match denominator {
            0 => 0.0,
            n => self.total_length as f64 / n as f64 * 100.0,
        }
    }
}

/// A tally for each [`Label`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tallies([Tally; 3]);

impl Tallies {
    /// Gets the tally for a label.
    pub fn get(&self, label: Label) -> &Tally {
        &self.0[label.index()]
    }

    /// Adds an interval to the tally of a label.
    pub fn add(&mut self, label: Label, interval: &Interval) {
        self.0[label.index()].add(interval);
    }

    /// Gets the summed length over every label.
    pub fn total_length(&self) -> Position {
        self.0
            .iter()
            .map(Tally::total_length)
            .fold(0, Position::saturating_add)
    }
}

/// A statistics report computed by a [`Reducer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// The per-label tallies.
    tallies: Tallies,
    /// The length of the merged union of every row.
    total_length: Position,
    /// The number of rows with an unrecognized label.
    unrecognized: usize,
}

impl Report {
    /// Gets the number of intervals with a label.
    pub fn count(&self, label: Label) -> usize {
        self.tallies.get(label).count()
    }

    /// Gets the mean interval length for a label (`0` if the label is absent).
    pub fn mean_length(&self, label: Label) -> f64 {
        self.tallies.get(label).mean_length()
    }

    /// Gets the summed length of a label as a percentage of
    /// [`total_length()`](Report::total_length).
    pub fn percentage(&self, label: Label) -> f64 {
        self.tallies.get(label).percentage_of(self.total_length)
    }

    /// Gets the length of the merged union of every row, regardless of label.
    pub fn total_length(&self) -> Position {
        self.total_length
    }

    /// Gets the summed length of every recognized label, without merging.
    pub fn labelled_length(&self) -> Position {
        self.tallies.total_length()
    }

    /// Gets the number of rows whose label was not recognized.
    pub fn unrecognized(&self) -> usize {
        self.unrecognized
    }

    /// Returns whether the labelled rows cover the merged total exactly once.
    ///
    /// This is `false` when rows overlap each other (the same position is
    /// counted under more than one row) or when rows with unrecognized labels
    /// cover positions that no labelled row does.
    pub fn is_consistent(&self) -> bool {
        self.labelled_length() == self.total_length
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for label in Label::ALL {
            writeln!(f, "{} count: {}", label, self.count(label))?;
        }

        for label in Label::ALL {
            writeln!(f, "{} mean length: {:.2}", label, self.mean_length(label))?;
        }

        for label in Label::ALL {
            writeln!(f, "{} percentage: {:.2}%", label, self.percentage(label))?;
        }

        write!(f, "total length: {}", self.total_length)
    }
}

/// Accumulates rows into a [`Report`].
#[derive(Debug, Default)]
pub struct Reducer {
    /// The per-label tallies.
    tallies: Tallies,
    /// Every interval seen, regardless of label.
    intervals: Vec<Interval>,
    /// The number of rows with an unrecognized label.
    unrecognized: usize,
}

impl Reducer {
    /// Adds a row.
    ///
    /// Rows with an unrecognized label are left out of the per-label tallies
    /// but still contribute to the total covered length.
    pub fn add(&mut self, row: &Row) {
        match row.label() {
            Some(label) => self.tallies.add(label, row.interval()),
            None => self.unrecognized += 1,
        }

        self.intervals.push(*row.interval());
    }

    /// Consumes the reducer and computes the [`Report`].
    pub fn finish(self) -> Report {
        let total_length = interval::total_length(&interval::merge(self.intervals));

        Report {
            tallies: self.tallies,
            total_length,
            unrecognized: self.unrecognized,
        }
    }

    /// Reduces every row of a table.
    ///
    /// Malformed lines are skipped; I/O errors are returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Label;
    /// use gffpartition::stats::Reducer;
    ///
    /// let data = b"feature\tstart\tend\n\
    ///              NC\t1\t99\n\
    ///              EXON\t100\t150\n\
    ///              INTRON\t151\t199\n\
    ///              EXON\t200\t250\n\
    ///              NC\t251\t1000\n";
    /// let reader = gffpartition::table::Reader::new(&data[..]);
    ///
    /// let report = Reducer::try_reduce_from(reader)?;
    /// assert_eq!(report.count(Label::Exon), 2);
    /// assert_eq!(report.mean_length(Label::Exon), 51.0);
    /// assert_eq!(report.total_length(), 1000);
    /// assert!(report.is_consistent());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_reduce_from<T>(mut reader: table::Reader<T>) -> Result<Report, table::reader::Error>
    where
        T: BufRead,
    {
        let mut reducer = Self::default();

        for result in reader.lines() {
            match result {
                Ok(Line::Row(row)) => reducer.add(&row),
                Ok(Line::Header) | Ok(Line::Empty) => {}
                Err(table::reader::Error::Line(err)) => debug!("skipping malformed row: {}", err),
                Err(err) => return Err(err),
            }
        }

        Ok(reducer.finish())
    }
}

/// Reduces a sequence of rows into a [`Report`].
pub fn reduce<'a, I>(rows: I) -> Report
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut reducer = Reducer::default();

    for row in rows {
        reducer.add(row);
    }

    reducer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Row> {
        lines.iter().map(|line| line.parse().unwrap()).collect()
    }

    #[test]
    fn test_case_insensitive_labels() {
        let lower = reduce(&rows(&["exon 5 10"]));
        let upper = reduce(&rows(&["EXON 5 10"]));

        assert_eq!(lower, upper);
        assert_eq!(lower.count(Label::Exon), 1);
        assert_eq!(lower.mean_length(Label::Exon), 6.0);
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let report = reduce(&rows(&[
            "NC 1 99",
            "EXON 100 150",
            "INTRON 151 199",
            "EXON 200 250",
            "NC 251 1000",
        ]));

        let sum = Label::ALL
            .iter()
            .map(|label| report.percentage(*label))
            .sum::<f64>();

        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(report.count(Label::Nc), 2);
        assert_eq!(report.count(Label::Intron), 1);
        assert_eq!(report.mean_length(Label::Nc), 424.5);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_absent_label_has_zero_mean() {
        let report = reduce(&rows(&["NC 1 1000"]));
        assert_eq!(report.count(Label::Intron), 0);
        assert_eq!(report.mean_length(Label::Intron), 0.0);
        assert_eq!(report.percentage(Label::Intron), 0.0);
        assert_eq!(report.percentage(Label::Nc), 100.0);
    }

    #[test]
    fn test_empty_input() {
        let report = reduce(&[]);
        assert_eq!(report.total_length(), 0);
        assert_eq!(report.percentage(Label::Exon), 0.0);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_overlapping_rows_are_flagged() {
        let report = reduce(&rows(&["EXON 1 100", "EXON 51 150", "NC 151 200"]));

        assert_eq!(report.total_length(), 200);
        assert_eq!(report.labelled_length(), 250);
        assert!(!report.is_consistent());
        assert_eq!(report.percentage(Label::Exon), 100.0);
    }

    #[test]
    fn test_unrecognized_labels_join_the_coverage_pool() {
        let report = reduce(&rows(&["EXON 1 10", "UTR 11 20"]));

        assert_eq!(report.unrecognized(), 1);
        assert_eq!(report.total_length(), 20);
        assert_eq!(report.percentage(Label::Exon), 50.0);
        assert!(!report.is_consistent());
    }

    #[test]
    fn test_lengths_saturate_instead_of_overflowing() {
        let report = reduce(&rows(&[
            "EXON 1 18446744073709551615",
            "EXON 1 18446744073709551615",
            "NC 1 10",
        ]));

        assert_eq!(report.count(Label::Exon), 2);
        assert_eq!(report.total_length(), Position::MAX);
        assert_eq!(report.labelled_length(), Position::MAX);
        assert_eq!(report.percentage(Label::Exon), 100.0);
    }

    #[test]
    fn test_try_reduce_from_skips_malformed_rows() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"feature start end\nEXON 1 10\nEXON one 10\nINTRON 11\nNC 11 20\n";
        let report = Reducer::try_reduce_from(table::Reader::new(&data[..]))?;

        assert_eq!(report.count(Label::Exon), 1);
        assert_eq!(report.count(Label::Intron), 0);
        assert_eq!(report.count(Label::Nc), 1);
        assert_eq!(report.total_length(), 20);

        Ok(())
    }

    #[test]
    fn test_report_display() {
        let report = reduce(&rows(&["EXON 1 10", "NC 11 20"]));
        let text = report.to_string();

        assert!(text.contains("EXON count: 1"));
        assert!(text.contains("INTRON mean length: 0.00"));
        assert!(text.contains("NC percentage: 50.00%"));
        assert!(text.ends_with("total length: 20"));
    }
}
