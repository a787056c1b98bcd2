//! Partitioning a chromosome into exonic, intronic, and intergenic intervals.
//!
//! A [`Partition`] is assembled from a [`GeneModel`](crate::model::GeneModel)
//! by a [`Builder`]. Each gene is first laid out on its own (see
//! [`GeneLayout`]), after which the intergenic (`NC`) regions are derived as
//! the complement of every gene's adjusted span.

pub mod builder;
pub mod derive;
pub mod layout;

pub use builder::Builder;
pub use layout::GeneLayout;

use crate::core::Chromosome;
use crate::core::Label;
use crate::core::LabeledInterval;
use crate::core::Position;
use crate::stats::Tallies;
use crate::stats::Tally;

/// A labelled partition of a chromosome.
#[derive(Clone, Debug)]
pub struct Partition {
    /// The labelled intervals sorted by start, end, and then label.
    intervals: Vec<LabeledInterval>,

    /// The chromosome that was partitioned.
    chromosome: Chromosome,

    /// The pairs of genes whose adjusted spans overlap.
    overlapping_genes: Vec<(String, String)>,
}

impl Partition {
    /// Creates a new [`Partition`].
    pub(crate) fn new(
        intervals: Vec<LabeledInterval>,
        chromosome: Chromosome,
        overlapping_genes: Vec<(String, String)>,
    ) -> Self {
        Self {
            intervals,
            chromosome,
            overlapping_genes,
        }
    }

    /// Gets the labelled intervals.
    pub fn intervals(&self) -> &[LabeledInterval] {
        &self.intervals
    }

    /// Gets every pair of genes whose adjusted spans overlap, with the
    /// identifiers of each pair in sorted order.
    pub fn overlapping_genes(&self) -> &[(String, String)] {
        &self.overlapping_genes
    }

    /// Returns whether every position of the chromosome is covered by exactly
    /// one interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Chromosome;
    /// use gffpartition::model::GeneModel;
    /// use gffpartition::partition;
    ///
    /// let chromosome = Chromosome::try_new(100)?;
    /// let partition = partition::Builder::default().build_from(&GeneModel::default(), &chromosome);
    /// assert!(partition.is_exhaustive());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_exhaustive(&self) -> bool {
        // `None` once an interval ends at the largest representable position.
        let mut next = Some(1);

        for interval in &self.intervals {
            if next != Some(interval.start()) {
                return false;
            }

            next = interval.end().checked_add(1);
        }

        next == self.chromosome.length().checked_add(1)
    }

    /// Summarizes the partition.
    pub fn summary(&self) -> Summary {
        let mut tallies = Tallies::default();

        for interval in &self.intervals {
            tallies.add(interval.label(), interval.interval());
        }

        Summary { tallies }
    }
}

/// Per-label counts and lengths of a [`Partition`].
///
/// Lengths are summed without merging, so overlapping genes inflate the
/// [`covered_length()`](Summary::covered_length) beyond the chromosome length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    /// The per-label tallies.
    tallies: Tallies,
}

impl Summary {
    /// Gets the tally for a label.
    pub fn tally(&self, label: Label) -> &Tally {
        self.tallies.get(label)
    }

    /// Gets the summed length over every label.
    pub fn covered_length(&self) -> Position {
        self.tallies.total_length()
    }

    /// Gets the summed length of a label as a percentage of the
    /// [`covered_length()`](Summary::covered_length).
    pub fn percentage(&self, label: Label) -> f64 {
        self.tally(label).percentage_of(self.covered_length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interval;

    fn labeled(label: Label, start: Position, end: Position) -> LabeledInterval {
        LabeledInterval::new(label, Interval::try_new(start, end).unwrap())
    }

    #[test]
    fn test_is_exhaustive() -> Result<(), Box<dyn std::error::Error>> {
        let chromosome = Chromosome::try_new(20)?;

        let partition = Partition::new(
            vec![labeled(Label::Nc, 1, 9), labeled(Label::Exon, 10, 20)],
            chromosome,
            Vec::new(),
        );
        assert!(partition.is_exhaustive());

        // A gap.
        let partition = Partition::new(
            vec![labeled(Label::Nc, 1, 8), labeled(Label::Exon, 10, 20)],
            chromosome,
            Vec::new(),
        );
        assert!(!partition.is_exhaustive());

        // Short of the end.
        let partition = Partition::new(vec![labeled(Label::Nc, 1, 19)], chromosome, Vec::new());
        assert!(!partition.is_exhaustive());

        // An overlap.
        let partition = Partition::new(
            vec![
                labeled(Label::Exon, 1, 10),
                labeled(Label::Exon, 5, 15),
                labeled(Label::Nc, 16, 20),
            ],
            chromosome,
            Vec::new(),
        );
        assert!(!partition.is_exhaustive());

        Ok(())
    }

    #[test]
    fn test_is_exhaustive_at_maximum_length() -> Result<(), Box<dyn std::error::Error>> {
        let chromosome = Chromosome::try_new(Position::MAX)?;

        let partition = Partition::new(
            vec![labeled(Label::Nc, 1, Position::MAX - 1)],
            chromosome,
            Vec::new(),
        );
        assert!(!partition.is_exhaustive());

        let partition = Partition::new(
            vec![
                labeled(Label::Nc, 1, Position::MAX - 1),
                labeled(Label::Exon, Position::MAX, Position::MAX),
            ],
            chromosome,
            Vec::new(),
        );
        assert!(partition.is_exhaustive());

        Ok(())
    }

    #[test]
    fn test_summary() -> Result<(), Box<dyn std::error::Error>> {
        let partition = Partition::new(
            vec![
                labeled(Label::Nc, 1, 99),
                labeled(Label::Exon, 100, 150),
                labeled(Label::Intron, 151, 199),
                labeled(Label::Exon, 200, 250),
                labeled(Label::Nc, 251, 1000),
            ],
            Chromosome::try_new(1000)?,
            Vec::new(),
        );

        let summary = partition.summary();
        assert_eq!(summary.tally(Label::Exon).count(), 2);
        assert_eq!(summary.tally(Label::Exon).total_length(), 102);
        assert_eq!(summary.tally(Label::Exon).mean_length(), 51.0);
        assert_eq!(summary.tally(Label::Intron).mean_length(), 49.0);
        assert_eq!(summary.covered_length(), 1000);
        assert!((summary.percentage(Label::Exon) - 10.2).abs() < 1e-9);

        Ok(())
    }
}
