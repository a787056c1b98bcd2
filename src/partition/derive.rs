//! Deriving introns and intergenic regions as set complements.

use crate::core::Chromosome;
use crate::core::Interval;

/// Computes the gaps strictly between consecutive merged exons.
///
/// `merged_exons` must be sorted, disjoint, and non-adjacent (as returned by
/// [`merge()`](crate::core::interval::merge)). Nothing is emitted before the
/// first or after the last exon, so zero or one exon yields no introns.
///
/// # Examples
///
/// ```
/// use gffpartition::core::Interval;
/// use gffpartition::partition::derive;
///
/// let exons = [Interval::try_new(10, 20)?, Interval::try_new(31, 40)?];
/// assert_eq!(derive::introns(&exons), vec![Interval::try_new(21, 30)?]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn introns(merged_exons: &[Interval]) -> Vec<Interval> {
    merged_exons
        .windows(2)
        .filter_map(|pair| gap_between(&pair[0], &pair[1]))
        .collect()
}

/// Computes the intergenic regions of a chromosome: the complement of the
/// merged gene spans within `[1, length]`.
///
/// `merged_gene_spans` must be sorted, disjoint, and non-adjacent. Spans that
/// overlap would otherwise produce gaps that are too narrow or spurious.
///
/// # Examples
///
/// ```
/// use gffpartition::core::Chromosome;
/// use gffpartition::core::Interval;
/// use gffpartition::partition::derive;
///
/// let chromosome = Chromosome::try_new(1000)?;
///
/// assert_eq!(
///     derive::intergenic(&[], &chromosome),
///     vec![Interval::try_new(1, 1000)?]
/// );
///
/// let spans = [Interval::try_new(100, 250)?, Interval::try_new(400, 1000)?];
/// assert_eq!(
///     derive::intergenic(&spans, &chromosome),
///     vec![Interval::try_new(1, 99)?, Interval::try_new(251, 399)?]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn intergenic(merged_gene_spans: &[Interval], chromosome: &Chromosome) -> Vec<Interval> {
    let (first, last) = match (merged_gene_spans.first(), merged_gene_spans.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return vec![chromosome.span()],
    };

    let mut results = Vec::with_capacity(merged_gene_spans.len() + 1);

    // (1) The region before the first gene.
    if first.start() > 1 {
        results.extend(Interval::try_new(1, first.start() - 1).ok());
    }

    // (2) The regions between consecutive genes.
    results.extend(
        merged_gene_spans
            .windows(2)
            .filter_map(|pair| gap_between(&pair[0], &pair[1])),
    );

    // (3) The region after the last gene.
    if last.end() < chromosome.length() {
        results.extend(Interval::try_new(last.end() + 1, chromosome.length()).ok());
    }

    results
}

/// Gets the interval strictly between `left` and `right`, if there is at least
/// one position between them.
fn gap_between(left: &Interval, right: &Interval) -> Option<Interval> {
    let start = left.end().checked_add(1)?;
    let end = right.start().checked_sub(1)?;

    match start <= end {
        true => Interval::try_new(start, end).ok(),
        false => None,
    }
}
