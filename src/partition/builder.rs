//! A builder for a [`Partition`].

use rust_lapper as lapper;
use tracing::debug;
use tracing::warn;

use crate::core::Chromosome;
use crate::core::Interval;
use crate::core::Label;
use crate::core::LabeledInterval;
use crate::core::Position;
use crate::core::interval;
use crate::model::Gene;
use crate::model::GeneModel;
use crate::partition::GeneLayout;
use crate::partition::Partition;
use crate::partition::derive;

/// The inner value of the gene span lookup data structure.
type Iv = lapper::Interval<Position, usize>;

/// A builder for a [`Partition`].
///
/// By default, exons and introns are merged only _within_ each gene. Two
/// genes that overlap each contribute their own exons and introns, which can
/// then cover the same positions in the resulting partition. Intergenic
/// regions are always the complement of the union of every gene.
///
/// With [`merge_across_genes()`](Builder::merge_across_genes) enabled, exons
/// are instead merged across the whole chromosome and introns are the gaps
/// between those merged exons, so that every position is labelled exactly
/// once.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// Whether to merge exons across genes.
    merge_across_genes: bool,
}

impl Builder {
    /// Sets whether exons are merged across genes.
    ///
    /// # Examples
    ///
    /// ```
    /// let builder = gffpartition::partition::Builder::default().merge_across_genes(true);
    /// ```
    pub fn merge_across_genes(mut self, value: bool) -> Self {
        self.merge_across_genes = value;
        self
    }

    /// Builds a [`Partition`] of `chromosome` from a gene model.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Chromosome;
    /// use gffpartition::core::Label;
    /// use gffpartition::partition;
    ///
    /// let data = b"chr1\t.\tmRNA\t100\t250\t.\t+\t.\tID=T1;Parent=G1\n\
    ///              chr1\t.\texon\t100\t150\t.\t+\t.\tParent=T1\n\
    ///              chr1\t.\texon\t200\t250\t.\t+\t.\tParent=T1\n";
    /// let reader = gffpartition::gff::Reader::new(&data[..]);
    /// let model = gffpartition::model::Builder.try_build_from(reader)?;
    ///
    /// let chromosome = Chromosome::try_new(1000)?;
    /// let partition = partition::Builder::default().build_from(&model, &chromosome);
    ///
    /// let rows = partition
    ///     .intervals()
    ///     .iter()
    ///     .map(|interval| interval.to_string())
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(
    ///     rows,
    ///     vec![
    ///         "NC\t1\t99",
    ///         "EXON\t100\t150",
    ///         "INTRON\t151\t199",
    ///         "EXON\t200\t250",
    ///         "NC\t251\t1000",
    ///     ]
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build_from(&self, model: &GeneModel, chromosome: &Chromosome) -> Partition {
        // (1) Lay out every gene independently. Genes are visited in
        // identifier order so that the output does not depend on hashing.
        let mut genes = model.genes().collect::<Vec<_>>();
        genes.sort_by(|a, b| a.id().cmp(b.id()));

        let layouts = genes
            .into_iter()
            .map(|gene| (gene.id(), GeneLayout::from_gene(gene)))
            .collect::<Vec<_>>();

        for (id, layout) in &layouts {
            if layout.span().end() > chromosome.length() {
                warn!(
                    "gene {} ({}) extends past the end of the chromosome ({})",
                    id,
                    layout.span(),
                    chromosome.length()
                );
            }
        }

        // (2) Find the genes that overlap one another.
        let overlapping_genes = find_overlapping_genes(&layouts);

        for (a, b) in &overlapping_genes {
            let strands = (
                model.get(a).and_then(Gene::strand),
                model.get(b).and_then(Gene::strand),
            );

            match strands {
                (Some(x), Some(y)) if x != y => {
                    warn!("genes {} and {} overlap on opposite strands", a, b)
                }
                _ => warn!("genes {} and {} overlap", a, b),
            }
        }

        // (3) Label exons and introns.
        let mut intervals = match self.merge_across_genes {
            false => label_within_genes(&layouts),
            true => label_across_genes(&layouts),
        };

        // (4) Label the intergenic regions.
        let merged_spans = interval::merge(layouts.iter().map(|(_, layout)| layout.span()));

        intervals.extend(
            derive::intergenic(&merged_spans, chromosome)
                .into_iter()
                .map(|interval| LabeledInterval::new(Label::Nc, interval)),
        );

        intervals.sort();

        debug!(
            "partitioned {} genes into {} intervals",
            layouts.len(),
            intervals.len()
        );

        Partition::new(intervals, *chromosome, overlapping_genes)
    }
}

/// Labels the exons and introns of each gene independently.
fn label_within_genes(layouts: &[(&str, GeneLayout)]) -> Vec<LabeledInterval> {
    let mut results = Vec::new();

    for (_, layout) in layouts {
        results.extend(
            layout
                .exons()
                .iter()
                .map(|exon| LabeledInterval::new(Label::Exon, *exon)),
        );
        results.extend(
            layout
                .introns()
                .iter()
                .map(|intron| LabeledInterval::new(Label::Intron, *intron)),
        );
    }

    results
}

/// Labels exons merged across every gene, and the introns between them
/// within each merged gene span.
fn label_across_genes(layouts: &[(&str, GeneLayout)]) -> Vec<LabeledInterval> {
    let exons = interval::merge(
        layouts
            .iter()
            .flat_map(|(_, layout)| layout.exons().iter().copied()),
    );
    let spans = interval::merge(layouts.iter().map(|(_, layout)| layout.span()));

    let mut results = exons
        .iter()
        .map(|exon| LabeledInterval::new(Label::Exon, *exon))
        .collect::<Vec<_>>();

    // Every merged exon lies within exactly one merged span, and both lists
    // are sorted, so the exons of each span form a contiguous run.
    let mut remaining = exons.as_slice();

    for span in &spans {
        let within = remaining
            .iter()
            .take_while(|exon| span.contains(exon))
            .count();
        let (inside, rest) = remaining.split_at(within);

        results.extend(
            derive::introns(inside)
                .into_iter()
                .map(|intron| LabeledInterval::new(Label::Intron, intron)),
        );

        remaining = rest;
    }

    results
}

/// Finds every pair of genes whose adjusted spans share at least one
/// position. Each pair is reported once, with the identifiers in sorted order.
fn find_overlapping_genes(layouts: &[(&str, GeneLayout)]) -> Vec<(String, String)> {
    let spans = layouts
        .iter()
        .enumerate()
        .map(|(i, (_, layout))| to_lapper_interval(layout.span(), i))
        .collect::<Vec<_>>();

    let lookup = lapper::Lapper::new(spans);
    let mut results = Vec::new();

    for (i, (id, layout)) in layouts.iter().enumerate() {
        let query = to_lapper_interval(layout.span(), i);

        for hit in lookup.find(query.start, query.stop) {
            if hit.val > i {
                let other = layouts[hit.val].0;
                let pair = match *id <= other {
                    true => (id.to_string(), other.to_string()),
                    false => (other.to_string(), id.to_string()),
                };
                results.push(pair);
            }
        }
    }

    results.sort();
    results
}

/// Converts a closed interval into the half-open representation used by the
/// lookup data structure.
fn to_lapper_interval(interval: Interval, val: usize) -> Iv {
    lapper::Interval {
        start: interval.start(),
        stop: interval.end().saturating_add(1),
        val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gff;
    use crate::model;

    fn model_from(data: &[u8]) -> GeneModel {
        model::Builder.try_build_from(gff::Reader::new(data)).unwrap()
    }

    fn labeled(label: Label, start: Position, end: Position) -> LabeledInterval {
        LabeledInterval::new(label, Interval::try_new(start, end).unwrap())
    }

    /// Two overlapping genes:
    ///
    /// - G1 has exons 100-150 and 300-350 (intron 151-299).
    /// - G2 has exons 200-250 and 400-450 (intron 251-399).
    const OVERLAPPING: &[u8] = b"\
        chr1\t.\tmRNA\t100\t350\t.\t+\t.\tID=T1;Parent=G1\n\
        chr1\t.\texon\t100\t150\t.\t+\t.\tParent=T1\n\
        chr1\t.\texon\t300\t350\t.\t+\t.\tParent=T1\n\
        chr1\t.\tmRNA\t200\t450\t.\t+\t.\tID=T2;Parent=G2\n\
        chr1\t.\texon\t200\t250\t.\t+\t.\tParent=T2\n\
        chr1\t.\texon\t400\t450\t.\t+\t.\tParent=T2\n";

    #[test]
    fn test_single_gene_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
        let model = model_from(
            b"chr1\t.\tmRNA\t100\t250\t.\t+\t.\tID=T1;Parent=G1\n\
              chr1\t.\texon\t200\t250\t.\t+\t.\tParent=T1\n\
              chr1\t.\texon\t100\t150\t.\t+\t.\tParent=T1\n",
        );
        let chromosome = Chromosome::try_new(1000)?;
        let partition = Builder::default().build_from(&model, &chromosome);

        assert_eq!(
            partition.intervals(),
            &[
                labeled(Label::Nc, 1, 99),
                labeled(Label::Exon, 100, 150),
                labeled(Label::Intron, 151, 199),
                labeled(Label::Exon, 200, 250),
                labeled(Label::Nc, 251, 1000),
            ]
        );

        let total = partition.intervals().iter().map(|i| i.len()).sum::<Position>();
        assert_eq!(total, 1000);
        assert!(partition.is_exhaustive());
        assert!(partition.overlapping_genes().is_empty());

        Ok(())
    }

    #[test]
    fn test_empty_model() -> Result<(), Box<dyn std::error::Error>> {
        let chromosome = Chromosome::try_new(500)?;
        let partition = Builder::default().build_from(&GeneModel::default(), &chromosome);

        assert_eq!(partition.intervals(), &[labeled(Label::Nc, 1, 500)]);
        assert!(partition.is_exhaustive());

        Ok(())
    }

    #[test]
    fn test_gene_without_exons_is_a_single_exon() -> Result<(), Box<dyn std::error::Error>> {
        let model = model_from(b"chr1\t.\tlnc_RNA\t10\t20\t.\t+\t.\tID=T1;Parent=G1\n");
        let chromosome = Chromosome::try_new(30)?;
        let partition = Builder::default().build_from(&model, &chromosome);

        assert_eq!(
            partition.intervals(),
            &[
                labeled(Label::Nc, 1, 9),
                labeled(Label::Exon, 10, 20),
                labeled(Label::Nc, 21, 30),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_untranslated_flanks_become_intergenic() -> Result<(), Box<dyn std::error::Error>> {
        // The transcript spans 50-300, but its exons only cover 100-250.
        let model = model_from(
            b"chr1\t.\tmRNA\t50\t300\t.\t+\t.\tID=T1;Parent=G1\n\
              chr1\t.\texon\t100\t150\t.\t+\t.\tParent=T1\n\
              chr1\t.\texon\t200\t250\t.\t+\t.\tParent=T1\n",
        );
        let chromosome = Chromosome::try_new(400)?;
        let partition = Builder::default().build_from(&model, &chromosome);

        assert_eq!(partition.intervals().first(), Some(&labeled(Label::Nc, 1, 99)));
        assert_eq!(partition.intervals().last(), Some(&labeled(Label::Nc, 251, 400)));

        Ok(())
    }

    #[test]
    fn test_overlapping_genes_double_cover_by_default() -> Result<(), Box<dyn std::error::Error>> {
        let model = model_from(OVERLAPPING);
        let chromosome = Chromosome::try_new(500)?;
        let partition = Builder::default().build_from(&model, &chromosome);

        assert_eq!(
            partition.overlapping_genes(),
            &[(String::from("G1"), String::from("G2"))]
        );
        assert!(!partition.is_exhaustive());

        let summary = partition.summary();
        assert_eq!(summary.tally(Label::Exon).count(), 4);
        assert_eq!(summary.tally(Label::Intron).count(), 2);
        assert_eq!(summary.tally(Label::Nc).count(), 2);
        assert!(summary.covered_length() > chromosome.length());

        // Intergenic regions still respect the union of both genes.
        let nc = partition
            .intervals()
            .iter()
            .filter(|i| i.label() == Label::Nc)
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(nc, vec![labeled(Label::Nc, 1, 99), labeled(Label::Nc, 451, 500)]);

        Ok(())
    }

    #[test]
    fn test_merge_across_genes_is_exhaustive() -> Result<(), Box<dyn std::error::Error>> {
        let model = model_from(OVERLAPPING);
        let chromosome = Chromosome::try_new(500)?;
        let partition = Builder::default()
            .merge_across_genes(true)
            .build_from(&model, &chromosome);

        assert_eq!(
            partition.intervals(),
            &[
                labeled(Label::Nc, 1, 99),
                labeled(Label::Exon, 100, 150),
                labeled(Label::Intron, 151, 199),
                labeled(Label::Exon, 200, 250),
                labeled(Label::Intron, 251, 299),
                labeled(Label::Exon, 300, 350),
                labeled(Label::Intron, 351, 399),
                labeled(Label::Exon, 400, 450),
                labeled(Label::Nc, 451, 500),
            ]
        );
        assert!(partition.is_exhaustive());
        assert_eq!(partition.summary().covered_length(), 500);

        // The overlap is still reported.
        assert_eq!(partition.overlapping_genes().len(), 1);

        Ok(())
    }

    #[test]
    fn test_merge_across_genes_keeps_separate_genes_apart() -> Result<(), Box<dyn std::error::Error>>
    {
        let model = model_from(
            b"chr1\t.\texon\t10\t20\t.\t+\t.\tParent=T1\n\
              chr1\t.\texon\t30\t40\t.\t+\t.\tParent=T1\n\
              chr1\t.\texon\t60\t70\t.\t+\t.\tParent=T2\n",
        );
        let chromosome = Chromosome::try_new(100)?;

        let faithful = Builder::default().build_from(&model, &chromosome);
        let merged = Builder::default()
            .merge_across_genes(true)
            .build_from(&model, &chromosome);

        assert_eq!(faithful.intervals(), merged.intervals());
        assert!(merged.is_exhaustive());
        assert!(merged.intervals().contains(&labeled(Label::Nc, 41, 59)));

        Ok(())
    }

    #[test]
    fn test_adjacent_genes_do_not_overlap() -> Result<(), Box<dyn std::error::Error>> {
        let model = model_from(
            b"chr1\t.\texon\t10\t20\t.\t+\t.\tParent=T1\n\
              chr1\t.\texon\t21\t30\t.\t+\t.\tParent=T2\n",
        );
        let chromosome = Chromosome::try_new(40)?;
        let partition = Builder::default().build_from(&model, &chromosome);

        assert!(partition.overlapping_genes().is_empty());
        assert!(partition.is_exhaustive());

        Ok(())
    }
}
