//! The exonic and intronic layout of a single gene.

use nonempty::NonEmpty;

use crate::core::Interval;
use crate::core::interval;
use crate::model::Gene;
use crate::partition::derive;

/// The merged exons and derived introns of a single gene.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneLayout {
    /// The merged exons, sorted by start position.
    exons: NonEmpty<Interval>,
    /// The introns between the merged exons.
    introns: Vec<Interval>,
}

impl GeneLayout {
    /// Lays out a gene by merging its exons and deriving its introns.
    ///
    /// A gene without any exons is treated as one exon covering its whole
    /// span, with no introns.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    /// use gffpartition::model::Gene;
    /// use gffpartition::model::Transcript;
    /// use gffpartition::partition::GeneLayout;
    ///
    /// let mut transcript = Transcript::new("T1", Interval::try_new(100, 250)?);
    /// transcript.add_exon(Interval::try_new(200, 250)?);
    /// transcript.add_exon(Interval::try_new(100, 150)?);
    /// transcript.add_exon(Interval::try_new(140, 160)?);
    ///
    /// let layout = GeneLayout::from_gene(&Gene::new("G1", &transcript));
    ///
    /// assert_eq!(layout.exons().len(), 2);
    /// assert_eq!(layout.introns(), &[Interval::try_new(161, 199)?]);
    /// assert_eq!(layout.span(), Interval::try_new(100, 250)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_gene(gene: &Gene) -> Self {
        let merged = interval::merge(gene.exons().iter().copied());
        let introns = derive::introns(&merged);

        match NonEmpty::from_vec(merged) {
            Some(exons) => Self { exons, introns },
            None => Self {
                exons: NonEmpty::new(*gene.span()),
                introns: Vec::new(),
            },
        }
    }

    /// Gets the merged exons.
    pub fn exons(&self) -> &NonEmpty<Interval> {
        &self.exons
    }

    /// Gets the introns.
    pub fn introns(&self) -> &[Interval] {
        &self.introns
    }

    /// Gets the adjusted span of the gene: from the start of the first merged
    /// exon to the end of the last one.
    ///
    /// This can be narrower than the gene's declared span when its transcripts
    /// extend beyond their exons.
    pub fn span(&self) -> Interval {
        let mut span = *self.exons.first();
        span.widen(self.exons.last());
        span
    }
}
