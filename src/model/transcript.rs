//! A transcript within a gene model.

use omics::coordinate::Strand;

use crate::core::Interval;

/// A transcript, built incrementally from the records that reference it.
///
/// A transcript may be created by an exon record naming it as a parent
/// before the transcript's own record has been read. In that case its span
/// starts as the exon's interval and widens as more records arrive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transcript {
    /// The transcript identifier.
    id: String,
    /// The identifier of the gene owning this transcript, if known.
    gene_id: Option<String>,
    /// The span of the transcript.
    span: Interval,
    /// The strand of the transcript, if known.
    strand: Option<Strand>,
    /// The raw exon intervals in insertion order.
    exons: Vec<Interval>,
}

impl Transcript {
    /// Creates a new transcript spanning `span` with no exons and no known
    /// gene.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    /// use gffpartition::model::Transcript;
    ///
    /// let mut transcript = Transcript::new("T1", Interval::try_new(100, 150)?);
    /// transcript.add_exon(Interval::try_new(200, 250)?);
    ///
    /// assert_eq!(transcript.span(), &Interval::try_new(100, 250)?);
    /// assert_eq!(transcript.exons().len(), 1);
    /// assert_eq!(transcript.gene_id(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(id: impl Into<String>, span: Interval) -> Self {
        Self {
            id: id.into(),
            gene_id: None,
            span,
            strand: None,
            exons: Vec::new(),
        }
    }

    /// Gets the transcript identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the identifier of the owning gene, if one was recorded.
    pub fn gene_id(&self) -> Option<&str> {
        self.gene_id.as_deref()
    }

    /// Gets the identifier of the gene this transcript is grouped under: the
    /// owning gene if recorded, otherwise the transcript's own identifier.
    pub fn effective_gene_id(&self) -> &str {
        self.gene_id().unwrap_or(&self.id)
    }

    /// Gets the span of the transcript.
    pub fn span(&self) -> &Interval {
        &self.span
    }

    /// Gets the strand of the transcript, if known.
    pub fn strand(&self) -> Option<&Strand> {
        self.strand.as_ref()
    }

    /// Gets the raw exon intervals.
    pub fn exons(&self) -> &[Interval] {
        &self.exons
    }

    /// Sets the owning gene.
    pub fn set_gene_id(&mut self, gene_id: impl Into<String>) {
        self.gene_id = Some(gene_id.into());
    }

    /// Sets the strand of the transcript.
    pub fn set_strand(&mut self, strand: Strand) {
        self.strand = Some(strand);
    }

    /// Widens the span of the transcript to include `interval`.
    pub fn widen(&mut self, interval: &Interval) {
        self.span.widen(interval);
    }

    /// Adds an exon, widening the span of the transcript to include it.
    pub fn add_exon(&mut self, exon: Interval) {
        self.widen(&exon);
        self.exons.push(exon);
    }
}
