//! A gene within a gene model.

use omics::coordinate::Strand;

use crate::core::Interval;
use crate::model::Transcript;

/// A gene: the union of its member transcripts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Gene {
    /// The gene identifier.
    id: String,
    /// The identifiers of the member transcripts.
    transcript_ids: Vec<String>,
    /// The raw exon intervals of every member transcript. These are not
    /// deduplicated: exons shared by several transcripts appear once per
    /// transcript.
    exons: Vec<Interval>,
    /// The span of the gene (min start and max end over all transcripts).
    span: Interval,
    /// The strand of the first member transcript with a known strand.
    strand: Option<Strand>,
}

impl Gene {
    /// Creates a gene from its first transcript.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    /// use gffpartition::model::Gene;
    /// use gffpartition::model::Transcript;
    ///
    /// let mut first = Transcript::new("T1", Interval::try_new(100, 200)?);
    /// first.add_exon(Interval::try_new(100, 120)?);
    ///
    /// let mut second = Transcript::new("T2", Interval::try_new(150, 300)?);
    /// second.add_exon(Interval::try_new(280, 300)?);
    ///
    /// let mut gene = Gene::new("G1", &first);
    /// gene.add_transcript(&second);
    ///
    /// assert_eq!(gene.transcript_ids(), &[String::from("T1"), String::from("T2")]);
    /// assert_eq!(gene.exons().len(), 2);
    /// assert_eq!(gene.span(), &Interval::try_new(100, 300)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(id: impl Into<String>, transcript: &Transcript) -> Self {
        Self {
            id: id.into(),
            transcript_ids: vec![transcript.id().to_string()],
            exons: transcript.exons().to_vec(),
            span: *transcript.span(),
            strand: transcript.strand().cloned(),
        }
    }

    /// Gets the gene identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the identifiers of the member transcripts.
    pub fn transcript_ids(&self) -> &[String] {
        &self.transcript_ids
    }

    /// Gets the raw exon intervals of all member transcripts.
    pub fn exons(&self) -> &[Interval] {
        &self.exons
    }

    /// Gets the span of the gene.
    pub fn span(&self) -> &Interval {
        &self.span
    }

    /// Gets the strand of the gene, if known.
    pub fn strand(&self) -> Option<&Strand> {
        self.strand.as_ref()
    }

    /// Adds a member transcript: its exons are appended and the gene span is
    /// widened to include the transcript's span.
    pub fn add_transcript(&mut self, transcript: &Transcript) {
        self.transcript_ids.push(transcript.id().to_string());
        self.exons.extend_from_slice(transcript.exons());
        self.span.widen(transcript.span());

        if self.strand.is_none() {
            self.strand = transcript.strand().cloned();
        }
    }
}
