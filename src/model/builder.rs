//! A builder for a [`GeneModel`].

use std::collections::HashMap;
use std::io::BufRead;

use tracing::debug;

use crate::gff;
use crate::gff::Line;
use crate::gff::Record;
use crate::gff::record::Kind;
use crate::model::Gene;
use crate::model::GeneModel;
use crate::model::Transcript;

/// An error related to building a [`GeneModel`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error while reading the gene model.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`GeneModel`].
///
/// Records may arrive in any order. Malformed lines and records that cannot
/// be linked to anything (a transcript without an `ID`, an exon without a
/// `Parent`) are skipped and counted rather than treated as errors.
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    /// Builds a [`GeneModel`] from a GFF3 reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\n\
    ///              chr1\t.\tgene\t100\t250\t.\t+\t.\tID=gene:G1\n\
    ///              chr1\t.\tmRNA\t100\t250\t.\t+\t.\tID=transcript:T1;Parent=gene:G1\n\
    ///              chr1\t.\texon\t100\t150\t.\t+\t.\tParent=transcript:T1\n\
    ///              chr1\t.\texon\t200\t250\t.\t+\t.\tParent=transcript:T1\n";
    /// let reader = gffpartition::gff::Reader::new(&data[..]);
    ///
    /// let model = gffpartition::model::Builder.try_build_from(reader)?;
    /// let gene = model.get("G1").unwrap();
    ///
    /// assert_eq!(gene.transcript_ids(), &[String::from("T1")]);
    /// assert_eq!(gene.exons().len(), 2);
    /// assert_eq!(gene.span().to_string(), "100-250");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from<T>(&self, mut reader: gff::Reader<T>) -> Result<GeneModel>
    where
        T: BufRead,
    {
        let mut transcripts = Transcripts::default();
        let mut buffer = String::new();

        loop {
            match reader.read_line(&mut buffer) {
                Ok(Some(Line::Record(record))) => transcripts.add(record),
                Ok(Some(Line::Empty)) | Ok(Some(Line::Comment(_))) => {}
                Ok(None) => break,
                Err(gff::reader::Error::Line(err)) => {
                    debug!("skipping malformed line: {}", err);
                    transcripts.skipped += 1;
                }
                Err(gff::reader::Error::Io(err)) => return Err(Error::Io(err)),
            }
        }

        Ok(transcripts.into_gene_model())
    }

    /// Builds a [`GeneModel`] from already parsed records.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::Record;
    ///
    /// let records = [
    ///     "chr1\t.\texon\t200\t250\t.\t+\t.\tParent=T1".parse::<Record>()?,
    ///     "chr1\t.\tmRNA\t100\t250\t.\t+\t.\tID=T1".parse::<Record>()?,
    /// ];
    ///
    /// let model = gffpartition::model::Builder.build_from_records(records);
    ///
    /// // Without a parent gene, the transcript stands in for its own gene.
    /// assert_eq!(model.get("T1").unwrap().span().to_string(), "100-250");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build_from_records<I>(&self, records: I) -> GeneModel
    where
        I: IntoIterator<Item = Record>,
    {
        let mut transcripts = Transcripts::default();

        for record in records {
            transcripts.add(record);
        }

        transcripts.into_gene_model()
    }
}

/// The transcripts accumulated while reading records.
#[derive(Debug, Default)]
struct Transcripts {
    /// The transcripts keyed by their identifier.
    inner: HashMap<String, Transcript>,
    /// The number of skipped records.
    skipped: usize,
}

impl Transcripts {
    /// Folds a single record into the accumulated transcripts.
    fn add(&mut self, record: Record) {
        match record.kind() {
            Kind::Transcript => self.add_transcript(&record),
            Kind::Exon => self.add_exon(&record),
            Kind::Other => {}
        }
    }

    /// Registers a transcript record under its own identifier.
    fn add_transcript(&mut self, record: &Record) {
        let id = match record.attributes().id() {
            Some(id) => id,
            None => {
                debug!(
                    "skipping {} record without an ID at {}:{}",
                    record.feature_type(),
                    record.seqid(),
                    record.interval()
                );
                self.skipped += 1;
                return;
            }
        };

        let transcript = self
            .inner
            .entry(id.to_string())
            .or_insert_with(|| Transcript::new(id, *record.interval()));
        transcript.widen(record.interval());

        if let Some(strand) = record.strand() {
            transcript.set_strand(strand.clone());
        }

        if let Some(gene_id) = record.attributes().parent() {
            transcript.set_gene_id(gene_id);
        }
    }

    /// Registers an exon record under each of its parent transcripts,
    /// creating any transcript that has not been seen yet.
    fn add_exon(&mut self, record: &Record) {
        let parents = record.attributes().parents();

        if parents.is_empty() {
            debug!(
                "skipping exon record without a Parent at {}:{}",
                record.seqid(),
                record.interval()
            );
            self.skipped += 1;
            return;
        }

        for parent in parents {
            let transcript = self
                .inner
                .entry(parent.clone())
                .or_insert_with(|| Transcript::new(parent.as_str(), *record.interval()));
            transcript.add_exon(*record.interval());

            // An implicit transcript takes its strand from its exons until
            // its own record is read.
            if transcript.strand().is_none() {
                if let Some(strand) = record.strand() {
                    transcript.set_strand(strand.clone());
                }
            }
        }
    }

    /// Groups the transcripts into genes.
    fn into_gene_model(self) -> GeneModel {
        let mut genes = HashMap::<String, Gene>::new();

        for transcript in self.inner.values() {
            let gene_id = transcript.effective_gene_id();

            match genes.get_mut(gene_id) {
                Some(gene) => gene.add_transcript(transcript),
                None => {
                    genes.insert(gene_id.to_string(), Gene::new(gene_id, transcript));
                }
            }
        }

        debug!(
            "grouped {} transcripts into {} genes ({} records skipped)",
            self.inner.len(),
            genes.len(),
            self.skipped
        );

        GeneModel::new(genes, self.skipped)
    }
}

#[cfg(test)]
mod tests {
    use omics::coordinate::Strand;

    use super::*;
    use crate::core::Interval;

    fn build(data: &[u8]) -> GeneModel {
        Builder.try_build_from(gff::Reader::new(data)).unwrap()
    }

    #[test]
    fn test_exons_before_transcript() -> Result<()> {
        let model = build(
            b"chr1\t.\texon\t200\t250\t.\t+\t.\tParent=T1\n\
              chr1\t.\texon\t120\t150\t.\t+\t.\tParent=T1\n\
              chr1\t.\tmRNA\t100\t260\t.\t+\t.\tID=T1;Parent=G1\n",
        );

        assert_eq!(model.len(), 1);
        let gene = model.get("G1").unwrap();
        assert_eq!(gene.exons().len(), 2);
        assert_eq!(gene.span(), &Interval::try_new(100, 260).unwrap());

        Ok(())
    }

    #[test]
    fn test_implicit_transcript_span_comes_from_exons() -> Result<()> {
        let model = build(
            b"chr1\t.\texon\t500\t550\t.\t+\t.\tParent=rna-1\n\
              chr1\t.\texon\t300\t350\t.\t+\t.\tParent=rna-1\n",
        );

        let gene = model.get("rna-1").unwrap();
        assert_eq!(gene.span(), &Interval::try_new(300, 550).unwrap());
        assert_eq!(gene.transcript_ids(), &[String::from("rna-1")]);

        Ok(())
    }

    #[test]
    fn test_transcripts_grouped_into_genes() -> Result<()> {
        let model = build(
            b"chr1\t.\tmRNA\t100\t300\t.\t+\t.\tID=transcript:T1;Parent=gene:G1\n\
              chr1\t.\tlnc_RNA\t250\t400\t.\t+\t.\tID=transcript:T2;Parent=gene:G1\n\
              chr1\t.\tncRNA\t900\t950\t.\t+\t.\tID=transcript:T3;Parent=gene:G2\n\
              chr1\t.\texon\t100\t150\t.\t+\t.\tParent=transcript:T1\n\
              chr1\t.\texon\t250\t300\t.\t+\t.\tParent=transcript:T1\n\
              chr1\t.\texon\t250\t300\t.\t+\t.\tParent=transcript:T2\n\
              chr1\t.\texon\t380\t400\t.\t+\t.\tParent=transcript:T2\n",
        );

        assert_eq!(model.len(), 2);
        assert_eq!(model.skipped(), 0);

        let g1 = model.get("G1").unwrap();
        let mut transcripts = g1.transcript_ids().to_vec();
        transcripts.sort();
        assert_eq!(transcripts, vec![String::from("T1"), String::from("T2")]);
        assert_eq!(g1.exons().len(), 4);
        assert_eq!(g1.span(), &Interval::try_new(100, 400).unwrap());

        let g2 = model.get("G2").unwrap();
        assert!(g2.exons().is_empty());
        assert_eq!(g2.span(), &Interval::try_new(900, 950).unwrap());

        Ok(())
    }

    #[test]
    fn test_feature_types_are_case_insensitive() -> Result<()> {
        let model = build(
            b"chr1\t.\tMRNA\t10\t90\t.\t+\t.\tID=T1;Parent=G1\n\
              chr1\t.\tExon\t10\t20\t.\t+\t.\tParent=T1\n",
        );

        assert_eq!(model.get("G1").unwrap().exons().len(), 1);

        Ok(())
    }

    #[test]
    fn test_malformed_and_unresolvable_records_are_skipped() -> Result<()> {
        let model = build(
            b"##gff-version 3\n\
              # a comment\n\
              \n\
              chr1\t.\texon\t1\t5\n\
              chr1\t.\texon\tone\t5\t.\t+\t.\tParent=T1\n\
              chr1\t.\tmRNA\t10\t90\t.\t+\t.\tParent=G1\n\
              chr1\t.\texon\t10\t20\t.\t+\t.\tID=E1\n\
              chr1\t.\tCDS\t10\t20\t.\t+\t0\tParent=T9\n\
              chr1\t.\texon\t30\t40\t.\t+\t.\tParent=T2\n",
        );

        assert_eq!(model.skipped(), 4);
        assert_eq!(model.len(), 1);
        assert!(model.get("T2").is_some());

        Ok(())
    }

    #[test]
    fn test_exon_with_multiple_parents() -> Result<()> {
        let model = build(
            b"chr1\t.\tmRNA\t10\t90\t.\t+\t.\tID=T1;Parent=G1\n\
              chr1\t.\tmRNA\t10\t60\t.\t+\t.\tID=T2;Parent=G1\n\
              chr1\t.\texon\t10\t20\t.\t+\t.\tParent=T1,T2\n",
        );

        assert_eq!(model.get("G1").unwrap().exons().len(), 2);

        Ok(())
    }

    #[test]
    fn test_strand_is_carried_onto_genes() -> Result<()> {
        let model = build(
            b"chr1\t.\texon\t10\t20\t.\t-\t.\tParent=T1\n\
              chr1\t.\tmRNA\t10\t90\t.\t-\t.\tID=T1;Parent=G1\n\
              chr1\t.\texon\t200\t250\t.\t+\t.\tParent=T2\n\
              chr1\t.\tmRNA\t300\t400\t.\t.\t.\tID=T3;Parent=G3\n",
        );

        assert_eq!(model.get("G1").unwrap().strand(), Some(&Strand::Negative));
        assert_eq!(model.get("T2").unwrap().strand(), Some(&Strand::Positive));
        assert_eq!(model.get("G3").unwrap().strand(), None);

        Ok(())
    }

    #[test]
    fn test_io_error_is_fatal() {
        let data: &[u8] = &[0xff, 0xfe, b'\n'];
        let err = Builder.try_build_from(gff::Reader::new(data)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
