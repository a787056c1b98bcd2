//! A GFF3 feature record.

pub mod attributes;

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::Strand;
use omics::coordinate::strand;

use crate::core::Interval;
use crate::core::interval;

pub use attributes::Attributes;

/// The delimiter for a feature record.
pub const RECORD_DELIMITER: char = '\t';

/// The minimum number of expected fields in a feature record.
pub const NUM_RECORD_FIELDS: usize = 9;

/// The feature types that describe a transcript (compared
/// case-insensitively).
pub const TRANSCRIPT_FEATURE_TYPES: &[&str] = &["mrna", "lnc_rna", "ncrna"];

/// The feature type that describes an exon (compared case-insensitively).
pub const EXON_FEATURE_TYPE: &str = "exon";

/// The strand values that mean the strand is not stranded or not known.
pub const UNSTRANDED: &[&str] = &[".", "?"];

/// An error associated with parsing a feature record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the record.
    IncorrectNumberOfFields(usize),
    /// An invalid start position.
    InvalidStart(ParseIntError),
    /// An invalid end position.
    InvalidEnd(ParseIntError),
    /// The start and end positions do not form a valid interval.
    InvalidInterval(interval::Error),
    /// An invalid strand.
    InvalidStrand(strand::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in record: expected at least {} fields, found {} fields",
                NUM_RECORD_FIELDS, n
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {}", err),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {}", err),
            ParseError::InvalidInterval(err) => write!(f, "invalid interval: {}", err),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

/// The kind of feature described by a record, as far as building a gene
/// model is concerned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A transcript (`mRNA`, `lnc_RNA`, or `ncRNA`).
    Transcript,
    /// An exon.
    Exon,
    /// Any other feature type (genes, CDS, UTRs, ...).
    Other,
}

impl Kind {
    /// Classifies a raw feature type.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::record::Kind;
    ///
    /// assert_eq!(Kind::from_feature_type("mRNA"), Kind::Transcript);
    /// assert_eq!(Kind::from_feature_type("lnc_RNA"), Kind::Transcript);
    /// assert_eq!(Kind::from_feature_type("EXON"), Kind::Exon);
    /// assert_eq!(Kind::from_feature_type("CDS"), Kind::Other);
    /// ```
    pub fn from_feature_type(feature_type: &str) -> Self {
        let feature_type = feature_type.to_ascii_lowercase();

        if feature_type == EXON_FEATURE_TYPE {
            Kind::Exon
        } else if TRANSCRIPT_FEATURE_TYPES.contains(&feature_type.as_str()) {
            Kind::Transcript
        } else {
            Kind::Other
        }
    }
}

/// A feature record within a GFF3 file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The sequence id (column 1).
    seqid: String,
    /// The raw feature type (column 3).
    feature_type: String,
    /// The kind of feature.
    kind: Kind,
    /// The 1-based, closed interval (columns 4 and 5).
    interval: Interval,
    /// The strand (column 7), if the feature is stranded.
    strand: Option<Strand>,
    /// The linking attributes (column 9).
    attributes: Attributes,
}

impl Record {
    /// Returns the sequence id of the record.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::Record;
    ///
    /// let record = "chr1\t.\texon\t100\t150\t.\t+\t.\tParent=T1".parse::<Record>()?;
    /// assert_eq!(record.seqid(), "chr1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn seqid(&self) -> &str {
        &self.seqid
    }

    /// Returns the raw feature type of the record.
    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    /// Returns the kind of the record.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::Record;
    /// use gffpartition::gff::record::Kind;
    ///
    /// let record = "chr1\t.\tmRNA\t100\t250\t.\t+\t.\tID=T1;Parent=G1".parse::<Record>()?;
    /// assert_eq!(record.kind(), &Kind::Transcript);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Returns the interval of the record.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::Record;
    ///
    /// let record = "chr1\t.\texon\t100\t150\t.\t+\t.\tParent=T1".parse::<Record>()?;
    /// assert_eq!(record.interval().start(), 100);
    /// assert_eq!(record.interval().end(), 150);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Returns the strand of the record, if the feature is stranded.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::Record;
    /// use omics::coordinate::Strand;
    ///
    /// let record = "chr1\t.\texon\t100\t150\t.\t-\t.\tParent=T1".parse::<Record>()?;
    /// assert_eq!(record.strand(), Some(&Strand::Negative));
    ///
    /// let record = "chr1\t.\texon\t100\t150\t.\t.\t.\tParent=T1".parse::<Record>()?;
    /// assert_eq!(record.strand(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strand(&self) -> Option<&Strand> {
        self.strand.as_ref()
    }

    /// Returns the attributes of the record.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.trim_end().split(RECORD_DELIMITER).collect::<Vec<_>>();
        if parts.len() < NUM_RECORD_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parts[3].trim().parse().map_err(ParseError::InvalidStart)?;
        let end = parts[4].trim().parse().map_err(ParseError::InvalidEnd)?;
        let interval = Interval::try_new(start, end).map_err(ParseError::InvalidInterval)?;

        let strand = match parts[6].trim() {
            value if UNSTRANDED.contains(&value) => None,
            value => Some(value.parse::<Strand>().map_err(ParseError::InvalidStrand)?),
        };

        let feature_type = parts[2].to_string();
        let kind = Kind::from_feature_type(&feature_type);

        let attributes = match parts[8].parse::<Attributes>() {
            Ok(attributes) => attributes,
            Err(never) => match never {},
        };

        Ok(Record {
            seqid: parts[0].to_string(),
            feature_type,
            kind,
            interval,
            strand,
            attributes,
        })
    }
}
