//! Pedigrees and filtering them down to the descendants of a founder set.
//!
//! A pedigree file has one whitespace-delimited record per line:
//!
//! ```text
//! ID SIRE DAM SEX PHENOTYPE
//! ```
//!
//! A parent of `0` is unknown.

use std::collections::HashMap;
use std::collections::HashSet;
use std::io::BufRead;
use std::io::Write;
use std::io::{self};
use std::str::FromStr;

use tracing::debug;

use crate::io::read_line;

/// The identifier used for an unknown parent.
pub const UNKNOWN_PARENT: &str = "0";

/// The number of fields in a pedigree record.
const NUM_RECORD_FIELDS: usize = 5;

/// An error related to parsing a pedigree [`Record`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An incorrect number of fields.
    IncorrectNumberOfFields(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(fields) => write!(
                f,
                "incorrect number of fields: expected {} fields, found {} fields",
                NUM_RECORD_FIELDS, fields
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to reading a [`Pedigree`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An invalid record on the given (1-based) line.
    InvalidRecord(usize, ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::InvalidRecord(line, err) => write!(f, "invalid record on line {line}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A single individual in a pedigree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The identifier of the individual.
    id: String,
    /// The identifier of the sire.
    sire: String,
    /// The identifier of the dam.
    dam: String,
    /// The sex.
    sex: String,
    /// The phenotype.
    phenotype: String,
}

impl Record {
    /// Gets the identifier of the individual.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the identifier of the sire, if known.
    pub fn sire(&self) -> Option<&str> {
        known(&self.sire)
    }

    /// Gets the identifier of the dam, if known.
    pub fn dam(&self) -> Option<&str> {
        known(&self.dam)
    }

    /// Gets the sex.
    pub fn sex(&self) -> &str {
        &self.sex
    }

    /// Gets the phenotype.
    pub fn phenotype(&self) -> &str {
        &self.phenotype
    }
}

/// Returns the parent identifier unless it is unknown.
fn known(parent: &str) -> Option<&str> {
    match parent {
        UNKNOWN_PARENT => None,
        id => Some(id),
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let fields = s.split_whitespace().collect::<Vec<_>>();

        if fields.len() != NUM_RECORD_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(fields.len()));
        }

        Ok(Self {
            id: fields[0].to_string(),
            sire: fields[1].to_string(),
            dam: fields[2].to_string(),
            sex: fields[3].to_string(),
            phenotype: fields[4].to_string(),
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id, self.sire, self.dam, self.sex, self.phenotype
        )
    }
}

/// The state of an individual while resolving descent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Status {
    /// Currently being resolved further up the call stack.
    InProgress,
    /// Descends from the founders.
    Yes,
    /// Does not descend from the founders.
    No,
}

/// A pedigree: the records of a pedigree file in their original order.
#[derive(Clone, Debug, Default)]
pub struct Pedigree {
    /// The records.
    records: Vec<Record>,
    /// The index of the first record for each identifier.
    index: HashMap<String, usize>,
}

impl Pedigree {
    /// Attempts to read a pedigree.
    ///
    /// Empty lines are ignored. Any malformed record is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::pedigree::Pedigree;
    ///
    /// let data = b"1 0 0 1 -9\n2 0 0 2 -9\n3 1 2 1 -9\n";
    /// let pedigree = Pedigree::try_read_from(&data[..])?;
    /// assert_eq!(pedigree.records().len(), 3);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_read_from<T>(mut reader: T) -> Result<Self>
    where
        T: BufRead,
    {
        let mut buffer = String::new();
        let mut records = Vec::new();
        let mut line_no = 0;

        loop {
            if read_line(&mut reader, &mut buffer).map_err(Error::Io)? == 0 {
                break;
            }

            line_no += 1;

            if buffer.trim().is_empty() {
                continue;
            }

            let record = buffer
                .parse::<Record>()
                .map_err(|err| Error::InvalidRecord(line_no, err))?;
            records.push(record);
        }

        Ok(Self::from_iter(records))
    }

    /// Gets the records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Gets the first record for an identifier.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|i| &self.records[*i])
    }

    /// Returns the records that descend from `founders`, in their original
    /// order.
    ///
    /// An individual descends from the founders if it is a founder itself, or
    /// if both its sire and dam are known, are present in the pedigree, and
    /// descend from the founders. An individual on a cycle of its own
    /// ancestry does not descend from the founders.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    ///
    /// use gffpartition::pedigree::Pedigree;
    ///
    /// let data = b"1 0 0 1 -9\n2 0 0 2 -9\n3 1 2 1 -9\n4 1 0 2 -9\n";
    /// let pedigree = Pedigree::try_read_from(&data[..])?;
    ///
    /// let founders = HashSet::from([String::from("1"), String::from("2")]);
    /// let ids = pedigree
    ///     .descendants_of(&founders)
    ///     .map(|record| record.id())
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(ids, vec!["1", "2", "3"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn descendants_of<'a>(
        &'a self,
        founders: &HashSet<String>,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        let mut memo = HashMap::new();

        for record in &self.records {
            self.resolve(record.id(), founders, &mut memo);
        }

        let descendants = memo
            .into_iter()
            .filter(|(_, status)| *status == Status::Yes)
            .map(|(id, _)| id)
            .collect::<HashSet<_>>();

        debug!(
            "{} of {} individuals descend from {} founders",
            descendants.len(),
            self.index.len(),
            founders.len()
        );

        self.records
            .iter()
            .filter(move |record| descendants.contains(record.id()))
    }

    /// Resolves whether a single individual descends from `founders`.
    fn resolve<'a>(
        &'a self,
        id: &'a str,
        founders: &HashSet<String>,
        memo: &mut HashMap<&'a str, Status>,
    ) -> Status {
        match memo.get(id) {
            Some(Status::InProgress) => return Status::No,
            Some(status) => return *status,
            None => {}
        }

        if founders.contains(id) {
            memo.insert(id, Status::Yes);
            return Status::Yes;
        }

        let record = match self.get(id) {
            Some(record) => record,
            None => {
                memo.insert(id, Status::No);
                return Status::No;
            }
        };

        let (sire, dam) = match (record.sire(), record.dam()) {
            (Some(sire), Some(dam)) => (sire, dam),
            _ => {
                memo.insert(id, Status::No);
                return Status::No;
            }
        };

        memo.insert(id, Status::InProgress);

        let status = match self.resolve(sire, founders, memo) {
            Status::Yes => match self.resolve(dam, founders, memo) {
                Status::Yes => Status::Yes,
                _ => Status::No,
            },
            _ => Status::No,
        };

        memo.insert(id, status);
        status
    }
}

impl FromIterator<Record> for Pedigree {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let records = iter.into_iter().collect::<Vec<_>>();
        let mut index = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            index.entry(record.id.clone()).or_insert(i);
        }

        Self { records, index }
    }
}

/// Writes pedigree records, one per line.
pub fn write_records<'a, W, I>(writer: &mut W, records: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    for record in records {
        writeln!(writer, "{}", record)?;
    }

    writer.flush()
}
