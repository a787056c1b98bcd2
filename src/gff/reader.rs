//! A GFF3 reader.

use std::io::BufRead;
use std::io::{self};
use std::iter;

use crate::gff::Line;
use crate::gff::line;
use crate::io::read_line;

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line error.
    Line(line::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Line(err) => write!(f, "line error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A GFF3 reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a GFF3 reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\nchr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1";
    /// let reader = gffpartition::gff::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"##gff-version 3\r\nchr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1";
    /// let mut reader = gffpartition::gff::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 17);
    /// assert_eq!(buffer, "##gff-version 3");
    ///
    /// reader.read_line_raw(&mut buffer)?;
    /// assert_eq!(buffer, "chr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(&mut self.0, buffer)
    }

    /// Attempts to read a [`Line`] from the underlying reader.
    ///
    /// A line that cannot be parsed is reported as an [`Error::Line`], which
    /// callers are free to skip; the reader remains usable afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::gff::Line;
    /// use gffpartition::gff::reader::Error;
    ///
    /// let data = b"##gff-version 3\nchr1\t.\texon\tX\t5\t.\t+\t.\tParent=T1\n\
    ///              chr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1";
    /// let mut reader = gffpartition::gff::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Comment(_))));
    /// assert!(matches!(reader.read_line(&mut buffer), Err(Error::Line(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Record(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, None));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self, buffer: &mut String) -> Result<Option<Line>, Error> {
        let read = self.read_line_raw(buffer).map_err(Error::Io)?;

        match read {
            0 => Ok(None),
            _ => {
                let line = buffer.parse::<Line>().map_err(Error::Line)?;
                Ok(Some(line))
            }
        }
    }

    /// Returns an iterator over the [`Line`]s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\nchr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1\n\n";
    /// let mut reader = gffpartition::gff::Reader::new(&data[..]);
    ///
    /// let lines = reader.lines().collect::<Vec<_>>();
    /// assert_eq!(lines.len(), 3);
    /// ```
    pub fn lines(&mut self) -> impl Iterator<Item = Result<Line, Error>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || match self.read_line_raw(&mut buffer) {
            Ok(0) => None,
            Ok(_) => Some(buffer.parse().map_err(Error::Line)),
            Err(e) => Some(Err(Error::Io(e))),
        })
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}
