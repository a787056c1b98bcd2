//! A labeled-interval table reader.

use std::io::BufRead;
use std::io::{self};
use std::iter;

use crate::io::read_line;
use crate::table::Line;
use crate::table::line;

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

/// A labeled-interval table reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a table reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"feature\tstart\tend\nNC\t1\t99\n";
    /// let reader = gffpartition::table::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Attempts to read a [`Line`] from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::table::Line;
    ///
    /// let data = b"feature\tstart\tend\nNC\t1\t99\n";
    /// let mut reader = gffpartition::table::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Header)));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Row(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, None));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self, buffer: &mut String) -> Result<Option<Line>, Error> {
        let read = read_line(&mut self.0, buffer).map_err(Error::Io)?;

        match read {
            0 => Ok(None),
            _ => {
                let line = buffer.parse::<Line>().map_err(Error::Line)?;
                Ok(Some(line))
            }
        }
    }

    /// Returns an iterator over the [`Line`]s in the underlying reader.
    pub fn lines(&mut self) -> impl Iterator<Item = Result<Line, Error>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || match read_line(&mut self.0, &mut buffer) {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let data = b"feature\tstart\tend\r\nEXON\t1\t5\n\nEXON\tfive\t10\nINTRON 6 9";
        let mut reader = Reader::new(&data[..]);

        let lines = reader.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert!(matches!(lines[0], Ok(Line::Header)));
        assert!(matches!(lines[1], Ok(Line::Row(_))));
        assert!(matches!(lines[2], Ok(Line::Empty)));
        assert!(matches!(lines[3], Err(Error::Line(_))));
        assert!(matches!(lines[4], Ok(Line::Row(_))));
    }
}
