//! A line within a GFF3 file.

use std::str::FromStr;

use crate::gff::record;
use crate::gff::record::Record;

/// The prefix for comment and directive lines.
pub const COMMENT_PREFIX: char = '#';

/// An error associated with parsing a GFF3 line.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid feature record.
    InvalidRecord(record::ParseError, String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidRecord(err, line) => {
                write!(f, "invalid feature record: {}\n\nline: {}", err, line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A line within a GFF3 file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,
    /// A comment or directive line (the text after the `#`).
    Comment(String),
    /// A feature record line.
    Record(Record),
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Ok(Self::Empty)
        } else if let Some(comment) = s.strip_prefix(COMMENT_PREFIX) {
            Ok(Self::Comment(comment.to_string()))
        } else {
            s.parse::<Record>()
                .map(Line::Record)
                .map_err(|e| ParseError::InvalidRecord(e, s.into()))
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_empty_line() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("".parse::<Line>()?, Line::Empty);
        assert_eq!("  \t".parse::<Line>()?, Line::Empty);
        Ok(())
    }

    #[test]
    pub fn test_comment_lines() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            "##gff-version 3".parse::<Line>()?,
            Line::Comment(String::from("#gff-version 3"))
        );
        assert_eq!(
            "#chr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1".parse::<Line>()?,
            Line::Comment(String::from("chr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1"))
        );
        Ok(())
    }

    #[test]
    pub fn test_record_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "chr1\t.\texon\t1\t5\t.\t+\t.\tParent=T1".parse::<Line>()?;
        assert!(matches!(line, Line::Record(_)));
        Ok(())
    }

    #[test]
    pub fn test_invalid_record_line() {
        let err = "chr1\t.\texon\tx\t5\t.\t+\t.\tParent=T1"
            .parse::<Line>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid feature record: invalid start: invalid digit found in string\n\n\
             line: chr1\t.\texon\tx\t5\t.\t+\t.\tParent=T1"
        );
    }
}
