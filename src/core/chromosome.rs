//! The chromosome over which a partition is computed.

use std::num::NonZeroU64;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::core::Interval;
use crate::core::Position;

/// An error related to a chromosome.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The chromosome length was zero.
    ZeroLength,
    /// The chromosome length could not be parsed.
    InvalidLength(ParseIntError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroLength => write!(f, "chromosome length must be greater than zero"),
            Error::InvalidLength(err) => write!(f, "invalid chromosome length: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A single chromosome, described only by its length.
///
/// The chromosome spans the positions `[1, length]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Chromosome(NonZeroU64);

impl Chromosome {
    /// Attempts to create a new [`Chromosome`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Chromosome;
    ///
    /// let chromosome = Chromosome::try_new(1000)?;
    /// assert_eq!(chromosome.length(), 1000);
    /// assert_eq!(chromosome.span().to_string(), "1-1000");
    ///
    /// assert!(Chromosome::try_new(0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(length: Position) -> Result<Self, Error> {
        NonZeroU64::new(length).map(Self).ok_or(Error::ZeroLength)
    }

    /// Gets the length of the chromosome.
    pub fn length(&self) -> Position {
        self.0.get()
    }

    /// Gets the interval covering the whole chromosome.
    pub fn span(&self) -> Interval {
        Interval::from_one_to(self.0)
    }
}

impl FromStr for Chromosome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.trim().parse().map_err(Error::InvalidLength)?;
        Self::try_new(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromosome_from_str() -> Result<(), Box<dyn std::error::Error>> {
        let chromosome = "2500".parse::<Chromosome>()?;
        assert_eq!(chromosome.length(), 2500);

        let err = "0".parse::<Chromosome>().unwrap_err();
        assert_eq!(err.to_string(), "chromosome length must be greater than zero");

        let err = "-5".parse::<Chromosome>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid chromosome length: invalid digit found in string"
        );

        Ok(())
    }

    #[test]
    fn test_span() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Chromosome::try_new(1)?.span(), Interval::try_new(1, 1)?);

        let span = Chromosome::try_new(Position::MAX)?.span();
        assert_eq!(span.start(), 1);
        assert_eq!(span.end(), Position::MAX);

        Ok(())
    }
}
