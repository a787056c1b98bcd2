//! A labeled-interval table writer.

use std::io::Write;
use std::io::{self};

use crate::core::LabeledInterval;
use crate::table::HEADER;

/// A labeled-interval table writer.
///
/// The header line is written before the first row (or on
/// [`finish()`](Writer::finish) if there are no rows).
#[derive(Debug)]
pub struct Writer<W>
where
    W: Write,
{
    /// The inner writer.
    inner: W,
    /// Whether the header has been written.
    header_written: bool,
}

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates a table writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            header_written: false,
        }
    }

    /// Writes a single labeled interval as a row.
    ///
    /// # Examples
    ///
    /// ```
    /// use gffpartition::core::Interval;
    /// use gffpartition::core::Label;
    /// use gffpartition::core::LabeledInterval;
    ///
    /// let mut writer = gffpartition::table::Writer::new(Vec::new());
    /// writer.write_interval(&LabeledInterval::new(Label::Nc, Interval::try_new(1, 99)?))?;
    ///
    /// let output = writer.finish()?;
    /// assert_eq!(output, b"feature\tstart\tend\nNC\t1\t99\n");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_interval(&mut self, interval: &LabeledInterval) -> io::Result<()> {
        self.write_header()?;
        writeln!(self.inner, "{}", interval)
    }

    /// Writes every labeled interval in order.
    pub fn write_all<'a, I>(&mut self, intervals: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a LabeledInterval>,
    {
        for interval in intervals {
            self.write_interval(interval)?;
        }

        Ok(())
    }

    /// Flushes the writer and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.write_header()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    /// Writes the header line if it has not been written yet.
    fn write_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.inner, "{}", HEADER)?;
            self.header_written = true;
        }

        Ok(())
    }
}
