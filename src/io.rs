//! Shared facilities for reading line-oriented text files.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::{self};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The file extension that marks a gzip-compressed file.
const GZIP_EXTENSION: &str = "gz";

/// Reads a line from a buffered reader, stripping the trailing line ending
/// (`\n` or `\r\n`).
///
/// Returns the number of bytes read, including the stripped line ending.
pub(crate) fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

/// Opens a file for buffered reading, transparently decompressing it if the
/// path ends in `.gz`.
///
/// # Examples
///
/// ```no_run
/// let reader = gffpartition::io::open("annotation.gff3.gz")?;
/// let reader = gffpartition::gff::Reader::new(reader);
///
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn open<P>(path: P) -> io::Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_gzipped = path
        .extension()
        .map(|ext| ext == GZIP_EXTENSION)
        .unwrap_or(false);

    Ok(buffered(file, is_gzipped))
}

/// Wraps a reader in a buffer, decompressing it first if it is gzipped.
fn buffered<R>(reader: R, is_gzipped: bool) -> Box<dyn BufRead>
where
    R: Read + 'static,
{
    if is_gzipped {
        Box::new(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        Box::new(BufReader::new(reader))
    }
}
