//! Labeled-interval tables.
//!
//! A labeled-interval table is the persisted form of a
//! [`Partition`](crate::partition::Partition): a header line followed by one
//! whitespace-delimited `label start end` row per interval, sorted by start
//! position.
//!
//! ```text
//! feature	start	end
//! NC	1	99
//! EXON	100	150
//! INTRON	151	199
//! EXON	200	250
//! NC	251	1000
//! ```

pub mod line;
pub mod reader;
pub mod writer;

pub use line::Line;
pub use line::Row;
pub use reader::Reader;
pub use writer::Writer;

/// The header line of a labeled-interval table.
pub const HEADER: &str = "feature\tstart\tend";
