//! Reading GFF3 gene models.
//!
//! Only the subset of GFF3 needed to build a gene model is interpreted: the
//! sequence id, the feature type, the start and end positions, and the `ID`
//! and `Parent` attributes. Everything else on a line is ignored.

pub mod line;
pub mod reader;
pub mod record;

pub use line::Line;
pub use reader::Reader;
pub use record::Record;
