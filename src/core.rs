//! Core functionality used across the crate.

use omics::coordinate::position::Number;

pub mod chromosome;
pub mod interval;
pub mod label;

pub use chromosome::Chromosome;
pub use interval::Interval;
pub use label::Label;
pub use label::LabeledInterval;

/// A 1-based position on a chromosome.
pub type Position = Number;
