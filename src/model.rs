//! Gene models: genes, their transcripts, and their exons.
//!
//! A [`GeneModel`] is built from GFF3 feature records by a [`Builder`].
//! Transcripts are keyed by their `ID` and linked to their gene through their
//! `Parent`; exons are linked to their transcript(s) through their `Parent`.
//! Once every record has been read, transcripts are grouped into [`Gene`]s.

use std::collections::HashMap;
use std::collections::hash_map;

pub mod builder;
pub mod gene;
pub mod transcript;

pub use builder::Builder;
pub use gene::Gene;
pub use transcript::Transcript;

/// A gene model: a mapping from gene identifier to [`Gene`].
#[derive(Clone, Debug, Default)]
pub struct GeneModel {
    /// The genes keyed by identifier.
    genes: HashMap<String, Gene>,
    /// The number of records skipped while building the model.
    skipped: usize,
}

impl GeneModel {
    /// Creates a new [`GeneModel`].
    pub fn new(genes: HashMap<String, Gene>, skipped: usize) -> Self {
        Self { genes, skipped }
    }

    /// Gets a gene by its identifier.
    pub fn get(&self, id: &str) -> Option<&Gene> {
        self.genes.get(id)
    }

    /// Gets the number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns whether the model contains no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Gets the number of records that were skipped because they were
    /// malformed or could not be linked to a transcript.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Iterates over the genes in arbitrary order.
    pub fn genes(&self) -> hash_map::Values<'_, String, Gene> {
        self.genes.values()
    }
}
