//! `gffpartition` is a crate for partitioning a chromosome into exonic,
//! intronic, and intergenic intervals from a GFF3 gene model.
//!
//! The crate provides three main points of entry:
//!
//! - Reading GFF3 feature records and grouping them into a gene model.
//! - Assembling a labelled partition of a chromosome from that gene model.
//! - Re-deriving summary statistics from a labelled-interval table.
//!
//! ## Building a gene model
//!
//! GFF3 lines are read with a [`gff::Reader`]. Most users will not want to
//! work with the raw [feature records](crate::gff::Record), and will instead
//! hand the reader to a [`model::Builder`], which links exons to their
//! transcripts and transcripts to their genes. Malformed records are skipped
//! rather than treated as errors.
//!
//! Positions are [`omics`] coordinate numbers interpreted as 1-based, and the
//! strand of each feature is an [`omics::coordinate::Strand`].
//!
//! ## Partitioning a chromosome
//!
//! A [`partition::Builder`] lays out each gene of a
//! [`GeneModel`](crate::model::GeneModel) (merging its exons and deriving the
//! introns between them) and then labels everything outside of every gene as
//! intergenic (`NC`). The resulting [`Partition`](crate::partition::Partition)
//! can be written out with a [`table::Writer`].
//!
//! ```
//! use gffpartition::core::Chromosome;
//! use gffpartition::gff;
//! use gffpartition::model;
//! use gffpartition::partition;
//! use gffpartition::table;
//!
//! let data = b"##gff-version 3\n\
//!              chr1\t.\tmRNA\t100\t250\t.\t+\t.\tID=transcript:T1;Parent=gene:G1\n\
//!              chr1\t.\texon\t100\t150\t.\t+\t.\tParent=transcript:T1\n\
//!              chr1\t.\texon\t200\t250\t.\t+\t.\tParent=transcript:T1\n";
//! let reader = gff::Reader::new(&data[..]);
//! let model = model::Builder.try_build_from(reader)?;
//!
//! let chromosome = Chromosome::try_new(1000)?;
//! let partition = partition::Builder::default().build_from(&model, &chromosome);
//!
//! let mut writer = table::Writer::new(Vec::new());
//! writer.write_all(partition.intervals())?;
//! let output = String::from_utf8(writer.finish()?)?;
//!
//! assert_eq!(
//!     output,
//!     "feature\tstart\tend\n\
//!      NC\t1\t99\n\
//!      EXON\t100\t150\n\
//!      INTRON\t151\t199\n\
//!      EXON\t200\t250\n\
//!      NC\t251\t1000\n"
//! );
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Statistics
//!
//! A [`stats::Reducer`] reads a labelled-interval table back in (see
//! [`stats::Reducer::try_reduce_from()`]) and computes the per-label counts,
//! mean lengths, and percentages of the covered length. It only relies on the
//! table, so it doubles as a consistency check on a partition.
//!
//! ## Pedigrees
//!
//! Separately, the [`pedigree`] module filters a pedigree down to the
//! individuals that descend from a set of founders.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod core;
pub mod gff;
pub mod io;
pub mod model;
pub mod partition;
pub mod pedigree;
pub mod stats;
pub mod table;
