//! Functionality for working with gene DNA sequences.
//!
//! [`SequenceDataset`] joins each record's histone features with the one-hot
//! encoding of its gene's sequence. The encoding is defined by the closed
//! [`nucleotide::Nucleotide`] alphabet, and sequences are read from a
//! `id,sequence` table with [`table::read_sequence_table`].
//!
//! [`SequenceDataset`]: crate::dataset::SequenceDataset

pub mod nucleotide;
pub mod table;
