//! The [`HistoneError`] `enum` definition and error messages.
//!
use crate::GeneId;
use ndarray::ShapeError;
use ndarray_npy::{ReadNpyError, ReadNpzError, WriteNpyError};
use thiserror::Error;

/// The [`HistoneError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum HistoneError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Sequence table parsing error: {0}")]
    CsvError(#[from] csv::Error),

    // Archive related errors
    #[error("Archive reading error: {0}")]
    NpzError(#[from] ReadNpzError),
    #[error("Array shape error: {0}")]
    ShapeError(#[from] ShapeError),
    #[error("Archive contains no cell types with genes")]
    EmptyArchive,
    #[error("Cell type '{0}' is not in the archive")]
    MissingCellType(String),
    #[error("Cell type '{cell_type}' has {found} columns per bin, expected {expected}")]
    ColumnCountMismatch {
        cell_type: String,
        found: usize,
        expected: usize,
    },
    #[error("Cell type '{cell_type}' has {found} bins per gene, but earlier cell types have {expected}")]
    BinCountMismatch {
        cell_type: String,
        found: usize,
        expected: usize,
    },
    #[error("Cell type '{cell_type}' has no bins per gene")]
    NoBins { cell_type: String },
    #[error("Cell type '{cell_type}' has an array with {ndim} dimensions, expected 3 (genes, bins, columns)")]
    WrongArchiveDimensions { cell_type: String, ndim: usize },
    #[error("Gene identifier value {0} is not an integer")]
    InvalidGeneId(f64),

    // Record access errors
    #[error("Record index {0} is out of bounds for a dataset of {1} records")]
    IndexOutOfBounds(usize, usize),
    #[error("Gene identifier {0} has no entry in the sequence table")]
    MissingGeneSequence(GeneId),

    // Sequence encoding errors
    #[error("Invalid nucleotide '{character}' at position {position}: must be one of A, C, T, G, N")]
    InvalidNucleotide { character: char, position: usize },

    // Cache related errors
    #[error("Cache array reading error: {0}")]
    CacheReadError(#[from] ReadNpyError),
    #[error("Cache array writing error: {0}")]
    CacheWriteError(#[from] WriteNpyError),
    #[error("Cached arrays are inconsistent: {0}")]
    CacheShapeMismatch(String),
    #[error("Cached cell type name at record {0} is not valid UTF-8")]
    InvalidCellTypeName(usize),
}
