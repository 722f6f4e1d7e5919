//! Dataset types: [`SequenceDataset`] and [`CachedDataset`].
//!
//! Both types build the same [`HistoneArrays`] from an archive and serve
//! [`Record`]s through [`IndexedDataset`]. They differ in what is attached
//! to each record:
//!
//!  - [`SequenceDataset`] joins each gene's histone features with the one-hot
//!    encoding of its DNA sequence, stacked along the bin axis.
//!  - [`CachedDataset`] returns the features unchanged, together with the
//!    feature tensor's `width` and `height`. Its arrays can be read from or
//!    written to a cache directory (see [`crate::cache`]).
//!
//! The two are deliberately separate types; a sequence join cannot be
//! combined with the cache.

use indexmap::IndexMap;
use ndarray::{concatenate, Array2, Axis};
use std::path::PathBuf;

use crate::arrays::HistoneArrays;
use crate::cache::{read_cache, write_cache, CacheOptions};
use crate::error::HistoneError;
use crate::layout::ArchiveLayout;
use crate::reporting::Report;
use crate::sequences::table::read_sequence_table;
use crate::traits::IndexedDataset;
use crate::GeneId;

/// Options shared by both dataset types.
#[derive(Clone, Debug, Default)]
pub struct DatasetOptions {
    /// An optional subset of cell types to load, in the order given. By
    /// default all cell types are loaded in archive order.
    pub cell_types: Option<Vec<String>>,
    /// Check that identifiers and expression values are constant across
    /// bins, collecting any violations into a [`Report`].
    pub validate: bool,
    /// The archive column contract.
    pub layout: ArchiveLayout,
}

/// The dimensions of a record's feature tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureShape {
    /// Number of columns (histone marks).
    pub width: usize,
    /// Number of rows (bins).
    pub height: usize,
}

/// A single dataset record.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub cell_type: String,
    pub id: GeneId,
    /// `[rows, 5]` features.
    pub features: Array2<f64>,
    /// The gene's expression value.
    pub label: f64,
    /// Set by [`CachedDataset`] only.
    pub shape: Option<FeatureShape>,
}

/// Histone features joined with one-hot encoded gene sequences.
#[derive(Debug)]
pub struct SequenceDataset {
    arrays: HistoneArrays,
    sequences: IndexMap<GeneId, Array2<f64>>,
    report: Report,
}

impl SequenceDataset {
    /// Build from an archive and a sequence table (see
    /// [`read_sequence_table`]), loading all cell types.
    pub fn new(
        archive: impl Into<PathBuf>,
        sequence_table: impl Into<PathBuf>,
    ) -> Result<Self, HistoneError> {
        Self::with_options(archive, sequence_table, &DatasetOptions::default())
    }

    /// Build from an archive and a sequence table with [`DatasetOptions`].
    ///
    /// Every sequence is encoded up front, so a sequence with a character
    /// outside `{A, C, T, G, N}` fails construction, whether or not its gene
    /// is in the archive.
    pub fn with_options(
        archive: impl Into<PathBuf>,
        sequence_table: impl Into<PathBuf>,
        options: &DatasetOptions,
    ) -> Result<Self, HistoneError> {
        let (arrays, report) = HistoneArrays::from_archive(archive, options)?;
        let sequences = read_sequence_table(sequence_table)?;
        Ok(Self {
            arrays,
            sequences,
            report,
        })
    }

    pub fn arrays(&self) -> &HistoneArrays {
        &self.arrays
    }

    /// The one-hot encoded sequence of a gene, if it is in the sequence table.
    pub fn sequence(&self, id: GeneId) -> Option<&Array2<f64>> {
        self.sequences.get(&id)
    }

    /// Issues found while validating the archive.
    pub fn report(&self) -> &Report {
        &self.report
    }
}

impl IndexedDataset for SequenceDataset {
    fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Retrieve the record at `index`, with features of shape
    /// `[bins + sequence length, 5]`.
    fn get(&self, index: usize) -> Result<Record, HistoneError> {
        let mut record = self.arrays.record(index)?;
        let sequence = self
            .sequences
            .get(&record.id)
            .ok_or(HistoneError::MissingGeneSequence(record.id))?;
        record.features = concatenate(Axis(0), &[record.features.view(), sequence.view()])?;
        Ok(record)
    }
}

/// Histone features, optionally backed by an on-disk cache.
#[derive(Debug)]
pub struct CachedDataset {
    arrays: HistoneArrays,
    report: Report,
}

impl CachedDataset {
    /// Build from a cache directory or an archive, according to `cache`.
    pub fn new(archive: impl Into<PathBuf>, cache: &CacheOptions) -> Result<Self, HistoneError> {
        Self::with_options(archive, cache, &DatasetOptions::default())
    }

    /// Build with [`DatasetOptions`].
    ///
    /// If `cache` has a read directory, the arrays are loaded from
    /// `{read}/{mode}/` and the archive is not opened; `options` then has no
    /// effect. Otherwise the arrays are built from the archive, and written
    /// to `{write}/{mode}/` if `cache` has a write directory.
    pub fn with_options(
        archive: impl Into<PathBuf>,
        cache: &CacheOptions,
        options: &DatasetOptions,
    ) -> Result<Self, HistoneError> {
        if let Some(read_dir) = &cache.read {
            let arrays = read_cache(read_dir, &cache.mode)?;
            return Ok(Self {
                arrays,
                report: Report::new(),
            });
        }

        let (arrays, report) = HistoneArrays::from_archive(archive, options)?;
        if let Some(write_dir) = &cache.write {
            write_cache(&arrays, write_dir, &cache.mode)?;
        }
        Ok(Self { arrays, report })
    }

    pub fn arrays(&self) -> &HistoneArrays {
        &self.arrays
    }

    /// The feature tensor dimensions, read from the first record.
    pub fn shape(&self) -> FeatureShape {
        FeatureShape {
            width: self.arrays.width(),
            height: self.arrays.height(),
        }
    }

    /// Issues found while validating the archive.
    pub fn report(&self) -> &Report {
        &self.report
    }
}

impl IndexedDataset for CachedDataset {
    fn len(&self) -> usize {
        self.arrays.len()
    }

    fn get(&self, index: usize) -> Result<Record, HistoneError> {
        let mut record = self.arrays.record(index)?;
        record.shape = Some(self.shape());
        Ok(record)
    }
}
