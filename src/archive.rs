//! Reading histone archives, and splitting cell type arrays into identifiers,
//! features, and labels.
//!
//! An archive is an `.npz` file written by e.g. `numpy.savez()`, where each
//! entry is named by its cell type. Cell types are always enumerated in the
//! archive's own entry order, never sorted.

use indexmap::IndexMap;
use ndarray::{s, Array1, Array3, ArrayD, Ix3};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError};
use num_traits::ToPrimitive;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::HistoneError;
use crate::layout::{ArchiveLayout, NUM_MARKS};
use crate::GeneId;

/// An open histone archive.
pub struct Archive {
    filepath: PathBuf,
    reader: NpzReader<File>,
    // cell type -> zip entry name
    entries: IndexMap<String, String>,
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("filepath", &self.filepath)
            .field("cell_types", &self.entries.keys())
            .finish_non_exhaustive()
    }
}

impl Archive {
    /// Open an `.npz` archive and index its cell type entries.
    pub fn open(filepath: impl Into<PathBuf>) -> Result<Self, HistoneError> {
        let filepath = filepath.into();
        let file = File::open(&filepath)?;
        let mut reader = NpzReader::new(file)?;

        let entries = reader
            .names()?
            .into_iter()
            .map(|name| {
                let cell_type = name.strip_suffix(".npy").unwrap_or(&name).to_string();
                (cell_type, name)
            })
            .collect();

        Ok(Self {
            filepath,
            reader,
            entries,
        })
    }

    /// The path this archive was opened from.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// All cell types, in archive order.
    pub fn cell_types(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of cell types in the archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no cell types.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read the full `[genes, bins, columns]` array of one cell type.
    ///
    /// Arrays stored as `f32` are widened to `f64`.
    pub fn read_cell_type(&mut self, cell_type: &str) -> Result<Array3<f64>, HistoneError> {
        let entry = self
            .entries
            .get(cell_type)
            .ok_or(HistoneError::MissingCellType(cell_type.to_string()))?;

        let array: ArrayD<f64> = match self.reader.by_name(entry) {
            Ok(array) => array,
            Err(ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_))) => {
                let narrow: ArrayD<f32> = self.reader.by_name(entry)?;
                narrow.mapv(f64::from)
            }
            Err(e) => return Err(e.into()),
        };

        if array.ndim() != 3 {
            return Err(HistoneError::WrongArchiveDimensions {
                cell_type: cell_type.to_string(),
                ndim: array.ndim(),
            });
        }
        Ok(array.into_dimensionality::<Ix3>()?)
    }
}

/// The identifiers, features, and labels of a single cell type.
#[derive(Clone, Debug)]
pub struct CellTypeArrays {
    pub cell_type: String,
    /// `[genes]` gene identifiers, from bin 0.
    pub ids: Array1<GeneId>,
    /// `[genes, bins, 5]` histone marks.
    pub features: Array3<f64>,
    /// `[genes]` expression values, from bin 0.
    pub labels: Array1<f64>,
}

impl CellTypeArrays {
    /// Split a cell type's `[genes, bins, columns]` array according to `layout`.
    ///
    /// Identifiers and expression values are read from the first bin only;
    /// they are assumed constant across bins (see
    /// [`validation::check_constant_across_bins`]).
    ///
    /// [`validation::check_constant_across_bins`]: crate::validation::check_constant_across_bins
    pub fn split(
        cell_type: &str,
        data: &Array3<f64>,
        layout: &ArchiveLayout,
    ) -> Result<Self, HistoneError> {
        let (genes, bins, columns) = data.dim();
        if columns != layout.num_columns {
            return Err(HistoneError::ColumnCountMismatch {
                cell_type: cell_type.to_string(),
                found: columns,
                expected: layout.num_columns,
            });
        }
        // ids and labels come from bin 0
        if bins == 0 {
            return Err(HistoneError::NoBins {
                cell_type: cell_type.to_string(),
            });
        }

        let ids = data
            .slice(s![.., 0, layout.gene_id])
            .iter()
            .map(|&value| to_gene_id(value))
            .collect::<Result<Array1<GeneId>, _>>()?;
        let features = data.slice(s![.., .., layout.marks()]).to_owned();
        let labels = data.slice(s![.., 0, layout.expression]).to_owned();
        debug_assert_eq!(features.dim().2, NUM_MARKS);

        debug!(cell_type, genes, bins, "split cell type array");
        Ok(Self {
            cell_type: cell_type.to_string(),
            ids,
            features,
            labels,
        })
    }

    /// Number of genes (records) in this cell type.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bins per gene.
    pub fn bins(&self) -> usize {
        self.features.dim().1
    }
}

/// Convert an archive gene identifier value to a [`GeneId`].
pub fn to_gene_id(value: f64) -> Result<GeneId, HistoneError> {
    if value.fract() != 0.0 {
        return Err(HistoneError::InvalidGeneId(value));
    }
    value.to_i64().ok_or(HistoneError::InvalidGeneId(value))
}
