//! The aligned derived arrays shared by all dataset types.
//!
//! [`HistoneArrays`] holds four arrays that are index-aligned: entry `i` of
//! `ids`, `features`, `labels`, and `cell_types` all describe record `i`.
//! Records are grouped contiguously by cell type, in archive order.

use indexmap::IndexMap;
use ndarray::{concatenate, Array1, Array2, Array3, ArrayView1, ArrayView3, Axis};
use std::path::PathBuf;
use tracing::info;

use crate::archive::{Archive, CellTypeArrays};
use crate::dataset::{DatasetOptions, Record};
use crate::error::HistoneError;
use crate::reporting::Report;
use crate::validation::check_constant_across_bins;
use crate::GeneId;

/// Per-record identifiers, features, labels, and cell types.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoneArrays {
    ids: Array1<GeneId>,
    features: Array3<f64>,
    labels: Array1<f64>,
    cell_types: Vec<String>,
    width: usize,
    height: usize,
}

impl HistoneArrays {
    /// Build the derived arrays by reshaping every cell type in an archive.
    ///
    /// Cell types are processed in archive order, or in the order given by
    /// `options.cell_types`. If `options.validate` is set, each cell type is
    /// checked for identifiers and expression values that vary across bins;
    /// any issues are returned in the [`Report`], but never cause an error.
    pub fn from_archive(
        filepath: impl Into<PathBuf>,
        options: &DatasetOptions,
    ) -> Result<(Self, Report), HistoneError> {
        let mut archive = Archive::open(filepath)?;
        let mut report = Report::new();

        let cell_types = match &options.cell_types {
            Some(selected) => selected.clone(),
            None => archive.cell_types(),
        };
        info!(
            archive = %archive.filepath().display(),
            cell_types = cell_types.len(),
            "loading histone archive"
        );

        let mut pieces = Vec::with_capacity(cell_types.len());
        for cell_type in &cell_types {
            let data = archive.read_cell_type(cell_type)?;
            if options.validate {
                check_constant_across_bins(cell_type, &data, &options.layout, &mut report);
            }
            pieces.push(CellTypeArrays::split(cell_type, &data, &options.layout)?);
        }

        let arrays = Self::concatenate(&pieces)?;
        info!(
            records = arrays.len(),
            width = arrays.width,
            height = arrays.height,
            "built histone arrays"
        );
        Ok((arrays, report))
    }

    /// Concatenate per cell type arrays along the record axis, in order.
    pub fn concatenate(pieces: &[CellTypeArrays]) -> Result<Self, HistoneError> {
        let first = pieces.first().ok_or(HistoneError::EmptyArchive)?;
        let bins = first.bins();
        for piece in pieces {
            if piece.bins() != bins {
                return Err(HistoneError::BinCountMismatch {
                    cell_type: piece.cell_type.clone(),
                    found: piece.bins(),
                    expected: bins,
                });
            }
        }

        let ids = concatenate(
            Axis(0),
            &pieces.iter().map(|p| p.ids.view()).collect::<Vec<_>>(),
        )?;
        let features = concatenate(
            Axis(0),
            &pieces.iter().map(|p| p.features.view()).collect::<Vec<_>>(),
        )?;
        let labels = concatenate(
            Axis(0),
            &pieces.iter().map(|p| p.labels.view()).collect::<Vec<_>>(),
        )?;
        let cell_types = pieces
            .iter()
            .flat_map(|p| std::iter::repeat(p.cell_type.clone()).take(p.len()))
            .collect();

        Self::from_parts(ids, features, labels, cell_types)
    }

    /// Assemble from already aligned arrays.
    ///
    /// `width` and `height` are taken from the first record's feature tensor,
    /// so there must be at least one record.
    pub(crate) fn from_parts(
        ids: Array1<GeneId>,
        features: Array3<f64>,
        labels: Array1<f64>,
        cell_types: Vec<String>,
    ) -> Result<Self, HistoneError> {
        debug_assert_eq!(ids.len(), labels.len());
        debug_assert_eq!(features.len_of(Axis(0)), labels.len());
        debug_assert_eq!(cell_types.len(), labels.len());

        if labels.is_empty() {
            return Err(HistoneError::EmptyArchive);
        }
        let first = features.index_axis(Axis(0), 0);
        let height = first.shape()[0];
        let width = first.shape()[1];

        Ok(Self {
            ids,
            features,
            labels,
            cell_types,
            width,
            height,
        })
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no records. Construction guarantees at least one.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of feature columns (histone marks) per record.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of feature rows (bins) per record.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn ids(&self) -> ArrayView1<'_, GeneId> {
        self.ids.view()
    }

    pub fn features(&self) -> ArrayView3<'_, f64> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.labels.view()
    }

    pub fn cell_types(&self) -> &[String] {
        &self.cell_types
    }

    /// Record counts per cell type, in record order.
    pub fn cell_type_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for cell_type in &self.cell_types {
            *counts.entry(cell_type.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The `[height, width]` feature tensor of record `index`.
    pub fn feature(&self, index: usize) -> Result<Array2<f64>, HistoneError> {
        self.check_index(index)?;
        Ok(self.features.index_axis(Axis(0), index).to_owned())
    }

    /// Build the [`Record`] at `index`, without any attached shape.
    pub fn record(&self, index: usize) -> Result<Record, HistoneError> {
        self.check_index(index)?;
        Ok(Record {
            cell_type: self.cell_types[index].clone(),
            id: self.ids[index],
            features: self.features.index_axis(Axis(0), index).to_owned(),
            label: self.labels[index],
            shape: None,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), HistoneError> {
        if index >= self.len() {
            return Err(HistoneError::IndexOutOfBounds(index, self.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ArchiveLayout;
    use crate::test_utilities::{random_cell_type_array, temp_archive};

    fn split(cell_type: &str, genes: usize, bins: usize, first_id: GeneId) -> CellTypeArrays {
        let data = random_cell_type_array(genes, bins, first_id);
        CellTypeArrays::split(cell_type, &data, &ArchiveLayout::default()).unwrap()
    }

    #[test]
    fn test_concatenate_alignment() {
        let a = split("A", 3, 4, 0);
        let b = split("B", 2, 4, 10);
        let arrays = HistoneArrays::concatenate(&[a.clone(), b.clone()]).unwrap();

        assert_eq!(arrays.len(), 5);
        assert_eq!(arrays.width(), 5);
        assert_eq!(arrays.height(), 4);
        assert_eq!(arrays.ids().to_vec(), vec![0, 1, 2, 10, 11]);
        assert_eq!(arrays.cell_types(), &["A", "A", "A", "B", "B"]);
        assert_eq!(arrays.labels()[3], b.labels[0]);
        assert_eq!(
            arrays.feature(4).unwrap(),
            b.features.index_axis(Axis(0), 1).to_owned()
        );
    }

    #[test]
    fn test_concatenate_bin_mismatch() {
        let a = split("A", 3, 4, 0);
        let b = split("B", 2, 5, 10);
        assert!(matches!(
            HistoneArrays::concatenate(&[a, b]),
            Err(HistoneError::BinCountMismatch {
                found: 5,
                expected: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_concatenate_empty() {
        assert!(matches!(
            HistoneArrays::concatenate(&[]),
            Err(HistoneError::EmptyArchive)
        ));
        let none = split("A", 0, 4, 0);
        assert!(matches!(
            HistoneArrays::concatenate(&[none]),
            Err(HistoneError::EmptyArchive)
        ));
    }

    #[test]
    fn test_cell_type_counts() {
        let arrays =
            HistoneArrays::concatenate(&[split("B", 2, 3, 0), split("A", 4, 3, 0)]).unwrap();
        let counts: Vec<_> = arrays.cell_type_counts().into_iter().collect();
        assert_eq!(counts, vec![("B".to_string(), 2), ("A".to_string(), 4)]);
    }

    #[test]
    fn test_record_out_of_bounds() {
        let arrays = HistoneArrays::concatenate(&[split("A", 2, 3, 0)]).unwrap();
        assert!(matches!(
            arrays.record(2),
            Err(HistoneError::IndexOutOfBounds(2, 2))
        ));
    }

    #[test]
    fn test_from_archive_subset() {
        let file = temp_archive(&[
            ("A", random_cell_type_array(3, 4, 0)),
            ("B", random_cell_type_array(2, 4, 0)),
            ("C", random_cell_type_array(1, 4, 0)),
        ]);
        let options = DatasetOptions {
            cell_types: Some(vec!["C".to_string(), "A".to_string()]),
            ..Default::default()
        };
        let (arrays, report) = HistoneArrays::from_archive(file.path(), &options).unwrap();
        assert_eq!(arrays.len(), 4);
        assert_eq!(arrays.cell_types()[0], "C");
        assert_eq!(arrays.cell_types()[1], "A");
        assert!(report.is_empty());

        let options = DatasetOptions {
            cell_types: Some(vec!["D".to_string()]),
            ..Default::default()
        };
        assert!(matches!(
            HistoneArrays::from_archive(file.path(), &options),
            Err(HistoneError::MissingCellType(_))
        ));
    }
}
