//! Command line tool command implementations.

use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{prelude::*, reporting::CommandOutput};

/// How the inspected dataset is built.
#[derive(Clone, Debug)]
pub enum DatasetSource {
    /// Features joined with a sequence table.
    Sequences(PathBuf),
    /// Features, optionally read from or written to a cache.
    Cached(CacheOptions),
}

/// A structural summary of a built dataset.
#[derive(Clone, Debug)]
pub struct DatasetSummary {
    pub archive: PathBuf,
    pub records: usize,
    pub shape: FeatureShape,
    pub cell_type_counts: IndexMap<String, usize>,
    pub first_record: Record,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "archive: {}", self.archive.display())?;
        writeln!(f, "records: {}", self.records)?;
        writeln!(
            f,
            "features: {} bins x {} marks",
            self.shape.height, self.shape.width
        )?;
        writeln!(f, "cell types: {}", self.cell_type_counts.len())?;
        for (cell_type, count) in &self.cell_type_counts {
            writeln!(f, "  {}\t{}", cell_type, count)?;
        }
        writeln!(f, "record 0:")?;
        writeln!(f, "  cell type: {}", self.first_record.cell_type)?;
        writeln!(f, "  id: {}", self.first_record.id)?;
        writeln!(f, "  label: {}", self.first_record.label)?;
        write!(
            f,
            "  features {:?}:\n{}",
            self.first_record.features.shape(),
            self.first_record.features
        )
    }
}

/// Build a dataset from an archive and summarize its structure.
pub fn histones_inspect(
    archive: &Path,
    source: DatasetSource,
    options: &DatasetOptions,
) -> Result<CommandOutput<DatasetSummary>, HistoneError> {
    match source {
        DatasetSource::Sequences(sequence_table) => {
            let dataset = SequenceDataset::with_options(archive, sequence_table, options)?;
            let summary = summarize(archive, dataset.arrays(), dataset.get(0)?);
            Ok(CommandOutput::new(summary, dataset.report().clone()))
        }
        DatasetSource::Cached(cache) => {
            let dataset = CachedDataset::with_options(archive, &cache, options)?;
            let summary = summarize(archive, dataset.arrays(), dataset.get(0)?);
            Ok(CommandOutput::new(summary, dataset.report().clone()))
        }
    }
}

fn summarize(archive: &Path, arrays: &HistoneArrays, first_record: Record) -> DatasetSummary {
    DatasetSummary {
        archive: archive.to_path_buf(),
        records: arrays.len(),
        shape: FeatureShape {
            width: arrays.width(),
            height: arrays.height(),
        },
        cell_type_counts: arrays.cell_type_counts(),
        first_record,
    }
}
