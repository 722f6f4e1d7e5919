//! Traits used by the histones library.
//!

use crate::dataset::Record;
use crate::error::HistoneError;

/// Random access to the records of a dataset.
///
/// This is the interface a training loop consumes: a record count and
/// fallible indexed access. Implementations are read-only, so `get()` is
/// idempotent.
pub trait IndexedDataset {
    /// Total number of records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the record at `index`, where `index < self.len()`.
    fn get(&self, index: usize) -> Result<Record, HistoneError>;

    /// Iterate over every record, in index order.
    fn iter(&self) -> RecordIterator<'_, Self>
    where
        Self: Sized,
    {
        RecordIterator {
            dataset: self,
            index: 0,
        }
    }
}

/// Iterate over the records of an [`IndexedDataset`].
pub struct RecordIterator<'a, D> {
    dataset: &'a D,
    index: usize,
}

impl<'a, D: IndexedDataset> Iterator for RecordIterator<'a, D> {
    type Item = Result<Record, HistoneError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.dataset.len() {
            return None;
        }
        let record = self.dataset.get(self.index);
        self.index += 1;
        Some(record)
    }
}
