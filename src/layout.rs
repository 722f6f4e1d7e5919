//! The column contract of a histone archive.
//!
//! Each cell type in an archive is a `[genes, bins, columns]` array. The
//! [`ArchiveLayout`] names which column holds what, so the reshaping code
//! never indexes columns by bare position.

use std::ops::Range;

/// The five histone marks, in archive column order.
pub const HISTONE_MARKS: [&str; 5] = ["H3K27me3", "H3K36me3", "H3K4me1", "H3K4me3", "H3K9me3"];

/// Number of histone mark columns, i.e. the feature `width`.
pub const NUM_MARKS: usize = HISTONE_MARKS.len();

/// Named column positions within the last axis of a cell type array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// The gene identifier column (constant across bins).
    pub gene_id: usize,
    /// The first of the [`NUM_MARKS`] contiguous histone mark columns.
    pub first_mark: usize,
    /// The expression value column (constant across bins).
    pub expression: usize,
    /// Total number of columns per bin.
    pub num_columns: usize,
}

impl Default for ArchiveLayout {
    /// The standard layout: `0 = gene id`, `1..=5 = marks`, `6 = expression`.
    fn default() -> Self {
        Self {
            gene_id: 0,
            first_mark: 1,
            expression: 6,
            num_columns: 7,
        }
    }
}

impl ArchiveLayout {
    /// The half-open column range of the histone marks.
    pub fn marks(&self) -> Range<usize> {
        self.first_mark..self.first_mark + NUM_MARKS
    }
}
