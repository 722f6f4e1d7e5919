//! # histones
//!
//! Build per-gene, per-cell-type histone mark datasets for model training.
//!
//! A histone *archive* is an `.npz` file with one `[genes, bins, 7]` array per
//! cell type (see [`layout::ArchiveLayout`] for the column contract). This
//! library reshapes those arrays into aligned identifier, feature, label and
//! cell type arrays ([`arrays::HistoneArrays`]), and exposes them as indexed
//! [`dataset::Record`]s through two dataset types:
//!
//!  - [`dataset::SequenceDataset`]: features joined with the one-hot
//!    encoded DNA sequence of each gene.
//!  - [`dataset::CachedDataset`]: derived arrays optionally read from, or
//!    written to, an on-disk `.npy` cache.
//!
//! ```no_run
//! use histones::prelude::*;
//!
//! let cache = CacheOptions::new("train").write_to("cache/");
//! let dataset = CachedDataset::new("histones.npz", &cache)?;
//! let record = dataset.get(0)?;
//! println!("{} {} {}", record.cell_type, record.id, record.label);
//! # Ok::<(), HistoneError>(())
//! ```

pub mod archive;
pub mod arrays;
pub mod cache;
pub mod commands;
pub mod dataset;
pub mod error;
pub mod io;
pub mod layout;
pub mod reporting;
pub mod sequences;
pub mod test_utilities;
pub mod traits;
pub mod validation;

/// The integer gene identifier type.
pub type GeneId = i64;

pub mod prelude {
    pub use crate::arrays::HistoneArrays;
    pub use crate::cache::CacheOptions;
    pub use crate::dataset::{CachedDataset, DatasetOptions, FeatureShape, Record, SequenceDataset};
    pub use crate::error::HistoneError;
    pub use crate::layout::ArchiveLayout;
    pub use crate::traits::IndexedDataset;
    pub use crate::GeneId;
}
