//! On-disk caching of [`HistoneArrays`].
//!
//! A cache for some `mode` (e.g. `train`) is four `.npy` files in
//! `{dir}/{mode}/`:
//!
//!  - `x.npy`: `[records, bins, 5]` `f64` features.
//!  - `y.npy`: `[records]` `f64` labels.
//!  - `id.npy`: `[records]` `i64` gene identifiers.
//!  - `type.npy`: `[records, max_name_length]` `u8`, the UTF-8 cell type
//!    names, zero padded (numpy's fixed-width `S` layout).
//!
//! There is no checksum or format version. Shapes are checked on read, so a
//! cache that does not line up fails loudly instead of producing
//! misaligned records.

use ndarray::{Array1, Array2, Array3, Axis};
use ndarray_npy::{read_npy, write_npy};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::arrays::HistoneArrays;
use crate::error::HistoneError;
use crate::layout::NUM_MARKS;
use crate::GeneId;

pub const FEATURES_FILE: &str = "x.npy";
pub const LABELS_FILE: &str = "y.npy";
pub const IDS_FILE: &str = "id.npy";
pub const CELL_TYPES_FILE: &str = "type.npy";

/// The default cache mode.
pub const DEFAULT_MODE: &str = "train";

/// Where a [`CachedDataset`] reads its arrays from, and whether it writes them.
///
/// [`CachedDataset`]: crate::dataset::CachedDataset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    /// A cache directory to read from, skipping the archive entirely.
    pub read: Option<PathBuf>,
    /// A cache directory to write to after building from the archive.
    pub write: Option<PathBuf>,
    /// The subdirectory name within the cache directories, e.g. `train`.
    pub mode: String,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MODE)
    }
}

impl CacheOptions {
    /// No caching, with the given mode name.
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            read: None,
            write: None,
            mode: mode.into(),
        }
    }

    pub fn read_from(mut self, dir: impl Into<PathBuf>) -> Self {
        self.read = Some(dir.into());
        self
    }

    pub fn write_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.write = Some(dir.into());
        self
    }
}

/// The directory holding the cache files for `mode`.
pub fn mode_dir(dir: impl AsRef<Path>, mode: &str) -> PathBuf {
    dir.as_ref().join(mode)
}

/// Write the four cache arrays to `{dir}/{mode}/`, creating it if needed.
pub fn write_cache(
    arrays: &HistoneArrays,
    dir: impl AsRef<Path>,
    mode: &str,
) -> Result<(), HistoneError> {
    let path = mode_dir(dir, mode);
    fs::create_dir_all(&path)?;

    write_npy(path.join(FEATURES_FILE), &arrays.features())?;
    write_npy(path.join(LABELS_FILE), &arrays.labels())?;
    write_npy(path.join(IDS_FILE), &arrays.ids())?;
    write_npy(
        path.join(CELL_TYPES_FILE),
        &encode_cell_types(arrays.cell_types()),
    )?;

    info!(cache = %path.display(), records = arrays.len(), "wrote array cache");
    Ok(())
}

/// Read the four cache arrays from `{dir}/{mode}/`.
pub fn read_cache(dir: impl AsRef<Path>, mode: &str) -> Result<HistoneArrays, HistoneError> {
    let path = mode_dir(dir, mode);

    let features: Array3<f64> = read_npy(path.join(FEATURES_FILE))?;
    let labels: Array1<f64> = read_npy(path.join(LABELS_FILE))?;
    let ids: Array1<GeneId> = read_npy(path.join(IDS_FILE))?;
    let encoded: Array2<u8> = read_npy(path.join(CELL_TYPES_FILE))?;
    let cell_types = decode_cell_types(&encoded)?;

    let records = labels.len();
    if features.len_of(Axis(2)) != NUM_MARKS {
        return Err(HistoneError::CacheShapeMismatch(format!(
            "{} has {} feature columns, expected {}",
            FEATURES_FILE,
            features.len_of(Axis(2)),
            NUM_MARKS
        )));
    }
    for (file, len) in [
        (FEATURES_FILE, features.len_of(Axis(0))),
        (IDS_FILE, ids.len()),
        (CELL_TYPES_FILE, cell_types.len()),
    ] {
        if len != records {
            return Err(HistoneError::CacheShapeMismatch(format!(
                "{} has {} records, but {} has {}",
                file, len, LABELS_FILE, records
            )));
        }
    }

    info!(cache = %path.display(), records, "read array cache");
    HistoneArrays::from_parts(ids, features, labels, cell_types)
}

/// Encode strings as a zero-padded `[n, max_len]` byte matrix.
fn encode_cell_types(cell_types: &[String]) -> Array2<u8> {
    let width = cell_types.iter().map(String::len).max().unwrap_or(0).max(1);
    let mut encoded = Array2::zeros((cell_types.len(), width));
    for (mut row, name) in encoded.outer_iter_mut().zip(cell_types) {
        for (byte, &value) in row.iter_mut().zip(name.as_bytes()) {
            *byte = value;
        }
    }
    encoded
}

fn decode_cell_types(encoded: &Array2<u8>) -> Result<Vec<String>, HistoneError> {
    encoded
        .outer_iter()
        .enumerate()
        .map(|(i, row)| {
            let mut bytes: Vec<u8> = row.to_vec();
            // strip the trailing padding only
            while bytes.last() == Some(&0) {
                bytes.pop();
            }
            String::from_utf8(bytes).map_err(|_| HistoneError::InvalidCellTypeName(i))
        })
        .collect()
}
