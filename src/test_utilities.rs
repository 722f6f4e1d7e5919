//! Test cases and test utility functions.
//!
//! These write small, random histone archives and sequence tables to
//! temporary files. They panic on failure, since they are only used in tests
//! and benchmarks.

use ndarray::{Array3, ArrayBase, Data, Ix3};
use ndarray_npy::{NpzWriter, WritableElement};
use rand::{thread_rng, Rng};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::layout::ArchiveLayout;
use crate::GeneId;

// Random mark signal range
pub const MAX_SIGNAL: f64 = 100.0;

// Random expression range
pub const MAX_EXPRESSION: f64 = 10.0;

/// Build a random `[genes, bins, 7]` cell type array in the default
/// [`ArchiveLayout`]. Gene identifiers are `first_id..first_id + genes`, and
/// identifiers and expression values are constant across bins.
pub fn random_cell_type_array(genes: usize, bins: usize, first_id: GeneId) -> Array3<f64> {
    let layout = ArchiveLayout::default();
    let mut rng = thread_rng();
    let mut data = Array3::zeros((genes, bins, layout.num_columns));

    for gene in 0..genes {
        let id = (first_id + gene as GeneId) as f64;
        let expression = rng.gen_range(0.0..MAX_EXPRESSION);
        for bin in 0..bins {
            data[[gene, bin, layout.gene_id]] = id;
            for mark in layout.marks() {
                data[[gene, bin, mark]] = rng.gen_range(0.0..MAX_SIGNAL).floor();
            }
            data[[gene, bin, layout.expression]] = expression;
        }
    }
    data
}

/// Build a random DNA sequence over `{A, C, T, G, N}`.
pub fn random_sequence(len: usize) -> String {
    const SYMBOLS: &[u8] = b"ACTGN";
    let mut rng = thread_rng();
    (0..len)
        .map(|_| SYMBOLS[rng.gen_range(0..SYMBOLS.len())] as char)
        .collect()
}

/// Write cell type arrays to an `.npz` archive, in the order given.
pub fn write_archive<A, S>(path: &Path, cell_types: &[(&str, ArrayBase<S, Ix3>)])
where
    A: WritableElement,
    S: Data<Elem = A>,
{
    let file = File::create(path).expect("could not create archive");
    let mut npz = NpzWriter::new(file);
    for (cell_type, data) in cell_types {
        npz.add_array(format!("{}.npy", cell_type), data)
            .expect("could not write cell type array");
    }
    npz.finish().expect("could not finish archive");
}

/// Write cell type arrays to a temporary `.npz` archive.
pub fn temp_archive(cell_types: &[(&str, Array3<f64>)]) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".npz")
        .tempfile()
        .expect("could not create temporary archive");
    write_archive(file.path(), cell_types);
    file
}

/// The two cell type example archive: `A` with 3 genes and `B` with 2 genes,
/// each with 4 bins.
pub fn two_cell_type_archive() -> NamedTempFile {
    temp_archive(&[
        ("A", random_cell_type_array(3, 4, 0)),
        ("B", random_cell_type_array(2, 4, 0)),
    ])
}

/// A random archive of `num_cell_types` cell types named `E001`, `E002`,
/// etc., each with the same `genes` gene identifiers.
pub fn random_archive(num_cell_types: usize, genes: usize, bins: usize) -> NamedTempFile {
    let cell_types: Vec<(String, Array3<f64>)> = (1..=num_cell_types)
        .map(|i| (format!("E{:03}", i), random_cell_type_array(genes, bins, 0)))
        .collect();
    let named: Vec<(&str, Array3<f64>)> = cell_types
        .iter()
        .map(|(name, data)| (name.as_str(), data.clone()))
        .collect();
    temp_archive(&named)
}

/// Write `id,sequence` rows to a temporary sequence table.
pub fn temp_sequence_table(rows: &[(GeneId, &str)]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("could not create temporary sequence table");
    for (id, sequence) in rows {
        writeln!(file, "{},{}", id, sequence).expect("could not write sequence table");
    }
    file.flush().expect("could not flush sequence table");
    file
}

/// A random sequence table covering gene identifiers `0..genes`.
pub fn random_sequence_table(genes: usize, len: usize) -> NamedTempFile {
    let sequences: Vec<String> = (0..genes).map(|_| random_sequence(len)).collect();
    let rows: Vec<(GeneId, &str)> = sequences
        .iter()
        .enumerate()
        .map(|(id, sequence)| (id as GeneId, sequence.as_str()))
        .collect();
    temp_sequence_table(&rows)
}
