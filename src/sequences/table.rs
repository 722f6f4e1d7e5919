//! Reading sequence tables: comma-delimited `id,sequence` rows with no header.
//!
//! Parsing uses the [`csv`] crate's [`serde`] deserialization, over an
//! [`InputFile`] so gzip-compressed tables are read transparently.

use csv::ReaderBuilder;
use indexmap::IndexMap;
use ndarray::Array2;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

use super::nucleotide::onehot_encode;
use crate::archive::to_gene_id;
use crate::error::HistoneError;
use crate::io::InputFile;
use crate::GeneId;

/// One row of a sequence table.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRow {
    pub id: GeneId,
    pub sequence: String,
}

// Identifiers may be written as floats, e.g. `1.0`, as archive ids are.
#[derive(Debug, Deserialize)]
struct RawSequenceRow {
    id: f64,
    sequence: String,
}

impl TryFrom<RawSequenceRow> for SequenceRow {
    type Error = HistoneError;

    fn try_from(raw: RawSequenceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: to_gene_id(raw.id)?,
            sequence: raw.sequence,
        })
    }
}

/// Read every row of a sequence table.
pub fn read_sequence_rows(filepath: impl Into<PathBuf>) -> Result<Vec<SequenceRow>, HistoneError> {
    let input_file = InputFile::new(filepath);
    let reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .from_reader(input_file.reader()?);

    reader
        .into_deserialize::<RawSequenceRow>()
        .map(|raw| SequenceRow::try_from(raw?))
        .collect()
}

/// Read a sequence table into a map from gene identifier to one-hot
/// encoded sequence (see [`onehot_encode`]).
///
/// If an identifier appears more than once, the last row wins.
pub fn read_sequence_table(
    filepath: impl Into<PathBuf>,
) -> Result<IndexMap<GeneId, Array2<f64>>, HistoneError> {
    let filepath = filepath.into();
    let rows = read_sequence_rows(&filepath)?;

    let mut sequences = IndexMap::with_capacity(rows.len());
    for row in rows {
        sequences.insert(row.id, onehot_encode(&row.sequence)?);
    }
    info!(
        table = %filepath.display(),
        genes = sequences.len(),
        "encoded sequence table"
    );
    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::temp_sequence_table;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_read_rows() {
        let table = temp_sequence_table(&[(3, "ACGT"), (17, "NNNA")]);
        let rows = read_sequence_rows(table.path()).unwrap();
        assert_eq!(
            rows,
            vec![
                SequenceRow {
                    id: 3,
                    sequence: "ACGT".to_string()
                },
                SequenceRow {
                    id: 17,
                    sequence: "NNNA".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let table = temp_sequence_table(&[(1, "AAAA"), (1, "CC")]);
        let sequences = read_sequence_table(table.path()).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[&1].dim(), (2, 5));
    }

    #[test]
    fn test_gzipped_table() {
        let file = tempfile::Builder::new().suffix(".csv.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
        writeln!(encoder, "5,ACGTN").unwrap();
        encoder.finish().unwrap();

        let sequences = read_sequence_table(file.path()).unwrap();
        assert_eq!(sequences[&5].dim(), (5, 5));
    }

    #[test]
    fn test_float_ids() {
        let table = temp_sequence_table(&[]);
        std::fs::write(table.path(), "1.0,ACGT\n2,CC\n").unwrap();
        let sequences = read_sequence_table(table.path()).unwrap();
        assert_eq!(sequences[&1].dim(), (4, 5));
        assert_eq!(sequences[&2].dim(), (2, 5));

        std::fs::write(table.path(), "1.5,ACGT\n").unwrap();
        assert!(matches!(
            read_sequence_table(table.path()),
            Err(HistoneError::InvalidGeneId(_))
        ));
    }

    #[test]
    fn test_malformed_row() {
        let table = temp_sequence_table(&[]);
        std::fs::write(table.path(), "not_an_id,ACGT\n").unwrap();
        assert!(matches!(
            read_sequence_table(table.path()),
            Err(HistoneError::CsvError(_))
        ));
    }
}
