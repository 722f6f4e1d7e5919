//! Properties of datasets built from random archives.

use histones::{
    prelude::*,
    sequences::nucleotide::{onehot_encode, Nucleotide},
    test_utilities::{
        random_archive, random_cell_type_array, random_sequence, random_sequence_table,
        temp_archive, temp_sequence_table,
    },
};

#[test]
fn test_length_is_sum_of_genes() {
    let genes = [7, 1, 12, 4];
    let cell_types: Vec<(&str, _)> = ["E003", "E004", "E005", "E006"]
        .into_iter()
        .zip(genes)
        .map(|(name, n)| (name, random_cell_type_array(n, 6, 0)))
        .collect();
    let archive = temp_archive(&cell_types);

    let dataset = CachedDataset::new(archive.path(), &CacheOptions::default()).unwrap();
    assert_eq!(dataset.len(), genes.iter().sum::<usize>());
}

#[test]
fn test_cell_type_contiguity() {
    let genes = [3, 5, 2];
    let names = ["GM12878", "K562", "HepG2"];
    let cell_types: Vec<(&str, _)> = names
        .into_iter()
        .zip(genes)
        .map(|(name, n)| (name, random_cell_type_array(n, 4, 0)))
        .collect();
    let archive = temp_archive(&cell_types);
    let dataset = CachedDataset::new(archive.path(), &CacheOptions::default()).unwrap();

    let mut start = 0;
    for (name, n) in names.into_iter().zip(genes) {
        for i in start..start + n {
            assert_eq!(dataset.get(i).unwrap().cell_type, name);
        }
        start += n;
    }
}

#[test]
fn test_records_match_archive() {
    let a = random_cell_type_array(3, 4, 20);
    let b = random_cell_type_array(2, 4, 40);
    let archive = temp_archive(&[("A", a.clone()), ("B", b.clone())]);
    let dataset = CachedDataset::new(archive.path(), &CacheOptions::default()).unwrap();

    let record = dataset.get(4).unwrap();
    assert_eq!(record.id, 41);
    assert_eq!(record.label, b[[1, 0, 6]]);
    for bin in 0..4 {
        for mark in 0..5 {
            assert_eq!(record.features[[bin, mark]], b[[1, bin, mark + 1]]);
        }
    }

    let record = dataset.get(0).unwrap();
    assert_eq!(record.id, 20);
    assert_eq!(record.label, a[[0, 0, 6]]);
}

#[test]
fn test_iter_matches_get() {
    let archive = random_archive(3, 5, 8);
    let dataset = CachedDataset::new(archive.path(), &CacheOptions::default()).unwrap();

    let records: Vec<Record> = dataset.iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), dataset.len());
    for (i, record) in records.iter().enumerate() {
        assert_eq!(*record, dataset.get(i).unwrap());
    }
}

#[test]
fn test_cache_round_trip() {
    let archive = random_archive(4, 10, 6);
    let cache_dir = tempfile::tempdir().unwrap();

    let write = CacheOptions::new("train").write_to(cache_dir.path());
    let built = CachedDataset::new(archive.path(), &write).unwrap();

    // the archive path is not opened on a cache hit
    let read = CacheOptions::new("train").read_from(cache_dir.path());
    let cached = CachedDataset::new("does/not/exist.npz", &read).unwrap();

    assert_eq!(built.len(), cached.len());
    assert_eq!(built.shape(), cached.shape());
    for i in 0..built.len() {
        assert_eq!(built.get(i).unwrap(), cached.get(i).unwrap());
    }
}

#[test]
fn test_cache_read_missing() {
    let cache_dir = tempfile::tempdir().unwrap();
    let read = CacheOptions::new("test").read_from(cache_dir.path());
    assert!(matches!(
        CachedDataset::new("unused.npz", &read),
        Err(HistoneError::CacheReadError(_))
    ));
}

#[test]
fn test_sequence_join_shape() {
    let archive = random_archive(2, 5, 10);
    let table = random_sequence_table(5, 30);
    let dataset = SequenceDataset::new(archive.path(), table.path()).unwrap();

    assert_eq!(dataset.len(), 10);
    for record in dataset.iter() {
        let record = record.unwrap();
        assert_eq!(record.features.dim(), (10 + 30, 5));
        let sequence = dataset.sequence(record.id).unwrap();
        assert_eq!(record.features.slice(ndarray::s![10.., ..]), sequence);
    }
}

#[test]
fn test_missing_sequence_fails_get_0() {
    let archive = temp_archive(&[("A", random_cell_type_array(2, 3, 100))]);
    let sequence = random_sequence(8);
    let table = temp_sequence_table(&[(101, sequence.as_str())]);
    let dataset = SequenceDataset::new(archive.path(), table.path()).unwrap();

    assert!(matches!(
        dataset.get(0),
        Err(HistoneError::MissingGeneSequence(100))
    ));
}

#[test]
fn test_onehot_property() {
    for len in [0, 1, 17, 250] {
        let sequence = random_sequence(len);
        let matrix = onehot_encode(&sequence).unwrap();
        assert_eq!(matrix.dim(), (len, 5));
        for (row, character) in matrix.outer_iter().zip(sequence.chars()) {
            assert_eq!(row.iter().filter(|&&x| x == 1.0).count(), 1);
            assert_eq!(row.sum(), 1.0);
            let expected = match character {
                'A' => 0,
                'C' => 1,
                'T' => 2,
                'G' => 3,
                'N' => 4,
                _ => unreachable!(),
            };
            assert_eq!(Nucleotide::from_char(character).unwrap().index(), expected);
            assert_eq!(row[expected], 1.0);
        }
    }
}

#[test]
fn test_validation_report() {
    let mut data = random_cell_type_array(5, 4, 0);
    data[[2, 3, 6]] += 0.5;
    let archive = temp_archive(&[("A", data)]);
    let options = DatasetOptions {
        validate: true,
        ..Default::default()
    };
    let dataset =
        CachedDataset::with_options(archive.path(), &CacheOptions::default(), &options).unwrap();
    assert_eq!(dataset.report().issues().len(), 1);
    assert_eq!(dataset.len(), 5);
}
