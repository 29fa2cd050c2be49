use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;

#[test]
fn test_read_tsv_with_bom_and_blank_lines() {
    let raw = "\u{feff}Dataset\ttrue\tscore\r\nA\t1\t0.9\r\n\nA\t0\t0.1\n";
    let t = read_table(Cursor::new(raw)).unwrap();
    assert_eq!(t.columns(), ["Dataset", "true", "score"]);
    assert_eq!(t.rows(), [vec!["A", "1", "0.9"], vec!["A", "0", "0.1"]]);
    assert_eq!(t.lines(), &[2, 4]);
}

#[test]
fn test_read_csv_strips_quotes() {
    let raw = "\"Dataset\",\"true\",\"score\"\n\"B 1\",0,0.25\n";
    let t = read_table(Cursor::new(raw)).unwrap();
    assert_eq!(t.columns()[0], "Dataset");
    assert_eq!(t.rows()[0], vec!["B 1", "0", "0.25"]);
}

#[test]
fn test_field_count_mismatch_names_line() {
    let raw = "a,b,c\n1,2,3\n4,5\n";
    let err = read_table(Cursor::new(raw)).unwrap_err();
    assert!(matches!(err, RocError::Parse { line: 3, .. }), "{err}");
}

#[test]
fn test_empty_input() {
    let err = read_table(Cursor::new("")).unwrap_err();
    assert!(matches!(err, RocError::Parse { line: 1, .. }));
}

#[test]
fn test_load_gz_and_write_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let gz = dir.path().join("scores.tsv.gz");
    let mut enc = GzEncoder::new(std::fs::File::create(&gz).unwrap(), Compression::default());
    enc.write_all(b"Dataset\ttrue\tscore\nA\t1\t0.9\nA\t0\t0.2\n")
        .unwrap();
    enc.finish().unwrap();

    let t = load_table(&gz).unwrap();
    assert_eq!(t.n_rows(), 2);

    let plain = dir.path().join("copy.tsv");
    write_table(&t, &plain).unwrap();
    assert_eq!(load_table(&plain).unwrap(), t);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table(&dir.path().join("absent.tsv")).unwrap_err();
    assert!(matches!(err, RocError::Io(_)));
}
