//! End-to-end tests for chunked sheet splitting

use pretty_assertions::assert_eq;
use tally_sheets::prelude::*;

fn ten_row_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let rows: Vec<Row> = (0..10)
        .map(|i| {
            Row::from_pairs([
                ("ID", Scalar::text(format!("id-{i}"))),
                ("LABEL", Scalar::text(format!("row {i}"))),
            ])
        })
        .collect();

    simple(
        rows,
        Totals::new(),
        "ledger",
        dir.path().join("ledger.xlsx"),
        &SimpleOptions::default(),
    )
    .unwrap()
}

/// 10 rows at chunk size 6 yield two files of 6 and 4 data rows whose
/// concatenation reconstructs the original order
#[test]
fn split_reconstructs_original_rows() {
    let dir = tempfile::tempdir().unwrap();
    let source = ten_row_file(&dir);

    let outputs = split_sheet(&source, 0, 6).unwrap();
    assert_eq!(outputs.len(), 2);

    // Header re-attached to each chunk
    for output in &outputs {
        let grid = sheet_to_array(output, SheetSelector::Index(0)).unwrap();
        assert_eq!(grid[0][0], Scalar::text("ID"));
        assert_eq!(sheet_name(output, 0).unwrap(), "ledger");
    }

    // 6 + 4 data rows, header included in the line count
    assert_eq!(num_lines_in_sheet(&outputs[0], 0).unwrap(), 7);
    assert_eq!(num_lines_in_sheet(&outputs[1], 0).unwrap(), 5);

    // Concatenating the chunks (headers removed, one re-prepended)
    // reconstructs the source exactly
    let source_grid = sheet_to_array(&source, SheetSelector::Index(0)).unwrap();
    let mut reassembled = vec![source_grid[0].clone()];
    for output in &outputs {
        let grid = sheet_to_array(output, SheetSelector::Index(0)).unwrap();
        reassembled.extend(grid.into_iter().skip(1));
    }
    assert_eq!(reassembled, source_grid);
}

/// An exact multiple of the chunk size has no runt chunk
#[test]
fn split_exact_multiple() {
    let dir = tempfile::tempdir().unwrap();
    let source = ten_row_file(&dir);

    let outputs = split_sheet(&source, 0, 5).unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(num_lines_in_sheet(&outputs[0], 0).unwrap(), 6);
    assert_eq!(num_lines_in_sheet(&outputs[1], 0).unwrap(), 6);
}

/// A chunk size covering the whole sheet copies it in one file
#[test]
fn oversized_chunk_yields_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = ten_row_file(&dir);

    let outputs = split_sheet(&source, 0, 100).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(num_lines_in_sheet(&outputs[0], 0).unwrap(), 11);
}

/// Splitting a missing sheet index is an error
#[test]
fn split_bad_sheet_index_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = ten_row_file(&dir);

    assert!(split_sheet(&source, 3, 5).is_err());
}
