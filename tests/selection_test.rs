//! Integration tests for pseudo-iRT selection
//!
//! These tests run the full pipeline: read a library file, select, write, read back.

use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use pseudo_irt::library::{LibraryColumns, SpectralLibrary, WriteOptions};
use pseudo_irt::selection::{select_pseudo_irts, SelectionParams, SelectionReport};
use tempfile::tempdir;

const HEADER: &str = "PrecursorMz\tModifiedPeptideSequence\tPrecursorCharge\tNormalizedRetentionTime\tProductMz\tLibraryIntensity\tAnnotation";

/// Build an OpenSWATH-style library with `fragments` rows per precursor
fn build_library(precursors: &[(&str, u8, f64, f64)], fragments: usize) -> String {
    let mut tsv = HEADER.to_string();
    for (peptide, charge, rt, intensity) in precursors {
        for j in 0..fragments {
            tsv.push_str(&format!(
                "\n{:.4}\t{}\t{}\t{}\t{:.4}\t{}\ty{}^1",
                400.0 + rt,
                peptide,
                charge,
                rt,
                200.0 + 100.0 * j as f64,
                intensity,
                j + 3
            ));
        }
    }
    tsv.push('\n');
    tsv
}

/// Test the complete read-select-write cycle
#[test]
fn test_select_write_read_cycle() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("library.tsv");
    let output = dir.path().join("pseudo_irts.tsv");

    let precursors = [
        ("LGGNEQVTR", 2, 0.2, 100.0),
        ("GAGSSEPVTGLDAK", 2, 0.3, 500.0),
        ("VEATFGVDESNAK", 2, 12.6, 300.0),
        ("YILAGVENSK", 2, 25.1, 50.0),
        ("TPVISGGPYEYR", 2, 25.3, 40.0),
        ("TPVITGAPYEYR", 3, 99.0, 900.0),
    ];
    fs::write(&input, build_library(&precursors, 4)).unwrap();

    let library = SpectralLibrary::from_path(&input, &LibraryColumns::default()).unwrap();
    assert_eq!(library.len(), 24);

    // Grid 0, 12.5, 25, ..., 100
    let selection = select_pseudo_irts(&library, &SelectionParams::new(9, 0.0, 100.0)).unwrap();
    assert_eq!(selection.selection_count(), 3);

    let expected: BTreeSet<String> = ["GAGSSEPVTGLDAK", "VEATFGVDESNAK", "YILAGVENSK"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(selection.peptides(), &expected);

    let written = selection
        .library()
        .write_tsv(&output, WriteOptions::default())
        .unwrap();
    assert_eq!(written, 12);

    // The written file has an unnamed index column followed by the input schema
    let text = fs::read_to_string(&output).unwrap();
    let first_line = text.lines().next().unwrap();
    assert_eq!(first_line, format!("\t{HEADER}"));

    let reread = SpectralLibrary::from_path(&output, &LibraryColumns::default()).unwrap();
    assert_eq!(reread.len(), 12);
    let input_text = fs::read_to_string(&input).unwrap();
    let input_lines: BTreeSet<&str> = input_text.lines().collect();
    for row in reread.rows() {
        let without_index: Vec<&str> = row.fields().skip(1).collect();
        assert!(input_lines.contains(without_index.join("\t").as_str()));
    }
}

/// Test the JSON report written next to the library
#[test]
fn test_report_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");

    let tsv = build_library(&[("PEPTIDEK", 2, 5.2, 10.0)], 2);
    let library = SpectralLibrary::from_reader(tsv.as_bytes(), &LibraryColumns::default()).unwrap();
    let selection = select_pseudo_irts(&library, &SelectionParams::new(2, 5.0, 6.0)).unwrap();

    selection.report().write_json(&path).unwrap();

    let report = SelectionReport::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(report.input_rows, 2);
    assert_eq!(report.output_rows, 2);
    assert_eq!(report.selection_count, 1);
    assert_eq!(report.empty_windows, 1);
    assert_eq!(report.windows.len(), 2);
    assert_eq!(
        report.windows[0].candidate.as_ref().map(|c| c.peptide.as_str()),
        Some("PEPTIDEK")
    );
    assert!(report.windows[1].candidate.is_none());
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = SpectralLibrary::from_path(dir.path().join("nope.tsv"), &LibraryColumns::default());
    assert!(result.is_err());
}

fn arb_library() -> impl Strategy<Value = Vec<(usize, u8, f64, f64)>> {
    // (peptide id, charge, rt, intensity); RTs on a 0.05 lattice so that
    // window boundaries are hit regularly.
    prop::collection::vec(
        (0usize..12, 1u8..4, 0u32..400, 0u32..10_000)
            .prop_map(|(p, z, rt, i)| (p, z, rt as f64 * 0.05, i as f64)),
        0..80,
    )
}

fn to_tsv(rows: &[(usize, u8, f64, f64)]) -> String {
    let mut tsv =
        "ModifiedPeptideSequence\tPrecursorCharge\tNormalizedRetentionTime\tLibraryIntensity\tRow"
            .to_string();
    for (i, (p, z, rt, intensity)) in rows.iter().enumerate() {
        tsv.push_str(&format!("\nPEP{p}\t{z}\t{rt}\t{intensity}\t{i}"));
    }
    tsv
}

proptest! {
    /// Output rows are input rows, output peptides come from the input, and
    /// there are never more distinct peptides than grid points.
    #[test]
    fn test_selection_properties(
        rows in arb_library(),
        n_irts in 1usize..30,
        min_rt in 0u32..200,
        span in 0u32..200,
    ) {
        let tsv = to_tsv(&rows);
        let library = SpectralLibrary::from_reader(tsv.as_bytes(), &LibraryColumns::default()).unwrap();
        let min_rt = min_rt as f64 * 0.05;
        let max_rt = min_rt + span as f64 * 0.05;
        let params = SelectionParams::new(n_irts, min_rt, max_rt);

        let selection = select_pseudo_irts(&library, &params).unwrap();

        prop_assert!(selection.peptides().len() <= n_irts);
        prop_assert!(selection.selection_count() <= n_irts);
        prop_assert_eq!(selection.picks().len(), n_irts);

        let input_peptides = library.peptides();
        for peptide in selection.peptides() {
            prop_assert!(input_peptides.contains(peptide.as_str()));
        }

        for row in selection.library().rows() {
            prop_assert_eq!(&library.rows()[row.index], row);
            prop_assert!(selection.peptides().contains(&row.peptide));
        }

        // Every row of a selected peptide is kept
        let expected_rows = library
            .rows()
            .iter()
            .filter(|r| selection.peptides().contains(&r.peptide))
            .count();
        prop_assert_eq!(selection.library().len(), expected_rows);

        // Picks respect their windows; empty windows really are empty
        for pick in selection.picks() {
            match &pick.candidate {
                Some(c) => {
                    prop_assert!(c.retention_time > pick.target_rt);
                    prop_assert!(c.retention_time < pick.window_end);
                }
                None => {
                    let any_in_window = library.rows().iter().any(|r| {
                        r.retention_time
                            .is_some_and(|rt| rt > pick.target_rt && rt < pick.window_end)
                    });
                    prop_assert!(!any_in_window);
                }
            }
        }

        let again = select_pseudo_irts(&library, &params).unwrap();
        prop_assert_eq!(again.picks(), selection.picks());
    }
}
