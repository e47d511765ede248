mod common;

use assert_cmd::Command;
use predicates::str::contains;

use common::{TestWorkspace, n, read_sheet, t, write_workbook};

fn scan_command() -> Command {
    Command::cargo_bin("sheet-audit").expect("binary exists")
}

#[test]
fn scan_reports_summary_and_details_for_mixed_workbook() {
    let workspace = TestWorkspace::new();
    let input = workspace.input_dir();
    let report = workspace.path().join("report.xlsx");

    write_workbook(
        &input.join("mixed.xlsx"),
        &[
            (
                "Data",
                vec![
                    vec![t("name"), t("score")],
                    vec![t("Alice"), n(10.0)],
                    vec![t("Bob"), n(12.0)],
                    vec![t("Charlie"), n(11.0)],
                    vec![t("Dana"), t("9999")],
                ],
            ),
            // Header-only sheets carry no records and are skipped.
            ("Empty", vec![vec![t("unused")]]),
        ],
    );

    scan_command()
        .args([
            "scan",
            "-i",
            input.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(contains("Report saved"));

    let summary = read_sheet(&report, "Summary");
    assert_eq!(summary.len(), 3, "header plus one row per column");
    assert_eq!(
        summary[0],
        vec![
            "file",
            "sheet",
            "column",
            "total_records",
            "non_null_records",
            "null_count",
            "detected_pattern",
            "avg_length",
            "allowed_min_length",
            "allowed_max_length",
            "consistent_count",
            "inconsistent_count",
            "consistency_percentage",
            "inconsistent_values_sample",
        ]
    );

    let name_row = &summary[1];
    assert_eq!(
        &name_row[..7],
        &["mixed.xlsx", "Data", "name", "4", "4", "0", "latin_words"]
    );
    assert_eq!(name_row[12], "100");
    assert_eq!(name_row[13], "");

    // Text lengths {2,2,2,4} average 2.5; the ±30% band reports as [1, 4] and
    // "9999" exceeds the un-rounded upper bound 3.25.
    let score_row = &summary[2];
    assert_eq!(
        &score_row[..7],
        &["mixed.xlsx", "Data", "score", "4", "4", "0", "number"]
    );
    assert_eq!(score_row[7], "2.5");
    assert_eq!(score_row[8], "1");
    assert_eq!(score_row[9], "4");
    assert_eq!(score_row[10], "3");
    assert_eq!(score_row[11], "1");
    assert_eq!(score_row[12], "75");
    assert_eq!(score_row[13], "9999");

    let details = read_sheet(&report, "Inconsistent Values");
    assert_eq!(details.len(), 2);
    assert_eq!(
        details[0],
        vec!["file", "sheet", "column", "inconsistent_value"]
    );
    assert_eq!(details[1], vec!["mixed.xlsx", "Data", "score", "9999"]);
}

#[test]
fn scan_records_error_rows_and_continues_past_unreadable_workbook() {
    let workspace = TestWorkspace::new();
    let input = workspace.input_dir();
    let report = workspace.path().join("report.xlsx");

    std::fs::write(input.join("broken.xlsx"), b"this is not a zip archive")
        .expect("write broken workbook");
    write_workbook(
        &input.join("good.xlsx"),
        &[(
            "Sheet1",
            vec![vec![t("name")], vec![t("Alice")], vec![t("Bob")]],
        )],
    );

    scan_command()
        .args([
            "scan",
            "-i",
            input.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(contains("broken.xlsx"));

    let summary = read_sheet(&report, "Summary");
    assert_eq!(summary.len(), 3);

    // Files are scanned in name order, so the failure row comes first.
    let error_row = &summary[1];
    assert_eq!(error_row[0], "broken.xlsx");
    assert_eq!(error_row[1], "<error>");
    assert_eq!(error_row[2], "<error>");
    assert_eq!(error_row[3], "", "numeric cells stay blank on failure");
    assert_eq!(error_row[6], "<error>");
    assert!(error_row[13].starts_with("Error: "));

    let good_row = &summary[2];
    assert_eq!(good_row[0], "good.xlsx");
    assert_eq!(good_row[6], "latin_words");
    assert_eq!(good_row[12], "100");

    let details = read_sheet(&report, "Inconsistent Values");
    assert_eq!(details.len(), 2);
    assert_eq!(details[1][0], "broken.xlsx");
    assert_eq!(details[1][1], "<error>");
    assert!(details[1][3].starts_with("Error: "));
}

#[test]
fn scan_ignores_non_xlsx_files_and_subdirectories() {
    let workspace = TestWorkspace::new();
    let input = workspace.input_dir();
    let report = workspace.path().join("report.xlsx");

    write_workbook(
        &input.join("top.xlsx"),
        &[("Sheet1", vec![vec![t("name")], vec![t("Alice")]])],
    );
    std::fs::write(input.join("notes.csv"), "name\nAlice\n").expect("write csv");
    let nested = input.join("nested");
    std::fs::create_dir_all(&nested).expect("create nested dir");
    write_workbook(
        &nested.join("inner.xlsx"),
        &[("Sheet1", vec![vec![t("name")], vec![t("Bob")]])],
    );

    scan_command()
        .args([
            "scan",
            "-i",
            input.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(contains("Scanning 1 workbook(s)"));

    let summary = read_sheet(&report, "Summary");
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[1][0], "top.xlsx");
}

#[test]
fn scan_sample_size_caps_inline_values_but_not_the_detail_sheet() {
    let workspace = TestWorkspace::new();
    let input = workspace.input_dir();
    let report = workspace.path().join("report.xlsx");

    // First value locks latin_words; the numeric strings all mismatch.
    write_workbook(
        &input.join("tags.xlsx"),
        &[(
            "Sheet1",
            vec![
                vec![t("tag")],
                vec![t("Alice")],
                vec![t("12")],
                vec![t("34")],
                vec![t("56")],
                vec![t("78")],
            ],
        )],
    );

    scan_command()
        .args([
            "scan",
            "-i",
            input.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
            "--sample-size",
            "2",
        ])
        .assert()
        .success();

    let summary = read_sheet(&report, "Summary");
    let tag_row = &summary[1];
    assert_eq!(tag_row[6], "latin_words");
    assert_eq!(tag_row[11], "4");
    assert_eq!(tag_row[13], "12 | 34", "sample is a prefix of the full list");

    let details = read_sheet(&report, "Inconsistent Values");
    let values: Vec<_> = details[1..].iter().map(|row| row[3].clone()).collect();
    assert_eq!(values, vec!["12", "34", "56", "78"]);
}

#[test]
fn scan_handles_columns_with_blanks_and_all_null_columns() {
    let workspace = TestWorkspace::new();
    let input = workspace.input_dir();
    let report = workspace.path().join("report.xlsx");

    write_workbook(
        &input.join("gaps.xlsx"),
        &[(
            "Sheet1",
            vec![
                vec![t("name"), t("spare")],
                vec![t("Alice"), common::Cell::Blank],
                vec![common::Cell::Blank, common::Cell::Blank],
                vec![t("Bob"), common::Cell::Blank],
            ],
        )],
    );

    scan_command()
        .args([
            "scan",
            "-i",
            input.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
        ])
        .assert()
        .success();

    let summary = read_sheet(&report, "Summary");
    let name_row = &summary[1];
    assert_eq!(&name_row[3..6], &["3", "2", "1"]);
    assert_eq!(name_row[12], "100");

    let spare_row = &summary[2];
    assert_eq!(&spare_row[3..7], &["3", "0", "3", "other"]);
    assert_eq!(spare_row[12], "100");
}

#[test]
fn scan_fails_when_input_directory_is_missing() {
    let workspace = TestWorkspace::new();
    let missing = workspace.path().join("absent");
    let report = workspace.path().join("report.xlsx");

    scan_command()
        .args([
            "scan",
            "-i",
            missing.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("error:"));

    assert!(!report.exists(), "no report on environment failure");
}
