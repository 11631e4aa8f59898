//! Report directories: write, read back, verify, and fail closed.

use std::path::Path;

use waypoint_harness::report_dir::{
    read_report_dir, write_report_dir, ReportDirError, DIGEST_FILENAME, REPORT_FILENAME,
};
use waypoint_harness::runner::{compare_strategies, run_world, RunReport};
use waypoint_harness::worlds::jobs::JobSequencing;
use waypoint_harness::worlds::maze::GridMaze;
use waypoint_harness::worlds::route::RouteProblem;
use waypoint_search::{SearchPolicy, Strategy};

fn roundtrip(report: &RunReport, dir: &Path) {
    let written = write_report_dir(report, dir).unwrap();
    let stored = read_report_dir(dir).unwrap();
    assert_eq!(stored.digest, written);
    assert_eq!(stored.report, report.to_json_value().unwrap());
    assert_eq!(
        std::fs::read(dir.join(REPORT_FILENAME)).unwrap(),
        report.canonical_bytes().unwrap()
    );
}

#[test]
fn every_strategy_report_roundtrips() {
    let tmp = tempfile::tempdir().unwrap();
    let route = RouteProblem::panadura_to_ratnapura().unwrap();
    let policy = SearchPolicy::default().with_trace();
    for report in compare_strategies(&route, &Strategy::ALL, &policy).unwrap() {
        roundtrip(&report, &tmp.path().join(report.strategy.as_str()));
    }
}

#[test]
fn directory_path_is_not_part_of_the_digest() {
    let tmp = tempfile::tempdir().unwrap();
    let report = run_world(&JobSequencing::reference(), Strategy::Ucs, &SearchPolicy::default())
        .unwrap();
    let a = write_report_dir(&report, &tmp.path().join("first")).unwrap();
    let b = write_report_dir(&report, &tmp.path().join("second").join("nested")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rewriting_a_directory_replaces_the_report() {
    let tmp = tempfile::tempdir().unwrap();
    let maze = GridMaze::reference();
    let bfs = run_world(&maze, Strategy::Bfs, &SearchPolicy::default()).unwrap();
    let dfs = run_world(&maze, Strategy::Dfs, &SearchPolicy::default()).unwrap();

    write_report_dir(&bfs, tmp.path()).unwrap();
    write_report_dir(&dfs, tmp.path()).unwrap();

    let stored = read_report_dir(tmp.path()).unwrap();
    assert_eq!(stored.report["strategy"], "dfs");
    assert_eq!(stored.digest, dfs.digest().unwrap());
}

#[test]
fn forged_digest_fails_closed() {
    let tmp = tempfile::tempdir().unwrap();
    let report = run_world(&GridMaze::reference(), Strategy::AStar, &SearchPolicy::default())
        .unwrap();
    write_report_dir(&report, tmp.path()).unwrap();

    let forged = format!("sha256:{}", "0".repeat(64));
    std::fs::write(tmp.path().join(DIGEST_FILENAME), forged).unwrap();

    match read_report_dir(tmp.path()) {
        Err(ReportDirError::DigestMismatch { stored, recomputed }) => {
            assert!(stored.ends_with(&"0".repeat(64)));
            assert_eq!(recomputed, report.digest().unwrap().as_str());
        }
        other => panic!("expected DigestMismatch, got {other:?}"),
    }
}

#[test]
fn missing_report_fails_closed() {
    let tmp = tempfile::tempdir().unwrap();
    let err = read_report_dir(tmp.path()).unwrap_err();
    assert!(
        matches!(&err, ReportDirError::MissingFile { filename } if filename == REPORT_FILENAME),
        "{err}"
    );
}

#[test]
fn garbage_report_is_a_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(REPORT_FILENAME), b"not json").unwrap();
    std::fs::write(tmp.path().join(DIGEST_FILENAME), b"sha256:00").unwrap();
    let err = read_report_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, ReportDirError::Parse { .. }), "{err}");
}
