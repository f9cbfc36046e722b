//! Integration tests for report dispatch: singleton gating, ordering, and the
//! recoverable/fatal failure split.

use crate::integration::test_utils::{
    calls, recording_registry, register_recorder, Behavior, CallLog, Station,
};
use skinrun::engine::ReportEngine;
use skinrun::error::{ReportError, Severity};
use skinrun::generator::RunContext;
use std::sync::Arc;

fn engine(
    station: &Station,
    reports: &str,
    registry: skinrun::GeneratorRegistry,
    first_run: bool,
) -> ReportEngine {
    ReportEngine::new(
        Arc::new(station.global(reports)),
        Arc::new(registry),
        RunContext::new(None, first_run),
    )
}

#[test]
fn test_singletons_run_first_on_first_run() {
    let station = Station::new();
    station.write_skin(
        "Standard",
        "singleton_list = [\"Setup\"]\ngenerator_list = [\"Daily\"]\n",
    );
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["Setup", "Daily"], &log);

    engine(&station, "[reports.Main]\n", registry, true)
        .run()
        .unwrap();

    assert_eq!(calls(&log), vec!["Main:Setup", "Main:Daily"]);
}

#[test]
fn test_singletons_skipped_after_first_run() {
    let station = Station::new();
    station.write_skin(
        "Standard",
        "singleton_list = [\"Setup\"]\ngenerator_list = [\"Daily\"]\n",
    );
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["Setup", "Daily"], &log);

    engine(&station, "[reports.Main]\n", registry, false)
        .run()
        .unwrap();

    assert_eq!(calls(&log), vec!["Main:Daily"]);
}

#[test]
fn test_generator_order_is_preserved() {
    let station = Station::new();
    station.write_skin("Standard", "generator_list = [\"X\", \"Y\", \"Z\"]\n");
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["Z", "Y", "X"], &log);

    let summary = engine(&station, "[reports.Main]\n", registry, true)
        .run()
        .unwrap();

    assert_eq!(calls(&log), vec!["Main:X", "Main:Y", "Main:Z"]);
    assert_eq!(summary.executed_generators(), vec!["X", "Y", "Z"]);
}

#[test]
fn test_reports_run_in_declaration_order() {
    let station = Station::new();
    station.write_skin("Standard", "generator_list = [\"Daily\"]\n");
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["Daily"], &log);

    engine(
        &station,
        "[reports.Zulu]\n[reports.Alpha]\n[reports.Mike]\n",
        registry,
        true,
    )
    .run()
    .unwrap();

    assert_eq!(
        calls(&log),
        vec!["Zulu:Daily", "Alpha:Daily", "Mike:Daily"]
    );
}

#[test]
fn test_missing_skin_does_not_block_other_reports() {
    let station = Station::new();
    station.write_skin("Standard", "generator_list = [\"Daily\"]\n");
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["Daily"], &log);

    let summary = engine(
        &station,
        "[reports.A]\nskin = \"Vanished\"\n\n[reports.B]\n",
        registry,
        true,
    )
    .run()
    .unwrap();

    assert_eq!(calls(&log), vec!["B:Daily"]);
    assert_eq!(summary.completed_reports, vec!["B"]);
    assert_eq!(summary.skipped_reports.len(), 1);
    assert_eq!(summary.skipped_reports[0].report, "A");
}

#[test]
fn test_malformed_skin_is_skipped_like_a_missing_one() {
    let station = Station::new();
    station.write_skin("Broken", "generator_list = [\"Daily\"\n");
    station.write_skin("Standard", "generator_list = [\"Daily\"]\n");
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["Daily"], &log);

    let summary = engine(
        &station,
        "[reports.A]\nskin = \"Broken\"\n\n[reports.B]\n",
        registry,
        true,
    )
    .run()
    .unwrap();

    assert_eq!(calls(&log), vec!["B:Daily"]);
    assert!(summary.skipped_reports[0].reason.contains("malformed"));
}

#[test]
fn test_unknown_generator_is_skipped_and_run_continues() {
    let station = Station::new();
    station.write_skin("Standard", "generator_list = [\"X\", \"Y\", \"Z\"]\n");
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["X", "Z"], &log);

    let summary = engine(&station, "[reports.Main]\n", registry, true)
        .run()
        .unwrap();

    assert_eq!(calls(&log), vec!["Main:X", "Main:Z"]);
    assert_eq!(summary.skipped_generators.len(), 1);
    assert_eq!(summary.skipped_generators[0].generator, "Y");
}

#[test]
fn test_runtime_failure_aborts_the_whole_run() {
    let station = Station::new();
    station.write_skin("Standard", "generator_list = [\"X\", \"Y\", \"Z\"]\n");
    let log: CallLog = Arc::default();
    let mut registry = recording_registry(&["X", "Z"], &log);
    register_recorder(&mut registry, "Y", &log, Behavior::Fail);

    let err = engine(
        &station,
        "[reports.First]\n[reports.Second]\n",
        registry,
        true,
    )
    .run()
    .unwrap_err();

    assert_eq!(err.severity(), Severity::Fatal);
    match &err {
        ReportError::GeneratorFailed {
            report, generator, ..
        } => {
            assert_eq!(report, "First");
            assert_eq!(generator, "Y");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls(&log), vec!["First:X", "First:Y"]);
}

#[test]
fn test_singleton_failure_prevents_regular_list() {
    let station = Station::new();
    station.write_skin(
        "Standard",
        "singleton_list = [\"Setup\"]\ngenerator_list = [\"Daily\"]\n",
    );
    let log: CallLog = Arc::default();
    let mut registry = recording_registry(&["Daily"], &log);
    register_recorder(&mut registry, "Setup", &log, Behavior::Fail);

    let result = engine(&station, "[reports.Main]\n", registry, true).run();

    assert!(result.is_err());
    assert_eq!(calls(&log), vec!["Main:Setup"]);
}

#[test]
fn test_spawned_failure_surfaces_on_join() {
    let station = Station::new();
    station.write_skin("Standard", "generator_list = [\"Y\", \"Z\"]\n");
    let log: CallLog = Arc::default();
    let mut registry = recording_registry(&["Z"], &log);
    register_recorder(&mut registry, "Y", &log, Behavior::Fail);

    let task = engine(&station, "[reports.A]\n[reports.B]\n", registry, true)
        .spawn()
        .unwrap();
    let err = task.join().unwrap_err();

    assert!(matches!(err, ReportError::GeneratorFailed { .. }));
    assert_eq!(calls(&log), vec!["A:Y"]);
}

#[test]
fn test_report_override_selects_generators() {
    let station = Station::new();
    station.write_skin(
        "Standard",
        "generator_list = [\"Daily\", \"Upload\"]\n",
    );
    let log: CallLog = Arc::default();
    let registry = recording_registry(&["Daily", "Upload"], &log);

    engine(
        &station,
        "[reports.Local]\ngenerator_list = [\"Daily\"]\n\n[reports.Remote]\n",
        registry,
        true,
    )
    .run()
    .unwrap();

    assert_eq!(
        calls(&log),
        vec!["Local:Daily", "Remote:Daily", "Remote:Upload"]
    );
}
