//! Integration tests for the severity of handled-condition log events.
//!
//! Runs the CLI with JSON logs written to a file and checks that each
//! handled condition is logged, in order, at a level matching whether the
//! run could continue.

use crate::integration::test_utils::Station;
use serde_json::Value;
use std::fs;
use std::process::Command;

fn read_events(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Position and level of the first event whose message is `message`
fn find_event<'a>(events: &'a [Value], message: &str) -> (usize, &'a Value) {
    events
        .iter()
        .enumerate()
        .find(|(_, event)| event["fields"]["message"] == message)
        .unwrap_or_else(|| panic!("no '{}' event in {:#?}", message, events))
}

#[test]
fn test_handled_conditions_log_at_matching_severity() {
    let station = Station::new();
    station.write_skin(
        "Standard",
        r#"
generator_list = ["Ghost", "Copy"]

[Files.Copy]
copy_once = "weewx.css"
"#,
    );
    station.write_file("skins/Standard/weewx.css", "body {}");
    // A regular file where the destination directory should be
    station.write_file("blocked", "not a directory");
    let config_file = station.write_global(
        "[reports]\nhtml_root = \"blocked/html\"\n\n[reports.A]\nskin = \"Vanished\"\n\n[reports.B]\n",
    );
    let log_file = station.root().join("logs").join("skinrun.log");

    let bin = env!("CARGO_BIN_EXE_skinrun");
    let output = Command::new(bin)
        .env_remove("SKINRUN_LOG")
        .env_remove("SKINRUN_LOG_MODULES")
        .env_remove("SKINRUN_LOG_FORMAT")
        .env_remove("SKINRUN_LOG_OUTPUT")
        .env_remove("SKINRUN__STATION__ROOT")
        .arg(&config_file)
        .arg("--log-format")
        .arg("json")
        .arg("--log-output")
        .arg("file")
        .arg("--log-file")
        .arg(&log_file)
        .output()
        .unwrap();

    assert!(
        !output.status.success(),
        "copy failure should end the run: stdout={:?}",
        String::from_utf8_lossy(&output.stdout)
    );

    let events = read_events(&log_file);

    let (missing_at, missing) = find_event(
        &events,
        "No skin configuration file for report; report ignored",
    );
    assert_eq!(missing["level"], "INFO");
    assert_eq!(missing["fields"]["report"], "A");

    let (unknown_at, unknown) =
        find_event(&events, "Unable to instantiate generator; generator ignored");
    assert_eq!(unknown["level"], "ERROR");
    assert_eq!(unknown["fields"]["report"], "B");
    assert_eq!(unknown["fields"]["generator"], "Ghost");

    let (fatal_at, fatal) = find_event(
        &events,
        "Caught unrecoverable error in generator; report task exiting",
    );
    assert_eq!(fatal["level"], "ERROR");
    assert_eq!(fatal["fields"]["generator"], "Copy");

    assert!(missing_at < unknown_at && unknown_at < fatal_at);
    assert!(!events.iter().any(|event| event["fields"]["message"] == "Report run finished"));
}
