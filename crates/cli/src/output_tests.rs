// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ob_adapters::RemoteError;
use serial_test::serial;

#[test]
fn column_widths_take_widest_cell() {
    let rows = [
        ["1".to_string(), "FIJI".to_string()],
        ["22".to_string(), "LOURENÇO".to_string()],
    ];
    assert_eq!(column_widths(["ID", "NAME"], &rows), [2, 8]);
}

#[test]
#[serial]
fn write_table_aligns_columns() {
    std::env::set_var("NO_COLOR", "1");
    let rows = [
        ["1".to_string(), "FIJI".to_string(), "65%".to_string()],
        ["2".to_string(), "EDMUNDO".to_string(), "42%".to_string()],
    ];
    let mut out = Vec::new();
    write_table(&mut out, ["ID", "NAME", "PROGRESS"], &rows).unwrap();

    let text = String::from_utf8(out).unwrap();
    similar_asserts::assert_eq!(
        text,
        "ID  NAME     PROGRESS\n1   FIJI     65%\n2   EDMUNDO  42%\n"
    );
}

#[test]
fn push_warning_only_for_failures() {
    assert_eq!(push_warning(None), None);
    assert_eq!(push_warning(Some(&PushOutcome::Pushed { projects: 1, employees: 0 })), None);

    let warning = push_warning(Some(&PushOutcome::Failed(RemoteError::Timeout))).unwrap();
    assert!(warning.contains("saved locally"));
    assert!(warning.contains("TIMEOUT"));
}

#[test]
fn format_time_ago_unknown_is_dash() {
    assert_eq!(format_time_ago(0), "-");
}

#[test]
fn handle_list_json_succeeds_for_empty() {
    let items: Vec<String> = Vec::new();
    assert!(handle_list(OutputFormat::Json, &items, "none", |_, _| Ok(())).is_ok());
}
