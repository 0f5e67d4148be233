//! Remote configuration against endpoints that cannot serve requests.

use crate::prelude::*;

#[test]
fn setup_sql_prints_both_tables() {
    cli()
        .args(&["remote", "setup-sql"])
        .passes()
        .stdout_has("create table if not exists public.projects")
        .stdout_has("create table if not exists public.employees");
}

#[test]
fn invalid_endpoint_is_saved_but_rejected() {
    let state = State::new();
    state.ob().args(&["remote", "set", "obras.example.co", "anon-key"]).fails().stderr_has("Remote not usable");

    state
        .ob()
        .args(&["remote", "show"])
        .passes()
        .stdout_has("obras.example.co")
        .stdout_has("not usable");
    state.ob().args(&["status"]).passes().stdout_has("(invalid)");
}

#[test]
fn unreachable_endpoint_reports_fetch_error() {
    let state = State::new();
    state
        .ob()
        .args(&["remote", "set", DEAD_ENDPOINT, "anon-key-1234"])
        .fails()
        .stdout_has("Failed:")
        .stdout_has("FETCH_ERROR");

    let shown = state.ob().args(&["-o", "json", "remote", "show"]).passes().json();
    assert_eq!(shown["configured"], true);
    assert_eq!(shown["key"], "****1234");
}

#[test]
fn edits_survive_an_unreachable_remote() {
    let state = State::new();
    state.ob().args(&["remote", "set", DEAD_ENDPOINT, "anon-key"]).fails();

    state
        .ob()
        .args(&["project", "add", "fiji", ""])
        .passes()
        .stdout_has("'FIJI' created")
        .stderr_has("saved locally");

    state.ob().args(&["status"]).passes().stdout_has("Sync: error").stdout_has("Projects: 1");
}

#[test]
fn sync_without_remote_fails_and_keeps_local() {
    let state = State::new();
    state.ob().args(&["project", "add", "fiji", ""]).passes();

    state.ob().args(&["sync"]).fails().stdout_has("Offline:");
    state.ob().args(&["project", "list"]).passes().stdout_has("FIJI");
}

#[test]
fn test_without_remote_fails() {
    cli().args(&["remote", "test"]).fails().stdout_has("waiting for endpoint and key");
}
