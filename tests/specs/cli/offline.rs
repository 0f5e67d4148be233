//! Offline operation: every edit lands in the local store.

use crate::prelude::*;

#[test]
fn fresh_state_is_empty_and_offline() {
    cli()
        .args(&["status"])
        .passes()
        .stdout_has("Sync: offline")
        .stdout_has("remote:     not configured")
        .stdout_has("Projects: 0");
}

#[test]
fn added_project_is_listed_on_next_run() {
    let state = State::new();
    state.ob().args(&["project", "add", "fiji", "Orla Marítima"]).passes().stdout_has("'FIJI' created");

    state
        .ob()
        .args(&["project", "list"])
        .passes()
        .stdout_has("NAME")
        .stdout_has("FIJI")
        .stdout_has("planning")
        .stdout_has("Orla Marítima");
    assert!(state.read("projects_cache.json").contains("FIJI"));
}

#[test]
fn project_json_uses_backend_columns() {
    let state = State::new();
    let created = state.ob().args(&["-o", "json", "project", "add", "nova", "Centro"]).passes().json();
    let id = created["id"].as_str().unwrap().to_string();

    let shown = state.ob().args(&["--output", "json", "project", "show", &id]).passes().json();
    assert_eq!(shown["name"], "NOVA");
    assert_eq!(shown["status"], "Planejamento");
    assert!(shown.get("mainPhoto").is_some());
}

#[test]
fn progress_is_clamped() {
    let state = State::new();
    let id = state.ob().args(&["-o", "json", "project", "add", "fiji", ""]).passes().json()["id"]
        .as_str()
        .unwrap()
        .to_string();

    state.ob().args(&["project", "progress", &id, "150"]).passes().stdout_has("set to 100%");
    state.ob().args(&["project", "progress", &id, "-5"]).passes().stdout_has("set to 0%");
}

#[test]
fn unknown_project_fails_without_changes() {
    let state = State::new();
    state.ob().args(&["project", "delete", "missing"]).fails().stderr_has("missing");
    assert!(!state.file("projects_cache.json").exists());
}

#[test]
fn crew_assignment_and_presence() {
    let state = State::new();
    let project = state.ob().args(&["-o", "json", "project", "add", "fiji", ""]).passes().json();
    let project_id = project["id"].as_str().unwrap().to_string();
    let employee = state
        .ob()
        .args(&["-o", "json", "employee", "add", "ana", "servente", "--daily-rate", "150"])
        .passes()
        .json();
    let employee_id = employee["id"].as_str().unwrap().to_string();

    state.ob().args(&["employee", "assign", &employee_id, &project_id]).passes().stdout_has("assigned");
    state.ob().args(&["project", "show", &project_id]).passes().stdout_has("crew:      ANA");

    state
        .ob()
        .args(&["project", "presence", &project_id, "--date", "2026-03-01", "--absent", &employee_id])
        .passes()
        .stdout_has("absent");

    state.ob().args(&["project", "delete", &project_id]).passes();
    state.ob().args(&["employee", "list"]).passes().stdout_has("ANA").stdout_lacks("FIJI");
}

#[test]
fn report_and_purchase_appear_in_show() {
    let state = State::new();
    let id = state.ob().args(&["-o", "json", "project", "add", "fiji", ""]).passes().json()["id"]
        .as_str()
        .unwrap()
        .to_string();

    state
        .ob()
        .args(&[
            "project", "report", &id, "--date", "2026-03-02", "--weather", "Chuvoso",
            "--activities", "Impermeabilização",
        ])
        .passes();
    state
        .ob()
        .args(&["project", "purchase", &id, "--item", "Cimento", "--date", "2026-03-02", "--value", "99.5"])
        .passes();

    state
        .ob()
        .args(&["project", "show", &id])
        .passes()
        .stdout_has("latest 2026-03-02: Impermeabilização")
        .stdout_has("purchases: 1 totalling 99.50");
}

#[test]
fn corrupt_cache_is_set_aside() {
    let state = State::new();
    state.write("projects_cache.json", "{ not json");

    state.ob().args(&["status"]).passes().stdout_has("set aside").stdout_has("Projects: 0");
    assert!(state.file("projects_cache.bak").exists());
}

#[test]
fn search_filters_by_name() {
    let state = State::new();
    state.ob().args(&["project", "add", "fiji", ""]).passes();
    state.ob().args(&["project", "add", "edmundo", ""]).passes();

    state
        .ob()
        .args(&["project", "list", "--search", "edm"])
        .passes()
        .stdout_has("EDMUNDO")
        .stdout_lacks("FIJI");
}
