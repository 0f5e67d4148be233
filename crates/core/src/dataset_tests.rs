// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::project::ContractKind;
use crate::test_support::{populated_project, sample_dataset};

fn report(id: &str, date: &str) -> DailyReport {
    DailyReport {
        id: RecordId::new(id),
        date: date.into(),
        weather: "Nublado".into(),
        activities: "Alvenaria".into(),
        observations: String::new(),
        author: "Eng. Responsável".into(),
    }
}

fn purchase(id: &str, item: &str, value: f64) -> MaterialPurchase {
    MaterialPurchase {
        id: RecordId::new(id),
        date: "2026-03-01".into(),
        item: item.into(),
        quantity: "1".into(),
        supplier: "Casa do Construtor".into(),
        value,
        observation: None,
    }
}

// ── Queries ─────────────────────────────────────────────────────────────

#[test]
fn stats_count_each_status() {
    let stats = sample_dataset().stats();
    assert_eq!(stats, DashboardStats { planning: 1, in_progress: 2, completed: 1 });
    assert_eq!(stats.total(), 4);
}

#[yare::parameterized(
    lowercase = { "fiji",  &["FIJI"] },
    partial   = { "on",    &["MONICA"] },
    accented  = { "ENÇO",  &["LOURENÇO"] },
    empty     = { "",      &["FIJI", "EDMUNDO", "MONICA", "LOURENÇO"] },
    no_match  = { "xyz",   &[] },
)]
fn search_is_case_insensitive(term: &str, expected: &[&str]) {
    let data = sample_dataset();
    let names: Vec<&str> = data.search_projects(term).iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn empty_dataset() {
    assert!(Dataset::default().is_empty());
    assert!(!sample_dataset().is_empty());
}

// ── Projects ────────────────────────────────────────────────────────────

#[test]
fn add_project_uppercases_and_appends() {
    let mut data = sample_dataset();
    let created = data.add_project("  nova obra ", " Centro ").unwrap();
    assert_eq!(created.name, "NOVA OBRA");
    assert_eq!(created.location, "Centro");
    assert_eq!(created.status, ProjectStatus::Planning);
    assert_eq!(data.projects.last().map(|p| &p.id), Some(&created.id));
}

#[test]
fn add_project_rejects_blank_name() {
    let mut data = Dataset::default();
    assert_eq!(data.add_project("   ", "x"), Err(DomainError::EmptyField("project name")));
    assert!(data.projects.is_empty());
}

#[test]
fn insert_project_rejects_duplicate_id() {
    let mut data = sample_dataset();
    let dup = Project::builder().id("1").build();
    assert_eq!(data.insert_project(dup), Err(DomainError::DuplicateId("1".into())));
}

#[yare::parameterized(
    in_range = { 55,  55 },
    negative = { -10, 0 },
    over     = { 180, 100 },
)]
fn set_progress_clamps(input: i64, expected: u8) {
    let mut data = sample_dataset();
    assert_eq!(data.set_progress("1", input).unwrap(), expected);
    assert_eq!(data.project("1").map(|p| p.progress), Some(expected));
}

#[test]
fn set_status_on_missing_project() {
    let mut data = sample_dataset();
    assert_eq!(
        data.set_status("nope", ProjectStatus::Completed),
        Err(DomainError::ProjectNotFound("nope".into()))
    );
}

#[test]
fn update_project_replaces_by_id() {
    let mut data = sample_dataset();
    let mut edited = data.project("2").cloned().unwrap();
    edited.location = "Novo endereço".into();
    edited.progress = 200;
    data.update_project(edited).unwrap();
    let stored = data.project("2").unwrap();
    assert_eq!(stored.location, "Novo endereço");
    assert_eq!(stored.progress, 100);
}

#[test]
fn delete_project_unassigns_employees() {
    let mut data = sample_dataset();
    data.assign_employee("e1", Some("2")).unwrap();
    let removed = data.delete_project("2").unwrap();
    assert_eq!(removed.name, "EDMUNDO");
    assert!(data.project("2").is_none());
    assert_eq!(data.employee("e1").and_then(|e| e.project_id.clone()), None);
}

#[test]
fn reports_and_purchases_are_prepended() {
    let mut data = sample_dataset();
    data.add_report("1", report("r1", "2026-03-01")).unwrap();
    data.add_report("1", report("r2", "2026-03-02")).unwrap();
    data.add_purchase("1", purchase("c1", "Cimento", 10.0)).unwrap();
    data.add_purchase("1", purchase("c2", "Areia", 5.0)).unwrap();

    let project = data.project("1").unwrap();
    assert_eq!(project.reports[0].id, "r2");
    assert_eq!(project.purchases[0].id, "c2");
    assert_eq!(project.purchases_total(), 15.0);
}

#[test]
fn duplicate_report_id_rejected() {
    let mut data = sample_dataset();
    data.add_report("1", report("r1", "2026-03-01")).unwrap();
    assert_eq!(
        data.add_report("1", report("r1", "2026-03-02")),
        Err(DomainError::DuplicateId("r1".into()))
    );
}

#[test]
fn purchase_requires_item() {
    let mut data = sample_dataset();
    assert_eq!(
        data.add_purchase("1", purchase("c1", " ", 10.0)),
        Err(DomainError::EmptyField("purchase item"))
    );
}

#[test]
fn remove_purchase() {
    let mut data = sample_dataset();
    data.add_purchase("1", purchase("c1", "Cimento", 10.0)).unwrap();
    assert_eq!(data.remove_purchase("1", "c1").unwrap().item, "Cimento");
    assert_eq!(data.remove_purchase("1", "c1"), Err(DomainError::RecordNotFound("c1".into())));
}

#[test]
fn first_photo_becomes_main_photo() {
    let mut data = sample_dataset();
    let photo = |id: &str| ProjectPhoto {
        id: RecordId::new(id),
        url: format!("https://cdn.example.com/{id}.jpg"),
        caption: String::new(),
        date: "2026-03-01".into(),
    };
    data.add_photo("1", photo("a")).unwrap();
    data.add_photo("1", photo("b")).unwrap();
    let project = data.project("1").unwrap();
    assert_eq!(project.main_photo.as_deref(), Some("https://cdn.example.com/a.jpg"));
    assert_eq!(project.photos.len(), 2);

    assert_eq!(data.add_photo("1", photo("a")), Err(DomainError::DuplicateId("a".into())));
    assert_eq!(data.project("1").unwrap().photos.len(), 2);
}

#[test]
fn contracts_and_documents_append() {
    let mut data = sample_dataset();
    data.add_contract(
        "1",
        Contract {
            id: RecordId::new("k1"),
            kind: ContractKind::Client,
            name: "contrato.pdf".into(),
            url: "#".into(),
            date: "01/03/2026".into(),
        },
    )
    .unwrap();
    data.add_document("1", "alvara.pdf").unwrap();
    let project = data.project("1").unwrap();
    assert_eq!(project.contracts.len(), 1);
    assert_eq!(project.documents, vec!["alvara.pdf".to_string()]);
}

#[test]
fn duplicate_contract_id_rejected() {
    let mut data = sample_dataset();
    let contract = Contract {
        id: RecordId::new("k1"),
        kind: ContractKind::Client,
        name: "contrato.pdf".into(),
        url: "#".into(),
        date: "01/03/2026".into(),
    };
    data.add_contract("1", contract.clone()).unwrap();
    assert_eq!(data.add_contract("1", contract), Err(DomainError::DuplicateId("k1".into())));
    assert_eq!(data.project("1").unwrap().contracts.len(), 1);
}

#[test]
fn record_presence_replaces_the_day() {
    let mut data = Dataset::new(vec![populated_project("2")], Vec::new());
    let overrides = HashMap::from([(EmployeeId::new("e1"), PresenceStatus::Absent)]);

    let records = data.record_presence("2", "2026-03-01", &overrides).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "2026-03-01-e1");
    assert_eq!(records[0].status, PresenceStatus::Absent);

    let project = data.project("2").unwrap();
    let day = project.presence_on("2026-03-01");
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].status, PresenceStatus::Absent);
}

#[test]
fn record_presence_defaults_to_present() {
    let mut data = Dataset::new(vec![populated_project("2")], Vec::new());
    let records = data.record_presence("2", "2026-03-05", &HashMap::new()).unwrap();
    assert_eq!(records[0].status, PresenceStatus::Present);
    assert_eq!(data.project("2").unwrap().presence.len(), 2);
}

#[test]
fn record_presence_requires_date() {
    let mut data = sample_dataset();
    assert_eq!(
        data.record_presence("1", " ", &HashMap::new()),
        Err(DomainError::EmptyField("date"))
    );
}

// ── Employees ───────────────────────────────────────────────────────────

#[test]
fn add_employee_uppercases() {
    let mut data = Dataset::default();
    let employee = data.add_employee("ana lima", "servente", Some(120.0)).unwrap();
    assert_eq!(employee.name, "ANA LIMA");
    assert_eq!(employee.role, "SERVENTE");
    assert!(employee.active);
    assert_eq!(employee.project_id, None);
    assert_eq!(data.employees.len(), 1);
}

#[yare::parameterized(
    blank_name = { " ",   "PEDREIRO", "employee name" },
    blank_role = { "ANA", "",         "employee role" },
)]
fn add_employee_requires_fields(name: &str, role: &str, field: &'static str) {
    let mut data = Dataset::default();
    assert_eq!(data.add_employee(name, role, None), Err(DomainError::EmptyField(field)));
}

#[test]
fn insert_employee_validates_assignment() {
    let mut data = sample_dataset();
    let stray = Employee::builder().id("e9").project_id("nope").build();
    assert_eq!(data.insert_employee(stray), Err(DomainError::ProjectNotFound("nope".into())));
}

#[test]
fn assign_moves_between_crews() {
    let mut data = sample_dataset();
    data.assign_employee("e1", Some("1")).unwrap();
    assert!(data.project("1").unwrap().has_crew_member("e1"));

    let moved = data.assign_employee("e1", Some("2")).unwrap();
    assert_eq!(moved.project_id.as_ref().map(|p| p.as_str()), Some("2"));
    assert!(!data.project("1").unwrap().has_crew_member("e1"));
    assert!(data.project("2").unwrap().has_crew_member("e1"));
    assert_eq!(data.employees_of("2").len(), 1);
}

#[test]
fn unassign_leaves_every_crew() {
    let mut data = sample_dataset();
    data.assign_employee("e1", Some("1")).unwrap();
    data.assign_employee("e1", None).unwrap();
    assert!(data.projects.iter().all(|p| !p.has_crew_member("e1")));
    assert!(data.employees_of("1").is_empty());
}

#[test]
fn assign_to_missing_project_changes_nothing() {
    let mut data = sample_dataset();
    let before = data.clone();
    assert_eq!(
        data.assign_employee("e1", Some("nope")),
        Err(DomainError::ProjectNotFound("nope".into()))
    );
    assert_eq!(data, before);
}

#[test]
fn update_employee_replaces_by_id() {
    let mut data = sample_dataset();
    let mut edited = data.employee("e2").cloned().unwrap();
    edited.role = "MESTRE DE OBRAS".into();
    edited.daily_rate = Some(320.0);
    data.update_employee(edited.clone()).unwrap();
    assert_eq!(data.employee("e2"), Some(&edited));
    assert_eq!(data.employees.len(), 2);
}

#[test]
fn update_employee_rejects_unknown_project() {
    let mut data = sample_dataset();
    let mut edited = data.employee("e2").cloned().unwrap();
    edited.project_id = Some(ProjectId::new("nope"));
    assert_eq!(data.update_employee(edited), Err(DomainError::ProjectNotFound("nope".into())));
}

#[test]
fn deactivation_updates_crew_snapshots() {
    let mut data = sample_dataset();
    data.assign_employee("e1", Some("1")).unwrap();
    data.set_employee_active("e1", false).unwrap();
    assert!(!data.employee("e1").unwrap().active);
    assert!(!data.project("1").unwrap().employees[0].active);
}

#[test]
fn delete_employee_removes_from_crews() {
    let mut data = sample_dataset();
    data.assign_employee("e1", Some("1")).unwrap();
    data.delete_employee("e1").unwrap();
    assert!(data.employee("e1").is_none());
    assert!(!data.project("1").unwrap().has_crew_member("e1"));
    assert_eq!(data.delete_employee("e1"), Err(DomainError::EmployeeNotFound("e1".into())));
}
