// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    Contract, ContractKind, DailyReport, Dataset, Employee, EmployeeId, MaterialPurchase,
    PresenceRecord, PresenceStatus, Project, ProjectId, ProjectPhoto, ProjectStatus, RecordId,
};

crate::builder! {
    pub struct ProjectBuilder => Project {
        into {
            id: ProjectId = ProjectId::generate(),
            name: String = "FIJI",
            location: String = "Orla Marítima",
        }
        set {
            status: ProjectStatus = ProjectStatus::InProgress,
            progress: u8 = 65,
            employees: Vec<Employee> = Vec::new(),
            reports: Vec<DailyReport> = Vec::new(),
            purchases: Vec<MaterialPurchase> = Vec::new(),
            photos: Vec<ProjectPhoto> = Vec::new(),
            presence: Vec<PresenceRecord> = Vec::new(),
            contracts: Vec<Contract> = Vec::new(),
            documents: Vec<String> = Vec::new(),
        }
        option {
            main_photo: String = None,
        }
    }
}

crate::builder! {
    pub struct EmployeeBuilder => Employee {
        into {
            id: EmployeeId = EmployeeId::generate(),
            name: String = "JOÃO SILVA",
            role: String = "PEDREIRO",
        }
        set {
            active: bool = true,
        }
        option {
            daily_rate: f64 = None,
            project_id: ProjectId = None,
        }
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// Four obras, one per status plus a second in progress
pub fn sample_projects() -> Vec<Project> {
    vec![
        Project::builder().id("1").name("FIJI").location("Orla Marítima").progress(65).build(),
        Project::builder().id("2").name("EDMUNDO").location("Centro Histórico").progress(42).build(),
        Project::builder()
            .id("3")
            .name("MONICA")
            .location("Bairro Nobre")
            .status(ProjectStatus::Planning)
            .progress(10)
            .build(),
        Project::builder()
            .id("4")
            .name("LOURENÇO")
            .location("Zona Sul")
            .status(ProjectStatus::Completed)
            .progress(100)
            .build(),
    ]
}

pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::builder().id("e1").name("JOÃO SILVA").role("PEDREIRO").daily_rate(180.0).build(),
        Employee::builder().id("e2").name("MARIA SOUZA").role("MESTRE DE OBRAS").build(),
    ]
}

pub fn sample_dataset() -> Dataset {
    Dataset::new(sample_projects(), sample_employees())
}

/// A project with every nested collection populated
pub fn populated_project(id: &str) -> Project {
    let crew = Employee::builder().id("e1").name("JOÃO SILVA").project_id(id).build();
    Project::builder()
        .id(id)
        .name("EDMUNDO")
        .main_photo("https://cdn.example.com/edmundo/front.jpg")
        .employees(vec![crew])
        .reports(vec![
            DailyReport {
                id: RecordId::new("r2"),
                date: "2026-03-02".into(),
                weather: "Chuvoso".into(),
                activities: "Impermeabilização da laje".into(),
                observations: String::new(),
                author: "Eng. Responsável".into(),
            },
            DailyReport {
                id: RecordId::new("r1"),
                date: "2026-03-01".into(),
                weather: "Ensolarado".into(),
                activities: "Concretagem do pilar P4".into(),
                observations: "Atraso na entrega do aço".into(),
                author: "Eng. Responsável".into(),
            },
        ])
        .purchases(vec![MaterialPurchase {
            id: RecordId::new("c1"),
            date: "2026-03-01".into(),
            item: "Cimento CP-II".into(),
            quantity: "50 sacos".into(),
            supplier: "Casa do Construtor".into(),
            value: 1_875.5,
            observation: Some("Entrega parcial".into()),
        }])
        .photos(vec![ProjectPhoto {
            id: RecordId::new("f1"),
            url: "https://cdn.example.com/edmundo/front.jpg".into(),
            caption: "Fachada".into(),
            date: "2026-03-01".into(),
        }])
        .presence(vec![PresenceRecord {
            id: RecordId::new("2026-03-01-e1"),
            date: "2026-03-01".into(),
            employee_id: EmployeeId::new("e1"),
            employee_name: "JOÃO SILVA".into(),
            status: PresenceStatus::Excused,
        }])
        .contracts(vec![Contract {
            id: RecordId::new("k1"),
            kind: ContractKind::Contractor,
            name: "empreitada.pdf".into(),
            url: "#".into(),
            date: "01/03/2026".into(),
        }])
        .documents(vec!["alvara.pdf".into(), "art.pdf".into()])
        .build()
}

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for records and dataset mutations.
pub mod strategies {
    use crate::{Dataset, Employee, EmployeeId, Project, ProjectId, ProjectStatus};
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = ProjectStatus> {
        prop_oneof![
            Just(ProjectStatus::Planning),
            Just(ProjectStatus::InProgress),
            Just(ProjectStatus::Completed),
        ]
    }

    pub fn arb_project() -> impl Strategy<Value = Project> {
        ("[A-Z]{1,8}", "[a-z ]{0,12}", arb_status(), 0u8..=100, proptest::collection::vec("[a-z]{1,6}\\.pdf", 0..3))
            .prop_map(|(name, location, status, progress, documents)| {
                let mut project = Project::new(name, location);
                project.id = ProjectId::generate();
                project.status = status;
                project.progress = progress;
                project.documents = documents;
                project
            })
    }

    pub fn arb_employee() -> impl Strategy<Value = Employee> {
        ("[A-Z]{1,8}", "[A-Z]{1,8}", proptest::option::of(50.0f64..500.0)).prop_map(
            |(name, role, rate)| {
                let mut employee = Employee::new(name, role);
                employee.id = EmployeeId::generate();
                employee.daily_rate = rate;
                employee
            },
        )
    }

    /// A dataset-level edit as issued by the application shell
    #[derive(Debug, Clone)]
    pub enum Mutation {
        AddProject { name: String, location: String },
        AddEmployee { name: String, role: String },
        SetProgress { index: usize, percent: i64 },
        SetStatus { index: usize, status: ProjectStatus },
        DeleteProject { index: usize },
        Assign { employee: usize, project: usize },
    }

    impl Mutation {
        /// Apply against `data`, resolving indices modulo collection sizes.
        /// Inapplicable mutations (empty collections) are skipped.
        pub fn apply(&self, data: &mut Dataset) {
            let pick = |len: usize, i: usize| (len > 0).then(|| i % len);
            match self {
                Mutation::AddProject { name, location } => {
                    let _ = data.add_project(name, location);
                }
                Mutation::AddEmployee { name, role } => {
                    let _ = data.add_employee(name, role, None);
                }
                Mutation::SetProgress { index, percent } => {
                    if let Some(i) = pick(data.projects.len(), *index) {
                        let id = data.projects[i].id.clone();
                        let _ = data.set_progress(&id, *percent);
                    }
                }
                Mutation::SetStatus { index, status } => {
                    if let Some(i) = pick(data.projects.len(), *index) {
                        let id = data.projects[i].id.clone();
                        let _ = data.set_status(&id, *status);
                    }
                }
                Mutation::DeleteProject { index } => {
                    if let Some(i) = pick(data.projects.len(), *index) {
                        let id = data.projects[i].id.clone();
                        let _ = data.delete_project(&id);
                    }
                }
                Mutation::Assign { employee, project } => {
                    let e = pick(data.employees.len(), *employee);
                    let p = pick(data.projects.len(), *project);
                    if let (Some(e), Some(p)) = (e, p) {
                        let eid = data.employees[e].id.clone();
                        let pid = data.projects[p].id.clone();
                        let _ = data.assign_employee(&eid, Some(pid.as_str()));
                    }
                }
            }
        }
    }

    pub fn arb_mutation() -> impl Strategy<Value = Mutation> {
        prop_oneof![
            ("[A-Za-z]{1,8}", "[a-z]{0,8}")
                .prop_map(|(name, location)| Mutation::AddProject { name, location }),
            ("[A-Za-z]{1,8}", "[A-Za-z]{1,8}")
                .prop_map(|(name, role)| Mutation::AddEmployee { name, role }),
            (any::<usize>(), -20i64..150).prop_map(|(index, percent)| Mutation::SetProgress { index, percent }),
            (any::<usize>(), arb_status()).prop_map(|(index, status)| Mutation::SetStatus { index, status }),
            any::<usize>().prop_map(|index| Mutation::DeleteProject { index }),
            (any::<usize>(), any::<usize>()).prop_map(|(employee, project)| Mutation::Assign { employee, project }),
        ]
    }
}
