// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ob-core: Records and domain operations for the obras dashboard

pub mod macros;

pub mod clock;
pub mod credentials;
pub mod dataset;
pub mod employee;
pub mod id;
pub mod lenient;
pub mod project;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use credentials::{CredentialsError, RemoteCredentials};
pub use dataset::{DashboardStats, Dataset, DomainError};
pub use employee::Employee;
pub use id::{EmployeeId, ProjectId, RecordId};
pub use project::{
    Contract, ContractKind, DailyReport, MaterialPurchase, PresenceRecord, PresenceStatus,
    Project, ProjectPhoto, ProjectStatus,
};
#[cfg(any(test, feature = "test-support"))]
pub use test_support::{EmployeeBuilder, ProjectBuilder};
pub use time_fmt::{format_elapsed, format_elapsed_since};
