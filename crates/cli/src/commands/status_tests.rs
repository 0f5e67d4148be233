// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ob_adapters::ConnectionReport;
use ob_engine::{Indicator, LastError, SyncPhase};
use serial_test::serial;

fn report(configured: bool, endpoint: Option<&str>) -> StatusReport {
    StatusReport {
        sync: SyncStatus {
            phase: SyncPhase::LocalAuthoritative,
            configured,
            indicator: if configured { Indicator::Configured } else { Indicator::Offline },
            connection: None,
            last_synced_ms: None,
            last_error: None,
            local_corrupt: false,
            pending_push: false,
        },
        endpoint: endpoint.map(String::from),
        projects: 4,
        employees: 2,
        stats: DashboardStats { planning: 1, in_progress: 2, completed: 1 },
    }
}

#[test]
#[serial]
fn text_shows_counts_and_offline_remote() {
    std::env::set_var("NO_COLOR", "1");
    let lines = render(&report(false, None));
    assert_eq!(lines[0], "Sync: offline");
    assert!(lines.contains(&"  remote:     not configured".to_string()));
    assert!(lines.contains(&"Projects: 4 (1 planning, 2 in progress, 1 completed)".to_string()));
    assert!(lines.contains(&"Employees: 2".to_string()));
}

#[test]
#[serial]
fn text_flags_unusable_credentials() {
    std::env::set_var("NO_COLOR", "1");
    let lines = render(&report(false, Some("obras.example.co")));
    assert!(lines.contains(&"  remote:     obras.example.co (invalid)".to_string()));
}

#[test]
#[serial]
fn text_includes_connection_and_error() {
    std::env::set_var("NO_COLOR", "1");
    let mut r = report(true, Some("https://obras.example.co"));
    r.sync.connection = Some(ConnectionReport::connected());
    r.sync.last_error =
        Some(LastError { code: "TIMEOUT".into(), message: "request timed out".into(), at_ms: 1 });
    r.sync.local_corrupt = true;

    let text = render(&r).join("\n");
    assert!(text.contains(&format!("  connection: {}", ConnectionReport::connected().message)));
    assert!(text.contains("  last error: TIMEOUT request timed out"));
    assert!(text.contains("set aside"));
}

#[test]
fn json_flattens_sync_fields() {
    let value = serde_json::to_value(report(true, Some("https://obras.example.co"))).unwrap();
    assert_eq!(value["indicator"], "configured");
    assert_eq!(value["phase"], "local_authoritative");
    assert_eq!(value["endpoint"], "https://obras.example.co");
    assert_eq!(value["stats"]["in_progress"], 2);
    assert!(value.get("last_error").is_none());
}
