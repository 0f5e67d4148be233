// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn failed() -> ConnectionReport {
    ConnectionReport::from_error(&RemoteError::Timeout)
}

fn error() -> LastError {
    LastError { code: "TIMEOUT".into(), message: "request timed out".into(), at_ms: 1 }
}

#[yare::parameterized(
    syncing_wins        = { SyncPhase::Syncing,             true,  false, false, Indicator::Syncing },
    unconfigured        = { SyncPhase::LocalAuthoritative,  false, false, false, Indicator::Offline },
    unconfigured_error  = { SyncPhase::LocalAuthoritative,  false, true,  true,  Indicator::Offline },
    probe_failed        = { SyncPhase::LocalAuthoritative,  true,  true,  false, Indicator::Error },
    push_failed         = { SyncPhase::RemoteAuthoritative, true,  false, true,  Indicator::Error },
    connected           = { SyncPhase::RemoteAuthoritative, true,  false, false, Indicator::Connected },
    configured_local    = { SyncPhase::LocalAuthoritative,  true,  false, false, Indicator::Configured },
)]
fn indicator_cases(
    phase: SyncPhase,
    configured: bool,
    probe_failed: bool,
    has_error: bool,
    expected: Indicator,
) {
    let report = probe_failed.then(failed);
    let last = has_error.then(error);
    assert_eq!(
        SyncStatus::indicator_for(phase, configured, report.as_ref(), last.as_ref()),
        expected
    );
}

#[test]
fn phase_display_and_serde() {
    assert_eq!(SyncPhase::RemoteAuthoritative.to_string(), "remote");
    assert_eq!(
        serde_json::to_value(SyncPhase::LocalAuthoritative).unwrap(),
        serde_json::json!("local_authoritative")
    );
    assert_eq!(Indicator::Connected.to_string(), "connected");
}

#[test]
fn last_error_from_remote() {
    let err = LastError::remote(&RemoteError::Network("refused".into()), 42);
    assert_eq!(err.code, "FETCH_ERROR");
    assert!(err.message.contains("refused"));
    assert_eq!(err.at_ms, 42);
}
