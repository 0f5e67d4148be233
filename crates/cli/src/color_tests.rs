// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    disable_color();
    assert_eq!(format!("{:?}", styles()), format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    force_color();
    assert_ne!(format!("{:?}", styles()), format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn header_produces_ansi_when_color_forced() {
    force_color();
    let result = header("PROJECTS");
    assert!(result.starts_with("\x1b[38;5;74m"));
    assert!(result.ends_with("\x1b[0m"));
}

#[yare::parameterized(
    connected  = { Indicator::Connected,  codes::GOOD },
    syncing    = { Indicator::Syncing,    codes::BUSY },
    configured = { Indicator::Configured, codes::BUSY },
    error      = { Indicator::Error,      codes::BAD },
    offline    = { Indicator::Offline,    codes::MUTED },
)]
fn indicator_uses_status_light_color(value: Indicator, code: u8) {
    assert_eq!(indicator_code(value), code);
}

#[test]
#[serial]
fn plain_output_when_disabled() {
    disable_color();
    assert_eq!(project_status(ProjectStatus::Completed), "completed");
    assert_eq!(muted("x"), "x");
}
