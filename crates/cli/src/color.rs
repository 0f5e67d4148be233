// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use ob_core::ProjectStatus;
use ob_engine::Indicator;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Secondary text: darker grey
    pub const MUTED: u8 = 240;
    /// Healthy: soft green
    pub const GOOD: u8 = 114;
    /// In progress: amber
    pub const BUSY: u8 = 179;
    /// Failure: muted red
    pub const BAD: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::MUTED)))))
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Status-light word for the sync indicator
pub fn indicator(indicator: Indicator) -> String {
    paint(indicator_code(indicator), &indicator.to_string())
}

fn indicator_code(indicator: Indicator) -> u8 {
    match indicator {
        Indicator::Connected => codes::GOOD,
        Indicator::Syncing | Indicator::Configured => codes::BUSY,
        Indicator::Error => codes::BAD,
        Indicator::Offline => codes::MUTED,
    }
}

pub fn project_status(status: ProjectStatus) -> String {
    let code = match status {
        ProjectStatus::Planning => codes::MUTED,
        ProjectStatus::InProgress => codes::BUSY,
        ProjectStatus::Completed => codes::GOOD,
    };
    paint(code, &status.to_string())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
