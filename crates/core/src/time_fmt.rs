// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compact elapsed-time formatting ("5s", "2m", "1h", "3d").

/// Format a number of seconds using the largest whole unit.
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3_599 => format!("{}m", secs / 60),
        3_600..=86_399 => format!("{}h", secs / 3_600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// Elapsed time between two epoch-millisecond timestamps; `-` when unknown.
pub fn format_elapsed_since(then_ms: u64, now_ms: u64) -> String {
    if then_ms == 0 {
        return "-".to_string();
    }
    format_elapsed(now_ms.saturating_sub(then_ms) / 1_000)
}
