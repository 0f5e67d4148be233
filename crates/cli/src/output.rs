// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use clap::ValueEnum;
use ob_engine::PushOutcome;
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format a timestamp as relative time (e.g., "5s", "2m", "1h", "3d")
pub fn format_time_ago(epoch_ms: u64) -> String {
    let now_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    ob_core::format_elapsed_since(epoch_ms, now_ms)
}

/// Render a list as text table or JSON. Handles empty check + format branch.
pub fn handle_list<T: Serialize>(
    format: OutputFormat,
    items: &[T],
    empty_msg: &str,
    render_text: impl FnOnce(&[T], &mut dyn Write) -> std::io::Result<()>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", empty_msg);
            } else {
                render_text(items, &mut std::io::stdout())?;
            }
        }
    }
    Ok(())
}

/// Format-branch helper for non-list commands (show, add, etc.).
///
/// Renders as JSON when `format` is `Json`, otherwise calls `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn();
        }
    }
    Ok(())
}

/// Warn on stderr when the exit flush could not reach the remote.
///
/// The change is already saved locally, so this never fails the command.
pub fn report_push(outcome: Option<&PushOutcome>) {
    if let Some(line) = push_warning(outcome) {
        eprintln!("{line}");
    }
}

fn push_warning(outcome: Option<&PushOutcome>) -> Option<String> {
    match outcome {
        Some(PushOutcome::Failed(e)) => {
            Some(format!("warning: saved locally, remote push failed ({}): {}", e.code(), e))
        }
        _ => None,
    }
}

/// Column widths for a text table: the widest cell per column, at least the header
pub fn column_widths<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> [usize; N] {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Write a header line and rows, separating columns with two spaces
pub fn write_table<const N: usize>(
    out: &mut dyn Write,
    headers: [&str; N],
    rows: &[[String; N]],
) -> std::io::Result<()> {
    let widths = column_widths(headers, rows);
    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c}{}", " ".repeat(w.saturating_sub(c.chars().count()))))
            .collect();
        padded.join("  ").trim_end().to_string()
    };
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    writeln!(out, "{}", crate::color::header(&line(&header_cells)))?;
    for row in rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}
