// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

/// Directory holding the local store.
///
/// `OB_STATE_DIR` > `$XDG_STATE_HOME/ob` > `~/.local/state/ob`
pub fn state_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("OB_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("ob"));
    }
    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("cannot locate a state directory; set OB_STATE_DIR"))?;
    Ok(home.join(".local/state/ob"))
}

/// Log filter directive (`OB_LOG`, default `warn`)
pub fn log_filter() -> String {
    std::env::var("OB_LOG").ok().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "warn".into())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
