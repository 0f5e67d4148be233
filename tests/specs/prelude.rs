// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness: a state directory plus a fluent wrapper over `assert_cmd`.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Port nothing listens on; connections are refused immediately
pub const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

/// Isolated state directory for one spec
pub struct State {
    dir: TempDir,
}

impl State {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.file(name), contents).unwrap();
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.file(name)).unwrap()
    }

    /// `ob` bound to this state directory
    pub fn ob(&self) -> Run {
        let mut cmd = Command::cargo_bin("ob").unwrap();
        cmd.env("OB_STATE_DIR", self.path())
            .env("NO_COLOR", "1")
            .env("OB_LOG", "off")
            .env("OB_REMOTE_TIMEOUT_MS", "2000")
            .env_remove("COLOR");
        Run { cmd }
    }
}

/// `ob` with a throwaway state directory
pub fn cli() -> Run {
    let state = Box::leak(Box::new(State::new()));
    state.ob()
}

pub struct Run {
    cmd: Command,
}

impl Run {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(outcome.status == 0, "expected success, got {}\n{}", outcome.status, outcome);
        outcome
    }

    pub fn fails(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(outcome.status != 0, "expected failure\n{}", outcome);
        outcome
    }
}

pub struct Outcome {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Outcome {
    fn from(output: std::process::Output) -> Self {
        Self {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--- stdout ---\n{}--- stderr ---\n{}", self.stdout, self.stderr)
    }
}

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}\n{self}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}\n{self}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}\n{self}");
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| panic!("invalid json: {e}\n{self}"))
    }
}
