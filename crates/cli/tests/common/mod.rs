// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Header plus two prompts, one with a generated id.
pub const DEMO_BLUEPRINT: &str = r#"id: demo
title: "Demo"
models: [gpt-4]
---
- prompt: "Say hi"
  should: ["Contains greeting"]
- id: capital
  prompt: "What is the capital of France?"
  should:
    - $icontains: paris
      weight: 2
"#;

/// Temporary directory of blueprint files.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root and return its path.
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("failed to write file");
        path
    }

    /// `bp` command running inside the project directory.
    pub fn bp(&self) -> Command {
        let mut cmd = Command::cargo_bin("bp").expect("bp binary not built");
        cmd.current_dir(self.path()).env_remove("BP_LOG");
        cmd
    }
}
