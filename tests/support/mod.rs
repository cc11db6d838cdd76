//! Test support utilities for envsecret integration tests.
//!
//! Provides an isolated project directory and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod resolve;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use resolve::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test project with its own temp directory.
///
/// Child processes use `.current_dir()`, so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create an empty project.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a project with `serverless.yml` and a compiled template.
    pub fn with_config(config: &str) -> Self {
        let t = Self::new();
        t.write("serverless.yml", config);
        t.write("template.json", COMPILED_TEMPLATE);
        t
    }

    /// Write a file into the project directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Read a file from the project directory.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("failed to read file")
    }
}
