//! Process environment access.
//!
//! Local expansion and the workload-side runtime write variables through the
//! `ProcessEnv` trait so they can target the real process environment or an
//! in-memory map.

use std::collections::BTreeMap;

/// A writable set of environment variables.
pub trait ProcessEnv {
    /// Get a variable.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct System;

impl ProcessEnv for System {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// An in-memory environment, used for child processes and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Memory {
    vars: BTreeMap<String, String>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All variables, sorted by key
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn into_vars(self) -> BTreeMap<String, String> {
        self.vars
    }
}

impl ProcessEnv for Memory {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}
