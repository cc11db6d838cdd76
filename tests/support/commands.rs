//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envsecret command running in the project directory.
    ///
    /// Clears the variables the CLI reads so the host environment cannot
    /// leak into a test.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envsecret").expect("failed to find envsecret binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("ENVSECRET_CONFIG");
        cmd.env_remove("ENVSECRET_STAGE");
        cmd.env_remove("ENVSECRET_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `envsecret check`.
    pub fn check(&self) -> Output {
        self.cmd()
            .arg("check")
            .output()
            .expect("failed to run envsecret check")
    }

    /// Shortcut for `envsecret package template.json`.
    pub fn package(&self) -> Output {
        self.cmd()
            .args(["package", "template.json"])
            .output()
            .expect("failed to run envsecret package")
    }

    /// Shortcut for `envsecret params`.
    pub fn params(&self) -> Output {
        self.cmd()
            .arg("params")
            .output()
            .expect("failed to run envsecret params")
    }

    /// Shortcut for `envsecret env`.
    pub fn env(&self) -> Output {
        self.cmd()
            .arg("env")
            .output()
            .expect("failed to run envsecret env")
    }
}
