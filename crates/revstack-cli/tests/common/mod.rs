//! Runs the `revstack` binary against a fake `hg` shell script.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Fake `hg` for a two-commit evolve stack: rev 1 (`1234567890123`) below
/// rev 2 (`0987654321098`, the working copy parent). Leading `--config`
/// pairs are dropped; every invocation is appended to `hg.log`.
const FAKE_HG: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$(dirname "$0")/hg.log"
while [ "$1" = "--config" ]; do shift 2; done
for last; do :; done
case "$1" in
  config)
    echo "ui.username=Test User <test@example.com>"
    echo "extensions.evolve="
    ;;
  log)
    case "$last" in
      "roots(draft() and ancestors(.))") echo 1234567890123 ;;
      1234567890123) echo 1234567890123 ;;
      .) echo 0987654321098 ;;
      "123456789012::098765432109") printf '1 1234567890123\n2 0987654321098\n' ;;
      0987654321098) printf '1234567890123' ;;
      "(successors("*) ;;
      *) echo "abort: unknown revision '$last'!" >&2; exit 255 ;;
    esac
    ;;
  *)
    echo "hg: unknown command '$1'" >&2
    exit 255
    ;;
esac
"#;

pub struct TestRepo {
    pub dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let hg = dir.path().join("hg");
        fs::write(&hg, FAKE_HG).unwrap();
        fs::set_permissions(&hg, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(dir.path().join("revstackrc"), "").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn hg_path(&self) -> PathBuf {
        self.path().join("hg")
    }

    /// Replace the tool config file contents.
    pub fn write_config(&self, contents: &str) {
        fs::write(self.path().join("revstackrc"), contents).unwrap();
    }

    /// Every argument vector the fake `hg` received, one per line.
    pub fn hg_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("hg.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn revstack(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_revstack"))
            .args(args)
            .current_dir(self.path())
            .env("REVSTACK_HG", self.hg_path())
            .env("REVSTACK_CONFIG", self.path().join("revstackrc"))
            .env_remove("REVSTACK_SAFE_MODE")
            .env_remove("REVSTACK_LOG")
            .output()
            .unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
