//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch home directory with an optional `config.toml`.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.path().join("store.json")
    }

    /// Write a config using the given storage backend and this sandbox's store path.
    pub fn write_config(&self, backend: &str) -> PathBuf {
        let config = self.path().join("config.toml");
        let body = format!(
            "[storage]\nbackend = \"{backend}\"\npath = \"{}\"\n\n[clipboard]\nmode = \"none\"\n",
            self.store_path().display().to_string().replace('\\', "/")
        );
        fs::write(&config, body).expect("write config");
        config
    }

    /// Run the `knack` binary with HOME pointed at the sandbox.
    pub fn knack(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_knack"))
            .args(args)
            .env("HOME", self.path())
            .env("USERPROFILE", self.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("run knack")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}
