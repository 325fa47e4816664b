// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

use osslcfg::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A configuration tree written into a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        Fixture {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Writes `content` to `name` below the fixture root, creating parents.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// A parser that sees only the given environment.
#[allow(dead_code)]
pub fn parser_with_env(vars: &[(&str, &str)]) -> NconfParser<EnvVarAdapter> {
    NconfParser::with_environment(env(vars))
}

/// A parser with an empty environment.
#[allow(dead_code)]
pub fn parser() -> NconfParser<EnvVarAdapter> {
    parser_with_env(&[])
}

#[allow(dead_code)]
pub fn env(vars: &[(&str, &str)]) -> EnvVarAdapter {
    let values: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvVarAdapter::with_values(values)
}
