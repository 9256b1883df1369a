// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use core::fmt;
use core::str::FromStr;

use crate::error::{RegSearchError, Result};
use crate::root_key::RootKey;

/// A registry path made up of a [`RootKey`] and a backslash-separated subkey path.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RegistryPath {
    pub root: RootKey,
    pub subkey: String,
}

impl RegistryPath {
    pub fn new(root: RootKey, subkey: impl Into<String>) -> Self {
        Self {
            root,
            subkey: subkey.into(),
        }
    }

    /// Returns the path of the immediate child `name` below this path.
    pub fn join(&self, name: &str) -> Self {
        let subkey = if self.subkey.is_empty() {
            name.to_string()
        } else {
            format!("{}\\{}", self.subkey.trim_end_matches('\\'), name)
        };

        Self {
            root: self.root,
            subkey,
        }
    }
}

impl fmt::Display for RegistryPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.subkey.is_empty() {
            write!(f, "{}", self.root)
        } else {
            write!(f, "{}\\{}", self.root, self.subkey)
        }
    }
}

impl FromStr for RegistryPath {
    type Err = RegSearchError;

    fn from_str(s: &str) -> Result<Self> {
        parse_registry_path(s)
    }
}

/// Splits a registry path like `HKLM\SOFTWARE\Microsoft` into its [`RootKey`] and subkey path.
///
/// Only the first backslash separates the root key name.
/// The remainder is returned as-is and may be empty.
pub fn parse_registry_path(path: &str) -> Result<RegistryPath> {
    let (root_name, subkey) = path.split_once('\\').unwrap_or((path, ""));
    let root = root_name.parse::<RootKey>()?;

    Ok(RegistryPath::new(root, subkey))
}
