// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use std::collections::BTreeMap;

use crate::access::AccessRights;
use crate::error::{RegSearchError, Result};
use crate::helpers::{names_equal, path_components};
use crate::path::{parse_registry_path, RegistryPath};
use crate::registry::{Registry, RegistryKey};
use crate::root_key::RootKey;

/// Data of a value stored in a [`MemoryKeyNode`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MemoryValue {
    String(String),
    DWord(u32),
}

/// A key of a [`MemoryRegistry`] along with its values and subkeys.
///
/// Subkeys keep their insertion order, which is the index order reported by
/// [`RegistryKey::subkey_names`].
#[derive(Clone, Debug, Default)]
pub struct MemoryKeyNode {
    name: String,
    values: Vec<(String, MemoryValue)>,
    subkeys: Vec<MemoryKeyNode>,
    access_denied: bool,
}

impl MemoryKeyNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the subkey at the backslash-separated `path`, creating all missing keys on the way.
    pub fn create_subkey(&mut self, path: &str) -> &mut MemoryKeyNode {
        path_components(path).fold(self, |node, component| {
            let index = match node
                .subkeys
                .iter()
                .position(|subkey| names_equal(&subkey.name, component))
            {
                Some(index) => index,
                None => {
                    node.subkeys.push(MemoryKeyNode::new(component));
                    node.subkeys.len() - 1
                }
            };

            &mut node.subkeys[index]
        })
    }

    /// Sets the `REG_SZ` value `name`, replacing any existing value of that name.
    pub fn set_string_value(&mut self, name: &str, data: impl Into<String>) -> &mut Self {
        self.set_value(name, MemoryValue::String(data.into()))
    }

    /// Sets the `REG_DWORD` value `name`, replacing any existing value of that name.
    pub fn set_dword_value(&mut self, name: &str, data: u32) -> &mut Self {
        self.set_value(name, MemoryValue::DWord(data))
    }

    fn set_value(&mut self, name: &str, data: MemoryValue) -> &mut Self {
        match self
            .values
            .iter_mut()
            .find(|(value_name, _)| names_equal(value_name, name))
        {
            Some((_, value)) => *value = data,
            None => self.values.push((name.to_string(), data)),
        }

        self
    }

    /// Makes every attempt to open this key fail with [`RegSearchError::AccessDenied`].
    pub fn deny_access(&mut self) -> &mut Self {
        self.access_denied = true;
        self
    }

    fn subkey(&self, name: &str) -> Option<&MemoryKeyNode> {
        self.subkeys
            .iter()
            .find(|subkey| names_equal(&subkey.name, name))
    }

    fn value(&self, name: &str) -> Option<&MemoryValue> {
        self.values
            .iter()
            .find(|(value_name, _)| names_equal(value_name, name))
            .map(|(_, value)| value)
    }
}

/// A registry kept entirely in memory.
///
/// Keys and values are added programmatically, which makes it a deterministic
/// stand-in for the live registry. The WOW64 view bits of [`AccessRights`] are ignored.
#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    roots: BTreeMap<RootKey, MemoryKeyNode>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the key at the registry `path` (e.g. `HKLM\SOFTWARE\Vendor`),
    /// creating all missing keys on the way.
    pub fn create_key(&mut self, path: &str) -> Result<&mut MemoryKeyNode> {
        let path = parse_registry_path(path)?;
        let root_node = self
            .roots
            .entry(path.root)
            .or_insert_with(|| MemoryKeyNode::new(path.root.abbreviation()));

        Ok(root_node.create_subkey(&path.subkey))
    }
}

/// An opened key of a [`MemoryRegistry`].
#[derive(Clone, Debug)]
pub struct MemoryKey<'a> {
    node: &'a MemoryKeyNode,
    path: RegistryPath,
}

impl<'a> MemoryKey<'a> {
    fn open(node: &'a MemoryKeyNode, path: RegistryPath) -> Result<Self> {
        if node.access_denied {
            return Err(RegSearchError::AccessDenied {
                path: path.to_string(),
            });
        }

        Ok(Self { node, path })
    }

    fn value(&self, name: &str) -> Result<&'a MemoryValue> {
        self.node
            .value(name)
            .ok_or_else(|| RegSearchError::ValueNotFound {
                path: self.path.to_string(),
                name: name.to_string(),
            })
    }

    fn unexpected_type(&self, name: &str, expected: &'static str) -> RegSearchError {
        RegSearchError::UnexpectedValueType {
            path: self.path.to_string(),
            name: name.to_string(),
            expected,
        }
    }
}

impl Registry for MemoryRegistry {
    type Key<'a> = MemoryKey<'a>;

    fn open_key(&self, path: &RegistryPath, _access: AccessRights) -> Result<MemoryKey<'_>> {
        let not_found = || RegSearchError::KeyNotFound {
            path: path.to_string(),
        };

        let mut node = self.roots.get(&path.root).ok_or_else(not_found)?;
        for component in path_components(&path.subkey) {
            // Intermediate keys must be accessible to reach the target key.
            if node.access_denied {
                return Err(RegSearchError::AccessDenied {
                    path: path.to_string(),
                });
            }

            node = node.subkey(component).ok_or_else(not_found)?;
        }

        MemoryKey::open(node, path.clone())
    }
}

impl<'a> RegistryKey for MemoryKey<'a> {
    fn path(&self) -> &RegistryPath {
        &self.path
    }

    fn subkey_names(&self) -> Result<Vec<String>> {
        Ok(self
            .node
            .subkeys
            .iter()
            .map(|subkey| subkey.name.clone())
            .collect())
    }

    fn open_subkey(&self, name: &str, _access: AccessRights) -> Result<Self> {
        let path = self.path.join(name);
        let node = self
            .node
            .subkey(name)
            .ok_or_else(|| RegSearchError::KeyNotFound {
                path: path.to_string(),
            })?;

        MemoryKey::open(node, path)
    }

    fn string_value(&self, name: &str) -> Result<String> {
        match self.value(name)? {
            MemoryValue::String(data) => Ok(data.clone()),
            MemoryValue::DWord(_) => Err(self.unexpected_type(name, "REG_SZ")),
        }
    }

    fn dword_value(&self, name: &str) -> Result<u32> {
        match self.value(name)? {
            MemoryValue::DWord(data) => Ok(*data),
            MemoryValue::String(_) => Err(self.unexpected_type(name, "REG_DWORD")),
        }
    }
}
