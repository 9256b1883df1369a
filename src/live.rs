// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use std::io;

use winreg::enums::{
    HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE,
    HKEY_PERFORMANCE_DATA, HKEY_USERS,
};
use winreg::RegKey;

use crate::access::AccessRights;
use crate::error::{RegSearchError, Result};
use crate::path::RegistryPath;
use crate::registry::{Registry, RegistryKey};
use crate::root_key::RootKey;

/// Win32 error returned when a value exists, but has a different data type.
const ERROR_BAD_FILE_TYPE: i32 = 222;

/// The registry of the running Windows system.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveRegistry;

impl LiveRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl Registry for LiveRegistry {
    type Key<'a> = LiveKey;

    fn open_key(&self, path: &RegistryPath, access: AccessRights) -> Result<LiveKey> {
        let root_key = RegKey::predef(match path.root {
            RootKey::ClassesRoot => HKEY_CLASSES_ROOT,
            RootKey::CurrentUser => HKEY_CURRENT_USER,
            RootKey::LocalMachine => HKEY_LOCAL_MACHINE,
            RootKey::Users => HKEY_USERS,
            RootKey::PerformanceData => HKEY_PERFORMANCE_DATA,
            RootKey::CurrentConfig => HKEY_CURRENT_CONFIG,
        });

        let key = root_key
            .open_subkey_with_flags(&path.subkey, access.bits())
            .map_err(|e| key_error(e, path))?;

        Ok(LiveKey {
            key,
            path: path.clone(),
        })
    }
}

fn key_error(e: io::Error, path: &RegistryPath) -> RegSearchError {
    match e.kind() {
        io::ErrorKind::NotFound => RegSearchError::KeyNotFound {
            path: path.to_string(),
        },
        io::ErrorKind::PermissionDenied => RegSearchError::AccessDenied {
            path: path.to_string(),
        },
        _ => RegSearchError::Io(e),
    }
}

/// An opened key of the [`LiveRegistry`].
///
/// The key handle is closed when this is dropped.
pub struct LiveKey {
    key: RegKey,
    path: RegistryPath,
}

impl LiveKey {
    fn value_error(&self, e: io::Error, name: &str, expected: &'static str) -> RegSearchError {
        if e.kind() == io::ErrorKind::NotFound {
            RegSearchError::ValueNotFound {
                path: self.path.to_string(),
                name: name.to_string(),
            }
        } else if e.raw_os_error() == Some(ERROR_BAD_FILE_TYPE) {
            RegSearchError::UnexpectedValueType {
                path: self.path.to_string(),
                name: name.to_string(),
                expected,
            }
        } else {
            RegSearchError::Io(e)
        }
    }
}

impl RegistryKey for LiveKey {
    fn path(&self) -> &RegistryPath {
        &self.path
    }

    fn subkey_names(&self) -> Result<Vec<String>> {
        let names = self.key.enum_keys().collect::<io::Result<Vec<String>>>()?;
        Ok(names)
    }

    fn open_subkey(&self, name: &str, access: AccessRights) -> Result<Self> {
        let path = self.path.join(name);
        let key = self
            .key
            .open_subkey_with_flags(name, access.bits())
            .map_err(|e| key_error(e, &path))?;

        Ok(Self { key, path })
    }

    fn string_value(&self, name: &str) -> Result<String> {
        self.key
            .get_value::<String, _>(name)
            .map_err(|e| self.value_error(e, name, "REG_SZ"))
    }

    fn dword_value(&self, name: &str) -> Result<u32> {
        self.key
            .get_value::<u32, _>(name)
            .map_err(|e| self.value_error(e, name, "REG_DWORD"))
    }
}
