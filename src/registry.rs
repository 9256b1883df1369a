// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::access::AccessRights;
use crate::error::Result;
use crate::path::RegistryPath;

/// A source of registry keys, such as the live registry or a set of offline hive files.
pub trait Registry {
    type Key<'a>: RegistryKey
    where
        Self: 'a;

    /// Opens the key at `path` with the given access rights.
    ///
    /// Fails with [`KeyNotFound`] or [`AccessDenied`] if the key cannot be opened.
    ///
    /// [`KeyNotFound`]: crate::RegSearchError::KeyNotFound
    /// [`AccessDenied`]: crate::RegSearchError::AccessDenied
    fn open_key(&self, path: &RegistryPath, access: AccessRights) -> Result<Self::Key<'_>>;
}

/// An opened registry key.
///
/// The underlying handle is released when the key is dropped.
pub trait RegistryKey: Sized {
    /// Returns the full path of this key.
    fn path(&self) -> &RegistryPath;

    /// Returns the names of the immediate subkeys in index order.
    fn subkey_names(&self) -> Result<Vec<String>>;

    /// Opens the immediate subkey `name` with the given access rights.
    fn open_subkey(&self, name: &str, access: AccessRights) -> Result<Self>;

    /// Returns the data of the `REG_SZ` or `REG_EXPAND_SZ` value `name`.
    ///
    /// Fails with [`ValueNotFound`] if there is no such value.
    ///
    /// [`ValueNotFound`]: crate::RegSearchError::ValueNotFound
    fn string_value(&self, name: &str) -> Result<String>;

    /// Returns the data of the `REG_DWORD` value `name`.
    fn dword_value(&self, name: &str) -> Result<u32>;
}
