// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use core::fmt;
use core::str::FromStr;

use enumn::N;

use crate::error::RegSearchError;

/// The six predefined root keys of the Windows registry.
///
/// The discriminants are the predefined `HKEY` handle values.
/// You can use [`RootKey::n`] to map such a handle value back to a `RootKey`.
#[derive(Clone, Copy, Debug, Eq, Hash, N, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
pub enum RootKey {
    ClassesRoot = 0x8000_0000,
    CurrentUser = 0x8000_0001,
    LocalMachine = 0x8000_0002,
    Users = 0x8000_0003,
    PerformanceData = 0x8000_0004,
    CurrentConfig = 0x8000_0005,
}

impl RootKey {
    /// All root keys in the order of their handle values.
    pub const ALL: [RootKey; 6] = [
        Self::ClassesRoot,
        Self::CurrentUser,
        Self::LocalMachine,
        Self::Users,
        Self::PerformanceData,
        Self::CurrentConfig,
    ];

    /// Returns the short name used in registry paths, e.g. `HKLM`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::ClassesRoot => "HKCR",
            Self::CurrentUser => "HKCU",
            Self::LocalMachine => "HKLM",
            Self::Users => "HKU",
            Self::PerformanceData => "HKPD",
            Self::CurrentConfig => "HKCC",
        }
    }

    /// Returns the name of the predefined handle, e.g. `HKEY_LOCAL_MACHINE`.
    pub fn full_name(self) -> &'static str {
        match self {
            Self::ClassesRoot => "HKEY_CLASSES_ROOT",
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::Users => "HKEY_USERS",
            Self::PerformanceData => "HKEY_PERFORMANCE_DATA",
            Self::CurrentConfig => "HKEY_CURRENT_CONFIG",
        }
    }

    /// Returns the predefined `HKEY` handle value of this root key.
    pub fn handle_value(self) -> u32 {
        self as u32
    }

    /// Looks up a root key by its abbreviation or its full handle name.
    ///
    /// The lookup is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|root| root.abbreviation() == name || root.full_name() == name)
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for RootKey {
    type Err = RegSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| RegSearchError::InvalidRootKey {
            name: s.to_string(),
        })
    }
}
