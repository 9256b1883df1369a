// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use std::io;

use displaydoc::Display;

/// Central result type of reg-search.
pub type Result<T, E = RegSearchError> = core::result::Result<T, E>;

/// Central error type of reg-search.
#[derive(Debug, Display)]
pub enum RegSearchError {
    /// Invalid registry hive: {name}
    InvalidRootKey { name: String },
    /// The registry key {path} does not exist
    KeyNotFound { path: String },
    /// Access to the registry key {path} was denied
    AccessDenied { path: String },
    /// The registry value {name:?} does not exist in {path}
    ValueNotFound { path: String, name: String },
    /// The registry value {name:?} in {path} is not of type {expected}
    UnexpectedValueType {
        path: String,
        name: String,
        expected: &'static str,
    },
    /// No hive file is mounted for {path}
    NoHiveMounted { path: String },
    /// The hive file is invalid: {0}
    Hive(nt_hive::NtHiveError),
    /// I/O error: {0}
    Io(io::Error),
}

impl RegSearchError {
    /// Returns `true` if the error says that a key could not be opened,
    /// either because it is missing or because access was denied.
    pub fn is_inaccessible_key(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. } | Self::AccessDenied { .. } | Self::NoHiveMounted { .. }
        )
    }

    /// Returns `true` if a queried value does not exist.
    pub fn is_missing_value(&self) -> bool {
        matches!(self, Self::ValueNotFound { .. })
    }
}

impl std::error::Error for RegSearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hive(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RegSearchError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<nt_hive::NtHiveError> for RegSearchError {
    fn from(e: nt_hive::NtHiveError) -> Self {
        Self::Hive(e)
    }
}
