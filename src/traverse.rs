// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use log::{debug, warn};

use crate::access::AccessRights;
use crate::error::{RegSearchError, Result};
use crate::path::{parse_registry_path, RegistryPath};
use crate::registry::{Registry, RegistryKey};

/// Searches the immediate subkeys of the registry key at `path` and returns the value
/// produced by `matcher` for the first subkey it matches.
///
/// `path` is parsed via [`parse_registry_path`], and an invalid root key is returned as error.
/// See [`traverse_key`] for everything else.
pub fn traverse<'r, R, F, T>(
    registry: &'r R,
    path: &str,
    access: AccessRights,
    matcher: F,
) -> Result<Option<T>>
where
    R: Registry + ?Sized,
    F: FnMut(&R::Key<'r>) -> Result<Option<T>>,
{
    let path = parse_registry_path(path)?;
    traverse_key(registry, &path, access, matcher)
}

/// Searches the immediate subkeys of the registry key at `path` and returns the value
/// produced by `matcher` for the first subkey it matches.
///
/// Subkeys are visited in index order, each opened with `access`.
/// `matcher` returns `Ok(Some(value))` for a match and `Ok(None)` otherwise.
/// A [`ValueNotFound`] or [`KeyNotFound`] error from `matcher` also counts as no match,
/// so that a matcher can simply query the values it needs.
///
/// If the key at `path` or one of its subkeys does not exist or cannot be accessed,
/// or `matcher` is denied access, a warning is logged and the search ends with `Ok(None)`.
/// Other errors are returned.
///
/// [`ValueNotFound`]: crate::RegSearchError::ValueNotFound
/// [`KeyNotFound`]: crate::RegSearchError::KeyNotFound
pub fn traverse_key<'r, R, F, T>(
    registry: &'r R,
    path: &RegistryPath,
    access: AccessRights,
    mut matcher: F,
) -> Result<Option<T>>
where
    R: Registry + ?Sized,
    F: FnMut(&R::Key<'r>) -> Result<Option<T>>,
{
    let key = match registry.open_key(path, access) {
        Ok(key) => key,
        Err(e) if e.is_inaccessible_key() => {
            warn!("Error accessing registry: {}", e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    for subkey_name in key.subkey_names()? {
        let subkey = match key.open_subkey(&subkey_name, access) {
            Ok(subkey) => subkey,
            Err(e) if e.is_inaccessible_key() => {
                warn!("Error accessing registry: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match matcher(&subkey) {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => (),
            Err(e) if e.is_missing_value() || matches!(e, RegSearchError::KeyNotFound { .. }) => {
                debug!("Skipping {}: {}", subkey.path(), e)
            }
            Err(e) if e.is_inaccessible_key() => {
                warn!("Error accessing registry: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(None)
}
