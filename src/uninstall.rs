// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use log::debug;

use crate::access::AccessRights;
use crate::error::Result;
use crate::registry::{Registry, RegistryKey};
use crate::traverse::traverse;

/// Registry key listing the installed applications, one subkey per application.
pub const UNINSTALL_PATH: &str = "HKLM\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall";

/// Returns a matcher for [`traverse`] that matches an application subkey of
/// [`UNINSTALL_PATH`] if its `DisplayName` contains `app_name` (case-insensitively).
///
/// The matcher returns the `InstallLocation` of a matching application.
pub fn match_display_name<K>(app_name: &str) -> impl FnMut(&K) -> Result<Option<String>>
where
    K: RegistryKey,
{
    let app_name = app_name.to_lowercase();

    move |key| {
        let display_name = key.string_value("DisplayName")?;
        if !display_name.to_lowercase().contains(&app_name) {
            return Ok(None);
        }

        let install_location = key.string_value("InstallLocation")?;
        Ok(Some(install_location))
    }
}

/// Finds the install location of the first application whose display name contains `app_name`.
///
/// The 64-bit registry view is searched first, followed by the 32-bit one.
pub fn find_install_location<R>(registry: &R, app_name: &str) -> Result<Option<String>>
where
    R: Registry + ?Sized,
{
    for access in [AccessRights::WIN64_READ, AccessRights::WIN32_READ] {
        let location = traverse(registry, UNINSTALL_PATH, access, match_display_name(app_name))?;

        if location.is_some() {
            return Ok(location);
        }

        debug!("{:?} not found in the view selected by {:?}", app_name, access);
    }

    Ok(None)
}
