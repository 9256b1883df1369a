// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use bitflags::bitflags;

bitflags! {
    /// Access rights requested when opening a registry key (`REGSAM`).
    ///
    /// Only the read-related bits are modelled, because keys are never modified.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct AccessRights: u32 {
        /// Query the values of a key.
        const KEY_QUERY_VALUE = 0x0000_0001;
        /// Enumerate the subkeys of a key.
        const KEY_ENUMERATE_SUB_KEYS = 0x0000_0008;
        /// Request change notifications.
        const KEY_NOTIFY = 0x0000_0010;
        /// Access the 64-bit registry view from a 32-bit or 64-bit process.
        const KEY_WOW64_64KEY = 0x0000_0100;
        /// Access the 32-bit registry view from a 32-bit or 64-bit process.
        const KEY_WOW64_32KEY = 0x0000_0200;
        /// Read the security descriptor.
        const READ_CONTROL = 0x0002_0000;

        const KEY_READ = Self::READ_CONTROL.bits()
            | Self::KEY_QUERY_VALUE.bits()
            | Self::KEY_ENUMERATE_SUB_KEYS.bits()
            | Self::KEY_NOTIFY.bits();
    }
}

impl AccessRights {
    /// Read access to the 64-bit registry view.
    pub const WIN64_READ: Self = Self::KEY_READ.union(Self::KEY_WOW64_64KEY);
    /// Read access to the 32-bit registry view.
    pub const WIN32_READ: Self = Self::KEY_READ.union(Self::KEY_WOW64_32KEY);

    /// Returns `true` if the 32-bit registry view has been selected.
    pub fn wants_32bit_view(&self) -> bool {
        self.contains(Self::KEY_WOW64_32KEY)
    }
}

impl Default for AccessRights {
    fn default() -> Self {
        Self::KEY_READ
    }
}
