// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

//! Searches the immediate subkeys of a registry key for the first one whose values
//! satisfy a predicate, e.g. to find the install location of an application
//! under the `Uninstall` key.
//!
//! Keys can come from the live Windows registry ([`LiveRegistry`], Windows only),
//! from offline hive files ([`OfflineRegistry`]), or from memory ([`MemoryRegistry`]).

mod helpers;

mod access;
mod error;
#[cfg(windows)]
mod live;
mod memory;
mod offline;
mod path;
mod registry;
mod root_key;
mod traverse;
mod uninstall;

pub use crate::access::*;
pub use crate::error::*;
#[cfg(windows)]
pub use crate::live::*;
pub use crate::memory::*;
pub use crate::offline::*;
pub use crate::path::*;
pub use crate::registry::*;
pub use crate::root_key::*;
pub use crate::traverse::*;
pub use crate::uninstall::*;
