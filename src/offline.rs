// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use nt_hive::{Hive, KeyValueDataType};

use crate::access::AccessRights;
use crate::error::{RegSearchError, Result};
use crate::helpers::{join_components, names_equal, path_components, strip_path_prefix};
use crate::path::{parse_registry_path, RegistryPath};
use crate::registry::{Registry, RegistryKey};
use crate::root_key::RootKey;

/// Name of the key holding the 32-bit view of `HKLM\SOFTWARE`.
const WOW64_32BIT_NODE: &str = "WOW6432Node";

/// Resolves the key node of an [`OfflineKey`] into `$key_node`,
/// returning [`RegSearchError::KeyNotFound`] from the calling function if it does not exist.
macro_rules! offline_key_node {
    ($key:expr, $key_node:ident) => {
        let hive = $key.mount.hive()?;
        let root_key_node = hive.root_key_node()?;
        let $key_node = match root_key_node.subpath(&$key.hive_path) {
            Some(key_node) => key_node?,
            None => {
                return Err(RegSearchError::KeyNotFound {
                    path: $key.path.to_string(),
                })
            }
        };
    };
}

/// The bytes of a hive file along with the registry path it is mounted at.
///
/// Validation happens once when mounting, so later accesses skip it.
#[derive(Clone)]
struct HiveMount {
    mount_point: RegistryPath,
    data: Arc<[u8]>,
}

impl HiveMount {
    fn hive(&self) -> Result<Hive<&[u8]>> {
        let hive = Hive::without_validation(&self.data[..])?;
        Ok(hive)
    }

    /// The 32-bit view is only redirected for the `SOFTWARE` hive.
    fn redirects_32bit_view(&self) -> bool {
        let mut components = path_components(&self.mount_point.subkey);

        self.mount_point.root == RootKey::LocalMachine
            && matches!(components.next(), Some(name) if names_equal(name, "SOFTWARE"))
            && components.next().is_none()
    }
}

/// A registry made up of hive files (`regf` format) mounted at registry paths.
///
/// This allows searching the registry of another (possibly offline) Windows installation,
/// e.g. by mounting its `Windows\System32\config\SOFTWARE` file at `HKLM\SOFTWARE`.
/// Access rights are not enforced, but the 32-bit view selector is honored for a
/// hive mounted at `HKLM\SOFTWARE` by redirecting into `WOW6432Node`.
#[derive(Clone, Default)]
pub struct OfflineRegistry {
    mounts: Vec<HiveMount>,
}

impl OfflineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the hive in `bytes` and mounts it at `mount_point` (e.g. `HKLM\SOFTWARE`).
    ///
    /// An existing hive at the same mount point is replaced.
    pub fn mount(&mut self, mount_point: &str, bytes: Vec<u8>) -> Result<()> {
        Hive::new(bytes.as_slice())?;
        self.insert_mount(mount_point, bytes)
    }

    /// Mounts the hive in `bytes` at `mount_point` without validating its header.
    ///
    /// This is a solution for accessing hives that have not been fully flushed to disk
    /// (e.g. due to hibernation and mismatching sequence numbers).
    pub fn mount_without_validation(&mut self, mount_point: &str, bytes: Vec<u8>) -> Result<()> {
        Hive::without_validation(bytes.as_slice())?;
        self.insert_mount(mount_point, bytes)
    }

    /// Reads the hive file at `path`, validates it, and mounts it at `mount_point`.
    pub fn mount_file<P: AsRef<Path>>(&mut self, mount_point: &str, path: P) -> Result<()> {
        let bytes = fs::read(path)?;
        self.mount(mount_point, bytes)
    }

    fn insert_mount(&mut self, mount_point: &str, bytes: Vec<u8>) -> Result<()> {
        let mut mount_point = parse_registry_path(mount_point)?;
        mount_point.subkey = join_components(path_components(&mount_point.subkey));

        debug!("Mounting a hive of {} bytes at {}", bytes.len(), mount_point);

        self.mounts.retain(|mount| !Self::is_same_mount_point(&mount.mount_point, &mount_point));
        self.mounts.push(HiveMount {
            mount_point,
            data: bytes.into(),
        });

        Ok(())
    }

    fn is_same_mount_point(a: &RegistryPath, b: &RegistryPath) -> bool {
        a.root == b.root && names_equal(&a.subkey, &b.subkey)
    }

    /// Finds the mount with the longest mount point containing `path`
    /// and returns it along with the remaining path inside that hive.
    fn resolve(&self, path: &RegistryPath) -> Option<(&HiveMount, String)> {
        self.mounts
            .iter()
            .filter(|mount| mount.mount_point.root == path.root)
            .filter_map(|mount| {
                strip_path_prefix(&path.subkey, &mount.mount_point.subkey)
                    .map(|hive_path| (mount, hive_path))
            })
            .max_by_key(|(mount, _)| path_components(&mount.mount_point.subkey).count())
    }
}

impl Registry for OfflineRegistry {
    type Key<'a> = OfflineKey;

    fn open_key(&self, path: &RegistryPath, access: AccessRights) -> Result<OfflineKey> {
        let (mount, mut hive_path) =
            self.resolve(path)
                .ok_or_else(|| RegSearchError::NoHiveMounted {
                    path: path.to_string(),
                })?;

        if access.wants_32bit_view() && mount.redirects_32bit_view() {
            let already_redirected = matches!(
                path_components(&hive_path).next(),
                Some(name) if names_equal(name, WOW64_32BIT_NODE)
            );

            if !already_redirected {
                hive_path = join_components(
                    [WOW64_32BIT_NODE, hive_path.as_str()]
                        .into_iter()
                        .filter(|component| !component.is_empty()),
                );
            }
        }

        let key = OfflineKey {
            mount: mount.clone(),
            hive_path,
            path: path.clone(),
        };
        key.ensure_exists()?;

        Ok(key)
    }
}

/// An opened key of an [`OfflineRegistry`].
#[derive(Clone)]
pub struct OfflineKey {
    mount: HiveMount,
    hive_path: String,
    path: RegistryPath,
}

impl OfflineKey {
    fn ensure_exists(&self) -> Result<()> {
        offline_key_node!(self, _key_node);
        Ok(())
    }

    fn unexpected_type(&self, name: &str, expected: &'static str) -> RegSearchError {
        RegSearchError::UnexpectedValueType {
            path: self.path.to_string(),
            name: name.to_string(),
            expected,
        }
    }

    fn value_not_found(&self, name: &str) -> RegSearchError {
        RegSearchError::ValueNotFound {
            path: self.path.to_string(),
            name: name.to_string(),
        }
    }
}

impl RegistryKey for OfflineKey {
    fn path(&self) -> &RegistryPath {
        &self.path
    }

    fn subkey_names(&self) -> Result<Vec<String>> {
        offline_key_node!(self, key_node);

        let subkeys = match key_node.subkeys() {
            Some(subkeys) => subkeys?,
            None => return Ok(Vec::new()),
        };

        subkeys
            .map(|subkey| -> Result<String> {
                let subkey = subkey?;
                let name = subkey.name()?;
                Ok(name.to_string_lossy())
            })
            .collect()
    }

    fn open_subkey(&self, name: &str, _access: AccessRights) -> Result<Self> {
        let key = Self {
            mount: self.mount.clone(),
            hive_path: join_components(
                path_components(&self.hive_path).chain(path_components(name)),
            ),
            path: self.path.join(name),
        };
        key.ensure_exists()?;

        Ok(key)
    }

    fn string_value(&self, name: &str) -> Result<String> {
        offline_key_node!(self, key_node);

        let key_value = match key_node.value(name) {
            Some(key_value) => key_value?,
            None => return Err(self.value_not_found(name)),
        };

        match key_value.data_type()? {
            KeyValueDataType::RegSZ | KeyValueDataType::RegExpandSZ => Ok(key_value.string_data()?),
            _ => Err(self.unexpected_type(name, "REG_SZ")),
        }
    }

    fn dword_value(&self, name: &str) -> Result<u32> {
        offline_key_node!(self, key_node);

        let key_value = match key_node.value(name) {
            Some(key_value) => key_value?,
            None => return Err(self.value_not_found(name)),
        };

        match key_value.data_type()? {
            KeyValueDataType::RegDWord | KeyValueDataType::RegDWordBigEndian => {
                Ok(key_value.dword_data()?)
            }
            _ => Err(self.unexpected_type(name, "REG_DWORD")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HiveMount;
    use crate::helpers::tests::{hive_vec, testhive_vec, TestKey};
    use crate::*;

    fn software_registry() -> OfflineRegistry {
        let mut registry = OfflineRegistry::new();
        registry.mount("HKLM\\SOFTWARE", testhive_vec()).unwrap();
        registry
    }

    #[test]
    fn test_mount() {
        let mut registry = OfflineRegistry::new();
        assert!(matches!(
            registry.mount("HKLM\\SOFTWARE", vec![0u8; 16]),
            Err(RegSearchError::Hive(_))
        ));
        assert!(matches!(
            registry.mount("HKXY\\SOFTWARE", testhive_vec()),
            Err(RegSearchError::InvalidRootKey { .. })
        ));

        // Break the checksum, which only the validating mount rejects.
        let mut testhive = testhive_vec();
        testhive[508] ^= 0xff;
        assert!(matches!(
            registry.mount("HKLM\\SOFTWARE", testhive.clone()),
            Err(RegSearchError::Hive(_))
        ));
        registry
            .mount_without_validation("HKLM\\SOFTWARE", testhive)
            .unwrap();

        let path = parse_registry_path("HKLM\\SOFTWARE\\Microsoft").unwrap();
        assert!(registry.open_key(&path, AccessRights::KEY_READ).is_ok());
    }

    #[test]
    fn test_mounted_hive_is_not_revalidated() {
        let mut testhive = testhive_vec();
        testhive[508] ^= 0xff;

        let mount = HiveMount {
            mount_point: parse_registry_path("HKLM\\SOFTWARE").unwrap(),
            data: testhive.into(),
        };
        let hive = mount.hive().unwrap();
        assert!(hive.root_key_node().is_ok());
    }

    #[test]
    fn test_open_key() {
        let registry = software_registry();

        let path = parse_registry_path("HKLM\\software\\\\microsoft\\").unwrap();
        let key = registry.open_key(&path, AccessRights::KEY_READ).unwrap();
        assert_eq!(key.subkey_names().unwrap(), vec!["Windows"]);

        let path = parse_registry_path("HKLM\\SOFTWARE").unwrap();
        let key = registry.open_key(&path, AccessRights::KEY_READ).unwrap();
        assert_eq!(
            key.subkey_names().unwrap(),
            vec!["empty", "Microsoft", "WOW6432Node"]
        );

        let path = parse_registry_path("HKLM\\SOFTWARE\\empty").unwrap();
        let key = registry.open_key(&path, AccessRights::KEY_READ).unwrap();
        assert!(key.subkey_names().unwrap().is_empty());

        let path = parse_registry_path("HKLM\\SOFTWARE\\Vendor").unwrap();
        assert!(matches!(
            registry.open_key(&path, AccessRights::KEY_READ),
            Err(RegSearchError::KeyNotFound { .. })
        ));

        let path = parse_registry_path("HKLM\\SYSTEM\\Select").unwrap();
        assert!(matches!(
            registry.open_key(&path, AccessRights::KEY_READ),
            Err(RegSearchError::NoHiveMounted { .. })
        ));
    }

    #[test]
    fn test_values() {
        let registry = software_registry();
        let path = parse_registry_path(UNINSTALL_PATH).unwrap();
        let key = registry.open_key(&path, AccessRights::KEY_READ).unwrap();
        assert_eq!(
            key.subkey_names().unwrap(),
            vec!["7-Zip", "Git_is1", "KB5034441", "Zip Tool"]
        );

        let subkey = key.open_subkey("7-Zip", AccessRights::KEY_READ).unwrap();
        assert_eq!(subkey.path().to_string(), format!("{}\\7-Zip", UNINSTALL_PATH));
        assert_eq!(
            subkey.string_value("DisplayName").unwrap(),
            "7-Zip 23.01 (x64)"
        );
        assert_eq!(
            subkey.string_value("InstallLocation").unwrap(),
            "C:\\Program Files\\7-Zip\\"
        );
        assert_eq!(subkey.dword_value("VersionMajor").unwrap(), 23);
        assert!(matches!(
            subkey.string_value("VersionMajor"),
            Err(RegSearchError::UnexpectedValueType { expected: "REG_SZ", .. })
        ));
        assert!(matches!(
            subkey.dword_value("DisplayName"),
            Err(RegSearchError::UnexpectedValueType { expected: "REG_DWORD", .. })
        ));

        let subkey = key.open_subkey("KB5034441", AccessRights::KEY_READ).unwrap();
        assert!(subkey.string_value("DisplayName").unwrap_err().is_missing_value());

        assert!(matches!(
            key.open_subkey("Firefox", AccessRights::KEY_READ),
            Err(RegSearchError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_32bit_view() {
        let registry = software_registry();
        let path = parse_registry_path(UNINSTALL_PATH).unwrap();

        let key = registry.open_key(&path, AccessRights::WIN32_READ).unwrap();
        assert_eq!(key.subkey_names().unwrap(), vec!["Notepad++"]);
        assert_eq!(key.path(), &path);

        let key = registry.open_key(&path, AccessRights::WIN64_READ).unwrap();
        assert_eq!(key.subkey_names().unwrap().len(), 4);

        // Explicitly addressing the 32-bit node is not redirected twice.
        let path = parse_registry_path("HKLM\\SOFTWARE\\WOW6432Node\\Microsoft").unwrap();
        assert!(registry.open_key(&path, AccessRights::WIN32_READ).is_ok());

        // Other mount points are never redirected.
        let mut registry = OfflineRegistry::new();
        registry.mount("HKCU\\Software", testhive_vec()).unwrap();
        let path = parse_registry_path("HKCU\\Software\\Microsoft").unwrap();
        assert!(registry.open_key(&path, AccessRights::WIN32_READ).is_ok());
    }

    #[test]
    fn test_longest_mount_point() {
        let vendor_hive = hive_vec(
            &TestKey::new("ROOT").subkey(TestKey::new("Tool").string("InstallLocation", "D:\\Tool")),
        );

        let mut registry = software_registry();
        registry.mount("HKLM\\SOFTWARE\\Vendor", vendor_hive).unwrap();

        let path = parse_registry_path("HKLM\\SOFTWARE\\Vendor").unwrap();
        let key = registry.open_key(&path, AccessRights::KEY_READ).unwrap();
        assert_eq!(key.subkey_names().unwrap(), vec!["Tool"]);

        let tool = key.open_subkey("Tool", AccessRights::KEY_READ).unwrap();
        assert_eq!(tool.string_value("InstallLocation").unwrap(), "D:\\Tool");

        let path = parse_registry_path("HKLM\\SOFTWARE\\Microsoft").unwrap();
        assert!(registry.open_key(&path, AccessRights::KEY_READ).is_ok());
    }
}
