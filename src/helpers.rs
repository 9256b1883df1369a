// Copyright 2026 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: GPL-2.0-or-later

/// Returns an iterator over the non-empty components of a backslash-separated path.
///
/// Duplicate, leading, and trailing backslashes are skipped, just like the registry does.
pub(crate) fn path_components(path: &str) -> impl Iterator<Item = &str> {
    path.split('\\').filter(|component| !component.is_empty())
}

/// Joins path components with backslashes.
pub(crate) fn join_components<'a, I>(components: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    components.into_iter().collect::<Vec<_>>().join("\\")
}

/// Compares two key or value names the way the registry does (case-insensitively).
pub(crate) fn names_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}

/// If `path` starts with all components of `prefix` (compared case-insensitively),
/// returns the remaining components joined by backslashes.
pub(crate) fn strip_path_prefix(path: &str, prefix: &str) -> Option<String> {
    let mut components = path_components(path);

    for prefix_component in path_components(prefix) {
        let component = components.next()?;
        if !names_equal(component, prefix_component) {
            return None;
        }
    }

    Some(join_components(components))
}
