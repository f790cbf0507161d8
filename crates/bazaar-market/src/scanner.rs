// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Installed-set discovery.
//!
//! The host registry only knows about code it has loaded; plugins installed
//! on disk but not (yet, or no longer) loaded are recovered by listing the
//! immediate subdirectories of every type's installation root. Each
//! subdirectory name is taken as a plugin id without validating its
//! contents, matching how hosts have always inventoried these folders.

use std::collections::BTreeSet;
use std::fs;

use strum::IntoEnumIterator;

use bazaar_core::traits::registry::HostRegistry;
use bazaar_core::types::MarketEntryType;

use crate::layout::{PluginLayout, installation_subfolder};

/// Every plugin id considered installed: the union of registry-loaded ids
/// and per-type on-disk directory names. Set semantics; duplicates across
/// sources collapse.
pub fn installed_ids(layout: &PluginLayout, registry: &dyn HostRegistry) -> BTreeSet<String> {
    let mut ids = registry.loaded_ids();
    let reserved = reserved_root_folders();

    for entry_type in MarketEntryType::iter() {
        let root = layout.install_root(entry_type);
        let scanning_root = root == layout.plugins_root();
        // A missing root just means nothing of this type is installed.
        let Ok(entries) = fs::read_dir(&root) else {
            continue;
        };
        for entry in entries.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            // Scanning the plugins root itself (Mixed and types without a
            // subfolder) must not mistake the type folders for plugin ids.
            if scanning_root && reserved.contains(name) {
                continue;
            }
            ids.insert(name.to_string());
        }
    }

    ids
}

// First path component of every type's subfolder convention.
fn reserved_root_folders() -> BTreeSet<&'static str> {
    MarketEntryType::iter()
        .filter_map(installation_subfolder)
        .filter_map(|subfolder| subfolder.split('/').next())
        .filter(|component| !component.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use bazaar_core::types::LoadedUnit;
    use bazaar_test_utils::MockRegistry;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn merges_registry_ids_with_on_disk_directories() {
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins");
        fs::create_dir_all(plugins.join("steps/foo")).unwrap();
        fs::create_dir_all(plugins.join("databases/baz")).unwrap();

        let registry = MockRegistry::new();
        registry.load_unit(LoadedUnit::new("bar", MarketEntryType::Step), None);
        let registry = Arc::new(registry);
        let layout = PluginLayout::new(&plugins, registry.clone());

        let ids = installed_ids(&layout, registry.as_ref());
        let expected: BTreeSet<String> =
            ["bar", "foo", "baz"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn duplicate_ids_across_sources_collapse() {
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins");
        fs::create_dir_all(plugins.join("steps/foo")).unwrap();

        let registry = MockRegistry::new();
        registry.load_unit(LoadedUnit::new("foo", MarketEntryType::Step), None);
        let registry = Arc::new(registry);
        let layout = PluginLayout::new(&plugins, registry.clone());

        let ids = installed_ids(&layout, registry.as_ref());
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("foo"));
    }

    #[test]
    fn plain_files_under_a_root_are_not_plugin_ids() {
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins");
        fs::create_dir_all(plugins.join("steps")).unwrap();
        fs::write(plugins.join("steps/readme.txt"), b"not a plugin").unwrap();

        let registry = Arc::new(MockRegistry::new());
        let layout = PluginLayout::new(&plugins, registry.clone());

        assert!(installed_ids(&layout, registry.as_ref()).is_empty());
    }

    #[test]
    fn an_empty_directory_still_counts_as_installed() {
        // Inventory does not validate contents; a stray directory is an id.
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins");
        fs::create_dir_all(plugins.join("jobentries/stray")).unwrap();

        let registry = Arc::new(MockRegistry::new());
        let layout = PluginLayout::new(&plugins, registry.clone());

        let ids = installed_ids(&layout, registry.as_ref());
        assert!(ids.contains("stray"));
    }

    #[test]
    fn missing_roots_yield_only_registry_ids() {
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins-never-created");

        let registry = MockRegistry::new();
        registry.load_unit(LoadedUnit::new("bar", MarketEntryType::Database), None);
        let registry = Arc::new(registry);
        let layout = PluginLayout::new(&plugins, registry.clone());

        let ids = installed_ids(&layout, registry.as_ref());
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("bar"));
        drop(root);
    }

    #[test]
    fn mixed_plugins_at_the_root_are_discovered() {
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins");
        fs::create_dir_all(plugins.join("mixed-bundle")).unwrap();

        let registry = Arc::new(MockRegistry::new());
        let layout = PluginLayout::new(&plugins, registry.clone());

        let ids = installed_ids(&layout, registry.as_ref());
        assert!(ids.contains("mixed-bundle"));
    }

    #[test]
    fn type_subfolders_are_not_mistaken_for_mixed_plugin_ids() {
        // The Mixed root is the plugins root itself; the sibling type
        // folders living there are conventions, not installations.
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins");
        fs::create_dir_all(plugins.join("steps/foo")).unwrap();
        fs::create_dir_all(plugins.join("databases/baz")).unwrap();

        let registry = Arc::new(MockRegistry::new());
        let layout = PluginLayout::new(&plugins, registry.clone());

        let ids = installed_ids(&layout, registry.as_ref());
        assert!(!ids.contains("steps"));
        assert!(!ids.contains("databases"));
        assert!(ids.contains("foo"));
        assert!(ids.contains("baz"));
    }

    #[test]
    fn layout_paths_are_rooted_at_the_configured_plugins_root() {
        let registry = Arc::new(MockRegistry::new());
        let layout = PluginLayout::new("/opt/host/plugins", registry);
        assert_eq!(
            layout.install_root(MarketEntryType::Step),
            PathBuf::from("/opt/host/plugins/steps")
        );
    }
}
