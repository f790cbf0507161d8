// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path resolution for plugin installations.
//!
//! Maps a (plugin type, plugin id) pair to an absolute installation
//! directory. Each type has a fixed subfolder convention under the plugins
//! root; a plugin the host registry has already loaded dictates its own
//! location instead, because sibling artifacts must land next to the loaded
//! code.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use strum::IntoEnumIterator;

use bazaar_core::traits::registry::HostRegistry;
use bazaar_core::types::{LoadedUnit, MarketEntry, MarketEntryType};

/// The fixed installation subfolder for a plugin type.
///
/// `Some("")` means the type installs directly under the plugins root by
/// convention (Mixed bundles); `None` means the type has no convention of
/// its own and degrades to the root as well. Resolution never fails: an
/// unresolvable path would block every other operation.
pub fn installation_subfolder(entry_type: MarketEntryType) -> Option<&'static str> {
    match entry_type {
        MarketEntryType::Step | MarketEntryType::Partitioner => Some("steps"),
        MarketEntryType::JobEntry => Some("jobentries"),
        MarketEntryType::SpoonPlugin => Some("spoon"),
        MarketEntryType::Database => Some("databases"),
        // Shim configurations nest inside the vendor distribution directory.
        MarketEntryType::HadoopShim => Some("big-data-plugin/hadoop-configurations"),
        MarketEntryType::Mixed => Some(""),
        MarketEntryType::Repository | MarketEntryType::Platform => None,
    }
}

/// Resolves installation directories for plugins.
///
/// Pure function of (registry state, plugin type); no side effects.
pub struct PluginLayout {
    plugins_root: PathBuf,
    registry: Arc<dyn HostRegistry>,
}

impl PluginLayout {
    pub fn new(plugins_root: impl Into<PathBuf>, registry: Arc<dyn HostRegistry>) -> Self {
        Self {
            plugins_root: plugins_root.into(),
            registry,
        }
    }

    pub fn plugins_root(&self) -> &Path {
        &self.plugins_root
    }

    /// The installation root shared by all plugins of the given type.
    pub fn install_root(&self, entry_type: MarketEntryType) -> PathBuf {
        match installation_subfolder(entry_type) {
            Some(subfolder) if !subfolder.is_empty() => self.plugins_root.join(subfolder),
            _ => self.plugins_root.clone(),
        }
    }

    /// The directory the plugin's siblings live under.
    ///
    /// When the registry reports a loaded directory for this plugin id, that
    /// directory's parent is authoritative; otherwise the type's install
    /// root applies.
    pub fn parent_dir(&self, entry: &MarketEntry) -> PathBuf {
        self.find_loaded(&entry.id)
            .and_then(|unit| self.registry.installed_directory(&unit))
            .and_then(|directory| directory.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.install_root(entry.entry_type))
    }

    /// The plugin's own installation directory.
    pub fn plugin_dir(&self, entry: &MarketEntry) -> PathBuf {
        self.parent_dir(entry).join(&entry.id)
    }

    // The registry dispatches by type; a plugin id is searched across all of
    // them, as loaded code may be registered under a different type than the
    // catalog reports.
    fn find_loaded(&self, id: &str) -> Option<LoadedUnit> {
        MarketEntryType::iter().find_map(|entry_type| self.registry.find_unit(entry_type, id))
    }
}
