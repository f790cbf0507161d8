// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lifecycle service: install, uninstall, and inventory.
//!
//! Composes the path layout, sidecar store, archive installer, directory
//! eraser, and installed-set scanner, plus the injected host registry. The
//! service keeps no state between calls; the caller serializes operations
//! per plugin id (overlapping installs of one id would race on erase and
//! extract), while different ids are independent.
//!
//! Operations are best-effort, not transactional: a crash mid-install can
//! leave files without a sidecar, and a failed erase during uninstall does
//! not roll back registry-side removal. Both states are repaired by the
//! next install, which erases before extracting.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use strum::IntoEnumIterator;
use tracing::{debug, error, info, warn};

use bazaar_core::BazaarError;
use bazaar_core::traits::registry::HostRegistry;
use bazaar_core::types::{LoadedUnit, MarketEntry, MarketEntryType, PluginVersion, VersionInfo};

use crate::archive::ArchiveInstaller;
use crate::config::MarketConfig;
use crate::layout::PluginLayout;
use crate::{fsops, scanner, sidecar};

/// Installs, uninstalls, and inventories marketplace plugins.
pub struct MarketplaceService {
    layout: PluginLayout,
    registry: Arc<dyn HostRegistry>,
    installer: ArchiveInstaller,
}

impl MarketplaceService {
    pub fn new(
        config: &MarketConfig,
        registry: Arc<dyn HostRegistry>,
    ) -> Result<Self, BazaarError> {
        let installer = ArchiveInstaller::new(Duration::from_secs(config.download_timeout_secs))?;
        Ok(Self {
            layout: PluginLayout::new(config.plugins_root.clone(), registry.clone()),
            registry,
            installer,
        })
    }

    pub fn layout(&self) -> &PluginLayout {
        &self.layout
    }

    /// Install `version` of the plugin, replacing any prior installation.
    ///
    /// Code loaded for this id is unloaded and the target directory erased
    /// before extraction, so a live installation or a leftover from a failed
    /// earlier attempt is cleared rather than merged into. The sidecar is
    /// written last, and only when the archive did not ship its own.
    pub async fn install(
        &self,
        entry: &MarketEntry,
        version: &PluginVersion,
    ) -> Result<(), BazaarError> {
        let parent_dir = self.layout.parent_dir(entry);
        let plugin_dir = parent_dir.join(&entry.id);
        info!(plugin = %entry.id, directory = %plugin_dir.display(), "installing plugin");

        self.check_precondition(entry, &parent_dir)?;

        // Reinstalling over loaded code releases it before its files go.
        self.unload(entry);
        fsops::erase_dir(&plugin_dir)?;

        self.installer
            .install(&parent_dir, &version.download_url)
            .await?;

        if sidecar::read_installed_version(&plugin_dir).is_none() {
            sidecar::write_version_file(&plugin_dir, version)?;
        }

        Ok(())
    }

    /// Uninstall the plugin: unload its code, deregister every unit rooted
    /// at its directory, then erase the directory.
    ///
    /// Registry-side failures are logged and do not block filesystem
    /// cleanup; deleting files out from under live loaded code is the one
    /// thing that is never allowed, so unload always comes first.
    pub fn uninstall(&self, entry: &MarketEntry) -> Result<(), BazaarError> {
        let plugin_dir = self.layout.plugin_dir(entry);
        info!(plugin = %entry.id, directory = %plugin_dir.display(), "uninstalling plugin");

        if !plugin_dir.exists() {
            error!(
                plugin = %entry.id,
                directory = %plugin_dir.display(),
                "no plugin found in the expected directory"
            );
            return Err(BazaarError::NotInstalled(entry.id.clone()));
        }

        self.unload(entry);

        for unit in self.registry.units_rooted_at(&plugin_dir) {
            if let Err(err) = self.registry.remove_unit(&unit) {
                warn!(
                    unit = %unit.id,
                    error = %err,
                    "failed to deregister unit; continuing with cleanup"
                );
            }
        }

        fsops::erase_dir(&plugin_dir)
    }

    /// The version recorded for the plugin's installation, if any.
    pub fn installed_version(&self, entry: &MarketEntry) -> Option<VersionInfo> {
        sidecar::read_installed_version(&self.layout.plugin_dir(entry))
    }

    /// Every plugin id considered installed (registry union on-disk scan).
    pub fn installed_ids(&self) -> BTreeSet<String> {
        scanner::installed_ids(&self.layout, self.registry.as_ref())
    }

    // Shim configurations unpack inside a vendor distribution directory that
    // must already be installed; full dependency resolution is out of scope.
    fn check_precondition(
        &self,
        entry: &MarketEntry,
        parent_dir: &Path,
    ) -> Result<(), BazaarError> {
        if entry.entry_type != MarketEntryType::HadoopShim {
            return Ok(());
        }
        match parent_dir.parent() {
            Some(vendor_dir) if vendor_dir.exists() => Ok(()),
            _ => Err(BazaarError::PreconditionFailed {
                plugin_id: entry.id.clone(),
                reason: "required vendor distribution directory is missing".to_string(),
            }),
        }
    }

    fn unload(&self, entry: &MarketEntry) {
        let Some(unit) = self.find_loaded(&entry.id) else {
            debug!(plugin = %entry.id, "plugin not loaded; skipping unload");
            return;
        };
        if let Err(err) = self.registry.unload(&unit) {
            error!(plugin = %entry.id, error = %err, "failed to unload plugin");
        }
    }

    fn find_loaded(&self, id: &str) -> Option<LoadedUnit> {
        MarketEntryType::iter().find_map(|entry_type| self.registry.find_unit(entry_type, id))
    }
}
