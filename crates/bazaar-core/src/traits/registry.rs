// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The host-registry seam.
//!
//! The host runtime keeps its own live catalog of loaded plugin code and
//! dispatches by type. The lifecycle service never reaches for that catalog
//! globally; it receives an implementation of [`HostRegistry`] and uses this
//! narrow method set only. Tests inject a mock.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::BazaarError;
use crate::types::{LoadedUnit, MarketEntryType};

/// Narrow view of the host runtime's live plugin registry.
///
/// All methods are in-memory lookups or registry mutations; none touch the
/// filesystem. Thread safety across concurrent lifecycle calls is the
/// implementor's contract.
pub trait HostRegistry: Send + Sync {
    /// Looks up a loaded unit by type and id. `None` when no code with that
    /// id is currently loaded under that type.
    fn find_unit(&self, entry_type: MarketEntryType, id: &str) -> Option<LoadedUnit>;

    /// All loaded units whose code lives under the given directory.
    fn units_rooted_at(&self, directory: &Path) -> Vec<LoadedUnit>;

    /// Deregisters a unit. The unit's files are untouched.
    fn remove_unit(&self, unit: &LoadedUnit) -> Result<(), BazaarError>;

    /// Releases the unit's loaded code (closes its class-loader equivalent)
    /// so its files can be deleted safely.
    fn unload(&self, unit: &LoadedUnit) -> Result<(), BazaarError>;

    /// Ids of every unit currently loaded, across all types.
    fn loaded_ids(&self) -> BTreeSet<String>;

    /// The installation directory the unit was loaded from, when known.
    fn installed_directory(&self, unit: &LoadedUnit) -> Option<PathBuf>;
}
