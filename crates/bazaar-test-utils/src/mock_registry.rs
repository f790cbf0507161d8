// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock host registry for deterministic lifecycle tests.
//!
//! `MockRegistry` implements `HostRegistry` with scripted loaded units and
//! captured `remove_unit`/`unload` calls for assertion in tests.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use bazaar_core::traits::registry::HostRegistry;
use bazaar_core::types::{LoadedUnit, MarketEntryType};
use bazaar_core::BazaarError;

struct Registered {
    unit: LoadedUnit,
    directory: Option<PathBuf>,
}

/// A mock host registry for testing.
///
/// Loaded units are scripted up front with `load_unit()`; calls that mutate
/// the registry are captured and retrievable via `removed_units()` and
/// `unloaded_units()`. `fail_removals()` scripts registry-side failures.
pub struct MockRegistry {
    units: Mutex<Vec<Registered>>,
    removed: Mutex<Vec<LoadedUnit>>,
    unloaded: Mutex<Vec<LoadedUnit>>,
    fail_removals: AtomicBool,
}

impl MockRegistry {
    /// Create a new mock registry with nothing loaded.
    pub fn new() -> Self {
        Self {
            units: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            unloaded: Mutex::new(Vec::new()),
            fail_removals: AtomicBool::new(false),
        }
    }

    /// Script a loaded unit, optionally with the directory it was loaded from.
    pub fn load_unit(&self, unit: LoadedUnit, directory: Option<PathBuf>) {
        self.units.lock().unwrap().push(Registered { unit, directory });
    }

    /// Make every subsequent `remove_unit` call fail.
    pub fn fail_removals(&self, fail: bool) {
        self.fail_removals.store(fail, Ordering::SeqCst);
    }

    /// Units passed to `remove_unit()` so far.
    pub fn removed_units(&self) -> Vec<LoadedUnit> {
        self.removed.lock().unwrap().clone()
    }

    /// Units passed to `unload()` so far.
    pub fn unloaded_units(&self) -> Vec<LoadedUnit> {
        self.unloaded.lock().unwrap().clone()
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRegistry for MockRegistry {
    fn find_unit(&self, entry_type: MarketEntryType, id: &str) -> Option<LoadedUnit> {
        self.units
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.unit.entry_type == entry_type && r.unit.id == id)
            .map(|r| r.unit.clone())
    }

    fn units_rooted_at(&self, directory: &Path) -> Vec<LoadedUnit> {
        self.units
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.directory.as_deref() == Some(directory))
            .map(|r| r.unit.clone())
            .collect()
    }

    fn remove_unit(&self, unit: &LoadedUnit) -> Result<(), BazaarError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(BazaarError::Registry {
                message: format!("scripted removal failure for {}", unit.id),
                source: None,
            });
        }
        self.removed.lock().unwrap().push(unit.clone());
        self.units
            .lock()
            .unwrap()
            .retain(|r| r.unit != *unit);
        Ok(())
    }

    fn unload(&self, unit: &LoadedUnit) -> Result<(), BazaarError> {
        self.unloaded.lock().unwrap().push(unit.clone());
        Ok(())
    }

    fn loaded_ids(&self) -> BTreeSet<String> {
        self.units
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.unit.id.clone())
            .collect()
    }

    fn installed_directory(&self, unit: &LoadedUnit) -> Option<PathBuf> {
        self.units
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.unit == *unit)
            .and_then(|r| r.directory.clone())
    }
}
