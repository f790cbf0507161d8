// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the lifecycle service and the host-registry seam.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use url::Url;

/// The kind of an installable market entry.
///
/// Each kind maps to an installation subfolder convention under the plugins
/// root (see `bazaar_market::layout`). Kinds with no convention of their own
/// install directly under the root.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum MarketEntryType {
    Step,
    JobEntry,
    Partitioner,
    SpoonPlugin,
    Database,
    Repository,
    HadoopShim,
    Mixed,
    Platform,
}

/// An installable unit: a logical plugin identified by id within its type.
///
/// The id is unique per type. Any live binding to loaded code is owned by
/// the host registry, not by this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub id: String,
    pub entry_type: MarketEntryType,
}

impl MarketEntry {
    pub fn new(id: impl Into<String>, entry_type: MarketEntryType) -> Self {
        Self {
            id: id.into(),
            entry_type,
        }
    }
}

/// A selected, installable version of a market entry.
///
/// Produced by the catalog collaborator; immutable once constructed.
/// `branch` and `build_id` may be empty, in which case the sidecar omits
/// the corresponding attribute entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginVersion {
    pub version: String,
    pub branch: String,
    pub build_id: String,
    pub download_url: Url,
}

impl PluginVersion {
    /// The subset of this version that the on-disk sidecar records.
    pub fn info(&self) -> VersionInfo {
        VersionInfo {
            version: self.version.clone(),
            branch: self.branch.clone(),
            build_id: self.build_id.clone(),
        }
    }
}

/// Version metadata as stored in, and read back from, the sidecar file.
///
/// The on-disk record carries no download URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub branch: String,
    pub build_id: String,
}

/// Handle to a unit of plugin code currently loaded by the host registry.
///
/// Opaque to the lifecycle service beyond identity; the registry resolves
/// it back to loaded code and its on-disk location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedUnit {
    pub id: String,
    pub entry_type: MarketEntryType,
}

impl LoadedUnit {
    pub fn new(id: impl Into<String>, entry_type: MarketEntryType) -> Self {
        Self {
            id: id.into(),
            entry_type,
        }
    }
}
