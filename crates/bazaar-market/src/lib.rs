// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin-artifact lifecycle for the Bazaar marketplace.
//!
//! Given a logical plugin (id, type, and a catalog-selected version with a
//! download URL), this crate installs, uninstalls, and inventories plugin
//! archives on the local filesystem and tracks the installed version in a
//! `version.xml` sidecar, independent of any central package index.
//!
//! The host runtime's live plugin registry is consumed through the
//! [`bazaar_core::HostRegistry`] seam; fetching catalog metadata and any
//! class-loading machinery are external concerns.

pub mod archive;
pub mod config;
pub mod fsops;
pub mod layout;
pub mod scanner;
pub mod service;
pub mod sidecar;

pub use archive::ArchiveInstaller;
pub use config::{MarketConfig, load_config, load_config_from_str};
pub use fsops::erase_dir;
pub use layout::{PluginLayout, installation_subfolder};
pub use scanner::installed_ids;
pub use service::MarketplaceService;
pub use sidecar::{read_installed_version, write_version_file};
