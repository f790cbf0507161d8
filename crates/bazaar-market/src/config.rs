// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loading using Figment for layered merging.
//!
//! Merge order: compiled defaults, then `./bazaar.toml`, then `BAZAAR_*`
//! environment variables. The plugins root defaults to `plugins` relative to
//! the working directory, because the surrounding host application is
//! started from its own distribution directory.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Settings for the lifecycle service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Directory under which plugin artifacts are installed, per type-specific
    /// subfolder conventions.
    pub plugins_root: PathBuf,
    /// Timeout applied to the archive download, in seconds.
    pub download_timeout_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            plugins_root: PathBuf::from("plugins"),
            download_timeout_secs: 300,
        }
    }
}

/// Load configuration from `./bazaar.toml` with env var overrides.
pub fn load_config() -> Result<MarketConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MarketConfig::default()))
        .merge(Toml::file("bazaar.toml"))
        .merge(Env::prefixed("BAZAAR_"))
        .extract()
}

/// Load configuration from an in-memory TOML string (no file lookup).
///
/// Used for testing and explicit configuration by the embedding host.
pub fn load_config_from_str(toml_content: &str) -> Result<MarketConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MarketConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}
