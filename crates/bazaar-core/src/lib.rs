// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Bazaar plugin lifecycle manager.
//!
//! This crate provides the error type, the market-entry data model, and the
//! trait seam to the host runtime's plugin registry. The lifecycle
//! operations themselves live in `bazaar-market`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BazaarError;
pub use traits::HostRegistry;
pub use types::{LoadedUnit, MarketEntry, MarketEntryType, PluginVersion, VersionInfo};
