// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Bazaar plugin lifecycle manager.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the lifecycle operations.
///
/// Every failure mode of install/uninstall surfaces as one of these
/// variants; nothing panics past the service boundary.
#[derive(Debug, Error)]
pub enum BazaarError {
    /// Configuration errors (invalid TOML, bad paths, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A type-specific install precondition was not met; the filesystem
    /// was not touched.
    #[error("install precondition not met for {plugin_id}: {reason}")]
    PreconditionFailed { plugin_id: String, reason: String },

    /// Fetching the plugin archive failed.
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Unpacking the plugin archive failed. Partial extraction may remain
    /// on disk; the next install erases the target first.
    #[error("archive extraction failed: {message}")]
    Extract {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An entry in the installation tree could not be deleted. The erase
    /// aborts at the first such entry.
    #[error("failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the version sidecar failed after a successful extraction.
    #[error("failed to write version metadata at {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Uninstall was requested for a plugin with no installed directory.
    #[error("plugin {0} is not installed")]
    NotInstalled(String),

    /// Host registry interaction failed. During uninstall these are logged
    /// and do not block filesystem cleanup.
    #[error("registry interaction failed: {message}")]
    Registry {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
