// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `version.xml` sidecar: on-disk proof of what is installed.
//!
//! Each installed plugin directory holds at most one sidecar file with a
//! single element, `<version branch='…' buildId='…'>TEXT</version>`, where
//! either attribute is omitted entirely when its value is empty. A missing
//! directory, missing file, or unparseable fragment all mean "not
//! installed"; a corrupt sidecar must never be mistaken for a valid
//! install and must never crash the caller.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use bazaar_core::BazaarError;
use bazaar_core::types::{PluginVersion, VersionInfo};

/// Name of the sidecar file inside a plugin's installation directory.
pub const VERSION_FILE: &str = "version.xml";

static VERSION_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<version\b([^>]*)>(.*?)</version>").unwrap());

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_.-]*)\s*=\s*(?:'([^']*)'|"([^"]*)")"#).unwrap());

/// Read the installed version recorded for the plugin directory.
///
/// Returns `None` when nothing valid is recorded, whatever the reason.
pub fn read_installed_version(plugin_dir: &Path) -> Option<VersionInfo> {
    if !plugin_dir.is_dir() {
        return None;
    }
    let path = plugin_dir.join(VERSION_FILE);
    if !path.is_file() {
        return None;
    }

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable version sidecar; treating as not installed");
            return None;
        }
    };

    let parsed = parse_version_fragment(&contents);
    if parsed.is_none() {
        warn!(path = %path.display(), "malformed version sidecar; treating as not installed");
    }
    parsed
}

/// Write the sidecar for a freshly extracted plugin.
///
/// Creates the plugin directory if the archive did not. Called only after
/// extraction succeeded, so a failed install never leaves a record pointing
/// at incomplete content.
pub fn write_version_file(plugin_dir: &Path, version: &PluginVersion) -> Result<(), BazaarError> {
    fs::create_dir_all(plugin_dir).map_err(|source| BazaarError::Metadata {
        path: plugin_dir.to_path_buf(),
        source,
    })?;

    let path = plugin_dir.join(VERSION_FILE);
    let mut fragment = String::from("<version");
    push_attribute(&mut fragment, "branch", &version.branch);
    push_attribute(&mut fragment, "buildId", &version.build_id);
    fragment.push('>');
    fragment.push_str(&version.version);
    fragment.push_str("</version>");

    fs::write(&path, fragment).map_err(|source| BazaarError::Metadata { path, source })
}

// An empty value omits the attribute entirely rather than emitting attr=''.
fn push_attribute(fragment: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        fragment.push(' ');
        fragment.push_str(name);
        fragment.push_str("='");
        fragment.push_str(value);
        fragment.push('\'');
    }
}

fn parse_version_fragment(contents: &str) -> Option<VersionInfo> {
    let captures = VERSION_ELEMENT.captures(contents)?;
    let attributes = captures.get(1).map_or("", |m| m.as_str());
    let version = captures.get(2).map_or("", |m| m.as_str()).to_string();

    let mut info = VersionInfo {
        version,
        ..VersionInfo::default()
    };
    for attr in ATTRIBUTE.captures_iter(attributes) {
        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .map_or("", |m| m.as_str());
        match &attr[1] {
            "branch" => info.branch = value.to_string(),
            "buildId" => info.build_id = value.to_string(),
            _ => {}
        }
    }
    Some(info)
}
