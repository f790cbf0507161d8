// SPDX-FileCopyrightText: 2026 Bazaar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Archive download and extraction.
//!
//! The installable artifact is a zip distribution fetched from the
//! version's download URL. It is streamed to a scoped temporary file
//! (removed afterwards whatever the outcome) and extracted entry by entry
//! into the target root, preserving the archive's relative paths. The
//! archive carries the plugin's own directory as its top-level entry, so
//! the target root is the type's installation root, not the plugin
//! directory itself.
//!
//! Entries that would escape the target root (`..` segments, absolute
//! paths) are rejected outright. The installer performs no pre-cleanup; the
//! lifecycle service erases any existing installation first.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::debug;
use url::Url;
use zip::ZipArchive;

use bazaar_core::BazaarError;

/// Downloads and unpacks plugin archives.
///
/// Holds a pooled HTTP client; one instance serves any number of installs.
#[derive(Debug, Clone)]
pub struct ArchiveInstaller {
    client: reqwest::Client,
}

impl ArchiveInstaller {
    /// Creates an installer whose downloads abort after `download_timeout`.
    pub fn new(download_timeout: Duration) -> Result<Self, BazaarError> {
        let client = reqwest::Client::builder()
            .timeout(download_timeout)
            .build()
            .map_err(|e| BazaarError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch the archive at `archive_url` and extract it under `target_root`.
    ///
    /// On failure, partial extraction may remain on disk; it is not retried
    /// here and the next install of the same plugin erases it first.
    pub async fn install(&self, target_root: &Path, archive_url: &Url) -> Result<(), BazaarError> {
        // The temp file is dropped, and thereby removed, on every path out.
        let archive_file = self.download(archive_url).await?;
        extract(archive_file.path(), target_root)
    }

    async fn download(&self, url: &Url) -> Result<NamedTempFile, BazaarError> {
        let download_err = |source: Box<dyn std::error::Error + Send + Sync>| {
            BazaarError::Download {
                url: url.to_string(),
                source,
            }
        };

        let mut file = NamedTempFile::new().map_err(|e| download_err(Box::new(e)))?;

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| download_err(Box::new(e)))?;

        let mut bytes_written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| download_err(Box::new(e)))?
        {
            file.write_all(&chunk)
                .map_err(|e| download_err(Box::new(e)))?;
            bytes_written += chunk.len() as u64;
        }
        file.flush().map_err(|e| download_err(Box::new(e)))?;

        debug!(url = %url, bytes = bytes_written, "downloaded plugin archive");
        Ok(file)
    }
}

fn extract(archive_path: &Path, target_root: &Path) -> Result<(), BazaarError> {
    let file = File::open(archive_path).map_err(|e| BazaarError::Extract {
        message: "failed to reopen downloaded archive".to_string(),
        source: Some(Box::new(e)),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| BazaarError::Extract {
        message: "unreadable zip archive".to_string(),
        source: Some(Box::new(e)),
    })?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| BazaarError::Extract {
            message: format!("failed to read archive entry {index}"),
            source: Some(Box::new(e)),
        })?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(BazaarError::Extract {
                message: format!("archive entry '{}' escapes the target directory", entry.name()),
                source: None,
            });
        };
        let out_path = target_root.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| BazaarError::Extract {
                message: format!("failed to create directory {}", out_path.display()),
                source: Some(Box::new(e)),
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BazaarError::Extract {
                message: format!("failed to create directory {}", parent.display()),
                source: Some(Box::new(e)),
            })?;
        }
        let mut out_file = File::create(&out_path).map_err(|e| BazaarError::Extract {
            message: format!("failed to create {}", out_path.display()),
            source: Some(Box::new(e)),
        })?;
        io::copy(&mut entry, &mut out_file).map_err(|e| BazaarError::Extract {
            message: format!("failed to write {}", out_path.display()),
            source: Some(Box::new(e)),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use bazaar_test_utils::{write_zip, zip_bytes};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn installer() -> ArchiveInstaller {
        ArchiveInstaller::new(Duration::from_secs(5)).unwrap()
    }

    async fn serve_zip(entries: &[(&str, &[u8])]) -> (MockServer, Url) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_bytes(entries)))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/foo.zip", server.uri())).unwrap();
        (server, url)
    }

    #[tokio::test]
    async fn installs_archive_contents_under_the_target_root() {
        let (_server, url) = serve_zip(&[
            ("foo/", b""),
            ("foo/plugin.jar", b"jar bytes"),
            ("foo/lib/dep.jar", b"dep bytes"),
        ])
        .await;
        let target = TempDir::new().unwrap();

        installer().install(target.path(), &url).await.unwrap();

        assert_eq!(
            fs::read(target.path().join("foo/plugin.jar")).unwrap(),
            b"jar bytes"
        );
        assert_eq!(
            fs::read(target.path().join("foo/lib/dep.jar")).unwrap(),
            b"dep bytes"
        );
    }

    #[tokio::test]
    async fn creates_intermediate_directories_without_explicit_entries() {
        // Some archives list only file entries.
        let (_server, url) = serve_zip(&[("foo/deep/nested/file.txt", b"x")]).await;
        let target = TempDir::new().unwrap();

        installer().install(target.path(), &url).await.unwrap();

        assert!(target.path().join("foo/deep/nested/file.txt").is_file());
    }

    #[tokio::test]
    async fn http_error_surfaces_as_download_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo.zip"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/foo.zip", server.uri())).unwrap();
        let target = TempDir::new().unwrap();

        let err = installer().install(target.path(), &url).await.unwrap_err();
        assert!(matches!(err, BazaarError::Download { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_surfaces_as_download_failure() {
        let target = TempDir::new().unwrap();
        let url = Url::parse("http://127.0.0.1:1/foo.zip").unwrap();

        let err = installer().install(target.path(), &url).await.unwrap_err();
        assert!(matches!(err, BazaarError::Download { .. }));
    }

    #[tokio::test]
    async fn garbage_payload_surfaces_as_extract_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a zip".to_vec()))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/foo.zip", server.uri())).unwrap();
        let target = TempDir::new().unwrap();

        let err = installer().install(target.path(), &url).await.unwrap_err();
        assert!(matches!(err, BazaarError::Extract { .. }));
    }

    #[test]
    fn traversal_entries_are_rejected() {
        let staging = TempDir::new().unwrap();
        let archive_path = staging.path().join("evil.zip");
        write_zip(&archive_path, &[("../evil.txt", b"escape")]);

        let target = staging.path().join("target");
        fs::create_dir(&target).unwrap();

        let err = extract(&archive_path, &target).unwrap_err();
        match err {
            BazaarError::Extract { message, .. } => assert!(message.contains("../evil.txt")),
            other => panic!("expected Extract error, got {other:?}"),
        }
        assert!(!staging.path().join("evil.txt").exists());
    }
}
