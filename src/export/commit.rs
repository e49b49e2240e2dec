// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Compression and commit.
//!
//! The text artifact is first written to `<path>0`, then compressed
//! into `<path>`. Success deletes the intermediate; a compression
//! failure renames it to `<path>` instead. Either way the user ends up
//! with a file at the requested path and nothing left at the
//! intermediate one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Intermediate artifact path: the chosen file name with "0" appended
pub fn intermediate_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push('0');
    path.with_file_name(name)
}

/// Gzip the document text
pub fn gzip_compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).context("Failed to compress document")?;
    encoder.finish().context("Failed to finish compression")
}

/// Write the document to disk and commit it under `path`.
///
/// Returns `true` when the committed file is compressed, `false` when
/// the compressor failed and the plain text was renamed into place.
/// I/O failures are fatal and propagate.
pub fn commit_document(
    text: &str,
    path: &Path,
    compress: impl Fn(&[u8]) -> Result<Vec<u8>>,
) -> Result<bool> {
    let tmp = intermediate_path(path);
    fs::write(&tmp, text).context(format!("Failed to write intermediate file: {:?}", tmp))?;

    match compress(text.as_bytes()) {
        Ok(compressed) => {
            fs::write(path, &compressed)
                .context(format!("Failed to write output file: {:?}", path))?;
            fs::remove_file(&tmp)
                .context(format!("Failed to remove intermediate file: {:?}", tmp))?;
            Ok(true)
        }
        Err(_) => {
            fs::rename(&tmp, path).context(format!(
                "Failed to rename intermediate file to: {:?}",
                path
            ))?;
            Ok(false)
        }
    }
}
