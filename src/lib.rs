// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Scenebridge
//!
//! Exports a hierarchical rigged scene (figures, bones, meshes,
//! materials, UVs) into the DBZ interchange format: a JSON document,
//! gzip-compressed for transport to a downstream importer. The host
//! scene graph is reached through the `scene` trait seam; `export`
//! holds the pipeline, including the LOD toggle/restore protocol and
//! the compression fallback commit.

pub mod export;
pub mod scene;

pub use export::{ExportConfig, ExportReport, Exporter};
pub use scene::{load_scene, GeometrySnapshot, MemoryScene, Scene};

use anyhow::Result;
use std::path::Path;

/// Export a JSON scene description file to a DBZ document at `path`
pub fn export_scene_file(
    scene_path: &str,
    path: &Path,
    config: ExportConfig,
) -> Result<ExportReport> {
    let scene = load_scene(scene_path)?;
    Exporter::new(config).export(&scene, path)
}
