// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Scene exporter - top-level traversal and the commit sequence

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::{Map, Value};

use super::commit::{commit_document, gzip_compress};
use super::document::{to_text, DocumentBuilder};
use super::figure::figure_record;
use super::geometry::mesh_record;
use super::node::node_entries;
use crate::scene::{NodeClass, Scene, SceneNode};

/// Unified configuration over the two historical export variants
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportConfig {
    /// Emit dual-resolution geometry and the extra high-detail UV set
    pub include_hd_uvs: bool,
    /// Emit full world-transform fields on generic (non-bone) nodes
    pub prop_world_transforms: bool,
}

/// Outcome of one export call
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// False when the compressor failed and the document was committed
    /// as plain text
    pub compressed: bool,
    pub elapsed: Duration,
    /// Real records written, excluding the terminator
    pub figures: usize,
    pub warnings: Vec<String>,
}

/// Drives traversal, document assembly, and commit for one scene
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Assemble the output document without touching the filesystem.
    /// Returns the document tree, the recoverable warnings, and the
    /// number of real records.
    pub fn build_document(&self, scene: &dyn Scene) -> (Value, Vec<String>, usize) {
        let mut builder = DocumentBuilder::new(self.config.include_hd_uvs);
        let mut warnings = Vec::new();

        // Host-defined order, never re-sorted
        for node in scene.nodes() {
            match node.class() {
                NodeClass::Figure => {
                    builder.push_record(figure_record(node, &self.config, &mut warnings));
                }
                // Bones are reached through their figure
                NodeClass::Bone => {}
                NodeClass::Shell => {
                    // Derived wrapper geometry is not exported; record
                    // the node without mesh fields and move on
                    warnings.push(format!("{}: shell geometry not exported", node.name()));
                    let mut record = Map::new();
                    node_entries(&mut record, node, self.config.prop_world_transforms);
                    record.insert("num verts".into(), Value::from(0));
                    builder.push_record(record);
                }
                NodeClass::Prop => {
                    if let Some(mesh) = node.mesh() {
                        let mut record = Map::new();
                        node_entries(&mut record, node, self.config.prop_world_transforms);
                        mesh_record(
                            &mut record,
                            node.name(),
                            mesh,
                            self.config.include_hd_uvs,
                            &mut warnings,
                        );
                        builder.push_record(record);
                    }
                }
            }
        }

        let count = builder.record_count();
        (builder.finish(), warnings, count)
    }

    /// Export a scene to `path`: build, serialize once, write the
    /// intermediate artifact, compress, commit.
    pub fn export(&self, scene: &dyn Scene, path: &Path) -> Result<ExportReport> {
        let start = Instant::now();

        let (document, warnings, figures) = self.build_document(scene);
        let text = to_text(&document)?;
        let compressed = commit_document(&text, path, gzip_compress)?;

        Ok(ExportReport {
            compressed,
            elapsed: start.elapsed(),
            figures,
            warnings,
        })
    }
}
