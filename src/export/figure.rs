// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Figure walker - a rigged figure, its mesh, and its bone list

use serde_json::{Map, Value};

use super::exporter::ExportConfig;
use super::geometry::mesh_record;
use super::node::node_entries;
use crate::scene::SceneNode;

/// Render one figure: the figure node itself, its mesh via the LOD
/// protocol, then its bones in enumeration order. Pose finalization is
/// enforced here, not assumed from the caller, and each bone is
/// finalized independently of its figure.
pub fn figure_record(
    figure: &dyn SceneNode,
    config: &ExportConfig,
    warnings: &mut Vec<String>,
) -> Map<String, Value> {
    figure.finalize_pose();

    let mut record = Map::new();
    node_entries(&mut record, figure, config.prop_world_transforms);

    if let Some(mesh) = figure.mesh() {
        mesh_record(
            &mut record,
            figure.name(),
            mesh,
            config.include_hd_uvs,
            warnings,
        );
    }

    let bones: Vec<Value> = figure
        .bones()
        .iter()
        .map(|bone| {
            bone.finalize_pose();
            let mut entry = Map::new();
            node_entries(&mut entry, *bone, true);
            Value::Object(entry)
        })
        .collect();
    record.insert("bones".into(), Value::Array(bones));

    record
}
