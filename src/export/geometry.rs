// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Geometry serializer.
//!
//! Renders a mesh's cached snapshots into record entries. Building the
//! document as an in-memory JSON tree keeps separator and bracket
//! correctness structural; the only format obligations left here are
//! the field keys and their order.

use serde_json::{json, Map, Value};

use super::lod::{capture_high_detail, LodGuard};
use crate::scene::{GeometrySnapshot, MaterialView, MeshHandle};

/// Which resolution a snapshot is emitted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Base,
    /// High detail, tagged with the LOD level it was captured at
    High { subd_level: i64 },
}

fn vertices_value(geo: &GeometrySnapshot) -> Value {
    Value::Array(
        geo.vertices
            .iter()
            .map(|v| json!([v[0], v[1], v[2]]))
            .collect(),
    )
}

fn facets_value(geo: &GeometrySnapshot) -> Value {
    // Facets are opaque index lists; pass them through verbatim
    Value::Array(geo.facets.iter().map(|f| json!(f)).collect())
}

fn group_names_value(geo: &GeometrySnapshot) -> Value {
    json!(geo.material_groups)
}

/// Emit one snapshot's fields in fixed order: vertex count, vertices,
/// (high detail only, when configured: UV set label and coordinates),
/// facets, material group names.
pub(crate) fn mesh_entries(
    record: &mut Map<String, Value>,
    geo: &GeometrySnapshot,
    resolution: Resolution,
    include_uvs: bool,
) {
    match resolution {
        Resolution::Base => {
            record.insert("num verts".into(), json!(geo.vertex_count()));
            record.insert("vertices".into(), vertices_value(geo));
            record.insert("faces".into(), facets_value(geo));
            record.insert("material groups".into(), group_names_value(geo));
        }
        Resolution::High { subd_level } => {
            record.insert("subd level".into(), json!(subd_level));
            record.insert("hd num verts".into(), json!(geo.vertex_count()));
            record.insert("hd vertices".into(), vertices_value(geo));
            if include_uvs {
                // Readers take the UV block as given whenever high-detail
                // vertices are present; a snapshot without one still gets
                // an empty label and coordinate list.
                match &geo.uv_set {
                    Some(uv) => {
                        record.insert("uv set".into(), Value::String(uv.label.clone()));
                        record.insert(
                            "hd uvs".into(),
                            Value::Array(uv.coords.iter().map(|c| json!([c[0], c[1]])).collect()),
                        );
                    }
                    None => {
                        record.insert("uv set".into(), Value::String(String::new()));
                        record.insert("hd uvs".into(), json!([]));
                    }
                }
            }
            record.insert("hd faces".into(), facets_value(geo));
            record.insert("hd material groups".into(), group_names_value(geo));
        }
    }
}

/// Zero-vertex stand-in for a mesh whose cache yielded nothing
pub(crate) fn empty_mesh_entries(record: &mut Map<String, Value>) {
    record.insert("num verts".into(), json!(0));
}

/// Material bags, filtered to numeric-valued properties
pub(crate) fn material_entries(record: &mut Map<String, Value>, materials: &[MaterialView]) {
    if materials.is_empty() {
        return;
    }
    let list: Vec<Value> = materials
        .iter()
        .map(|mat| {
            let mut entry = Map::new();
            entry.insert("name".into(), Value::String(mat.name.clone()));
            for (key, value) in &mat.properties {
                if let Some(number) = value.as_number() {
                    entry.insert(key.clone(), json!(number));
                }
            }
            Value::Object(entry)
        })
        .collect();
    record.insert("materials".into(), Value::Array(list));
}

/// Render one node's mesh into `record`, honoring the LOD protocol.
///
/// With the LOD control above base level the base geometry only exists
/// behind a toggle, so the guard acquires the control, reads high
/// detail from the live cache first when HD output is wanted, then
/// toggles to base. The control is back at its original value by the
/// time this returns, on every path.
pub(crate) fn mesh_record(
    record: &mut Map<String, Value>,
    node_name: &str,
    mesh: &dyn MeshHandle,
    include_hd: bool,
    warnings: &mut Vec<String>,
) {
    let level = mesh.lod_level();

    let (base, high) = if level > 0 {
        let guard = LodGuard::acquire(mesh);
        let high = if include_hd {
            capture_high_detail(mesh)
        } else {
            None
        };
        let base = guard.base_detail();
        (base, high)
    } else {
        (mesh.cached_geometry(), None)
    };

    match &base {
        Some(geo) => mesh_entries(record, geo, Resolution::Base, false),
        None => {
            warnings.push(format!("{}: no base geometry after LOD toggle", node_name));
            empty_mesh_entries(record);
        }
    }

    if include_hd && level > 0 {
        match &high {
            Some(geo) => mesh_entries(record, geo, Resolution::High { subd_level: level }, true),
            None => warnings.push(format!("{}: no high-detail geometry", node_name)),
        }
    }

    material_entries(record, &mesh.materials());
}
