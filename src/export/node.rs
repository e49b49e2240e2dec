// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Node serializer - identity and transform fields of one scene node

use nalgebra::{Matrix3, Matrix4, Point3, Quaternion, Vector3};
use serde_json::{json, Map, Value};

use crate::scene::{NodeTransform, SceneNode};

pub(crate) fn point3_value(p: &Point3<f64>) -> Value {
    json!([p.x, p.y, p.z])
}

pub(crate) fn vector3_value(v: &Vector3<f64>) -> Value {
    json!([v.x, v.y, v.z])
}

/// Quaternion as `[x, y, z, w]`, the order the downstream importer
/// unpacks
pub(crate) fn quaternion_value(q: &Quaternion<f64>) -> Value {
    json!([q.coords.x, q.coords.y, q.coords.z, q.coords.w])
}

/// 3x3 matrix flattened row-major into 9 numbers
pub(crate) fn matrix3_rows_value(m: &Matrix3<f64>) -> Value {
    let rows: Vec<f64> = (0..3)
        .flat_map(|r| (0..3).map(move |c| m[(r, c)]))
        .collect();
    json!(rows)
}

/// Composed world transform as 12 numbers: the three rotation rows of
/// the matrix followed by its translation
pub(crate) fn world_transform_value(m: &Matrix4<f64>) -> Value {
    let mut flat: Vec<f64> = (0..3)
        .flat_map(|r| (0..3).map(move |c| m[(r, c)]))
        .collect();
    flat.extend([m[(0, 3)], m[(1, 3)], m[(2, 3)]]);
    json!(flat)
}

/// Emit one node's header: name and center/end points always, the full
/// world-transform fields only when the active export mode asks for
/// them on generic nodes.
pub(crate) fn node_entries(record: &mut Map<String, Value>, node: &dyn SceneNode, full: bool) {
    let transform = node.transform();
    record.insert("name".into(), Value::String(node.name().to_string()));
    record.insert(
        "center_point".into(),
        point3_value(&transform.center_point),
    );
    record.insert("end_point".into(), point3_value(&transform.end_point));
    if full {
        transform_entries(record, &transform);
    }
}

/// World-transform fields in their fixed order
pub(crate) fn transform_entries(record: &mut Map<String, Value>, transform: &NodeTransform) {
    record.insert(
        "orientation".into(),
        vector3_value(&transform.orientation),
    );
    record.insert("origin".into(), point3_value(&transform.origin));
    record.insert(
        "rotation_order".into(),
        Value::String(transform.rotation_order.as_str().to_string()),
    );
    record.insert("ws_pos".into(), point3_value(&transform.ws_pos));
    record.insert("ws_rot".into(), quaternion_value(&transform.ws_rot));
    record.insert("ws_scale".into(), matrix3_rows_value(&transform.ws_scale));
    record.insert(
        "ws_transform".into(),
        world_transform_value(&transform.ws_transform),
    );
}
