// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Value types shared between the host seam and the export pipeline

use nalgebra::{Matrix3, Matrix4, Point3, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Host-side class tag of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    /// Rigged figure root; owns an ordered flat list of bones
    Figure,
    /// Bone of a figure; reached through its figure, never exported standalone
    Bone,
    /// Plain prop node, possibly with an attached mesh
    #[default]
    Prop,
    /// Procedurally-shelled geometry; its mesh is a derived wrapper and
    /// is never exported
    Shell,
}

/// Axis order in which the host composes node rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RotationOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationOrder::Xyz => "XYZ",
            RotationOrder::Xzy => "XZY",
            RotationOrder::Yxz => "YXZ",
            RotationOrder::Yzx => "YZX",
            RotationOrder::Zxy => "ZXY",
            RotationOrder::Zyx => "ZYX",
        }
    }
}

/// Rigid-transform fields of a node, as resolved by the host.
///
/// Only valid after the owning node's `finalize_pose` has run; before
/// that the host may still hold a stale pose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTransform {
    pub center_point: Point3<f64>,
    pub end_point: Point3<f64>,
    pub orientation: Vector3<f64>,
    pub origin: Point3<f64>,
    pub rotation_order: RotationOrder,
    pub ws_pos: Point3<f64>,
    pub ws_rot: Quaternion<f64>,
    pub ws_scale: Matrix3<f64>,
    pub ws_transform: Matrix4<f64>,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            center_point: Point3::origin(),
            end_point: Point3::origin(),
            orientation: Vector3::zeros(),
            origin: Point3::origin(),
            rotation_order: RotationOrder::default(),
            ws_pos: Point3::origin(),
            ws_rot: Quaternion::identity(),
            ws_scale: Matrix3::identity(),
            ws_transform: Matrix4::identity(),
        }
    }
}

/// One UV set: a label plus one 2-float coordinate per vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvSet {
    pub label: String,
    pub coords: Vec<[f64; 2]>,
}

/// Immutable view of a mesh's cached geometry at one resolution.
///
/// Facets are opaque integer lists, passed through to the document
/// exactly as the host yields them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub vertices: Vec<[f64; 3]>,
    pub facets: Vec<Vec<i64>>,
    #[serde(default)]
    pub material_groups: Vec<String>,
    #[serde(default)]
    pub uv_set: Option<UvSet>,
}

impl GeometrySnapshot {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }
}

/// One material property as the host exposes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl PropertyValue {
    /// Numeric value, if this property has one. Only numeric properties
    /// are serialized; everything else is silently skipped.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Named bag of material properties attached to a mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialView {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<(String, PropertyValue)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_order_round_trip() {
        let order: RotationOrder = serde_json::from_str("\"ZYX\"").unwrap();
        assert_eq!(order, RotationOrder::Zyx);
        assert_eq!(order.as_str(), "ZYX");
    }

    #[test]
    fn test_node_class_tags() {
        let class: NodeClass = serde_json::from_str("\"shell\"").unwrap();
        assert_eq!(class, NodeClass::Shell);
        assert_eq!(NodeClass::default(), NodeClass::Prop);
    }

    #[test]
    fn test_property_numeric_filter() {
        assert_eq!(PropertyValue::Number(0.25).as_number(), Some(0.25));
        assert_eq!(PropertyValue::Flag(true).as_number(), None);
        assert_eq!(PropertyValue::Text("map.png".into()).as_number(), None);
    }

    #[test]
    fn test_snapshot_counts() {
        let geo = GeometrySnapshot {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            facets: vec![vec![0, 0, 0, 1, 2]],
            ..Default::default()
        };
        assert_eq!(geo.vertex_count(), 3);
        assert_eq!(geo.facet_count(), 1);
    }
}
