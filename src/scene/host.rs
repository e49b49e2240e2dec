// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Trait seam over the host application's live scene graph.
//!
//! The exporter owns none of these objects; it reads them through shared
//! handles and performs exactly one documented mutation (the LOD toggle
//! in [`crate::export::LodGuard`]). Handle methods therefore take
//! `&self` and implementations carry their mutable state internally,
//! the way a live host object would.

use super::{GeometrySnapshot, MaterialView, NodeClass, NodeTransform};

/// Enumeration of a scene's top-level nodes, in host-defined order.
/// The order is stable and is never re-sorted by the exporter.
pub trait Scene {
    fn nodes(&self) -> Vec<&dyn SceneNode>;
}

/// One node of the host scene graph
pub trait SceneNode {
    fn name(&self) -> &str;

    fn class(&self) -> NodeClass;

    /// Resolve pose-dependent fields. Must run before `transform` is
    /// read on this node; bones do not inherit their figure's call.
    fn finalize_pose(&self);

    fn transform(&self) -> NodeTransform;

    /// Mesh attached to this node, if any
    fn mesh(&self) -> Option<&dyn MeshHandle>;

    /// Ordered flat bone list; empty unless this node is a figure
    fn bones(&self) -> Vec<&dyn SceneNode>;
}

/// Handle on a node's mesh and its LOD-controlled geometry cache.
///
/// The cache is valid at entry (the host guarantees the live cache
/// matches whatever LOD value was last set externally) and immediately
/// after a `set_lod_level` + `invalidate_cache` sequence. Reading it
/// outside those windows yields stale data. A `None` snapshot is a
/// recoverable condition, not an error.
pub trait MeshHandle {
    /// Current value of the LOD control; 0 is base resolution
    fn lod_level(&self) -> i64;

    /// Set the LOD control. Does not touch the cache by itself.
    fn set_lod_level(&self, level: i64);

    /// Force recomputation of the cached geometry to match the current
    /// LOD value, scoped to the owning node
    fn invalidate_cache(&self);

    fn cached_geometry(&self) -> Option<GeometrySnapshot>;

    fn materials(&self) -> Vec<MaterialView>;
}
