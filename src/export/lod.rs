// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! LOD toggle controller.
//!
//! The scene is interactively live and the LOD control is user-visible,
//! so a toggle that is not undone is a correctness bug, not a cosmetic
//! one. The guard below scopes the whole acquire/toggle/read sequence
//! and restores the original level on drop, which covers early returns
//! and the null-cache branch alike.

use crate::scene::{GeometrySnapshot, MeshHandle};

/// Read the high-detail snapshot from the live cache, before any
/// toggle. The host guarantees the cache matches whatever LOD value was
/// last set externally, which at scene-load time is the high level.
pub fn capture_high_detail(mesh: &dyn MeshHandle) -> Option<GeometrySnapshot> {
    mesh.cached_geometry()
}

/// Scoped acquisition of a mesh's LOD control
pub struct LodGuard<'a> {
    mesh: &'a dyn MeshHandle,
    original: i64,
}

impl<'a> LodGuard<'a> {
    /// Record the current LOD value before any mutation
    pub fn acquire(mesh: &'a dyn MeshHandle) -> Self {
        Self {
            mesh,
            original: mesh.lod_level(),
        }
    }

    /// LOD value the mesh had when the guard was acquired
    pub fn original_level(&self) -> i64 {
        self.original
    }

    /// Toggle to base resolution, invalidate the cache, and read it.
    /// A `None` result means "no base geometry" and is recoverable; the
    /// caller emits a zero-vertex record instead of aborting.
    pub fn base_detail(&self) -> Option<GeometrySnapshot> {
        self.mesh.set_lod_level(0);
        self.mesh.invalidate_cache();
        self.mesh.cached_geometry()
    }
}

impl Drop for LodGuard<'_> {
    fn drop(&mut self) {
        self.mesh.set_lod_level(self.original);
    }
}
