// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! In-memory scene host.
//!
//! Stands in for the host application's live scene graph: the CLI loads
//! one from a JSON description, and tests use it to observe the
//! exporter's side effects (LOD toggles, cache invalidations, pose
//! finalization order). Mutable host state lives behind `Cell`/`RefCell`
//! because the exporter only ever holds shared handles.

use std::cell::{Cell, RefCell};
use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    GeometrySnapshot, MaterialView, MeshHandle, NodeClass, NodeTransform, Scene, SceneNode,
};

/// Validation failure in a scene description
#[derive(Debug, Error)]
pub enum SceneDataError {
    #[error("node '{0}': LOD level {1} is negative")]
    NegativeLodLevel(String, i64),
    #[error("node '{0}': UV set '{1}' has {2} coordinates for {3} vertices")]
    UvCountMismatch(String, String, usize, usize),
}

/// Host call recorded by a memory node, for ordering assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    FinalizePose,
    ReadTransform,
}

/// A whole scene held in memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryScene {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<MemoryNode>,
}

impl MemoryScene {
    pub fn validate(&self) -> Result<(), SceneDataError> {
        for node in &self.nodes {
            node.validate()?;
        }
        Ok(())
    }
}

impl Scene for MemoryScene {
    fn nodes(&self) -> Vec<&dyn SceneNode> {
        self.nodes.iter().map(|n| n as &dyn SceneNode).collect()
    }
}

/// One node of a memory scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryNode {
    pub name: String,
    #[serde(default)]
    pub class: NodeClass,
    #[serde(default)]
    pub transform: NodeTransform,
    #[serde(default)]
    pub mesh: Option<MemoryMesh>,
    #[serde(default)]
    pub bones: Vec<MemoryNode>,
    #[serde(skip)]
    log: RefCell<Vec<HostCall>>,
}

impl MemoryNode {
    pub fn new(name: impl Into<String>, class: NodeClass) -> Self {
        Self {
            name: name.into(),
            class,
            transform: NodeTransform::default(),
            mesh: None,
            bones: Vec::new(),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Host calls made against this node so far, in order
    pub fn host_calls(&self) -> Vec<HostCall> {
        self.log.borrow().clone()
    }

    fn validate(&self) -> Result<(), SceneDataError> {
        if let Some(mesh) = &self.mesh {
            mesh.validate(&self.name)?;
        }
        for bone in &self.bones {
            bone.validate()?;
        }
        Ok(())
    }
}

impl SceneNode for MemoryNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn class(&self) -> NodeClass {
        self.class
    }

    fn finalize_pose(&self) {
        self.log.borrow_mut().push(HostCall::FinalizePose);
    }

    fn transform(&self) -> NodeTransform {
        self.log.borrow_mut().push(HostCall::ReadTransform);
        self.transform.clone()
    }

    fn mesh(&self) -> Option<&dyn MeshHandle> {
        self.mesh.as_ref().map(|m| m as &dyn MeshHandle)
    }

    fn bones(&self) -> Vec<&dyn SceneNode> {
        self.bones.iter().map(|b| b as &dyn SceneNode).collect()
    }
}

/// Mesh with an LOD control and a lazily primed geometry cache.
///
/// `base` is the level-0 geometry, `high` the geometry for any level
/// above 0. The cache only ever changes on `invalidate_cache`; setting
/// the LOD level alone leaves it stale, exactly like the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMesh {
    #[serde(default)]
    lod_level: Cell<i64>,
    #[serde(default)]
    pub base: Option<GeometrySnapshot>,
    #[serde(default)]
    pub high: Option<GeometrySnapshot>,
    /// Node classes that disable caching yield no snapshot at all
    #[serde(default)]
    pub caching_disabled: bool,
    #[serde(default)]
    pub materials: Vec<MaterialView>,
    #[serde(skip)]
    cache: RefCell<Option<GeometrySnapshot>>,
    #[serde(skip)]
    cache_primed: Cell<bool>,
    #[serde(skip)]
    lod_history: RefCell<Vec<i64>>,
}

impl MemoryMesh {
    pub fn new(base: GeometrySnapshot) -> Self {
        Self {
            base: Some(base),
            ..Default::default()
        }
    }

    pub fn with_high_detail(mut self, level: i64, high: GeometrySnapshot) -> Self {
        self.lod_level.set(level);
        self.high = Some(high);
        self
    }

    /// Every value the LOD control was set to, in order
    pub fn lod_history(&self) -> Vec<i64> {
        self.lod_history.borrow().clone()
    }

    fn resolve(&self, level: i64) -> Option<GeometrySnapshot> {
        if self.caching_disabled {
            return None;
        }
        if level > 0 {
            self.high.clone().or_else(|| self.base.clone())
        } else {
            self.base.clone()
        }
    }

    fn validate(&self, node: &str) -> Result<(), SceneDataError> {
        let level = self.lod_level.get();
        if level < 0 {
            return Err(SceneDataError::NegativeLodLevel(node.to_string(), level));
        }
        for geo in [&self.base, &self.high].into_iter().flatten() {
            if let Some(uv) = &geo.uv_set {
                if uv.coords.len() != geo.vertices.len() {
                    return Err(SceneDataError::UvCountMismatch(
                        node.to_string(),
                        uv.label.clone(),
                        uv.coords.len(),
                        geo.vertices.len(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl MeshHandle for MemoryMesh {
    fn lod_level(&self) -> i64 {
        self.lod_level.get()
    }

    fn set_lod_level(&self, level: i64) {
        self.lod_history.borrow_mut().push(level);
        self.lod_level.set(level);
    }

    fn invalidate_cache(&self) {
        *self.cache.borrow_mut() = self.resolve(self.lod_level.get());
        self.cache_primed.set(true);
    }

    fn cached_geometry(&self) -> Option<GeometrySnapshot> {
        // The live cache matches the externally-set level until the
        // first invalidation; prime it on first read.
        if !self.cache_primed.get() {
            *self.cache.borrow_mut() = self.resolve(self.lod_level.get());
            self.cache_primed.set(true);
        }
        self.cache.borrow().clone()
    }

    fn materials(&self) -> Vec<MaterialView> {
        self.materials.clone()
    }
}

/// Load a scene description from a JSON file
pub fn load_scene(path: &str) -> Result<MemoryScene> {
    let source =
        fs::read_to_string(path).context(format!("Failed to read scene file: {}", path))?;
    let scene: MemoryScene =
        serde_json::from_str(&source).context(format!("Failed to parse scene file: {}", path))?;
    scene
        .validate()
        .context(format!("Invalid scene data in: {}", path))?;
    Ok(scene)
}
