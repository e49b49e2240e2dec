// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Scene subsystem - host-graph abstraction and the in-memory host double

mod host;
pub mod memory;
mod types;

pub use host::{MeshHandle, Scene, SceneNode};
pub use memory::{load_scene, HostCall, MemoryMesh, MemoryNode, MemoryScene, SceneDataError};
pub use types::{
    GeometrySnapshot, MaterialView, NodeClass, NodeTransform, PropertyValue, RotationOrder, UvSet,
};
