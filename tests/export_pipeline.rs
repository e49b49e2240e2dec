// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! End-to-end export pipeline tests

use anyhow::Result;
use approx::assert_relative_eq;
use flate2::read::GzDecoder;
use scenebridge::export::{commit_document, intermediate_path};
use scenebridge::scene::memory::{MemoryMesh, MemoryNode, MemoryScene};
use scenebridge::scene::{GeometrySnapshot, MeshHandle, NodeClass, UvSet};
use scenebridge::{ExportConfig, Exporter};
use serde_json::{json, Value};
use std::io::Read;
use tempfile::TempDir;

fn quad() -> GeometrySnapshot {
    GeometrySnapshot {
        vertices: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        facets: vec![vec![0, 0, 0, 1, 2, 3]],
        material_groups: vec!["default".into()],
        uv_set: None,
    }
}

fn dense(n: usize) -> GeometrySnapshot {
    GeometrySnapshot {
        vertices: vec![[0.5; 3]; n],
        facets: vec![vec![0, 0, 0, 1, 2]; n / 3],
        material_groups: vec!["default".into()],
        uv_set: Some(UvSet {
            label: "Base UV".into(),
            coords: vec![[0.25, 0.75]; n],
        }),
    }
}

fn read_dbz(path: &std::path::Path) -> Result<Value> {
    let mut decoder = GzDecoder::new(std::fs::File::open(path)?);
    let mut text = String::new();
    decoder.read_to_string(&mut text)?;
    Ok(serde_json::from_str(&text)?)
}

#[test]
fn test_plane_scene_export() -> Result<()> {
    let mut plane = MemoryNode::new("Plane", NodeClass::Prop);
    plane.mesh = Some(MemoryMesh::new(quad()));
    let scene = MemoryScene {
        name: "plane".into(),
        nodes: vec![plane],
    };

    let dir = TempDir::new()?;
    let out = dir.path().join("plane.dbz");
    let report = Exporter::new(ExportConfig::default()).export(&scene, &out)?;

    assert!(report.compressed);
    assert_eq!(report.figures, 1);
    assert!(!intermediate_path(&out).exists());

    let doc = read_dbz(&out)?;
    assert_eq!(doc["application"], json!("export_to_blender"));

    let figures = doc["figures"].as_array().unwrap();
    assert_eq!(figures.len(), 2);
    assert_eq!(figures[0]["name"], json!("Plane"));
    assert_eq!(figures[0]["num verts"], json!(4));
    assert_eq!(figures[1]["name"], json!("dummy"));
    assert_eq!(figures[1]["num verts"], json!(0));

    Ok(())
}

#[test]
fn test_rigged_figure_highdef_export() -> Result<()> {
    let mut body = MemoryNode::new("Body", NodeClass::Figure);
    body.mesh = Some(MemoryMesh::new(quad()).with_high_detail(2, dense(64)));
    body.bones = vec![
        MemoryNode::new("hip", NodeClass::Bone),
        MemoryNode::new("chest", NodeClass::Bone),
    ];
    let scene = MemoryScene {
        name: "body".into(),
        nodes: vec![body],
    };

    let dir = TempDir::new()?;
    let out = dir.path().join("body.dbz");
    let config = ExportConfig {
        include_hd_uvs: true,
        ..Default::default()
    };
    let report = Exporter::new(config).export(&scene, &out)?;
    assert!(report.warnings.is_empty());

    let doc = read_dbz(&out)?;
    assert_eq!(doc["application"], json!("export_highdef_to_blender"));

    let record = &doc["figures"][0];
    assert_eq!(record["name"], json!("Body"));
    // Base block obtained through the toggle
    assert_eq!(record["num verts"], json!(4));
    // High-detail block captured from the live cache before the toggle
    assert_eq!(record["subd level"], json!(2));
    assert_eq!(record["hd num verts"], json!(64));
    assert_eq!(record["uv set"], json!("Base UV"));
    assert_eq!(record["hd uvs"].as_array().unwrap().len(), 64);
    assert!(record.get("hd faces").is_some());

    let bones = record["bones"].as_array().unwrap();
    assert_eq!(bones.len(), 2);
    assert_eq!(bones[0]["name"], json!("hip"));
    assert_eq!(bones[1]["name"], json!("chest"));

    // The LOD control is back at its original value
    assert_eq!(scene.nodes[0].mesh.as_ref().unwrap().lod_history(), vec![0, 2]);

    Ok(())
}

#[test]
fn test_highdef_record_without_uv_set_keeps_uv_block() -> Result<()> {
    let mut high = dense(16);
    high.uv_set = None;
    let mut body = MemoryNode::new("Body", NodeClass::Figure);
    body.mesh = Some(MemoryMesh::new(quad()).with_high_detail(1, high));
    let scene = MemoryScene {
        name: "body".into(),
        nodes: vec![body],
    };

    let dir = TempDir::new()?;
    let out = dir.path().join("body.dbz");
    let config = ExportConfig {
        include_hd_uvs: true,
        ..Default::default()
    };
    Exporter::new(config).export(&scene, &out)?;

    // Readers index "hd uvs" whenever "hd vertices" is present, so the
    // pair must exist even for a snapshot with no UV set
    let doc = read_dbz(&out)?;
    let record = &doc["figures"][0];
    assert!(record.get("hd vertices").is_some());
    assert_eq!(record["uv set"], json!(""));
    assert_eq!(record["hd uvs"], json!([]));

    Ok(())
}

#[test]
fn test_empty_scene_has_terminator_only() -> Result<()> {
    let scene = MemoryScene::default();

    let dir = TempDir::new()?;
    let out = dir.path().join("empty.dbz");
    let report = Exporter::new(ExportConfig::default()).export(&scene, &out)?;
    assert_eq!(report.figures, 0);

    let doc = read_dbz(&out)?;
    let figures = doc["figures"].as_array().unwrap();
    assert_eq!(figures.len(), 1);
    assert_eq!(figures[0], json!({"name": "dummy", "num verts": 0}));

    Ok(())
}

#[test]
fn test_lod_restored_even_when_cache_is_null() -> Result<()> {
    let mut mesh = MemoryMesh::new(quad()).with_high_detail(3, dense(27));
    mesh.caching_disabled = true;
    let mut ghost = MemoryNode::new("Ghost", NodeClass::Prop);
    ghost.mesh = Some(mesh);
    let scene = MemoryScene {
        name: "ghost".into(),
        nodes: vec![ghost],
    };

    let dir = TempDir::new()?;
    let out = dir.path().join("ghost.dbz");
    let config = ExportConfig {
        include_hd_uvs: true,
        ..Default::default()
    };
    let report = Exporter::new(config).export(&scene, &out)?;

    // Recoverable: a dummy record, warnings, and a restored control
    assert!(!report.warnings.is_empty());
    let doc = read_dbz(&out)?;
    assert_eq!(doc["figures"][0]["num verts"], json!(0));

    let mesh = scene.nodes[0].mesh.as_ref().unwrap();
    assert_eq!(mesh.lod_level(), 3);

    Ok(())
}

#[test]
fn test_declared_counts_match_arrays() -> Result<()> {
    let mut prop = MemoryNode::new("Rock", NodeClass::Prop);
    prop.mesh = Some(MemoryMesh::new(dense(12)));
    let scene = MemoryScene {
        name: "rock".into(),
        nodes: vec![prop],
    };

    let dir = TempDir::new()?;
    let out = dir.path().join("rock.dbz");
    Exporter::new(ExportConfig::default()).export(&scene, &out)?;

    let doc = read_dbz(&out)?;
    let record = &doc["figures"][0];
    let declared = record["num verts"].as_u64().unwrap() as usize;
    assert_eq!(record["vertices"].as_array().unwrap().len(), declared);

    // Values survive the text round trip
    let v0 = record["vertices"][0].as_array().unwrap();
    assert_relative_eq!(v0[0].as_f64().unwrap(), 0.5);

    Ok(())
}

#[test]
fn test_compression_fallback_commits_plain_text() -> Result<()> {
    let scene = MemoryScene::default();
    let exporter = Exporter::new(ExportConfig::default());
    let (doc, _, _) = exporter.build_document(&scene);
    let text = serde_json::to_string(&doc)?;

    let dir = TempDir::new()?;
    let out = dir.path().join("fallback.dbz");
    let compressed = commit_document(&text, &out, |_| anyhow::bail!("no archiver"))?;

    assert!(!compressed);
    // Byte-identical to the pre-compression intermediate artifact
    assert_eq!(std::fs::read_to_string(&out)?, text);
    assert!(!intermediate_path(&out).exists());

    Ok(())
}
