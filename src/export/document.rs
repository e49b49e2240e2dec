// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Document assembler - envelope, figure list, and terminator record

use anyhow::Result;
use serde_json::{json, Map, Value};

/// Application tag of the base-resolution document variant
pub const APPLICATION_BASIC: &str = "export_to_blender";
/// Application tag of the high-definition document variant
pub const APPLICATION_HIGHDEF: &str = "export_highdef_to_blender";
/// Format version carried in the envelope
pub const FORMAT_VERSION: f64 = 1.0;

/// Accumulates figure records under the document envelope.
///
/// Downstream parsers stop at the first zero-vertex entry rather than
/// relying on strict array syntax, so `finish` always appends the
/// "dummy" terminator record after the real ones.
pub struct DocumentBuilder {
    application: &'static str,
    figures: Vec<Value>,
}

impl DocumentBuilder {
    pub fn new(highdef: bool) -> Self {
        Self {
            application: if highdef {
                APPLICATION_HIGHDEF
            } else {
                APPLICATION_BASIC
            },
            figures: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: Map<String, Value>) {
        self.figures.push(Value::Object(record));
    }

    pub fn record_count(&self) -> usize {
        self.figures.len()
    }

    /// Fixed zero-vertex record marking the end of the figure list
    pub fn terminator_record() -> Value {
        json!({ "name": "dummy", "num verts": 0 })
    }

    /// Seal the document: envelope fields first, then the figure list
    /// with its terminator
    pub fn finish(mut self) -> Value {
        self.figures.push(Self::terminator_record());
        let mut root = Map::new();
        root.insert(
            "application".into(),
            Value::String(self.application.to_string()),
        );
        root.insert("version".into(), json!(FORMAT_VERSION));
        root.insert("figures".into(), Value::Array(self.figures));
        Value::Object(root)
    }
}

/// Serialize the document tree once, compactly. Numbers use
/// serde_json's shortest round-trip formatting.
pub fn to_text(document: &Value) -> Result<String> {
    Ok(serde_json::to_string(document)?)
}
