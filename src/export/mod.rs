// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Export subsystem - traversal, document assembly, and commit

mod commit;
mod document;
mod exporter;
mod figure;
mod geometry;
mod lod;
mod node;

pub use commit::{commit_document, gzip_compress, intermediate_path};
pub use document::{
    to_text, DocumentBuilder, APPLICATION_BASIC, APPLICATION_HIGHDEF, FORMAT_VERSION,
};
pub use exporter::{ExportConfig, ExportReport, Exporter};
pub use figure::figure_record;
pub use geometry::Resolution;
pub use lod::{capture_high_detail, LodGuard};
