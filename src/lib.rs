// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe OBJ exporter
//!
//! Reduces a host model's boundary-representation geometry (solids made of
//! faces, nested in groups and instances) to an indexed triangle mesh with
//! integer-millimeter vertices, and writes it as a plain-text OBJ file.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod host;
pub mod io;

pub use config::ExportConfig;
pub use error::{ExportError, HostError};
pub use export::{
    ExportCommand, ExportReport, ExportStatus, FaceEmitter, GeometryWalker, MeshEmitter,
};
pub use geometry::{quantize, Point3I, TriangleBuffer, VertexTable, FEET_TO_MM};
pub use host::{DestinationPicker, GeometrySource, ModelSource, Scene};
pub use io::{export_obj, import_scene_file, write_obj};

/// Export every element of a scene to `path`, bypassing destination selection.
pub fn export_scene(scene: &Scene, path: &std::path::Path) -> Result<ExportReport, ExportError> {
    let config = ExportConfig::default();
    ExportCommand::new(scene, &config).run_to(path)
}
