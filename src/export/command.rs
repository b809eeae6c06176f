// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export command - element collection, destination selection and the
//! traverse-then-serialize run

use super::{ExportStats, GeometryWalker, MeshEmitter, WalkSummary};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::geometry::{TriangleBuffer, VertexTable};
use crate::host::{DestinationPicker, GeometryOptions, GeometrySource};
use crate::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of one export invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Succeeded(ExportReport),
    /// Destination selection was aborted; nothing was written.
    Cancelled,
    Failed(String),
}

/// What a successful export wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    /// Folder of the written file, for the caller to offer next time.
    pub folder: PathBuf,
    pub elements: usize,
    pub solids: usize,
    pub faces: usize,
    pub triangles: usize,
    pub vertices: usize,
}

impl ExportReport {
    fn new(path: &Path, walk: WalkSummary, stats: ExportStats) -> Self {
        Self {
            path: path.to_path_buf(),
            folder: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            elements: walk.elements,
            solids: walk.solids,
            faces: stats.faces,
            triangles: stats.triangles,
            vertices: stats.vertices,
        }
    }
}

/// One export invocation against a host document
pub struct ExportCommand<'h, H: GeometrySource> {
    host: &'h H,
    options: GeometryOptions,
    initial_folder: PathBuf,
}

impl<'h, H: GeometrySource> ExportCommand<'h, H> {
    pub fn new(host: &'h H, config: &ExportConfig) -> Self {
        Self {
            host,
            options: config.geometry_options(),
            initial_folder: config.initial_folder(),
        }
    }

    /// Run the whole command: collect elements, ask for a destination,
    /// traverse and write the OBJ file.
    pub fn execute(&self, picker: &mut dyn DestinationPicker) -> ExportStatus {
        let elements = match self.collect_elements() {
            Ok(elements) => elements,
            Err(e) => return self.failed(e.to_string()),
        };

        let path = match picker.pick(&self.initial_folder) {
            Ok(Some(path)) => path,
            Ok(None) => {
                info!("export cancelled at destination selection");
                return ExportStatus::Cancelled;
            }
            Err(e) => return self.failed(e.to_string()),
        };

        match self.export_to(&elements, &path) {
            Ok(report) => ExportStatus::Succeeded(report),
            Err(e) => self.failed(e.to_string()),
        }
    }

    /// Collect elements and export them to `path` without asking for a destination.
    pub fn run_to(&self, path: &Path) -> Result<ExportReport> {
        let elements = self.collect_elements()?;
        self.export_to(&elements, path)
    }

    /// Traverse without writing a file.
    pub fn survey(&self) -> Result<(WalkSummary, ExportStats)> {
        let elements = self.collect_elements()?;
        let (_, _, walk, stats) = self.build(&elements)?;
        Ok((walk, stats))
    }

    /// The selected elements if anything is selected, otherwise the whole
    /// document; element types and view-specific elements are dropped.
    pub fn collect_elements(&self) -> Result<Vec<H::Element<'h>>> {
        let mut ids = self.host.selection()?;
        if ids.is_empty() {
            ids = self.host.element_ids()?;
        }

        let mut elements = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(element) = self.host.element(id)? else {
                return Err(ExportError::MissingElement(id));
            };
            if self.host.is_exportable(&element) {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    fn export_to(&self, elements: &[H::Element<'h>], path: &Path) -> Result<ExportReport> {
        let (vertices, triangles, walk, stats) = self.build(elements)?;
        io::export_obj(path, &vertices, &triangles)?;

        info!(
            path = %path.display(),
            elements = walk.elements,
            solids = walk.solids,
            faces = stats.faces,
            triangles = stats.triangles,
            vertices = stats.vertices,
            "OBJ export complete"
        );
        Ok(ExportReport::new(path, walk, stats))
    }

    fn build(
        &self,
        elements: &[H::Element<'h>],
    ) -> Result<(VertexTable, TriangleBuffer, WalkSummary, ExportStats)> {
        let walker = GeometryWalker::new(self.host, self.options);
        let mut emitter = MeshEmitter::new(self.host);
        let walk = walker.export_elements(&mut emitter, elements)?;
        let (vertices, triangles, stats) = emitter.finish()?;
        Ok((vertices, triangles, walk, stats))
    }

    fn failed(&self, message: String) -> ExportStatus {
        warn!(error = %message, "export failed");
        ExportStatus::Failed(message)
    }
}
