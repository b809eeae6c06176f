// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Recursive traversal of the element hierarchy

use super::FaceEmitter;
use crate::error::{ExportError, Result};
use crate::host::{ElementClass, GeometryObject, GeometryOptions, GeometrySource};
use tracing::{debug, trace};

/// Element and solid totals of one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub elements: usize,
    pub solids: usize,
}

/// Walks groups and elements, resolves one solid per element and feeds its
/// faces to a [`FaceEmitter`].
pub struct GeometryWalker<'h, H: GeometrySource> {
    host: &'h H,
    options: GeometryOptions,
}

type Objects<'h, H> =
    Vec<GeometryObject<<H as GeometrySource>::Solid<'h>, <H as GeometrySource>::Instance<'h>>>;

impl<'h, H: GeometrySource> GeometryWalker<'h, H> {
    pub fn new(host: &'h H, options: GeometryOptions) -> Self {
        Self { host, options }
    }

    /// Export each top-level element in order.
    pub fn export_elements<E>(
        &self,
        emitter: &mut E,
        elements: &[H::Element<'h>],
    ) -> Result<WalkSummary>
    where
        E: FaceEmitter<H::Face<'h>>,
    {
        let mut summary = WalkSummary::default();
        for element in elements {
            summary.elements += 1;
            summary.solids += self.export_element(emitter, element)?;
        }
        Ok(summary)
    }

    /// Export one element and return the number of solids processed.
    ///
    /// Groups return the sum over their members; other elements return 0 or 1.
    pub fn export_element<E>(&self, emitter: &mut E, element: &H::Element<'h>) -> Result<usize>
    where
        E: FaceEmitter<H::Face<'h>>,
    {
        let category = match self.host.classify(element)? {
            ElementClass::Group(members) => {
                let mut n = 0;
                for id in members {
                    let member = self
                        .host
                        .element(id)?
                        .ok_or(ExportError::MissingElement(id))?;
                    n += self.export_element(emitter, &member)?;
                }
                return Ok(n);
            }
            ElementClass::Uncategorized => return Ok(0),
            ElementClass::Categorized(category) => category,
        };

        let Some(solid) = self.find_solid(element)? else {
            trace!(%category, "no solid with faces");
            return Ok(0);
        };

        let faces = self.host.faces(&solid)?;
        debug!(%category, faces = faces.len(), "exporting solid");
        for face in &faces {
            let color = self.host.face_color(face)?;
            emitter.emit_face(face, color)?;
        }
        Ok(1)
    }

    /// Resolve the element's representative solid.
    ///
    /// The first solid with at least one face among the element's own
    /// geometry wins. Failing that, the geometry of the last instance seen
    /// is searched the same way.
    pub fn find_solid(&self, element: &H::Element<'h>) -> Result<Option<H::Solid<'h>>> {
        let objects = self.host.geometry(element, &self.options)?;
        let (solid, instance) = self.first_solid(objects)?;
        if solid.is_some() {
            return Ok(solid);
        }

        match instance {
            Some(instance) => {
                let symbol = self.host.symbol_geometry(&instance, &self.options)?;
                Ok(self.first_solid(symbol)?.0)
            }
            None => Ok(None),
        }
    }

    fn first_solid(
        &self,
        objects: Objects<'h, H>,
    ) -> Result<(Option<H::Solid<'h>>, Option<H::Instance<'h>>)> {
        let mut instance = None;
        for object in objects {
            match object {
                GeometryObject::Solid(solid) => {
                    if self.host.face_count(&solid)? > 0 {
                        return Ok((Some(solid), instance));
                    }
                }
                GeometryObject::Instance(i) => instance = Some(i),
                GeometryObject::Mesh => {}
            }
        }
        Ok((None, instance))
    }
}
