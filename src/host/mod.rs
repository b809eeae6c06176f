// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Host collaborators - the model, geometry and destination interfaces the
//! exporter consumes, plus an in-memory host implementation.

mod picker;
mod scene;

pub use picker::{FixedDestination, PromptDestination};
pub use scene::{
    ElementBody, Material, Scene, SceneDocument, SceneElement, SceneFace, SceneGeometry, SceneShape,
};

use crate::error::HostError;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Result returned by host collaborators
pub type HostResult<T> = std::result::Result<T, HostError>;

/// One triangle of a face triangulation, in source units (feet).
pub type Triangle3 = [Point3<f64>; 3];

/// Identifier of an element in the host model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the model classifies an element, resolved once per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementClass {
    /// Group or assembly whose members are exported recursively.
    Group(Vec<ElementId>),
    /// Element with a category; may carry solid geometry.
    Categorized(String),
    /// Element without a category; never exported.
    Uncategorized,
}

/// Geometry object returned by a geometry query.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryObject<S, I> {
    Solid(S),
    /// Tessellated mesh; never treated as a solid.
    Mesh,
    /// Reference to a definition whose own geometry can be queried.
    Instance(I),
}

/// Material color. Carried to the emitter but not written to OBJ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Options forwarded to every geometry query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryOptions {
    pub include_non_visible: bool,
}

/// Model collaborator: element lookup and classification.
pub trait ModelSource {
    type Element<'a>
    where
        Self: 'a;

    /// Look up an element; `None` if the id is unknown.
    fn element(&self, id: ElementId) -> HostResult<Option<Self::Element<'_>>>;

    fn classify(&self, element: &Self::Element<'_>) -> HostResult<ElementClass>;

    /// Currently selected element ids, in selection order.
    fn selection(&self) -> HostResult<Vec<ElementId>>;

    /// Every element id in the document.
    fn element_ids(&self) -> HostResult<Vec<ElementId>>;

    /// False for element types and view-specific elements.
    fn is_exportable(&self, element: &Self::Element<'_>) -> bool;
}

/// Geometry collaborator: solids, faces, triangulation and materials.
pub trait GeometrySource: ModelSource {
    type Solid<'a>
    where
        Self: 'a;
    type Face<'a>
    where
        Self: 'a;
    type Instance<'a>
    where
        Self: 'a;

    fn geometry<'a>(
        &'a self,
        element: &Self::Element<'a>,
        options: &GeometryOptions,
    ) -> HostResult<Vec<GeometryObject<Self::Solid<'a>, Self::Instance<'a>>>>;

    /// Geometry of the definition an instance refers to.
    fn symbol_geometry<'a>(
        &'a self,
        instance: &Self::Instance<'a>,
        options: &GeometryOptions,
    ) -> HostResult<Vec<GeometryObject<Self::Solid<'a>, Self::Instance<'a>>>>;

    /// Faces of a solid in the kernel's native order.
    fn faces<'a>(&'a self, solid: &Self::Solid<'a>) -> HostResult<Vec<Self::Face<'a>>>;

    fn face_count<'a>(&'a self, solid: &Self::Solid<'a>) -> HostResult<usize> {
        Ok(self.faces(solid)?.len())
    }

    fn triangulate<'a>(&'a self, face: &Self::Face<'a>) -> HostResult<Vec<Triangle3>>;

    /// Color of the face's material, if it has one.
    fn face_color<'a>(&'a self, face: &Self::Face<'a>) -> HostResult<Option<Color>>;
}

/// Destination-selection collaborator.
pub trait DestinationPicker {
    /// Ask for an output path starting in `initial_folder`; `None` means cancelled.
    fn pick(&mut self, initial_folder: &Path) -> std::io::Result<Option<PathBuf>>;
}
