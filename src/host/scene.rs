// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-memory host document
//!
//! A `Scene` stands in for the CAD application: it answers element lookups,
//! classification and geometry queries from a JSON document. Coordinates are
//! in feet, matching the quantizer's source unit.

use super::{
    Color, ElementClass, ElementId, GeometryObject, GeometryOptions, GeometrySource, HostResult,
    ModelSource, Triangle3,
};
use crate::error::HostError;
use ahash::AHashMap;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized form of a scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Definition geometry referenced by instances, keyed by symbol name.
    #[serde(default)]
    pub symbols: BTreeMap<String, Vec<SceneGeometry>>,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    #[serde(default)]
    pub selection: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: ElementId,
    #[serde(default)]
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    pub id: ElementId,
    #[serde(default)]
    pub category: Option<String>,
    /// Type (definition) elements are never exported directly.
    #[serde(default)]
    pub element_type: bool,
    #[serde(default)]
    pub view_specific: bool,
    #[serde(flatten)]
    pub body: ElementBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementBody {
    Group {
        members: Vec<ElementId>,
    },
    Model {
        #[serde(default)]
        geometry: Vec<SceneGeometry>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGeometry {
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(flatten)]
    pub shape: SceneShape,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneShape {
    Solid {
        #[serde(default)]
        faces: Vec<SceneFace>,
    },
    Mesh {
        #[serde(default)]
        triangles: Vec<[[f64; 3]; 3]>,
    },
    Instance {
        symbol: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFace {
    #[serde(default)]
    pub material: Option<ElementId>,
    /// Pre-computed triangulation, one `[x, y, z]` triple per corner.
    #[serde(default)]
    pub triangles: Vec<[[f64; 3]; 3]>,
}

impl SceneFace {
    pub fn new(triangles: Vec<[[f64; 3]; 3]>) -> Self {
        Self {
            material: None,
            triangles,
        }
    }
}

impl SceneGeometry {
    pub fn solid(faces: Vec<SceneFace>) -> Self {
        Self {
            visible: true,
            shape: SceneShape::Solid { faces },
        }
    }

    pub fn instance(symbol: impl Into<String>) -> Self {
        Self {
            visible: true,
            shape: SceneShape::Instance {
                symbol: symbol.into(),
            },
        }
    }

    pub fn mesh() -> Self {
        Self {
            visible: true,
            shape: SceneShape::Mesh {
                triangles: Vec::new(),
            },
        }
    }
}

impl SceneElement {
    pub fn model(id: i64, category: &str, geometry: Vec<SceneGeometry>) -> Self {
        Self {
            id: ElementId(id),
            category: Some(category.to_string()),
            element_type: false,
            view_specific: false,
            body: ElementBody::Model { geometry },
        }
    }

    pub fn group(id: i64, members: &[i64]) -> Self {
        Self {
            id: ElementId(id),
            category: Some("Groups".to_string()),
            element_type: false,
            view_specific: false,
            body: ElementBody::Group {
                members: members.iter().copied().map(ElementId).collect(),
            },
        }
    }
}

/// Indexed, queryable host document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SceneDocument", into = "SceneDocument")]
pub struct Scene {
    document: SceneDocument,
    elements: AHashMap<ElementId, usize>,
    materials: AHashMap<ElementId, usize>,
}

impl From<SceneDocument> for Scene {
    fn from(document: SceneDocument) -> Self {
        let elements = document
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect();
        let materials = document
            .materials
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();
        Self {
            document,
            elements,
            materials,
        }
    }
}

impl From<Scene> for SceneDocument {
    fn from(scene: Scene) -> Self {
        scene.document
    }
}

impl Scene {
    pub fn new(document: SceneDocument) -> Self {
        document.into()
    }

    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    pub fn get(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(&id).map(|&i| &self.document.elements[i])
    }

    pub fn material(&self, id: ElementId) -> Option<&Material> {
        self.materials.get(&id).map(|&i| &self.document.materials[i])
    }

    fn classify_objects<'a>(
        objects: &'a [SceneGeometry],
        options: &GeometryOptions,
    ) -> Vec<GeometryObject<&'a [SceneFace], &'a str>> {
        objects
            .iter()
            .filter(|g| g.visible || options.include_non_visible)
            .map(|g| match &g.shape {
                SceneShape::Solid { faces } => GeometryObject::Solid(faces.as_slice()),
                SceneShape::Mesh { .. } => GeometryObject::Mesh,
                SceneShape::Instance { symbol } => GeometryObject::Instance(symbol.as_str()),
            })
            .collect()
    }
}

impl ModelSource for Scene {
    type Element<'a> = &'a SceneElement;

    fn element(&self, id: ElementId) -> HostResult<Option<&SceneElement>> {
        Ok(self.get(id))
    }

    fn classify(&self, element: &&SceneElement) -> HostResult<ElementClass> {
        Ok(match (&element.body, &element.category) {
            (ElementBody::Group { members }, _) => ElementClass::Group(members.clone()),
            (ElementBody::Model { .. }, Some(category)) => {
                ElementClass::Categorized(category.clone())
            }
            (ElementBody::Model { .. }, None) => ElementClass::Uncategorized,
        })
    }

    fn selection(&self) -> HostResult<Vec<ElementId>> {
        Ok(self.document.selection.clone())
    }

    fn element_ids(&self) -> HostResult<Vec<ElementId>> {
        Ok(self.document.elements.iter().map(|e| e.id).collect())
    }

    fn is_exportable(&self, element: &&SceneElement) -> bool {
        !element.element_type && !element.view_specific
    }
}

impl GeometrySource for Scene {
    type Solid<'a> = &'a [SceneFace];
    type Face<'a> = &'a SceneFace;
    type Instance<'a> = &'a str;

    fn geometry<'a>(
        &'a self,
        element: &&'a SceneElement,
        options: &GeometryOptions,
    ) -> HostResult<Vec<GeometryObject<&'a [SceneFace], &'a str>>> {
        match &element.body {
            ElementBody::Model { geometry } => Ok(Self::classify_objects(geometry, options)),
            ElementBody::Group { .. } => Ok(Vec::new()),
        }
    }

    fn symbol_geometry<'a>(
        &'a self,
        instance: &&'a str,
        options: &GeometryOptions,
    ) -> HostResult<Vec<GeometryObject<&'a [SceneFace], &'a str>>> {
        let objects = self
            .document
            .symbols
            .get(*instance)
            .ok_or_else(|| HostError::new(format!("unknown symbol '{}'", instance)))?;
        Ok(Self::classify_objects(objects, options))
    }

    fn faces<'a>(&'a self, solid: &&'a [SceneFace]) -> HostResult<Vec<&'a SceneFace>> {
        Ok(solid.iter().collect())
    }

    fn face_count<'a>(&'a self, solid: &&'a [SceneFace]) -> HostResult<usize> {
        Ok(solid.len())
    }

    fn triangulate<'a>(&'a self, face: &&'a SceneFace) -> HostResult<Vec<Triangle3>> {
        face.triangles
            .iter()
            .map(|corners| {
                if corners.iter().flatten().any(|c| !c.is_finite()) {
                    return Err(HostError::new(
                        "face triangulation produced a non-finite coordinate",
                    ));
                }
                Ok(corners.map(|[x, y, z]| Point3::new(x, y, z)))
            })
            .collect()
    }

    fn face_color<'a>(&'a self, face: &&'a SceneFace) -> HostResult<Option<Color>> {
        Ok(face
            .material
            .and_then(|id| self.material(id))
            .map(|m| m.color))
    }
}
