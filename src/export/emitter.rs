// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face emission into an indexed mesh

use crate::error::{ExportError, Result};
use crate::geometry::{Point3I, TriangleBuffer, VertexTable};
use crate::host::{Color, GeometrySource};
use nalgebra::Point3;
use tracing::trace;

/// Sink the traversal feeds one face at a time.
pub trait FaceEmitter<F> {
    /// Emit a face and return the number of triangles it produced.
    ///
    /// `color` is accepted for callers that carry material data; it does not
    /// reach the OBJ output.
    fn emit_face(&mut self, face: &F, color: Option<Color>) -> Result<usize>;

    fn face_count(&self) -> usize;

    fn triangle_count(&self) -> usize;

    fn vertex_count(&self) -> usize;
}

/// Final counters of an export run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub faces: usize,
    pub triangles: usize,
    pub vertices: usize,
}

/// Emitter that triangulates faces through the geometry collaborator,
/// quantizes and deduplicates the corners, and records index triples.
pub struct MeshEmitter<'h, H: GeometrySource> {
    host: &'h H,
    vertices: VertexTable,
    triangles: TriangleBuffer,
    face_count: usize,
    triangle_count: usize,
}

impl<'h, H: GeometrySource> MeshEmitter<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            vertices: VertexTable::new(),
            triangles: TriangleBuffer::new(),
            face_count: 0,
            triangle_count: 0,
        }
    }

    pub fn vertices(&self) -> &VertexTable {
        &self.vertices
    }

    pub fn triangles(&self) -> &TriangleBuffer {
        &self.triangles
    }

    /// Check the running counters against the buffers.
    pub fn verify(&self) -> Result<ExportStats> {
        let stored = self.triangles.len();
        if stored % 3 != 0 || stored / 3 != self.triangle_count {
            return Err(ExportError::Inconsistent {
                what: "triangle index count",
                counted: self.triangle_count * 3,
                stored,
            });
        }
        Ok(ExportStats {
            faces: self.face_count,
            triangles: self.triangle_count,
            vertices: self.vertices.len(),
        })
    }

    /// Consume the emitter, yielding the mesh buffers after verification.
    pub fn finish(self) -> Result<(VertexTable, TriangleBuffer, ExportStats)> {
        let stats = self.verify()?;
        Ok((self.vertices, self.triangles, stats))
    }
}

fn quantize_corner(p: &Point3<f64>) -> Result<Point3I> {
    Point3I::from_feet(p).ok_or(ExportError::OutOfRange {
        x: p.x,
        y: p.y,
        z: p.z,
    })
}

impl<'h, H: GeometrySource> FaceEmitter<H::Face<'h>> for MeshEmitter<'h, H> {
    fn emit_face(&mut self, face: &H::Face<'h>, _color: Option<Color>) -> Result<usize> {
        self.face_count += 1;
        let mesh = self.host.triangulate(face)?;
        let n = mesh.len();
        trace!(triangles = n, "face triangulated");

        for [a, b, c] in mesh {
            let corners = [quantize_corner(&a)?, quantize_corner(&b)?, quantize_corner(&c)?];
            self.triangle_count += 1;
            let [i, j, k] = corners.map(|p| self.vertices.add_vertex(p));
            self.triangles.add_triangle(i, j, k);
        }

        Ok(n)
    }

    fn face_count(&self) -> usize {
        self.face_count
    }

    fn triangle_count(&self) -> usize {
        let n = self.triangles.len();
        debug_assert_eq!(n % 3, 0, "expected a multiple of 3");
        debug_assert_eq!(self.triangle_count, n / 3, "expected equal triangle count");
        self.triangle_count
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Scene, SceneFace};

    fn face(triangles: Vec<[[f64; 3]; 3]>) -> SceneFace {
        SceneFace::new(triangles)
    }

    #[test]
    fn test_single_triangle() {
        let scene = Scene::default();
        let f = face(vec![[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        let mut emitter = MeshEmitter::new(&scene);

        assert_eq!(emitter.emit_face(&&f, None).unwrap(), 1);
        assert_eq!(emitter.face_count(), 1);
        assert_eq!(emitter.triangle_count(), 1);
        assert_eq!(emitter.vertex_count(), 3);

        let points: Vec<Point3I> = emitter.vertices().iter().copied().collect();
        assert_eq!(
            points,
            vec![Point3I::new(0, 0, 0), Point3I::new(305, 0, 0), Point3I::new(0, 305, 0)]
        );
        assert_eq!(emitter.triangles().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_shared_edge_dedups() {
        let scene = Scene::default();
        let a = face(vec![[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]]);
        let b = face(vec![[[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]]);
        let mut emitter = MeshEmitter::new(&scene);

        emitter.emit_face(&&a, None).unwrap();
        emitter.emit_face(&&b, Some(Color::new(255, 0, 0))).unwrap();

        assert_eq!(emitter.face_count(), 2);
        assert_eq!(emitter.vertex_count(), 4);
        assert_eq!(emitter.triangles().as_slice(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_empty_face_still_counts() {
        let scene = Scene::default();
        let empty = face(Vec::new());
        let mut emitter = MeshEmitter::new(&scene);

        assert_eq!(emitter.emit_face(&&empty, None).unwrap(), 0);
        assert_eq!(emitter.face_count(), 1);
        assert_eq!(emitter.triangle_count(), 0);
    }

    #[test]
    fn test_verify_reports_stats() {
        let scene = Scene::default();
        let f = face(vec![
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ]);
        let mut emitter = MeshEmitter::new(&scene);
        emitter.emit_face(&&f, None).unwrap();

        let stats = emitter.verify().unwrap();
        assert_eq!(
            stats,
            ExportStats {
                faces: 1,
                triangles: 2,
                vertices: 4
            }
        );
    }

    #[test]
    fn test_verify_detects_divergence() {
        let scene = Scene::default();
        let mut emitter = MeshEmitter::new(&scene);
        emitter.triangle_count = 1;

        assert!(matches!(
            emitter.verify(),
            Err(ExportError::Inconsistent { counted: 3, stored: 0, .. })
        ));
    }

    #[test]
    fn test_triangulation_error_propagates() {
        let scene = Scene::default();
        let bad = face(vec![[[f64::INFINITY, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        let mut emitter = MeshEmitter::new(&scene);

        assert!(matches!(emitter.emit_face(&&bad, None), Err(ExportError::Host(_))));
        assert_eq!(emitter.face_count(), 1);
        assert_eq!(emitter.triangle_count(), 0);
    }

    #[test]
    fn test_far_coordinates_keep_separate_vertices() {
        let scene = Scene::default();
        let f = face(vec![[[1e7, 0.0, 0.0], [2e7, 0.0, 0.0], [2e7, 1.0, 0.0]]]);
        let mut emitter = MeshEmitter::new(&scene);

        emitter.emit_face(&&f, None).unwrap();
        assert_eq!(emitter.vertex_count(), 3);
    }

    #[test]
    fn test_unrepresentable_coordinate_fails() {
        let scene = Scene::default();
        let f = face(vec![[[0.0, 0.0, 0.0], [1e17, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        let mut emitter = MeshEmitter::new(&scene);

        let err = emitter.emit_face(&&f, None).unwrap_err();
        assert!(matches!(err, ExportError::OutOfRange { y, .. } if y == 0.0));
        assert_eq!(emitter.triangle_count(), 0);
        assert_eq!(emitter.vertex_count(), 0);
        assert!(emitter.verify().is_ok());
    }
}
