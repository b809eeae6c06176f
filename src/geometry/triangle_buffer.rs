// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat triangle index buffer

/// Flat sequence of vertex indices, three per triangle, in source winding order.
#[derive(Debug, Clone, Default)]
pub struct TriangleBuffer {
    indices: Vec<usize>,
}

impl TriangleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(&mut self, i: usize, j: usize, k: usize) {
        self.indices.extend_from_slice(&[i, j, k]);
    }

    /// Total number of indices stored.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Index triples in insertion order.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}
