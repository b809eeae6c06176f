// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vertex deduplication table

use super::Point3I;
use ahash::AHashMap;

/// Deduplicates quantized points into a dense, insertion-ordered index set.
///
/// Indices start at 0 and grow by one per distinct point. A point keeps the
/// index it was first given for the lifetime of the table.
#[derive(Debug, Clone, Default)]
pub struct VertexTable {
    index: AHashMap<Point3I, usize>,
    points: Vec<Point3I>,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `p`, inserting it if it has not been seen.
    pub fn add_vertex(&mut self, p: Point3I) -> usize {
        if let Some(&i) = self.index.get(&p) {
            return i;
        }
        let i = self.points.len();
        self.index.insert(p, i);
        self.points.push(p);
        i
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Point3I> + '_ {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a VertexTable {
    type Item = &'a Point3I;
    type IntoIter = std::slice::Iter<'a, Point3I>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
