// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - quantized points and indexed mesh buffers

mod point;
mod triangle_buffer;
mod vertex_table;

pub use point::{quantize, Point3I, FEET_TO_MM};
pub use triangle_buffer::TriangleBuffer;
pub use vertex_table::VertexTable;
