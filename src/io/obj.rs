// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ writer
//!
//! Output is a vertex block (`v x y z`, integer millimeters, table order)
//! followed by a face block (`f i j k`, 1-based). No header or trailer.

use crate::geometry::{Point3I, TriangleBuffer, VertexTable};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write vertices then triangles to `writer` in a single forward pass.
pub fn write_obj<'a, W, V, T>(writer: &mut W, vertices: V, triangles: T) -> io::Result<()>
where
    W: Write,
    V: IntoIterator<Item = &'a Point3I>,
    T: IntoIterator<Item = [usize; 3]>,
{
    for p in vertices {
        writeln!(writer, "v {}", p)?;
    }
    // OBJ uses 1-based indexing
    for [i, j, k] in triangles {
        writeln!(writer, "f {} {} {}", i + 1, j + 1, k + 1)?;
    }
    Ok(())
}

/// Export an indexed mesh to an OBJ file at `path`.
///
/// The file is closed when this returns, whether or not writing succeeded.
pub fn export_obj(
    path: impl AsRef<Path>,
    vertices: &VertexTable,
    triangles: &TriangleBuffer,
) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_obj(&mut writer, vertices, triangles.triangles())?;
    writer.flush()
}
