// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - scene import and OBJ export

mod importer;
mod obj;

pub use importer::import_scene_file;
pub use obj::{export_obj, write_obj};
