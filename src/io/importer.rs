// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene file importer

use crate::host::Scene;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Import a JSON scene document
pub fn import_scene_file(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

    Scene::from_json(&source)
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))
}
