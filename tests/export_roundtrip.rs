// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end export tests

use anyhow::Result;
use objexport::host::{
    ElementId, FixedDestination, PromptDestination, Scene, SceneDocument, SceneElement, SceneFace,
    SceneGeometry,
};
use objexport::{export_scene, import_scene_file, ExportCommand, ExportConfig, ExportStatus};
use std::io::Cursor;
use std::path::Path;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn single_solid(faces: Vec<SceneFace>) -> Scene {
    Scene::new(SceneDocument {
        elements: vec![SceneElement::model(1, "Generic Models", vec![SceneGeometry::solid(faces)])],
        ..Default::default()
    })
}

#[test]
fn test_single_triangle_output() -> Result<()> {
    let scene = single_solid(vec![SceneFace::new(vec![[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ]])]);

    let file = NamedTempFile::with_suffix(".obj")?;
    export_scene(&scene, file.path())?;

    let text = std::fs::read_to_string(file.path())?;
    assert_eq!(text, "v 0 0 0\nv 305 0 0\nv 0 305 0\nf 1 2 3\n");
    Ok(())
}

#[test]
fn test_shared_edge_output() -> Result<()> {
    let scene = single_solid(vec![
        SceneFace::new(vec![[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]]),
        // Same corners up to floating noise well below the grid
        SceneFace::new(vec![[[1e-10, 0.0, 0.0], [1.0, 1.0 - 1e-10, 0.0], [0.0, 1.0, 0.0]]]),
    ]);

    let file = NamedTempFile::with_suffix(".obj")?;
    let report = export_scene(&scene, file.path())?;
    assert_eq!(report.vertices, 4);

    let text = std::fs::read_to_string(file.path())?;
    let vertex_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("v ")).collect();
    let face_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
    assert_eq!(vertex_lines, vec!["v 0 0 0", "v 305 0 0", "v 305 305 0", "v 0 305 0"]);
    assert_eq!(face_lines, vec!["f 1 2 3", "f 1 3 4"]);
    Ok(())
}

#[test]
fn test_line_counts_match_report() -> Result<()> {
    let scene = import_scene_file(fixture("house.json"))?;
    let file = NamedTempFile::with_suffix(".obj")?;
    let report = export_scene(&scene, file.path())?;

    let text = std::fs::read_to_string(file.path())?;
    let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
    let faces = text.lines().filter(|l| l.starts_with("f ")).count();
    assert_eq!(vertices, report.vertices);
    assert_eq!(faces, report.triangles);

    // Every face index refers to a preceding vertex line
    for line in text.lines().filter(|l| l.starts_with("f ")) {
        for index in line[2..].split_whitespace() {
            let i: usize = index.parse()?;
            assert!(i >= 1 && i <= vertices, "index {} out of range", i);
        }
    }
    Ok(())
}

#[test]
fn test_house_fixture_counts() -> Result<()> {
    let scene = import_scene_file(fixture("house.json"))?;
    let file = NamedTempFile::with_suffix(".obj")?;
    let report = export_scene(&scene, file.path())?;

    // Elements 1..5 are exportable; the type (6) and detail item (7) are not.
    assert_eq!(report.elements, 5);
    // Wall, door (via symbol), floor, plus wall and floor again through the group.
    assert_eq!(report.solids, 5);
    assert_eq!(report.faces, 2 + 1 + 1 + 2 + 1);
    assert_eq!(report.triangles, 2 + 2 + 1 + 2 + 1);
    Ok(())
}

#[test]
fn test_cancelled_creates_no_file() -> Result<()> {
    let scene = import_scene_file(fixture("house.json"))?;
    let dir = tempfile::tempdir()?;
    let config = ExportConfig {
        export_folder: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let status = ExportCommand::new(&scene, &config).execute(&mut FixedDestination::cancelled());
    assert_eq!(status, ExportStatus::Cancelled);
    assert!(std::fs::read_dir(dir.path())?.next().is_none());
    Ok(())
}

#[test]
fn test_selected_group_only() -> Result<()> {
    let mut document = import_scene_file(fixture("house.json"))?.document().clone();
    document.selection = vec![ElementId(5)];
    let scene = Scene::new(document);

    let dir = tempfile::tempdir()?;
    let config = ExportConfig {
        export_folder: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    // The interactive answer is relative to the offered folder
    let mut shown: Vec<u8> = Vec::new();
    let mut picker = PromptDestination::new(Cursor::new("group.obj\n"), &mut shown);
    let status = ExportCommand::new(&scene, &config).execute(&mut picker);

    match status {
        ExportStatus::Succeeded(report) => {
            assert_eq!(report.elements, 1);
            assert_eq!(report.solids, 2);
            assert!(dir.path().join("group.obj").exists());
        }
        other => panic!("expected success, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_failure_reports_message() -> Result<()> {
    let scene = Scene::new(SceneDocument {
        elements: vec![SceneElement::group(1, &[2])],
        ..Default::default()
    });
    let dir = tempfile::tempdir()?;
    let config = ExportConfig::default();

    let status = ExportCommand::new(&scene, &config)
        .execute(&mut FixedDestination::new(dir.path().join("broken.obj")));
    assert_eq!(status, ExportStatus::Failed("element 2 not found in model".to_string()));
    assert!(!dir.path().join("broken.obj").exists());
    Ok(())
}
