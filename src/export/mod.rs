// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export pipeline - traversal, face emission and the export command

mod command;
mod emitter;
mod walker;

pub use command::{ExportCommand, ExportReport, ExportStatus};
pub use emitter::{ExportStats, FaceEmitter, MeshEmitter};
pub use walker::{GeometryWalker, WalkSummary};
