// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the export pipeline

use crate::host::ElementId;
use thiserror::Error;

/// Failure reported by a host collaborator (model or geometry lookup).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that abort an export run
#[derive(Debug, Error)]
pub enum ExportError {
    /// The model or geometry collaborator failed during traversal.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// A group references an element the model cannot resolve.
    #[error("element {0} not found in model")]
    MissingElement(ElementId),

    /// Running counters disagree with the buffers they describe.
    #[error("internal inconsistency: {what} is {counted} but buffer holds {stored}")]
    Inconsistent {
        what: &'static str,
        counted: usize,
        stored: usize,
    },

    /// A coordinate does not fit on the integer millimeter grid.
    #[error("coordinate ({x}, {y}, {z}) ft is outside the representable millimeter range")]
    OutOfRange { x: f64, y: f64, z: f64 },

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
