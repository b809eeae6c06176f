// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export configuration
//!
//! Stored as TOML, by default in `{config_dir}/objexport/config.toml`.

use crate::export::ExportReport;
use crate::host::GeometryOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for an export invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Folder offered to the destination picker; the last one used when saved back.
    pub export_folder: Option<PathBuf>,
    /// Ask the geometry collaborator for hidden objects too.
    pub include_non_visible: bool,
}

impl ExportConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("objexport").join("config.toml"))
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ExportConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `path` (or the default file) if it exists, else defaults.
    ///
    /// This is the stored configuration only; see [`Self::with_env_overrides`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        match path {
            Some(ref p) if p.exists() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }

    /// Apply `OBJEXPORT_FOLDER` and `OBJEXPORT_INCLUDE_NON_VISIBLE` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(folder) = var("OBJEXPORT_FOLDER") {
            self.export_folder = Some(PathBuf::from(folder));
        }

        if let Some(hidden) = var("OBJEXPORT_INCLUDE_NON_VISIBLE") {
            self.include_non_visible = hidden.parse().unwrap_or(false);
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Folder to offer first: the configured one, else the system temp dir.
    pub fn initial_folder(&self) -> PathBuf {
        self.export_folder.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn geometry_options(&self) -> GeometryOptions {
        GeometryOptions {
            include_non_visible: self.include_non_visible,
        }
    }

    /// Remember the folder of a successful export for next time.
    pub fn remember_destination(&mut self, report: &ExportReport) {
        if !report.folder.as_os_str().is_empty() {
            self.export_folder = Some(report.folder.clone());
        }
    }
}
