// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Render settings.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. JSON config file (`--config`, `CAREPATH_CONFIG`)
//! 3. Command-line flags and their environment variables

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::format::{
    DotOptions, FlowchartOptions, Orientation, DEFAULT_DOT_WRAP, DEFAULT_EDGE_LABEL_MAX,
    DEFAULT_NODE_LABEL_MAX, DEFAULT_NOTE_MAX,
};
use crate::layout::{RegionPolicy, SynthesisOptions};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config value for {field}: must be at least {min}")]
    TooSmall { field: &'static str, min: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub orientation: Orientation,
    pub include_styling: bool,
    pub region_policy: RegionPolicy,
    /// Maximum characters in a flowchart node label.
    pub node_label_max: usize,
    /// Maximum characters in a flowchart edge label.
    pub edge_label_max: usize,
    /// Maximum characters in a notes legend entry.
    pub note_max: usize,
    /// Characters per line in digraph labels.
    pub dot_wrap: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            include_styling: true,
            region_policy: RegionPolicy::default(),
            node_label_max: DEFAULT_NODE_LABEL_MAX,
            edge_label_max: DEFAULT_EDGE_LABEL_MAX,
            note_max: DEFAULT_NOTE_MAX,
            dot_wrap: DEFAULT_DOT_WRAP,
        }
    }
}

impl RenderConfig {
    /// Reads a config file. Fields it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw).map_err(|err| match err {
            ConfigError::Json { source, .. } => ConfigError::Json {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded render config");
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(raw).map_err(|source| ConfigError::Json {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Shorter budgets leave no room for a character before the ellipsis.
        let limits = [
            ("node_label_max", self.node_label_max, 4),
            ("edge_label_max", self.edge_label_max, 4),
            ("note_max", self.note_max, 4),
            ("dot_wrap", self.dot_wrap, 1),
        ];
        for (field, value, min) in limits {
            if value < min {
                return Err(ConfigError::TooSmall { field, min });
            }
        }
        Ok(())
    }

    pub fn synthesis(&self) -> SynthesisOptions {
        SynthesisOptions {
            region_policy: self.region_policy,
        }
    }

    pub fn flowchart(&self) -> FlowchartOptions {
        FlowchartOptions {
            include_styling: self.include_styling,
            node_label_max: self.node_label_max,
            edge_label_max: self.edge_label_max,
            note_max: self.note_max,
        }
    }

    pub fn dot(&self) -> DotOptions {
        DotOptions {
            orientation: self.orientation,
            label_wrap: self.dot_wrap,
        }
    }
}
