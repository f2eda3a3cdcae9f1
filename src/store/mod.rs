// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON import and export for pathway records and node lists.
//!
//! Reading from the path `-` reads stdin. Writes go to a temp file in the target directory that
//! is renamed into place.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::model::{ClinicalPathway, NodeList, PathwayNode};

pub const STDIN_PATH: &str = "-";

/// Fields a pathway record cannot be imported without.
pub const REQUIRED_FIELDS: [&str; 3] = ["condition_name", "chief_complaint", "clinical_setting"];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid json: {source}")]
    Parse { source: serde_json::Error },
    #[error("pathway record must be a JSON object")]
    NotAnObject,
    #[error("missing required field: {field} (expected a string)")]
    MissingField { field: &'static str },
}

impl StoreError {
    /// Attaches the file the document came from to a parse error.
    fn at(self, path: &Path) -> Self {
        match self {
            Self::Parse { source } => Self::Json {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(source: serde_json::Error) -> Self {
        Self::Parse { source }
    }
}

pub fn parse_pathway_json(json: &str) -> Result<ClinicalPathway, StoreError> {
    let value = serde_json::from_str::<Value>(json)?;
    let Value::Object(fields) = &value else {
        return Err(StoreError::NotAnObject);
    };
    for field in REQUIRED_FIELDS {
        if !matches!(fields.get(field), Some(Value::String(_))) {
            return Err(StoreError::MissingField { field });
        }
    }

    let mut pathway = serde_json::from_value::<ClinicalPathway>(value)?;
    pathway.normalize();
    Ok(pathway)
}

pub fn pathway_to_json(pathway: &ClinicalPathway) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(pathway)?)
}

pub fn parse_node_list(json: &str) -> Result<NodeList, StoreError> {
    Ok(serde_json::from_str::<NodeList>(json)?)
}

pub fn node_list_to_json(nodes: &[PathwayNode]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(nodes)?)
}

pub fn read_pathway(path: &Path) -> Result<ClinicalPathway, StoreError> {
    let json = read_input(path)?;
    parse_pathway_json(&json).map_err(|err| err.at(path))
}

pub fn read_node_list(path: &Path) -> Result<NodeList, StoreError> {
    let json = read_input(path)?;
    parse_node_list(&json).map_err(|err| err.at(path))
}

pub fn write_pathway(path: &Path, pathway: &ClinicalPathway) -> Result<(), StoreError> {
    let mut json = pathway_to_json(pathway)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

pub fn write_node_list(path: &Path, nodes: &[PathwayNode]) -> Result<(), StoreError> {
    let mut json = node_list_to_json(nodes)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

/// Writes rendered diagram text, replacing the file in one step.
pub fn write_text(path: &Path, text: &str) -> Result<(), StoreError> {
    write_atomic(path, text.as_bytes())
}

/// Reads a whole file, or stdin for [`STDIN_PATH`].
pub fn read_input(path: &Path) -> Result<String, StoreError> {
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(buf);
    }

    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |path: &Path, source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let Some(file_name) = path.file_name() else {
        return Err(io_err(path, io::Error::other("path has no file name")));
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".carepath.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| io_err(&tmp_path, source))?;
    file.write_all(contents).map_err(|source| io_err(&tmp_path, source))?;
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(path, source));
    }
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
