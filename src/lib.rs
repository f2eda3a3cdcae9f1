// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Carepath: clinical pathway graphs from ordered node lists.
//!
//! A node list is synthesized into a branch-aware edge set (`layout`), then rendered as a Mermaid
//! flowchart or a Graphviz digraph (`format`). `convert` maps structured pathway records to node
//! lists and back; `store` reads and writes both as JSON.

pub mod config;
pub mod convert;
pub mod format;
pub mod layout;
pub mod model;
pub mod render;
pub mod schema;
pub mod store;

pub use config::{ConfigError, RenderConfig};
pub use convert::{nodes_to_pathway, pathway_to_nodes, Reconstruction, ReconstructionWarning};
pub use format::{render_dot, render_flowchart, sanitize_label, Dialect, Orientation};
pub use layout::{diagnose, synthesize, synthesize_with, Diagnostic, RegionPolicy, StructuralError};
pub use model::{ClinicalPathway, NodeKind, NodeList, NodeRef, PathwayEdge, PathwayNode};
pub use render::{render_many, render_nodes, RenderedPathway};
pub use store::StoreError;
