// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram text export.
//!
//! Two dialects are supported: a Mermaid flowchart and a Graphviz digraph. Both consume a node
//! list plus an already synthesized edge list and only ever emit sanitized labels.

pub mod dot;
mod ident;
pub mod label;
pub mod mermaid;

pub use dot::{render_dot, render_dot_with, DotOptions, Orientation, ParseOrientationError};
pub use label::{sanitize_label, Dialect};
pub use mermaid::{render_flowchart, render_flowchart_with, FlowchartOptions, StyleClass};

pub const DEFAULT_NODE_LABEL_MAX: usize = 60;
pub const DEFAULT_EDGE_LABEL_MAX: usize = 35;
pub const DEFAULT_NOTE_MAX: usize = 80;
pub const DEFAULT_DOT_WRAP: usize = 40;
